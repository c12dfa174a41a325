use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde_json::{json, Value};

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

fn expense_body(user_id: i32, name: &str, value: &str) -> Value {
    json!({
        "ExpenseName": name,
        "ExpenseValue": value,
        "ExpenditureTypeID": "2",
        "ExpenseRecurrence": "Monthly",
        "ExpenseStartDate": "2024-03-01",
        "ExpenseEndDate": "",
        "SharedExpense": true,
        "userID": user_id
    })
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

mod crud {
    use super::*;

    #[tokio::test]
    /// Expect an expense to be created, read, replaced and deleted by its owner
    async fn full_lifecycle() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/expense",
                Some(expense_body(user.id, "Rent", "1200.50")),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = read_json(resp).await;
        assert_eq!(created["ExpenditureType"]["Name"], json!("HomeCare"));
        let id = created["ID"].as_i64().unwrap();

        let uri = format!("/api/expense/{}", id);
        let resp = send(
            &app,
            request(
                Method::PUT,
                &uri,
                Some(expense_body(user.id, "Rent", "1300")),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, request(Method::GET, &uri, None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched = read_json(resp).await;
        assert_eq!(decimal(&fetched["ExpenseValue"]), Decimal::new(1300, 0));
        assert_eq!(fetched["ExpenseEndDate"], Value::Null);

        let resp = send(&app, request(Method::GET, "/api/expense", None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await.as_array().unwrap().len(), 1);

        let resp = send(&app, request(Method::DELETE, &uri, None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["message"], json!("Expense deleted successfully"));
        assert!(entity::prelude::UserExpense::find().all(&test.db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 "Invalid date format" and no row for a malformed start date
    async fn rejects_bad_date() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let mut body = expense_body(user.id, "Rent", "1200");
        body["ExpenseStartDate"] = json!("01/03/2024");
        let resp = send(&app, request(Method::POST, "/api/expense", Some(body), Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await, json!({ "error": "Invalid date format" }));
        assert!(entity::prelude::UserExpense::find().all(&test.db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 when reading or replacing another user's expense
    async fn hides_foreign_expense() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        test.user().insert_user("ana@example.com").await?;
        let bob = test.user().insert_user("bob@example.com").await?;
        let expense = test
            .finance()
            .insert_expense(bob.id, "Gym", Decimal::from(90), false)
            .await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/expense/{}", expense.id);
        let resp = send(&app, request(Method::GET, &uri, None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(resp).await, json!({ "error": "Expense not found" }));

        let resp = send(
            &app,
            request(Method::PUT, &uri, Some(expense_body(bob.id, "Gym", "1")), Some(&cookie)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let kept = entity::prelude::UserExpense::find_by_id(expense.id)
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(kept.value, Decimal::from(90));

        Ok(())
    }
}
