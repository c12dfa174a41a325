use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod taxes {
    use super::*;

    #[tokio::test]
    /// Expect an income tax to be applied with its computed value
    async fn attaches_income_tax() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let income = test
            .finance()
            .insert_income(user.id, "Salary", Decimal::from(4000), false)
            .await?;
        let tax = test.finance().insert_tax(user.id, 2, "IRPF", Decimal::from(15)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/income/{}/taxes", income.id);
        let resp = send(
            &app,
            request(Method::POST, &uri, Some(json!({ "TaxID": tax.id })), Some(&cookie)),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["status"], json!("success"));

        let rows = entity::prelude::UserIncomeTax::find().all(&test.db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tax_value, Decimal::from(600));

        Ok(())
    }

    #[tokio::test]
    /// Expect a failed procedure and no row for an asset tax
    async fn rejects_asset_tax() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let income = test
            .finance()
            .insert_income(user.id, "Salary", Decimal::from(4000), false)
            .await?;
        let tax = test.finance().insert_tax(user.id, 1, "IPTU", Decimal::from(1)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/income/{}/taxes", income.id);
        let resp = send(
            &app,
            request(Method::POST, &uri, Some(json!({ "TaxID": tax.id })), Some(&cookie)),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(body["status"], json!("fail"));
        assert_eq!(body["message"], json!("Tax type is not applicable to incomes"));
        assert!(entity::prelude::UserIncomeTax::find().all(&test.db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    /// Expect an income update through the API to revalue its applied taxes
    async fn update_revalues_taxes() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let income = test
            .finance()
            .insert_income(user.id, "Salary", Decimal::from(5000), false)
            .await?;
        let tax = test.finance().insert_tax(user.id, 2, "IRPF", Decimal::from(10)).await?;
        test.finance()
            .insert_income_tax(income.id, tax.id, Decimal::from(500))
            .await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/income/{}", income.id);
        let resp = send(
            &app,
            request(
                Method::PUT,
                &uri,
                Some(json!({
                    "IncomeName": "Salary",
                    "IncomeValue": "8000",
                    "IncomeTypeID": 1,
                    "IncomeRecurrence": "Monthly",
                    "IncomeStartDate": "2024-01-01T00:00:00Z",
                    "userID": user.id
                })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["IncomeValue"].as_str().unwrap().parse::<Decimal>().unwrap(), Decimal::from(8000));

        let rows = entity::prelude::UserIncomeTax::find().all(&test.db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tax_value, Decimal::from(800));

        Ok(())
    }
}
