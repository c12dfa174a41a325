use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod dashboard {
    use super::*;

    #[tokio::test]
    /// Expect only the caller's own items in the dashboard
    async fn lists_own_items() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_reference_data()
            .with_user("ana@example.com")
            .with_user("bob@example.com")
            .build()
            .await?;
        let ana = test.user().get_by_email("ana@example.com").await?;
        let bob = test.user().get_by_email("bob@example.com").await?;
        test.finance().insert_asset(ana.id, "Flat", Decimal::from(1000)).await?;
        test.finance().insert_asset(bob.id, "Boat", Decimal::from(500)).await?;
        test.group().insert_group(ana.id, "Home").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(&app, request(Method::GET, "/api/user", None, Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["user"]["emailAddress"], json!("ana@example.com"));
        let assets = body["assets"].as_array().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0]["AssetName"], json!("Flat"));
        assert_eq!(body["groups"].as_array().unwrap().len(), 1);
        assert_eq!(body["assetTypes"].as_array().unwrap().len(), 2);

        Ok(())
    }
}

mod edit {
    use super::*;

    #[tokio::test]
    /// Expect capitalised names and the new date of birth to be stored
    async fn updates_profile() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_reference_data()
            .with_user("ana@example.com")
            .build()
            .await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/user-edit",
                Some(json!({
                    "firstName": "anamaria",
                    "lastName": "lima",
                    "dateOfBirth": "1992-07-30"
                })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["status"], json!("success"));
        assert_eq!(body["dateOfBirth"], json!("1992-07-30"));

        let user = test.user().get_by_email("ana@example.com").await?;
        assert_eq!(user.last_name, "Lima");

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 with field messages when the names are missing
    async fn rejects_missing_names() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_reference_data()
            .with_user("ana@example.com")
            .build()
            .await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/user-edit",
                Some(json!({ "dateOfBirth": "1992-07-30" })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let messages = read_json(resp).await["message"].as_array().unwrap().clone();
        assert!(messages.contains(&json!("First name is required")));
        assert!(messages.contains(&json!("Last name is required")));

        Ok(())
    }
}
