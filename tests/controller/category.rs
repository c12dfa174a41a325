use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod create {
    use super::*;

    #[tokio::test]
    /// Expect 409 when the user already has a category with that name
    async fn rejects_duplicate_user_category() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        test.finance().insert_category(user.id, "Travel").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/categories",
                Some(json!({ "model": "userCategory", "name": "Travel", "userID": user.id })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(read_json(resp).await["error"], json!("Category name already exists"));

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 "Model not found" for an unknown model tag
    async fn rejects_unknown_model() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/categories",
                Some(json!({ "model": "UserProfile", "name": "x", "userID": user.id })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await, json!({ "error": "Model not found" }));

        Ok(())
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    /// Expect 409 when an asset still uses the asset type
    async fn rejects_asset_type_in_use() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        test.finance().insert_asset(user.id, "Flat", Decimal::from(10)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(Method::DELETE, "/api/categories/assetType/1", None, Some(&cookie)),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            read_json(resp).await["message"],
            json!("You must delete the items using this category before deleting it")
        );

        Ok(())
    }
}
