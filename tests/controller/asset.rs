use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod create {
    use super::*;

    #[tokio::test]
    /// Expect 201 with the asset and its computed tax values
    async fn creates_asset_with_taxes() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let tax = test.finance().insert_tax(user.id, 1, "IPTU", Decimal::from(10)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/assets",
                Some(json!({
                    "AssetName": "Beach house",
                    "AssetValue": "250000.50",
                    "AssetTypeID": "1",
                    "AssetAquisitionDate": "2024-02-01",
                    "userID": user.id,
                    "UserAssetTaxes": [{ "TaxID": tax.id }]
                })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = read_json(resp).await;
        assert_eq!(body["AssetName"], json!("Beach house"));
        assert_eq!(body["UserAssetTaxes"].as_array().unwrap().len(), 1);

        let rows = entity::prelude::UserAssetTax::find().all(&test.db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tax_value, "25000.05".parse::<Decimal>().unwrap());

        Ok(())
    }

    #[tokio::test]
    /// Expect 401 when the payload names another user as owner
    async fn rejects_foreign_owner() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let other = test.user().insert_user("bob@example.com").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let resp = send(
            &app,
            request(
                Method::POST,
                "/api/assets",
                Some(json!({
                    "AssetName": "Car",
                    "AssetValue": "100",
                    "AssetTypeID": 2,
                    "AssetAquisitionDate": "2024-02-01",
                    "userID": other.id
                })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let assets = entity::prelude::UserAsset::find()
            .filter(entity::user_asset::Column::UserId.eq(user.id))
            .all(&test.db)
            .await?;
        assert!(assets.is_empty());

        Ok(())
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    /// Expect the asset and all of its tax rows to be removed together
    async fn removes_asset_and_taxes() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let asset = test.finance().insert_asset(user.id, "Flat", Decimal::from(1000)).await?;
        let iptu = test.finance().insert_tax(user.id, 1, "IPTU", Decimal::from(1)).await?;
        let fee = test.finance().insert_tax(user.id, 1, "Fee", Decimal::from(2)).await?;
        test.finance().insert_asset_tax(asset.id, iptu.id, Decimal::from(10)).await?;
        test.finance().insert_asset_tax(asset.id, fee.id, Decimal::from(20)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/assets/{}", asset.id);
        let resp = send(&app, request(Method::DELETE, &uri, None, Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["message"], json!("Asset deleted successfully"));
        assert!(entity::prelude::UserAsset::find_by_id(asset.id).one(&test.db).await?.is_none());
        assert!(entity::prelude::UserAssetTax::find().all(&test.db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    /// Expect deleting another user's asset to succeed without touching the row
    async fn keeps_foreign_asset() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        test.user().insert_user("ana@example.com").await?;
        let other = test.user().insert_user("bob@example.com").await?;
        let asset = test.finance().insert_asset(other.id, "Flat", Decimal::from(1000)).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/assets/{}", asset.id);
        let resp = send(&app, request(Method::DELETE, &uri, None, Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(entity::prelude::UserAsset::find_by_id(asset.id).one(&test.db).await?.is_some());

        Ok(())
    }
}
