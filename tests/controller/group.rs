use axum::http::{Method, StatusCode};
use finanapp_test_utils::prelude::*;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod items {
    use super::*;

    #[tokio::test]
    /// Expect an attached income to show up in the group listing
    async fn attaches_income() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let group = test.group().insert_group(user.id, "Home").await?;
        let income = test
            .finance()
            .insert_income(user.id, "Salary", Decimal::from(5000), true)
            .await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/user-group/{}/items", group.id);
        let resp = send(
            &app,
            request(
                Method::POST,
                &uri,
                Some(json!({ "GroupItemSelected": format!("income_{}", income.id) })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            read_json(resp).await["message"],
            json!("Group income created successfully!")
        );

        let resp = send(&app, request(Method::GET, "/api/user-group", None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["groups"][0]["UserGroupIncomes"].as_array().unwrap().len(), 1);

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 for an item string with an unknown prefix
    async fn rejects_unknown_item_type() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let group = test.group().insert_group(user.id, "Home").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/user-group/{}/items", group.id);
        let resp = send(
            &app,
            request(
                Method::POST,
                &uri,
                Some(json!({ "GroupItemSelected": "tax_1" })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    /// Expect 409 and the group kept while an expense is still linked to it
    async fn keeps_group_with_linked_items() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let member = test.user().insert_user("bob@example.com").await?;
        let group = test.group().insert_group(user.id, "Home").await?;
        test.group().insert_member(group.id, member.id, 3, false).await?;
        let expense = test
            .finance()
            .insert_expense(user.id, "Rent", Decimal::from(1200), true)
            .await?;
        test.group().link_expense(group.id, expense.id).await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/user-group/{}", group.id);
        let resp = send(&app, request(Method::DELETE, &uri, None, Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(entity::prelude::UserGroup::find_by_id(group.id).one(&test.db).await?.is_some());
        let members = entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group.id))
            .all(&test.db)
            .await?;
        assert_eq!(members.len(), 1);

        Ok(())
    }

    #[tokio::test]
    /// Expect members and invites to go with the group when nothing is linked
    async fn deletes_group_with_members() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let member = test.user().insert_user("bob@example.com").await?;
        let group = test.group().insert_group(user.id, "Home").await?;
        test.group().insert_member(group.id, member.id, 3, false).await?;
        test.group().insert_invite(group.id, "carol@example.com").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/user-group/{}", group.id);
        let resp = send(&app, request(Method::DELETE, &uri, None, Some(&cookie))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["message"], json!("Group deleted successfully!"));
        assert!(entity::prelude::UserGroup::find_by_id(group.id).one(&test.db).await?.is_none());
        assert!(entity::prelude::GroupMember::find().all(&test.db).await?.is_empty());
        assert!(entity::prelude::GroupInvite::find().all(&test.db).await?.is_empty());

        Ok(())
    }
}

mod invite {
    use super::*;

    #[tokio::test]
    /// Expect an invite row for an email with no account
    async fn records_invite_for_unknown_email() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        let group = test.group().insert_group(user.id, "Home").await?;

        let app = test.app();
        let cookie = login_cookie(&app, "ana@example.com", TEST_PASSWORD).await;

        let uri = format!("/api/user-group/{}/invites", group.id);
        let resp = send(
            &app,
            request(
                Method::POST,
                &uri,
                Some(json!({ "InviteEmail": "carol@example.com" })),
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            read_json(resp).await["message"],
            json!("User not found, We've sent an Invite by Email")
        );
        let invites = entity::prelude::GroupInvite::find().all(&test.db).await?;
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0].invite_email, "carol@example.com");

        Ok(())
    }
}
