use axum::http::{header, Method, StatusCode};
use finanapp::server::service::seed::SeedService;
use finanapp_test_utils::prelude::*;
use sea_orm::EntityTrait;
use serde_json::json;

use crate::util::{login_cookie, read_json, request, send, TestSetupExt};

mod login {
    use super::*;

    #[tokio::test]
    /// Expect the seeded admin to log in and be reported by auth-status
    async fn logs_in_seeded_admin() -> Result<(), TestError> {
        let test = TestBuilder::new().with_schema().build().await?;
        let result = SeedService::new(&test.db).run().await;
        assert!(result.is_ok());

        let app = test.app();
        let cookie = login_cookie(&app, "admin@example.com", "password123").await;
        assert!(cookie.starts_with("user_session="));

        let resp = send(&app, request(Method::GET, "/api/auth-status", None, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_json(resp).await;
        assert_eq!(body["authenticated"], json!(true));
        assert_eq!(body["emailAddress"], json!("admin@example.com"));
        assert_eq!(body["firstName"], json!("Admin"));

        Ok(())
    }

    #[tokio::test]
    /// Expect the session cookie attributes on a successful login
    async fn sets_session_cookie() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        test.user().insert_user("ana@example.com").await?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/login",
                Some(json!({ "email": "ana@example.com", "password": TEST_PASSWORD })),
                None,
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Max-Age=86400"));

        let body = read_json(resp).await;
        assert_eq!(body["status"], json!("success"));
        assert_eq!(body["user"]["email"], json!("ana@example.com"));

        Ok(())
    }

    #[tokio::test]
    /// Expect 401 with "Invalid credentials" for a wrong password
    async fn rejects_wrong_password() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        test.user().insert_user("ana@example.com").await?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/login",
                Some(json!({ "email": "ana@example.com", "password": "Wrong1!pass" })),
                None,
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(resp).await, json!({ "error": "Invalid credentials" }));

        Ok(())
    }

    #[tokio::test]
    /// Expect 401 "Invalid user" for a deactivated account
    async fn rejects_inactive_user() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        test.user().insert_user_with_status("ana@example.com", false).await?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/login",
                Some(json!({ "email": "ana@example.com", "password": TEST_PASSWORD })),
                None,
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(resp).await, json!({ "error": "Invalid user" }));

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 for a body that is not JSON
    async fn rejects_malformed_body() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let req = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let resp = send(&test.app(), req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    /// Expect 405 for a method the login route does not serve
    async fn rejects_wrong_method() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let resp = send(&test.app(), request(Method::DELETE, "/api/login", None, None)).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        Ok(())
    }
}

mod session {
    use super::*;

    #[tokio::test]
    /// Expect 401 Unauthorized on a protected route without a cookie
    async fn requires_cookie() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let resp = send(&test.app(), request(Method::GET, "/api/assets", None, None)).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(resp).await, json!({ "error": "Unauthorized" }));

        Ok(())
    }

    #[tokio::test]
    /// Expect 401 and no write when a create is sent with a forged token
    async fn rejects_forged_token_before_handler() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/taxes",
                Some(json!({
                    "TaxName": "ISS",
                    "TaxPercentage": "5",
                    "TaxPercentageRange": "0-100",
                    "TaxApplicableCycle": "Monthly",
                    "TaxTypeID": 2,
                    "userID": user.id
                })),
                Some("user_session=not-a-token"),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let taxes = entity::prelude::Tax::find().all(&test.db).await?;
        assert!(taxes.is_empty());

        Ok(())
    }

    #[tokio::test]
    /// Expect logout to expire the cookie even without a session
    async fn logout_expires_cookie() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let resp = send(&test.app(), request(Method::POST, "/api/logout", None, None)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with("user_session="));
        assert!(set_cookie.contains("Max-Age=0"));
        assert_eq!(read_json(resp).await["message"], json!("Successfully logged out"));

        Ok(())
    }

    #[tokio::test]
    /// Expect the health route to answer without a session
    async fn health_is_public() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;

        let resp = send(&test.app(), request(Method::GET, "/health", None, None)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Server working properly");

        Ok(())
    }
}

mod register {
    use super::*;

    #[tokio::test]
    /// Expect 201 and a stored user for a valid registration
    async fn registers_user() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/register",
                Some(json!({
                    "email": "maria@example.com",
                    "password": "Str0ng!Pass",
                    "first_name": "maria",
                    "last_name": "souza",
                    "dob": "1990-04-12"
                })),
                None,
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(read_json(resp).await["message"], json!("User successfully registered"));

        let user = test.user().get_by_email("maria@example.com").await?;
        assert_eq!(user.first_name, "Maria");

        Ok(())
    }

    #[tokio::test]
    /// Expect every validation message in a single 400 response
    async fn collects_messages() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;

        let resp = send(
            &test.app(),
            request(
                Method::POST,
                "/api/register",
                Some(json!({ "email": "not-an-email", "password": "" })),
                None,
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(body["status"], json!("error"));
        let messages = body["message"].as_array().unwrap();
        assert!(messages.contains(&json!("Invalid email format")));
        assert!(messages.contains(&json!("Password is required")));

        Ok(())
    }
}
