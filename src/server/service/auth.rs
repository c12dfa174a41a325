use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::StatusMessageDto,
        auth::{LoginDto, LoginResponseDto, LoginUserDto, RegisterDto},
    },
    server::{
        data::user::{NewUser, UserRepository},
        error::{
            auth::AuthError, resource::map_unique_violation, validation::ValidationError, Error,
        },
        model::session::{CachedSession, SessionCache},
        util::{
            password::{hash_password, verify_password},
            token::SessionTokenCodec,
            validation::{capitalize, check_person, is_strong_password, is_valid_email},
        },
    },
};

/// User type assigned at registration.
const REGISTERED_USER_TYPE_ID: i32 = 2;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    session_cache: &'a dyn SessionCache,
    token_codec: &'a SessionTokenCodec,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(
        db: &'a DatabaseConnection,
        session_cache: &'a dyn SessionCache,
        token_codec: &'a SessionTokenCodec,
    ) -> Self {
        Self {
            db,
            session_cache,
            token_codec,
        }
    }

    /// Registers a new user after collecting every validation failure
    pub async fn register(&self, payload: RegisterDto) -> Result<StatusMessageDto, Error> {
        let email = payload.email.trim();
        let first_name = payload.first_name.trim();
        let last_name = payload.last_name.trim();

        let mut messages = Vec::new();
        let date_of_birth = check_person(first_name, last_name, payload.dob.trim(), &mut messages);

        if email.is_empty() {
            messages.push("Email is required".to_string());
        } else if !is_valid_email(email) {
            messages.push("Invalid email format".to_string());
        } else if UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .is_some()
        {
            messages.push("Email is already in use".to_string());
        }

        if payload.password.is_empty() {
            messages.push("Password is required".to_string());
        } else if !is_strong_password(&payload.password) {
            messages.push(
                "Password must be 8 to 128 characters with an uppercase letter, a lowercase \
                 letter, a digit and one of @$!%*?&"
                    .to_string(),
            );
        }

        let date_of_birth = match date_of_birth {
            Some(date) if messages.is_empty() => date,
            _ => return Err(ValidationError::Messages(messages).into()),
        };

        let user = UserRepository::new(self.db)
            .create(NewUser {
                user_type_id: REGISTERED_USER_TYPE_ID,
                first_name: capitalize(first_name),
                last_name: capitalize(last_name),
                email: email.to_string(),
                password_hash: hash_password(&payload.password)?,
                date_of_birth,
            })
            .await
            .map_err(|e| map_unique_violation(e, "Email is already in use", "Email is already in use"))?;

        tracing::debug!("Registered user {}", user.id);

        Ok(StatusMessageDto {
            status: "success".to_string(),
            message: "User successfully registered".to_string(),
        })
    }

    /// Checks the credentials, records the login and caches the new session
    pub async fn login(&self, payload: LoginDto) -> Result<LoginResponseDto, Error> {
        let email = payload.email.trim();
        if email.is_empty() || payload.password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let user_repo = UserRepository::new(self.db);

        let user = match user_repo.find_by_email(email).await? {
            Some(user) if user.is_active => user,
            _ => return Err(AuthError::InvalidUser(email.to_string()).into()),
        };

        if !verify_password(&payload.password, &user.password)? {
            return Err(AuthError::InvalidCredentials(email.to_string()).into());
        }

        let user = user_repo
            .update_last_login(user.id)
            .await?
            .ok_or_else(|| Error::InternalError(format!("User {} vanished during login", user.id)))?;

        let token = self.token_codec.issue(&user.email_address)?;

        self.session_cache
            .store(
                &token,
                &CachedSession {
                    user_id: user.id,
                    first_name: user.first_name.clone(),
                    email: user.email_address.clone(),
                },
            )
            .await?;

        tracing::debug!("User {} logged in", user.id);

        Ok(LoginResponseDto {
            status: "success".to_string(),
            user: LoginUserDto {
                email: user.email_address,
                first_name: user.first_name,
            },
            token,
        })
    }

    /// Drops the cached session, a missing token is not an error
    pub async fn logout(&self, token: Option<&str>) -> Result<(), Error> {
        if let Some(token) = token {
            self.session_cache.remove(token).await?;
        }

        Ok(())
    }

    /// Resolves a session token to an active user
    ///
    /// Always verifies the token and reads the user row; the session cache is never
    /// consulted for the decision.
    pub async fn authenticate(&self, token: &str) -> Result<entity::user::Model, Error> {
        let claims = self.token_codec.verify(token)?;

        match UserRepository::new(self.db)
            .find_by_email(&claims.email)
            .await?
        {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AuthError::Unauthorized.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use finanapp_test_utils::prelude::*;

    use super::AuthService;
    use crate::{
        model::auth::{LoginDto, RegisterDto},
        server::{
            error::{auth::AuthError, token::TokenError, validation::ValidationError, Error},
            model::session::{MemorySessionCache, SessionCache},
            util::token::SessionTokenCodec,
        },
    };

    fn login(email: &str, password: &str) -> LoginDto {
        LoginDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn registration(email: &str) -> RegisterDto {
        RegisterDto {
            email: email.to_string(),
            password: "Str0ng!Pass".to_string(),
            first_name: "maria".to_string(),
            last_name: "SOUZA".to_string(),
            dob: "1990-04-12".to_string(),
        }
    }

    mod register {
        use super::*;

        /// Expect a new user with type 2 and capitalised names
        #[tokio::test]
        async fn registers_user() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let result = service.register(registration("maria@example.com")).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().message, "User successfully registered");

            let user = crate::server::data::user::UserRepository::new(&test.db)
                .find_by_email("maria@example.com")
                .await?
                .unwrap();
            assert_eq!(user.user_type_id, 2);
            assert_eq!(user.first_name, "Maria");
            assert_eq!(user.last_name, "Souza");
            assert_ne!(user.password, "Str0ng!Pass");

            Ok(())
        }

        /// Expect an existing email to be reported with the other failures
        #[tokio::test]
        async fn collects_messages() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            test.user().insert_user("maria@example.com").await?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let mut payload = registration("maria@example.com");
            payload.password = "weak".to_string();

            let result = service.register(payload).await;

            match result {
                Err(Error::ValidationError(ValidationError::Messages(messages))) => {
                    assert_eq!(messages.len(), 2);
                    assert_eq!(messages[0], "Email is already in use");
                }
                other => panic!("expected validation messages, got {:?}", other.map(|_| ())),
            }

            Ok(())
        }
    }

    mod login {
        use super::*;

        /// Expect a token, an updated last login and a cached session
        #[tokio::test]
        async fn logs_in() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let result = service.login(login("ana@example.com", TEST_PASSWORD)).await;

            assert!(result.is_ok());
            let response = result.unwrap();
            assert_eq!(response.status, "success");
            assert_eq!(response.user.email, "ana@example.com");

            let session = cache.load(&response.token).await.unwrap().unwrap();
            assert_eq!(session.user_id, user.id);

            let stored = crate::server::data::user::UserRepository::new(&test.db)
                .find_by_id(user.id)
                .await?
                .unwrap();
            assert!(stored.last_login.is_some());

            Ok(())
        }

        /// Expect distinct errors for an unknown email and a wrong password
        #[tokio::test]
        async fn rejects_bad_credentials() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            test.user().insert_user("ana@example.com").await?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let unknown = service.login(login("bob@example.com", TEST_PASSWORD)).await;
            assert!(matches!(
                unknown,
                Err(Error::AuthError(AuthError::InvalidUser(_)))
            ));

            let wrong = service.login(login("ana@example.com", "Wrong1!pass")).await;
            assert!(matches!(
                wrong,
                Err(Error::AuthError(AuthError::InvalidCredentials(_)))
            ));

            let missing = service.login(login("", "")).await;
            assert!(matches!(
                missing,
                Err(Error::ValidationError(ValidationError::MissingCredentials))
            ));

            Ok(())
        }
    }

    mod authenticate {
        use super::*;

        /// Expect a logged in token to resolve to its user and logout to clear the cached session
        #[tokio::test]
        async fn resolves_user() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let token = service
                .login(login("ana@example.com", TEST_PASSWORD))
                .await
                .unwrap()
                .token;

            let result = service.authenticate(&token).await;
            assert!(result.is_ok());
            assert_eq!(result.unwrap().id, user.id);

            assert!(service.logout(Some(&token)).await.is_ok());
            assert_eq!(cache.load(&token).await.unwrap(), None);
            assert!(service.logout(None).await.is_ok());

            Ok(())
        }

        /// Expect expired tokens and tokens for unknown users to be rejected
        #[tokio::test]
        async fn rejects_invalid_tokens() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            test.user().insert_user("ana@example.com").await?;
            let cache = MemorySessionCache::new();
            let codec = SessionTokenCodec::new(TEST_JWT_SECRET);
            let service = AuthService::new(&test.db, &cache, &codec);

            let expired = codec
                .issue_with_expiry("ana@example.com", Utc::now() - Duration::hours(1))
                .unwrap();
            assert!(matches!(
                service.authenticate(&expired).await,
                Err(Error::TokenError(TokenError::Expired))
            ));

            let unknown = codec.issue("ghost@example.com").unwrap();
            assert!(matches!(
                service.authenticate(&unknown).await,
                Err(Error::AuthError(AuthError::Unauthorized))
            ));

            Ok(())
        }
    }
}
