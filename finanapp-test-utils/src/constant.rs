/// Password used for every fixture user.
pub static TEST_PASSWORD: &str = "Password1!";

/// Signing secret for session tokens issued in tests.
pub static TEST_JWT_SECRET: &str = "test-jwt-secret";
