//! Messages consumed by the background worker.
//!
//! Nothing in the request path publishes to the queue yet; the consumer runs so that
//! registration notifications can be added without a deploy of the worker itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Redis namespace the registration consumer listens on.
pub const REGISTRATION_QUEUE: &str = "user_registration";

/// Notification that a user finished registering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationMessage {
    pub username: String,
    pub email: String,
    pub role: String,
}

impl fmt::Display for RegistrationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegistrationMessage {{ username: {}, email: {}, role: {} }}",
            self.username, self.email, self.role
        )
    }
}
