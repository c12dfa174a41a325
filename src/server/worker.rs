use crate::server::{
    error::{worker::WorkerError, Error},
    model::worker::{RegistrationMessage, REGISTRATION_QUEUE},
};

/// Consumes a registration notification
///
/// Only logs the message; downstream side effects such as welcome emails live outside this
/// service.
pub async fn handle_message(message: RegistrationMessage) -> Result<(), Error> {
    if message.email.trim().is_empty() {
        tracing::error!("Dropping {} without an email", message);

        return Err(WorkerError::InvalidMessage {
            queue: REGISTRATION_QUEUE.to_string(),
            reason: "email is empty".to_string(),
        }
        .into());
    }

    tracing::info!("Received message on {}: {}", REGISTRATION_QUEUE, message);

    Ok(())
}
