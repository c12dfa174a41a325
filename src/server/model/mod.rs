//! Server-side models.
//!
//! Application state shared by handlers, the session cache abstraction, background queue
//! messages and the result shape returned by multi-step procedures.

pub mod app;
pub mod group_item;
pub mod procedure;
pub mod reference;
pub mod session;
pub mod worker;
