//! Server application core modules.
//!
//! Everything that runs inside the finanapp process: configuration, HTTP routing and
//! controllers, the authentication middleware, services and repositories over the
//! SeaORM entities, the Redis session cache and the background registration consumer.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;
