pub mod cookie;
pub mod json;
