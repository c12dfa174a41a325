mod asset;
mod auth;
mod category;
mod expense;
mod group;
mod income;
mod user;
