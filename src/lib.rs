pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod models;
pub mod routes;
pub mod schema;
pub mod seed;
