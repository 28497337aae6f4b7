pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
