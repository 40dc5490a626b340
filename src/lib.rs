// src/lib.rs

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod routes;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_router;
