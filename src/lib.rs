pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;
pub use db::{create_pool, init_schema};
pub use error::{AppError, Result};
pub use routes::AppState;
