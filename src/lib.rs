pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod pricing;
pub mod services;

pub use db::create_pool;
pub use error::AppError;
