pub mod auth;
pub mod config;
pub mod gateway;
pub mod models;
pub mod nav;
pub mod payment;
pub mod stores;
pub mod validate;

pub use config::AppConfig;
pub use gateway::Gateway;
