pub mod config;
pub mod error;
pub mod observability;
pub mod server;
pub mod store;
pub mod tasks;
