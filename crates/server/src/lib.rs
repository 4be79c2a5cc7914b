pub mod config;
pub mod error;
pub mod providers;
pub mod routes;
pub mod state;
