pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod filter;
pub mod services;
pub mod session;
pub mod surface;
pub mod types;

#[cfg(test)]
pub mod testing;
