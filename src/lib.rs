pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod server;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod testing;
