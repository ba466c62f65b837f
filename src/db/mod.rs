//! SQLite-backed implementation of the store gateways.

mod connection;
mod helpers;
mod migrations;
mod repositories;

pub use connection::Database;
