#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod clause;
pub mod clause_db;
pub mod error;
pub mod features;
pub mod literal;
pub mod watch;
