//! REST API server for the Keepsake gallery.
//!
//! The binary in `main.rs` wires the pieces together: settings → connection
//! pool → migrations → [`routes::router`] → serve. Everything is passed
//! explicitly; there is no process-global store.

pub mod database;
pub mod routes;
pub mod settings;
