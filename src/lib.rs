#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "Domain models (email, password, user), the user repository port with its"]
#![doc = "PostgreSQL and in-memory adapters, JWT issuance, the authentication service,"]
#![doc = "HTTP routes and error handling for the todoforge server. The binary (`main.rs`)"]
#![doc = "wires these together from environment configuration."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

pub use crate::error::AppError;
