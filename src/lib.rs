//! GradeSys - school grade registrar backend.
//!
//! Built on Actix Web and SeaORM.
//!
//! # Layout
//! - `cache`: object cache (Moka/Redis)
//! - `config`: layered configuration
//! - `entity`: SeaORM entities
//! - `errors`: error type shared by every layer
//! - `importers`: spreadsheet and document parsers for bulk imports
//! - `mailer`: outgoing mail for password reset codes
//! - `middlewares`: authentication, roles and rate limiting
//! - `models`: API types
//! - `reports`: printable reports
//! - `routes`: HTTP routes
//! - `runtime`: startup and shutdown
//! - `services`: one file per operation
//! - `storage`: persistence (SeaORM)
//! - `utils`: grading rules, validation and helpers

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod importers;
pub mod mailer;
pub mod middlewares;
pub mod models;
pub mod reports;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
