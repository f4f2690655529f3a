//! Lead Search Library
//!
//! Two independent services share this crate: the lead search API (the
//! `lead-search` binary) and a static asset server (the `static_server`
//! binary).
//!
//! # Modules
//!
//! - `api`: Router construction and OpenAPI document.
//! - `chat`: Keyword rules turning chat text into filter suggestions.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Lead table queries.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Lead and chat data models.
//! - `obs`: Tracing setup.
//! - `search`: Allow-listed search query builder.
//! - `static_files`: Static asset server.

pub mod api;
pub mod chat;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod obs;
pub mod search;
pub mod static_files;
