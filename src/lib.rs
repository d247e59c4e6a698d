pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod models;
pub mod query;
pub mod routes;
pub mod store;
