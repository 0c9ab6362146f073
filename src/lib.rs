pub mod app;
pub mod bootstrap;
pub mod builder;
pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
