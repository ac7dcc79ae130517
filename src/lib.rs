pub mod app;
pub mod cache;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gpu;
pub mod handlers;
pub mod model;
pub mod registry;
