pub mod config;
pub mod logging;

pub mod batch;
pub mod classify;
pub mod engine;
pub mod fetch;
pub mod url_model;
