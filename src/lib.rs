pub mod api;
pub mod config;
pub mod migrate;
pub mod ui;
