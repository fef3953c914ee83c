pub mod canvas;
pub mod config;
pub mod handlers;
