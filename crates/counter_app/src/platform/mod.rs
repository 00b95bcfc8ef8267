//! Terminal front-end: plays the UI coordinator role for the counter engine.
mod app;
mod commands;
mod coordinator;
mod files;
mod logging;
mod persistence;

pub use app::run_app;
