//! Flight plan CLI - reads a route, runs the leg engine and prints a kneeboard.
//!
//! This crate provides:
//! - plan_route: sequence a route file (or the built-in demo) and print its legs

pub mod config;
pub mod demo;
pub mod export;
pub mod kneeboard;

pub use config::{init_tracing, Config, LogFormat};
pub use export::{plan_output, PlanOutput};
pub use kneeboard::render_kneeboard;
