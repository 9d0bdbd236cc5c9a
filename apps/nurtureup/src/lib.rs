//! # nurtureup
//!
//! The NurtureUp stage service: an axum HTTP API and a clap CLI over
//! `nurtureup-core`, plus the configuration layer both share.
//!
//! The binary in `main.rs` only sets up tracing and dispatches to [`cli`].

pub mod api;
pub mod cli;
pub mod config;

pub use config::{AppConfig, LogFormat, LoggingConfig, ServerConfig, TransitionConfig};
