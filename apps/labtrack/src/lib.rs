//! # LabTrack
//!
//! Terminal client and reference server for laboratory temperature tracking.
//!
//! - [`cli`]: clap commands (the controller; owns the UI context)
//! - [`client`]: reqwest wrapper around the HTTP endpoints
//! - [`session`]: chat session with fallback replies
//! - [`render`]: plain-text rendering of calendars, cards and tables
//! - [`config`]: TOML client configuration (server URL, language)
//! - [`api`]: axum reference server for the temperature endpoints

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod render;
pub mod session;
