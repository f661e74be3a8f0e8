//! # Blogly Web Server
//!
//! Library half of the binary so the integration tests can assemble the
//! same app the server runs.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod views;
