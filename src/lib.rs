//! Trip-activity recommendation service
//!
//! Ranks activities for a set of travel preferences, either through an
//! external language-model delegate or a deterministic local synthesizer,
//! and exposes a great-circle distance utility and a user lookup proxy.
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
