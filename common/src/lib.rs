//! Shared building blocks for the restaurant and dish query service.
//!
//! - `config`: environment driven service configuration
//! - `errors`: the error type every handler returns
//! - `middleware`: request id propagation
//! - `models`: filters and response envelopes
//! - `utils`: SELECT builder and id parsing

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
