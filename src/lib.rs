//! Rio do Sul river level forecast service.
//!
//! Collects upstream sensor readings (river level and rainfall at
//! Ituporanga and Taió), runs them through a pre-trained linear-regression
//! pipeline loaded from disk, and serves the predicted level at Rio do Sul
//! with a traffic-light interpretation over a small web form.
//!
//! Module map:
//! - `model` — shared domain types and errors
//! - `artifact` — the fitted scaler and regression predictor
//! - `pipeline` — validation → scaling → inference, per variant
//! - `loader` — one-time memoized artifact loading
//! - `stations` — station and input-field registries (feature order)
//! - `alert` — condition banding and the progress gauge
//! - `config` — TOML service configuration
//! - `logging` — leveled console/file logging
//! - `verify` — pre-deploy artifact verification
//! - `server` — the axum HTTP surface

pub mod alert;
pub mod artifact;
pub mod config;
pub mod loader;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod stations;
pub mod verify;
