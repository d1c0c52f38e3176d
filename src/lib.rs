//! FX Analyzer - Client for server-side currency pair analysis
//!
//! This crate triggers an analysis job on a prediction server with a single
//! `POST /analyze` and renders the returned per-pair predictions through an
//! injected output port (terminal text, an HTML page, or in-memory state).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
