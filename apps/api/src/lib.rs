//! Check-U resume analyzer API.
//!
//! Accepts a PDF resume plus an optional job description, runs one
//! structured-output Gemini call to analyze it, and keeps an ordered local
//! history of the resulting records.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod history;
pub mod llm_client;
pub mod routes;
pub mod state;
