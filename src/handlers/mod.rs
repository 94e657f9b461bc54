//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `speak` - Speech synthesis endpoints (binary WAV and base64 JSON)
//! - `speakers` - Speaker discovery endpoint

pub mod api;
pub mod speak;
pub mod speakers;
