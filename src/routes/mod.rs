//! Route definitions for the HTTP API

pub mod api;
