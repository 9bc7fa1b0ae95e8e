//! # Middleware
//!
//! Tower layers applied to every route.

pub mod tracing_layer;
