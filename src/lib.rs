//! Halograph, a halftone rendering service for raster images.
//!
//! The rendering pipeline itself lives in the `halftone` crate; this crate
//! adds the HTTP surface, remote image acquisition, configuration, and the
//! CLI glue around it.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
