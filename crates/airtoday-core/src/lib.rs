//! Core types and trait definitions for AirToday.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend (`airtoday-store-sqlite`) and the lookup provider
//! (`airtoday-openweather`) implement the traits defined here; the CLI wires
//! them together.

pub mod aggregator;
pub mod aqi;
pub mod consolidate;
pub mod error;
pub mod location;
pub mod lookup;
pub mod snapshot;
pub mod store;
pub mod tips;
pub mod world;

pub use error::{Error, Result};
