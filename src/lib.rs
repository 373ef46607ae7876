//! Pricing and deposit engine for event-helper bookings
//!
//! This crate prices a booking from its date, duration and helper count:
//! per-year helper rates, holiday and surge-date adjustments, a tiered travel
//! fee for out-of-area events, and a recommended deposit snapped to a lattice
//! of round amounts. The calculators are pure functions over an immutable
//! [`config::PricingConfig`]; the [`api`] module serves them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
