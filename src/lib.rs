//! Net take-home pay calculator for Korean salaries
//!
//! This crate computes monthly and annual net pay from a gross annual salary
//! and dependent count, applying the four social insurances and the
//! progressive income tax schedule, and serves the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
