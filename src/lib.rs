//! Payroll computation and consistency engine
//!
//! This crate computes salary breakdowns with exact decimal arithmetic,
//! keeps pay periods from overlapping per employee, drives the payment
//! lifecycle of payroll records and aggregates them into reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod service;
pub mod store;
pub mod validation;
