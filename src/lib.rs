//! IRPF Net Salary Engine
//!
//! This crate turns a gross annual salary, a progressive withholding bracket
//! table and a set of flat social-contribution rates into the net salary per
//! payment, the IRPF withholding percentage and the prorated extra payment
//! ("paga extra") of a Spanish payroll.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
