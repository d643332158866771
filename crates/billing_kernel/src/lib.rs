//! Billing Kernel - Foundational types and utilities for the student billing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money with precise decimal arithmetic (single implicit currency)
//! - Academic term identity (semester, school year)
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod term;

pub use error::CoreError;
pub use identifiers::{FeeLineId, PaymentId, StudentId};
pub use money::{Money, MoneyError, Rate};
pub use ports::{DomainPort, PortError};
pub use term::{SchoolYear, Semester, TermKey};
