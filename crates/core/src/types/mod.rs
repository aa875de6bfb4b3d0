//! Core types for Tamarind.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod discount;
pub mod id;

pub use discount::{DiscountPercent, DiscountPercentError};
pub use id::*;
