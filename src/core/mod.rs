//! Core Comprobante types, validation, and builders.
//!
//! This module has no XML or encoding dependencies: it describes the
//! document shape and the structural/format rules a parsed document must
//! satisfy.

mod builder;
mod error;
pub mod numeric;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use numeric::{is_valid_decimal, is_valid_integer};
pub use types::*;
pub use validation::*;
