//! # lector-xml
//!
//! Reads Base64-encoded CFDI fiscal invoices ("Comprobantes"): decodes the
//! payload, parses the XML into a typed document, and validates structure
//! and primitive formats, reporting every violation in one pass.
//!
//! Numeric attributes keep their original text so that values such as
//! `Total="abc"` surface as validation errors rather than parse failures.
//!
//! ## Quick Start
//!
//! ```rust
//! use lector_xml::{Outcome, read_comprobante, xml};
//!
//! let payload = xml::encode_payload(r#"<Comprobante Version="4.0" Total="abc"/>"#);
//!
//! let Outcome::ValidationFailure(errors) = read_comprobante(&payload) else {
//!     panic!("expected validation errors");
//! };
//! assert!(errors.iter().any(|e| e.field == "Total"));
//! assert!(errors.iter().all(|e| e.field != "Version"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Comprobante types, validation, builders |
//! | `xml` (default) | Base64 decoding, XML parsing/writing, the reading pipeline |
//! | `api` | HTTP status + JSON body mapping, request body type |
//! | `cli` | The `lector-xml` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "xml")]
mod lector;

#[cfg(feature = "api")]
pub mod response;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "xml")]
pub use crate::lector::{Outcome, parse_payload, read_comprobante};
