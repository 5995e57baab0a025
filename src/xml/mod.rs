//! Base64 payload decoding and Comprobante XML reading/writing.
//!
//! # Example
//!
//! ```
//! use lector_xml::xml;
//!
//! let text = xml::decode_payload("PENvbXByb2JhbnRlIEZvbGlvPSI3Ii8+").unwrap();
//! let comprobante = xml::from_xml(&text).unwrap();
//! assert_eq!(comprobante.folio, "7");
//! ```

mod decode;
mod error;
mod parse;
mod writer;

pub use decode::{decode_payload, encode_payload};
pub use error::*;
pub use parse::from_xml;
pub use writer::{CFDI_NS, to_payload, to_xml};
