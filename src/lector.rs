//! The decode → parse → validate pipeline.

use crate::core::{Comprobante, ValidationError, validate_comprobante};
use crate::xml::{InputError, decode_payload, from_xml};

/// Result of reading one Base64 Comprobante payload.
#[derive(Debug)]
pub enum Outcome {
    /// Decoded, parsed, and free of violations.
    Success(Comprobante),
    /// Well-formed document with one or more violations, in check order.
    ValidationFailure(Vec<ValidationError>),
    /// Rejected before a document tree existed.
    InputFailure(InputError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The document, when reading succeeded.
    pub fn comprobante(&self) -> Option<&Comprobante> {
        match self {
            Self::Success(c) => Some(c),
            _ => None,
        }
    }

    /// The violations, or an empty slice for the other outcomes.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::ValidationFailure(errors) => errors,
            _ => &[],
        }
    }

    /// The input error, when the payload never became a document.
    pub fn input_error(&self) -> Option<&InputError> {
        match self {
            Self::InputFailure(e) => Some(e),
            _ => None,
        }
    }
}

/// Decode a Base64 payload and parse it into a Comprobante.
///
/// Input errors only; no validation is applied.
pub fn parse_payload(payload: &str) -> Result<Comprobante, InputError> {
    let text = decode_payload(payload)?;
    Ok(from_xml(&text)?)
}

/// Decode, parse, and validate a Base64 Comprobante payload.
///
/// The validator never runs on a payload that failed to decode or parse,
/// and reports every violation, not just the first.
///
/// ```
/// use lector_xml::{Outcome, read_comprobante};
///
/// match read_comprobante("   ") {
///     Outcome::InputFailure(e) => assert_eq!(e.to_string(), "payload is empty"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// ```
pub fn read_comprobante(payload: &str) -> Outcome {
    let comprobante = match parse_payload(payload) {
        Ok(c) => c,
        Err(e) => return Outcome::InputFailure(e),
    };

    let errors = validate_comprobante(&comprobante);
    if errors.is_empty() {
        Outcome::Success(comprobante)
    } else {
        Outcome::ValidationFailure(errors)
    }
}
