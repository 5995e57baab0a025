use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::DecodeError;

/// Decode a Base64 payload into UTF-8 text.
///
/// A blank payload fails with [`DecodeError::Empty`] before any decoding.
/// ASCII whitespace inside the payload (wrapped lines) is ignored and a
/// leading byte-order mark is dropped from the decoded text.
pub fn decode_payload(payload: &str) -> Result<String, DecodeError> {
    if payload.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    let text = String::from_utf8(bytes)?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Encode text as a standard Base64 payload.
pub fn encode_payload(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}
