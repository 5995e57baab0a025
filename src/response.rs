//! HTTP boundary mapping for the reading pipeline.
//!
//! Turns an [`Outcome`] into a status code and a JSON body. Routing,
//! authentication, and transport belong to the hosting server; this module
//! only fixes the shapes exchanged with it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::Comprobante;
use crate::lector::{Outcome, read_comprobante};
use crate::xml::{InputError, InputFailureKind};

pub const TITLE_EMPTY: &str = "String vacio";
pub const DETAIL_EMPTY: &str = "Haz enviado un string vacio";
pub const TITLE_INVALID_STRUCTURE: &str = "Errores en la estructura del XML";
pub const DETAIL_INVALID_STRUCTURE: &str = "La estructura del XML, contiene errores, pueden faltar atributos o los tipo de datos no corresponden a la estructura especificada en el xsd";
pub const TITLE_MALFORMED: &str = "Formato incorrecto";
pub const DETAIL_MALFORMED: &str = "Haz enviado un string con tipo de dato incorrecto o mal formado";

/// Inbound request body: the Base64 payload.
///
/// A missing or `null` payload reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolicitudXml {
    #[serde(alias = "XML", alias = "Xml", default, deserialize_with = "null_as_empty")]
    pub xml: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error body shared by all 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespuestaError {
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl RespuestaError {
    fn bad_request(title: &str, detail: &str, errors: Vec<String>) -> Self {
        Self {
            status: "400".to_string(),
            title: title.to_string(),
            detail: detail.to_string(),
            errors,
        }
    }
}

/// Success body: the parsed document under a `comprobante` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespuestaComprobante {
    pub comprobante: Comprobante,
}

/// A status code and JSON body ready to hand to the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Respuesta {
    pub status_code: u16,
    pub body: Value,
}

impl Respuesta {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

impl From<Outcome> for Respuesta {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success(comprobante) => {
                tracing::debug!(
                    serie = %comprobante.serie,
                    folio = %comprobante.folio,
                    conceptos = comprobante.conceptos.len(),
                    "comprobante accepted"
                );
                ok(RespuestaComprobante { comprobante })
            }
            Outcome::ValidationFailure(errors) => {
                tracing::info!(violations = errors.len(), "comprobante has structural errors");
                let messages = errors.iter().map(ToString::to_string).collect();
                bad_request(RespuestaError::bad_request(
                    TITLE_INVALID_STRUCTURE,
                    DETAIL_INVALID_STRUCTURE,
                    messages,
                ))
            }
            Outcome::InputFailure(e) => {
                tracing::warn!(kind = %e.kind(), detail = %e.detail(), "payload rejected");
                bad_request(input_error_body(&e))
            }
        }
    }
}

/// Map an input failure to its error body.
pub fn input_error_body(e: &InputError) -> RespuestaError {
    match e.kind() {
        InputFailureKind::EmptyInput => {
            RespuestaError::bad_request(TITLE_EMPTY, DETAIL_EMPTY, Vec::new())
        }
        InputFailureKind::MalformedEncoding | InputFailureKind::MalformedDocument => {
            RespuestaError::bad_request(TITLE_MALFORMED, DETAIL_MALFORMED, vec![e.detail()])
        }
    }
}

/// Run the pipeline for one request body.
pub fn responder(solicitud: &SolicitudXml) -> Respuesta {
    read_comprobante(&solicitud.xml).into()
}

/// Run the pipeline for a raw JSON request body.
///
/// A body that is not a JSON object with an `xml` string is answered like
/// a malformed payload.
pub fn responder_json(body: &str) -> Respuesta {
    match serde_json::from_str::<SolicitudXml>(body) {
        Ok(solicitud) => responder(&solicitud),
        Err(e) => {
            tracing::warn!(error = %e, "request body is not valid JSON");
            bad_request(RespuestaError::bad_request(
                TITLE_MALFORMED,
                DETAIL_MALFORMED,
                vec![e.to_string()],
            ))
        }
    }
}

fn ok<T: Serialize>(body: T) -> Respuesta {
    to_respuesta(200, body)
}

fn bad_request(body: RespuestaError) -> Respuesta {
    to_respuesta(400, body)
}

fn to_respuesta<T: Serialize>(status_code: u16, body: T) -> Respuesta {
    // Plain data structs with string keys always serialize.
    let body = serde_json::to_value(body).unwrap_or(Value::Null);
    Respuesta { status_code, body }
}
