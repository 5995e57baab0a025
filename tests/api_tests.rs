//! Status code and JSON body mapping for the HTTP boundary.

#![cfg(feature = "api")]

use lector_xml::response::*;
use lector_xml::xml::encode_payload;
use pretty_assertions::assert_eq;
use serde_json::json;

const VALIDO: &str = include_str!("fixtures/cfdi40_valido.xml");
const CON_ERRORES: &str = include_str!("fixtures/cfdi40_con_errores.xml");

fn solicitud(xml: &str) -> SolicitudXml {
    SolicitudXml {
        xml: encode_payload(xml),
    }
}

#[test]
fn success_is_200_with_document() {
    let r = responder(&solicitud(VALIDO));
    assert_eq!(r.status_code, 200);
    assert!(r.is_ok());

    let c = &r.body["comprobante"];
    assert_eq!(c["serie"], "F");
    assert_eq!(c["tipoDeComprobante"], "I");
    assert_eq!(c["uuid"], "5E2D6AFF-2DD7-43D1-83D3-14C1ACA396D9");
    assert_eq!(c["total"], "4002.00");
    assert_eq!(c["emisor"]["rfc"], "EKU9003173C9");
    assert_eq!(c["conceptos"][0]["valorUnitario"], "1500.00");
    assert_eq!(c["conceptos"][1]["noIdentificacion"], "SRV-INST");
}

#[test]
fn success_body_round_trips_to_document() {
    let r = responder(&solicitud(VALIDO));
    let body: RespuestaComprobante = serde_json::from_value(r.body).unwrap();
    let parsed = lector_xml::xml::from_xml(VALIDO).unwrap();
    assert_eq!(body.comprobante, parsed);
}

#[test]
fn validation_failure_lists_every_violation() {
    let r = responder(&solicitud(CON_ERRORES));
    assert_eq!(r.status_code, 400);

    let body: RespuestaError = serde_json::from_value(r.body).unwrap();
    assert_eq!(body.status, "400");
    assert_eq!(body.title, TITLE_INVALID_STRUCTURE);
    assert_eq!(body.detail, DETAIL_INVALID_STRUCTURE);
    assert_eq!(body.errors.len(), 7);
    assert_eq!(body.errors[0], "attribute 'Folio' is required");
    assert_eq!(body.errors[3], "Receptor is required");
}

#[test]
fn empty_payload_has_its_own_title() {
    let r = responder(&SolicitudXml { xml: "   ".into() });
    assert_eq!(r.status_code, 400);
    assert_eq!(
        r.body,
        json!({
            "status": "400",
            "title": "String vacio",
            "detail": "Haz enviado un string vacio",
        })
    );
}

#[test]
fn malformed_payloads_carry_one_cause() {
    let cases = [
        SolicitudXml { xml: "***".into() },
        solicitud("<Comprobante><Emisor></Comprobante>"),
        solicitud("texto plano"),
    ];
    for s in cases {
        let r = responder(&s);
        assert_eq!(r.status_code, 400);
        let body: RespuestaError = serde_json::from_value(r.body).unwrap();
        assert_eq!(body.title, TITLE_MALFORMED);
        assert_eq!(body.detail, DETAIL_MALFORMED);
        assert_eq!(body.errors.len(), 1, "{s:?}");
        assert!(!body.errors[0].is_empty());
    }
}

#[test]
fn json_request_body() {
    let body = json!({ "xml": encode_payload(VALIDO) }).to_string();
    assert_eq!(responder_json(&body).status_code, 200);

    let missing_key = responder_json("{}");
    assert_eq!(missing_key.body["title"], TITLE_EMPTY);
}

#[test]
fn null_and_missing_payloads_answer_alike() {
    let null = responder_json(r#"{"xml": null}"#);
    let missing = responder_json("{}");
    assert_eq!(null.status_code, 400);
    assert_eq!(null, missing);
    assert_eq!(null.body["title"], TITLE_EMPTY);
    assert_eq!(responder_json(r#"{"XML": null}"#), missing);
}
