use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::ParseError;
use crate::core::{Comprobante, Concepto, Persona, RawNumber};

/// Parse Comprobante XML text into a document tree.
///
/// Parsing is lenient: elements and attributes are matched by local name
/// (`cfdi:Emisor` and `Emisor` are the same), unknown elements and
/// attributes are ignored, and absent attributes take the empty default.
/// Only XML that cannot be read at all is rejected; required-ness is left
/// to [`validate_comprobante`](crate::core::validate_comprobante).
pub fn from_xml(xml: &str) -> Result<Comprobante, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc: Option<Comprobante> = None;
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e);
                open_element(&mut doc, &path, &name, e, reader.buffer_position())?;
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e);
                open_element(&mut doc, &path, &name, e, reader.buffer_position())?;
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(ref t)) if path.is_empty() && !t.iter().all(u8::is_ascii_whitespace) => {
                return Err(ParseError::TextOutsideRoot(reader.buffer_position()));
            }
            Ok(Event::CData(_)) if path.is_empty() => {
                return Err(ParseError::TextOutsideRoot(reader.buffer_position()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Syntax {
                    position: reader.error_position(),
                    source: e,
                });
            }
            _ => {}
        }
    }

    if let Some(open) = path.pop() {
        return Err(ParseError::UnclosedElement(open));
    }
    doc.ok_or(ParseError::MissingRoot)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Route an opening (or self-closing) element into the document.
/// `path` holds the local names of the currently open ancestors.
fn open_element(
    doc: &mut Option<Comprobante>,
    path: &[String],
    name: &str,
    e: &BytesStart<'_>,
    position: u64,
) -> Result<(), ParseError> {
    let attrs = read_attributes(e, position)?;

    let Some(comprobante) = doc.as_mut() else {
        if name != "Comprobante" {
            return Err(ParseError::UnexpectedRoot(name.to_string()));
        }
        *doc = Some(comprobante_from(attrs));
        return Ok(());
    };

    if path.is_empty() {
        return Err(ParseError::TrailingElement(name.to_string()));
    }

    let parents: Vec<&str> = path[1..].iter().map(String::as_str).collect();
    match (parents.as_slice(), name) {
        ([], "Emisor") => comprobante.emisor = Some(persona_from(attrs)),
        ([], "Receptor") => comprobante.receptor = Some(persona_from(attrs)),
        ([], "Concepto") | (["Conceptos"], "Concepto") => {
            comprobante.conceptos.push(concepto_from(attrs));
        }
        _ => {}
    }
    Ok(())
}

/// Collect `(local name, unescaped value)` pairs, skipping namespace
/// declarations.
fn read_attributes(e: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Attribute {
            position,
            source: quick_xml::Error::InvalidAttr(err),
        })?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|source| ParseError::Attribute { position, source })?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

fn comprobante_from(attrs: Vec<(String, String)>) -> Comprobante {
    let mut c = Comprobante::default();
    for (key, value) in attrs {
        match key.as_str() {
            "Version" => c.version = value,
            "LugarExpedicion" => c.lugar_expedicion = value,
            "MetodoPago" => c.metodo_pago = value,
            "TipoDeComprobante" => c.tipo_de_comprobante = value,
            "FormaPago" => c.forma_pago = value,
            "Folio" => c.folio = value,
            "Serie" => c.serie = value,
            "Moneda" => c.moneda = value,
            "UUID" => c.uuid = value,
            "Total" => c.total = RawNumber::new(value),
            "SubTotal" => c.sub_total = RawNumber::new(value),
            _ => {}
        }
    }
    c
}

fn persona_from(attrs: Vec<(String, String)>) -> Persona {
    let mut p = Persona::default();
    for (key, value) in attrs {
        match key.as_str() {
            "Rfc" => p.rfc = value,
            "Nombre" => p.nombre = value,
            _ => {}
        }
    }
    p
}

fn concepto_from(attrs: Vec<(String, String)>) -> Concepto {
    let mut c = Concepto::default();
    for (key, value) in attrs {
        match key.as_str() {
            "NoIdentificacion" => c.no_identificacion = value,
            "ClaveProdServ" => c.clave_prod_serv = value,
            "Descripcion" => c.descripcion = value,
            "ClaveUnidad" => c.clave_unidad = value,
            "ValorUnitario" => c.valor_unitario = RawNumber::new(value),
            "Cantidad" => c.cantidad = RawNumber::new(value),
            "Importe" => c.importe = RawNumber::new(value),
            _ => {}
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    const CFDI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0" Serie="A" Folio="77"
    LugarExpedicion="06600" MetodoPago="PUE" TipoDeComprobante="I" FormaPago="03"
    Moneda="MXN" UUID="6F9619FF-8B86-D011-B42D-00C04FC964FF" SubTotal="200.00" Total="232.00"
    Exportacion="01">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="Ferreteria &amp; Hijos" RegimenFiscal="601"/>
  <cfdi:Receptor Rfc="XAXX010101000" Nombre="Publico en General"/>
  <cfdi:Conceptos>
    <cfdi:Concepto NoIdentificacion="M-1" ClaveProdServ="27111700" Descripcion="Martillo"
        ClaveUnidad="H87" Cantidad="2" ValorUnitario="100.00" Importe="200.00">
      <cfdi:Impuestos/>
    </cfdi:Concepto>
  </cfdi:Conceptos>
  <cfdi:Complemento/>
</cfdi:Comprobante>"#;

    #[test]
    fn parses_namespaced_cfdi() {
        let c = from_xml(CFDI).unwrap();
        assert_eq!(c.version, "4.0");
        assert_eq!(c.serie, "A");
        assert_eq!(c.folio, "77");
        assert_eq!(c.total.as_str(), "232.00");
        assert_eq!(c.emisor.as_ref().unwrap().nombre, "Ferreteria & Hijos");
        assert_eq!(c.receptor.as_ref().unwrap().rfc, "XAXX010101000");
        assert_eq!(c.conceptos.len(), 1);
        assert_eq!(c.conceptos[0].clave_unidad, "H87");
        assert_eq!(c.conceptos[0].cantidad.as_str(), "2");
    }

    #[test]
    fn absent_attributes_take_defaults() {
        let c = from_xml("<Comprobante><Emisor/></Comprobante>").unwrap();
        assert_eq!(c.version, "");
        assert!(!c.total.is_present());
        assert_eq!(c.emisor, Some(Persona::default()));
        assert!(c.receptor.is_none());
        assert!(c.conceptos.is_empty());
    }

    #[test]
    fn non_numeric_text_is_kept() {
        let c = from_xml(r#"<Comprobante Total="abc"/>"#).unwrap();
        assert_eq!(c.total.as_str(), "abc");
        assert_eq!(c.total.as_decimal(), None);
    }

    #[test]
    fn nested_concepto_elsewhere_is_ignored() {
        let xml = r#"<Comprobante>
            <Addenda><Conceptos><Concepto NoIdentificacion="x"/></Conceptos></Addenda>
            <Concepto NoIdentificacion="direct"/>
        </Comprobante>"#;
        let c = from_xml(xml).unwrap();
        assert_eq!(c.conceptos.len(), 1);
        assert_eq!(c.conceptos[0].no_identificacion, "direct");
    }

    #[test]
    fn rejects_wrong_root() {
        assert!(matches!(
            from_xml("<Factura/>"),
            Err(ParseError::UnexpectedRoot(name)) if name == "Factura"
        ));
    }

    #[test]
    fn rejects_unclosed_and_mismatched() {
        assert!(from_xml("<Comprobante><Emisor>").is_err());
        assert!(from_xml("<Comprobante></Emisor>").is_err());
    }

    #[test]
    fn rejects_text_without_root() {
        assert!(matches!(from_xml("hola mundo"), Err(ParseError::TextOutsideRoot(_))));
        assert!(matches!(from_xml(""), Err(ParseError::MissingRoot)));
        assert!(matches!(from_xml("<!-- vacio -->\n"), Err(ParseError::MissingRoot)));
    }

    #[test]
    fn rejects_text_around_root() {
        for xml in [
            "basura<Comprobante/>",
            "<Comprobante/>basura",
            "<Comprobante></Comprobante>\n  x\n",
            "<![CDATA[x]]><Comprobante/>",
        ] {
            assert!(
                matches!(from_xml(xml), Err(ParseError::TextOutsideRoot(_))),
                "{xml:?}"
            );
        }
        assert!(from_xml("\n  <Comprobante/>\n\n").is_ok());
    }

    #[test]
    fn rejects_second_root() {
        assert!(matches!(
            from_xml("<Comprobante/><Comprobante/>"),
            Err(ParseError::TrailingElement(_))
        ));
    }

    #[test]
    fn rejects_bad_attributes() {
        assert!(matches!(
            from_xml(r#"<Comprobante Folio="1" Folio="2"/>"#),
            Err(ParseError::Attribute { .. })
        ));
        assert!(matches!(
            from_xml(r#"<Comprobante Folio="&bogus;"/>"#),
            Err(ParseError::Attribute { .. })
        ));
    }
}
