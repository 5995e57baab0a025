use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::io::Cursor;

use super::decode::encode_payload;
use super::error::WriteError;
use crate::core::{Comprobante, Concepto, Persona};

/// CFDI 4.0 namespace.
pub const CFDI_NS: &str = "http://www.sat.gob.mx/cfd/4";

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, WriteError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    fn into_string(self) -> String {
        let buf = self.writer.into_inner().into_inner();
        // Only &str content was written.
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) -> Result<&mut Self, WriteError> {
        self.writer.write_event(Event::Start(element(name, attrs)))?;
        Ok(self)
    }

    fn empty_element(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) -> Result<&mut Self, WriteError> {
        self.writer.write_event(Event::Empty(element(name, attrs)))?;
        Ok(self)
    }

    fn end_element(&mut self, name: &str) -> Result<&mut Self, WriteError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(self)
    }
}

/// Attributes without a value are left out.
fn element<'a>(name: &'a str, attrs: &[(&str, Option<&str>)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for (k, v) in attrs {
        if let Some(v) = v {
            elem.push_attribute((*k, *v));
        }
    }
    elem
}

/// Serialize a Comprobante as CFDI 4.0 XML.
///
/// Numeric attributes are written with their original text, blank text
/// included; absent ones are omitted, as are blank string attributes.
pub fn to_xml(comprobante: &Comprobante) -> Result<String, WriteError> {
    let mut w = XmlWriter::new()?;

    w.start_element(
        "cfdi:Comprobante",
        &[
            ("xmlns:cfdi", Some(CFDI_NS)),
            ("Version", text(&comprobante.version)),
            ("Serie", text(&comprobante.serie)),
            ("Folio", text(&comprobante.folio)),
            ("LugarExpedicion", text(&comprobante.lugar_expedicion)),
            ("MetodoPago", text(&comprobante.metodo_pago)),
            ("TipoDeComprobante", text(&comprobante.tipo_de_comprobante)),
            ("FormaPago", text(&comprobante.forma_pago)),
            ("Moneda", text(&comprobante.moneda)),
            ("UUID", text(&comprobante.uuid)),
            ("SubTotal", comprobante.sub_total.raw()),
            ("Total", comprobante.total.raw()),
        ],
    )?;

    if let Some(emisor) = &comprobante.emisor {
        write_persona(&mut w, "cfdi:Emisor", emisor)?;
    }
    if let Some(receptor) = &comprobante.receptor {
        write_persona(&mut w, "cfdi:Receptor", receptor)?;
    }

    if !comprobante.conceptos.is_empty() {
        w.start_element("cfdi:Conceptos", &[])?;
        for concepto in &comprobante.conceptos {
            write_concepto(&mut w, concepto)?;
        }
        w.end_element("cfdi:Conceptos")?;
    }

    w.end_element("cfdi:Comprobante")?;
    Ok(w.into_string())
}

/// Serialize a Comprobante and encode it as a Base64 payload.
pub fn to_payload(comprobante: &Comprobante) -> Result<String, WriteError> {
    Ok(encode_payload(&to_xml(comprobante)?))
}

fn text(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn write_persona(w: &mut XmlWriter, name: &str, persona: &Persona) -> Result<(), WriteError> {
    w.empty_element(name, &[("Rfc", text(&persona.rfc)), ("Nombre", text(&persona.nombre))])?;
    Ok(())
}

fn write_concepto(w: &mut XmlWriter, concepto: &Concepto) -> Result<(), WriteError> {
    w.empty_element(
        "cfdi:Concepto",
        &[
            ("NoIdentificacion", text(&concepto.no_identificacion)),
            ("ClaveProdServ", text(&concepto.clave_prod_serv)),
            ("Descripcion", text(&concepto.descripcion)),
            ("ClaveUnidad", text(&concepto.clave_unidad)),
            ("Cantidad", concepto.cantidad.raw()),
            ("ValorUnitario", concepto.valor_unitario.raw()),
            ("Importe", concepto.importe.raw()),
        ],
    )?;
    Ok(())
}
