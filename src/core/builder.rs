use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;
use super::validation;

/// Builder for constructing Comprobantes in code.
///
/// ```
/// use lector_xml::core::*;
/// use rust_decimal_macros::dec;
///
/// let comprobante = ComprobanteBuilder::new("A", "1001")
///     .uuid("6F9619FF-8B86-D011-B42D-00C04FC964FF")
///     .lugar_expedicion("06600")
///     .emisor(PersonaBuilder::new("AAA010101AAA", "Comercializadora SA de CV").build())
///     .receptor(PersonaBuilder::new("XAXX010101000", "Publico en General").build())
///     .add_concepto(ConceptoBuilder::new("SKU-1", "01010101", "Servicio", 2, "E48", dec!(500)).build())
///     .sub_total(dec!(1000))
///     .total(dec!(1160))
///     .build()
///     .unwrap();
///
/// assert_eq!(comprobante.conceptos[0].importe.as_decimal(), Some(dec!(1000)));
/// ```
pub struct ComprobanteBuilder {
    version: String,
    serie: String,
    folio: String,
    lugar_expedicion: String,
    metodo_pago: String,
    tipo_de_comprobante: String,
    forma_pago: String,
    moneda: String,
    uuid: String,
    total: RawNumber,
    sub_total: RawNumber,
    emisor: Option<Persona>,
    receptor: Option<Persona>,
    conceptos: Vec<Concepto>,
}

impl ComprobanteBuilder {
    /// Start a CFDI 4.0 Ingreso in MXN, paid in one installment by transfer.
    pub fn new(serie: impl Into<String>, folio: impl Into<String>) -> Self {
        Self {
            version: "4.0".to_string(),
            serie: serie.into(),
            folio: folio.into(),
            lugar_expedicion: String::new(),
            metodo_pago: "PUE".to_string(),
            tipo_de_comprobante: "I".to_string(),
            forma_pago: "03".to_string(),
            moneda: "MXN".to_string(),
            uuid: String::new(),
            total: RawNumber::absent(),
            sub_total: RawNumber::absent(),
            emisor: None,
            receptor: None,
            conceptos: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn lugar_expedicion(mut self, codigo_postal: impl Into<String>) -> Self {
        self.lugar_expedicion = codigo_postal.into();
        self
    }

    pub fn metodo_pago(mut self, code: impl Into<String>) -> Self {
        self.metodo_pago = code.into();
        self
    }

    pub fn tipo_de_comprobante(mut self, code: impl Into<String>) -> Self {
        self.tipo_de_comprobante = code.into();
        self
    }

    pub fn forma_pago(mut self, code: impl Into<String>) -> Self {
        self.forma_pago = code.into();
        self
    }

    pub fn moneda(mut self, code: impl Into<String>) -> Self {
        self.moneda = code.into();
        self
    }

    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn total(mut self, total: impl Into<RawNumber>) -> Self {
        self.total = total.into();
        self
    }

    pub fn sub_total(mut self, sub_total: impl Into<RawNumber>) -> Self {
        self.sub_total = sub_total.into();
        self
    }

    pub fn emisor(mut self, persona: Persona) -> Self {
        self.emisor = Some(persona);
        self
    }

    pub fn receptor(mut self, persona: Persona) -> Self {
        self.receptor = Some(persona);
        self
    }

    pub fn add_concepto(mut self, concepto: Concepto) -> Self {
        self.conceptos.push(concepto);
        self
    }

    /// Build and validate. Returns every violation found, not just the first.
    pub fn build(self) -> Result<Comprobante, Vec<ValidationError>> {
        let comprobante = self.build_unchecked();
        let errors = validation::validate_comprobante(&comprobante);
        if errors.is_empty() {
            Ok(comprobante)
        } else {
            Err(errors)
        }
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> Comprobante {
        Comprobante {
            version: self.version,
            lugar_expedicion: self.lugar_expedicion,
            metodo_pago: self.metodo_pago,
            tipo_de_comprobante: self.tipo_de_comprobante,
            forma_pago: self.forma_pago,
            folio: self.folio,
            serie: self.serie,
            moneda: self.moneda,
            uuid: self.uuid,
            total: self.total,
            sub_total: self.sub_total,
            emisor: self.emisor,
            receptor: self.receptor,
            conceptos: self.conceptos,
        }
    }
}

/// Builder for Persona (Emisor / Receptor).
pub struct PersonaBuilder {
    rfc: String,
    nombre: String,
}

impl PersonaBuilder {
    pub fn new(rfc: impl Into<String>, nombre: impl Into<String>) -> Self {
        Self {
            rfc: rfc.into(),
            nombre: nombre.into(),
        }
    }

    pub fn build(self) -> Persona {
        Persona {
            rfc: self.rfc,
            nombre: self.nombre,
        }
    }
}

/// Builder for Concepto.
pub struct ConceptoBuilder {
    no_identificacion: String,
    clave_prod_serv: String,
    descripcion: String,
    cantidad: RawNumber,
    clave_unidad: String,
    valor_unitario: RawNumber,
    importe: Option<RawNumber>,
    line_amount: Decimal,
}

impl ConceptoBuilder {
    /// The importe defaults to `cantidad * valor_unitario`.
    pub fn new(
        no_identificacion: impl Into<String>,
        clave_prod_serv: impl Into<String>,
        descripcion: impl Into<String>,
        cantidad: i64,
        clave_unidad: impl Into<String>,
        valor_unitario: Decimal,
    ) -> Self {
        Self {
            no_identificacion: no_identificacion.into(),
            clave_prod_serv: clave_prod_serv.into(),
            descripcion: descripcion.into(),
            cantidad: cantidad.into(),
            clave_unidad: clave_unidad.into(),
            valor_unitario: valor_unitario.into(),
            importe: None,
            line_amount: Decimal::from(cantidad) * valor_unitario,
        }
    }

    /// Override the computed importe.
    pub fn importe(mut self, importe: impl Into<RawNumber>) -> Self {
        self.importe = Some(importe.into());
        self
    }

    pub fn build(self) -> Concepto {
        Concepto {
            no_identificacion: self.no_identificacion,
            clave_prod_serv: self.clave_prod_serv,
            descripcion: self.descripcion,
            clave_unidad: self.clave_unidad,
            valor_unitario: self.valor_unitario,
            cantidad: self.cantidad,
            importe: self.importe.unwrap_or_else(|| self.line_amount.into()),
        }
    }
}
