use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::numeric::{parse_decimal, parse_integer};

/// The root fiscal invoice document.
///
/// Every field holds exactly what the XML carried. Absent attributes are
/// the empty default for their type; required-ness is decided by
/// [`validate_comprobante`](super::validate_comprobante), never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comprobante {
    /// CFDI schema version (e.g. "4.0").
    pub version: String,
    /// Postal code where the invoice was issued.
    pub lugar_expedicion: String,
    /// Payment method code (e.g. "PUE", "PPD").
    pub metodo_pago: String,
    /// Document type code (e.g. "I" for Ingreso).
    pub tipo_de_comprobante: String,
    /// Payment form code (e.g. "01" cash, "03" transfer).
    pub forma_pago: String,
    pub folio: String,
    pub serie: String,
    /// Currency code (ISO 4217, e.g. "MXN").
    pub moneda: String,
    /// Fiscal folio (UUID) of the stamped invoice.
    pub uuid: String,
    pub total: RawNumber,
    pub sub_total: RawNumber,
    /// Issuing party.
    pub emisor: Option<Persona>,
    /// Receiving party.
    pub receptor: Option<Persona>,
    /// Line items in document order.
    pub conceptos: Vec<Concepto>,
}

/// Emisor / Receptor: a party identified by tax ID and name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Persona {
    /// Registro Federal de Contribuyentes (tax ID).
    pub rfc: String,
    pub nombre: String,
}

/// One invoiced line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Concepto {
    pub no_identificacion: String,
    /// SAT product/service catalog code, kept as text.
    pub clave_prod_serv: String,
    pub descripcion: String,
    /// SAT unit-of-measure code (e.g. "H87", "E48").
    pub clave_unidad: String,
    pub valor_unitario: RawNumber,
    pub cantidad: RawNumber,
    pub importe: RawNumber,
}

/// A numeric attribute kept exactly as written in the document.
///
/// The text is format-checked by the validator; typed accessors return
/// `None` when it is not a well-formed number. An absent attribute reads
/// as `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawNumber(Option<String>);

impl RawNumber {
    /// Wrap the raw text of a numeric attribute.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    /// The empty default, used when the attribute is absent.
    pub fn absent() -> Self {
        Self(None)
    }

    /// Whether the attribute was present in the source document.
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The raw text, or `None` when the attribute was absent.
    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The raw text, or `"0"` when absent.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("0")
    }

    /// Parse as a decimal amount.
    pub fn as_decimal(&self) -> Option<Decimal> {
        parse_decimal(self.as_str())
    }

    /// Parse as a whole number.
    pub fn as_integer(&self) -> Option<i64> {
        parse_integer(self.as_str())
    }
}

impl From<Decimal> for RawNumber {
    fn from(d: Decimal) -> Self {
        Self::new(d.to_string())
    }
}

impl From<i64> for RawNumber {
    fn from(n: i64) -> Self {
        Self::new(n.to_string())
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RawNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RawNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn absent_number_reads_as_zero() {
        let n = RawNumber::absent();
        assert!(!n.is_present());
        assert_eq!(n.raw(), None);
        assert_eq!(n.as_str(), "0");
        assert_eq!(n.as_decimal(), Some(dec!(0)));
        assert_eq!(n.as_integer(), Some(0));
    }

    #[test]
    fn raw_text_is_preserved() {
        let n = RawNumber::new("0150.50");
        assert_eq!(n.to_string(), "0150.50");
        assert_eq!(n.as_decimal(), Some(dec!(150.50)));
        assert_eq!(n.as_integer(), None);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&RawNumber::new("12.5")).unwrap();
        assert_eq!(json, "\"12.5\"");
        let back: RawNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RawNumber::new("12.5"));
    }
}
