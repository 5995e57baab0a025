use super::error::ValidationError;
use super::numeric::{is_valid_decimal, is_valid_integer};
use super::types::*;

/// Validate a Comprobante's structure and primitive formats.
///
/// Returns all validation errors found (not just the first), in a fixed
/// order: root attributes, Emisor, Receptor, then each Concepto.
pub fn validate_comprobante(comprobante: &Comprobante) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        ("Version", &comprobante.version),
        ("LugarExpedicion", &comprobante.lugar_expedicion),
        ("MetodoPago", &comprobante.metodo_pago),
        ("TipoDeComprobante", &comprobante.tipo_de_comprobante),
        ("FormaPago", &comprobante.forma_pago),
        ("Folio", &comprobante.folio),
        ("Moneda", &comprobante.moneda),
        ("Serie", &comprobante.serie),
        ("UUID", &comprobante.uuid),
    ];
    for (name, value) in required {
        if is_blank(value) {
            errors.push(ValidationError::new(
                name,
                format!("attribute '{name}' is required"),
            ));
        }
    }

    for (name, value) in [
        ("Total", &comprobante.total),
        ("SubTotal", &comprobante.sub_total),
    ] {
        if !is_valid_decimal(value.as_str()) {
            errors.push(ValidationError::new(
                name,
                format!("attribute '{name}' must be a valid decimal number"),
            ));
        }
    }

    validate_persona(comprobante.emisor.as_ref(), "Emisor", &mut errors);
    validate_persona(comprobante.receptor.as_ref(), "Receptor", &mut errors);

    if comprobante.conceptos.is_empty() {
        errors.push(ValidationError::new(
            "Conceptos",
            "at least one Concepto is required",
        ));
    }

    for (i, concepto) in comprobante.conceptos.iter().enumerate() {
        validate_concepto(concepto, i + 1, &mut errors);
    }

    errors
}

fn validate_persona(persona: Option<&Persona>, node: &str, errors: &mut Vec<ValidationError>) {
    let Some(persona) = persona else {
        errors.push(ValidationError::new(node, format!("{node} is required")));
        return;
    };

    if is_blank(&persona.rfc) {
        errors.push(ValidationError::new(
            format!("{node}.Rfc"),
            format!("attribute 'Rfc' of '{node}' is required"),
        ));
    }
    if is_blank(&persona.nombre) {
        errors.push(ValidationError::new(
            format!("{node}.Nombre"),
            format!("attribute 'Nombre' of '{node}' is required"),
        ));
    }
}

/// `position` is 1-based.
fn validate_concepto(concepto: &Concepto, position: usize, errors: &mut Vec<ValidationError>) {
    let field = |name: &str| format!("Conceptos[{position}].{name}");

    for (name, value) in [
        ("NoIdentificacion", &concepto.no_identificacion),
        ("ClaveProdServ", &concepto.clave_prod_serv),
        ("Descripcion", &concepto.descripcion),
        ("ClaveUnidad", &concepto.clave_unidad),
    ] {
        if is_blank(value) {
            errors.push(ValidationError::new(
                field(name),
                format!("attribute '{name}' of Concepto {position} is required"),
            ));
        }
    }

    if !is_valid_decimal(concepto.valor_unitario.as_str()) {
        errors.push(ValidationError::new(
            field("ValorUnitario"),
            format!("attribute 'ValorUnitario' of Concepto {position} must be a valid decimal number"),
        ));
    }
    if !is_valid_integer(concepto.cantidad.as_str()) {
        errors.push(ValidationError::new(
            field("Cantidad"),
            format!("attribute 'Cantidad' of Concepto {position} must be a valid integer"),
        ));
    }
    if !is_valid_decimal(concepto.importe.as_str()) {
        errors.push(ValidationError::new(
            field("Importe"),
            format!("attribute 'Importe' of Concepto {position} must be a valid decimal number"),
        ));
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
