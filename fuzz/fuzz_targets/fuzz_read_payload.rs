#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Raw payload text, then the same bytes wrapped in valid Base64.
        let _ = lector_xml::response::Respuesta::from(lector_xml::read_comprobante(s));
        let _ = lector_xml::read_comprobante(&lector_xml::xml::encode_payload(s));
    }
});
