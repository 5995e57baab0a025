#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(c) = lector_xml::xml::from_xml(s) {
            let _ = lector_xml::validate_comprobante(&c);
        }
    }
});
