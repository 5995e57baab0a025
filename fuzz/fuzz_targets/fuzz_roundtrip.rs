#![no_main]

use libfuzzer_sys::fuzz_target;
use lector_xml::validate_comprobante;
use lector_xml::xml::{from_xml, to_xml};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → write → parse must report the same violations.
        if let Ok(c) = from_xml(s) {
            if let Ok(xml2) = to_xml(&c) {
                let reparsed = from_xml(&xml2).expect("written XML must parse");
                assert_eq!(validate_comprobante(&reparsed), validate_comprobante(&c));
            }
        }
    }
});
