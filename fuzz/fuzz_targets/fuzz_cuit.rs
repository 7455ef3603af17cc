#![no_main]

use libfuzzer_sys::fuzz_target;
use subdiario::core::identifier::{format_cuit, format_dni, validate_cuit};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(digits) = validate_cuit(s) {
            assert_eq!(digits.len(), 11);
            assert_eq!(format_cuit(&digits).ok().as_deref().map(str::len), Some(13));
        }
        let _ = format_dni(s);
    }
});
