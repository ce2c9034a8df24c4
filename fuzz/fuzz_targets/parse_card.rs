#![no_main]

use libccpng::{Chunks, parse, strip};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = parse(data);
    if let Ok(chunks) = Chunks::new(data) {
        for chunk in chunks {
            if chunk.is_err() {
                break;
            }
        }
    }
    if let Ok(stripped) = strip(data) {
        assert!(stripped.len() <= data.len());
        assert!(matches!(parse(&stripped), Err(libccpng::CardError::NotFound)));
    }
});
