#![no_main]

use libccpng::{CardVersion, ChunkType, GenerateOptions, PNG_SIGNATURE, RawChunk, generate, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(card) = std::str::from_utf8(data) else {
        return;
    };
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend(RawChunk::from_data(ChunkType::IEND, Vec::new()).into_bytes());
    for version in [CardVersion::V2, CardVersion::V3] {
        let options = GenerateOptions::builder()
            .version(version)
            .asset("fuzz", card)
            .verify(false)
            .build();
        let out = generate(&png, card, &options).unwrap();
        let parsed = parse(&out).unwrap();
        assert_eq!(parsed.kind(), version.kind());
        assert_eq!(parsed.text(), card);
    }
});
