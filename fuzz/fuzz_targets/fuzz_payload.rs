#![no_main]

use floodgate_bridge::core::bedrock_data::DecodedPayload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    // Fuzz payload decoding
    if let Ok(DecodedPayload::Valid(record)) = DecodedPayload::decode(raw) {
        // A valid record must survive an encode/decode roundtrip
        let again = DecodedPayload::decode(&record.encode());
        assert!(matches!(again, Ok(DecodedPayload::Valid(r)) if r == record));
    }
});
