#![no_main]

use floodgate_bridge::utils::crypto::AesCipher;
use floodgate_bridge::HandshakeFilter;
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static FILTER: OnceLock<Option<HandshakeFilter>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(hostname) = std::str::from_utf8(data) else {
        return;
    };
    let Some(filter) = FILTER
        .get_or_init(|| AesCipher::new(&[1u8; 16]).ok().map(HandshakeFilter::new))
        .as_ref()
    else {
        return;
    };

    // The filter must never panic on untrusted hostnames
    let _ = filter.resolve_hostname(hostname);
});
