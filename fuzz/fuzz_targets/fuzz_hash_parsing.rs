//! Fuzz target for digest parsing
//!
//! This target ensures:
//! 1. Hex parsing never panics
//! 2. Every accepted string re-encodes to its lowercase, unprefixed form

#![no_main]

use libfuzzer_sys::fuzz_target;
use treasury_primitives::Hash256;

fuzz_target!(|data: &str| {
    if let Ok(hash) = Hash256::from_hex(data) {
        let normalized = data.strip_prefix("0x").unwrap_or(data).to_lowercase();
        assert_eq!(hash.to_hex(), normalized);
        assert_eq!(Hash256::from_hex(&hash.to_hex()), Ok(hash));
    }
});
