#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(conf) = std::str::from_utf8(data) {
        // Fuzz target parsing - this should never panic, and a parsed
        // target must always render
        if let Ok(target) = ferry::DeployTarget::parse(conf) {
            let _ = target.to_string();
            let _ = target.local_dir();
        }
    }
});
