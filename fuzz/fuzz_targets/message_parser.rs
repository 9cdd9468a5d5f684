//! Fuzz target for IRC line parsing
//!
//! Feeds arbitrary bytes to the parser in both modes and re-encodes whatever
//! parses. Neither side may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_line::Message;

fuzz_target!(|data: &[u8]| {
    for strict in [false, true] {
        let Ok(message) = Message::parse_line(data, strict, 0) else {
            continue;
        };

        // Lenient parsing can yield commands the encoder rejects
        let _ = message.line(false, 0);
        let _ = message.line(true, 512);
    }

    // Bounded parsing must cope with cuts inside multi-byte characters
    let _ = Message::parse_line(data, false, data.len() / 2);
});
