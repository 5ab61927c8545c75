#![no_main]

use deposit_xml::parser::{DepositParser, ParserKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every strategy must either load the input or return an error, never panic
    for kind in ParserKind::ALL {
        let mut reader = data;
        let _ = kind.parser().parse_reader(&mut reader);
    }
});
