#![no_main]

use libfuzzer_sys::fuzz_target;
use utf8_transcode::{ByteOrder, Engine, ErrorKind};

fuzz_target!(|data: &[u8]| {
    let reference = core::str::from_utf8(data);
    let little = Engine::portable(ByteOrder::Little).validate(data);
    let big = Engine::portable(ByteOrder::Big).validate(data);

    // Both formula sets must agree exactly
    assert_eq!(little, big);

    match (reference, little) {
        (Ok(_), Ok(())) => {}
        (Err(expected), Err(actual)) => {
            let start = expected.valid_up_to();
            assert_eq!(actual.valid_up_to(), start);
            if actual.kind() == ErrorKind::InvalidTrailingByte {
                assert!(actual.offset() > start && actual.offset() <= start + 3);
            } else {
                assert_eq!(actual.offset(), start);
            }
        }
        (reference, ours) => panic!("reference {reference:?}, ours {ours:?}"),
    }
});
