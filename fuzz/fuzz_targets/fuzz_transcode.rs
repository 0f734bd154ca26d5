#![no_main]

use libfuzzer_sys::fuzz_target;
use utf8_transcode::{ByteOrder, Capabilities, Engine};

fuzz_target!(|data: &[u8]| {
    // First byte picks the output capacity so OutputFull gets exercised
    let Some((&cap, src)) = data.split_first() else {
        return;
    };

    let engines = [
        Engine::portable(ByteOrder::Little),
        Engine::portable(ByteOrder::Big),
        Engine::new(ByteOrder::Little, Capabilities::detect()),
        Engine::new(ByteOrder::Big, Capabilities::detect()),
    ];

    let expected: Option<Vec<u16>> = core::str::from_utf8(src)
        .ok()
        .map(|s| s.encode_utf16().collect());

    for engine in engines {
        let mut buf = vec![0u16; cap as usize];
        match (engine.transcode(src, &mut buf), &expected) {
            (Ok(done), Some(units)) => {
                assert_eq!(&buf[..done.written], &units[..done.written]);
                assert!(core::str::from_utf8(&src[..done.read]).is_ok());
                assert_eq!(done.is_complete(), done.read == src.len());
            }
            (Err(_), None) => {}
            // A short buffer may stop before the invalid byte is reached
            (Ok(done), None) => assert!(!done.is_complete()),
            (Err(err), Some(_)) => panic!("valid input rejected: {err}"),
        }
    }
});
