//! Integration tests for utf8-transcode against reference encoders and validators.

use utf8_transcode::*;

/// Engines under test: both byte orders, plus whatever the running CPU supports.
fn engines() -> Vec<Engine> {
    vec![
        Engine::portable(ByteOrder::Little),
        Engine::portable(ByteOrder::Big),
        Engine::new(ByteOrder::Little, Capabilities::detect()),
        Engine::new(ByteOrder::Big, Capabilities::detect()),
    ]
}

/// Small xorshift generator so the tests stay deterministic.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn all_scalars() -> impl Iterator<Item = char> {
    (0..=0x10_FFFFu32).filter_map(char::from_u32)
}

fn reference_utf16(bytes: &[u8]) -> Vec<u16> {
    std::str::from_utf8(bytes).unwrap().encode_utf16().collect()
}

fn expect_error(src: &[u8], offset: usize, kind: ErrorKind) {
    let valid_up_to = std::str::from_utf8(src).unwrap_err().valid_up_to();
    let expected = Utf8Error::within_sequence(valid_up_to, offset, kind);
    for engine in engines() {
        assert_eq!(
            engine.validate(src),
            Err(expected),
            "validate {src:02X?} with {engine:?}"
        );
        let mut buf = vec![0u16; src.len()];
        assert_eq!(
            engine.transcode(src, &mut buf),
            Err(expected),
            "transcode {src:02X?} with {engine:?}"
        );
        let written = reference_utf16(&src[..valid_up_to]);
        assert_eq!(&buf[..written.len()], written, "{engine:?}");
    }
}

fn expect_units(src: &[u8], units: &[u16]) {
    for engine in engines() {
        assert_eq!(engine.validate(src), Ok(()), "{engine:?}");
        assert_eq!(engine.utf16_len(src), Ok(units.len()), "{engine:?}");
        assert_eq!(engine.transcode_to_vec(src).unwrap(), units, "{engine:?}");
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_hello() {
    expect_units(b"Hello", &[0x48, 0x65, 0x6C, 0x6C, 0x6F]);
}

#[test]
fn test_scenario_euro() {
    expect_units(&[0xE2, 0x82, 0xAC], &[0x20AC]);
}

#[test]
fn test_scenario_grinning_face() {
    expect_units(&[0xF0, 0x9F, 0x98, 0x80], &[0xD83D, 0xDE00]);
}

#[test]
fn test_scenario_encoded_surrogate() {
    expect_error(&[0xED, 0xA0, 0x80], 0, ErrorKind::EncodedSurrogate);
}

#[test]
fn test_scenario_overlong_nul() {
    expect_error(&[0xC0, 0x80], 0, ErrorKind::OverlongEncoding);
}

#[test]
fn test_scenario_truncated() {
    expect_error(&[0xE2, 0x82], 2, ErrorKind::InvalidTrailingByte);
}

#[test]
fn test_empty_input() {
    expect_units(b"", &[]);
    for engine in engines() {
        let done = engine.transcode(b"", &mut []).unwrap();
        assert_eq!(done.read, 0);
        assert_eq!(done.written, 0);
        assert!(done.is_complete());
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_round_trip_every_scalar() {
    let text: String = all_scalars().collect();
    let bytes = text.as_bytes();
    let expected: Vec<u16> = text.encode_utf16().collect();

    for engine in engines() {
        let units = engine.transcode_to_vec(bytes).unwrap();
        assert_eq!(units.len(), expected.len(), "{engine:?}");
        assert!(units == expected, "{engine:?} output differs");

        let back: String = char::decode_utf16(units.iter().copied())
            .map(|r| r.unwrap())
            .collect();
        assert!(back.as_bytes() == bytes, "{engine:?} round trip differs");
    }
}

#[test]
fn test_round_trip_each_scalar_alone() {
    let mut buf = [0u8; 4];
    let mut out = [0u16; 4];
    for engine in engines() {
        for ch in all_scalars().step_by(7) {
            let src = ch.encode_utf8(&mut buf).as_bytes();
            let done = engine.transcode(src, &mut out).unwrap();
            let mut expected = [0u16; 2];
            assert_eq!(&out[..done.written], ch.encode_utf16(&mut expected));
        }
    }
}

#[test]
fn test_invalid_leads_fail_at_their_offset() {
    let followers: [&[u8]; 6] = [
        b"",
        &[0x80],
        &[0x80, 0x80],
        &[0x80, 0x80, 0x80],
        &[0xBF, 0xBF, 0xBF, b'a'],
        b"abcd",
    ];
    let leads = [0xC0u8, 0xC1]
        .into_iter()
        .chain(0xF5..=0xFF)
        .chain(0x80..=0xBF);

    for lead in leads {
        for follower in followers {
            for prefix in [&b""[..], b"ab", b"abcdefg", "é€".as_bytes()] {
                let mut src = prefix.to_vec();
                src.push(lead);
                src.extend_from_slice(follower);

                for engine in engines() {
                    let err = engine.validate(&src).unwrap_err();
                    assert_eq!(err.offset(), prefix.len(), "{src:02X?}");
                }
            }
        }
    }
}

#[test]
fn test_stray_and_invalid_leads_kind() {
    for lead in (0x80..=0xBFu8).chain(0xF8..=0xFF) {
        expect_error(
            &[b'x', lead, 0x80, 0x80, 0x80],
            1,
            ErrorKind::InvalidLeadByte,
        );
    }
    expect_error(&[0xC1, b'A'], 0, ErrorKind::InvalidLeadByte);
    expect_error(&[0xF5, 0x80, 0x80, 0x80], 0, ErrorKind::OutOfRange);
    expect_error(&[0xF4, 0x90, 0x80, 0x80], 0, ErrorKind::OutOfRange);
    expect_error(&[0xF7, 0xBF, 0xBF, 0xBF], 0, ErrorKind::OutOfRange);
}

#[test]
fn test_every_encoded_surrogate_fails() {
    for second in 0xA0..=0xBFu8 {
        for third in 0x80..=0xBFu8 {
            expect_error(&[0xED, second, third], 0, ErrorKind::EncodedSurrogate);
            // Also reached through the dual 3-byte path.
            expect_error(
                &[0xE2, 0x82, 0xAC, 0xED, second, third, b'a', b'b'],
                3,
                ErrorKind::EncodedSurrogate,
            );
        }
    }
}

#[test]
fn test_every_overlong_two_byte_fails() {
    for lead in [0xC0u8, 0xC1] {
        for second in 0x80..=0xBFu8 {
            expect_error(&[lead, second], 0, ErrorKind::OverlongEncoding);
            // Also reached through the batched 2-byte paths.
            expect_error(&[0xC3, 0xA9, lead, second], 2, ErrorKind::OverlongEncoding);
            expect_error(
                &[0xC3, 0xA9, 0xC3, 0xA9, 0xC3, 0xA9, lead, second],
                6,
                ErrorKind::OverlongEncoding,
            );
        }
    }
}

#[test]
fn test_overlong_three_and_four_byte() {
    expect_error(&[0xE0, 0x80, 0x80], 0, ErrorKind::OverlongEncoding);
    expect_error(&[0xE0, 0x9F, 0xBF], 0, ErrorKind::OverlongEncoding);
    expect_error(&[0xF0, 0x80, 0x80, 0x80], 0, ErrorKind::OverlongEncoding);
    expect_error(&[0xF0, 0x8F, 0xBF, 0xBF], 0, ErrorKind::OverlongEncoding);
}

#[test]
fn test_truncated_sequences() {
    expect_error(&[b'a', 0xC3], 2, ErrorKind::InvalidTrailingByte);
    expect_error(&[0xF0, 0x9F, 0x98], 3, ErrorKind::InvalidTrailingByte);
    expect_error(&[0xF0, 0x9F, 0x98, b'!'], 3, ErrorKind::InvalidTrailingByte);
    expect_error(&[0xE2, b'(', 0xA1], 1, ErrorKind::InvalidTrailingByte);
    expect_error(&[0xED, 0xA0], 2, ErrorKind::InvalidTrailingByte);
}

#[test]
fn test_four_byte_accelerated_matches_portable() {
    let mut buf = [0u8; 4];
    let mut portable_out = [0u16; 2];
    let mut detected_out = [0u16; 2];
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let portable = Engine::portable(order);
        let detected = Engine::new(order, Capabilities::detect());
        for scalar in 0x1_0000..=0x10_FFFFu32 {
            let ch = char::from_u32(scalar).unwrap();
            let src = ch.encode_utf8(&mut buf).as_bytes();
            portable.transcode(src, &mut portable_out).unwrap();
            detected.transcode(src, &mut detected_out).unwrap();
            assert_eq!(portable_out, detected_out, "scalar {scalar:#X}");
        }
    }
}

#[test]
fn test_random_bytes_agree_with_reference() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    // Biased towards bytes that form sequences.
    let palette: [u8; 16] = [
        b'a', b'z', 0x00, 0x7F, 0x80, 0x9F, 0xA0, 0xBF, 0xC0, 0xC2, 0xDF, 0xE0, 0xED, 0xEF, 0xF0,
        0xF4,
    ];

    for _ in 0..20_000 {
        let len = rng.below(24) as usize;
        let src: Vec<u8> = (0..len)
            .map(|_| {
                if rng.below(4) == 0 {
                    rng.next() as u8
                } else {
                    palette[rng.below(16) as usize]
                }
            })
            .collect();

        let results: Vec<_> = engines().iter().map(|e| e.validate(&src)).collect();
        for result in &results {
            assert_eq!(result, &results[0], "{src:02X?}");
        }
        assert_eq!(
            results[0].is_ok(),
            std::str::from_utf8(&src).is_ok(),
            "{src:02X?}"
        );

        match (simdutf8::compat::from_utf8(&src), results[0]) {
            (Ok(_), Ok(())) => {
                let expected = reference_utf16(&src);
                for engine in engines() {
                    assert_eq!(engine.transcode_to_vec(&src).unwrap(), expected);
                }
            }
            (Err(expected), Err(actual)) => {
                let start = expected.valid_up_to();
                assert_eq!(actual.valid_up_to(), start, "{src:02X?}");
                assert!(
                    actual.offset() >= start && actual.offset() <= start + 3,
                    "{src:02X?}: {actual} vs valid_up_to {start}"
                );
                if actual.kind() != ErrorKind::InvalidTrailingByte {
                    assert_eq!(actual.offset(), start, "{src:02X?}");
                }
            }
            (reference, ours) => panic!("{src:02X?}: reference {reference:?}, ours {ours:?}"),
        }
    }
}

#[test]
fn test_random_text_all_engines() {
    let mut rng = XorShift(0x0123_4567_89AB_CDEF);
    let ranges: [(u32, u32); 4] = [
        (0x20, 0x7F),
        (0x80, 0x800),
        (0x800, 0x1_0000),
        (0x1_0000, 0x11_0000),
    ];

    for _ in 0..500 {
        let len = rng.below(64) as usize;
        let text: String = (0..len)
            .filter_map(|_| {
                // Runs of one width exercise the batched paths.
                let (lo, hi) = ranges[rng.below(4) as usize];
                char::from_u32(lo + rng.below((hi - lo) as u64) as u32)
            })
            .collect();
        let expected: Vec<u16> = text.encode_utf16().collect();
        expect_units(text.as_bytes(), &expected);
    }
}

#[test]
fn test_error_after_long_valid_prefix() {
    let mut src = "Ünïcödé text with ASCII runs and 😀 emoji "
        .repeat(20)
        .into_bytes();
    let offset = src.len();
    src.extend_from_slice(&[0xE2, 0x82, 0xAC, 0xF4, 0x90, 0x80, 0x80]);
    expect_error(&src, offset + 3, ErrorKind::OutOfRange);
}

// ---------------------------------------------------------------------------
// Output buffer handling
// ---------------------------------------------------------------------------

#[test]
fn test_output_full_stops_at_sequence_boundary() {
    let text = "ab€😀cd";
    let bytes = text.as_bytes();
    let expected: Vec<u16> = text.encode_utf16().collect();

    for engine in engines() {
        for cap in 0..expected.len() {
            let mut buf = vec![0u16; cap];
            let done = engine.transcode(bytes, &mut buf).unwrap();
            assert_eq!(done.status, TranscodeStatus::OutputFull, "cap {cap}");
            assert!(std::str::from_utf8(&bytes[..done.read]).is_ok());
            assert_eq!(&buf[..done.written], &expected[..done.written]);

            // Resuming from `read` finishes the job.
            let mut rest = vec![0u16; expected.len()];
            let tail = engine.transcode(&bytes[done.read..], &mut rest).unwrap();
            assert!(tail.is_complete());
            assert_eq!(done.written + tail.written, expected.len());
        }
    }
}

#[test]
fn test_surrogate_pair_never_split() {
    let bytes = "😀".as_bytes();
    for engine in engines() {
        let mut buf = [0u16; 1];
        let done = engine.transcode(bytes, &mut buf).unwrap();
        assert_eq!(done.read, 0);
        assert_eq!(done.written, 0);
        assert_eq!(done.status, TranscodeStatus::OutputFull);
    }
}

#[test]
fn test_utf16_len_matches_output() {
    let text = "mixed: ß, €, 😀, 𝄞 and plain text";
    for engine in engines() {
        assert_eq!(
            engine.utf16_len(text.as_bytes()),
            Ok(text.encode_utf16().count())
        );
    }
    assert_eq!(
        utf16_len(&[0xFF]),
        Err(Utf8Error::new(0, ErrorKind::InvalidLeadByte))
    );
}

#[test]
fn test_engines_are_shareable_across_threads() {
    let engine = Engine::detect();
    let text: String = all_scalars().step_by(97).collect();
    let expected: Vec<u16> = text.encode_utf16().collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(engine.transcode_to_vec(text.as_bytes()).unwrap(), expected);
            });
        }
    });
}
