#![no_main]

use libfuzzer_sys::fuzz_target;
use utf8_transcode::synth::{four_byte_units_deposit, four_byte_units_portable};
use utf8_transcode::validate::check_sequence;
use utf8_transcode::{BigEndian, ByteLayout, LittleEndian, SoftBits};

fuzz_target!(|data: [u8; 4]| {
    if check_sequence(&data) != Ok(4) {
        return;
    }

    let le = LittleEndian::load(data);
    let be = BigEndian::load(data);
    let le_units = four_byte_units_portable::<LittleEndian>(le);
    let be_units = four_byte_units_portable::<BigEndian>(be);

    let le_deposit = four_byte_units_deposit::<LittleEndian, SoftBits>(le);
    let be_deposit = four_byte_units_deposit::<BigEndian, SoftBits>(be);
    assert_eq!(le_units, le_deposit);
    assert_eq!(be_units, be_deposit);
    assert_eq!(
        LittleEndian::unpack_units(le_units),
        BigEndian::unpack_units(be_units)
    );
});
