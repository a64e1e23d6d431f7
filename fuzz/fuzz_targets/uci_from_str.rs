#![no_main]

use libfuzzer_sys::fuzz_target;
use rookery::uci::Uci;

fuzz_target!(|data: &str| {
    let Ok(uci) = data.parse::<Uci>() else {
        return;
    };
    let roundtripped = uci.to_string().parse::<Uci>().expect("roundtrip");
    assert_eq!(uci, roundtripped);
});
