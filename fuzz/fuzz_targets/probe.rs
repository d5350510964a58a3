#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use swissprobe::group::{generic, GroupQuery};
use swissprobe::{ctrl, CtrlArray, Exploration, IdentitySeed, Prober, TableFull};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity_exp: u8,
    hash: u64,
    entropic: bool,
    slots: Vec<u8>,
}

// A control-byte state from an arbitrary byte.
fn state(b: u8) -> u8 {
    match b % 4 {
        0 => ctrl::EMPTY,
        1 => ctrl::DELETED,
        _ => ctrl::full(b >> 1),
    }
}

fuzz_target!(|input: FuzzInput| {
    // 8 to 1024 slots.
    let k = 3 + (input.capacity_exp % 8) as usize;
    let capacity = (1usize << k) - 1;

    let mut array = CtrlArray::<generic::Group>::new(capacity);
    let mut available = false;
    for i in 0..=capacity {
        let byte = state(input.slots.get(i).copied().unwrap_or(2));
        if ctrl::is_empty_or_deleted(byte) {
            available = true;
        }
        array.set(i, byte);
    }

    let exploration = if input.entropic {
        Exploration::Entropic
    } else {
        Exploration::Forward
    };
    let prober = Prober::new()
        .with_splitter(IdentitySeed)
        .with_exploration(exploration);

    match prober.find_first_non_full(&array, input.hash) {
        Ok(info) => {
            assert!(available);
            assert!(info.offset <= capacity);
            assert!(ctrl::is_empty_or_deleted(array.get(info.offset)));
            assert_eq!(info.probe_length % generic::Group::WIDTH, 0);
            assert!(info.probe_length <= capacity);
        }
        // The bounded search scanned every group and found nothing.
        Err(TableFull) => assert!(!available),
    }
});
