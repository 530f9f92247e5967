//! Fuzz the proposed-order validator: any float must yield a typed result,
//! never a panic, and accepted values must belong to a legal order class.

#![no_main]

use courtq_core::Order;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(bytes) = <[u8; 8]>::try_from(&data[..8.min(data.len())]) else {
        return;
    };
    let raw = f64::from_le_bytes(bytes);

    if let Ok(order) = courtq_order::validate_target(Some(raw)) {
        match order {
            Order::Urgent(slot) => assert!((1..=9).contains(&slot.index())),
            Order::Regular(rank) => assert!(rank >= 1),
            Order::Absent => panic!("Some(value) must never validate to Absent"),
        }
    }
});
