//! Tests for Packet and packet id allocation

use packet_simulator_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator};
use packet_simulator_core_rs::{Packet, PacketIdAllocator, RngManager};

#[test]
fn test_packet_new() {
    let packet = Packet::new(42, 730, 9);

    assert_eq!(packet.id(), 42);
    assert_eq!(packet.size(), 730);
    assert_eq!(packet.arrival_tick(), 9);
    assert_eq!(packet.remaining_transit_time(), 7);
    assert_eq!(packet.time_in_network(), 0);
    assert!(!packet.is_ready());
}

#[test]
fn test_small_packet_is_ready_immediately() {
    let packet = Packet::new(1, 99, 0);
    assert_eq!(packet.remaining_transit_time(), 0);
    assert!(packet.is_ready());
}

#[test]
fn test_packet_display() {
    assert_eq!(Packet::new(3, 512, 11).to_string(), "[3, 11, 5]");
}

#[test]
fn test_packet_serializes_all_fields() {
    let json = serde_json::to_value(Packet::new(5, 300, 2)).unwrap();

    assert_eq!(json["id"], 5);
    assert_eq!(json["size"], 300);
    assert_eq!(json["arrival_tick"], 2);
    assert_eq!(json["remaining_transit_time"], 3);
    assert_eq!(json["time_in_network"], 0);
}

#[test]
fn test_ids_are_monotonic_across_generation() {
    let generator = ArrivalGenerator::new(ArrivalConfig {
        trials: 3,
        probability: 0.6,
        min_size: 100,
        max_size: 2000,
    });
    let mut rng = RngManager::new(31337);
    let mut ids = PacketIdAllocator::new();

    let all: Vec<u64> = (1..=40)
        .flat_map(|tick| generator.generate(tick, &mut rng, &mut ids))
        .map(|p| p.id())
        .collect();

    assert!(!all.is_empty());
    assert!(all.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(all[0], 1);
    assert_eq!(*all.last().unwrap(), ids.allocated());
}
