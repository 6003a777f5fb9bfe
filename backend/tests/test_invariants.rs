//! Property tests for run-wide invariants
//!
//! For arbitrary valid configurations, every tick boundary must satisfy:
//! - conservation: generated == arrived + dropped + in-flight
//! - the dispatcher is empty
//! - no router exceeds capacity
//! - at most `bandwidth` deliveries

use packet_simulator_core_rs::{NetworkConfig, Orchestrator};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = NetworkConfig> {
    (
        1usize..6,
        0.0f64..=1.0,
        1usize..5,
        (1usize..400, 1usize..600),
        1usize..4,
        1usize..40,
        1usize..5,
        any::<u64>(),
    )
        .prop_map(
            |(routers, probability, capacity, (min, span), bandwidth, duration, trials, seed)| {
                NetworkConfig {
                    num_intermediate_routers: routers,
                    arrival_probability: probability,
                    router_buffer_capacity: capacity,
                    min_packet_size: min,
                    max_packet_size: min + span,
                    bandwidth,
                    duration,
                    arrival_trials: trials,
                    rng_seed: seed,
                }
            },
        )
}

proptest! {
    #[test]
    fn prop_tick_boundaries_hold_invariants(config in config_strategy()) {
        let mut orchestrator = Orchestrator::new(config.clone()).unwrap();
        let mut generated = 0usize;

        while !orchestrator.is_finished() {
            let report = orchestrator.tick().unwrap();
            generated += report.num_generated();

            prop_assert!(orchestrator.check_conservation().is_ok());
            prop_assert!(orchestrator.dispatcher().is_empty());
            prop_assert!(report.num_completed() <= config.bandwidth);
            prop_assert_eq!(report.num_generated(), report.num_placed() + report.num_dropped());
            prop_assert!(report.num_generated() <= config.arrival_trials);

            for snapshot in &report.buffer_snapshots {
                prop_assert!(snapshot.occupancy() <= config.router_buffer_capacity);
            }

            let stats = orchestrator.final_statistics();
            prop_assert_eq!(stats.total_generated as usize, generated);
            prop_assert_eq!(
                stats.total_generated,
                stats.total_arrived + stats.total_dropped + stats.in_flight
            );
        }
    }

    #[test]
    fn prop_drops_only_when_every_router_is_full(config in config_strategy()) {
        let mut orchestrator = Orchestrator::new(config.clone()).unwrap();

        while !orchestrator.is_finished() {
            let report = orchestrator.tick().unwrap();
            if report.num_dropped() > 0 {
                // Deliveries happen after placement, so at drop time every
                // router was full; it can only have lost its completed heads since
                let delivered = report.num_completed();
                let total_buffered: usize =
                    report.buffer_snapshots.iter().map(|s| s.occupancy()).sum();
                prop_assert_eq!(
                    total_buffered + delivered,
                    config.num_intermediate_routers * config.router_buffer_capacity
                );
            }
        }
    }

    #[test]
    fn prop_mean_service_time_matches_deliveries(config in config_strategy()) {
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let reports = orchestrator.run_to_completion().unwrap();

        let delivered: Vec<usize> = reports
            .iter()
            .flat_map(|r| r.completed.iter().map(|c| c.packet.time_in_network()))
            .collect();
        let stats = orchestrator.final_statistics();

        prop_assert_eq!(stats.total_arrived as usize, delivered.len());
        prop_assert_eq!(stats.total_service_time as usize, delivered.iter().sum::<usize>());
        if delivered.is_empty() {
            prop_assert!(stats.mean_service_time.is_none());
        } else {
            let expected = delivered.iter().sum::<usize>() as f64 / delivered.len() as f64;
            prop_assert_eq!(stats.mean_service_time, Some(expected));
        }
    }
}
