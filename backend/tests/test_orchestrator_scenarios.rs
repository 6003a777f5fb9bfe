//! End-to-end scenarios through the public engine API

use packet_simulator_core_rs::{
    NetworkConfig, Orchestrator, RouterBuffer, RoutingError, RoutingPolicy, RunPhase,
    SimulationError,
};

fn base_config() -> NetworkConfig {
    NetworkConfig {
        num_intermediate_routers: 1,
        arrival_probability: 1.0,
        router_buffer_capacity: 2,
        min_packet_size: 100,
        max_packet_size: 101,
        bandwidth: 1,
        duration: 1,
        arrival_trials: 3,
        rng_seed: 42,
    }
}

#[test]
fn test_single_tick_overflow_scenario() {
    let mut orchestrator = Orchestrator::new(base_config()).unwrap();
    let report = orchestrator.tick().unwrap();

    assert_eq!(report.tick, 1);
    assert_eq!(report.num_generated(), 3);
    assert!(report
        .generated
        .iter()
        .all(|p| p.size() == 100 && p.remaining_transit_time() == 1 && p.arrival_tick() == 1));
    assert_eq!(report.num_placed(), 2);
    assert_eq!(report.dropped, vec![3]);
    assert!(report.completed.is_empty());

    // Placed this tick, so never aged and never counted down
    let snapshot = &report.buffer_snapshots[0];
    assert_eq!(snapshot.occupancy(), 2);
    assert!(snapshot
        .packets
        .iter()
        .all(|p| p.time_in_network() == 0 && p.remaining_transit_time() == 1));

    assert!(orchestrator.is_finished());
    let stats = orchestrator.final_statistics();
    assert_eq!(stats.total_generated, 3);
    assert_eq!(stats.total_dropped, 1);
    assert_eq!(stats.total_arrived, 0);
    assert_eq!(stats.in_flight, 2);
    assert_eq!(stats.mean_service_time, None);
}

#[test]
fn test_countdown_starts_the_tick_after_placement() {
    let mut config = base_config();
    config.router_buffer_capacity = 1;
    config.arrival_trials = 1;
    config.min_packet_size = 200;
    config.max_packet_size = 201;
    config.duration = 3;

    let mut orchestrator = Orchestrator::new(config).unwrap();
    let reports = orchestrator.run_to_completion().unwrap();

    assert_eq!(reports[0].num_placed(), 1);
    assert_eq!(reports[1].num_dropped(), 1);
    assert!(reports[1].completed.is_empty());

    let delivered = &reports[2].completed;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].packet.id(), 1);
    assert_eq!(delivered[0].packet.time_in_network(), 2);
    assert_eq!(delivered[0].router, 1);

    let stats = orchestrator.final_statistics();
    assert_eq!(stats.total_arrived, 1);
    assert_eq!(stats.total_dropped, 2);
    assert_eq!(stats.mean_service_time, Some(2.0));
}

#[test]
fn test_tiny_packets_deliver_on_arrival_tick() {
    let mut config = base_config();
    config.arrival_trials = 1;
    config.min_packet_size = 10;
    config.max_packet_size = 99;
    config.duration = 5;

    let mut orchestrator = Orchestrator::new(config).unwrap();
    for report in orchestrator.run_to_completion().unwrap() {
        assert_eq!(report.num_completed(), 1);
        assert_eq!(report.completed[0].packet.arrival_tick(), report.tick);
        assert_eq!(report.completed[0].packet.time_in_network(), 0);
    }

    let stats = orchestrator.final_statistics();
    assert_eq!(stats.total_arrived, 5);
    assert_eq!(stats.mean_service_time, Some(0.0));
}

#[test]
fn test_same_seed_same_reports() {
    let config = NetworkConfig {
        num_intermediate_routers: 4,
        arrival_probability: 0.55,
        router_buffer_capacity: 3,
        min_packet_size: 120,
        max_packet_size: 800,
        bandwidth: 2,
        duration: 60,
        arrival_trials: 3,
        rng_seed: 9001,
    };

    let run = |config: NetworkConfig| {
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let reports = orchestrator.run_to_completion().unwrap();
        (reports, orchestrator.final_statistics())
    };

    let (reports_a, stats_a) = run(config.clone());
    let (reports_b, stats_b) = run(config.clone());
    assert_eq!(reports_a, reports_b);
    assert_eq!(stats_a, stats_b);

    let mut reseeded = config;
    reseeded.rng_seed = 9002;
    let (reports_c, _) = run(reseeded);
    assert_ne!(reports_a, reports_c);
}

#[test]
fn test_independent_runs_do_not_share_ids() {
    let mut first = Orchestrator::new(base_config()).unwrap();
    let mut second = Orchestrator::new(base_config()).unwrap();

    let a = first.tick().unwrap();
    let b = second.tick().unwrap();

    let ids = |r: &packet_simulator_core_rs::TickReport| {
        r.generated.iter().map(|p| p.id()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&a), vec![1, 2, 3]);
    assert_eq!(ids(&b), vec![1, 2, 3]);
}

#[test]
fn test_zero_probability_yields_undefined_mean() {
    let mut config = base_config();
    config.arrival_probability = 0.0;
    config.duration = 25;

    let mut orchestrator = Orchestrator::new(config).unwrap();
    let reports = orchestrator.run_to_completion().unwrap();

    assert!(reports.iter().all(|r| r.num_generated() == 0));
    assert_eq!(orchestrator.final_statistics().mean_service_time, None);
    assert_eq!(orchestrator.phase(), RunPhase::Finished);
}

#[test]
fn test_finished_engine_rejects_tick() {
    let mut orchestrator = Orchestrator::new(base_config()).unwrap();
    orchestrator.tick().unwrap();

    assert_eq!(
        orchestrator.tick(),
        Err(SimulationError::AlreadyFinished { duration: 1 })
    );
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = base_config();
    config.max_packet_size = 100;

    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

/// Always sends to the last router that has room
struct LastFit;

impl RoutingPolicy for LastFit {
    fn select_destination(&self, routers: &[RouterBuffer]) -> Result<usize, RoutingError> {
        routers
            .iter()
            .rposition(|r| !r.is_full())
            .ok_or(RoutingError::AllRoutersFull)
    }

    fn name(&self) -> &'static str {
        "last_fit"
    }
}

#[test]
fn test_custom_policy_drives_placement() {
    let mut config = base_config();
    config.num_intermediate_routers = 3;
    config.router_buffer_capacity = 5;

    let mut orchestrator = Orchestrator::with_policy(config, Box::new(LastFit)).unwrap();
    assert_eq!(orchestrator.policy_name(), "last_fit");

    let report = orchestrator.tick().unwrap();
    assert!(report.placements.iter().all(|p| p.router == 3));
    assert_eq!(report.buffer_snapshots[2].occupancy(), 3);
}

/// Points at a router that does not exist
struct OutOfRange;

impl RoutingPolicy for OutOfRange {
    fn select_destination(&self, routers: &[RouterBuffer]) -> Result<usize, RoutingError> {
        Ok(routers.len())
    }
}

#[test]
fn test_policy_choosing_missing_router_is_error() {
    let mut orchestrator = Orchestrator::with_policy(base_config(), Box::new(OutOfRange)).unwrap();

    assert_eq!(
        orchestrator.tick(),
        Err(SimulationError::InvalidDestination {
            index: 1,
            num_routers: 1
        })
    );
}

#[test]
fn test_event_log_traces_packet_history() {
    let mut config = base_config();
    config.router_buffer_capacity = 1;
    config.arrival_trials = 1;
    config.min_packet_size = 200;
    config.max_packet_size = 201;
    config.duration = 3;

    let mut orchestrator = Orchestrator::new(config).unwrap();
    orchestrator.run_to_completion().unwrap();

    let history: Vec<(usize, &str)> = orchestrator
        .event_log()
        .events_for_packet(1)
        .iter()
        .map(|e| (e.tick(), e.event_type()))
        .collect();
    assert_eq!(
        history,
        vec![
            (1, "PacketGenerated"),
            (1, "PacketRouted"),
            (3, "PacketDelivered")
        ]
    );
}

#[test]
fn test_report_serializes_to_json() {
    let mut orchestrator = Orchestrator::new(base_config()).unwrap();
    let report = orchestrator.tick().unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tick"], 1);
    assert_eq!(json["dropped"][0], 3);
    assert_eq!(json["buffer_snapshots"][0]["router"], 1);

    let stats = serde_json::to_value(orchestrator.final_statistics()).unwrap();
    assert!(stats["mean_service_time"].is_null());
}

#[test]
fn test_huge_capacity_and_duration_do_not_preallocate() {
    let config = NetworkConfig {
        num_intermediate_routers: 4,
        router_buffer_capacity: 1 << 60,
        duration: 1 << 60,
        ..base_config()
    };
    assert!(config.validate().is_ok());

    let mut orchestrator = Orchestrator::new(config).unwrap();
    for _ in 0..3 {
        orchestrator.tick().unwrap();
    }

    assert_eq!(orchestrator.current_tick(), 3);
    assert!(orchestrator.routers().iter().all(|r| !r.is_full()));
    assert_eq!(orchestrator.state().total_dropped(), 0);
    assert!(orchestrator.check_conservation().is_ok());
}
