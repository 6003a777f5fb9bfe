//! Human-readable rendering of tick reports and run statistics

use packet_simulator_core_rs::{FinalStatistics, TickReport};
use std::fmt::{self, Write};

/// Render one tick as the console log of that time unit
pub fn format_tick(report: &TickReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Time: {}", report.tick)?;

    if report.generated.is_empty() {
        writeln!(out, "No packets arrived.")?;
    }
    for packet in &report.generated {
        writeln!(
            out,
            "Packet {} arrives at dispatcher with size {}.",
            packet.id(),
            packet.size()
        )?;
    }

    for placement in &report.placements {
        writeln!(
            out,
            "Packet {} sent to Router {}.",
            placement.packet_id, placement.router
        )?;
    }
    for packet_id in &report.dropped {
        writeln!(out, "Network is congested. Packet {} is dropped.", packet_id)?;
    }

    for completion in &report.completed {
        writeln!(
            out,
            "Packet {} has successfully reached its destination: +{}",
            completion.packet.id(),
            completion.packet.time_in_network()
        )?;
    }

    for snapshot in &report.buffer_snapshots {
        writeln!(out, "R{}: {}", snapshot.router, snapshot)?;
    }

    Ok(out)
}

/// Render the end-of-run summary
pub fn format_statistics(stats: &FinalStatistics) -> Result<String, fmt::Error> {
    let mean = match stats.mean_service_time {
        Some(mean) => format!("{:.2}", mean),
        None => "n/a".to_string(),
    };

    let mut out = String::new();
    writeln!(out, "Simulation ending after {} ticks...", stats.ticks_elapsed)?;
    writeln!(out, "Total packets generated: {}", stats.total_generated)?;
    writeln!(out, "Total service time: {}", stats.total_service_time)?;
    writeln!(out, "Total packets served: {}", stats.total_arrived)?;
    writeln!(out, "Average service time per packet: {}", mean)?;
    writeln!(out, "Total packets dropped: {}", stats.total_dropped)?;
    writeln!(out, "Packets still in flight: {}", stats.in_flight)?;
    Ok(out)
}
