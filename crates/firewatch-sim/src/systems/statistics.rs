//! Statistics projection over the level data and response bookkeeping.

use std::collections::HashSet;

use firewatch_core::level::ParkingLevel;
use firewatch_core::state::Statistics;

use crate::run::ResponseStats;

pub fn build_statistics(levels: &[ParkingLevel], response: &ResponseStats) -> Statistics {
    let detectors = || levels.iter().flat_map(|l| l.detectors.iter());

    let zones: HashSet<&str> = detectors().map(|d| d.zone.as_str()).collect();

    Statistics {
        total_detectors: detectors().count(),
        total_zones: zones.len(),
        average_response_time: response.average(),
        active_cameras: levels
            .iter()
            .flat_map(|l| l.cameras.iter())
            .filter(|c| c.online)
            .count(),
    }
}
