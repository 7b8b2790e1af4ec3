//! Daily aggregation of disaster events.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::data::{DisasterEvent, Severity};

/// Per-day rollup of the disaster table. Dates with no events get the
/// all-zero `Default` when joined onto the weather table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyAggregate {
    /// Sum of affected_population over events that day.
    pub total_affected: u64,
    /// Events with Critical severity that day.
    pub critical_count: u32,
    /// All events that day.
    pub disaster_count: u32,
}

/// Group events by calendar day. Only days that actually have events appear;
/// the join in the deriver zero-fills the rest.
pub fn aggregate_daily(events: &[DisasterEvent]) -> BTreeMap<NaiveDate, DailyAggregate> {
    let mut by_day: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
    for event in events {
        let agg = by_day.entry(event.day()).or_default();
        agg.total_affected += u64::from(event.affected_population);
        if event.severity == Severity::Critical {
            agg.critical_count += 1;
        }
        agg.disaster_count += 1;
    }
    by_day
}
