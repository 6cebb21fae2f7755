//! Aggregates behind the headline counters, the status pie chart and the
//! applications-over-time line chart.
use crate::record::{ApplicationRecord, RecordStatus, Status};
use ahash::AHashMap;
use chrono::Datelike;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// Share of records holding one status value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: RecordStatus,
    pub count: usize,
    /// Percentage of all records, `0.0..=100.0`.
    pub percent: f64,
}

/// Number of applications sent in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    /// Short label such as `"Mar 2024"`.
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub applied: usize,
    pub interviews: usize,
    pub offers: usize,
    /// Known statuses in display order, then unrecognized values in first-seen order.
    pub distribution: Vec<StatusShare>,
    /// Oldest month first.
    pub timeline: Vec<MonthCount>,
}

impl Summary {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total = records.len();

        let mut by_status: AHashMap<&RecordStatus, usize> = AHashMap::new();
        for record in records {
            *by_status.entry(&record.status).or_insert(0) += 1;
        }
        let count_of = |status: Status| {
            by_status
                .get(&RecordStatus::Known(status))
                .copied()
                .unwrap_or(0)
        };

        let share = |status: RecordStatus, count: usize| StatusShare {
            status,
            count,
            percent: count as f64 / total as f64 * 100.0,
        };
        let known = Status::ALL
            .into_iter()
            .map(|status| (status, count_of(status)))
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| share(RecordStatus::Known(status), count));
        let unrecognized = records
            .iter()
            .map(|record| &record.status)
            .filter(|status| status.known().is_none())
            .unique()
            .map(|status| share(status.clone(), by_status[status]));
        let distribution = known.chain(unrecognized).collect();

        let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for record in records {
            let date = record.date_applied;
            *months.entry((date.year(), date.month())).or_insert(0) += 1;
        }
        let timeline = months
            .into_iter()
            .map(|((year, month), count)| MonthCount {
                year,
                month,
                label: month_label(year, month),
                count,
            })
            .collect();

        Self {
            total,
            applied: count_of(Status::Applied),
            interviews: count_of(Status::Interview),
            offers: count_of(Status::Offer),
            distribution,
            timeline,
        }
    }
}

fn month_label(year: i32, month: u32) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let name = NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???");
    format!("{} {}", name, year)
}
