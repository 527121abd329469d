//! Trend bucketer
//!
//! Groups records by UTC calendar day. Days without records are not
//! synthesized, so series are sparse. Records without a timestamp cannot be
//! placed on a day and are left out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::domain::snapshot::Snapshot;
use crate::domain::value_objects::{utc_day, MetricType};

/// Category used for applications without a program
pub const UNASSIGNED_PROGRAM: &str = "unassigned";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: u64,
    /// Per-program counts; only populated for applications
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub metric: MetricType,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct categories across all points, sorted
    pub fn categories(&self) -> BTreeSet<&str> {
        self.points
            .iter()
            .flat_map(|p| p.by_category.keys().map(String::as_str))
            .collect()
    }

    /// Counts of one category aligned with the series dates, 0 where absent
    pub fn category_counts(&self, category: &str) -> Vec<u64> {
        self.points
            .iter()
            .map(|p| p.by_category.get(category).copied().unwrap_or(0))
            .collect()
    }
}

pub fn bucket(snapshot: &Snapshot, metric: MetricType) -> TrendSeries {
    let points = match metric {
        MetricType::Clients => {
            by_day(metric, snapshot.clients.iter().map(|c| (c.created_at, None)))
        }
        MetricType::Tickets => {
            by_day(metric, snapshot.tickets.iter().map(|t| (t.created_at, None)))
        }
        MetricType::Applications => by_day(
            metric,
            snapshot.applications.iter().map(|a| {
                let program = a.program.as_deref().unwrap_or(UNASSIGNED_PROGRAM);
                (a.created_at, Some(program))
            }),
        ),
    };
    TrendSeries { metric, points }
}

fn by_day<'a>(
    metric: MetricType,
    records: impl Iterator<Item = (Option<DateTime<Utc>>, Option<&'a str>)>,
) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();
    let mut undated = 0usize;
    for (instant, category) in records {
        let Some(instant) = instant else {
            undated += 1;
            continue;
        };
        let date = utc_day(instant);
        let point = days.entry(date).or_insert_with(|| TrendPoint {
            date,
            total: 0,
            by_category: BTreeMap::new(),
        });
        point.total += 1;
        if let Some(category) = category {
            *point.by_category.entry(category.to_string()).or_default() += 1;
        }
    }
    if undated > 0 {
        warn!(%metric, undated, "records without a timestamp left out of the trend");
    }
    days.into_values().collect()
}
