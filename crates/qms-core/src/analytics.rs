//! Dashboard aggregation over NG records and process observations.
//!
//! All figures are computed for one area and one reporting window. Ranked
//! lists are sorted by value, largest first, with ties broken by name.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use qms_model::{Area, NgRecord, ObservationRecord, ProductionDate, Shift};
use serde::Serialize;

/// Reporting window relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Only the reference day itself.
    Daily,
    /// From the Sunday that starts the reference day's week.
    Weekly,
    /// From the first day of the reference day's month.
    Monthly,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Daily, TimeRange::Weekly, TimeRange::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Daily => "daily",
            TimeRange::Weekly => "weekly",
            TimeRange::Monthly => "monthly",
        }
    }

    /// Whether `date` falls in the window ending at `today`.
    ///
    /// Weekly and monthly windows are open-ended: records dated after
    /// `today` still count.
    pub fn contains(&self, date: ProductionDate, today: ProductionDate) -> bool {
        match self {
            TimeRange::Daily => date == today,
            TimeRange::Weekly => date >= today.week_start(),
            TimeRange::Monthly => date >= today.month_start(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "today" => Ok(TimeRange::Daily),
            "weekly" | "week" => Ok(TimeRange::Weekly),
            "monthly" | "month" => Ok(TimeRange::Monthly),
            other => Err(format!(
                "unknown time range '{other}' (expected daily, weekly or monthly)"
            )),
        }
    }
}

/// A named total in a ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub value: u64,
}

/// Per-day total, used for trend lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: ProductionDate,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoRow {
    pub issue: String,
    pub count: u64,
    /// Running share of all issues up to and including this row, in percent.
    pub cumulative_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftTotal {
    pub shift: Shift,
    pub value: u64,
}

/// Production-quality figures for one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionAnalytics {
    pub area: Area,
    pub range: TimeRange,
    pub today: ProductionDate,
    /// NG quantity per day, oldest first.
    pub trend: Vec<DailyTotal>,
    /// NG quantity per bench, using the station label when one was given.
    pub lines: Vec<Tally>,
    /// NG entries per issue; each entry counts once regardless of quantity.
    pub pareto: Vec<ParetoRow>,
    pub vendors: Vec<Tally>,
    /// Always one row per shift, A to C.
    pub shifts: Vec<ShiftTotal>,
    pub stations: Vec<Tally>,
    pub total: u64,
}

impl ProductionAnalytics {
    pub fn compute(
        records: &[NgRecord],
        area: Area,
        range: TimeRange,
        today: ProductionDate,
    ) -> Self {
        let selected: Vec<&NgRecord> = records
            .iter()
            .filter(|record| record.header.area == area && range.contains(record.date(), today))
            .collect();

        let mut trend = BTreeMap::new();
        let mut lines = HashMap::new();
        let mut issues = HashMap::new();
        let mut vendors = HashMap::new();
        let mut shifts: BTreeMap<Shift, u64> = Shift::ALL.iter().map(|shift| (*shift, 0)).collect();
        let mut stations = HashMap::new();
        let mut total = 0;

        for record in &selected {
            let quantity = u64::from(record.quantity);
            total += quantity;
            *trend.entry(record.date()).or_insert(0) += quantity;
            *lines.entry(line_name(record)).or_insert(0) += quantity;
            *issues.entry(record.issue_key()).or_insert(0) += 1;
            *vendors.entry(record.vendor.clone()).or_insert(0) += quantity;
            *shifts.entry(record.header.shift).or_insert(0) += quantity;
            *stations
                .entry(record.header.station.bench_tag())
                .or_insert(0) += quantity;
        }

        let analytics = Self {
            area,
            range,
            today,
            trend: trend
                .into_iter()
                .map(|(date, value)| DailyTotal { date, value })
                .collect(),
            lines: ranked(lines),
            pareto: pareto(ranked(issues)),
            vendors: ranked(vendors),
            shifts: shifts
                .into_iter()
                .map(|(shift, value)| ShiftTotal { shift, value })
                .collect(),
            stations: ranked(stations),
            total,
        };
        tracing::debug!(
            area = %area,
            range = %range,
            records = selected.len(),
            total,
            "production analytics computed"
        );
        analytics
    }
}

/// Process-observation figures for one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationAnalytics {
    pub area: Area,
    pub range: TimeRange,
    pub today: ProductionDate,
    /// Observations per operator, top ten.
    pub operator_repetition: Vec<Tally>,
    pub material: Vec<Tally>,
    pub line_leader: Vec<Tally>,
    pub trend: Vec<DailyTotal>,
    pub total: u64,
}

impl ObservationAnalytics {
    const TOP_OPERATORS: usize = 10;

    pub fn compute(
        observations: &[ObservationRecord],
        area: Area,
        range: TimeRange,
        today: ProductionDate,
    ) -> Self {
        let mut operators = HashMap::new();
        let mut material = HashMap::new();
        let mut leaders = HashMap::new();
        let mut trend = BTreeMap::new();
        let mut total = 0;

        for observation in observations
            .iter()
            .filter(|obs| obs.header.area == area && range.contains(obs.date(), today))
        {
            total += 1;
            *operators
                .entry(or_placeholder(observation.operator_name.as_deref(), "Unnamed Operator"))
                .or_insert(0) += 1;
            *material
                .entry(or_placeholder(observation.vendor.as_deref(), "Unknown Vendor"))
                .or_insert(0) += 1;
            *leaders
                .entry(or_placeholder(observation.line_leader.as_deref(), "Unassigned"))
                .or_insert(0) += 1;
            *trend.entry(observation.date()).or_insert(0) += 1;
        }

        let mut operator_repetition = ranked(operators);
        operator_repetition.truncate(Self::TOP_OPERATORS);

        Self {
            area,
            range,
            today,
            operator_repetition,
            material: ranked(material),
            line_leader: ranked(leaders),
            trend: trend
                .into_iter()
                .map(|(date, value)| DailyTotal { date, value })
                .collect(),
            total,
        }
    }
}

fn line_name(record: &NgRecord) -> String {
    record
        .header
        .station_label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map_or_else(|| record.header.station.bench_tag(), str::to_string)
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

fn ranked(counts: HashMap<String, u64>) -> Vec<Tally> {
    let mut rows: Vec<Tally> = counts
        .into_iter()
        .map(|(name, value)| Tally { name, value })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    rows
}

fn pareto(issues: Vec<Tally>) -> Vec<ParetoRow> {
    let total: u64 = issues.iter().map(|row| row.value).sum();
    let mut running = 0;
    issues
        .into_iter()
        .map(|row| {
            running += row.value;
            ParetoRow {
                issue: row.name,
                count: row.value,
                cumulative_percent: percent(running, total),
            }
        })
        .collect()
}

/// `part / whole` as a whole percentage, rounded half up.
fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part * 200 + whole) / (whole * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
