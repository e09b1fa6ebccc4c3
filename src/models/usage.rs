use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw per-day response from the meter cloud's quarter-hour endpoint.
///
/// Every field the cloud is known to omit is optional here; the optionality
/// is resolved exactly once, when the response is mapped into
/// [`IntervalSample`]s, so the aggregation core only ever sees complete
/// records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterUsageResponse {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_energy_consumed: Option<f64>,
    #[serde(default)]
    pub data: Option<Vec<MeterInterval>>,
}

/// One raw 15-minute reading as the meter cloud reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterInterval {
    pub formatted_date: String,
    #[serde(default)]
    pub curr_quart_act_energy: Option<f64>,
    #[serde(rename = "measureTS")]
    pub measure_ts: i64,
}

/// A validated 15-minute sample. Absent energy readings count as 0 Wh.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSample {
    pub date_label: String,
    pub usage_wh: f64,
    pub timestamp: i64,
}

impl From<&MeterInterval> for IntervalSample {
    fn from(interval: &MeterInterval) -> Self {
        Self {
            date_label: interval.formatted_date.clone(),
            usage_wh: interval.curr_quart_act_energy.unwrap_or(0.0),
            timestamp: interval.measure_ts,
        }
    }
}

/// A sample with its quarter-hour window attached.
///
/// `window_end - window_start` is always exactly 15 minutes, also for the
/// degraded out-of-range case.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedInterval {
    pub day_of_month: String,
    pub usage_wh: f64,
    pub timestamp: i64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub window_label: String,
    pub peak: bool,
}

/// One hour of the day as shown in the chart: four quarters, their total,
/// and the display window label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyBucket {
    pub hour_label: String,
    pub total_usage_wh: f64,
    pub total_usage_kwh: f64,
    pub window_label: String,
    pub intervals: Vec<NormalizedInterval>,
}

/// The highest-consuming hour of the day.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PeakRecord {
    pub total_usage_wh: f64,
    pub window_label: String,
}

/// The fixed-shape daily summary handed to display consumers.
///
/// After aggregation the bucket list always holds exactly 24 entries; the
/// `Default` value is the safe-empty state returned when the cloud had no
/// data for the requested day.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub total_energy_consumed_wh: f64,
    pub average_consumption_wh: f64,
    pub peak: PeakRecord,
    pub buckets: Vec<HourlyBucket>,
}

/// Response envelope for the daily usage endpoint: the summary is always
/// present, a failed fetch is reported next to it as a message.
#[derive(Debug, Clone, Serialize)]
pub struct DailyUsageReport {
    pub data: DaySummary,
    pub error: Option<String>,
}
