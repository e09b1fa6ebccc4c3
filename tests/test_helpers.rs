// Shared helpers for the integration tests: a stub fetch collaborator and
// builders for quarter-hour meter responses.

use async_trait::async_trait;
use chrono::NaiveDate;
use daily_usage_api::clients::QuarterUsageFetch;
use daily_usage_api::error::AppError;
use daily_usage_api::models::{MeterInterval, QuarterUsageResponse};
use daily_usage_api::services::aggregation::MEASURE_TS_OFFSET_SECS;

// 2024-05-07 00:00:00 UTC
pub const DAY_START_TS: i64 = 1_715_040_000;

#[allow(dead_code)]
pub enum StubBehavior {
    Respond(QuarterUsageResponse),
    Fail(String),
}

/// In-memory stand-in for the meter cloud.
pub struct StubFetcher {
    behavior: StubBehavior,
}

impl StubFetcher {
    pub fn new(behavior: StubBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait]
impl QuarterUsageFetch for StubFetcher {
    async fn fetch_quarter_usage(
        &self,
        _device_serial: &str,
        _date: NaiveDate,
    ) -> daily_usage_api::Result<QuarterUsageResponse> {
        match &self.behavior {
            StubBehavior::Respond(response) => Ok(response.clone()),
            StubBehavior::Fail(message) => Err(AppError::Upstream {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

/// Build `count` quarter-hour intervals with the given usages, stamped the
/// way the cloud stamps them (4.5 h ahead of the interval start).
pub fn intervals_with_usages(usages: &[f64]) -> Vec<MeterInterval> {
    usages
        .iter()
        .enumerate()
        .map(|(i, &usage)| MeterInterval {
            formatted_date: "2024-05-07".to_string(),
            curr_quart_act_energy: Some(usage),
            measure_ts: DAY_START_TS + MEASURE_TS_OFFSET_SECS + i as i64 * 900,
        })
        .collect()
}

#[allow(dead_code)]
pub fn uniform_intervals(count: usize, usage: f64) -> Vec<MeterInterval> {
    intervals_with_usages(&vec![usage; count])
}

pub fn day_response(
    total_energy_consumed: Option<f64>,
    data: Vec<MeterInterval>,
) -> QuarterUsageResponse {
    QuarterUsageResponse {
        date: Some("2024-05-07".to_string()),
        total_energy_consumed,
        data: Some(data),
    }
}
