use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::clients::QuarterUsageFetch;
use crate::models::DailyUsageReport;
use crate::services::aggregation::summarize_day;

/// Fetches a day of quarter-hour readings and reduces them to the hourly
/// display summary.
///
/// A failed fetch never surfaces as an error to the caller: the summary
/// degrades to the safe-empty state and the failure message rides along in
/// the report envelope, so consumers always have a complete shape to render.
#[derive(Clone)]
pub struct UsageService {
    fetcher: Arc<dyn QuarterUsageFetch>,
}

impl UsageService {
    pub fn new(fetcher: Arc<dyn QuarterUsageFetch>) -> Self {
        Self { fetcher }
    }

    pub async fn daily_summary(&self, device_serial: &str, date: NaiveDate) -> DailyUsageReport {
        match self.fetcher.fetch_quarter_usage(device_serial, date).await {
            Ok(response) => DailyUsageReport {
                data: summarize_day(Some(&response)),
                error: None,
            },
            Err(err) => {
                warn!(
                    "Quarter usage fetch failed for device {} on {}: {}",
                    device_serial, date, err
                );
                DailyUsageReport {
                    data: summarize_day(None),
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockQuarterUsageFetch;
    use crate::error::AppError;
    use crate::models::{MeterInterval, QuarterUsageResponse};
    use pretty_assertions::assert_eq;

    fn full_day_response() -> QuarterUsageResponse {
        let data: Vec<MeterInterval> = (0..96)
            .map(|i| MeterInterval {
                formatted_date: "2024-05-07".to_string(),
                curr_quart_act_energy: Some(100.0),
                measure_ts: 1_715_040_000 + 16_200 + i * 900,
            })
            .collect();

        QuarterUsageResponse {
            date: Some("2024-05-07".to_string()),
            total_energy_consumed: Some(9600.0),
            data: Some(data),
        }
    }

    #[tokio::test]
    async fn daily_summary_aggregates_fetched_day() {
        let mut fetcher = MockQuarterUsageFetch::new();
        fetcher
            .expect_fetch_quarter_usage()
            .returning(|_, _| Ok(full_day_response()));

        let service = UsageService::new(Arc::new(fetcher));
        let date = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let report = service.daily_summary("ABC123", date).await;

        assert_eq!(report.error, None);
        assert_eq!(report.data.date, "2024-05-07");
        assert_eq!(report.data.total_energy_consumed_wh, 9600.0);
        assert_eq!(report.data.average_consumption_wh, 400.0);
        assert_eq!(report.data.buckets.len(), 24);
        assert_eq!(report.data.peak.total_usage_wh, 400.0);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_safe_empty() {
        let mut fetcher = MockQuarterUsageFetch::new();
        fetcher.expect_fetch_quarter_usage().returning(|_, _| {
            Err(AppError::Upstream {
                status: 503,
                message: "maintenance".to_string(),
            })
        });

        let service = UsageService::new(Arc::new(fetcher));
        let date = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let report = service.daily_summary("ABC123", date).await;

        assert_eq!(
            report.error.as_deref(),
            Some("Upstream error 503: maintenance")
        );
        assert_eq!(report.data.date, "");
        assert_eq!(report.data.total_energy_consumed_wh, 0.0);
        assert_eq!(report.data.peak.total_usage_wh, 0.0);
        assert!(report.data.buckets.is_empty());
    }

    #[tokio::test]
    async fn response_without_intervals_is_safe_empty_without_error() {
        let mut fetcher = MockQuarterUsageFetch::new();
        fetcher.expect_fetch_quarter_usage().returning(|_, _| {
            Ok(QuarterUsageResponse {
                date: None,
                total_energy_consumed: None,
                data: None,
            })
        });

        let service = UsageService::new(Arc::new(fetcher));
        let date = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let report = service.daily_summary("ABC123", date).await;

        assert_eq!(report.error, None);
        assert_eq!(report.data.date, "");
        assert!(report.data.buckets.is_empty());
    }
}
