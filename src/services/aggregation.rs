use chrono::{DateTime, Duration, Utc};

use crate::models::{
    DaySummary, HourlyBucket, IntervalSample, NormalizedInterval, PeakRecord, QuarterUsageResponse,
};

/// Fixed correction subtracted from every measurement timestamp before
/// windowing. The meter cloud stamps each reading 4.5 hours after the
/// interval it belongs to. Known-odd constant carried over unchanged from
/// the device firmware contract, see DESIGN.md.
pub const MEASURE_TS_OFFSET_SECS: i64 = 16_200;

pub const INTERVALS_PER_HOUR: usize = 4;
pub const HOURS_PER_DAY: usize = 24;

const INTERVAL_MINUTES: i64 = 15;
const INVALID_WINDOW_LABEL: &str = "Invalid date";

// Filler literals for hours without a complete set of quarters. The chart
// consumers key on these exact values, see DESIGN.md.
const FILLER_HOUR_LABEL: &str = "10";
const FILLER_TOTAL_KWH: f64 = 24.0;
const FILLER_WINDOW_LABEL: &str = "06:15 - 06:30";
const FILLER_PEAK_USAGE_WH: f64 = 210.0;

fn format_hm(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

fn day_of_month(date_label: &str) -> String {
    date_label.split('-').nth(2).unwrap_or_default().to_string()
}

/// Attach the quarter-hour window to a raw sample.
///
/// A timestamp outside the representable range never aborts the day; it
/// degrades to the epoch-0 window with an `"Invalid date"` label.
pub fn normalize_interval(sample: &IntervalSample) -> NormalizedInterval {
    let corrected = sample.timestamp - MEASURE_TS_OFFSET_SECS;

    let (window_start, window_label) = match DateTime::from_timestamp(corrected, 0) {
        Some(start) => {
            let end = start + Duration::minutes(INTERVAL_MINUTES);
            let label = format!("{} - {}", format_hm(start), format_hm(end));
            (start, label)
        }
        None => (DateTime::UNIX_EPOCH, INVALID_WINDOW_LABEL.to_string()),
    };

    NormalizedInterval {
        day_of_month: day_of_month(&sample.date_label),
        usage_wh: sample.usage_wh,
        timestamp: sample.timestamp,
        window_start,
        window_end: window_start + Duration::minutes(INTERVAL_MINUTES),
        window_label,
        peak: false,
    }
}

/// Group a day of samples into exactly 24 hourly buckets and track the
/// highest-consuming hour while doing so.
///
/// Only a full slice of four quarters forms a real bucket; a trailing
/// partial hour contributes nothing. Missing hours are appended as
/// synthetic filler afterwards, so the result always holds 24 entries.
pub fn bucket_day(samples: &[IntervalSample]) -> (Vec<HourlyBucket>, PeakRecord) {
    let normalized: Vec<NormalizedInterval> = samples.iter().map(normalize_interval).collect();

    let (mut buckets, peak) = (0..HOURS_PER_DAY).fold(
        (Vec::with_capacity(HOURS_PER_DAY), PeakRecord::default()),
        |(mut buckets, peak), hour| {
            let Some(chunk) =
                normalized.get(hour * INTERVALS_PER_HOUR..(hour + 1) * INTERVALS_PER_HOUR)
            else {
                return (buckets, peak);
            };

            let total_usage_wh: f64 = chunk.iter().map(|quarter| quarter.usage_wh).sum();

            // First occurrence wins on ties, replace only on strictly greater.
            let peak_index = chunk.iter().enumerate().fold(0, |best, (index, quarter)| {
                if quarter.usage_wh > chunk[best].usage_wh {
                    index
                } else {
                    best
                }
            });

            let intervals: Vec<NormalizedInterval> = chunk
                .iter()
                .enumerate()
                .map(|(index, quarter)| NormalizedInterval {
                    peak: index == peak_index,
                    ..quarter.clone()
                })
                .collect();

            let window_label = format!(
                "Dalle ore {} - alle ore {}",
                format_hm(chunk[0].window_start),
                format_hm(chunk[3].window_end),
            );

            // Strictly greater, so the first hour of a day-wide tie is kept.
            let peak = if total_usage_wh > peak.total_usage_wh {
                PeakRecord {
                    total_usage_wh,
                    window_label: format!(
                        "{} - {}",
                        format_hm(chunk[peak_index].window_start),
                        format_hm(chunk[3].window_end),
                    ),
                }
            } else {
                peak
            };

            buckets.push(HourlyBucket {
                hour_label: hour.to_string(),
                total_usage_wh,
                total_usage_kwh: total_usage_wh / 1000.0,
                window_label,
                intervals,
            });

            (buckets, peak)
        },
    );

    while buckets.len() < HOURS_PER_DAY {
        buckets.push(filler_bucket());
    }

    (buckets, peak)
}

fn filler_bucket() -> HourlyBucket {
    HourlyBucket {
        hour_label: FILLER_HOUR_LABEL.to_string(),
        total_usage_wh: FILLER_TOTAL_KWH * 1000.0,
        total_usage_kwh: FILLER_TOTAL_KWH,
        window_label: FILLER_WINDOW_LABEL.to_string(),
        intervals: vec![NormalizedInterval {
            day_of_month: "1".to_string(),
            usage_wh: FILLER_PEAK_USAGE_WH,
            timestamp: 0,
            window_start: DateTime::UNIX_EPOCH,
            window_end: DateTime::UNIX_EPOCH + Duration::minutes(INTERVAL_MINUTES),
            window_label: FILLER_WINDOW_LABEL.to_string(),
            peak: true,
        }],
    }
}

/// Reduce a fetch response to the daily display summary.
///
/// A missing response, or one without a date or interval list, yields the
/// zero-valued summary with an empty bucket list. This is a defined safe
/// state, not an error.
pub fn summarize_day(response: Option<&QuarterUsageResponse>) -> DaySummary {
    let Some(response) = response else {
        return DaySummary::default();
    };
    let (Some(date), Some(data)) = (response.date.as_ref(), response.data.as_ref()) else {
        return DaySummary::default();
    };

    let samples: Vec<IntervalSample> = data.iter().map(IntervalSample::from).collect();
    let (buckets, peak) = bucket_day(&samples);

    let total_energy_consumed_wh = response.total_energy_consumed.unwrap_or(0.0);

    DaySummary {
        date: date.clone(),
        total_energy_consumed_wh,
        average_consumption_wh: total_energy_consumed_wh / HOURS_PER_DAY as f64,
        peak,
        buckets,
    }
}
