pub mod usage;

pub use usage::{
    DailyUsageReport, DaySummary, HourlyBucket, IntervalSample, MeterInterval, NormalizedInterval,
    PeakRecord, QuarterUsageResponse,
};
