pub mod meter;

pub use meter::{MeterClient, QuarterUsageFetch};

#[cfg(test)]
pub use meter::MockQuarterUsageFetch;
