pub mod aws;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{BillingPeriodRecord, InvalidRecordError};

/// Time-bucket size for billing queries. The dashboard only ever asks for
/// monthly buckets, but the source supports daily reporting too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Monthly,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "DAILY"),
            Self::Monthly => write!(f, "MONTHLY"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("billing data source error: {0}")]
    Billing(String),
    #[error("alarm provider error: {0}")]
    Alarm(String),
    #[error("notification provider error: {0}")]
    Notification(String),
    #[error(transparent)]
    InvalidRecord(#[from] InvalidRecordError),
}

/// Source of raw per-service cost records for a date range.
#[async_trait]
pub trait BillingDataSource: Send + Sync {
    async fn query_costs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BillingPeriodRecord>, ProviderError>;
}

/// Provider-side threshold alarms mirrored by the alert registry.
#[async_trait]
pub trait AlarmProvider: Send + Sync {
    async fn create_alarm(&self, name: &str, threshold: f64) -> Result<(), ProviderError>;
    async fn delete_alarm(&self, name: &str) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), ProviderError>;
}
