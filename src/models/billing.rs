use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cost attributed to a single service within one reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: String,
    pub amount: f64,
}

/// One reporting interval as returned by the billing data source.
///
/// The provider may omit the period-level total, in which case the effective
/// total is the sum of the per-service amounts. Dates are optional because
/// the upstream response carries them as free-form fields; a record without
/// both dates is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPeriodRecord {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub total_cost: Option<f64>,
    pub service_costs: Vec<ServiceCost>,
}

impl BillingPeriodRecord {
    pub fn validate(&self) -> Result<(), InvalidRecordError> {
        let (start, end) = match (self.period_start, self.period_end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(InvalidRecordError {
                    reason: "missing period start or end date".into(),
                })
            }
        };
        if start >= end {
            return Err(InvalidRecordError {
                reason: format!("period start {start} is not before end {end}"),
            });
        }
        Ok(())
    }

    /// Period total, falling back to the sum of per-service amounts when the
    /// provider did not report one.
    pub fn effective_total(&self) -> f64 {
        self.total_cost
            .unwrap_or_else(|| self.service_costs.iter().map(|sc| sc.amount).sum())
    }

    pub fn period_label(&self) -> Option<String> {
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            _ => None,
        }
    }
}

/// A billing record the provider returned in a shape we cannot aggregate.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid billing record: {reason}")]
pub struct InvalidRecordError {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub historical: Vec<f64>,
    pub forecast: Vec<f64>,
    pub months: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PeriodCost {
    pub period: String,
    pub total_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct ForecastPoint {
    pub month: String,
    pub forecasted_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub historical: Vec<PeriodCost>,
    pub cost_breakdown: HashMap<String, f64>,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Serialize)]
pub struct BillingSuggestion {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Suggestion")]
    pub suggestion: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    #[serde(rename = "billingSuggestions")]
    pub billing_suggestions: Vec<BillingSuggestion>,
    #[serde(rename = "trustedAdvisorMessage")]
    pub trusted_advisor_message: String,
}
