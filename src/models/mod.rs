pub mod alert;
pub mod billing;

pub use alert::{AlertDescriptor, CreateAlertRequest};
pub use billing::{
    BillingPeriodRecord, BillingSuggestion, DashboardResponse, ForecastPoint, ForecastResponse,
    InvalidRecordError, PeriodCost, ServiceCost, SuggestionsResponse,
};
