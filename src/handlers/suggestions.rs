use axum::{extract::State, Json};
use chrono::{Duration, Utc};

use crate::analytics::normalize::normalize;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::{BillingSuggestion, SuggestionsResponse};
use crate::providers::Granularity;

const TRUSTED_ADVISOR_MESSAGE: &str = "AWS Trusted Advisor requires a Premium Support Plan. \
     Please upgrade your account to access Trusted Advisor suggestions.";

/// Billing suggestions plus the Trusted Advisor placeholder message.
pub async fn get_suggestions(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let billing_suggestions = service_suggestions(
        &state,
        "Review usage of {service} for potential cost optimization.",
    )
    .await?;

    Ok(Json(SuggestionsResponse {
        billing_suggestions,
        trusted_advisor_message: TRUSTED_ADVISOR_MESSAGE.into(),
    }))
}

/// Per-service spend for the last month, as a bare suggestion list.
pub async fn get_billing_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillingSuggestion>>, AppError> {
    let suggestions =
        service_suggestions(&state, "Review usage of {service} for optimization.").await?;
    Ok(Json(suggestions))
}

/// Query the suggestion window and shape one entry per service with positive
/// spend, most expensive first. Services with zero or negative cost (credits,
/// refunds) are not worth a suggestion and are dropped here; the dashboard
/// breakdown keeps them.
async fn service_suggestions(
    state: &AppState,
    template: &str,
) -> Result<Vec<BillingSuggestion>, AppError> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(state.forecast.suggestion_days);

    let records = state
        .billing
        .query_costs(start, end, Granularity::Monthly)
        .await?;
    let costs = normalize(&records)?;

    let mut ranked: Vec<(String, f64)> = costs
        .by_service
        .into_iter()
        .filter(|(_, cost)| *cost > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(ranked
        .into_iter()
        .map(|(service, cost)| BillingSuggestion {
            suggestion: template.replace("{service}", &service),
            cost: format!("${cost:.2}"),
            service,
        })
        .collect())
}
