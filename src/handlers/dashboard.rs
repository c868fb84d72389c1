use axum::{extract::State, Json};
use chrono::{Duration, Utc};

use crate::analytics::forecast::{forecast_costs, month_labels};
use crate::analytics::normalize::normalize;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::{DashboardResponse, ForecastPoint, ForecastResponse, PeriodCost};
use crate::providers::Granularity;

/// Historical totals and the extrapolated trend, as parallel arrays.
pub async fn get_forecast(
    State(state): State<AppState>,
) -> Result<Json<ForecastResponse>, AppError> {
    let today = Utc::now().date_naive();
    let start = today - Duration::days(state.forecast.lookback_days);

    let records = state
        .billing
        .query_costs(start, today, Granularity::Monthly)
        .await?;
    let costs = normalize(&records)?;

    let forecast =
        forecast_costs(&costs.totals, state.forecast.horizon).map_err(AppError::internal)?;
    let months = month_labels(today, state.forecast.horizon);

    Ok(Json(ForecastResponse {
        historical: costs.totals,
        forecast,
        months,
    }))
}

/// Everything the dashboard landing page needs in one response: labelled
/// period totals, the full service breakdown, and the forecast points.
pub async fn get_dashboard_data(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = Utc::now().date_naive();
    let start = today - Duration::days(state.forecast.lookback_days);

    let records = state
        .billing
        .query_costs(start, today, Granularity::Monthly)
        .await?;
    let costs = normalize(&records)?;

    let mut historical = Vec::with_capacity(records.len());
    for (record, total) in records.iter().zip(&costs.totals) {
        let period = record
            .period_label()
            .ok_or_else(|| AppError::internal("billing record missing period dates"))?;
        historical.push(PeriodCost {
            period,
            total_cost: *total,
        });
    }

    let predictions =
        forecast_costs(&costs.totals, state.forecast.horizon).map_err(AppError::internal)?;
    let forecast = month_labels(today, state.forecast.horizon)
        .into_iter()
        .zip(predictions)
        .map(|(month, forecasted_cost)| ForecastPoint {
            month,
            forecasted_cost,
        })
        .collect();

    Ok(Json(DashboardResponse {
        historical,
        cost_breakdown: costs.by_service,
        forecast,
    }))
}
