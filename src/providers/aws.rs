//! AWS-backed collaborator implementations: Cost Explorer for billing data,
//! CloudWatch for threshold alarms, SNS for notifications.

use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{ComparisonOperator, StandardUnit, Statistic};
use aws_sdk_costexplorer::types::{DateInterval, GroupDefinition, GroupDefinitionType, ResultByTime};
use chrono::NaiveDate;

use crate::models::{BillingPeriodRecord, InvalidRecordError, ServiceCost};
use crate::providers::{
    AlarmProvider, BillingDataSource, Granularity, NotificationProvider, ProviderError,
};

/// Cost-accounting metric requested from Cost Explorer. Whichever convention
/// the account reports is treated as the authoritative per-period amount.
const COST_METRIC: &str = "BlendedCost";

const BILLING_METRIC_NAME: &str = "EstimatedCharges";
const BILLING_NAMESPACE: &str = "AWS/Billing";

pub struct CostExplorerSource {
    client: aws_sdk_costexplorer::Client,
}

impl CostExplorerSource {
    pub fn new(client: aws_sdk_costexplorer::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BillingDataSource for CostExplorerSource {
    async fn query_costs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BillingPeriodRecord>, ProviderError> {
        let period = DateInterval::builder()
            .start(start.format("%Y-%m-%d").to_string())
            .end(end.format("%Y-%m-%d").to_string())
            .build()
            .map_err(|e| ProviderError::Billing(e.to_string()))?;

        let sdk_granularity = match granularity {
            Granularity::Daily => aws_sdk_costexplorer::types::Granularity::Daily,
            Granularity::Monthly => aws_sdk_costexplorer::types::Granularity::Monthly,
        };

        let response = self
            .client
            .get_cost_and_usage()
            .time_period(period)
            .granularity(sdk_granularity)
            .metrics(COST_METRIC)
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key("SERVICE")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ProviderError::Billing(e.to_string()))?;

        response
            .results_by_time()
            .iter()
            .map(parse_result)
            .collect::<Result<Vec<_>, InvalidRecordError>>()
            .map_err(ProviderError::from)
    }
}

fn parse_result(result: &ResultByTime) -> Result<BillingPeriodRecord, InvalidRecordError> {
    let (period_start, period_end) = match result.time_period() {
        Some(period) => (
            Some(parse_date(period.start())?),
            Some(parse_date(period.end())?),
        ),
        None => (None, None),
    };

    let total_cost = match result
        .total()
        .and_then(|metrics| metrics.get(COST_METRIC))
        .and_then(|value| value.amount())
    {
        Some(raw) => Some(parse_amount(raw)?),
        None => None,
    };

    let mut service_costs = Vec::new();
    for group in result.groups() {
        let Some(service) = group.keys().first() else {
            continue;
        };
        // Groups without the requested metric carry no usable amount.
        let Some(raw) = group
            .metrics()
            .and_then(|metrics| metrics.get(COST_METRIC))
            .and_then(|value| value.amount())
        else {
            continue;
        };
        service_costs.push(ServiceCost {
            service: service.clone(),
            amount: parse_amount(raw)?,
        });
    }

    Ok(BillingPeriodRecord {
        period_start,
        period_end,
        total_cost,
        service_costs,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, InvalidRecordError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| InvalidRecordError {
        reason: format!("unparseable period date '{raw}': {e}"),
    })
}

fn parse_amount(raw: &str) -> Result<f64, InvalidRecordError> {
    raw.parse().map_err(|_| InvalidRecordError {
        reason: format!("unparseable cost amount '{raw}'"),
    })
}

pub struct CloudWatchAlarms {
    client: aws_sdk_cloudwatch::Client,
    sns_topic_arn: String,
}

impl CloudWatchAlarms {
    pub fn new(client: aws_sdk_cloudwatch::Client, sns_topic_arn: String) -> Self {
        Self {
            client,
            sns_topic_arn,
        }
    }
}

#[async_trait]
impl AlarmProvider for CloudWatchAlarms {
    async fn create_alarm(&self, name: &str, threshold: f64) -> Result<(), ProviderError> {
        self.client
            .put_metric_alarm()
            .alarm_name(name)
            .metric_name(BILLING_METRIC_NAME)
            .namespace(BILLING_NAMESPACE)
            .statistic(Statistic::Maximum)
            .period(3600)
            .evaluation_periods(1)
            .threshold(threshold)
            .comparison_operator(ComparisonOperator::GreaterThanOrEqualToThreshold)
            .actions_enabled(true)
            .alarm_actions(&self.sns_topic_arn)
            .unit(StandardUnit::None)
            .send()
            .await
            .map_err(|e| ProviderError::Alarm(e.to_string()))?;
        Ok(())
    }

    async fn delete_alarm(&self, name: &str) -> Result<(), ProviderError> {
        self.client
            .delete_alarms()
            .alarm_names(name)
            .send()
            .await
            .map_err(|e| ProviderError::Alarm(e.to_string()))?;
        Ok(())
    }
}

pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl NotificationProvider for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), ProviderError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| ProviderError::Notification(e.to_string()))?;
        Ok(())
    }
}
