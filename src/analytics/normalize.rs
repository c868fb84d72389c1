//! Turns raw per-period billing records into a clean historical total series
//! and a per-service cumulative cost breakdown.

use std::collections::HashMap;

use crate::models::{BillingPeriodRecord, InvalidRecordError};

#[derive(Debug, Clone, Default)]
pub struct NormalizedCosts {
    /// Effective period totals, in input (chronological) order.
    pub totals: Vec<f64>,
    /// Service name -> cumulative cost across all periods.
    pub by_service: HashMap<String, f64>,
}

/// Aggregate an ordered sequence of billing records.
///
/// Pure function: the only failure mode is a malformed record (missing or
/// inverted period dates), which aborts the whole aggregation since the
/// series index would no longer line up with the query's period ordering.
pub fn normalize(records: &[BillingPeriodRecord]) -> Result<NormalizedCosts, InvalidRecordError> {
    let mut normalized = NormalizedCosts {
        totals: Vec::with_capacity(records.len()),
        by_service: HashMap::new(),
    };

    for record in records {
        record.validate()?;
        normalized.totals.push(record.effective_total());

        for sc in &record.service_costs {
            *normalized.by_service.entry(sc.service.clone()).or_insert(0.0) += sc.amount;
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceCost;
    use chrono::NaiveDate;

    fn record(
        start: &str,
        end: &str,
        total: Option<f64>,
        services: &[(&str, f64)],
    ) -> BillingPeriodRecord {
        BillingPeriodRecord {
            period_start: NaiveDate::parse_from_str(start, "%Y-%m-%d").ok(),
            period_end: NaiveDate::parse_from_str(end, "%Y-%m-%d").ok(),
            total_cost: total,
            service_costs: services
                .iter()
                .map(|(name, amount)| ServiceCost {
                    service: (*name).into(),
                    amount: *amount,
                })
                .collect(),
        }
    }

    #[test]
    fn test_total_taken_verbatim_when_present() {
        let records = vec![record(
            "2024-05-01",
            "2024-06-01",
            Some(99.5),
            &[("EC2", 10.0), ("S3", 5.0)],
        )];
        let normalized = normalize(&records).unwrap();
        assert_eq!(normalized.totals, vec![99.5]);
    }

    #[test]
    fn test_missing_total_sums_service_amounts() {
        let records = vec![
            record("2024-05-01", "2024-06-01", None, &[("EC2", 10.0), ("S3", 5.0)]),
            record("2024-06-01", "2024-07-01", None, &[]),
        ];
        let normalized = normalize(&records).unwrap();
        assert_eq!(normalized.totals, vec![15.0, 0.0]);
    }

    #[test]
    fn test_duplicate_service_within_period_accumulates() {
        let records = vec![record(
            "2024-05-01",
            "2024-06-01",
            None,
            &[("EC2", 10.0), ("EC2", 2.5)],
        )];
        let normalized = normalize(&records).unwrap();
        assert_eq!(normalized.totals, vec![12.5]);
        assert_eq!(normalized.by_service["EC2"], 12.5);
    }

    #[test]
    fn test_breakdown_is_order_independent() {
        let a = record("2024-05-01", "2024-06-01", Some(30.0), &[("EC2", 20.0), ("S3", 10.0)]);
        let b = record("2024-06-01", "2024-07-01", Some(12.0), &[("EC2", 7.0), ("Lambda", 5.0)]);

        let forward = normalize(&[a.clone(), b.clone()]).unwrap();
        let reversed = normalize(&[b, a]).unwrap();

        assert_eq!(forward.by_service, reversed.by_service);
        assert_eq!(forward.by_service["EC2"], 27.0);
        assert_eq!(forward.by_service["S3"], 10.0);
        assert_eq!(forward.by_service["Lambda"], 5.0);
    }

    #[test]
    fn test_missing_dates_rejected() {
        let mut broken = record("2024-05-01", "2024-06-01", Some(1.0), &[]);
        broken.period_end = None;
        assert!(normalize(&[broken]).is_err());
    }

    #[test]
    fn test_inverted_period_rejected() {
        let broken = record("2024-06-01", "2024-05-01", Some(1.0), &[]);
        assert!(normalize(&[broken]).is_err());
    }
}
