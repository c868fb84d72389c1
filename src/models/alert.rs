use serde::{Deserialize, Serialize};

/// An active billing alert. The alarm name doubles as the identifier of the
/// mirrored provider-side alarm; both are derived from the threshold, so two
/// alerts with the same threshold share one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDescriptor {
    #[serde(rename = "AlarmName")]
    pub alarm_name: String,
    #[serde(rename = "Threshold")]
    pub threshold: f64,
}

impl AlertDescriptor {
    pub fn from_threshold(threshold: f64) -> Self {
        Self {
            alarm_name: Self::name_for_threshold(threshold),
            threshold,
        }
    }

    pub fn name_for_threshold(threshold: f64) -> String {
        format!("BillingThresholdAlarm_{threshold}")
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_deterministic() {
        let a = AlertDescriptor::from_threshold(100.0);
        let b = AlertDescriptor::from_threshold(100.0);
        assert_eq!(a.alarm_name, b.alarm_name);
        assert_eq!(a.alarm_name, "BillingThresholdAlarm_100");
    }
}
