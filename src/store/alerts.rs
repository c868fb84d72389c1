use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::AlertDescriptor;

/// Backing storage for active alert descriptors. The registry owns one of
/// these behind a trait object so a database-backed store can replace the
/// in-memory default without touching the operation contract.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Register a descriptor. An existing entry with the same alarm name is
    /// replaced in place (keeping its creation-order position) and returned.
    async fn insert(&self, alert: AlertDescriptor) -> Option<AlertDescriptor>;

    /// All descriptors in creation order.
    async fn list(&self) -> Vec<AlertDescriptor>;

    /// Remove and return the descriptor with this alarm name, if present.
    async fn remove(&self, alarm_name: &str) -> Option<AlertDescriptor>;
}

/// Process-local store. Alerts do not survive a restart; the provider-side
/// alarms do, and there is no reconciliation on startup.
#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<AlertDescriptor>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn insert(&self, alert: AlertDescriptor) -> Option<AlertDescriptor> {
        let mut alerts = self.alerts.write().await;
        match alerts.iter().position(|a| a.alarm_name == alert.alarm_name) {
            Some(pos) => Some(std::mem::replace(&mut alerts[pos], alert)),
            None => {
                alerts.push(alert);
                None
            }
        }
    }

    async fn list(&self) -> Vec<AlertDescriptor> {
        self.alerts.read().await.clone()
    }

    async fn remove(&self, alarm_name: &str) -> Option<AlertDescriptor> {
        let mut alerts = self.alerts.write().await;
        let pos = alerts.iter().position(|a| a.alarm_name == alarm_name)?;
        Some(alerts.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_list_remove() {
        let store = InMemoryAlertStore::new();
        store.insert(AlertDescriptor::from_threshold(100.0)).await;
        store.insert(AlertDescriptor::from_threshold(250.0)).await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].threshold, 100.0);
        assert_eq!(listed[1].threshold, 250.0);

        let removed = store.remove(&listed[0].alarm_name).await;
        assert!(removed.is_some());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_same_name_overwrites_in_place() {
        let store = InMemoryAlertStore::new();
        store.insert(AlertDescriptor::from_threshold(100.0)).await;
        store.insert(AlertDescriptor::from_threshold(250.0)).await;

        let replaced = store.insert(AlertDescriptor::from_threshold(100.0)).await;
        assert!(replaced.is_some());

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        // Overwrite keeps the original creation-order slot.
        assert_eq!(listed[0].threshold, 100.0);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let store = InMemoryAlertStore::new();
        assert!(store.remove("BillingThresholdAlarm_9000").await.is_none());
        assert!(store.list().await.is_empty());
    }
}
