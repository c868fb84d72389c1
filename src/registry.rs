//! Alert registry: the single owner of active alert descriptors, keeping the
//! provider-side alarms in sync on create and delete.

use std::sync::Arc;

use crate::models::AlertDescriptor;
use crate::providers::{AlarmProvider, NotificationProvider, ProviderError};
use crate::store::AlertStore;

pub struct AlertRegistry {
    store: Arc<dyn AlertStore>,
    alarms: Arc<dyn AlarmProvider>,
    notifier: Arc<dyn NotificationProvider>,
}

impl AlertRegistry {
    pub fn new(
        store: Arc<dyn AlertStore>,
        alarms: Arc<dyn AlarmProvider>,
        notifier: Arc<dyn NotificationProvider>,
    ) -> Self {
        Self {
            store,
            alarms,
            notifier,
        }
    }

    /// Register an alert and create the matching provider-side alarm.
    ///
    /// Atomic from the caller's view: if the alarm provider rejects the
    /// alarm, the local registration is undone (restoring any descriptor it
    /// overwrote) before the error is returned. A creation with the same
    /// threshold as an existing alert reuses its identifier and overwrites
    /// the entry.
    pub async fn create(&self, threshold: f64) -> Result<AlertDescriptor, ProviderError> {
        let descriptor = AlertDescriptor::from_threshold(threshold);
        let name = descriptor.alarm_name.clone();

        let replaced = self.store.insert(descriptor.clone()).await;

        if let Err(e) = self.alarms.create_alarm(&name, threshold).await {
            match replaced {
                Some(previous) => {
                    self.store.insert(previous).await;
                }
                None => {
                    self.store.remove(&name).await;
                }
            }
            return Err(e);
        }

        tracing::info!(alarm_name = %name, threshold, "billing alert created");

        self.notifier
            .publish(
                "Billing Alert Created",
                &format!("A billing alert has been created with a threshold of ${threshold}."),
            )
            .await?;

        Ok(descriptor)
    }

    /// Active descriptors in creation order.
    pub async fn list(&self) -> Vec<AlertDescriptor> {
        self.store.list().await
    }

    /// Drop the local descriptor (no-op when absent) and delete the
    /// provider-side alarm.
    pub async fn delete(&self, alarm_name: &str) -> Result<(), ProviderError> {
        self.store.remove(alarm_name).await;
        self.alarms.delete_alarm(alarm_name).await?;
        tracing::info!(alarm_name, "billing alert deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::store::InMemoryAlertStore;

    #[derive(Default)]
    struct MockAlarms {
        fail_create: AtomicBool,
        created: AtomicUsize,
        deleted: AtomicUsize,
    }

    #[async_trait]
    impl AlarmProvider for MockAlarms {
        async fn create_alarm(&self, _name: &str, _threshold: f64) -> Result<(), ProviderError> {
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(ProviderError::Alarm("simulated outage".into()));
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_alarm(&self, _name: &str) -> Result<(), ProviderError> {
            self.deleted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        published: AtomicUsize,
    }

    #[async_trait]
    impl NotificationProvider for MockNotifier {
        async fn publish(&self, _subject: &str, _message: &str) -> Result<(), ProviderError> {
            self.published.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn registry() -> (Arc<MockAlarms>, Arc<MockNotifier>, AlertRegistry) {
        let alarms = Arc::new(MockAlarms::default());
        let notifier = Arc::new(MockNotifier::default());
        let registry = AlertRegistry::new(
            Arc::new(InMemoryAlertStore::new()),
            alarms.clone(),
            notifier.clone(),
        );
        (alarms, notifier, registry)
    }

    #[tokio::test]
    async fn test_create_list_delete_lifecycle() {
        let (alarms, notifier, registry) = registry();

        let created = registry.create(100.0).await.unwrap();
        let listed = registry.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].threshold, 100.0);
        assert_eq!(notifier.published.load(Ordering::SeqCst), 1);

        registry.delete(&created.alarm_name).await.unwrap();
        assert!(registry.list().await.is_empty());
        assert_eq!(alarms.deleted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_threshold_keeps_single_entry() {
        let (alarms, _, registry) = registry();

        registry.create(100.0).await.unwrap();
        registry.create(100.0).await.unwrap();

        assert_eq!(registry.list().await.len(), 1);
        // The provider call is repeated on overwrite.
        assert_eq!(alarms.created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_rolls_back_registration() {
        let (alarms, notifier, registry) = registry();
        alarms.fail_create.store(true, Ordering::SeqCst);

        assert!(registry.create(100.0).await.is_err());
        assert!(registry.list().await.is_empty());
        assert_eq!(notifier.published.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_overwrite_restores_previous_entry() {
        let (alarms, _, registry) = registry();

        registry.create(100.0).await.unwrap();
        alarms.fail_create.store(true, Ordering::SeqCst);
        assert!(registry.create(100.0).await.is_err());

        let listed = registry.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].threshold, 100.0);
    }

    #[tokio::test]
    async fn test_delete_unknown_name_still_succeeds() {
        let (alarms, _, registry) = registry();
        registry.delete("BillingThresholdAlarm_9000").await.unwrap();
        assert_eq!(alarms.deleted.load(Ordering::SeqCst), 1);
    }
}
