//! Bridge registry
//!
//! Hosts without a DI container register bridges here explicitly and
//! resolve adapters by driver name. Registration order is lookup order.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::{FileStorage, StorageBridge, StorageConfig};

/// Registry of storage bridges keyed by the driver names they support
#[derive(Default)]
pub struct BridgeRegistry {
    bridges: Vec<Arc<dyn StorageBridge>>,
}

impl BridgeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bridge; earlier registrations win on overlap
    pub fn register(&mut self, bridge: Arc<dyn StorageBridge>) {
        self.bridges.push(bridge);
    }

    /// Find the first bridge supporting the given driver name
    pub fn resolve(&self, driver: &str) -> Option<&Arc<dyn StorageBridge>> {
        self.bridges.iter().find(|bridge| bridge.supports(driver))
    }

    /// Construct an adapter for the configuration's driver
    pub async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn FileStorage>> {
        let bridge = self.resolve(&config.driver).ok_or_else(|| {
            Error::Config(format!("no storage bridge for driver '{}'", config.driver))
        })?;
        tracing::debug!(driver = %config.driver, "creating storage adapter");
        bridge.create(config).await
    }
}
