//! Shared test fixtures
//!
//! Builds the full service stack over the in-memory stores with a
//! deterministic gateway, so suites exercise real service logic without a
//! database or live transfer latency.

// Not every suite uses every fixture helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use equb_core::database::{Stores, UserStore};
use equb_core::models::{CreateGroupRequest, Group, User};
use equb_core::services::{PaymentGateway, ServiceFactory, SimulatedGateway};

pub struct TestContext {
    pub stores: Stores,
    pub services: ServiceFactory,
}

impl TestContext {
    /// Stack with a gateway that always settles instantly.
    pub fn new() -> Self {
        Self::with_gateway(Arc::new(SimulatedGateway::new(1.0, Duration::ZERO)))
    }

    /// Stack with a gateway that always declines instantly.
    pub fn with_failing_gateway() -> Self {
        Self::with_gateway(Arc::new(SimulatedGateway::new(0.0, Duration::ZERO)))
    }

    pub fn with_gateway(gateway: Arc<dyn PaymentGateway>) -> Self {
        let stores = Stores::in_memory();
        let services = ServiceFactory::new(stores.clone(), gateway);
        Self { stores, services }
    }

    /// Insert a user directly into the store.
    pub async fn create_user(&self, username: &str) -> User {
        let user = User::new(username, format!("{username}@example.com"));
        self.stores.users.insert(user).await.unwrap()
    }

    /// Create a group through the service, then join `extra_members`
    /// freshly minted users.
    pub async fn create_group(&self, creator: Uuid, extra_members: usize) -> Group {
        let group = self
            .services
            .group_service
            .create_group(CreateGroupRequest {
                name: "test equb".to_string(),
                description: Some("fixture group".to_string()),
                amount: 1000,
                cycle_duration_days: 30,
                creator,
            })
            .await
            .unwrap();

        let mut group = group;
        for _ in 0..extra_members {
            group = self
                .services
                .group_service
                .join_group(group.id, Uuid::new_v4())
                .await
                .unwrap();
        }
        group
    }
}
