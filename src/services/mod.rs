//! Services module
//!
//! This module contains the business logic services: group lifecycle,
//! payout rotation, payment processing and role management.

pub mod gateway;
pub mod group;
pub mod locks;
pub mod payment;
pub mod payout;
pub mod provisioning;
pub mod user;

// Re-export commonly used services
pub use gateway::{GatewayError, PaymentGateway, SimulatedGateway, TransferReceipt, TransferRequest};
pub use group::GroupService;
pub use locks::GroupLocks;
pub use payment::{PaymentRecord, PaymentRequest, PaymentService, PayoutRequest};
pub use payout::PayoutService;
pub use user::UserService;

use std::sync::Arc;

use crate::config::Settings;
use crate::database::Stores;

/// Service factory for creating and managing all services.
///
/// All group-mutating services share one [`GroupLocks`] registry so joins,
/// removals and rotations on the same group serialize against each other.
#[derive(Clone)]
pub struct ServiceFactory {
    pub group_service: GroupService,
    pub payout_service: PayoutService,
    pub payment_service: PaymentService,
    pub user_service: UserService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory over the given stores and gateway.
    pub fn new(stores: Stores, gateway: Arc<dyn PaymentGateway>) -> Self {
        let locks = GroupLocks::new();

        let group_service = GroupService::new(
            stores.groups.clone(),
            stores.memberships.clone(),
            locks.clone(),
        );
        let payout_service =
            PayoutService::new(stores.groups.clone(), stores.cycles.clone(), locks);
        let payment_service = PaymentService::new(
            stores.transactions.clone(),
            stores.users.clone(),
            gateway,
        );
        let user_service = UserService::new(stores.users);

        Self {
            group_service,
            payout_service,
            payment_service,
            user_service,
        }
    }

    /// Factory wired with the simulated gateway configured from settings.
    pub fn with_simulated_gateway(stores: Stores, settings: &Settings) -> Self {
        let gateway = Arc::new(SimulatedGateway::from_config(&settings.payment));
        Self::new(stores, gateway)
    }
}
