//! Payout rotation engine
//!
//! Selects the next cycle's winner among eligible members, records the
//! closed cycle in the rotation history and advances the cycle counter.
//!
//! Eligibility excludes only the immediately preceding winner: a member who
//! won two cycles ago is eligible again. This matches the reference
//! behavior and is pending product-owner confirmation against classic
//! ROSCA semantics, where all prior winners sit out until everyone has won
//! once. The cycle history table exists so a stricter rule can be layered
//! on without losing past selections.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::database::{CycleStore, GroupStore};
use crate::models::{Cycle, Group};
use crate::services::locks::GroupLocks;
use crate::utils::errors::{EqubError, Result};

#[derive(Clone)]
pub struct PayoutService {
    groups: Arc<dyn GroupStore>,
    cycles: Arc<dyn CycleStore>,
    locks: GroupLocks,
}

/// Uniform pseudo-random pick among eligible members. Not a security
/// boundary; plain PRNG quality is sufficient here.
pub(crate) fn choose_winner<R: Rng>(eligible: &[Uuid], rng: &mut R) -> Uuid {
    *eligible
        .choose(rng)
        .expect("eligible set checked non-empty before selection")
}

impl PayoutService {
    pub fn new(groups: Arc<dyn GroupStore>, cycles: Arc<dyn CycleStore>, locks: GroupLocks) -> Self {
        Self {
            groups,
            cycles,
            locks,
        }
    }

    /// Advance the group by one cycle: pick the next winner, close the
    /// running cycle in the history table and increment the counter.
    ///
    /// Deliberately not idempotent: calling twice advances twice. Invoking
    /// it at most once per cycle boundary is the caller's responsibility.
    pub async fn rotate_payout(&self, group_id: Uuid) -> Result<Group> {
        let _guard = self.locks.acquire(group_id).await;

        let mut group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EqubError::GroupNotFound { group_id })?;

        let eligible: Vec<Uuid> = group
            .members
            .iter()
            .copied()
            .filter(|m| Some(*m) != group.current_winner)
            .collect();

        if eligible.is_empty() {
            return Err(EqubError::BadRequest(
                "No eligible members for payout".to_string(),
            ));
        }

        let winner = choose_winner(&eligible, &mut rand::thread_rng());
        let closed_cycle = group.current_cycle;
        let pooled = group.amount * group.members.len() as i64;

        self.cycles
            .insert(Cycle::completed(
                group.id,
                closed_cycle,
                winner,
                pooled,
                group.start_date,
            ))
            .await?;

        group.current_winner = Some(winner);
        group.current_cycle += 1;
        let group = self.groups.update(group).await?;

        info!(
            group_id = %group_id,
            winner = %winner,
            cycle = closed_cycle,
            pooled_amount = pooled,
            "Payout rotated"
        );
        Ok(group)
    }

    /// Append-only rotation history, oldest cycle first.
    pub async fn cycle_history(&self, group_id: Uuid) -> Result<Vec<Cycle>> {
        self.cycles.list_for_group(group_id).await
    }
}
