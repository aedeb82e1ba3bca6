//! Role assignment
//!
//! Picks the imposters and the secret item for a game. The secret item comes
//! from the first strategy in `ITEM_STRATEGIES` that yields one.

use super::GameNotice;
use crate::options::{GameOptions, OptionsSnapshot};
use crate::types::*;
use rand::seq::{index, IndexedRandom};
use rand::Rng;

/// One way of choosing the secret item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStrategy {
    /// Random item from the configured category
    ExactCategory,
    /// Random item from all categories combined
    GlobalPool,
    /// `DEFAULT_SECRET_ITEM`
    SentinelDefault,
}

/// Strategies in the order they are attempted
pub const ITEM_STRATEGIES: [ItemStrategy; 3] = [
    ItemStrategy::ExactCategory,
    ItemStrategy::GlobalPool,
    ItemStrategy::SentinelDefault,
];

impl ItemStrategy {
    fn pick<R: Rng + ?Sized>(
        &self,
        category: &str,
        options: &GameOptions,
        rng: &mut R,
    ) -> Option<String> {
        match self {
            ItemStrategy::ExactCategory => options.category(category).choose(rng).cloned(),
            ItemStrategy::GlobalPool => {
                let pool: Vec<&String> = options.all_items().collect();
                pool.choose(rng).map(|item| (*item).clone())
            }
            ItemStrategy::SentinelDefault => Some(DEFAULT_SECRET_ITEM.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentResult {
    pub assignment: RoundAssignment,
    /// Which strategy produced the secret item
    pub strategy: ItemStrategy,
    /// Set when a fallback strategy had to be used, unless the failed
    /// fetch behind it has already been announced
    pub notice: Option<GameNotice>,
}

/// Choose imposters and the secret item for a new game.
///
/// Imposters are `imposter_count` distinct indices sampled uniformly from
/// `0..player_count`.
pub fn assign_roles<R: Rng + ?Sized>(
    config: &GameConfiguration,
    snapshot: &OptionsSnapshot,
    rng: &mut R,
) -> RoleAssignmentResult {
    let amount = config.imposter_count().min(config.player_count());
    let imposter_indices = index::sample(rng, config.player_count(), amount)
        .into_iter()
        .collect();

    let (strategy, secret_item) = ITEM_STRATEGIES
        .iter()
        .find_map(|strategy| {
            strategy
                .pick(config.category(), &snapshot.options, rng)
                .map(|item| (*strategy, item))
        })
        .unwrap_or((ItemStrategy::SentinelDefault, DEFAULT_SECRET_ITEM.to_string()));

    let notice = match strategy {
        ItemStrategy::ExactCategory => None,
        ItemStrategy::GlobalPool => {
            tracing::info!(
                "No options for category '{}', using the pooled list",
                config.category()
            );
            Some(GameNotice::EmptyCategoryOptions {
                category: config.category().to_string(),
            })
        }
        ItemStrategy::SentinelDefault => {
            tracing::warn!("No game options available, using '{}'", DEFAULT_SECRET_ITEM);
            // A failed fetch was already announced when it resolved
            snapshot
                .fetch_error
                .is_none()
                .then_some(GameNotice::NoOptionsAvailable)
        }
    };

    RoleAssignmentResult {
        assignment: RoundAssignment {
            imposter_indices,
            secret_item,
        },
        strategy,
        notice,
    }
}
