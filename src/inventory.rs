use crate::ingredient::{Ingredient, Tier};
use crate::personality::BasePersonality;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Counted multiset of ingredients keyed by identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
}

impl Default for Inventory {
    /// One tier-1 ingredient of every flavored personality.
    fn default() -> Self {
        let mut inv = Self::empty();
        for p in BasePersonality::FLAVORED {
            inv.add(Ingredient::new(p, Tier::T1), 1);
        }
        inv
    }
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, ingredient: Ingredient, quantity: u32) {
        let slot = self.counts.entry(ingredient.identifier()).or_insert(0);
        *slot = slot.saturating_add(quantity);
        debug!(id = %ingredient, quantity, total = *slot, "inventory add");
    }

    pub fn has(&self, id: &str) -> bool {
        self.quantity(id) > 0
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Take one unit. `false` when none are left.
    pub fn consume(&mut self, id: &str) -> bool {
        match self.counts.get_mut(id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                debug!(id, remaining = *n, "inventory consume");
                true
            }
            _ => false,
        }
    }

    /// Stocked ingredients with their counts. Unknown identifiers from an
    /// old save are skipped.
    pub fn entries(&self) -> Vec<(Ingredient, u32)> {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .filter_map(|(id, n)| Ingredient::parse_identifier(id).map(|i| (i, *n)))
            .collect()
    }
}
