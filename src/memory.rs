//! Care-event ledger and the frequency-weighted dominant-memory draw.

use crate::personality::BasePersonality;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Food,
    Minigame,
    Decoration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(rename = "type")]
    pub kind: MemoryKind,
    pub personality: BasePersonality,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of care events. Wiped on every evolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryLedger {
    entries: Vec<MemoryEntry>,
}

impl MemoryLedger {
    pub fn add(&mut self, kind: MemoryKind, personality: BasePersonality) {
        self.entries.push(MemoryEntry {
            kind,
            personality,
            timestamp: Utc::now(),
        });
        debug!(?kind, %personality, total = self.entries.len(), "memory added");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Tag counts in order of first occurrence.
    pub fn frequencies(&self) -> Vec<(BasePersonality, usize)> {
        let mut out: Vec<(BasePersonality, usize)> = Vec::new();
        for e in &self.entries {
            match out.iter_mut().find(|(p, _)| *p == e.personality) {
                Some((_, n)) => *n += 1,
                None => out.push((e.personality, 1)),
            }
        }
        out
    }

    /// Weighted draw: a tag holding 90% of the entries wins about 90% of
    /// the time. `None` only for an empty ledger.
    pub fn select_dominant<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<BasePersonality> {
        let freq = self.frequencies();
        let total = self.entries.len() as f64;
        let r: f64 = rng.gen();

        let mut acc = 0.0;
        for (personality, count) in &freq {
            let share = *count as f64 / total;
            acc += share;
            if r < acc {
                debug!(%personality, count, total, "dominant memory selected");
                return Some(*personality);
            }
        }
        // Float rounding can leave acc a hair under 1.0.
        freq.last().map(|(p, _)| *p)
    }

    /// Percentage share per tag, first-occurrence order.
    pub fn distribution(&self) -> Vec<(BasePersonality, f64)> {
        let total = self.entries.len() as f64;
        self.frequencies()
            .into_iter()
            .map(|(p, n)| (p, n as f64 / total * 100.0))
            .collect()
    }

    pub fn forget_all(&mut self) {
        debug!(count = self.entries.len(), "forgetting memories");
        self.entries.clear();
    }
}
