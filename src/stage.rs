use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum LifeStage {
    #[default]
    Egg,
    Baby,
    Child,
    Young,
    Adult,
    ReadyToAscend,
    Dead,
}

impl LifeStage {
    /// The stage reached by growing out of this one.
    pub fn next(self) -> Option<LifeStage> {
        match self {
            LifeStage::Egg => Some(LifeStage::Baby),
            LifeStage::Baby => Some(LifeStage::Child),
            LifeStage::Child => Some(LifeStage::Young),
            LifeStage::Young => Some(LifeStage::Adult),
            LifeStage::Adult => Some(LifeStage::ReadyToAscend),
            LifeStage::ReadyToAscend | LifeStage::Dead => None,
        }
    }

    /// Egg and Dead do not decay, grow or accrue neglect.
    pub fn is_inert(self) -> bool {
        matches!(self, LifeStage::Egg | LifeStage::Dead)
    }

    pub fn label(self) -> &'static str {
        match self {
            LifeStage::Egg => "Egg",
            LifeStage::Baby => "Baby",
            LifeStage::Child => "Child",
            LifeStage::Young => "Young",
            LifeStage::Adult => "Adult",
            LifeStage::ReadyToAscend => "Ready to ascend",
            LifeStage::Dead => "Dead",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per life stage, looked up by [`StageTable::get`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct StageTable<T> {
    pub egg: T,
    pub baby: T,
    pub child: T,
    pub young: T,
    pub adult: T,
    pub ready_to_ascend: T,
    pub dead: T,
}

impl<T: Copy> StageTable<T> {
    pub const fn new(
        egg: T,
        baby: T,
        child: T,
        young: T,
        adult: T,
        ready_to_ascend: T,
        dead: T,
    ) -> Self {
        Self {
            egg,
            baby,
            child,
            young,
            adult,
            ready_to_ascend,
            dead,
        }
    }

    pub fn get(&self, stage: LifeStage) -> T {
        match stage {
            LifeStage::Egg => self.egg,
            LifeStage::Baby => self.baby,
            LifeStage::Child => self.child,
            LifeStage::Young => self.young,
            LifeStage::Adult => self.adult,
            LifeStage::ReadyToAscend => self.ready_to_ascend,
            LifeStage::Dead => self.dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(LifeStage::Egg < LifeStage::Baby);
        assert!(LifeStage::Adult < LifeStage::ReadyToAscend);
        assert!(LifeStage::ReadyToAscend < LifeStage::Dead);
    }

    #[test]
    fn test_next_stops_at_ready_to_ascend() {
        let mut stage = LifeStage::Egg;
        let mut steps = 0;
        while let Some(next) = stage.next() {
            stage = next;
            steps += 1;
        }
        assert_eq!(stage, LifeStage::ReadyToAscend);
        assert_eq!(steps, 5);
        assert_eq!(LifeStage::Dead.next(), None);
    }

    #[test]
    fn test_inert_stages() {
        assert!(LifeStage::Egg.is_inert());
        assert!(LifeStage::Dead.is_inert());
        assert!(!LifeStage::Baby.is_inert());
        assert!(!LifeStage::ReadyToAscend.is_inert());
    }

    #[test]
    fn test_table_lookup() {
        let t = StageTable::new(0, 1, 2, 3, 4, 5, 6);
        assert_eq!(t.get(LifeStage::Egg), 0);
        assert_eq!(t.get(LifeStage::Young), 3);
        assert_eq!(t.get(LifeStage::Dead), 6);
    }
}
