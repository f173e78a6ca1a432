//! Personality labels. The six base tags are a closed enum; archetype and
//! final names produced by evolution are open strings.

use crate::error::UnknownPersonality;
use crate::evolution;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasePersonality {
    Neutral,
    Anxious,
    Edgy,
    Geek,
    Sassy,
    Intelectual,
}

impl BasePersonality {
    pub const ALL: [BasePersonality; 6] = [
        BasePersonality::Neutral,
        BasePersonality::Anxious,
        BasePersonality::Edgy,
        BasePersonality::Geek,
        BasePersonality::Sassy,
        BasePersonality::Intelectual,
    ];

    /// Tags that leave memories and come as inventory items.
    pub const FLAVORED: [BasePersonality; 5] = [
        BasePersonality::Anxious,
        BasePersonality::Edgy,
        BasePersonality::Geek,
        BasePersonality::Sassy,
        BasePersonality::Intelectual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BasePersonality::Neutral => "neutral",
            BasePersonality::Anxious => "anxious",
            BasePersonality::Edgy => "edgy",
            BasePersonality::Geek => "geek",
            BasePersonality::Sassy => "sassy",
            BasePersonality::Intelectual => "intelectual",
        }
    }

    pub fn is_neutral(self) -> bool {
        self == BasePersonality::Neutral
    }
}

impl fmt::Display for BasePersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasePersonality {
    type Err = UnknownPersonality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BasePersonality::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPersonality(s.to_string()))
    }
}

/// The pet's current personality: a base tag after the first evolution,
/// an archetype or final name after that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Personality {
    Base(BasePersonality),
    Named(String),
}

impl Personality {
    pub fn from_name(name: &str) -> Self {
        match name.parse::<BasePersonality>() {
            Ok(base) => Personality::Base(base),
            Err(_) => Personality::Named(name.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Personality::Base(base) => base.as_str(),
            Personality::Named(name) => name,
        }
    }

    /// Base tag used for sprites and flavor: the tag itself, or the one an
    /// archetype/final name maps to.
    pub fn base(&self) -> Option<BasePersonality> {
        match self {
            Personality::Base(base) => Some(*base),
            Personality::Named(name) => evolution::base_personality_of(name),
        }
    }

    pub fn is_neglected(&self) -> bool {
        evolution::same_name(self.name(), evolution::NEGLECTED)
    }
}

impl From<BasePersonality> for Personality {
    fn from(base: BasePersonality) -> Self {
        Personality::Base(base)
    }
}

impl From<String> for Personality {
    fn from(name: String) -> Self {
        Personality::from_name(&name)
    }
}

impl From<Personality> for String {
    fn from(p: Personality) -> Self {
        match p {
            Personality::Base(base) => base.as_str().to_string(),
            Personality::Named(name) => name,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
