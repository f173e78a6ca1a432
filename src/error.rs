use thiserror::Error;

/// Why a meal was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedError {
    #[error("eggs cannot eat")]
    IsEgg,
    #[error("already full")]
    Full,
    #[error("ingredient not in inventory")]
    NoIngredient,
}

impl FeedError {
    /// Stable tag for the rejection.
    pub fn reason(self) -> &'static str {
        match self {
            FeedError::IsEgg => "is_egg",
            FeedError::Full => "full",
            FeedError::NoIngredient => "no_ingredient",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} hour must be between 0 and 23, got {hour}")]
    HourOutOfRange { field: &'static str, hour: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown personality `{0}`")]
pub struct UnknownPersonality(pub String);
