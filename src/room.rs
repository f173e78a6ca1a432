use crate::personality::BasePersonality;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASIC_ROOM_ID: &str = "style1";

/// Room decoration. Themed rooms leave a decoration memory when chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Room {
    #[default]
    Basic,
    Themed(BasePersonality),
}

impl Room {
    pub const ALL: [Room; 6] = [
        Room::Basic,
        Room::Themed(BasePersonality::Anxious),
        Room::Themed(BasePersonality::Edgy),
        Room::Themed(BasePersonality::Geek),
        Room::Themed(BasePersonality::Intelectual),
        Room::Themed(BasePersonality::Sassy),
    ];

    pub fn id(self) -> &'static str {
        match self {
            Room::Basic => BASIC_ROOM_ID,
            Room::Themed(p) => p.as_str(),
        }
    }

    pub fn theme(self) -> Option<BasePersonality> {
        match self {
            Room::Themed(p) if !p.is_neutral() => Some(p),
            _ => None,
        }
    }

    /// The room after this one in [`Room::ALL`], wrapping around.
    pub fn cycle(self) -> Room {
        let idx = Room::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Room::ALL[(idx + 1) % Room::ALL.len()]
    }
}

impl From<String> for Room {
    fn from(id: String) -> Self {
        match id.parse::<BasePersonality>() {
            Ok(p) if !p.is_neutral() => Room::Themed(p),
            _ => Room::Basic,
        }
    }
}

impl From<Room> for String {
    fn from(room: Room) -> Self {
        room.id().to_string()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
