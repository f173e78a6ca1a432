use crate::config::write_json_atomic;
use crate::pet::Pet;
use crate::rules::Rules;
use crate::snapshot::SaveFile;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::{fs, path::Path};
use tracing::{info, warn};

/// Load the saved pet, or hatch a fresh egg when there is no usable save.
/// Also returns when the save was last written, for catch-up.
pub fn load_or_init_save(path: &Path, rules: &Rules, seed: u64) -> (Pet, Option<DateTime<Utc>>) {
    let Ok(s) = fs::read_to_string(path) else {
        info!(path = %path.display(), "no save found, starting a new egg");
        return (Pet::new(rules, seed), None);
    };
    match serde_json::from_str::<SaveFile>(&s) {
        Ok(save) => {
            info!(version = save.version, stage = %save.pet.stage, "save loaded");
            (Pet::from_snapshot(save.pet, rules, seed), Some(save.last_seen_utc))
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "save unreadable, starting a new egg");
            (Pet::new(rules, seed), None)
        }
    }
}

pub fn save_atomic(path: &Path, pet: &Pet, now: DateTime<Utc>) -> Result<()> {
    write_json_atomic(path, &SaveFile::new(pet.to_snapshot(), now))
}
