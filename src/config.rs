use crate::notify::NotificationSettings;
use crate::sim::TimeMode;
use crate::sleep::SleepSchedule;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps_cap: u32,
    pub enable_color: bool,
    pub seed: u64,
    pub time_mode: TimeMode,
    pub sleep: SleepSchedule,
    pub notifications: NotificationSettings,
    pub has_completed_initial_setup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            enable_color: true,
            seed: DEFAULT_SEED,
            time_mode: TimeMode::RealTime,
            sleep: SleepSchedule::default(),
            notifications: NotificationSettings::default(),
            has_completed_initial_setup: false,
        }
    }
}

impl Settings {
    /// First-run choices: bedtime hours and whether the schedule runs itself.
    pub fn complete_initial_setup(
        &mut self,
        sleep_hour: u32,
        wake_hour: u32,
        automatic: bool,
    ) -> Result<(), crate::error::SettingsError> {
        self.sleep.set_schedule(sleep_hour, wake_hour)?;
        self.sleep.set_automatic(automatic);
        self.has_completed_initial_setup = true;
        Ok(())
    }
}

pub struct Paths {
    pub save_path: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            save_path: dir.join("save.json"),
            settings_path: dir.join("settings.json"),
            log_path: dir.join("mochigotchi.log"),
        }
    }
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "mochigotchi", "Mochigotchi")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create data dir {}", dir.display()))?;
    Ok(Paths::in_dir(&dir))
}

/// Missing, unreadable or invalid settings fall back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(mut v) => {
            if let Err(e) = v.sleep.validate() {
                warn!(error = %e, "bad sleep schedule in settings, using default");
                v.sleep = SleepSchedule::default();
            }
            v
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "unreadable settings, using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    write_json_atomic(path, s)
}

pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)
}

pub(crate) fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename() does not replace an existing file everywhere.
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to).with_context(|| format!("renaming into {}", to.display()))?;
    Ok(())
}
