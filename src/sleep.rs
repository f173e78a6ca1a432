//! Bedtime schedule. While the pet sleeps the live simulation stands
//! still; offline catch-up ignores it.

use crate::error::SettingsError;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const TEMPORARY_WAKE_SECS: i64 = 5 * 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepSchedule {
    sleep_hour: u32,
    wake_hour: u32,
    automatic: bool,
    lights_on: bool,
    sleeping: bool,
    temporary_wake_until: Option<DateTime<Utc>>,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            sleep_hour: 22,
            wake_hour: 7,
            automatic: true,
            lights_on: true,
            sleeping: false,
            temporary_wake_until: None,
        }
    }
}

fn check_hour(field: &'static str, hour: u32) -> Result<(), SettingsError> {
    if hour > 23 {
        return Err(SettingsError::HourOutOfRange { field, hour });
    }
    Ok(())
}

impl SleepSchedule {
    pub fn manual() -> Self {
        Self {
            automatic: false,
            ..Self::default()
        }
    }

    pub fn set_schedule(&mut self, sleep_hour: u32, wake_hour: u32) -> Result<(), SettingsError> {
        check_hour("sleep", sleep_hour)?;
        check_hour("wake", wake_hour)?;
        self.sleep_hour = sleep_hour;
        self.wake_hour = wake_hour;
        Ok(())
    }

    /// Re-check hours read from disk.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_hour("sleep", self.sleep_hour)?;
        check_hour("wake", self.wake_hour)
    }

    /// Whether `hour` falls in the sleep window, which may wrap midnight.
    pub fn is_in_sleep_period(&self, hour: u32) -> bool {
        if self.wake_hour < self.sleep_hour {
            hour >= self.sleep_hour || hour < self.wake_hour
        } else {
            hour >= self.sleep_hour && hour < self.wake_hour
        }
    }

    /// Follow the clock in automatic mode. A temporary wake-up holds the
    /// pet awake until it runs out.
    pub fn time_pass<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        if !self.automatic {
            return;
        }
        let now_utc = now.with_timezone(&Utc);
        if self.temporary_wake_until.is_some_and(|until| now_utc >= until) {
            debug!("temporary wake-up expired");
            self.temporary_wake_until = None;
        }

        let should_sleep = self.is_in_sleep_period(now.hour());
        let was_sleeping = self.sleeping;
        if self.temporary_wake_until.is_some() && should_sleep {
            self.sleeping = false;
            self.lights_on = true;
        } else {
            self.sleeping = should_sleep;
            self.lights_on = !should_sleep;
        }
        if was_sleeping != self.sleeping {
            info!(sleeping = self.sleeping, hour = now.hour(), "sleep state changed");
        }
    }

    /// Temporary in automatic mode, permanent in manual mode.
    pub fn wake_up(&mut self, now: DateTime<Utc>) {
        if self.automatic {
            self.temporary_wake_until = Some(now + ChronoDuration::seconds(TEMPORARY_WAKE_SECS));
            self.sleeping = false;
            self.lights_on = true;
        } else {
            self.turn_on_lights();
        }
    }

    /// Push a running temporary wake-up out again after user interaction.
    pub fn refresh_temporary_wake_up(&mut self, now: DateTime<Utc>) {
        if self.temporary_wake_until.is_some() {
            self.temporary_wake_until = Some(now + ChronoDuration::seconds(TEMPORARY_WAKE_SECS));
        }
    }

    pub fn toggle_lights(&mut self) {
        if self.lights_on {
            self.turn_off_lights();
        } else {
            self.turn_on_lights();
        }
    }

    fn turn_on_lights(&mut self) {
        self.lights_on = true;
        if !self.automatic {
            self.sleeping = false;
        }
    }

    fn turn_off_lights(&mut self) {
        self.lights_on = false;
        if !self.automatic {
            self.sleeping = true;
        }
    }

    pub fn set_automatic(&mut self, automatic: bool) {
        self.automatic = automatic;
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    pub fn sleep_hour(&self) -> u32 {
        self.sleep_hour
    }

    pub fn wake_hour(&self) -> u32 {
        self.wake_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        let mut s = SleepSchedule::default();
        assert_eq!(
            s.set_schedule(24, 7),
            Err(SettingsError::HourOutOfRange {
                field: "sleep",
                hour: 24
            })
        );
        assert!(s.set_schedule(22, 30).is_err());
        assert_eq!(s.sleep_hour(), 22);
        assert!(s.set_schedule(0, 23).is_ok());
    }

    #[test]
    fn test_sleep_period_wraps_midnight() {
        let s = SleepSchedule::default();
        assert!(s.is_in_sleep_period(23));
        assert!(s.is_in_sleep_period(3));
        assert!(!s.is_in_sleep_period(7));
        assert!(!s.is_in_sleep_period(12));
    }

    #[test]
    fn test_same_day_window() {
        let mut s = SleepSchedule::default();
        s.set_schedule(13, 15).unwrap();
        assert!(s.is_in_sleep_period(14));
        assert!(!s.is_in_sleep_period(15));
        assert!(!s.is_in_sleep_period(2));
    }

    #[test]
    fn test_automatic_follows_clock() {
        let mut s = SleepSchedule::default();
        s.time_pass(&at(23));
        assert!(s.is_sleeping());
        assert!(!s.lights_on());
        s.time_pass(&at(8));
        assert!(!s.is_sleeping());
    }

    #[test]
    fn test_temporary_wake_expires() {
        let mut s = SleepSchedule::default();
        s.time_pass(&at(23));
        s.wake_up(at(23));
        s.time_pass(&(at(23) + ChronoDuration::seconds(60)));
        assert!(!s.is_sleeping());

        s.time_pass(&(at(23) + ChronoDuration::seconds(TEMPORARY_WAKE_SECS)));
        assert!(s.is_sleeping());
    }

    #[test]
    fn test_manual_lights_control_sleep() {
        let mut s = SleepSchedule::manual();
        s.time_pass(&at(23));
        assert!(!s.is_sleeping());
        s.toggle_lights();
        assert!(s.is_sleeping());
        s.wake_up(at(23));
        assert!(!s.is_sleeping());
        assert!(s.lights_on());
    }
}
