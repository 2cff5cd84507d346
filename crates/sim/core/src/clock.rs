//! Game clock - scaled time, day/night buckets, and seasons.
//!
//! The clock advances in game seconds derived from real seconds through a
//! configurable scale, and broadcasts transitions (hour, day, time-of-day
//! bucket, season) as events. Everything downstream consumes the game-time
//! delta the clock returns, so pausing the clock pauses the simulation.

use strum::{Display, EnumIter};

use crate::event::{EventQueue, SimEvent};

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;

/// Coarse bucket of the 24-hour cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeOfDay {
    Night,
    Dawn,
    Morning,
    Noon,
    Afternoon,
    Dusk,
    Evening,
}

impl TimeOfDay {
    /// Bucket for an hour in `[0, 23]`.
    pub const fn from_hour(hour: u8) -> Self {
        match hour {
            0..=5 => Self::Night,
            6..=8 => Self::Dawn,
            9..=11 => Self::Morning,
            12..=14 => Self::Noon,
            15..=17 => Self::Afternoon,
            18..=20 => Self::Dusk,
            _ => Self::Evening,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season for a 1-based day number with the given season length.
    pub fn from_day(day: u32, days_per_season: u32) -> Self {
        let dps = days_per_season.max(1);
        match (day.saturating_sub(1) % (4 * dps)) / dps {
            0 => Self::Spring,
            1 => Self::Summer,
            2 => Self::Autumn,
            _ => Self::Winter,
        }
    }
}

/// A point in game time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime {
    /// 1-based day number.
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Clock tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockSettings {
    /// Real seconds it takes for one game hour to pass.
    pub real_seconds_per_game_hour: f32,
    /// Extra runtime multiplier on top of the base scale.
    pub speed_multiplier: f32,
    pub days_per_season: u32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            real_seconds_per_game_hour: 60.0,
            speed_multiplier: 1.0,
            days_per_season: 7,
        }
    }
}

/// The running game clock. Starts at noon on day 1.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clock {
    settings: ClockSettings,
    /// Game seconds since day 1, 00:00.
    elapsed: f64,
    paused: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(ClockSettings::default())
    }
}

impl Clock {
    pub fn new(settings: ClockSettings) -> Self {
        Self {
            settings,
            elapsed: 12.0 * SECONDS_PER_HOUR,
            paused: false,
        }
    }

    /// Game seconds that pass per real second at the current scale.
    pub fn time_scale(&self) -> f32 {
        let base =
            (SECONDS_PER_HOUR / self.settings.real_seconds_per_game_hour.max(1.0e-3) as f64) as f32;
        base * self.settings.speed_multiplier.max(0.0)
    }

    /// Advances the clock by `real_dt` real seconds and returns the game
    /// seconds that passed (zero while paused).
    pub fn tick(&mut self, real_dt: f32, events: &mut EventQueue) -> f32 {
        if self.paused || real_dt <= 0.0 {
            return 0.0;
        }
        let game_dt = real_dt * self.time_scale();
        let before = self.time();
        self.elapsed += game_dt as f64;
        let after = self.time();
        self.broadcast_transitions(before, after, events);
        game_dt
    }

    /// Jumps to a specific day, hour, and minute, broadcasting the same
    /// transition events a tick would.
    pub fn set_time(&mut self, day: u32, hour: u8, minute: u8, events: &mut EventQueue) {
        let before = self.time();
        self.elapsed = (day.max(1) - 1) as f64 * SECONDS_PER_DAY
            + (hour.min(23)) as f64 * SECONDS_PER_HOUR
            + (minute.min(59)) as f64 * 60.0;
        let after = self.time();
        self.broadcast_transitions(before, after, events);
    }

    /// Administrative jump forward by whole game hours.
    pub fn advance_by_hours(&mut self, hours: u32, events: &mut EventQueue) {
        let before = self.time();
        self.elapsed += hours as f64 * SECONDS_PER_HOUR;
        let after = self.time();
        self.broadcast_transitions(before, after, events);
    }

    /// Administrative jump forward by whole game days.
    pub fn advance_by_days(&mut self, days: u32, events: &mut EventQueue) {
        self.advance_by_hours(days * 24, events);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn set_real_seconds_per_game_hour(&mut self, seconds: f32) {
        self.settings.real_seconds_per_game_hour = seconds.max(1.0e-3);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn time(&self) -> GameTime {
        let day = (self.elapsed / SECONDS_PER_DAY) as u32 + 1;
        let in_day = self.elapsed % SECONDS_PER_DAY;
        let hour = (in_day / SECONDS_PER_HOUR) as u8;
        let in_hour = in_day % SECONDS_PER_HOUR;
        GameTime {
            day,
            hour,
            minute: (in_hour / 60.0) as u8,
            second: (in_hour % 60.0) as u8,
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.time().hour)
    }

    pub fn season(&self) -> Season {
        Season::from_day(self.time().day, self.settings.days_per_season)
    }

    /// Total game seconds since day 1, 00:00.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Total whole game hours since day 1, 00:00.
    pub fn total_hours(&self) -> u64 {
        (self.elapsed / SECONDS_PER_HOUR) as u64
    }

    /// Total whole game days survived (zero during day 1).
    pub fn total_days(&self) -> u64 {
        (self.elapsed / SECONDS_PER_DAY) as u64
    }

    fn broadcast_transitions(&self, before: GameTime, after: GameTime, events: &mut EventQueue) {
        if after.hour != before.hour || after.day != before.day {
            events.push(SimEvent::HourChanged { hour: after.hour });
        }
        if after.day != before.day {
            events.push(SimEvent::DayChanged { day: after.day });

            let old_season = Season::from_day(before.day, self.settings.days_per_season);
            let new_season = Season::from_day(after.day, self.settings.days_per_season);
            if old_season != new_season {
                events.push(SimEvent::SeasonChanged { season: new_season });
            }
        }
        let old_bucket = TimeOfDay::from_hour(before.hour);
        let new_bucket = TimeOfDay::from_hour(after.hour);
        if old_bucket != new_bucket {
            events.push(SimEvent::TimeOfDayChanged {
                old: old_bucket,
                new: new_bucket,
            });
        }
    }
}
