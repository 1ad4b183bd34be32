//! Time-of-day model behind the date/hour sliders and the day/night shading.
//!
//! Times are UTC. The subsolar point uses the usual cosine approximation of solar
//! declination and ignores the equation of time.

use std::rc::Rc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use glam::DVec3;
use yew::Reducible;

use super::projector::surface_to_cartesian;
use crate::config::AxisConvention;
use crate::model::SurfaceCoordinate;

pub const SPEEDS: [u32; 3] = [1, 10, 100];

const AXIAL_TILT_DEG: f64 = 23.44;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Northern-hemisphere season for a 1-based day of the year.
    pub fn from_day_of_year(day: u32) -> Self {
        match day {
            80..=172 => Season::Spring,
            173..=264 => Season::Summer,
            265..=354 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeOfDay {
    pub time: NaiveDateTime,
    pub playing: bool,
    /// Simulated seconds per real second.
    pub speed: u32,
}

impl TimeOfDay {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time,
            playing: false,
            speed: SPEEDS[0],
        }
    }

    pub fn now() -> Self {
        Self::new(chrono::Utc::now().naive_utc())
    }

    pub fn day_of_year(&self) -> u32 {
        self.time.ordinal()
    }

    pub fn days_in_year(&self) -> u32 {
        if self.time.date().leap_year() { 366 } else { 365 }
    }

    pub fn season(&self) -> Season {
        Season::from_day_of_year(self.day_of_year())
    }

    /// Hours since midnight as a fraction, e.g. 13.5 for 13:30.
    pub fn hours(&self) -> f64 {
        let t = self.time.time();
        t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
    }

    /// Move to another day of the same year, keeping the clock time.
    pub fn set_day_of_year(&mut self, day: u32) {
        let day = day.clamp(1, self.days_in_year());
        if let Some(date) = NaiveDate::from_yo_opt(self.time.year(), day) {
            self.time = date.and_time(self.time.time());
        }
    }

    /// Set the clock from fractional hours; seconds are dropped.
    pub fn set_hours(&mut self, hours: f64) {
        if !hours.is_finite() {
            return;
        }
        let hours = hours.clamp(0.0, 23.999);
        let h = hours.floor();
        let m = ((hours - h) * 60.0).floor();
        if let Some(t) = NaiveTime::from_hms_opt(h as u32, m as u32, 0) {
            self.time = self.time.date().and_time(t);
        }
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_speed(&mut self, speed: u32) {
        if SPEEDS.contains(&speed) {
            self.speed = speed;
        }
    }

    /// Run the clock forward by `real_secs` of wall time when playing.
    pub fn advance(&mut self, real_secs: f64) {
        if !self.playing || !(real_secs > 0.0) {
            return;
        }
        let ms = (real_secs * self.speed as f64 * 1000.0).round() as i64;
        self.time += Duration::milliseconds(ms);
    }

    /// Point on the surface where the sun is directly overhead.
    pub fn subsolar_point(&self) -> SurfaceCoordinate {
        let doy = self.day_of_year() as f64;
        let latitude = -AXIAL_TILT_DEG * (360.0 / 365.0 * (doy + 10.0)).to_radians().cos();
        let mut longitude = (12.0 - self.hours()) * 15.0;
        if longitude <= -180.0 {
            longitude += 360.0;
        }
        SurfaceCoordinate {
            latitude,
            longitude,
        }
    }

    /// Unit vector toward the sun in the globe's local frame.
    pub fn sun_direction(&self, convention: AxisConvention) -> DVec3 {
        surface_to_cartesian(self.subsolar_point(), convention)
    }
}

pub enum TimeAction {
    SetDay(u32),
    SetHours(f64),
    TogglePlaying,
    SetSpeed(u32),
    /// Wall-clock seconds elapsed since the last tick.
    Tick(f64),
}

impl Reducible for TimeOfDay {
    type Action = TimeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let TimeAction::Tick(_) = action {
            if !self.playing {
                return self;
            }
        }
        let mut new = (*self).clone();
        match action {
            TimeAction::SetDay(d) => new.set_day_of_year(d),
            TimeAction::SetHours(h) => new.set_hours(h),
            TimeAction::TogglePlaying => new.toggle_playing(),
            TimeAction::SetSpeed(s) => new.set_speed(s),
            TimeAction::Tick(secs) => new.advance(secs),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> TimeOfDay {
        TimeOfDay::new(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::from_day_of_year(1), Season::Winter);
        assert_eq!(Season::from_day_of_year(79), Season::Winter);
        assert_eq!(Season::from_day_of_year(80), Season::Spring);
        assert_eq!(Season::from_day_of_year(173), Season::Summer);
        assert_eq!(Season::from_day_of_year(265), Season::Fall);
        assert_eq!(Season::from_day_of_year(355), Season::Winter);
    }

    #[test]
    fn day_of_year_and_hours() {
        let t = at(2025, 2, 1, 13, 30);
        assert_eq!(t.day_of_year(), 32);
        assert!((t.hours() - 13.5).abs() < 1e-12);
    }

    #[test]
    fn set_day_keeps_clock() {
        let mut t = at(2025, 1, 1, 8, 15);
        t.set_day_of_year(200);
        assert_eq!(t.day_of_year(), 200);
        assert_eq!((t.time.hour(), t.time.minute()), (8, 15));
        t.set_day_of_year(400);
        assert_eq!(t.day_of_year(), 365);
    }

    #[test]
    fn set_hours_splits_fraction() {
        let mut t = at(2025, 6, 1, 0, 0);
        t.set_hours(17.75);
        assert_eq!((t.time.hour(), t.time.minute()), (17, 45));
        t.set_hours(24.0);
        assert_eq!((t.time.hour(), t.time.minute()), (23, 59));
        assert_eq!(t.day_of_year(), 152);
    }

    #[test]
    fn advance_only_while_playing() {
        let mut t = at(2025, 1, 1, 0, 0);
        t.advance(10.0);
        assert_eq!(t.time.minute(), 0);
        t.toggle_playing();
        t.set_speed(100);
        t.advance(1.2);
        assert_eq!((t.time.minute(), t.time.second()), (2, 0));
        t.set_speed(7);
        assert_eq!(t.speed, 100);
    }

    #[test]
    fn subsolar_point_tracks_noon_and_solstice() {
        let noon = at(2025, 6, 21, 12, 0).subsolar_point();
        assert!(noon.longitude.abs() < 1e-9);
        assert!((noon.latitude - AXIAL_TILT_DEG).abs() < 0.5);
        let evening = at(2025, 12, 21, 18, 0).subsolar_point();
        assert!((evening.longitude + 90.0).abs() < 1e-9);
        assert!((evening.latitude + AXIAL_TILT_DEG).abs() < 0.5);
        let midnight = at(2025, 3, 20, 0, 0).subsolar_point();
        assert!((midnight.longitude - 180.0).abs() < 1e-9);
    }

    #[test]
    fn sun_direction_is_unit() {
        let d = at(2025, 9, 1, 9, 0).sun_direction(AxisConvention::YUp);
        assert!((d.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn paused_tick_keeps_same_state() {
        let t = Rc::new(at(2025, 1, 1, 0, 0));
        let after = t.clone().reduce(TimeAction::Tick(1.0));
        assert!(Rc::ptr_eq(&t, &after));
        let playing = t.reduce(TimeAction::TogglePlaying).reduce(TimeAction::Tick(60.0));
        assert_eq!(playing.time.minute(), 1);
    }
}
