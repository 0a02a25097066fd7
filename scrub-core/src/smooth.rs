//! Smooth scrolling driver
//!
//! Wheel input moves a target offset; every animation frame the rendered
//! offset is damped toward it. Damping is frame-rate independent so the page
//! glides at the same speed on 60Hz and 144Hz displays.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Pixels per wheel line, as browsers render a default line
pub const LINE_HEIGHT: f64 = 16.0;

/// Remaining distance under which the animation settles on its target
const SNAP_DISTANCE: f64 = 0.5;

/// Tuning for [`SmoothScroll`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered per 60Hz frame
    pub lerp: f64,
    /// Multiplier applied to wheel deltas
    pub wheel_multiplier: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.1,
            wheel_multiplier: 1.0,
        }
    }
}

impl SmoothScrollConfig {
    /// Rejects settings that would make the driver diverge or stall
    pub fn validate(&self) -> Result<()> {
        if !self.lerp.is_finite() || self.lerp <= 0.0 || self.lerp > 1.0 {
            return Err(Error::InvalidSetting {
                name: "smooth.lerp",
                value: self.lerp,
            });
        }
        if !self.wheel_multiplier.is_finite() {
            return Err(Error::InvalidSetting {
                name: "smooth.wheel_multiplier",
                value: self.wheel_multiplier,
            });
        }
        Ok(())
    }
}

/// Unit of a wheel event's delta (`WheelEvent.deltaMode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    /// Maps the DOM constant (0 pixel, 1 line, 2 page). Unknown values are
    /// treated as pixels.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }
}

/// Converts a wheel delta to pixels. `page_height` is the viewport height.
pub fn normalize_wheel_delta(delta: f64, mode: WheelDeltaMode, page_height: f64) -> f64 {
    match mode {
        WheelDeltaMode::Pixel => delta,
        WheelDeltaMode::Line => delta * LINE_HEIGHT,
        WheelDeltaMode::Page => delta * page_height,
    }
}

/// Exponential damping of `from` toward `to` over `dt` seconds
pub fn damp(from: f64, to: f64, lambda: f64, dt: f64) -> f64 {
    let t = 1.0 - (-lambda * dt).exp();
    from + (to - from) * t
}

/// Smoothed scroll position state
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    current: f64,
    target: f64,
    limit: f64,
    last_time_ms: Option<f64>,
    animating: bool,
}

impl SmoothScroll {
    /// Creates a driver resting at offset 0 that can scroll up to `limit`
    pub fn new(config: SmoothScrollConfig, limit: f64) -> Self {
        Self {
            config,
            current: 0.0,
            target: 0.0,
            limit: limit.max(0.0),
            last_time_ms: None,
            animating: false,
        }
    }

    /// Offset that should be applied to the document
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Updates the maximum scroll offset, e.g. after a resize
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
    }

    /// Feeds a wheel delta in pixels
    pub fn on_wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        self.scroll_to(self.target + delta_y * self.config.wheel_multiplier);
    }

    /// Starts a smoothed scroll toward `offset`
    pub fn scroll_to(&mut self, offset: f64) {
        self.target = offset.clamp(0.0, self.limit);
        self.animating = self.target != self.current;
    }

    /// Jumps to `offset` without animating. Used when the document was
    /// scrolled natively (scrollbar, keyboard) while the driver was idle.
    pub fn sync(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.limit);
        self.current = offset;
        self.target = offset;
        self.animating = false;
    }

    /// Advances the animation to `time_ms` (an animation-frame timestamp).
    /// Returns the new offset while the animation is running.
    pub fn tick(&mut self, time_ms: f64) -> Option<f64> {
        let dt = self
            .last_time_ms
            .map(|last| ((time_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_time_ms = Some(time_ms);

        if !self.animating {
            return None;
        }

        self.current = damp(self.current, self.target, self.config.lerp * 60.0, dt)
            .clamp(0.0, self.limit);
        if (self.target - self.current).abs() < SNAP_DISTANCE {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(smooth: &mut SmoothScroll, start_ms: f64, frames: usize, step_ms: f64) -> f64 {
        let mut time = start_ms;
        for _ in 0..frames {
            time += step_ms;
            smooth.tick(time);
        }
        time
    }

    #[test]
    fn test_damp_endpoints() {
        assert_eq!(damp(0.0, 100.0, 6.0, 0.0), 0.0);
        assert!((damp(0.0, 100.0, 6.0, 100.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_moves_target_not_current() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        smooth.on_wheel(120.0);
        assert_eq!(smooth.target(), 120.0);
        assert_eq!(smooth.current(), 0.0);
        assert!(smooth.is_animating());
    }

    #[test]
    fn test_target_is_clamped() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 500.0);
        smooth.on_wheel(-40.0);
        assert_eq!(smooth.target(), 0.0);
        assert!(!smooth.is_animating());
        smooth.on_wheel(900.0);
        assert_eq!(smooth.target(), 500.0);
    }

    #[test]
    fn test_converges_and_stops() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        smooth.tick(0.0);
        smooth.on_wheel(1000.0);

        let first = smooth.tick(16.0).unwrap();
        assert!(first > 0.0 && first < 1000.0);

        run_frames(&mut smooth, 16.0, 300, 16.0);
        assert_eq!(smooth.current(), 1000.0);
        assert!(!smooth.is_animating());
        assert_eq!(smooth.tick(10_000.0), None);
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut slow = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        let mut fast = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        slow.tick(0.0);
        fast.tick(0.0);
        slow.on_wheel(2000.0);
        fast.on_wheel(2000.0);

        run_frames(&mut slow, 0.0, 6, 50.0);
        run_frames(&mut fast, 0.0, 30, 10.0);
        assert!((slow.current() - fast.current()).abs() < 1e-6);
    }

    #[test]
    fn test_sync_stops_animation() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        smooth.on_wheel(300.0);
        smooth.sync(2500.0);
        assert_eq!(smooth.current(), 2500.0);
        assert_eq!(smooth.target(), 2500.0);
        assert!(!smooth.is_animating());
    }

    #[test]
    fn test_fractional_target_settles() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        smooth.tick(0.0);
        smooth.on_wheel(100.5);

        run_frames(&mut smooth, 0.0, 1000, 16.0);
        assert_eq!(smooth.current(), 100.5);
        assert!(!smooth.is_animating());
    }

    #[test]
    fn test_tick_stays_within_limit() {
        let config = SmoothScrollConfig {
            lerp: -0.5,
            wheel_multiplier: 1.0,
        };
        let mut smooth = SmoothScroll::new(config, 800.0);
        smooth.tick(0.0);
        smooth.on_wheel(800.0);

        let mut time = 0.0;
        for _ in 0..20 {
            time += 100.0;
            if let Some(offset) = smooth.tick(time) {
                assert!((0.0..=800.0).contains(&offset), "offset {offset} out of range");
            }
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SmoothScrollConfig::default().validate().is_ok());

        let negative = SmoothScrollConfig {
            lerp: -0.5,
            ..SmoothScrollConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidSetting { name: "smooth.lerp", .. })
        ));

        let too_fast = SmoothScrollConfig {
            lerp: 1.5,
            ..SmoothScrollConfig::default()
        };
        assert!(too_fast.validate().is_err());

        let nan_wheel = SmoothScrollConfig {
            wheel_multiplier: f64::NAN,
            ..SmoothScrollConfig::default()
        };
        assert!(matches!(
            nan_wheel.validate(),
            Err(Error::InvalidSetting { name: "smooth.wheel_multiplier", .. })
        ));
    }

    #[test]
    fn test_wheel_delta_normalization() {
        assert_eq!(WheelDeltaMode::from_dom(0), WheelDeltaMode::Pixel);
        assert_eq!(WheelDeltaMode::from_dom(1), WheelDeltaMode::Line);
        assert_eq!(WheelDeltaMode::from_dom(2), WheelDeltaMode::Page);
        assert_eq!(WheelDeltaMode::from_dom(7), WheelDeltaMode::Pixel);

        assert_eq!(normalize_wheel_delta(53.0, WheelDeltaMode::Pixel, 900.0), 53.0);
        assert_eq!(normalize_wheel_delta(3.0, WheelDeltaMode::Line, 900.0), 48.0);
        assert_eq!(normalize_wheel_delta(-1.0, WheelDeltaMode::Page, 900.0), -900.0);
    }

    #[test]
    fn test_shrinking_limit_clamps_positions() {
        let mut smooth = SmoothScroll::new(SmoothScrollConfig::default(), 10_000.0);
        smooth.sync(9000.0);
        smooth.set_limit(4000.0);
        assert_eq!(smooth.current(), 4000.0);
        assert_eq!(smooth.target(), 4000.0);
    }
}
