//! Tuning constants for the tracking pipeline.

use std::time::Duration;

use thiserror::Error;

use crate::domain::EdgeZones;

pub const DEFAULT_SMOOTHING: f64 = 0.22;
pub const DEFAULT_DWELL: Duration = Duration::from_millis(900);
pub const DEFAULT_SCROLL_ZONE: f64 = 0.10;
pub const DEFAULT_MIN_SCROLL_SPEED: f64 = 6.0;
pub const DEFAULT_MAX_SCROLL_SPEED: f64 = 18.0;
pub const DEFAULT_IMPULSE_TTL: Duration = Duration::from_millis(120);
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(400);
pub const DEFAULT_SCROLL_SELECTOR: &str = "chat-messages";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("Smoothing factor {0} must be in (0, 1]")]
    Smoothing(f64),
    #[error("Scroll zone fraction {0} must be in (0, 0.5)")]
    ScrollZone(f64),
    #[error("Scroll speeds must satisfy 0 < min ({min}) <= max ({max})")]
    ScrollSpeed { min: f64, max: f64 },
    #[error("{name} duration must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("Scroll selector cannot be empty")]
    EmptySelector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    smoothing: f64,
    dwell: Duration,
    scroll_zone: f64,
    min_scroll_speed: f64,
    max_scroll_speed: f64,
    impulse_ttl: Duration,
    highlight: Duration,
    scroll_selector: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            dwell: DEFAULT_DWELL,
            scroll_zone: DEFAULT_SCROLL_ZONE,
            min_scroll_speed: DEFAULT_MIN_SCROLL_SPEED,
            max_scroll_speed: DEFAULT_MAX_SCROLL_SPEED,
            impulse_ttl: DEFAULT_IMPULSE_TTL,
            highlight: DEFAULT_HIGHLIGHT,
            scroll_selector: DEFAULT_SCROLL_SELECTOR.to_string(),
        }
    }
}

impl TrackerSettings {
    pub fn builder() -> TrackerSettingsBuilder {
        TrackerSettingsBuilder::new()
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn scroll_zone(&self) -> f64 {
        self.scroll_zone
    }

    pub fn min_scroll_speed(&self) -> f64 {
        self.min_scroll_speed
    }

    pub fn max_scroll_speed(&self) -> f64 {
        self.max_scroll_speed
    }

    pub fn impulse_ttl(&self) -> Duration {
        self.impulse_ttl
    }

    pub fn highlight(&self) -> Duration {
        self.highlight
    }

    pub fn scroll_selector(&self) -> &str {
        &self.scroll_selector
    }

    pub fn edge_zones(&self) -> EdgeZones {
        EdgeZones::new(
            self.scroll_zone,
            self.min_scroll_speed,
            self.max_scroll_speed,
        )
    }

    /// Builder seeded with these values, for applying overrides.
    pub fn to_builder(&self) -> TrackerSettingsBuilder {
        TrackerSettingsBuilder {
            settings: self.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackerSettingsBuilder {
    settings: TrackerSettings,
}

impl TrackerSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smoothing(mut self, alpha: f64) -> Self {
        self.settings.smoothing = alpha;
        self
    }

    pub fn dwell(mut self, dwell: Duration) -> Self {
        self.settings.dwell = dwell;
        self
    }

    pub fn scroll_zone(mut self, fraction: f64) -> Self {
        self.settings.scroll_zone = fraction;
        self
    }

    pub fn scroll_speed(mut self, min: f64, max: f64) -> Self {
        self.settings.min_scroll_speed = min;
        self.settings.max_scroll_speed = max;
        self
    }

    pub fn impulse_ttl(mut self, ttl: Duration) -> Self {
        self.settings.impulse_ttl = ttl;
        self
    }

    pub fn highlight(mut self, highlight: Duration) -> Self {
        self.settings.highlight = highlight;
        self
    }

    pub fn scroll_selector(mut self, selector: impl Into<String>) -> Self {
        self.settings.scroll_selector = selector.into();
        self
    }

    pub fn build(self) -> Result<TrackerSettings, SettingsError> {
        let s = self.settings;
        if !(s.smoothing > 0.0 && s.smoothing <= 1.0) {
            return Err(SettingsError::Smoothing(s.smoothing));
        }
        if !(s.scroll_zone > 0.0 && s.scroll_zone < 0.5) {
            return Err(SettingsError::ScrollZone(s.scroll_zone));
        }
        if !(s.min_scroll_speed > 0.0 && s.min_scroll_speed <= s.max_scroll_speed) {
            return Err(SettingsError::ScrollSpeed {
                min: s.min_scroll_speed,
                max: s.max_scroll_speed,
            });
        }
        for (name, duration) in [
            ("Dwell", s.dwell),
            ("Impulse", s.impulse_ttl),
            ("Highlight", s.highlight),
        ] {
            if duration.is_zero() {
                return Err(SettingsError::ZeroDuration { name });
            }
        }
        if s.scroll_selector.trim().is_empty() {
            return Err(SettingsError::EmptySelector);
        }
        Ok(s)
    }
}
