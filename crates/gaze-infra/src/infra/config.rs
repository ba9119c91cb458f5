//! Tracker configuration from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::domain::CameraSettings;
use crate::domain::SettingsError;
use crate::domain::TrackerSettings;
use crate::domain::TrackerSettingsBuilder;

pub const DEFAULT_TICK_MS: u64 = 16;

const SMOOTHING_ENV: &str = "GAZE_SMOOTHING";
const DWELL_ENV: &str = "GAZE_DWELL_MS";
const SCROLL_ZONE_ENV: &str = "GAZE_SCROLL_ZONE";
const SCROLL_TTL_ENV: &str = "GAZE_SCROLL_TTL_MS";
const HIGHLIGHT_ENV: &str = "GAZE_HIGHLIGHT_MS";
const SCROLL_SELECTOR_ENV: &str = "GAZE_SCROLL_SELECTOR";
const TICK_ENV: &str = "GAZE_TICK_MS";

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    settings: TrackerSettings,
    camera: CameraSettings,
    tick_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TrackerConfig {
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn camera(&self) -> &CameraSettings {
        &self.camera
    }

    /// Spacing between animation-frame ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn from_env() -> Self {
        let builder = TrackerSettings::builder();
        let builder = overlay(builder, SMOOTHING_ENV, |b, v: f64| b.smoothing(v));
        let builder = overlay(builder, DWELL_ENV, |b, v: u64| {
            b.dwell(Duration::from_millis(v))
        });
        let builder = overlay(builder, SCROLL_ZONE_ENV, |b, v: f64| b.scroll_zone(v));
        let builder = overlay(builder, SCROLL_TTL_ENV, |b, v: u64| {
            b.impulse_ttl(Duration::from_millis(v))
        });
        let builder = overlay(builder, HIGHLIGHT_ENV, |b, v: u64| {
            b.highlight(Duration::from_millis(v))
        });
        let builder = overlay(builder, SCROLL_SELECTOR_ENV, |b, v: String| {
            b.scroll_selector(v)
        });
        let settings = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Invalid tracker config; using defaults");
            TrackerSettings::default()
        });

        let tick_ms = match parse_env::<u64>(TICK_ENV) {
            Some(0) => {
                warn!(key = TICK_ENV, "Tick interval must be positive; using default");
                DEFAULT_TICK_MS
            }
            Some(ms) => ms,
            None => DEFAULT_TICK_MS,
        };

        Self {
            settings,
            camera: CameraSettings::default(),
            tick_interval: Duration::from_millis(tick_ms),
        }
    }

    /// Applies command-line overrides on top of the current settings.
    pub fn override_settings(
        &mut self,
        apply: impl FnOnce(TrackerSettingsBuilder) -> TrackerSettingsBuilder,
    ) -> Result<(), SettingsError> {
        self.settings = apply(self.settings.to_builder()).build()?;
        Ok(())
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        if interval.is_zero() {
            warn!("Ignoring zero tick interval");
            return;
        }
        self.tick_interval = interval;
    }
}

fn read_env(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let value = read_env(key)?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(value = %value, key, "Invalid config value; using default");
            None
        }
    }
}

/// Applies one env value when it parses and the result still validates.
fn overlay<T: FromStr>(
    builder: TrackerSettingsBuilder,
    key: &str,
    apply: impl FnOnce(TrackerSettingsBuilder, T) -> TrackerSettingsBuilder,
) -> TrackerSettingsBuilder {
    let Some(value) = parse_env::<T>(key) else {
        return builder;
    };
    let candidate = apply(builder.clone(), value);
    match candidate.clone().build() {
        Ok(_) => candidate,
        Err(err) => {
            warn!(key, error = %err, "Out-of-range config value; using default");
            builder
        }
    }
}
