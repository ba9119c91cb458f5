//! Replay outcome accumulated from tracker events.

use std::time::Duration;

use tracing::info;

use crate::domain::ElementId;
use crate::domain::Point;
use crate::domain::TrackerEvent;
use crate::infra::layout::LayoutSurface;
use crate::usecases::ports::ScrollRegion;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationRecord {
    pub at: Duration,
    pub target: ElementId,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub at: Duration,
    pub target: ElementId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionScroll {
    pub selector: String,
    pub travelled: f64,
    pub scroll_top: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayReport {
    pub frames: usize,
    pub frames_without_landmark: usize,
    pub hovers: usize,
    pub activations: Vec<ActivationRecord>,
    pub failures: Vec<FailureRecord>,
    pub scroll_ticks: usize,
    pub regions: Vec<RegionScroll>,
    pub final_cursor: Option<Point>,
    pub duration: Duration,
}

impl ReplayReport {
    pub fn scrolled_px(&self) -> f64 {
        self.regions.iter().map(|r| r.travelled).sum()
    }
}

pub(super) struct Recorder<'a> {
    surface: &'a LayoutSurface,
    report: ReplayReport,
}

impl<'a> Recorder<'a> {
    pub(super) fn new(surface: &'a LayoutSurface) -> Self {
        Self {
            surface,
            report: ReplayReport::default(),
        }
    }

    pub(super) fn frame(&mut self, at: Duration, events: Vec<TrackerEvent>) {
        self.report.frames += 1;
        self.events(at, events);
    }

    pub(super) fn events(&mut self, at: Duration, events: Vec<TrackerEvent>) {
        self.report.duration = self.report.duration.max(at);
        for event in events {
            match event {
                TrackerEvent::LandmarkLost => self.report.frames_without_landmark += 1,
                TrackerEvent::HoverStarted { .. } => self.report.hovers += 1,
                TrackerEvent::Activated { target } => {
                    let label = self.surface.label(target).map(str::to_string);
                    info!(
                        at_ms = at.as_millis() as u64,
                        target = %target,
                        label = label.as_deref().unwrap_or(""),
                        "Activated"
                    );
                    self.report.activations.push(ActivationRecord { at, target, label });
                }
                TrackerEvent::ActivationFailed { target, reason } => {
                    self.report.failures.push(FailureRecord { at, target, reason });
                }
                TrackerEvent::Scrolled { .. } => self.report.scroll_ticks += 1,
                TrackerEvent::HoverCancelled { .. }
                | TrackerEvent::ScrollArmed { .. }
                | TrackerEvent::ScrollExpired => {}
            }
        }
    }

    pub(super) fn finish(mut self, final_cursor: Option<Point>) -> ReplayReport {
        self.report.final_cursor = final_cursor;
        self.report.regions = self
            .surface
            .regions()
            .iter()
            .map(|region| RegionScroll {
                selector: region.selector().to_string(),
                travelled: region.travelled(),
                scroll_top: region.scroll_top(),
            })
            .collect();
        self.report
    }
}
