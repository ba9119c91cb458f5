//! Serializable views of replay reports and settings.

use std::fmt::Write as _;

use serde::Serialize;

use gaze_domain::domain::Point;
use gaze_infra::TrackerConfig;
use gaze_infra::replay::ReplayReport;

#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub frames: usize,
    pub frames_without_landmark: usize,
    pub hovers: usize,
    pub activations: Vec<ActivationOutput>,
    pub failures: Vec<FailureOutput>,
    pub scroll_ticks: usize,
    pub scrolled_px: f64,
    pub regions: Vec<RegionOutput>,
    pub final_cursor: Option<PointOutput>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ActivationOutput {
    pub at_ms: u64,
    pub element: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailureOutput {
    pub at_ms: u64,
    pub element: u64,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RegionOutput {
    pub selector: String,
    pub travelled_px: f64,
    pub scroll_top: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointOutput {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for PointOutput {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<&ReplayReport> for ReportOutput {
    fn from(report: &ReplayReport) -> Self {
        Self {
            frames: report.frames,
            frames_without_landmark: report.frames_without_landmark,
            hovers: report.hovers,
            activations: report
                .activations
                .iter()
                .map(|a| ActivationOutput {
                    at_ms: a.at.as_millis() as u64,
                    element: a.target.get(),
                    label: a.label.clone(),
                })
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureOutput {
                    at_ms: f.at.as_millis() as u64,
                    element: f.target.get(),
                    reason: f.reason.clone(),
                })
                .collect(),
            scroll_ticks: report.scroll_ticks,
            scrolled_px: report.scrolled_px(),
            regions: report
                .regions
                .iter()
                .map(|r| RegionOutput {
                    selector: r.selector.clone(),
                    travelled_px: r.travelled,
                    scroll_top: r.scroll_top,
                })
                .collect(),
            final_cursor: report.final_cursor.map(PointOutput::from),
            duration_ms: report.duration.as_millis() as u64,
        }
    }
}

impl ReportOutput {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Frames:       {} ({} without landmark)",
            self.frames, self.frames_without_landmark
        );
        let _ = writeln!(out, "Duration:     {} ms", self.duration_ms);
        let _ = writeln!(out, "Hovers:       {}", self.hovers);
        let _ = writeln!(out, "Activations:  {}", self.activations.len());
        for a in &self.activations {
            let _ = writeln!(
                out,
                "  {:>6} ms  #{} {}",
                a.at_ms,
                a.element,
                a.label.as_deref().unwrap_or("")
            );
        }
        let _ = writeln!(out, "Failures:     {}", self.failures.len());
        for f in &self.failures {
            let _ = writeln!(out, "  {:>6} ms  #{} {}", f.at_ms, f.element, f.reason);
        }
        let _ = writeln!(
            out,
            "Scroll ticks: {} ({:.1} px)",
            self.scroll_ticks, self.scrolled_px
        );
        for r in &self.regions {
            let _ = writeln!(out, "  {}: top {:.1}", r.selector, r.scroll_top);
        }
        match self.final_cursor {
            Some(p) => {
                let _ = writeln!(out, "Final cursor: ({:.1}, {:.1})", p.x, p.y);
            }
            None => {
                let _ = writeln!(out, "Final cursor: none");
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub smoothing: f64,
    pub dwell_ms: u64,
    pub scroll_zone: f64,
    pub min_scroll_speed: f64,
    pub max_scroll_speed: f64,
    pub impulse_ttl_ms: u64,
    pub highlight_ms: u64,
    pub scroll_selector: String,
    pub tick_ms: u64,
    pub camera: CameraOutput,
}

#[derive(Debug, Serialize)]
pub struct CameraOutput {
    pub width: u32,
    pub height: u32,
    pub max_faces: u8,
    pub refine_landmarks: bool,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub landmark_index: usize,
}

impl From<&TrackerConfig> for ConfigOutput {
    fn from(config: &TrackerConfig) -> Self {
        let s = config.settings();
        let c = config.camera();
        Self {
            smoothing: s.smoothing(),
            dwell_ms: s.dwell().as_millis() as u64,
            scroll_zone: s.scroll_zone(),
            min_scroll_speed: s.min_scroll_speed(),
            max_scroll_speed: s.max_scroll_speed(),
            impulse_ttl_ms: s.impulse_ttl().as_millis() as u64,
            highlight_ms: s.highlight().as_millis() as u64,
            scroll_selector: s.scroll_selector().to_string(),
            tick_ms: config.tick_interval().as_millis() as u64,
            camera: CameraOutput {
                width: c.width,
                height: c.height,
                max_faces: c.max_faces,
                refine_landmarks: c.refine_landmarks,
                min_detection_confidence: c.min_detection_confidence,
                min_tracking_confidence: c.min_tracking_confidence,
                landmark_index: c.landmark_index,
            },
        }
    }
}

impl ConfigOutput {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "smoothing        {}", self.smoothing);
        let _ = writeln!(out, "dwell            {} ms", self.dwell_ms);
        let _ = writeln!(out, "scroll zone      {}", self.scroll_zone);
        let _ = writeln!(
            out,
            "scroll speed     {}..{} px/tick",
            self.min_scroll_speed, self.max_scroll_speed
        );
        let _ = writeln!(out, "impulse ttl      {} ms", self.impulse_ttl_ms);
        let _ = writeln!(out, "highlight        {} ms", self.highlight_ms);
        let _ = writeln!(out, "scroll selector  {}", self.scroll_selector);
        let _ = writeln!(out, "tick             {} ms", self.tick_ms);
        let _ = writeln!(
            out,
            "camera           {}x{}, landmark {}",
            self.camera.width, self.camera.height, self.camera.landmark_index
        );
        out
    }
}
