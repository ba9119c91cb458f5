//! Per-frame landmark input and capture parameters.

use crate::domain::Point;
use crate::domain::Viewport;

/// Face-mesh index of the nose tip, the single landmark the cursor follows.
pub const NOSE_TIP_LANDMARK: usize = 1;

/// Landmark coordinate normalized to the camera frame, nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Detectors report slightly out-of-range values near the frame border.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }

    /// Maps into viewport pixels with the horizontal axis mirrored, so moving
    /// the head left moves the cursor left on screen.
    pub fn to_viewport_mirrored(self, viewport: &Viewport) -> Point {
        let p = self.clamped();
        Point::new((1.0 - p.x) * viewport.width(), p.y * viewport.height())
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// One detector result. Consumed immediately and never retained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkFrame {
    point: Option<NormalizedPoint>,
}

impl LandmarkFrame {
    pub fn with_point(point: NormalizedPoint) -> Self {
        Self { point: Some(point) }
    }

    pub fn empty() -> Self {
        Self { point: None }
    }

    /// Picks `landmark_index` from the first detected face. A missing face or
    /// a short mesh yields an empty frame.
    pub fn from_faces(faces: &[Vec<NormalizedPoint>], landmark_index: usize) -> Self {
        Self {
            point: faces
                .first()
                .and_then(|mesh| mesh.get(landmark_index))
                .copied(),
        }
    }

    pub fn point(&self) -> Option<NormalizedPoint> {
        self.point
    }
}

/// Capture and detector parameters requested when the camera is acquired.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub max_faces: u8,
    pub refine_landmarks: bool,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub landmark_index: usize,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_faces: 1,
            refine_landmarks: true,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            landmark_index: NOSE_TIP_LANDMARK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_projection() {
        let viewport = Viewport::new(1000.0, 500.0);
        let p = NormalizedPoint::new(0.25, 0.5).to_viewport_mirrored(&viewport);
        assert_eq!(p, Point::new(750.0, 250.0));
    }

    #[test]
    fn test_projection_clamps_out_of_range_values() {
        let viewport = Viewport::new(100.0, 100.0);
        let p = NormalizedPoint::new(-0.2, 1.3).to_viewport_mirrored(&viewport);
        assert_eq!(p, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_from_faces_selects_landmark_of_first_face() {
        let first = vec![NormalizedPoint::new(0.1, 0.1), NormalizedPoint::new(0.4, 0.6)];
        let second = vec![NormalizedPoint::new(0.9, 0.9), NormalizedPoint::new(0.9, 0.9)];
        let frame = LandmarkFrame::from_faces(&[first, second], NOSE_TIP_LANDMARK);
        assert_eq!(frame.point(), Some(NormalizedPoint::new(0.4, 0.6)));
    }

    #[test]
    fn test_from_faces_without_detection_is_empty() {
        assert_eq!(LandmarkFrame::from_faces(&[], NOSE_TIP_LANDMARK).point(), None);
        let short = vec![NormalizedPoint::new(0.1, 0.1)];
        assert_eq!(
            LandmarkFrame::from_faces(&[short], NOSE_TIP_LANDMARK).point(),
            None
        );
    }
}
