//! Top/bottom proximity zones that drive edge scrolling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Proximity bands along the top and bottom viewport edges.
///
/// Depth into a band maps linearly to an intensity in `(0, 1]`, and the
/// scroll speed is `max(min_speed, intensity * max_speed)` pixels per
/// animation tick, negative when scrolling up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeZones {
    fraction: f64,
    min_speed: f64,
    max_speed: f64,
}

impl EdgeZones {
    pub fn new(fraction: f64, min_speed: f64, max_speed: f64) -> Self {
        Self {
            fraction,
            min_speed,
            max_speed,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn zone_height(&self, viewport_height: f64) -> f64 {
        viewport_height * self.fraction
    }

    /// Which band, if any, contains `y`. Band boundaries are exclusive.
    pub fn direction_at(&self, y: f64, viewport_height: f64) -> Option<ScrollDirection> {
        let zone = self.zone_height(viewport_height);
        if zone <= 0.0 {
            return None;
        }
        if y < zone {
            Some(ScrollDirection::Up)
        } else if y > viewport_height - zone {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }

    /// How deep into its band `y` sits, in `(0, 1]`.
    pub fn intensity_at(&self, y: f64, viewport_height: f64) -> Option<f64> {
        let zone = self.zone_height(viewport_height);
        let depth = match self.direction_at(y, viewport_height)? {
            ScrollDirection::Up => zone - y,
            ScrollDirection::Down => y - (viewport_height - zone),
        };
        Some((depth / zone).min(1.0))
    }

    /// Signed scroll velocity in pixels per tick for a cursor at `y`.
    pub fn velocity_at(&self, y: f64, viewport_height: f64) -> Option<f64> {
        let direction = self.direction_at(y, viewport_height)?;
        let intensity = self.intensity_at(y, viewport_height)?;
        let speed = (intensity * self.max_speed).max(self.min_speed);
        Some(match direction {
            ScrollDirection::Up => -speed,
            ScrollDirection::Down => speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> EdgeZones {
        EdgeZones::new(0.10, 6.0, 18.0)
    }

    #[test]
    fn test_middle_of_viewport_has_no_velocity() {
        assert_eq!(zones().velocity_at(500.0, 1000.0), None);
        // Band edges are exclusive.
        assert_eq!(zones().velocity_at(100.0, 1000.0), None);
        assert_eq!(zones().velocity_at(900.0, 1000.0), None);
    }

    #[test]
    fn test_top_edge_scrolls_up_at_full_speed() {
        assert_eq!(zones().velocity_at(0.0, 1000.0), Some(-18.0));
    }

    #[test]
    fn test_shallow_depth_uses_minimum_speed() {
        // intensity 0.1 -> 1.8 px, floored to 6
        assert_eq!(zones().velocity_at(90.0, 1000.0), Some(-6.0));
        assert_eq!(zones().velocity_at(910.0, 1000.0), Some(6.0));
    }

    #[test]
    fn test_intensity_scales_linearly() {
        let zones = zones();
        let intensity = zones.intensity_at(20.0, 1000.0).unwrap();
        assert!((intensity - 0.8).abs() < 1e-12);
        let velocity = zones.velocity_at(980.0, 1000.0).unwrap();
        assert!((velocity - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_cursor_held_at_two_percent_scrolls_up() {
        let velocity = zones().velocity_at(20.0, 1000.0).unwrap();
        assert!(velocity < 0.0);
        assert_eq!(
            zones().direction_at(20.0, 1000.0),
            Some(ScrollDirection::Up)
        );
    }

    #[test]
    fn test_degenerate_viewport_never_scrolls() {
        assert_eq!(zones().velocity_at(0.0, 0.0), None);
    }
}
