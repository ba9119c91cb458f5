//! Visual states of the on-screen cursor indicator.

pub const INDICATOR_DIAMETER_PX: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorState {
    #[default]
    Normal,
    /// Cursor rests on an actionable target.
    Hover,
    /// A dwell activation just fired.
    Activated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub radius_px: f64,
    pub rgb: [u8; 3],
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorStyle {
    pub scale: f64,
    pub glow: Glow,
}

impl IndicatorState {
    pub fn style(self) -> IndicatorStyle {
        match self {
            IndicatorState::Normal => IndicatorStyle {
                scale: 1.0,
                glow: Glow {
                    radius_px: 60.0,
                    rgb: [0, 200, 255],
                    alpha: 0.95,
                },
            },
            IndicatorState::Hover => IndicatorStyle {
                scale: 1.4,
                glow: Glow {
                    radius_px: 80.0,
                    rgb: [0, 255, 200],
                    alpha: 1.0,
                },
            },
            IndicatorState::Activated => IndicatorStyle {
                scale: 1.4,
                glow: Glow {
                    radius_px: 80.0,
                    rgb: [0, 255, 179],
                    alpha: 1.0,
                },
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndicatorState::Normal => "normal",
            IndicatorState::Hover => "hover",
            IndicatorState::Activated => "activated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_enlarges_indicator() {
        assert!(IndicatorState::Hover.style().scale > IndicatorState::Normal.style().scale);
        assert!(
            IndicatorState::Hover.style().glow.radius_px
                > IndicatorState::Normal.style().glow.radius_px
        );
    }
}
