use std::fmt;

use thiserror::Error;

use crate::domain::ElementId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("Camera device unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to release camera: {0}")]
    Release(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Element {0} is no longer attached")]
    Detached(ElementId),
    #[error("Surface rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationStep {
    Focus,
    PointerDown,
    Click,
}

impl fmt::Display for ActivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationStep::Focus => "focus",
            ActivationStep::PointerDown => "pointer-down",
            ActivationStep::Click => "click",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Activation failed during {step}: {source}")]
pub struct ActivationError {
    pub step: ActivationStep,
    #[source]
    pub source: SurfaceError,
}

impl ActivationError {
    pub fn new(step: ActivationStep, source: SurfaceError) -> Self {
        Self { step, source }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(#[source] SourceError),
    #[error("Failed to inject cursor indicator: {0}")]
    IndicatorUnavailable(#[source] SurfaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_error_message_names_step() {
        let err = ActivationError::new(
            ActivationStep::PointerDown,
            SurfaceError::Detached(ElementId::new(4)),
        );
        assert_eq!(
            err.to_string(),
            "Activation failed during pointer-down: Element #4 is no longer attached"
        );
    }
}
