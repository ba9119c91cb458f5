//! Classifies what sits under the cursor.

use tracing::warn;

use crate::domain::ElementId;
use crate::domain::Point;
use crate::usecases::ports::UiSurfaceHandle;

/// Upper bound on ancestor walks; guards against a cyclic parent relation.
pub const MAX_ANCESTOR_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Nothing under the cursor.
    Nothing,
    /// An element that is neither interactive nor marked.
    Inert(ElementId),
    /// Inside a control that must never be gaze-activated.
    Exempt(ElementId),
    Actionable(ElementId),
}

impl Classification {
    pub fn actionable_target(&self) -> Option<ElementId> {
        match self {
            Classification::Actionable(target) => Some(*target),
            _ => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Classification::Actionable(_))
    }
}

pub struct HitClassifier {
    surface: UiSurfaceHandle,
}

impl HitClassifier {
    pub fn new(surface: UiSurfaceHandle) -> Self {
        Self { surface }
    }

    /// Hit-tests `point` and resolves the element chain from the topmost hit
    /// up to the root.
    ///
    /// The nearest element on the chain that is natively interactive or
    /// carries the gaze marker becomes the target, so every descendant of a
    /// button resolves to that button. An exempt element anywhere on the chain
    /// overrides interactivity.
    pub fn classify(&self, point: Point) -> Classification {
        let Some(hit) = self.surface.element_at(point) else {
            return Classification::Nothing;
        };

        let mut actionable = None;
        let mut current = Some(hit);
        let mut depth = 0;
        while let Some(element) = current {
            if self.surface.is_exempt_control(element) {
                return Classification::Exempt(element);
            }
            if actionable.is_none()
                && (self.surface.is_natively_interactive(element)
                    || self.surface.has_gaze_marker(element))
            {
                actionable = Some(element);
            }
            depth += 1;
            if depth >= MAX_ANCESTOR_DEPTH {
                warn!(element = %hit, "Ancestor chain exceeds depth limit; truncating");
                break;
            }
            current = self.surface.parent_of(element);
        }

        match actionable {
            Some(target) => Classification::Actionable(target),
            None => Classification::Inert(hit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::Rect;
    use crate::test_support::MockElement;
    use crate::test_support::MockUiSurface;

    fn classifier(surface: MockUiSurface) -> HitClassifier {
        HitClassifier::new(Arc::new(surface))
    }

    #[test]
    fn test_empty_point_is_nothing() {
        let c = classifier(MockUiSurface::builder().build());
        assert_eq!(c.classify(Point::new(5.0, 5.0)), Classification::Nothing);
    }

    #[test]
    fn test_plain_element_is_inert() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::plain(1, Rect::new(0.0, 0.0, 100.0, 100.0)))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(5.0, 5.0)),
            Classification::Inert(ElementId::new(1))
        );
    }

    #[test]
    fn test_descendant_of_button_resolves_to_button() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::button(1, Rect::new(0.0, 0.0, 100.0, 40.0)))
                .element(MockElement::plain(2, Rect::new(10.0, 10.0, 20.0, 20.0)).child_of(1))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(15.0, 15.0)),
            Classification::Actionable(ElementId::new(1))
        );
        assert_eq!(
            c.classify(Point::new(80.0, 15.0)),
            Classification::Actionable(ElementId::new(1))
        );
    }

    #[test]
    fn test_explicit_marker_qualifies_plain_container() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::marked(3, Rect::new(0.0, 0.0, 50.0, 50.0)))
                .element(MockElement::plain(4, Rect::new(0.0, 0.0, 10.0, 10.0)).child_of(3))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(5.0, 5.0)),
            Classification::Actionable(ElementId::new(3))
        );
    }

    #[test]
    fn test_nearest_qualifying_ancestor_wins() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::marked(1, Rect::new(0.0, 0.0, 100.0, 100.0)))
                .element(MockElement::button(2, Rect::new(0.0, 0.0, 50.0, 50.0)).child_of(1))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(5.0, 5.0)),
            Classification::Actionable(ElementId::new(2))
        );
    }

    #[test]
    fn test_exempt_toggle_and_its_descendants_are_exempt() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::button(9, Rect::new(0.0, 0.0, 60.0, 30.0)).exempt())
                .element(MockElement::plain(10, Rect::new(5.0, 5.0, 10.0, 10.0)).child_of(9))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(30.0, 20.0)),
            Classification::Exempt(ElementId::new(9))
        );
        assert_eq!(
            c.classify(Point::new(6.0, 6.0)),
            Classification::Exempt(ElementId::new(9))
        );
        assert_eq!(c.classify(Point::new(6.0, 6.0)).actionable_target(), None);
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let c = classifier(
            MockUiSurface::builder()
                .element(MockElement::plain(1, Rect::new(0.0, 0.0, 10.0, 10.0)).child_of(2))
                .element(MockElement::plain(2, Rect::new(50.0, 50.0, 10.0, 10.0)).child_of(1))
                .build(),
        );
        assert_eq!(
            c.classify(Point::new(1.0, 1.0)),
            Classification::Inert(ElementId::new(1))
        );
    }
}
