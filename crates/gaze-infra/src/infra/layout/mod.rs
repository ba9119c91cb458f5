//! JSON layout surface: a hit-testing model of a UI tree.
//!
//! Elements are flattened in paint order (parent before children, siblings in
//! document order), so the last element containing a point is the topmost
//! one. Nothing is rendered; activations and highlights are recorded so a
//! host can report them.

mod document;
mod indicator;
mod scroll;

use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

use crate::common::mutex_lock_or_recover;
use crate::domain::ElementId;
use crate::domain::IndicatorState;
use crate::domain::Point;
use crate::domain::Rect;
use crate::domain::Viewport;
use crate::usecases::ports::Indicator;
use crate::usecases::ports::ScrollRegionHandle;
use crate::usecases::ports::ScrollRegionLookup;
use crate::usecases::ports::SurfaceError;
use crate::usecases::ports::UiSurface;

pub use document::ElementDoc;
pub use document::ElementKind;
pub use document::LayoutDocument;
pub use document::RectDoc;
pub use document::ScrollRegionDoc;
pub use document::ViewportDoc;
pub use scroll::LayoutScrollRegion;

use indicator::IndicatorSlot;
use indicator::LayoutIndicator;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Viewport must have positive size, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("Element {id} has a negative or non-finite rect")]
    InvalidRect { id: u64 },
    #[error("Element id {0} is used more than once")]
    DuplicateId(u64),
    #[error("Scroll region '{0}' is declared more than once")]
    DuplicateSelector(String),
}

#[derive(Debug, Clone)]
struct LayoutElement {
    id: ElementId,
    parent: Option<ElementId>,
    rect: Rect,
    kind: ElementKind,
    label: Option<String>,
    gaze: bool,
    exempt: bool,
    detached: bool,
}

#[derive(Debug, Default)]
struct InteractionLog {
    focused: Option<ElementId>,
    pointer_downs: Vec<ElementId>,
    clicks: Vec<ElementId>,
    highlighted: HashSet<ElementId>,
}

#[derive(Debug)]
pub struct LayoutSurface {
    viewport: Viewport,
    elements: Vec<LayoutElement>,
    index: HashMap<ElementId, usize>,
    regions: Vec<Arc<LayoutScrollRegion>>,
    log: Mutex<InteractionLog>,
    indicator: Arc<Mutex<IndicatorSlot>>,
}

impl LayoutSurface {
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let raw = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        let document: LayoutDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_document(document: LayoutDocument) -> Result<Self, LayoutError> {
        let ViewportDoc { width, height } = document.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidViewport { width, height });
        }

        let mut elements = Vec::new();
        let mut index = HashMap::new();
        let mut pending: Vec<(Option<ElementId>, ElementDoc)> = document
            .elements
            .into_iter()
            .rev()
            .map(|doc| (None, doc))
            .collect();
        // Depth-first, pushing children reversed so they pop in document order.
        while let Some((parent, doc)) = pending.pop() {
            let id = ElementId::new(doc.id);
            if index.insert(id, elements.len()).is_some() {
                return Err(LayoutError::DuplicateId(doc.id));
            }
            let rect = rect_from_doc(doc.id, doc.rect)?;
            pending.extend(doc.children.into_iter().rev().map(|child| (Some(id), child)));
            elements.push(LayoutElement {
                id,
                parent,
                rect,
                kind: doc.kind,
                label: doc.label,
                gaze: doc.gaze,
                exempt: doc.exempt,
                detached: doc.detached,
            });
        }

        let mut regions: Vec<Arc<LayoutScrollRegion>> = Vec::new();
        for region in document.scroll_regions {
            if regions.iter().any(|r| r.selector() == region.selector) {
                return Err(LayoutError::DuplicateSelector(region.selector));
            }
            regions.push(Arc::new(LayoutScrollRegion::new(
                region.selector,
                region.max_scroll,
                region.scroll_top,
            )));
        }

        debug!(
            elements = elements.len(),
            regions = regions.len(),
            "Layout loaded"
        );
        Ok(Self {
            viewport: Viewport::new(width, height),
            elements,
            index,
            regions,
            log: Mutex::new(InteractionLog::default()),
            indicator: Arc::new(Mutex::new(IndicatorSlot::default())),
        })
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn label(&self, element: ElementId) -> Option<&str> {
        self.get(element).and_then(|e| e.label.as_deref())
    }

    pub fn kind(&self, element: ElementId) -> Option<ElementKind> {
        self.get(element).map(|e| e.kind)
    }

    pub fn regions(&self) -> &[Arc<LayoutScrollRegion>] {
        &self.regions
    }

    pub fn clicks(&self) -> Vec<ElementId> {
        mutex_lock_or_recover(&self.log).clicks.clone()
    }

    pub fn pointer_downs(&self) -> Vec<ElementId> {
        mutex_lock_or_recover(&self.log).pointer_downs.clone()
    }

    pub fn focused(&self) -> Option<ElementId> {
        mutex_lock_or_recover(&self.log).focused
    }

    pub fn is_highlighted(&self, element: ElementId) -> bool {
        mutex_lock_or_recover(&self.log).highlighted.contains(&element)
    }

    pub fn indicator_attached(&self) -> bool {
        mutex_lock_or_recover(&self.indicator).attached
    }

    pub fn indicator_position(&self) -> Option<Point> {
        mutex_lock_or_recover(&self.indicator).position
    }

    pub fn indicator_state(&self) -> IndicatorState {
        mutex_lock_or_recover(&self.indicator).state
    }

    fn get(&self, element: ElementId) -> Option<&LayoutElement> {
        self.index.get(&element).map(|&i| &self.elements[i])
    }

    fn attached(&self, element: ElementId) -> Result<&LayoutElement, SurfaceError> {
        match self.get(element) {
            Some(e) if !e.detached => Ok(e),
            _ => Err(SurfaceError::Detached(element)),
        }
    }
}

fn rect_from_doc(id: u64, rect: RectDoc) -> Result<Rect, LayoutError> {
    let RectDoc {
        x,
        y,
        width,
        height,
    } = rect;
    let finite = [x, y, width, height].iter().all(|v| v.is_finite());
    if !finite || width < 0.0 || height < 0.0 {
        return Err(LayoutError::InvalidRect { id });
    }
    Ok(Rect::new(x, y, width, height))
}

impl UiSurface for LayoutSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.rect.contains(point))
            .map(|e| e.id)
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.get(element).and_then(|e| e.parent)
    }

    fn is_natively_interactive(&self, element: ElementId) -> bool {
        self.get(element)
            .is_some_and(|e| e.kind.is_natively_interactive())
    }

    fn has_gaze_marker(&self, element: ElementId) -> bool {
        self.get(element).is_some_and(|e| e.gaze)
    }

    fn is_exempt_control(&self, element: ElementId) -> bool {
        self.get(element).is_some_and(|e| e.exempt)
    }

    fn focus(&self, element: ElementId) -> Result<(), SurfaceError> {
        self.attached(element)?;
        mutex_lock_or_recover(&self.log).focused = Some(element);
        Ok(())
    }

    fn dispatch_pointer_down(&self, element: ElementId) -> Result<(), SurfaceError> {
        self.attached(element)?;
        mutex_lock_or_recover(&self.log).pointer_downs.push(element);
        Ok(())
    }

    fn click(&self, element: ElementId) -> Result<(), SurfaceError> {
        let target = self.attached(element)?;
        debug!(
            target = %element,
            label = target.label.as_deref().unwrap_or(""),
            "Click dispatched"
        );
        mutex_lock_or_recover(&self.log).clicks.push(element);
        Ok(())
    }

    fn set_highlight(&self, element: ElementId, highlighted: bool) -> Result<(), SurfaceError> {
        let mut log = mutex_lock_or_recover(&self.log);
        if highlighted {
            self.attached(element)?;
            log.highlighted.insert(element);
        } else {
            log.highlighted.remove(&element);
        }
        Ok(())
    }

    fn inject_indicator(&self) -> Result<Box<dyn Indicator>, SurfaceError> {
        let indicator = LayoutIndicator::attach(Arc::clone(&self.indicator))?;
        Ok(Box::new(indicator))
    }
}

impl ScrollRegionLookup for LayoutSurface {
    fn find(&self, selector: &str) -> Option<ScrollRegionHandle> {
        self.regions
            .iter()
            .find(|r| r.selector() == selector)
            .map(|r| Arc::clone(r) as ScrollRegionHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"{
        "viewport": { "width": 800, "height": 600 },
        "scroll_regions": [{ "selector": "chat-messages", "max_scroll": 1000 }],
        "elements": [
            {
                "id": 1,
                "rect": { "x": 0, "y": 0, "width": 800, "height": 600 },
                "children": [
                    {
                        "id": 2,
                        "kind": "button",
                        "label": "Send",
                        "rect": { "x": 600, "y": 500, "width": 150, "height": 60 },
                        "children": [
                            { "id": 3, "kind": "text", "rect": { "x": 610, "y": 510, "width": 40, "height": 40 } }
                        ]
                    },
                    { "id": 4, "kind": "button", "exempt": true, "rect": { "x": 20, "y": 20, "width": 60, "height": 30 } },
                    { "id": 5, "gaze": true, "detached": true, "rect": { "x": 100, "y": 100, "width": 100, "height": 100 } }
                ]
            }
        ]
    }"#;

    fn surface() -> LayoutSurface {
        LayoutSurface::from_json(LAYOUT).unwrap()
    }

    #[test]
    fn test_hit_test_returns_topmost_element() {
        let surface = surface();
        assert_eq!(surface.element_count(), 5);
        assert_eq!(surface.element_at(Point::new(620.0, 520.0)), Some(ElementId::new(3)));
        assert_eq!(surface.element_at(Point::new(700.0, 520.0)), Some(ElementId::new(2)));
        assert_eq!(surface.element_at(Point::new(400.0, 300.0)), Some(ElementId::new(1)));
        assert_eq!(surface.element_at(Point::new(900.0, 300.0)), None);
    }

    #[test]
    fn test_element_traits() {
        let surface = surface();
        assert_eq!(surface.parent_of(ElementId::new(3)), Some(ElementId::new(2)));
        assert_eq!(surface.parent_of(ElementId::new(1)), None);
        assert!(surface.is_natively_interactive(ElementId::new(2)));
        assert!(!surface.is_natively_interactive(ElementId::new(3)));
        assert!(surface.is_exempt_control(ElementId::new(4)));
        assert!(surface.has_gaze_marker(ElementId::new(5)));
        assert_eq!(surface.label(ElementId::new(2)), Some("Send"));
        assert_eq!(surface.kind(ElementId::new(3)), Some(ElementKind::Text));
    }

    #[test]
    fn test_activation_on_detached_element_fails() {
        let surface = surface();
        let id = ElementId::new(5);
        assert_eq!(surface.focus(id), Err(SurfaceError::Detached(id)));
        assert_eq!(surface.click(id), Err(SurfaceError::Detached(id)));
        assert!(surface.clicks().is_empty());
    }

    #[test]
    fn test_activation_is_recorded() {
        let surface = surface();
        let id = ElementId::new(2);
        surface.focus(id).unwrap();
        surface.dispatch_pointer_down(id).unwrap();
        surface.click(id).unwrap();
        surface.set_highlight(id, true).unwrap();
        assert_eq!(surface.focused(), Some(id));
        assert_eq!(surface.pointer_downs(), vec![id]);
        assert_eq!(surface.clicks(), vec![id]);
        assert!(surface.is_highlighted(id));
        surface.set_highlight(id, false).unwrap();
        assert!(!surface.is_highlighted(id));
    }

    #[test]
    fn test_single_indicator_lifecycle() {
        let surface = surface();
        let mut indicator = surface.inject_indicator().unwrap();
        assert!(surface.indicator_attached());
        assert!(surface.inject_indicator().is_err());

        indicator.set_position(Point::new(10.0, 20.0));
        indicator.set_state(IndicatorState::Hover);
        assert_eq!(surface.indicator_position(), Some(Point::new(10.0, 20.0)));
        assert_eq!(surface.indicator_state(), IndicatorState::Hover);

        indicator.dispose().unwrap();
        assert!(!surface.indicator_attached());
        assert!(surface.inject_indicator().is_ok());
    }

    #[test]
    fn test_scroll_region_lookup() {
        let surface = surface();
        let region = surface.find("chat-messages").unwrap();
        region.scroll_by(30.0);
        assert_eq!(region.scroll_top(), 30.0);
        assert_eq!(surface.regions()[0].ticks(), 1);
        assert!(surface.find("sidebar").is_none());
    }

    #[test]
    fn test_rejects_invalid_layouts() {
        let zero_viewport = r#"{ "viewport": { "width": 0, "height": 600 } }"#;
        assert!(matches!(
            LayoutSurface::from_json(zero_viewport),
            Err(LayoutError::InvalidViewport { .. })
        ));

        let duplicate = r#"{
            "viewport": { "width": 10, "height": 10 },
            "elements": [
                { "id": 1, "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } },
                { "id": 1, "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } }
            ]
        }"#;
        assert!(matches!(
            LayoutSurface::from_json(duplicate),
            Err(LayoutError::DuplicateId(1))
        ));

        let negative = r#"{
            "viewport": { "width": 10, "height": 10 },
            "elements": [{ "id": 7, "rect": { "x": 0, "y": 0, "width": -1, "height": 1 } }]
        }"#;
        assert!(matches!(
            LayoutSurface::from_json(negative),
            Err(LayoutError::InvalidRect { id: 7 })
        ));

        assert!(matches!(
            LayoutSurface::from_json("{ \"viewport\": 3 }"),
            Err(LayoutError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = LayoutSurface::load(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/layout.json"));
    }
}
