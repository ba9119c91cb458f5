//! Mock interaction surface: a flat list of rectangles with parent links.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use crate::domain::ElementId;
use crate::domain::IndicatorState;
use crate::domain::Point;
use crate::domain::Rect;
use crate::domain::Viewport;
use crate::usecases::ports::Indicator;
use crate::usecases::ports::SurfaceError;
use crate::usecases::ports::UiSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    Focus(ElementId),
    PointerDown(ElementId),
    Click(ElementId),
    Highlight(ElementId, bool),
}

#[derive(Debug, Clone)]
pub struct MockElement {
    pub id: ElementId,
    pub rect: Rect,
    pub parent: Option<ElementId>,
    pub native: bool,
    pub marker: bool,
    pub exempt: bool,
}

impl MockElement {
    pub fn plain(id: u64, rect: Rect) -> Self {
        Self {
            id: ElementId::new(id),
            rect,
            parent: None,
            native: false,
            marker: false,
            exempt: false,
        }
    }

    pub fn button(id: u64, rect: Rect) -> Self {
        Self {
            native: true,
            ..Self::plain(id, rect)
        }
    }

    pub fn marked(id: u64, rect: Rect) -> Self {
        Self {
            marker: true,
            ..Self::plain(id, rect)
        }
    }

    pub fn exempt(mut self) -> Self {
        self.exempt = true;
        self
    }

    pub fn child_of(mut self, parent: u64) -> Self {
        self.parent = Some(ElementId::new(parent));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorRecord {
    pub injected: usize,
    pub disposed: usize,
    pub position: Option<Point>,
    pub state: IndicatorState,
    pub states: Vec<IndicatorState>,
}

impl IndicatorRecord {
    pub fn is_attached(&self) -> bool {
        self.injected > self.disposed
    }
}

struct MockIndicator {
    record: Arc<Mutex<IndicatorRecord>>,
}

impl Indicator for MockIndicator {
    fn set_position(&mut self, position: Point) {
        self.record.lock().unwrap().position = Some(position);
    }

    fn set_state(&mut self, state: IndicatorState) {
        let mut record = self.record.lock().unwrap();
        record.state = state;
        record.states.push(state);
    }

    fn dispose(self: Box<Self>) -> Result<(), SurfaceError> {
        self.record.lock().unwrap().disposed += 1;
        Ok(())
    }
}

pub struct MockUiSurface {
    viewport: Viewport,
    elements: Vec<MockElement>,
    inject_error: Option<SurfaceError>,
    detached: Mutex<HashSet<ElementId>>,
    calls: Mutex<Vec<SurfaceCall>>,
    highlighted: Mutex<HashSet<ElementId>>,
    indicator: Arc<Mutex<IndicatorRecord>>,
}

impl MockUiSurface {
    pub fn builder() -> MockUiSurfaceBuilder {
        MockUiSurfaceBuilder::new()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn click_count(&self, id: u64) -> usize {
        let target = ElementId::new(id);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == SurfaceCall::Click(target))
            .count()
    }

    pub fn total_clicks(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Click(_)))
            .count()
    }

    pub fn is_highlighted(&self, id: u64) -> bool {
        self.highlighted.lock().unwrap().contains(&ElementId::new(id))
    }

    pub fn detach(&self, id: u64) {
        self.detached.lock().unwrap().insert(ElementId::new(id));
    }

    pub fn indicator(&self) -> IndicatorRecord {
        self.indicator.lock().unwrap().clone()
    }

    fn find(&self, element: ElementId) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.id == element)
    }

    fn check_attached(&self, element: ElementId) -> Result<(), SurfaceError> {
        if self.detached.lock().unwrap().contains(&element) {
            return Err(SurfaceError::Detached(element));
        }
        Ok(())
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl UiSurface for MockUiSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_at(&self, point: Point) -> Option<ElementId> {
        // Later elements are painted on top.
        self.elements
            .iter()
            .rev()
            .find(|e| e.rect.contains(point))
            .map(|e| e.id)
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.find(element).and_then(|e| e.parent)
    }

    fn is_natively_interactive(&self, element: ElementId) -> bool {
        self.find(element).is_some_and(|e| e.native)
    }

    fn has_gaze_marker(&self, element: ElementId) -> bool {
        self.find(element).is_some_and(|e| e.marker)
    }

    fn is_exempt_control(&self, element: ElementId) -> bool {
        self.find(element).is_some_and(|e| e.exempt)
    }

    fn focus(&self, element: ElementId) -> Result<(), SurfaceError> {
        self.check_attached(element)?;
        self.record(SurfaceCall::Focus(element));
        Ok(())
    }

    fn dispatch_pointer_down(&self, element: ElementId) -> Result<(), SurfaceError> {
        self.check_attached(element)?;
        self.record(SurfaceCall::PointerDown(element));
        Ok(())
    }

    fn click(&self, element: ElementId) -> Result<(), SurfaceError> {
        self.check_attached(element)?;
        self.record(SurfaceCall::Click(element));
        Ok(())
    }

    fn set_highlight(&self, element: ElementId, highlighted: bool) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Highlight(element, highlighted));
        let mut set = self.highlighted.lock().unwrap();
        if highlighted {
            set.insert(element);
        } else {
            set.remove(&element);
        }
        Ok(())
    }

    fn inject_indicator(&self) -> Result<Box<dyn Indicator>, SurfaceError> {
        if let Some(ref err) = self.inject_error {
            return Err(err.clone());
        }
        self.indicator.lock().unwrap().injected += 1;
        Ok(Box::new(MockIndicator {
            record: Arc::clone(&self.indicator),
        }))
    }
}

pub struct MockUiSurfaceBuilder {
    viewport: Viewport,
    elements: Vec<MockElement>,
    inject_error: Option<SurfaceError>,
}

impl MockUiSurfaceBuilder {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(1000.0, 1000.0),
            elements: Vec::new(),
            inject_error: None,
        }
    }

    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    /// Elements added later are painted above earlier ones.
    pub fn element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_inject_error(mut self, err: SurfaceError) -> Self {
        self.inject_error = Some(err);
        self
    }

    pub fn build(self) -> MockUiSurface {
        MockUiSurface {
            viewport: self.viewport,
            elements: self.elements,
            inject_error: self.inject_error,
            detached: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            highlighted: Mutex::new(HashSet::new()),
            indicator: Arc::new(Mutex::new(IndicatorRecord::default())),
        }
    }
}

impl Default for MockUiSurfaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
