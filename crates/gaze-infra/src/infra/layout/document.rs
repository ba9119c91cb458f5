//! On-disk layout format.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    pub viewport: ViewportDoc,
    #[serde(default)]
    pub scroll_regions: Vec<ScrollRegionDoc>,
    #[serde(default)]
    pub elements: Vec<ElementDoc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportDoc {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollRegionDoc {
    pub selector: String,
    #[serde(default)]
    pub max_scroll: f64,
    #[serde(default)]
    pub scroll_top: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectDoc {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Button,
    Link,
    #[default]
    Container,
    Text,
    Input,
}

impl ElementKind {
    /// Button- and link-class elements activate on click without opting in.
    pub fn is_natively_interactive(self) -> bool {
        matches!(self, ElementKind::Button | ElementKind::Link)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDoc {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    pub rect: RectDoc,
    #[serde(default)]
    pub kind: ElementKind,
    /// Explicit gaze opt-in for elements that are not natively interactive.
    #[serde(default)]
    pub gaze: bool,
    #[serde(default)]
    pub exempt: bool,
    /// Simulates an element removed from the tree after it was hit-tested.
    #[serde(default)]
    pub detached: bool,
    #[serde(default)]
    pub children: Vec<ElementDoc>,
}
