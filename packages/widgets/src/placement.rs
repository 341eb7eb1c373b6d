use web_sys::DomRect;

/// The slice of an element's bounding box that menu positioning reads.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl From<&DomRect> for Rect {
    fn from(rect: &DomRect) -> Self {
        Self {
            top: rect.top(),
            height: rect.height(),
        }
    }
}

/// Which wrapper edge the menu offset is measured from.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub fn style_property(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Pixels from the wrapper edge to the menu edge, placing the menu flush
/// against the far side of the trigger.
pub fn menu_offset(wrapper: Rect, trigger: Rect) -> f64 {
    (trigger.top - wrapper.top) + trigger.height
}

/// The menu hangs from its top edge, except in drop-up mode where the same
/// offset is applied to its bottom edge.
pub fn offset_edge(drop_up: bool) -> Edge {
    if drop_up {
        Edge::Bottom
    } else {
        Edge::Top
    }
}
