use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Document, EventTarget, HtmlElement, HtmlHeadElement, Node, Text};

pub fn document() -> Document {
    web_sys::window().unwrap_throw().document().unwrap_throw()
}

pub fn head() -> HtmlHeadElement {
    document().head().unwrap_throw()
}

/// Creates a `<tag class="…">` element.
pub fn element(tag: &str, class: &str) -> HtmlElement {
    let element: HtmlElement = document()
        .create_element(tag)
        .unwrap_throw()
        .dyn_into()
        .unwrap_throw();

    if !class.is_empty() {
        element.set_class_name(class);
    }

    element
}

pub fn text(text: &str) -> Text {
    document().create_text_node(text)
}

/// Sets an inline style property measured in pixels.
pub fn set_px(element: &HtmlElement, property: &str, pixels: f64) {
    element
        .style()
        .set_property(property, &format!("{pixels}px"))
        .unwrap_throw();
}

/// Whether an event target is a node inside `boundary`, or `boundary`
/// itself.
pub fn within(boundary: &Node, target: Option<EventTarget>) -> bool {
    target
        .as_ref()
        .and_then(|target| target.dyn_ref::<Node>())
        .is_some_and(|target| boundary.contains(Some(target)))
}
