use derive_more::Into;
use wasm_bindgen::UnwrapThrowExt;
use web_sys::{HtmlElement, Node};

use crate::{class, dom};

pub fn caret() -> CaretBuilder {
    CaretBuilder { inverted: false }
}

pub struct CaretBuilder {
    inverted: bool,
}

impl CaretBuilder {
    /// Points the glyph up instead of down, for drop-up mode.
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn build(self) -> Caret {
        let element = dom::element("span", class::CARET);

        if self.inverted {
            element
                .style()
                .set_property("transform", "rotate(180deg)")
                .unwrap_throw();
        }

        Caret(element)
    }
}

/// The direction glyph rendered after plain-text dropdown labels.
#[derive(Into)]
pub struct Caret(HtmlElement);

impl Caret {
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }
}

impl From<Caret> for Node {
    fn from(caret: Caret) -> Self {
        caret.0.into()
    }
}
