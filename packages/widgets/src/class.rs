//! Class names shared between the widgets and the stylesheet.

use std::cell::Cell;

use wasm_bindgen::UnwrapThrowExt;

use crate::dom;

pub const DROPDOWN: &str = "awn-dropdown";
pub const MENU: &str = "awn-dropdown__menu";
pub const MENU_RIGHT: &str = "awn-dropdown__menu--right";
pub const MENU_UP: &str = "awn-dropdown__menu--up";
pub const OPEN: &str = "awn--is-open";
pub const BUTTON: &str = "awn-btn";
pub const CARET: &str = "awn-caret";

/// The rules backing these names, for pages that don't bring their own
/// styling.
pub const STYLE_SHEET: &str = include_str!("../awning.css");

thread_local! {
    static STYLE_MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Adds [`STYLE_SHEET`] to the document head. Only the first call mounts
/// anything; the rest are no-ops.
pub fn mount_style() {
    if STYLE_MOUNTED.with(|mounted| mounted.replace(true)) {
        return;
    }

    let style = dom::element("style", "");
    style.set_text_content(Some(STYLE_SHEET));
    dom::head().append_child(&style).unwrap_throw();
}
