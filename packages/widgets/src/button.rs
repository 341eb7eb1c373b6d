use strum::{AsRefStr, Display};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{HtmlButtonElement, MouseEvent, Node};

use crate::{class, dom, listen::Listener};

#[derive(Copy, Clone, Eq, PartialEq, Default, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Color {
    #[default]
    Default,
    Primary,
    Danger,
    Dark,
    Accent,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Variant {
    #[default]
    Default,
    Flat,
    Raised,
    Fab,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ButtonSize {
    #[default]
    Default,
    Small,
    Large,
}

pub fn button() -> ButtonBuilder {
    ButtonBuilder {
        class: String::new(),
        color: Color::default(),
        variant: Variant::default(),
        size: ButtonSize::default(),
        disabled: false,
        children: Vec::new(),
        on_click: None,
    }
}

pub struct ButtonBuilder {
    class: String,
    color: Color,
    variant: Variant,
    size: ButtonSize,
    disabled: bool,
    children: Vec<Node>,
    on_click: Option<Box<dyn FnMut(&MouseEvent)>>,
}

impl ButtonBuilder {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(dom::text(text).into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Button {
        let class = class_string(&self.class, self.color, self.variant, self.size);
        let element: HtmlButtonElement = dom::element("button", &class).dyn_into().unwrap_throw();

        element.set_type("button");
        element.set_disabled(self.disabled);

        for child in &self.children {
            element.append_child(child).unwrap_throw();
        }

        let click = self.on_click.map(|mut handler| {
            Listener::new(&element, "click", move |event| handler(event.unchecked_ref()))
        });

        Button {
            element,
            _click: click,
        }
    }
}

/// A push button.
///
/// Keep the value alive for as long as the element is mounted: dropping it
/// detaches the click handler.
pub struct Button {
    element: HtmlButtonElement,
    _click: Option<Listener>,
}

impl Button {
    pub fn element(&self) -> &HtmlButtonElement {
        &self.element
    }
}

fn class_string(extra: &str, color: Color, variant: Variant, size: ButtonSize) -> String {
    let mut classes = vec![class::BUTTON.to_string()];

    classes.extend(modifier(color, Color::Default));
    classes.extend(modifier(variant, Variant::Default));
    classes.extend(modifier(size, ButtonSize::Default));

    if !extra.is_empty() {
        classes.push(extra.to_string());
    }

    classes.join(" ")
}

fn modifier<T: AsRef<str> + PartialEq>(value: T, default: T) -> Option<String> {
    (value != default).then(|| format!("{}--{}", class::BUTTON, value.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::{class_string, ButtonSize, Color, Variant};

    #[test]
    fn default_button_has_no_modifiers() {
        let class = class_string("", Color::Default, Variant::Default, ButtonSize::Default);

        assert_eq!(class, "awn-btn");
    }

    #[test]
    fn modifiers_derive_from_variant_names() {
        let class = class_string("", Color::Primary, Variant::Raised, ButtonSize::Small);

        assert_eq!(class, "awn-btn awn-btn--primary awn-btn--raised awn-btn--small");
    }

    #[test]
    fn extra_classes_come_last() {
        let class = class_string("menu-toggle", Color::Danger, Variant::Default, ButtonSize::Default);

        assert_eq!(class, "awn-btn awn-btn--danger menu-toggle");
    }
}
