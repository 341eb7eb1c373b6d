use std::{
    cell::Cell,
    mem,
    rc::{Rc, Weak},
};

use clonelet::clone;
use futures_signals::signal::ReadOnlyMutable;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::{
    button::{button, Button, ButtonSize, Color, Variant},
    caret::caret,
    class, dom,
    listen::{self, Listener, SharedHandler},
    placement::{self, Rect},
    util,
};

mod interaction;

use interaction::{Interaction, MenuHit, Surface, TriggerClick};

/// Attribute naming a menu entry's selection value.
pub const VALUE_ATTRIBUTE: &str = "data-awn-value";

/// Horizontal alignment of the open menu within the wrapper.
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub enum MenuAlign {
    #[default]
    Left,
    Right,
}

pub fn dropdown() -> DropdownBuilder {
    DropdownBuilder {
        class: String::new(),
        color: Color::default(),
        variant: Variant::default(),
        size: ButtonSize::default(),
        label: Label::Text(String::new()),
        align: MenuAlign::default(),
        drop_up: false,
        disabled: false,
        on_trigger_click: None,
        on_select: None,
        items: Vec::new(),
        children: Vec::new(),
    }
}

pub struct DropdownBuilder {
    class: String,
    color: Color,
    variant: Variant,
    size: ButtonSize,
    label: Label,
    align: MenuAlign,
    drop_up: bool,
    disabled: bool,
    on_trigger_click: Option<Box<dyn FnMut(&MouseEvent)>>,
    on_select: Option<Box<dyn FnMut(Option<&str>)>>,
    items: Vec<Item>,
    children: Vec<Node>,
}

impl DropdownBuilder {
    /// Extra classes for the wrapper element.
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

    /// Plain-text trigger label, rendered with a caret after it.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Label::Text(label.into());
        self
    }

    /// Arbitrary trigger content, rendered without the caret.
    pub fn label_node(mut self, label: impl Into<Node>) -> Self {
        self.label = Label::Node(label.into());
        self
    }

    pub fn align_menu(mut self, align: MenuAlign) -> Self {
        self.align = align;
        self
    }

    /// Opens the menu above the trigger instead of below it.
    pub fn drop_up(mut self, drop_up: bool) -> Self {
        self.drop_up = drop_up;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Runs after every trigger click that toggled the menu.
    pub fn on_trigger_click(mut self, handler: impl FnMut(&MouseEvent) + 'static) -> Self {
        self.on_trigger_click = Some(Box::new(handler));
        self
    }

    /// Runs with the clicked entry's [`VALUE_ATTRIBUTE`] value whenever a
    /// selectable entry is clicked while the menu is open.
    pub fn on_select(mut self, handler: impl FnMut(Option<&str>) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Appends a selectable entry to the menu.
    pub fn item(mut self, item: ItemBuilder) -> Self {
        let item = item.build();

        self.children.push(item.element().clone().into());
        self.items.push(item);
        self
    }

    /// Appends arbitrary content to the menu.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn build(self) -> Dropdown {
        let Self {
            class,
            color,
            variant,
            size,
            label,
            align,
            drop_up,
            disabled,
            mut on_trigger_click,
            on_select,
            items,
            children,
        } = self;

        let has_menu = !children.is_empty();
        let wrapper = dom::element("div", &wrapper_classes(&class));
        let menu = dom::element("ul", &menu_classes(align, drop_up));
        let placeholder = dom::element("div", "");

        for child in &children {
            menu.append_child(child).unwrap_throw();
        }

        let interaction = Rc::new_cyclic(|interaction: &Weak<Interaction<DomSurface>>| {
            let trigger = button()
                .color(color)
                .variant(variant)
                .size(size)
                .disabled(disabled)
                .child(trigger_label(label, drop_up))
                .on_click({
                    clone!(interaction);
                    move |event| {
                        let Some(interaction) = interaction.upgrade() else {
                            return;
                        };

                        let click = TriggerClick {
                            primary: event.button() == 0,
                            default_prevented: event.default_prevented(),
                        };

                        match interaction.trigger_click(click) {
                            Ok(true) => {
                                if let Some(on_trigger_click) = &mut on_trigger_click {
                                    on_trigger_click(event);
                                }
                            }
                            Ok(false) => (),
                            Err(error) => util::report_error(error),
                        }
                    }
                })
                .build();

            wrapper.append_child(trigger.element()).unwrap_throw();
            wrapper.append_child(&placeholder).unwrap_throw();

            // Selection listener, attached to the menu element once. The
            // menu leaves the document while closed, so it can't fire then.
            let select = Listener::new(&menu, "click", {
                clone!(interaction);
                move |event| {
                    let Some(interaction) = interaction.upgrade() else {
                        return;
                    };

                    let target = event
                        .target()
                        .and_then(|target| target.dyn_into::<Element>().ok());
                    let entry = target.filter(|target| target.tag_name() == "A");
                    let value = entry
                        .as_ref()
                        .and_then(|entry| entry.get_attribute(VALUE_ATTRIBUTE));

                    let hit = if entry.is_some() {
                        MenuHit::Entry(value.as_deref())
                    } else {
                        MenuHit::Other
                    };

                    interaction.menu_click(hit, event.default_prevented());
                }
            });

            // The document pair is created once and reused for every open,
            // so the event bus always sees the same handler identities.
            let outside_click = listen::shared_handler({
                clone!(interaction, wrapper);
                move |event| {
                    let Some(interaction) = interaction.upgrade() else {
                        return;
                    };

                    interaction.document_click(dom::within(&wrapper, event.target()));
                }
            });

            let dismiss_key = listen::shared_handler({
                clone!(interaction);
                move |event| {
                    let Some(interaction) = interaction.upgrade() else {
                        return;
                    };

                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        interaction.key_down(&event.key());
                    }
                }
            });

            Interaction::new(
                DomSurface {
                    wrapper: wrapper.clone(),
                    trigger,
                    menu,
                    placeholder,
                    drop_up,
                    outside_click,
                    dismiss_key,
                    document_listeners: Cell::new(None),
                    _select: select,
                    _items: items,
                },
                has_menu,
                disabled,
                on_select,
            )
        });

        Dropdown { interaction }
    }
}

/// A dropdown menu widget.
///
/// The handle owns the widget: dropping it detaches every listener the
/// widget registered, including the document-level pair. Call
/// [`forget`](Self::forget) to keep a widget alive for the life of the
/// page.
#[must_use = "dropping a `Dropdown` tears the widget down"]
pub struct Dropdown {
    interaction: Rc<Interaction<DomSurface>>,
}

impl Dropdown {
    /// The wrapper element, ready to append to a parent. Geometry is
    /// measured on open, so the widget must be in the document by the time
    /// the trigger is first clicked.
    pub fn element(&self) -> &HtmlElement {
        &self.interaction.surface().wrapper
    }

    /// The current open state, observable as a signal.
    pub fn opened(&self) -> ReadOnlyMutable<bool> {
        self.interaction.opened()
    }

    /// Leaks the handle, keeping the widget alive indefinitely.
    pub fn forget(self) {
        mem::forget(self);
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        self.interaction.teardown();
    }
}

/// The widget's DOM: a wrapper around the trigger and either the menu or a
/// placeholder, swapped on open and close.
struct DomSurface {
    wrapper: HtmlElement,
    trigger: Button,
    menu: HtmlElement,
    placeholder: HtmlElement,
    drop_up: bool,
    outside_click: SharedHandler,
    dismiss_key: SharedHandler,
    document_listeners: Cell<Option<[Listener; 2]>>,
    _select: Listener,
    _items: Vec<Item>,
}

impl Surface for DomSurface {
    fn measure(&self) -> (Rect, Rect) {
        let wrapper = self.wrapper.get_bounding_client_rect();
        let trigger = self.trigger.element().get_bounding_client_rect();

        (Rect::from(&wrapper), Rect::from(&trigger))
    }

    fn show_menu(&self, offset: f64) {
        let edge = placement::offset_edge(self.drop_up);

        dom::set_px(&self.menu, edge.style_property(), offset);
        self.wrapper
            .replace_child(&self.menu, &self.placeholder)
            .unwrap_throw();
    }

    fn hide_menu(&self) {
        self.wrapper
            .replace_child(&self.placeholder, &self.menu)
            .unwrap_throw();
    }

    fn attach_listeners(&self) {
        let document = dom::document();

        self.document_listeners.set(Some([
            Listener::attach(&document, "click", &self.outside_click),
            Listener::attach(&document, "keydown", &self.dismiss_key),
        ]));
    }

    fn detach_listeners(&self) {
        self.document_listeners.set(None);
    }
}

pub fn item(label: impl Into<String>) -> ItemBuilder {
    ItemBuilder {
        label: label.into(),
        class: String::new(),
        value: None,
        href: None,
        target: None,
        on_click: None,
    }
}

pub struct ItemBuilder {
    label: String,
    class: String,
    value: Option<String>,
    href: Option<String>,
    target: Option<String>,
    on_click: Option<Box<dyn FnMut(&MouseEvent)>>,
}

impl ItemBuilder {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// The selection value reported through `on_select`.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Entry-level click handler. Calling `prevent_default` inside keeps
    /// the menu open after the click.
    pub fn on_click(mut self, handler: impl FnMut(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Item {
        let anchor = dom::element("a", "");

        anchor.append_child(&dom::text(&self.label)).unwrap_throw();

        if let Some(value) = &self.value {
            anchor.set_attribute(VALUE_ATTRIBUTE, value).unwrap_throw();
        }

        if let Some(href) = &self.href {
            anchor.set_attribute("href", href).unwrap_throw();
        }

        if let Some(target) = &self.target {
            anchor.set_attribute("target", target).unwrap_throw();
        }

        let click = self.on_click.map(|mut handler| {
            Listener::new(&anchor, "click", move |event| handler(event.unchecked_ref()))
        });

        let element = dom::element("li", &self.class);

        element.append_child(&anchor).unwrap_throw();

        Item {
            element,
            _click: click,
        }
    }
}

/// One selectable menu entry: `<li><a>…</a></li>`.
pub struct Item {
    element: HtmlElement,
    _click: Option<Listener>,
}

impl Item {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

enum Label {
    Text(String),
    Node(Node),
}

fn trigger_label(label: Label, drop_up: bool) -> Node {
    match label {
        Label::Text(text) => {
            let span = dom::element("span", "");

            span.append_child(&dom::text(&format!("{text} ")))
                .unwrap_throw();
            span.append_child(caret().inverted(drop_up).build().element())
                .unwrap_throw();
            span.into()
        }
        Label::Node(node) => node,
    }
}

fn wrapper_classes(extra: &str) -> String {
    util::class_list([(class::DROPDOWN, true), (extra, true)])
}

fn menu_classes(align: MenuAlign, drop_up: bool) -> String {
    util::class_list([
        (class::MENU, true),
        (class::MENU_RIGHT, align == MenuAlign::Right),
        (class::MENU_UP, drop_up),
        // The menu element only exists while open; the stylesheet keys
        // visibility off this class.
        (class::OPEN, true),
    ])
}

#[cfg(test)]
mod tests {
    use super::{menu_classes, wrapper_classes, MenuAlign};

    #[test]
    fn wrapper_keeps_extra_classes() {
        assert_eq!(wrapper_classes(""), "awn-dropdown");
        assert_eq!(wrapper_classes("color-picker"), "awn-dropdown color-picker");
    }

    #[test]
    fn menu_is_always_marked_open() {
        let classes = menu_classes(MenuAlign::Left, false);

        assert_eq!(classes, "awn-dropdown__menu awn--is-open");
    }

    #[test]
    fn menu_modifiers_compose() {
        let classes = menu_classes(MenuAlign::Right, true);

        assert_eq!(
            classes,
            "awn-dropdown__menu awn-dropdown__menu--right awn-dropdown__menu--up awn--is-open"
        );
    }
}
