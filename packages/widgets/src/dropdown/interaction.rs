use std::cell::{Cell, RefCell};

use futures_signals::signal::{Mutable, ReadOnlyMutable};
use thiserror::Error;

use crate::placement::{self, Rect};

/// Raised when the trigger is activated on a dropdown with no menu content.
#[derive(Error, Debug)]
#[error("dropdown menu element not found")]
pub struct MissingMenu;

/// The rendered widget, as the interaction logic sees it: measurement, menu
/// visibility and the document-level listener pair.
pub trait Surface {
    /// Current bounding boxes of the wrapper and the trigger, in that
    /// order.
    fn measure(&self) -> (Rect, Rect);

    /// Makes the menu visible, `offset` pixels from the wrapper edge.
    fn show_menu(&self, offset: f64);

    fn hide_menu(&self);

    /// Subscribes the outside-click and dismiss-key document listeners.
    fn attach_listeners(&self);

    /// Removes both document listeners. A no-op when they're not attached.
    fn detach_listeners(&self);
}

/// A trigger click, reduced to the fields that gate toggling.
#[derive(Copy, Clone)]
pub struct TriggerClick {
    pub primary: bool,
    pub default_prevented: bool,
}

/// What a click inside the open menu landed on.
pub enum MenuHit<'a> {
    /// A selectable entry, carrying its data value if it has one.
    Entry(Option<&'a str>),
    /// Menu furniture: padding, separators, non-selectable content.
    Other,
}

/// Open/closed state, and every transition between the two.
pub struct Interaction<S> {
    surface: S,
    opened: Mutable<bool>,
    menu_offset: Cell<f64>,
    has_menu: bool,
    disabled: bool,
    on_select: RefCell<Option<Box<dyn FnMut(Option<&str>)>>>,
}

impl<S: Surface> Interaction<S> {
    pub fn new(
        surface: S,
        has_menu: bool,
        disabled: bool,
        on_select: Option<Box<dyn FnMut(Option<&str>)>>,
    ) -> Self {
        Self {
            surface,
            opened: Mutable::new(false),
            menu_offset: Cell::new(0.0),
            has_menu,
            disabled,
            on_select: RefCell::new(on_select),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn opened(&self) -> ReadOnlyMutable<bool> {
        self.opened.read_only()
    }

    /// A click on the trigger. `Ok(true)` means the menu toggled and the
    /// consumer's trigger callback should now run.
    pub fn trigger_click(&self, click: TriggerClick) -> Result<bool, MissingMenu> {
        if !click.primary || self.disabled || click.default_prevented {
            return Ok(false);
        }

        self.toggle()?;

        Ok(true)
    }

    /// A document-level click while open. `within` says whether the target
    /// sits inside the wrapper.
    pub fn document_click(&self, within: bool) {
        if self.opened.get() && !within {
            self.close();
        }
    }

    /// A click inside the open menu. Reports the selection first; the event
    /// staying unprevented is what lets the close happen.
    pub fn menu_click(&self, hit: MenuHit, default_prevented: bool) {
        if let MenuHit::Entry(value) = hit {
            if let Some(on_select) = self.on_select.borrow_mut().as_mut() {
                on_select(value);
            }
        }

        if self.opened.get() && !default_prevented {
            self.close();
        }
    }

    /// A document-level key press while open.
    pub fn key_down(&self, key: &str) {
        if self.opened.get() && is_dismiss_key(key) {
            self.close();
        }
    }

    /// Unmount: drops the document listeners whatever state we're in.
    pub fn teardown(&self) {
        self.surface.detach_listeners();
    }

    fn toggle(&self) -> Result<(), MissingMenu> {
        if !self.has_menu {
            return Err(MissingMenu);
        }

        if self.opened.get() {
            self.close();
        } else {
            self.open();
        }

        Ok(())
    }

    fn open(&self) {
        let (wrapper, trigger) = self.surface.measure();

        self.menu_offset.set(placement::menu_offset(wrapper, trigger));
        self.opened.set(true);
        self.surface.show_menu(self.menu_offset.get());
        self.surface.attach_listeners();
    }

    fn close(&self) {
        self.opened.set(false);
        self.surface.hide_menu();
        self.surface.detach_listeners();
    }
}

fn is_dismiss_key(key: &str) -> bool {
    // Older engines report `Esc`.
    matches!(key, "Escape" | "Esc")
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use super::{Interaction, MenuHit, Surface, TriggerClick};
    use crate::placement::Rect;

    const CLICK: TriggerClick = TriggerClick {
        primary: true,
        default_prevented: false,
    };

    #[test]
    fn trigger_clicks_alternate_opened() {
        let (interaction, _surface) = interaction();

        assert!(!interaction.opened().get());

        for expect_opened in [true, false, true, false] {
            assert!(matches!(interaction.trigger_click(CLICK), Ok(true)));
            assert_eq!(interaction.opened().get(), expect_opened);
        }
    }

    #[test]
    fn non_primary_clicks_are_ignored() {
        let (interaction, surface) = interaction();

        let click = TriggerClick {
            primary: false,
            default_prevented: false,
        };

        assert!(matches!(interaction.trigger_click(click), Ok(false)));
        assert!(!interaction.opened().get());
        assert_eq!(surface.attach_count.get(), 0);
    }

    #[test]
    fn prevented_trigger_clicks_are_ignored() {
        let (interaction, _surface) = interaction();

        let click = TriggerClick {
            primary: true,
            default_prevented: true,
        };

        assert!(matches!(interaction.trigger_click(click), Ok(false)));
        assert!(!interaction.opened().get());
    }

    #[test]
    fn disabled_never_opens() {
        let surface = TestSurface::default();
        let interaction = Interaction::new(surface.clone(), true, true, None);

        for _ in 0..3 {
            assert!(matches!(interaction.trigger_click(CLICK), Ok(false)));
            assert!(!interaction.opened().get());
        }

        assert_eq!(surface.measure_count.get(), 0);
    }

    #[test]
    fn empty_menu_is_an_error() {
        let surface = TestSurface::default();
        let interaction = Interaction::new(surface.clone(), false, false, None);

        for _ in 0..2 {
            assert!(interaction.trigger_click(CLICK).is_err());
            assert!(!interaction.opened().get());
        }

        assert_eq!(surface.measure_count.get(), 0);
        assert_eq!(surface.attach_count.get(), 0);
        assert_eq!(surface.shown_offset.get(), None);
    }

    #[test]
    fn opening_measures_and_positions() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();

        assert_eq!(surface.measure_count.get(), 1);
        assert_eq!(surface.shown_offset.get(), Some(70.0));
        assert_eq!(surface.attach_count.get(), 1);
        assert!(surface.attached.get());
    }

    #[test]
    fn listener_pair_exists_exactly_while_open() {
        let (interaction, surface) = interaction();

        // Each close path detaches the pair the matching open attached.
        for (opens, close) in ["trigger", "outside", "menu", "escape"].iter().enumerate() {
            interaction.trigger_click(CLICK).unwrap();
            assert!(surface.attached.get());

            match *close {
                "trigger" => {
                    interaction.trigger_click(CLICK).unwrap();
                }
                "outside" => interaction.document_click(false),
                "menu" => interaction.menu_click(MenuHit::Other, false),
                "escape" => interaction.key_down("Escape"),
                _ => unreachable!(),
            }

            assert!(!surface.attached.get());
            assert_eq!(surface.attach_count.get(), opens + 1);
            assert_eq!(surface.detach_count.get(), opens + 1);
        }
    }

    #[test]
    fn outside_clicks_close() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();
        interaction.document_click(false);

        assert!(!interaction.opened().get());
        assert_eq!(surface.shown_offset.get(), None);
    }

    #[test]
    fn clicks_inside_the_wrapper_stay_open() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();
        interaction.document_click(true);

        assert!(interaction.opened().get());
        assert!(surface.attached.get());
    }

    #[test]
    fn selection_reports_the_value_then_closes() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (interaction, surface) = selecting_interaction(&selected);

        interaction.trigger_click(CLICK).unwrap();
        interaction.menu_click(MenuHit::Entry(Some("v1")), false);

        assert_eq!(*selected.borrow(), [Some("v1".to_string())]);
        assert!(!interaction.opened().get());
        assert!(!surface.attached.get());
    }

    #[test]
    fn prevented_selection_keeps_the_menu_open() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (interaction, surface) = selecting_interaction(&selected);

        interaction.trigger_click(CLICK).unwrap();
        interaction.menu_click(MenuHit::Entry(Some("v1")), true);

        assert_eq!(*selected.borrow(), [Some("v1".to_string())]);
        assert!(interaction.opened().get());
        assert!(surface.attached.get());
    }

    #[test]
    fn entries_without_values_report_none() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (interaction, _surface) = selecting_interaction(&selected);

        interaction.trigger_click(CLICK).unwrap();
        interaction.menu_click(MenuHit::Entry(None), false);

        assert_eq!(*selected.borrow(), [None]);
    }

    #[test]
    fn menu_furniture_closes_without_selecting() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let (interaction, _surface) = selecting_interaction(&selected);

        interaction.trigger_click(CLICK).unwrap();
        interaction.menu_click(MenuHit::Other, false);

        assert!(selected.borrow().is_empty());
        assert!(!interaction.opened().get());
    }

    #[test]
    fn escape_closes_in_both_spellings() {
        let (interaction, _surface) = interaction();

        for key in ["Escape", "Esc"] {
            interaction.trigger_click(CLICK).unwrap();
            interaction.key_down(key);

            assert!(!interaction.opened().get());
        }
    }

    #[test]
    fn other_keys_leave_the_menu_open() {
        let (interaction, _surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();

        for key in ["Enter", "ArrowDown", "e"] {
            interaction.key_down(key);
            assert!(interaction.opened().get());
        }
    }

    #[test]
    fn teardown_detaches_even_while_open() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();
        interaction.teardown();

        assert!(!surface.attached.get());
        assert_eq!(surface.detach_count.get(), 1);

        // Idempotent: nothing left to detach.
        interaction.teardown();
        assert_eq!(surface.detach_count.get(), 1);
    }

    #[test]
    fn reopening_measures_fresh_geometry() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();
        assert_eq!(surface.shown_offset.get(), Some(70.0));

        interaction.trigger_click(CLICK).unwrap();
        surface.rects.set((rect(100.0, 400.0), rect(200.0, 30.0)));

        interaction.trigger_click(CLICK).unwrap();
        assert_eq!(surface.measure_count.get(), 2);
        assert_eq!(surface.shown_offset.get(), Some(130.0));
    }

    #[test]
    fn open_never_remeasures_until_reopened() {
        let (interaction, surface) = interaction();

        interaction.trigger_click(CLICK).unwrap();
        interaction.document_click(true);
        interaction.key_down("Enter");
        interaction.menu_click(MenuHit::Entry(Some("v1")), true);

        assert_eq!(surface.measure_count.get(), 1);
    }

    #[test]
    fn document_events_while_closed_are_ignored() {
        let (interaction, surface) = interaction();

        interaction.document_click(false);
        interaction.key_down("Escape");
        interaction.menu_click(MenuHit::Other, false);

        assert!(!interaction.opened().get());
        assert_eq!(surface.detach_count.get(), 0);
    }

    #[derive(Clone)]
    struct TestSurface {
        rects: Rc<Cell<(Rect, Rect)>>,
        measure_count: Rc<Cell<usize>>,
        shown_offset: Rc<Cell<Option<f64>>>,
        attached: Rc<Cell<bool>>,
        attach_count: Rc<Cell<usize>>,
        detach_count: Rc<Cell<usize>>,
    }

    impl Default for TestSurface {
        fn default() -> Self {
            Self {
                rects: Rc::new(Cell::new((rect(100.0, 400.0), rect(140.0, 30.0)))),
                measure_count: Rc::new(Cell::new(0)),
                shown_offset: Rc::new(Cell::new(None)),
                attached: Rc::new(Cell::new(false)),
                attach_count: Rc::new(Cell::new(0)),
                detach_count: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Surface for TestSurface {
        fn measure(&self) -> (Rect, Rect) {
            self.measure_count.set(self.measure_count.get() + 1);
            self.rects.get()
        }

        fn show_menu(&self, offset: f64) {
            self.shown_offset.set(Some(offset));
        }

        fn hide_menu(&self) {
            self.shown_offset.set(None);
        }

        fn attach_listeners(&self) {
            assert!(!self.attached.get(), "listener pair attached twice");
            self.attached.set(true);
            self.attach_count.set(self.attach_count.get() + 1);
        }

        fn detach_listeners(&self) {
            if self.attached.replace(false) {
                self.detach_count.set(self.detach_count.get() + 1);
            }

            assert!(self.detach_count.get() <= self.attach_count.get());
        }
    }

    fn interaction() -> (Interaction<TestSurface>, TestSurface) {
        let surface = TestSurface::default();

        (Interaction::new(surface.clone(), true, false, None), surface)
    }

    fn selecting_interaction(
        selected: &Rc<RefCell<Vec<Option<String>>>>,
    ) -> (Interaction<TestSurface>, TestSurface) {
        let surface = TestSurface::default();
        let sink = selected.clone();
        let on_select = Box::new(move |value: Option<&str>| {
            sink.borrow_mut().push(value.map(String::from));
        });

        (
            Interaction::new(surface.clone(), true, false, Some(on_select)),
            surface,
        )
    }

    fn rect(top: f64, height: f64) -> Rect {
        Rect { top, height }
    }
}
