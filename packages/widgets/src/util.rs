use std::fmt::Display;

use gloo_console::error;

/// Joins the enabled classes with spaces, preserving order.
pub fn class_list<'a>(classes: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    let enabled: Vec<_> = classes
        .into_iter()
        .filter(|(class, enabled)| *enabled && !class.is_empty())
        .map(|(class, _)| class)
        .collect();

    enabled.join(" ")
}

/// Reports a widget misuse to the console without unwinding.
pub fn report_error(error: impl Display) {
    error!(format!("awning: {error}"));
}

#[cfg(test)]
mod tests {
    use super::class_list;

    #[test]
    fn skips_disabled_classes() {
        let classes = class_list([("menu", true), ("menu--right", false), ("is-open", true)]);

        assert_eq!(classes, "menu is-open");
    }

    #[test]
    fn skips_blank_classes() {
        assert_eq!(class_list([("wrapper", true), ("", true)]), "wrapper");
    }

    #[test]
    fn single_class_has_no_separator() {
        assert_eq!(class_list([("wrapper", true), ("extra", false)]), "wrapper");
    }
}
