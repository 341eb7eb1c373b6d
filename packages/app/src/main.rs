use awning_widgets::{
    button::{Color, Variant},
    class,
    dropdown::{dropdown, item, Dropdown, MenuAlign},
};
use gloo_console::log;
use wasm_bindgen::UnwrapThrowExt;
use web_sys::HtmlElement;

fn examples_menu() -> Dropdown {
    dropdown()
        .label("Examples")
        .color(Color::Primary)
        .on_trigger_click(|_| log!("Examples menu toggled"))
        .on_select(|value| match value {
            Some(value) => log!(format!("Selected {value}")),
            None => log!("Selected an entry with no value"),
        })
        .item(item("Notebooks").value("notebooks"))
        .item(item("Workflows").value("workflows"))
        .item(item("About"))
        .item(
            item("Pin this menu")
                .value("pin")
                .on_click(|event| event.prevent_default()),
        )
        .build()
}

fn more_menu() -> Dropdown {
    dropdown()
        .label("More")
        .variant(Variant::Flat)
        .align_menu(MenuAlign::Right)
        .drop_up(true)
        .on_select(|value| log!(format!("More: {value:?}")))
        .item(item("Documentation").href("https://docs.rs").target("_blank"))
        .item(item("Licence").value("licence"))
        .build()
}

fn main() {
    class::mount_style();

    let body = body();

    for menu in [examples_menu(), more_menu()] {
        body.append_child(menu.element()).unwrap_throw();
        menu.forget();
    }
}

fn body() -> HtmlElement {
    web_sys::window()
        .unwrap_throw()
        .document()
        .unwrap_throw()
        .body()
        .unwrap_throw()
}
