// ============================================================================
// APP VIEW - Layout principal
// ============================================================================
// Header + (dashboard | formulario) + action sheet + scanner + toast
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::app_state::{ActiveView, AppState};
use crate::utils::i18n::t;
use crate::viewmodels::PackageViewModel;
use crate::views::action_sheet::render_action_sheet;
use crate::views::filters::{render_filter_chips, render_search};
use crate::views::header::render_header;
use crate::views::register_form::render_register_form;
use crate::views::scanner::render_scanner;
use crate::views::toast::render_toast;
use crate::views::{apply_update, render_package_list};

/// Renderizar aplicación completa
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let counts = state.registry.borrow().counts();
    let view = *state.view.borrow();

    let app = ElementBuilder::new("div")?
        .class("app-container")
        .build();

    append_child(&app, &render_header(state, &counts)?)?;

    match view {
        ActiveView::Dashboard => {
            let dashboard = ElementBuilder::new("main")?
                .class("dashboard")
                .child(render_search(state)?)?
                .child(render_filter_chips(state, &counts)?)?
                .child(render_package_list(state)?)?
                .build();
            append_child(&app, &dashboard)?;
            append_child(&app, &render_fab(state)?)?;
        }
        ActiveView::Register => {
            append_child(&app, &render_register_form(state)?)?;
        }
    }

    append_child(&app, &render_action_sheet(state)?)?;

    if *state.show_scanner.borrow() {
        append_child(&app, &render_scanner(state)?)?;
    }

    append_child(&app, &render_toast()?)?;

    Ok(app)
}

/// Botón flotante "+" hacia el formulario
fn render_fab(state: &AppState) -> Result<Element, JsValue> {
    let fab = ElementBuilder::new("button")?
        .class("fab")
        .attr("type", "button")?
        .attr("aria-label", &t("nova_encomenda", &state.lang()))?
        .text("+")
        .build();

    let vm = Rc::new(PackageViewModel::new(state.clone()));
    on_click(&fab, move |_e| {
        apply_update(Some(vm.navigate(ActiveView::Register)));
    })?;

    Ok(fab)
}
