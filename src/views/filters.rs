// ============================================================================
// FILTERS VIEW - Búsqueda + chips de estado
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use crate::dom::{append_child, on_click, on_input, ElementBuilder};
use crate::models::{StatusCounts, StatusFilter};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::PackageViewModel;
use crate::views::apply_update;

/// Input de búsqueda (actualiza solo la lista mientras se escribe)
pub fn render_search(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();

    let wrapper = ElementBuilder::new("div")?
        .class("search-bar")
        .child(ElementBuilder::new("span")?.class("search-icon").text("🔍").build())?
        .build();

    let input = ElementBuilder::new("input")?
        .class("search-input")
        .attr("type", "search")?
        .attr("placeholder", &t("buscar_placeholder", &lang))?
        .build();
    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
        html_input.set_value(&state.search.borrow());
    }

    {
        let vm = Rc::new(PackageViewModel::new(state.clone()));
        on_input(&input, move |e| {
            let value = e
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            apply_update(Some(vm.set_search(&value)));
        })?;
    }

    append_child(&wrapper, &input)?;
    Ok(wrapper)
}

/// Chips Todos / Na Portaria / Disponível / Entregues con sus totales
pub fn render_filter_chips(state: &AppState, counts: &StatusCounts) -> Result<Element, JsValue> {
    let lang = state.lang();
    let current = *state.status_filter.borrow();

    let chips = ElementBuilder::new("div")?
        .class("filter-chips")
        .build();

    for filter in StatusFilter::CHIPS {
        let class = if filter == current { "chip active" } else { "chip" };
        let chip = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .attr("data-filter", filter.key())?
            .child(
                ElementBuilder::new("span")?
                    .text(&t(&format!("filter_{}", filter.key()), &lang))
                    .build(),
            )?
            .child(
                ElementBuilder::new("span")?
                    .class("chip-count")
                    .text(&counts.for_filter(filter).to_string())
                    .build(),
            )?
            .build();

        let vm = PackageViewModel::new(state.clone());
        on_click(&chip, move |_e| {
            apply_update(Some(vm.set_filter(filter)));
        })?;

        append_child(&chips, &chip)?;
    }

    Ok(chips)
}
