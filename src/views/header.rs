// ============================================================================
// HEADER VIEW - Título, total de encomendas y selector de idioma
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::StatusCounts;
use crate::state::app_state::AppState;
use crate::utils::i18n::{t, LANGUAGES};
use crate::viewmodels::PackageViewModel;
use crate::views::apply_update;

pub fn render_header(state: &AppState, counts: &StatusCounts) -> Result<Element, JsValue> {
    let lang = state.lang();

    let header = ElementBuilder::new("header")?
        .class("app-header")
        .build();

    let titles = ElementBuilder::new("div")?
        .class("header-titles")
        .child(
            ElementBuilder::new("h1")?
                .class("header-title")
                .text(&t("app_title", &lang))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("header-subtitle")
                .text(&format!("{} {}", counts.total(), t("encomendas", &lang)))
                .build(),
        )?
        .build();
    append_child(&header, &titles)?;

    // Botón con el código del siguiente idioma
    let next_lang = LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .skip_while(|code| *code != lang)
        .nth(1)
        .unwrap_or(LANGUAGES[0].0);

    let lang_btn = ElementBuilder::new("button")?
        .class("btn-language")
        .attr("type", "button")?
        .text(next_lang)
        .build();
    {
        let vm = Rc::new(PackageViewModel::new(state.clone()));
        on_click(&lang_btn, move |_e| {
            log::info!("🌐 [HEADER] Idioma -> {}", next_lang);
            apply_update(Some(vm.set_language(next_lang)));
        })?;
    }
    append_child(&header, &lang_btn)?;

    Ok(header)
}
