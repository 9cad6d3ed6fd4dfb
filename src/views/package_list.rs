// ============================================================================
// PACKAGE LIST VIEW - Lista filtrada o estado vacío
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::utils::PACKAGES_LIST_ID;
use crate::viewmodels::PackageViewModel;
use crate::views::{apply_update, render_package_card};

/// Renderizar la lista con la búsqueda y el filtro actuales
pub fn render_package_list(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let vm = Rc::new(PackageViewModel::new(state.clone()));
    let packages = vm.visible_packages();

    let list = ElementBuilder::new("div")?
        .id(PACKAGES_LIST_ID)?
        .class("packages-list")
        .build();

    if packages.is_empty() {
        let empty = ElementBuilder::new("div")?
            .class("empty-state")
            .child(ElementBuilder::new("div")?.class("empty-icon").text("📭").build())?
            .child(
                ElementBuilder::new("p")?
                    .class("empty-title")
                    .text(&t("vazio_titulo", &lang))
                    .build(),
            )?
            .child(
                ElementBuilder::new("p")?
                    .class("empty-hint")
                    .text(&t("vazio_dica", &lang))
                    .build(),
            )?
            .build();
        append_child(&list, &empty)?;
        return Ok(list);
    }

    let on_open: Rc<dyn Fn(String)> = {
        let vm = vm.clone();
        Rc::new(move |id: String| {
            log::info!("📦 [LIST] Abriendo encomenda {}", id);
            apply_update(Some(vm.open_package(&id)));
        })
    };

    for pkg in &packages {
        let card = render_package_card(pkg, &lang, on_open.clone())?;
        append_child(&list, &card)?;
    }

    Ok(list)
}
