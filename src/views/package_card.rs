// ============================================================================
// PACKAGE CARD VIEW - Tarjeta de una encomenda en la lista
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::Package;
use crate::utils::format::format_card_timestamp;
use crate::utils::i18n::t;

/// Renderizar package card
pub fn render_package_card(
    pkg: &Package,
    lang: &str,
    on_open: Rc<dyn Fn(String)>,
) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("package-card")
        .attr("data-id", &pkg.id)?
        .build();

    {
        let id = pkg.id.clone();
        on_click(&card, move |_e| on_open(id.clone()))?;
    }

    // Miniatura: foto si la hay, si no el icono del estado
    let thumb = match &pkg.photo {
        Some(photo) => ElementBuilder::new("img")?
            .class("package-thumb")
            .attr("src", photo)?
            .attr("alt", &pkg.recipient)?
            .build(),
        None => {
            let icon = ElementBuilder::new("i")?
                .class(pkg.status.icon_class())
                .attr("aria-hidden", "true")?
                .build();
            ElementBuilder::new("div")?
                .class("package-thumb placeholder")
                .child(icon)?
                .build()
        }
    };
    append_child(&card, &thumb)?;

    let info = ElementBuilder::new("div")?
        .class("package-info")
        .child(
            ElementBuilder::new("div")?
                .class("package-recipient")
                .text(&pkg.recipient)
                .build(),
        )?
        .build();

    if let Some(tracking) = &pkg.tracking {
        let tracking_el = ElementBuilder::new("div")?
            .class("package-tracking")
            .text(tracking)
            .build();
        append_child(&info, &tracking_el)?;
    }

    let meta = ElementBuilder::new("div")?
        .class("package-meta")
        .text(&format!("{} • {}", pkg.location, pkg.kind))
        .build();
    append_child(&info, &meta)?;

    let footer = ElementBuilder::new("div")?
        .class("package-footer")
        .child(
            ElementBuilder::new("span")?
                .class(&format!("status-badge {}", pkg.status.badge_class()))
                .text(&t(pkg.status.i18n_key(), lang))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("package-date")
                .text(&format_card_timestamp(&pkg.created_at, &chrono::Local))
                .build(),
        )?
        .build();
    append_child(&info, &footer)?;

    append_child(&card, &info)?;
    Ok(card)
}
