// ============================================================================
// ACTION SHEET VIEW - Detalle + acción de la encomenda abierta
// ============================================================================
// Na Portaria   -> "Enviar para Estoque"
// Disponível    -> firma + "Confirmar Entrega"
// Entregue      -> botón deshabilitado + firma guardada
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, on_click, stop_click_propagation, ElementBuilder};
use crate::models::{Package, PackageStatus};
use crate::state::app_state::AppState;
use crate::utils::format::format_card_timestamp;
use crate::utils::i18n::t;
use crate::utils::signature_pad::SignaturePad;
use crate::utils::{ACTION_SHEET_ID, SIGNATURE_CANVAS_ID};
use crate::viewmodels::PackageViewModel;
use crate::views::apply_update;

/// Contenedor del sheet; vacío y sin "active" si no hay encomenda abierta
pub fn render_action_sheet(state: &AppState) -> Result<Element, JsValue> {
    let vm = Rc::new(PackageViewModel::new(state.clone()));

    let container = ElementBuilder::new("div")?
        .id(ACTION_SHEET_ID)?
        .class("action-sheet-container")
        .build();

    let Some(pkg) = vm.active_package() else {
        return Ok(container);
    };
    container.set_class_name("action-sheet-container active");

    // Overlay: cierra al hacer click fuera del sheet
    let overlay = ElementBuilder::new("div")?
        .class("sheet-overlay")
        .build();
    {
        let vm = vm.clone();
        on_click(&overlay, move |_e| apply_update(Some(vm.close_package())))?;
    }
    append_child(&container, &overlay)?;

    let sheet = render_sheet_content(state, &vm, &pkg)?;
    stop_click_propagation(&sheet)?;
    append_child(&container, &sheet)?;

    Ok(container)
}

fn render_sheet_content(
    state: &AppState,
    vm: &Rc<PackageViewModel>,
    pkg: &Package,
) -> Result<Element, JsValue> {
    let lang = state.lang();

    let sheet = ElementBuilder::new("div")?
        .class("action-sheet")
        .child(ElementBuilder::new("div")?.class("sheet-handle").build())?
        .build();

    let close_btn = ElementBuilder::new("button")?
        .class("btn-close")
        .attr("type", "button")?
        .attr("aria-label", &t("fechar", &lang))?
        .text("✕")
        .build();
    {
        let vm = vm.clone();
        on_click(&close_btn, move |_e| apply_update(Some(vm.close_package())))?;
    }

    let header = ElementBuilder::new("div")?
        .class("sheet-header")
        .child(
            ElementBuilder::new("div")?
                .child(ElementBuilder::new("h3")?.text(&pkg.recipient).build())?
                .child(
                    ElementBuilder::new("p")?
                        .class("sheet-subtitle")
                        .text(&format!("{} • {}", pkg.location, pkg.kind))
                        .build(),
                )?
                .build(),
        )?
        .child(close_btn)?
        .build();
    append_child(&sheet, &header)?;

    if let Some(tracking) = &pkg.tracking {
        let tracking_el = ElementBuilder::new("p")?
            .class("sheet-tracking")
            .text(tracking)
            .build();
        append_child(&sheet, &tracking_el)?;
    }

    let status_row = ElementBuilder::new("div")?
        .class("sheet-status")
        .child(
            ElementBuilder::new("span")?
                .class("sheet-label")
                .text(&t("status_atual", &lang))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class(&format!("status-badge {}", pkg.status.badge_class()))
                .text(&t(pkg.status.i18n_key(), &lang))
                .build(),
        )?
        .build();
    append_child(&sheet, &status_row)?;

    append_child(&sheet, &render_history(pkg, &lang)?)?;
    append_child(&sheet, &render_action(state, vm, pkg, &lang)?)?;

    Ok(sheet)
}

fn render_history(pkg: &Package, lang: &str) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("ul")?
        .class("sheet-history")
        .build();
    append_child(
        &list,
        &ElementBuilder::new("li")?
            .class("sheet-label")
            .text(&t("historico", lang))
            .build(),
    )?;

    for entry in &pkg.history {
        let item = ElementBuilder::new("li")?
            .class("history-entry")
            .child(ElementBuilder::new("span")?.text(&t(entry.status.i18n_key(), lang)).build())?
            .child(
                ElementBuilder::new("span")?
                    .class("history-time")
                    .text(&format_card_timestamp(&entry.timestamp, &chrono::Local))
                    .build(),
            )?
            .build();
        append_child(&list, &item)?;
    }
    Ok(list)
}

fn render_action(
    state: &AppState,
    vm: &Rc<PackageViewModel>,
    pkg: &Package,
    lang: &str,
) -> Result<Element, JsValue> {
    let area = ElementBuilder::new("div")?
        .class("sheet-actions")
        .build();

    match pkg.status {
        PackageStatus::ReceivedAtDesk => {
            let btn = ElementBuilder::new("button")?
                .class("btn-primary btn-action")
                .attr("type", "button")?
                .text(&t("acao_enviar_estoque", lang))
                .build();
            let vm = vm.clone();
            on_click(&btn, move |_e| apply_update(vm.advance_active(None)))?;
            append_child(&area, &btn)?;
        }
        PackageStatus::AvailableForPickup => {
            let canvas = ElementBuilder::new("canvas")?
                .id(SIGNATURE_CANVAS_ID)?
                .class("signature-canvas")
                .build();
            let clear_btn = ElementBuilder::new("button")?
                .class("btn-clear-signature")
                .attr("type", "button")?
                .text(&t("limpar", lang))
                .build();
            {
                let pad_slot = state.signature_pad.clone();
                on_click(&clear_btn, move |_e| {
                    if let Some(pad) = pad_slot.borrow().as_ref() {
                        pad.clear();
                    }
                })?;
            }
            let signature_box = ElementBuilder::new("div")?
                .class("signature-section")
                .child(
                    ElementBuilder::new("div")?
                        .class("signature-header")
                        .child(
                            ElementBuilder::new("span")?
                                .class("sheet-label")
                                .text(&t("assine_abaixo", lang))
                                .build(),
                        )?
                        .child(clear_btn)?
                        .build(),
                )?
                .child(ElementBuilder::new("div")?.class("signature-box").child(canvas)?.build())?
                .build();
            append_child(&area, &signature_box)?;

            let btn = ElementBuilder::new("button")?
                .class("btn-primary btn-action btn-deliver")
                .attr("type", "button")?
                .text(&t("acao_confirmar_entrega", lang))
                .build();
            {
                let pad_slot = state.signature_pad.clone();
                let vm = vm.clone();
                on_click(&btn, move |_e| {
                    let signature = pad_slot.borrow().as_ref().and_then(|pad| pad.to_data_url());
                    if signature.is_none() {
                        log::info!("✍️ [SHEET] Entrega sin firma");
                    }
                    apply_update(vm.advance_active(signature));
                })?;
            }
            append_child(&area, &btn)?;
        }
        PackageStatus::Delivered => {
            if let Some(signature) = &pkg.signature {
                let stored = ElementBuilder::new("div")?
                    .class("signature-section readonly")
                    .child(
                        ElementBuilder::new("span")?
                            .class("sheet-label")
                            .text(&t("assinatura", lang))
                            .build(),
                    )?
                    .child(
                        ElementBuilder::new("img")?
                            .class("signature-img")
                            .attr("src", signature)?
                            .attr("alt", &t("assinatura", lang))?
                            .build(),
                    )?
                    .build();
                append_child(&area, &stored)?;
            }
            let btn = ElementBuilder::new("button")?
                .class("btn-primary btn-action")
                .attr("type", "button")?
                .attr("disabled", "")?
                .text(&format!("✓ {}", t("acao_ja_entregue", lang)))
                .build();
            append_child(&area, &btn)?;
        }
    }

    Ok(area)
}

/// Enlazar el canvas de firma una vez que el sheet está en el DOM.
/// El tamaño se ajusta al terminar la animación de apertura.
pub fn mount_signature_pad(state: &AppState) -> Result<(), JsValue> {
    let Some(canvas) = get_element_by_id(SIGNATURE_CANVAS_ID)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        *state.signature_pad.borrow_mut() = None;
        return Ok(());
    };

    let pad = SignaturePad::attach(canvas)?;
    *state.signature_pad.borrow_mut() = Some(pad.clone());

    Timeout::new(CONFIG.ui_config.sheet_animation_ms, move || {
        pad.resize_to_parent();
    })
    .forget();
    Ok(())
}
