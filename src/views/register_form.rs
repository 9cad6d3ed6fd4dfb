// ============================================================================
// REGISTER FORM VIEW - Registro de una nueva encomenda
// ============================================================================
// Rastreio (+ scanner), destinatário, local, tipo y foto opcional.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use crate::dom::{
    append_child, get_element_by_id, get_input_by_id, on_change, on_click, on_submit,
    ElementBuilder,
};
use crate::state::app_state::{ActiveView, AppState};
use crate::utils::i18n::t;
use crate::utils::photo_reader::{read_as_data_url, selected_file};
use crate::utils::{PACKAGE_KINDS, PHOTO_PREVIEW_ID, TRACKING_INPUT_ID};
use crate::viewmodels::{PackageViewModel, RegistrationForm};
use crate::views::apply_update;

const RECIPIENT_INPUT_ID: &str = "recipient-input";
const LOCATION_INPUT_ID: &str = "location-input";
const KIND_SELECT_ID: &str = "kind-select";
const PHOTO_INPUT_ID: &str = "photo-input";

pub fn render_register_form(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let vm = Rc::new(PackageViewModel::new(state.clone()));

    let view = ElementBuilder::new("section")?
        .class("register-view")
        .build();

    // Header con volver
    let back_btn = ElementBuilder::new("button")?
        .class("btn-back")
        .attr("type", "button")?
        .text("←")
        .build();
    {
        let vm = vm.clone();
        on_click(&back_btn, move |_e| {
            apply_update(Some(vm.navigate(ActiveView::Dashboard)));
        })?;
    }
    let header = ElementBuilder::new("div")?
        .class("register-header")
        .child(back_btn)?
        .child(ElementBuilder::new("h2")?.text(&t("nova_encomenda", &lang)).build())?
        .build();
    append_child(&view, &header)?;

    let form = ElementBuilder::new("form")?
        .class("register-form")
        .build();

    // Rastreio + botón del scanner
    let tracking_input = ElementBuilder::new("input")?
        .id(TRACKING_INPUT_ID)?
        .class("form-input tracking-input")
        .attr("type", "text")?
        .attr("autocomplete", "off")?
        .build();
    let scan_btn = ElementBuilder::new("button")?
        .class("btn-scan")
        .attr("type", "button")?
        .text(&format!("📷 {}", t("escanear", &lang)))
        .build();
    {
        let vm = vm.clone();
        on_click(&scan_btn, move |_e| {
            apply_update(Some(vm.open_scanner()));
        })?;
    }
    let tracking_row = ElementBuilder::new("div")?
        .class("tracking-row")
        .child(tracking_input)?
        .child(scan_btn)?
        .build();
    append_child(&form, &field(&t("codigo_rastreio", &lang), tracking_row)?)?;

    // Campos obligatorios
    let recipient_input = ElementBuilder::new("input")?
        .id(RECIPIENT_INPUT_ID)?
        .class("form-input")
        .attr("type", "text")?
        .attr("required", "")?
        .attr("placeholder", &t("destinatario_placeholder", &lang))?
        .build();
    append_child(&form, &field(&t("destinatario", &lang), recipient_input)?)?;

    let location_input = ElementBuilder::new("input")?
        .id(LOCATION_INPUT_ID)?
        .class("form-input")
        .attr("type", "text")?
        .attr("required", "")?
        .attr("placeholder", &t("local_placeholder", &lang))?
        .build();
    append_child(&form, &field(&t("local", &lang), location_input)?)?;

    let kind_select = ElementBuilder::new("select")?
        .id(KIND_SELECT_ID)?
        .class("form-input")
        .build();
    for (index, (value, key)) in PACKAGE_KINDS.iter().enumerate() {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .attr_if(index == 0, "selected", "")?
            .text(&t(key, &lang))
            .build();
        append_child(&kind_select, &option)?;
    }
    append_child(&form, &field(&t("tipo", &lang), kind_select)?)?;

    // Foto
    let photo_input = ElementBuilder::new("input")?
        .id(PHOTO_INPUT_ID)?
        .class("photo-input")
        .attr("type", "file")?
        .attr("accept", "image/*")?
        .attr("capture", "environment")?
        .build();
    {
        let vm = vm.clone();
        on_change(&photo_input, move |e| {
            let Some(input) = e
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = selected_file(&input) else {
                return;
            };
            let vm = vm.clone();
            let result = read_as_data_url(&file, move |data_url| {
                log::info!("📸 [FORM] Foto cargada ({} bytes)", data_url.len());
                apply_update(Some(vm.set_photo(Some(data_url))));
            });
            if let Err(e) = result {
                log::error!("❌ [FORM] Error leyendo la foto: {:?}", e);
            }
        })?;
    }
    let photo_section = ElementBuilder::new("div")?
        .class("photo-section")
        .child(photo_input)?
        .child(render_photo_preview(state)?)?
        .build();
    append_child(&form, &field(&t("foto", &lang), photo_section)?)?;

    // Acciones
    let cancel_btn = ElementBuilder::new("button")?
        .class("btn-secondary")
        .attr("type", "button")?
        .text(&t("cancelar", &lang))
        .build();
    {
        let vm = vm.clone();
        on_click(&cancel_btn, move |_e| {
            apply_update(Some(vm.navigate(ActiveView::Dashboard)));
        })?;
    }
    let submit_btn = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(&t("registrar", &lang))
        .build();
    let actions = ElementBuilder::new("div")?
        .class("form-actions")
        .child(cancel_btn)?
        .child(submit_btn)?
        .build();
    append_child(&form, &actions)?;

    {
        let vm = vm.clone();
        on_submit(&form, move || {
            apply_update(vm.register(read_form()));
        })?;
    }

    append_child(&view, &form)?;
    Ok(view)
}

/// Preview de la foto elegida (o el placeholder para elegir una)
pub fn render_photo_preview(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let preview = ElementBuilder::new("div")?
        .id(PHOTO_PREVIEW_ID)?
        .class("photo-preview")
        .build();

    match state.pending_photo.borrow().as_deref() {
        Some(data_url) => {
            let img = ElementBuilder::new("img")?
                .class("photo-preview-img")
                .attr("src", data_url)?
                .build();
            let remove_btn = ElementBuilder::new("button")?
                .class("btn-remove-photo")
                .attr("type", "button")?
                .text(&t("remover_foto", &lang))
                .build();
            {
                let vm = PackageViewModel::new(state.clone());
                on_click(&remove_btn, move |_e| {
                    if let Some(input) = get_input_by_id(PHOTO_INPUT_ID) {
                        input.set_value("");
                    }
                    apply_update(Some(vm.set_photo(None)));
                })?;
            }
            append_child(&preview, &img)?;
            append_child(&preview, &remove_btn)?;
        }
        None => {
            // El label abre el selector de archivos
            let placeholder = ElementBuilder::new("label")?
                .class("photo-placeholder")
                .attr("for", PHOTO_INPUT_ID)?
                .child(ElementBuilder::new("span")?.class("photo-icon").text("📷").build())?
                .child(ElementBuilder::new("span")?.text(&t("adicionar_foto", &lang)).build())?
                .build();
            append_child(&preview, &placeholder)?;
        }
    }

    Ok(preview)
}

/// Escribir un código leído por el scanner en el campo de rastreio
pub fn fill_tracking(code: &str) {
    match get_input_by_id(TRACKING_INPUT_ID) {
        Some(input) => input.set_value(code),
        None => log::warn!("⚠️ [FORM] Campo de rastreio no encontrado"),
    }
}

fn read_form() -> RegistrationForm {
    let value_of = |id: &str| get_input_by_id(id).map(|i| i.value()).unwrap_or_default();
    let kind = get_element_by_id(KIND_SELECT_ID)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default();

    RegistrationForm {
        tracking: value_of(TRACKING_INPUT_ID),
        recipient: value_of(RECIPIENT_INPUT_ID),
        location: value_of(LOCATION_INPUT_ID),
        kind,
    }
}

fn field(label: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.class("form-label").text(label).build())?
        .child(control)?
        .build())
}
