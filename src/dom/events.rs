// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los listeners de elementos se liberan cuando el elemento sale del DOM
// (set_inner_html("") en cada render), así que closure.forget() es seguro.
// Listeners globales (window/document): registrar UNA VEZ al inicio.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

fn listen<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let mut handler = handler;
    listen(element, "click", move |e: Event| handler(e.unchecked_into::<MouseEvent>()))
}

/// Helper para crear input handler simple (cada tecla)
pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "input", handler)
}

/// Change: selects e inputs de archivo
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "change", handler)
}

/// Submit de formulario: el navegador no recarga la página
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Resize de la ventana (listener global)
pub fn on_window_resize<F>(handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |_e: Event| handler()) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Clicks dentro del contenido no llegan al overlay
pub fn stop_click_propagation(element: &Element) -> Result<(), JsValue> {
    on_click(element, |e: MouseEvent| e.stop_propagation())
}
