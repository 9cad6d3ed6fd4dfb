// ============================================================================
// SIGNATURE PAD - Superficie de firma sobre <canvas> (mouse + touch)
// ============================================================================
// Los listeners viven mientras viva el canvas: cuando el action sheet se
// destruye, el navegador los limpia (closure.forget() es seguro aquí).
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent,
    TouchEvent,
};

#[derive(Clone)]
pub struct SignaturePad {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    drawing: Rc<Cell<bool>>,
    has_strokes: Rc<Cell<bool>>,
}

impl SignaturePad {
    /// Enlazar la superficie a un canvas ya insertado en el DOM
    pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas sin contexto 2d"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let pad = Self {
            canvas,
            ctx,
            drawing: Rc::new(Cell::new(false)),
            has_strokes: Rc::new(Cell::new(false)),
        };
        pad.bind_touch_events()?;
        pad.bind_mouse_events()?;
        Ok(pad)
    }

    fn bind_touch_events(&self) -> Result<(), JsValue> {
        // passive: false para poder cancelar el scroll mientras se firma
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let handlers: [(&str, bool); 2] = [("touchstart", true), ("touchmove", false)];
        for (event_type, starts_stroke) in handlers {
            let pad = self.clone();
            let closure = Closure::wrap(Box::new(move |e: TouchEvent| {
                e.prevent_default();
                if let Some((x, y)) = pad.touch_position(&e) {
                    if starts_stroke {
                        pad.start_stroke(x, y);
                    } else {
                        pad.draw_to(x, y);
                    }
                }
            }) as Box<dyn FnMut(TouchEvent)>);
            self.canvas.add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        let pad = self.clone();
        let closure = Closure::wrap(Box::new(move |_e: TouchEvent| {
            pad.stop_stroke();
        }) as Box<dyn FnMut(TouchEvent)>);
        self.canvas
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn bind_mouse_events(&self) -> Result<(), JsValue> {
        {
            let pad = self.clone();
            let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                pad.start_stroke(e.offset_x() as f64, e.offset_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>);
            self.canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let pad = self.clone();
            let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                pad.draw_to(e.offset_x() as f64, e.offset_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>);
            self.canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        for event_type in ["mouseup", "mouseout"] {
            let pad = self.clone();
            let closure = Closure::wrap(Box::new(move |_e: MouseEvent| {
                pad.stop_stroke();
            }) as Box<dyn FnMut(MouseEvent)>);
            self.canvas
                .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn touch_position(&self, e: &TouchEvent) -> Option<(f64, f64)> {
        let touch = e.touches().get(0)?;
        let rect = self.canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f64 - rect.left(),
            touch.client_y() as f64 - rect.top(),
        ))
    }

    fn start_stroke(&self, x: f64, y: f64) {
        self.drawing.set(true);
        self.ctx.begin_path();
        self.ctx.move_to(x, y);
        self.ctx.set_line_width(2.0);
        self.ctx.set_line_cap("round");
        self.ctx.set_stroke_style_str("#000");
    }

    fn draw_to(&self, x: f64, y: f64) {
        if !self.drawing.get() {
            return;
        }
        self.ctx.line_to(x, y);
        self.ctx.stroke();
        self.has_strokes.set(true);
    }

    fn stop_stroke(&self) {
        if self.drawing.replace(false) {
            self.ctx.close_path();
        }
    }

    /// Ajustar el tamaño del canvas al de su contenedor.
    /// Cambiar el tamaño borra el contenido; sin cambio la firma se mantiene.
    pub fn resize_to_parent(&self) {
        let Some(parent) = self
            .canvas
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        let current = (self.canvas.width(), self.canvas.height());
        if let Some((width, height)) =
            resized_dimensions(parent.offset_width(), parent.offset_height(), current)
        {
            log::debug!("✍️ [SIGNATURE] Canvas {}x{} -> {}x{}", current.0, current.1, width, height);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.has_strokes.set(false);
        }
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.has_strokes.set(false);
    }

    /// Exportar la firma como data URL; None si no se dibujó nada
    pub fn to_data_url(&self) -> Option<String> {
        if !self.has_strokes.get() {
            return None;
        }
        match self.canvas.to_data_url() {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("⚠️ [SIGNATURE] No se pudo exportar la firma: {:?}", e);
                None
            }
        }
    }
}

/// Nuevo tamaño del canvas para un contenedor dado; None si no cambia
fn resized_dimensions(parent_width: i32, parent_height: i32, current: (u32, u32)) -> Option<(u32, u32)> {
    let target = (parent_width.max(0) as u32, parent_height.max(0) as u32);
    (target != current).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_size_keeps_the_canvas() {
        assert_eq!(resized_dimensions(320, 160, (320, 160)), None);
    }

    #[test]
    fn new_size_is_applied() {
        assert_eq!(resized_dimensions(480, 200, (320, 160)), Some((480, 200)));
    }

    #[test]
    fn negative_sizes_clamp_to_zero() {
        assert_eq!(resized_dimensions(-5, 160, (320, 160)), Some((0, 160)));
        assert_eq!(resized_dimensions(-1, -1, (0, 0)), None);
    }
}
