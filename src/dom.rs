use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Match the canvas backing store to the window's inner size. The drawing
/// surface uses CSS pixels, so pointer coordinates map one to one.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width((width as u32).max(1));
        canvas.set_height((height as u32).max(1));
    }
}

#[inline]
pub fn canvas_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}

/// Resizing only changes the canvas; particles keep their positions.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Pointer position in canvas pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// 2D context for the main canvas, opaque.
pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let opts = js_sys::Object::new();
    _ = js_sys::Reflect::set(&opts, &"alpha".into(), &false.into());
    canvas
        .get_context_with_context_options("2d", &opts)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Local wall-clock reading for the clock overlay.
pub fn wall_clock() -> crate::core::ClockReading {
    let d = js_sys::Date::new_0();
    crate::core::ClockReading {
        hours: d.get_hours(),
        minutes: d.get_minutes(),
        seconds: d.get_seconds(),
        millis: d.get_milliseconds(),
        weekday: d.get_day(),
        month: d.get_month(),
        day: d.get_date(),
    }
}
