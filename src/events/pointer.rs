use crate::app::App;
use crate::constants::PRESS_VIBRATE_MS;
use crate::core::factory::base_hue;
use crate::dom;
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(app: &App) {
    wire_pointerdown(app);
    wire_pointermove(app);
    for name in ["pointerup", "pointercancel", "pointerleave"] {
        wire_pointer_release(app, name);
    }
}

fn listen(canvas: &web::HtmlCanvasElement, name: &str, f: impl FnMut(web::PointerEvent) + 'static) {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(app: &App) {
    let app = app.clone();
    let canvas = app.canvas.clone();
    listen(&canvas, "pointerdown", move |ev: web::PointerEvent| {
        app.begin();
        _ = app.canvas.set_pointer_capture(ev.pointer_id());

        let pos = dom::pointer_canvas_px(&ev, &app.canvas);
        app.touches.borrow_mut().press(ev.pointer_id(), pos);
        let settings = app.settings.snapshot();
        app.system.borrow_mut().emit(
            pos,
            input::press_burst(settings.intensity),
            settings.effect,
            base_hue(js_sys::Date::now()),
        );

        if let Some(w) = web::window() {
            _ = w.navigator().vibrate_with_duration(PRESS_VIBRATE_MS);
        }
        ev.prevent_default();
    });
}

fn wire_pointermove(app: &App) {
    let app = app.clone();
    let canvas = app.canvas.clone();
    listen(&canvas, "pointermove", move |ev: web::PointerEvent| {
        let pos = dom::pointer_canvas_px(&ev, &app.canvas);
        // Hovering without a press does nothing.
        if !app.touches.borrow_mut().move_to(ev.pointer_id(), pos) {
            return;
        }
        let settings = app.settings.snapshot();
        app.system.borrow_mut().emit(
            pos,
            input::drag_burst(settings.intensity),
            settings.effect,
            base_hue(js_sys::Date::now()),
        );
    });
}

fn wire_pointer_release(app: &App, name: &'static str) {
    let app = app.clone();
    let canvas = app.canvas.clone();
    listen(&canvas, name, move |ev: web::PointerEvent| {
        if app.touches.borrow_mut().release(ev.pointer_id()).is_some() {
            _ = app.canvas.release_pointer_capture(ev.pointer_id());
        }
    });
}
