use crate::app::App;
use crate::input::{key_action, KeyAction};
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &App) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(action) = key_action(&key) else {
        return;
    };
    match action {
        KeyAction::ToggleFullscreen => {
            if app.document.fullscreen_element().is_some() {
                app.document.exit_fullscreen();
            } else {
                _ = app.canvas.request_fullscreen();
            }
        }
        KeyAction::ExitFullscreen => {
            if app.document.fullscreen_element().is_some() {
                app.document.exit_fullscreen();
            }
        }
        _ => {
            let next = app.update(|s| {
                action.apply(s);
            });
            log::info!("[keys] {:?} -> {}", action, overlay::hint_text(&next));
            overlay::update_hint(&app.document, &next);
        }
    }
    // Space and arrows would otherwise scroll.
    if matches!(
        action,
        KeyAction::ToggleMute | KeyAction::Volume(_) | KeyAction::ToggleFullscreen
    ) {
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(app: &App) {
    if let Some(window) = web::window() {
        let app = app.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
