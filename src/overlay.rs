use crate::core::AppSettings;
use web_sys as web;

const UI_ROOT_ID: &str = "ui-root";
const HINT_ID: &str = "hint-overlay";

/// Reflect UI visibility and opacity on the control panel container.
pub fn apply_ui(document: &web::Document, settings: &AppSettings) {
    if let Some(el) = document.get_element_by_id(UI_ROOT_ID) {
        let cl = el.class_list();
        if settings.show_ui {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", &format!("opacity:{:.2}", settings.ui_opacity));
        } else {
            _ = cl.add_1("hidden");
            // fallback for pages without the class
            _ = el.set_attribute("style", "display:none");
        }
    }
}

/// One-line summary shown after a keyboard change.
pub fn hint_text(settings: &AppSettings) -> String {
    let sound = if settings.muted {
        "Muted".to_string()
    } else {
        format!("Vol {:.0}%", settings.volume * 100.0)
    };
    let mut flags = Vec::new();
    if settings.autoplay {
        flags.push("Autoplay");
    }
    if settings.motion_control {
        flags.push("Motion");
    }
    if settings.show_clock {
        flags.push("Clock");
    }
    let mut text = format!(
        "{} • Intensity {} • Bloom {:.1} • {}",
        settings.effect, settings.intensity, settings.bloom, sound
    );
    if !flags.is_empty() {
        text.push_str(" • ");
        text.push_str(&flags.join(" + "));
    }
    text
}

pub fn update_hint(document: &web::Document, settings: &AppSettings) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>{}</div>",
            hint_text(settings)
        );
        el.set_inner_html(&hint_html);
        _ = el.set_attribute("style", "");
    }
}
