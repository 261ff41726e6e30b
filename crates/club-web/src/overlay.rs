use crate::constants::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn hide(overlay: &web::HtmlElement) {
    let _ = overlay.class_list().add_1(OVERLAY_HIDDEN_CLASS);
    let _ = overlay.style().set_property("pointer-events", "none");
}

#[inline]
pub fn is_hidden(overlay: &web::Element) -> bool {
    overlay.class_list().contains(OVERLAY_HIDDEN_CLASS)
}

/// Wire the start gesture. Clicking the overlay hides it and runs `on_start`;
/// without an overlay a fixed "start audio" button stands in and removes
/// itself after the click.
pub fn install(document: &web::Document, on_start: impl Fn() + 'static) -> anyhow::Result<()> {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let overlay: web::HtmlElement = el
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let target = overlay.clone();
        crate::dom::add_click_listener(&overlay, move || {
            on_start();
            hide(&target);
        });
        return Ok(());
    }

    log::warn!("[session] overlay missing; creating fallback start button");
    let button: web::HtmlButtonElement = document
        .create_element("button")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    button.set_text_content(Some(FALLBACK_BUTTON_LABEL));
    let style = button.style();
    for (prop, value) in FALLBACK_BUTTON_STYLE {
        let _ = style.set_property(prop, value);
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    body.append_child(&button)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let target = button.clone();
    crate::dom::add_click_listener(&button, move || {
        on_start();
        target.remove();
    });
    Ok(())
}

/// Hide the overlay if present (used by the debug auto-start).
pub fn dismiss(document: &web::Document) {
    let overlay = document
        .get_element_by_id(OVERLAY_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(overlay) = overlay {
        if !is_hidden(&overlay) {
            hide(&overlay);
        }
    }
}
