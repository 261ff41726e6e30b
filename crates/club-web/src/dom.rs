use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store in step with its CSS size.
pub fn watch_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || sync_canvas_backing_size(&canvas)) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// All `key=value` pairs of the page's query string, in order.
pub fn query_params(window: &web::Window) -> Vec<(String, String)> {
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    parse_query(&search)
}

fn parse_query(search: &str) -> Vec<(String, String)> {
    let Ok(params) = web::UrlSearchParams::new_with_str(search) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entry in js_sys::try_iter(&params).ok().flatten().into_iter().flatten() {
        let Ok(pair) = entry else { continue };
        let pair: js_sys::Array = pair.unchecked_into();
        if let (Some(k), Some(v)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            out.push((k, v));
        }
    }
    out
}

pub fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}
