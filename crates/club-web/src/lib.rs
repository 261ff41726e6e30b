#![cfg(target_arch = "wasm32")]
use club_core::{floor_grid, ClubConfig, ClubSession, ConfigError};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod frame;
mod handle;
mod input;
mod overlay;
mod render;
mod shaders;

pub use handle::ClubHandle;

use audio::{StreamCache, WebAudioStream};
use constants::*;
use frame::FrameContext;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("club-web starting");
    Ok(())
}

/// Build the club and start the frame loop. `config_json` may override any
/// `ClubConfig` field (camelCase keys); URL query parameters win over both.
#[wasm_bindgen]
pub async fn launch(config_json: Option<String>) -> Result<ClubHandle, JsValue> {
    init(config_json.as_deref()).await.map_err(|e| {
        log::error!("init error: {:?}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}

async fn init(config_json: Option<&str>) -> anyhow::Result<ClubHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let params = dom::query_params(&window);
    let config = build_config(config_json, &params)?;
    let debug = params
        .iter()
        .any(|(k, v)| k == DEBUG_PARAM && dom::is_truthy(v));

    let canvas = find_or_create_canvas(&document)?;
    dom::watch_canvas_resize(&window, &canvas);

    let cache = Rc::new(RefCell::new(StreamCache::new()));
    let stream = WebAudioStream::new(&config.stream_url, cache)?;
    let session: frame::SharedSession = Rc::new(RefCell::new(ClubSession::new(config, stream)?));

    {
        let session = session.clone();
        overlay::install(&document, move || {
            log::info!("[session] starting audio and experience");
            session.borrow_mut().start_audio();
        })?;
    }
    if debug {
        log::info!("[session] debug mode: auto-start");
        session.borrow_mut().start_audio();
        overlay::dismiss(&document);
    }

    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    input::install_pointer(&canvas, session.clone(), pointer.clone());

    // Copy what the renderer needs so no session borrow is held across the
    // adapter request.
    let (scene, grid, positions, scales) = {
        let s = session.borrow();
        let particles = &s.effects.particles;
        (
            s.scene().clone(),
            floor_grid(s.config()),
            particles.positions().to_vec(),
            particles.scales().to_vec(),
        )
    };
    let gpu = match render::GpuState::new(&canvas, &scene, &grid, &positions, &scales).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::error!("[render] WebGPU init error: {:?}", e);
            None
        }
    };

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        session: session.clone(),
        canvas,
        pointer,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(ClubHandle::new(session))
}

fn build_config(
    config_json: Option<&str>,
    params: &[(String, String)],
) -> Result<ClubConfig, ConfigError> {
    let mut config = match config_json {
        Some(json) => ClubConfig::from_json(json)?,
        None => ClubConfig::default(),
    };
    for (key, value) in params {
        if config.apply_override(key, value)? {
            log::info!("[session] config override {}={}", key, value);
        }
    }
    config.validate()?;
    Ok(config)
}

fn find_or_create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            el.set_id(CANVAS_ID);
            let _ = el.set_attribute("style", "display:block;width:100vw;height:100vh");
            document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no document body"))?
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            el
        }
    };
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}
