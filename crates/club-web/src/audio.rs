use club_core::{AudioStream, ClubError, LoadState, PlaybackEvent, ResourceCache};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Stream elements keyed by URL; ready once the browser reports `canplay`.
pub type StreamCache = ResourceCache<String, web::HtmlAudioElement, String>;

type Mailbox = Rc<RefCell<VecDeque<PlaybackEvent>>>;

/// WebAudio implementation of [`AudioStream`]: an `<audio>` element feeding
/// an `AnalyserNode`. Async outcomes land in a mailbox drained by the frame
/// loop through `poll_event`.
pub struct WebAudioStream {
    url: String,
    element: web::HtmlAudioElement,
    cache: Rc<RefCell<StreamCache>>,
    context: Option<web::AudioContext>,
    analyser: Option<web::AnalyserNode>,
    // keeps the media graph alive
    _source: Option<web::MediaElementAudioSourceNode>,
    mailbox: Mailbox,
}

impl WebAudioStream {
    pub fn new(url: &str, cache: Rc<RefCell<StreamCache>>) -> Result<Self, ClubError> {
        let element = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| ClubError::StreamUnavailable(js_error_text(&e)))?;
        element.set_cross_origin(Some("anonymous"));
        element.set_loop(true);

        let mailbox: Mailbox = Rc::new(RefCell::new(VecDeque::new()));
        let key = url.to_string();
        let starts_load = {
            let mailbox = mailbox.clone();
            let url = key.clone();
            cache
                .borrow_mut()
                .request(key.clone(), move |result| match result {
                    Ok(_) => log::info!("[audio] stream ready: {}", url),
                    Err(reason) => mailbox
                        .borrow_mut()
                        .push_back(PlaybackEvent::StreamFailed(reason.clone())),
                })
        };
        if starts_load {
            watch_element(&element, &key, &cache, &mailbox);
        }

        Ok(Self {
            url: key,
            element,
            cache,
            context: None,
            analyser: None,
            _source: None,
            mailbox,
        })
    }

    pub fn is_stream_ready(&self) -> bool {
        matches!(self.cache.borrow().state(&self.url), Some(LoadState::Ready(_)))
    }

    fn resume_context(&self) {
        let Some(ctx) = &self.context else {
            return;
        };
        if ctx.state() != web::AudioContextState::Suspended {
            return;
        }
        if let Ok(promise) = ctx.resume() {
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] context resume failed: {}", js_error_text(&e));
                }
            });
        }
    }
}

impl AudioStream for WebAudioStream {
    fn create_context(&mut self, fft_size: u32) -> Result<usize, ClubError> {
        let unavailable = |e: JsValue| ClubError::AnalysisUnavailable(js_error_text(&e));
        let ctx = web::AudioContext::new().map_err(unavailable)?;
        let source = ctx
            .create_media_element_source(&self.element)
            .map_err(unavailable)?;
        let analyser = ctx.create_analyser().map_err(unavailable)?;
        analyser.set_fft_size(fft_size);
        source
            .connect_with_audio_node(&analyser)
            .map_err(unavailable)?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(unavailable)?;
        let bins = analyser.frequency_bin_count() as usize;
        self.context = Some(ctx);
        self.analyser = Some(analyser);
        self._source = Some(source);
        Ok(bins)
    }

    fn request_play(&mut self) {
        self.resume_context();
        let promise = match self.element.play() {
            Ok(p) => p,
            Err(e) => {
                self.mailbox
                    .borrow_mut()
                    .push_back(PlaybackEvent::Blocked(js_error_text(&e)));
                return;
            }
        };
        let mailbox = self.mailbox.clone();
        spawn_local(async move {
            let event = match JsFuture::from(promise).await {
                Ok(_) => PlaybackEvent::Started,
                Err(e) => classify_play_error(&e),
            };
            mailbox.borrow_mut().push_back(event);
        });
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            log::warn!("[audio] pause failed: {}", js_error_text(&e));
        }
    }

    fn read_byte_frequency_data(&mut self, out: &mut [u8]) {
        if let Some(analyser) = &self.analyser {
            analyser.get_byte_frequency_data(out);
        }
    }

    fn poll_event(&mut self) -> Option<PlaybackEvent> {
        self.mailbox.borrow_mut().pop_front()
    }
}

/// Resolve the cache entry on the first `canplay`/`error`; later errors
/// (dropped connection mid-stream) go straight to the mailbox.
fn watch_element(
    element: &web::HtmlAudioElement,
    key: &str,
    cache: &Rc<RefCell<StreamCache>>,
    mailbox: &Mailbox,
) {
    {
        let cache = cache.clone();
        let el = element.clone();
        let key = key.to_string();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let pending = cache
                .borrow()
                .state(&key)
                .map(LoadState::is_pending)
                .unwrap_or(false);
            if pending {
                cache.borrow_mut().resolve(&key, Ok(el.clone()));
            }
        }) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback("canplay", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    {
        let cache = cache.clone();
        let mailbox = mailbox.clone();
        let el = element.clone();
        let key = key.to_string();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let reason = media_error_text(&el);
            let pending = cache
                .borrow()
                .state(&key)
                .map(LoadState::is_pending)
                .unwrap_or(false);
            if pending {
                cache.borrow_mut().resolve(&key, Err(reason));
            } else {
                mailbox
                    .borrow_mut()
                    .push_back(PlaybackEvent::StreamFailed(reason));
            }
        }) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
}

/// `NotAllowedError` (and anything unexpected) means the gesture gate held;
/// `NotSupportedError` means the source itself is unusable.
fn classify_play_error(e: &JsValue) -> PlaybackEvent {
    let name = js_sys::Reflect::get(e, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if name == "NotSupportedError" {
        PlaybackEvent::StreamFailed(js_error_text(e))
    } else {
        PlaybackEvent::Blocked(js_error_text(e))
    }
}

fn media_error_text(element: &web::HtmlAudioElement) -> String {
    match element.error() {
        Some(err) => format!("media error code {}: {}", err.code(), err.message()),
        None => "media error".to_string(),
    }
}

pub(crate) fn js_error_text(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{:?}", e))
}
