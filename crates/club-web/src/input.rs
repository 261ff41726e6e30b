use crate::constants::POINTER_SLOT;
use crate::frame::SharedSession;
use club_core::ControllerEvent;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const BUTTON_PRIMARY: i16 = 0;
const BUTTON_SECONDARY: i16 = 2;

/// Last pointer position over the canvas, in normalized device coordinates.
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub ndc: Vec2,
    pub inside: bool,
    /// Client position of the previous orbit-drag sample, while dragging.
    pub orbit_from: Option<Vec2>,
}

#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        let u = (x_css / w).clamp(0.0, 1.0);
        let v = (y_css / h).clamp(0.0, 1.0);
        Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
    } else {
        Vec2::ZERO
    }
}

/// Point the pointer slot along the ray under the cursor. Called every frame
/// so the ray follows the camera after a teleport.
pub fn apply_pointer_pose(session: &SharedSession, pointer: &PointerState, aspect: f32) {
    if !pointer.inside {
        return;
    }
    if !pointer_owns_slot(session) {
        return;
    }
    let mut s = session.borrow_mut();
    let pose = s
        .desktop_camera(aspect)
        .pointer_pose(pointer.ndc.x, pointer.ndc.y);
    s.set_controller_pose(POINTER_SLOT, pose);
}

/// A connected tracked controller takes the slot over from the mouse.
fn pointer_owns_slot(session: &SharedSession) -> bool {
    !session
        .borrow()
        .locomotion
        .controller(POINTER_SLOT)
        .is_some_and(|c| c.connected)
}

fn listen<E: JsCast + 'static>(
    canvas: &web::HtmlCanvasElement,
    kind: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    canvas
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Desktop fallback. The primary button acts as controller 0 (down/up map to
/// select start/end); secondary drag orbits the view and the wheel zooms.
/// XR input, when present, drives slots through the handle.
pub fn install_pointer(
    canvas: &web::HtmlCanvasElement,
    session: SharedSession,
    pointer: Rc<RefCell<PointerState>>,
) {
    {
        let canvas_m = canvas.clone();
        let pointer = pointer.clone();
        let session = session.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut p = pointer.borrow_mut();
            p.ndc = pointer_ndc(&ev, &canvas_m);
            p.inside = true;
            if let Some(from) = p.orbit_from {
                let to = client_pos(&ev);
                let delta = to - from;
                p.orbit_from = Some(to);
                session.borrow_mut().view.rotate(delta.x, delta.y);
            }
        });
    }
    {
        let pointer = pointer.clone();
        listen(canvas, "pointerleave", move |_ev: web::PointerEvent| {
            let mut p = pointer.borrow_mut();
            p.inside = false;
            p.orbit_from = None;
        });
    }
    {
        let canvas_m = canvas.clone();
        let pointer = pointer.clone();
        let session = session.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            {
                let mut p = pointer.borrow_mut();
                p.ndc = pointer_ndc(&ev, &canvas_m);
                p.inside = true;
            }
            match ev.button() {
                BUTTON_SECONDARY => {
                    pointer.borrow_mut().orbit_from = Some(client_pos(&ev));
                    canvas_m.set_pointer_capture(ev.pointer_id()).ok();
                    ev.prevent_default();
                }
                BUTTON_PRIMARY => {
                    if !pointer_owns_slot(&session) {
                        return;
                    }
                    let aspect = canvas_aspect(&canvas_m);
                    apply_pointer_pose(&session, &pointer.borrow(), aspect);
                    session
                        .borrow_mut()
                        .controller_event(POINTER_SLOT, ControllerEvent::SelectStart);
                    ev.prevent_default();
                }
                _ => {}
            }
        });
    }
    {
        let pointer = pointer.clone();
        let session = session.clone();
        listen(canvas, "pointerup", move |ev: web::PointerEvent| match ev.button() {
            BUTTON_SECONDARY => {
                pointer.borrow_mut().orbit_from = None;
                ev.prevent_default();
            }
            BUTTON_PRIMARY => {
                if !pointer_owns_slot(&session) {
                    return;
                }
                session
                    .borrow_mut()
                    .controller_event(POINTER_SLOT, ControllerEvent::SelectEnd);
                ev.prevent_default();
            }
            _ => {}
        });
    }
    listen(canvas, "contextmenu", |ev: web::MouseEvent| ev.prevent_default());
    listen(canvas, "wheel", move |ev: web::WheelEvent| {
        session.borrow_mut().view.zoom(ev.delta_y() as f32);
        ev.prevent_default();
    });
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}
