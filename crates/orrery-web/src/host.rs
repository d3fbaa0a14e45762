//! Browser host: a full-window canvas, window listeners and
//! `requestAnimationFrame` scheduling.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, Window};
use orrery_engine::{Game, GameConfig, InitError, Viewport};
use crate::canvas::Canvas2dRenderer;
use crate::session::{Host, Session};

pub type BrowserSession<G> = Session<G, Canvas2dRenderer, WebHost>;

/// Storage for the mounted session. Callbacks hold only a `Weak` to it, so
/// dropping the session is never kept alive by a pending callback.
pub type SessionSlot<G> = Rc<RefCell<Option<BrowserSession<G>>>>;

const CANVAS_STYLE: &str = "display:block;position:fixed;left:0;top:0;width:100vw;height:100vh";

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Event handlers handed to the host. They are registered with the browser
/// by reference and stay owned here until the host is dropped.
pub struct HostCallbacks {
    pub frame: Closure<dyn FnMut(f64)>,
    pub resize: Closure<dyn FnMut()>,
    pub click: Closure<dyn FnMut(MouseEvent)>,
}

impl HostCallbacks {
    /// Callbacks that forward to whatever session lives in `slot`.
    pub fn for_slot<G: Game + 'static>(slot: Weak<RefCell<Option<BrowserSession<G>>>>) -> Self {
        let frame_slot = slot.clone();
        let frame = Closure::wrap(Box::new(move |_timestamp: f64| {
            with_session(&frame_slot, |session| {
                session.on_frame(js_sys::Date::now());
            });
        }) as Box<dyn FnMut(f64)>);

        let resize_slot = slot.clone();
        let resize = Closure::wrap(Box::new(move || {
            with_session(&resize_slot, |session| session.on_resize());
        }) as Box<dyn FnMut()>);

        let click = Closure::wrap(Box::new(move |event: MouseEvent| {
            with_session(&slot, |session| {
                session.on_click(event.client_x() as f32, event.client_y() as f32);
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        Self { frame, resize, click }
    }
}

fn with_session<G: Game>(
    slot: &Weak<RefCell<Option<BrowserSession<G>>>>,
    f: impl FnOnce(&mut BrowserSession<G>),
) {
    let Some(slot) = slot.upgrade() else { return };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        log::debug!("session busy, callback skipped");
        return;
    };
    if let Some(session) = guard.as_mut() {
        f(session);
    }
}

pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    callbacks: HostCallbacks,
    frame_handle: Option<i32>,
    listeners: usize,
    surface_attached: bool,
}

impl WebHost {
    /// Create the canvas inside the element with `container_id`, or inside
    /// `document.body` when no id is given or it does not resolve.
    pub fn new(container_id: Option<&str>, callbacks: HostCallbacks) -> Result<Self, InitError> {
        let window = web_sys::window()
            .ok_or_else(|| InitError::SurfaceUnavailable("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| InitError::SurfaceUnavailable("no document".into()))?;

        let container = container_id.and_then(|id| {
            let found = document.get_element_by_id(id);
            if found.is_none() {
                log::warn!("mount element #{id} not found, using document body");
            }
            found
        });
        let parent: Element = match container {
            Some(el) => el,
            None => document
                .body()
                .ok_or_else(|| InitError::SurfaceUnavailable("no document body".into()))?
                .into(),
        };

        let canvas = document
            .create_element("canvas")
            .map_err(|e| InitError::SurfaceUnavailable(js_error(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| InitError::SurfaceUnavailable("not a canvas element".into()))?;
        canvas
            .set_attribute("style", CANVAS_STYLE)
            .map_err(|e| InitError::SurfaceUnavailable(js_error(e)))?;
        parent
            .append_child(&canvas)
            .map_err(|e| InitError::SurfaceUnavailable(js_error(e)))?;

        Ok(Self {
            window,
            canvas,
            callbacks,
            frame_handle: None,
            listeners: 0,
            surface_attached: true,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Host for WebHost {
    fn viewport(&self) -> Viewport {
        let size = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(
            size(self.window.inner_width()),
            size(self.window.inner_height()),
            self.window.device_pixel_ratio() as f32,
        )
    }

    fn attach_listeners(&mut self) -> Result<(), InitError> {
        self.window
            .add_event_listener_with_callback(
                "resize",
                self.callbacks.resize.as_ref().unchecked_ref(),
            )
            .map_err(|e| InitError::ListenerRegistration(format!("resize: {}", js_error(e))))?;
        self.listeners += 1;

        self.window
            .add_event_listener_with_callback(
                "click",
                self.callbacks.click.as_ref().unchecked_ref(),
            )
            .map_err(|e| InitError::ListenerRegistration(format!("click: {}", js_error(e))))?;
        self.listeners += 1;
        Ok(())
    }

    fn detach_listeners(&mut self) {
        if self.listeners == 0 {
            return;
        }
        let removals = [
            ("resize", self.callbacks.resize.as_ref()),
            ("click", self.callbacks.click.as_ref()),
        ];
        for (event, callback) in removals {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(event, callback.unchecked_ref())
            {
                log::debug!("removing {event} listener failed: {}", js_error(err));
            }
        }
        self.listeners = 0;
    }

    fn listener_count(&self) -> usize {
        self.listeners
    }

    fn schedule_frame(&mut self) -> Result<(), InitError> {
        let handle = self
            .window
            .request_animation_frame(self.callbacks.frame.as_ref().unchecked_ref())
            .map_err(|e| InitError::FrameScheduling(js_error(e)))?;
        self.frame_handle = Some(handle);
        Ok(())
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                log::debug!("cancelling frame {handle} failed: {}", js_error(err));
            }
        }
    }

    fn release_surface(&mut self) {
        if self.surface_attached {
            self.canvas.remove();
            self.surface_attached = false;
        }
    }
}

impl Drop for WebHost {
    // The closures die with this struct, so the browser must forget them first
    fn drop(&mut self) {
        self.cancel_frame();
        self.detach_listeners();
        self.release_surface();
    }
}

/// Mount `game` into the page and store the session in `slot`, replacing
/// (and tearing down) any session already there.
pub fn mount<G: Game + 'static>(
    slot: &SessionSlot<G>,
    game: G,
    container_id: Option<&str>,
    config_json: Option<&str>,
) -> Result<(), InitError> {
    let previous = slot.borrow_mut().take();
    drop(previous);

    let config = match config_json {
        Some(json) => game.config().with_overrides(json)?,
        None => game.config(),
    };
    mount_with_config(slot, game, container_id, config)
}

fn mount_with_config<G: Game + 'static>(
    slot: &SessionSlot<G>,
    game: G,
    container_id: Option<&str>,
    config: GameConfig,
) -> Result<(), InitError> {
    let callbacks = HostCallbacks::for_slot(Rc::downgrade(slot));
    let host = WebHost::new(container_id, callbacks)?;
    let renderer = Canvas2dRenderer::new(host.canvas())?;
    let session = Session::mount_with_config(game, config, renderer, host)?;
    *slot.borrow_mut() = Some(session);
    Ok(())
}

/// Tear down the session in `slot`, if any. Returns whether one was mounted.
pub fn unmount<G: Game>(slot: &SessionSlot<G>) -> bool {
    let previous = slot.borrow_mut().take();
    previous.is_some()
}
