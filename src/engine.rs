//! DOM half of the gesture engine. Translates raw mouse/touch/wheel/key
//! events into [`BoardState`] transitions and writes the resulting
//! position/transform back as inline styles. All gesture math lives in
//! `state::board`; this module is wiring only.
//!
//! Listener lifetimes: each resolved icon gets `mousedown`/`touchstart`
//! hooks for the lifetime of the engine, plus one window `keydown` hook.
//! The document-level move/up/wheel/contextmenu set only exists while a
//! press is held; it is owned by a [`SessionGuard`] and deregistered when
//! the session ends.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent,
    TouchEvent, TouchList, WheelEvent, Window,
};

use crate::model::{
    catalog, drag_status, IconId, Point, Position, Transform, IDLE_PROMPT, ROTATE_STEP_DEG,
    STATUS_REGION_ID, WHEEL_SCALE_STEP,
};
use crate::state::{ArrowKey, BoardState};

fn touch_point(touches: &TouchList, index: u32) -> Option<Point> {
    touches.item(index).map(|t| Point {
        x: t.client_x() as f64,
        y: t.client_y() as f64,
    })
}

struct Inner {
    document: Document,
    board: RefCell<BoardState>,
    elements: HashMap<IconId, HtmlElement>,
    session: RefCell<Option<SessionGuard>>,
    /// Guards whose listeners are already detached but whose closures may
    /// still be on the stack (a session always ends from inside one of its
    /// own handlers). Freed at the next press, when nothing of theirs runs.
    retired: RefCell<Vec<SessionGuard>>,
}

impl Inner {
    fn is_target(&self, e: &Event, id: IconId) -> bool {
        let Some(el) = self.elements.get(&id) else {
            return false;
        };
        let el: &EventTarget = el.as_ref();
        e.target().as_ref() == Some(el)
    }

    /// Status text; a no-op when the region is absent from the document.
    fn report(&self, message: &str) {
        if let Some(region) = self.document.get_element_by_id(STATUS_REGION_ID) {
            region.set_text_content(Some(message));
        }
    }

    fn report_drag(&self, id: IconId, x: i32, y: i32) {
        self.report(&drag_status(id, x, y));
    }

    fn apply_position(&self, id: IconId, pos: Position) {
        if let Some(el) = self.elements.get(&id) {
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", pos.left));
            let _ = style.set_property("top", &format!("{}px", pos.top));
        }
    }

    fn apply_transform(&self, id: IconId, t: Transform) {
        if let Some(el) = self.elements.get(&id) {
            let _ = el.style().set_property("transform", &t.css());
        }
    }

    fn move_selection_marker(&self, prev: Option<IconId>, id: IconId) {
        if prev == Some(id) {
            return;
        }
        if let Some(el) = prev.and_then(|p| self.elements.get(&p)) {
            let _ = el.remove_attribute("data-selected");
        }
        if let Some(el) = self.elements.get(&id) {
            let _ = el.set_attribute("data-selected", "true");
        }
    }

    fn start_session(self: &Rc<Self>, id: IconId, at: Point) {
        // no retired closure can be running here, so they are safe to free
        self.retired.borrow_mut().clear();
        if let Some(prev) = self.session.borrow_mut().take() {
            prev.detach();
        }
        let Some(el) = self.elements.get(&id) else {
            return;
        };
        let rendered = Position {
            top: el.offset_top() as f64,
            left: el.offset_left() as f64,
        };
        let prev_selected = self.board.borrow().selection.active;
        let Some(pos) = self.board.borrow_mut().begin_drag(id, at, rendered) else {
            return;
        };
        // pin the tracked offset as inline styles so the centered CSS
        // default stops applying from here on
        self.apply_position(id, pos);
        let _ = el.set_attribute("data-dragging", "true");
        self.move_selection_marker(prev_selected, id);
        tracing::debug!(icon = %id, "session started");
        *self.session.borrow_mut() = Some(SessionGuard::attach(self));
    }

    /// Release handling shared by mouseup and the last touchend.
    fn finish_session(&self) {
        if let Some(id) = self.board.borrow_mut().end_session() {
            if let Some(el) = self.elements.get(&id) {
                let _ = el.remove_attribute("data-dragging");
            }
            if let Some(icon) = self.board.borrow().icon(id) {
                tracing::debug!(
                    icon = %id,
                    scale = icon.transform.scale,
                    rotation = icon.transform.rotation,
                    "session ended"
                );
            }
        }
        self.report(IDLE_PROMPT);
        if let Some(guard) = self.session.borrow_mut().take() {
            // one of the guard's own closures is calling us; detach its
            // listeners now but delay freeing the closures until the next
            // press
            guard.detach();
            self.retired.borrow_mut().push(guard);
        }
    }
}

/// Owner of the document-level listeners that exist only while a press is
/// held. Whichever icon most recently started a session owns the one live
/// guard; `detach` is the release side effect of leaving the session.
struct SessionGuard {
    document: Document,
    mousemove: Closure<dyn FnMut(MouseEvent)>,
    mouseup: Closure<dyn FnMut(MouseEvent)>,
    touchmove: Closure<dyn FnMut(TouchEvent)>,
    touchend: Closure<dyn FnMut(TouchEvent)>,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    contextmenu: Closure<dyn FnMut(MouseEvent)>,
}

impl SessionGuard {
    fn attach(inner: &Rc<Inner>) -> SessionGuard {
        let document = inner.document.clone();
        let mousemove = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let to = Point {
                    x: e.client_x() as f64,
                    y: e.client_y() as f64,
                };
                let moved = inner.board.borrow_mut().drag_move(to);
                if let Some((id, pos)) = moved {
                    inner.apply_position(id, pos);
                    inner.report_drag(id, e.client_x(), e.client_y());
                }
            }) as Box<dyn FnMut(_)>)
        };
        let mouseup = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |_e: MouseEvent| {
                inner.finish_session();
            }) as Box<dyn FnMut(_)>)
        };
        let touchmove = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let touches = e.touches();
                match touches.length() {
                    1 => {
                        let Some(t0) = touches.item(0) else { return };
                        e.prevent_default();
                        let to = Point {
                            x: t0.client_x() as f64,
                            y: t0.client_y() as f64,
                        };
                        let moved = inner.board.borrow_mut().drag_move(to);
                        if let Some((id, pos)) = moved {
                            inner.apply_position(id, pos);
                            inner.report_drag(id, t0.client_x(), t0.client_y());
                        }
                    }
                    2 => {
                        let (Some(p0), Some(p1)) =
                            (touch_point(&touches, 0), touch_point(&touches, 1))
                        else {
                            return;
                        };
                        e.prevent_default();
                        let changed = inner.board.borrow_mut().two_finger_move(p0, p1);
                        if let Some((id, t)) = changed {
                            inner.apply_transform(id, t);
                        }
                    }
                    _ => {}
                }
            }) as Box<dyn FnMut(_)>)
        };
        let touchend = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                e.prevent_default();
                let touches = e.touches();
                match touches.length() {
                    0 => inner.finish_session(),
                    1 => {
                        if let Some(survivor) = touch_point(&touches, 0) {
                            inner.board.borrow_mut().two_finger_release(survivor);
                        }
                    }
                    _ => {}
                }
            }) as Box<dyn FnMut(_)>)
        };
        let wheel = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: WheelEvent| {
                let Some(id) = inner.board.borrow().session_owner() else {
                    return;
                };
                if !inner.is_target(&e, id) {
                    return;
                }
                e.prevent_default();
                let step = if e.delta_y() < 0.0 {
                    WHEEL_SCALE_STEP
                } else {
                    -WHEEL_SCALE_STEP
                };
                if let Some(t) = inner.board.borrow_mut().scale_by(id, step) {
                    inner.apply_transform(id, t);
                }
            }) as Box<dyn FnMut(_)>)
        };
        let contextmenu = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let Some(id) = inner.board.borrow().session_owner() else {
                    return;
                };
                if !inner.is_target(&e, id) {
                    return;
                }
                e.prevent_default();
                if let Some(t) = inner.board.borrow_mut().rotate_by(id, ROTATE_STEP_DEG) {
                    inner.apply_transform(id, t);
                }
            }) as Box<dyn FnMut(_)>)
        };

        document
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())
            .ok();
        document
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())
            .ok();
        document
            .add_event_listener_with_callback("contextmenu", contextmenu.as_ref().unchecked_ref())
            .ok();
        // wheel/touchmove must be non-passive or prevent_default is ignored
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                wheel.as_ref().unchecked_ref(),
                &opts,
            )
            .ok();
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                touchmove.as_ref().unchecked_ref(),
                &opts,
            )
            .ok();
        document
            .add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref())
            .ok();
        document
            .add_event_listener_with_callback("touchcancel", touchend.as_ref().unchecked_ref())
            .ok();

        SessionGuard {
            document,
            mousemove,
            mouseup,
            touchmove,
            touchend,
            wheel,
            contextmenu,
        }
    }

    fn detach(&self) {
        let _ = self.document.remove_event_listener_with_callback(
            "mousemove",
            self.mousemove.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "mouseup",
            self.mouseup.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "wheel",
            self.wheel.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "contextmenu",
            self.contextmenu.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchmove",
            self.touchmove.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchend",
            self.touchend.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "touchcancel",
            self.touchend.as_ref().unchecked_ref(),
        );
    }
}

/// The mounted engine. Dropping it removes every listener it attached.
pub struct Engine {
    inner: Rc<Inner>,
    mouse_hooks: Vec<(HtmlElement, Closure<dyn FnMut(MouseEvent)>)>,
    touch_hooks: Vec<(HtmlElement, Closure<dyn FnMut(TouchEvent)>)>,
    keydown: (Window, Closure<dyn FnMut(KeyboardEvent)>),
}

impl Engine {
    /// Attach over every id in the static catalog. Ids that do not resolve
    /// in the document are skipped silently.
    pub fn mount() -> Engine {
        let window = web_sys::window().expect("window");
        let document = window.document().expect("document");

        let mut elements = HashMap::new();
        let mut board = BoardState::new();
        for (id, _) in catalog() {
            let Some(el) = document
                .get_element_by_id(&id.to_string())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                tracing::debug!(icon = %id, "not in document, skipping");
                continue;
            };
            // adopt whatever transform the element already carries; from
            // here on the numeric fields are the source of truth
            let css = el.style().get_property_value("transform").unwrap_or_default();
            board.adopt_transform(id, Transform::parse(&css));
            elements.insert(id, el);
        }

        let inner = Rc::new(Inner {
            document,
            board: RefCell::new(board),
            elements,
            session: RefCell::new(None),
            retired: RefCell::new(Vec::new()),
        });
        inner.report(IDLE_PROMPT);

        let press_opts = AddEventListenerOptions::new();
        press_opts.set_passive(false);
        let mut mouse_hooks = Vec::new();
        let mut touch_hooks = Vec::new();
        for (&id, el) in &inner.elements {
            let mousedown = {
                let inner = inner.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    // any button opens a session; a right-button press is
                    // what routes the following contextmenu event
                    e.prevent_default();
                    let at = Point {
                        x: e.client_x() as f64,
                        y: e.client_y() as f64,
                    };
                    inner.start_session(id, at);
                }) as Box<dyn FnMut(_)>)
            };
            el.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())
                .ok();
            let touchstart = {
                let inner = inner.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    // non-passive so this also suppresses the synthetic
                    // mouse events
                    e.prevent_default();
                    let touches = e.touches();
                    match touches.length() {
                        1 => {
                            if let Some(at) = touch_point(&touches, 0) {
                                inner.start_session(id, at);
                            }
                        }
                        2 => {
                            let (Some(p0), Some(p1)) =
                                (touch_point(&touches, 0), touch_point(&touches, 1))
                            else {
                                return;
                            };
                            if inner.board.borrow().session_owner() != Some(id) {
                                inner.start_session(id, p0);
                            }
                            inner.board.borrow_mut().begin_two_finger(p0, p1);
                        }
                        _ => {}
                    }
                }) as Box<dyn FnMut(_)>)
            };
            el.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                touchstart.as_ref().unchecked_ref(),
                &press_opts,
            )
            .ok();
            mouse_hooks.push((el.clone(), mousedown));
            touch_hooks.push((el.clone(), touchstart));
        }

        let keydown = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let Some(key) = ArrowKey::from_key(&e.key()) else {
                    return;
                };
                let changed = inner.board.borrow_mut().arrow(key);
                if let Some((id, t)) = changed {
                    e.prevent_default();
                    inner.apply_transform(id, t);
                }
            }) as Box<dyn FnMut(_)>)
        };
        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .ok();

        Engine {
            inner,
            mouse_hooks,
            touch_hooks,
            keydown: (window, keydown),
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(guard) = self.inner.session.borrow_mut().take() {
            guard.detach();
        }
        self.inner.retired.borrow_mut().clear();
        for (el, cb) in &self.mouse_hooks {
            let _ = el
                .remove_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref());
        }
        for (el, cb) in &self.touch_hooks {
            let _ = el
                .remove_event_listener_with_callback("touchstart", cb.as_ref().unchecked_ref());
        }
        let (window, cb) = &self.keydown;
        let _ =
            window.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
    }
}
