use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::state::{ElasticOverscroll, PointerAction, Pivot, ScrollMetrics, ScrollSurface, Stretch};

/// `ScrollSurface` over the live scroller and content elements.
///
/// `content_height` is the wrapper's layout height; the configured zoom is
/// reported as the content scale, mirroring how an embedded page view exposes
/// its zoom factor separately from its unscaled content height.
struct DomSurface {
    scroller: HtmlElement,
    content: HtmlElement,
    zoom: f64,
    applied: Cell<Stretch>,
}

impl ScrollSurface for DomSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        let m = ScrollMetrics {
            scroll_offset: self.scroller.scroll_top() as f64,
            viewport_height: self.scroller.client_height() as f64,
            content_height: self.content.offset_height() as f64,
            content_scale: self.zoom,
        };
        m.is_valid().then_some(m)
    }

    fn stretch(&self) -> Stretch {
        self.applied.get()
    }

    fn set_stretch(&self, stretch: Stretch) {
        self.applied.set(stretch);
        let style = self.scroller.style();
        if stretch.is_neutral() {
            let _ = style.remove_property("transform");
            let _ = style.remove_property("transform-origin");
            return;
        }
        let origin = match stretch.pivot {
            Pivot::Top => "50% 0%",
            Pivot::Bottom => "50% 100%",
        };
        let _ = style.set_property("transform", &format!("scaleY({})", stretch.scale));
        let _ = style.set_property("transform-origin", origin);
    }
}

fn touch_y(e: &TouchEvent) -> f64 {
    if let Some(t) = e.touches().item(0) {
        t.client_y() as f64
    } else if let Some(t) = e.changed_touches().item(0) {
        t.client_y() as f64
    } else {
        0.0
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ElasticScrollViewProps {
    /// Visual scale applied to the content, factored into boundary math.
    #[prop_or(1.0)]
    pub zoom: f64,
    /// CSS height of the scroller viewport.
    #[prop_or_else(|| "100%".to_string())]
    pub height: String,
    pub children: Html,
}

/// Vertical scroller with an elastic stretch past either content edge.
///
/// Qualifying boundary drags are claimed before the native scroller sees
/// them; releasing snaps the stretch back over a raf-driven animation.
#[function_component(ElasticScrollView)]
pub fn elastic_scroll_view(props: &ElasticScrollViewProps) -> Html {
    let scroller_ref = use_node_ref();
    let content_ref = use_node_ref();
    let overscroll = use_mut_ref(|| {
        let density = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        ElasticOverscroll::new(density)
    });

    {
        let scroller_ref = scroller_ref.clone();
        let content_ref = content_ref.clone();
        let overscroll = overscroll.clone();
        use_effect_with(props.zoom, move |zoom| {
            let scroller: HtmlElement = scroller_ref
                .cast::<HtmlElement>()
                .expect("scroller_ref not attached to an element");
            let content: HtmlElement = content_ref
                .cast::<HtmlElement>()
                .expect("content_ref not attached to an element");
            let surface = Rc::new(DomSurface {
                scroller: scroller.clone(),
                content,
                zoom: *zoom,
                applied: Cell::new(Stretch::NEUTRAL),
            });

            // Snap-back frame loop: reschedules itself until the controller
            // reports the animation done.
            let raf_id = Rc::new(RefCell::new(None::<i32>));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let overscroll = overscroll.clone();
                let surface = surface.clone();
                let raf_id = raf_id.clone();
                let frame_cell_inner = frame_cell.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let running = overscroll
                        .borrow_mut()
                        .tick(&*surface, js_sys::Date::now());
                    if !running {
                        *raf_id.borrow_mut() = None;
                        return;
                    }
                    if let Some(win) = web_sys::window() {
                        if let Ok(id) = win.request_animation_frame(
                            frame_cell_inner
                                .borrow()
                                .as_ref()
                                .unwrap()
                                .as_ref()
                                .unchecked_ref(),
                        ) {
                            *raf_id.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
            }
            let schedule_snap_back = {
                let raf_id = raf_id.clone();
                let frame_cell = frame_cell.clone();
                move || {
                    if raf_id.borrow().is_some() {
                        return;
                    }
                    if let Some(win) = web_sys::window() {
                        if let Ok(id) = win.request_animation_frame(
                            frame_cell.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                        ) {
                            *raf_id.borrow_mut() = Some(id);
                        }
                    }
                }
            };

            let touch_start_cb = {
                let overscroll = overscroll.clone();
                let surface = surface.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    overscroll.borrow_mut().on_pointer(
                        &*surface,
                        PointerAction::Down,
                        touch_y(&e),
                        js_sys::Date::now(),
                    );
                }) as Box<dyn FnMut(_)>)
            };
            scroller
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let overscroll = overscroll.clone();
                let surface = surface.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let claimed = overscroll.borrow_mut().on_pointer(
                        &*surface,
                        PointerAction::Move,
                        touch_y(&e),
                        js_sys::Date::now(),
                    );
                    if claimed {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            scroller
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let overscroll = overscroll.clone();
                let surface = surface.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let action = if e.type_() == "touchcancel" {
                        PointerAction::Cancel
                    } else {
                        PointerAction::Up
                    };
                    let claimed = overscroll.borrow_mut().on_pointer(
                        &*surface,
                        action,
                        touch_y(&e),
                        js_sys::Date::now(),
                    );
                    if claimed {
                        e.prevent_default();
                        schedule_snap_back();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            scroller
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            scroller
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            move || {
                let _ = scroller.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = scroller.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = scroller.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = scroller.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.borrow_mut().take() {
                    if let Some(win) = web_sys::window() {
                        let _ = win.cancel_animation_frame(id);
                    }
                }
                surface.set_stretch(Stretch::NEUTRAL);
                drop(frame_cell);
            }
        });
    }

    let content_style = if props.zoom != 1.0 {
        format!("transform:scale({}); transform-origin:0 0;", props.zoom)
    } else {
        String::new()
    };

    html! {
        <div
            ref={scroller_ref}
            style={format!(
                "overflow-y:auto; height:{}; overscroll-behavior-y:none; -webkit-overflow-scrolling:touch;",
                props.height
            )}
        >
            <div ref={content_ref} style={content_style}>
                { props.children.clone() }
            </div>
        </div>
    }
}
