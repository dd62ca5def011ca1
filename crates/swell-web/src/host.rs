//! Canvas, listeners, and the animation frame loop.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use swell_core::{CursorTracking, Dimensions, FieldTuning, Point, Rgba};
use swell_field::{AnimationField, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use crate::error::HostError;
use crate::logging;
use crate::viewport::{Viewport, parse_tracking, to_surface};

/// Selector of the canvas to animate.
const CANVAS_SELECTOR: &str = ".canvas";

/// Attribute that opts into window-wide pointer tracking.
const TRACKING_ATTRIBUTE: &str = "data-cursor-tracking";

/// A 2D canvas context drawing in CSS pixels.
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    /// Size the canvas to the window, scaled for crisp strokes on dense
    /// displays. Returns the new logical size.
    fn fit(&mut self, window: &Window) -> Result<Dimensions, HostError> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        self.viewport = Viewport::new(width, height, window.device_pixel_ratio());

        let (backing_width, backing_height) = self.viewport.backing_size();
        self.canvas.set_width(backing_width);
        self.canvas.set_height(backing_height);

        let dimensions = self.viewport.dimensions();
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", dimensions.width))?;
        style.set_property("height", &format!("{}px", dimensions.height))?;

        // Resizing the backing store resets the transform
        let scale = self.viewport.scale();
        self.context.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;
        Ok(dimensions)
    }

    /// Trace a full circle as the current path.
    fn circle_path(&self, x: f64, y: f64, radius: f64) -> bool {
        self.context.begin_path();
        match self.context.arc(x, y, radius, 0.0, TAU) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(?err, radius, "arc rejected");
                false
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Dimensions {
        self.viewport.dimensions()
    }

    fn clear(&mut self) {
        let Dimensions { width, height } = self.viewport.dimensions();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        if self.circle_path(x, y, radius) {
            self.context.set_stroke_style_str(&color.to_css());
            self.context.stroke();
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        if self.circle_path(x, y, radius) {
            self.context.set_fill_style_str(&color.to_css());
            self.context.fill();
        }
    }
}

/// Everything the frame loop and the listeners share.
struct Host {
    field: AnimationField,
    surface: CanvasSurface,
}

type Shared = Rc<RefCell<Host>>;

/// Module entry point: find the canvas and animate it until the page goes
/// away. Fails when the page has no usable canvas.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Redirect panic messages to console.error
    console_error_panic_hook::set_once();
    logging::init();

    run().map_err(|err| {
        tracing::error!(%err, "cannot start");
        err.into()
    })
}

fn run() -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    let canvas = document
        .query_selector(CANVAS_SELECTOR)?
        .ok_or(HostError::CanvasNotFound(CANVAS_SELECTOR))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HostError::NotACanvas(CANVAS_SELECTOR))?;
    let context = canvas
        .get_context("2d")?
        .ok_or(HostError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| HostError::ContextUnavailable)?;
    let tracking = parse_tracking(canvas.get_attribute(TRACKING_ATTRIBUTE).as_deref());

    let mut surface = CanvasSurface {
        canvas: canvas.clone(),
        context,
        viewport: Viewport::new(0.0, 0.0, 1.0),
    };
    let dimensions = surface.fit(&window)?;

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let mut field = AnimationField::seeded(dimensions, FieldTuning::default(), seed);
    field.initialize();
    tracing::info!(
        width = dimensions.width,
        height = dimensions.height,
        particles = field.len(),
        ?tracking,
        "swell started"
    );

    let host: Shared = Rc::new(RefCell::new(Host { field, surface }));
    listen_resize(&window, &host)?;
    listen_pointer(&window, &canvas, tracking, &host)?;
    animate(window, host)
}

/// Refit the canvas and repopulate the field when the window resizes.
fn listen_resize(window: &Window, host: &Shared) -> Result<(), HostError> {
    let host = host.clone();
    let win = window.clone();
    let on_resize = Closure::wrap(Box::new(move |_: Event| {
        let mut host = host.borrow_mut();
        match host.surface.fit(&win) {
            Ok(dimensions) => {
                host.field.resize(dimensions);
                tracing::debug!(particles = host.field.len(), "resized");
            }
            Err(err) => tracing::error!(%err, "resize failed"),
        }
    }) as Box<dyn FnMut(Event)>);

    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    on_resize.forget();
    Ok(())
}

/// Feed pointer movement into the cursor signal.
fn listen_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    tracking: CursorTracking,
    host: &Shared,
) -> Result<(), HostError> {
    let on_move = {
        let host = host.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let point = to_surface(
                Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
                Point::new(rect.left(), rect.top()),
            );
            host.borrow_mut().field.pointer_moved(point);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let on_leave = {
        let host = host.clone();
        Closure::wrap(Box::new(move |_: Event| {
            host.borrow_mut().field.pointer_left();
        }) as Box<dyn FnMut(Event)>)
    };

    match tracking {
        CursorTracking::Surface => {
            canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            canvas
                .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        }
        CursorTracking::Window => {
            window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            let root = window
                .document()
                .and_then(|d| d.document_element())
                .ok_or(HostError::NoDocument)?;
            root.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        }
    }

    on_move.forget();
    on_leave.forget();
    Ok(())
}

/// Tick the field once per display refresh, forever.
fn animate(window: Window, host: Shared) -> Result<(), HostError> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut host = host.borrow_mut();
            let Host { field, surface } = &mut *host;
            field.tick(surface);
        }
        if let Some(callback) = next.borrow().as_ref()
            && let Err(err) = request_frame(&win, callback)
        {
            tracing::error!(%err, "animation stopped");
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(&window, callback)?;
    }
    Ok(())
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, HostError> {
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}
