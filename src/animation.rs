// The running effect: one particle field bound to one canvas.
//
// `Animation` owns everything the browser holds on our behalf, namely the
// pending animation frame and the window `resize`/`mousemove` listeners.
// `start` registers them, `stop` (or dropping the animation) takes them all
// back, so a torn-down canvas never keeps receiving callbacks.
//
// State shared with those callbacks lives in a `Rc<RefCell<Scene>>`. Every
// callback runs to completion on the main thread, so at most one borrow is
// ever live.

use crate::config::{FieldConfig, Theme};
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::pointer::Pointer;
use crate::renderer::CanvasRenderer;
use crate::utils::Timer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

type FrameCallback = Closure<dyn FnMut()>;

struct Scene {
    field: ParticleField,
    renderer: CanvasRenderer,
    pointer: Pointer,
    constrained: Option<bool>,
    profiling: bool,
    frame_id: Option<i32>,
}

impl Scene {
    fn render_frame(&mut self) {
        let _timer = if self.profiling {
            Some(Timer::new("CosmicParticles::frame"))
        } else {
            None
        };
        let pointer = self.pointer;
        if let Err(err) = self.field.render_frame(&pointer, &mut self.renderer) {
            console_warn!("particle frame skipped: {:?}", err);
        }
    }

    // Matches the canvas to its new layout size and regenerates the field
    fn fit(&mut self, window: &Window, canvas: &HtmlCanvasElement) -> Result<(), FieldError> {
        let bounds = self
            .renderer
            .fit_to(canvas, pixel_ratio(window))
            .map_err(FieldError::browser)?;
        self.field.resize(bounds, density(window, self.constrained));
        Ok(())
    }
}

pub struct Animation {
    window: Window,
    canvas: HtmlCanvasElement,
    theme: Theme,
    // None when the canvas had no 2D context
    scene: Option<Rc<RefCell<Scene>>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    // Cleared by `stop`, and by the frame callback when it cannot reschedule
    running: Rc<Cell<bool>>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_pointer_move: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl Animation {
    pub fn new(canvas: HtmlCanvasElement, theme: Theme, constrained: Option<bool>) -> Result<Self, FieldError> {
        let window = web_sys::window().ok_or(FieldError::NoWindow)?;

        let scene = match CanvasRenderer::new(&canvas) {
            Some(renderer) => {
                let bounds = renderer
                    .fit_to(&canvas, pixel_ratio(&window))
                    .map_err(FieldError::browser)?;
                let field = ParticleField::new(
                    bounds,
                    theme,
                    density(&window, constrained),
                    StdRng::from_entropy(),
                );
                Some(Rc::new(RefCell::new(Scene {
                    field,
                    renderer,
                    pointer: Pointer::OFF_SURFACE,
                    constrained,
                    profiling: false,
                    frame_id: None,
                })))
            }
            None => {
                console_warn!("canvas has no 2d context; particle field disabled");
                None
            }
        };

        Ok(Animation {
            window,
            canvas,
            theme,
            scene,
            frame_callback: Rc::new(RefCell::new(None)),
            running: Rc::new(Cell::new(false)),
            on_resize: None,
            on_pointer_move: None,
        })
    }

    pub fn is_inert(&self) -> bool {
        self.scene.is_none()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn start(&mut self) -> Result<(), FieldError> {
        let scene = match &self.scene {
            Some(scene) => scene.clone(),
            None => return Ok(()),
        };
        if self.is_running() {
            return Ok(());
        }
        // A loop that died on a failed reschedule still holds its listeners
        self.stop();
        if let Err(err) = self.attach(scene) {
            self.stop();
            return Err(err);
        }
        Ok(())
    }

    fn attach(&mut self, scene: Rc<RefCell<Scene>>) -> Result<(), FieldError> {
        let resize_scene = scene.clone();
        let resize_window = self.window.clone();
        let resize_canvas = self.canvas.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Err(err) = resize_scene.borrow_mut().fit(&resize_window, &resize_canvas) {
                console_warn!("particle field resize failed: {}", err);
            }
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(FieldError::browser)?;
        self.on_resize = Some(on_resize);

        let pointer_scene = scene.clone();
        let pointer_canvas = self.canvas.clone();
        let on_pointer_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = pointer_canvas.get_bounding_client_rect();
            pointer_scene.borrow_mut().pointer = Pointer::new(
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
            );
        }) as Box<dyn FnMut(MouseEvent)>);
        self.window
            .add_event_listener_with_callback("mousemove", on_pointer_move.as_ref().unchecked_ref())
            .map_err(FieldError::browser)?;
        self.on_pointer_move = Some(on_pointer_move);

        // The frame callback reschedules itself through this shared slot;
        // `stop` empties the slot, which breaks the cycle.
        let frame_scene = scene.clone();
        let frame_window = self.window.clone();
        let frame_slot = self.frame_callback.clone();
        let frame_running = self.running.clone();
        let frame = Closure::wrap(Box::new(move || {
            let mut scene = frame_scene.borrow_mut();
            scene.render_frame();
            scene.frame_id = match frame_slot.borrow().as_ref() {
                Some(callback) => {
                    let scheduled = request_frame(&frame_window, callback);
                    if let Err(err) = &scheduled {
                        console_warn!("particle field stopped: {}", err);
                    }
                    record_schedule(&frame_running, scheduled)
                }
                None => None,
            };
        }) as Box<dyn FnMut()>);
        let first = request_frame(&self.window, &frame)?;
        scene.borrow_mut().frame_id = Some(first);
        *self.frame_callback.borrow_mut() = Some(frame);
        self.running.set(true);

        console_log!(
            "particle field started: {} particles, theme {}",
            scene.borrow().field.particles().len(),
            self.theme
        );
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(scene) = &self.scene {
            if let Some(id) = scene.borrow_mut().frame_id.take() {
                if let Err(err) = self.window.cancel_animation_frame(id) {
                    console_warn!("cancel_animation_frame failed: {:?}", err);
                }
            }
        }
        if let Some(on_resize) = self.on_resize.take() {
            self.remove_listener("resize", on_resize.as_ref());
        }
        if let Some(on_pointer_move) = self.on_pointer_move.take() {
            self.remove_listener("mousemove", on_pointer_move.as_ref());
        }
        self.running.set(false);
        if self.frame_callback.borrow_mut().take().is_some() {
            console_log!("particle field stopped");
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(scene) = &self.scene {
            scene.borrow_mut().field.set_theme(theme);
        }
    }

    // Overrides the viewport-derived density class; None goes back to deriving it
    pub fn set_constrained(&mut self, constrained: Option<bool>) {
        if let Some(scene) = &self.scene {
            let mut scene = scene.borrow_mut();
            scene.constrained = constrained;
            let bounds = scene.field.bounds();
            scene.field.resize(bounds, density(&self.window, constrained));
        }
    }

    pub fn set_profiling(&mut self, profiling: bool) {
        if let Some(scene) = &self.scene {
            scene.borrow_mut().profiling = profiling;
        }
    }

    pub fn particle_count(&self) -> usize {
        self.scene
            .as_ref()
            .map_or(0, |scene| scene.borrow().field.particles().len())
    }

    // Last pointer position the field saw, in canvas coordinates
    pub fn pointer(&self) -> Option<Pointer> {
        self.scene.as_ref().map(|scene| scene.borrow().pointer)
    }

    pub fn shooting_star_count(&self) -> usize {
        self.scene
            .as_ref()
            .map_or(0, |scene| scene.borrow().field.shooting_stars().len())
    }

    fn remove_listener(&self, event: &str, callback: &JsValue) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(event, callback.unchecked_ref())
        {
            console_warn!("failed to detach {} listener: {:?}", event, err);
        }
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

// Frame id of the next scheduled frame; a failed request ends the loop
fn record_schedule(running: &Cell<bool>, scheduled: Result<i32, FieldError>) -> Option<i32> {
    match scheduled {
        Ok(id) => Some(id),
        Err(_) => {
            running.set(false);
            None
        }
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, FieldError> {
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(FieldError::browser)
}

fn pixel_ratio(window: &Window) -> f64 {
    let ratio = window.device_pixel_ratio();
    if ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn density(window: &Window, constrained: Option<bool>) -> FieldConfig {
    match constrained {
        Some(constrained) => FieldConfig::for_density(constrained),
        None => window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .map(FieldConfig::for_viewport_width)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_reschedule_clears_running() {
        let running = Cell::new(true);
        let next = record_schedule(&running, Err(FieldError::Browser("quota".to_owned())));
        assert_eq!(next, None);
        assert!(!running.get());
    }

    #[test]
    fn successful_reschedule_keeps_running() {
        let running = Cell::new(true);
        assert_eq!(record_schedule(&running, Ok(7)), Some(7));
        assert!(running.get());
    }
}
