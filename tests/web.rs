//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use cosmic_particles::{load_theme_preference, store_theme_preference, CosmicParticles};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas
        .set_attribute("style", &format!("width: {}px; height: {}px", width, height))
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn desktop_density_populates_400_particles() {
    let particles = CosmicParticles::new(canvas(800, 600), "nebula", Some(false)).unwrap();
    assert!(!particles.is_inert());
    assert_eq!(particles.particle_count(), 400);
    assert_eq!(particles.theme(), "nebula");
}

#[wasm_bindgen_test]
fn constrained_override_regenerates_smaller_field() {
    let mut particles = CosmicParticles::new(canvas(800, 600), "supernova", Some(false)).unwrap();
    particles.set_constrained(Some(true));
    assert_eq!(particles.particle_count(), 50);
    particles.set_constrained(Some(false));
    assert_eq!(particles.particle_count(), 400);
}

#[wasm_bindgen_test]
fn unknown_theme_is_rejected() {
    assert!(CosmicParticles::new(canvas(100, 100), "aurora", None).is_err());

    let mut particles = CosmicParticles::new(canvas(100, 100), "nebula", None).unwrap();
    assert!(particles.set_theme("aurora").is_err());
    particles.set_theme("supernova").unwrap();
    assert_eq!(particles.theme(), "supernova");
}

#[wasm_bindgen_test]
fn start_and_stop_toggle_the_frame_loop() {
    let mut particles = CosmicParticles::new(canvas(320, 240), "nebula", Some(true)).unwrap();
    assert!(!particles.is_running());

    particles.start().unwrap();
    assert!(particles.is_running());
    // A second start is a no-op rather than a second loop
    particles.start().unwrap();
    assert!(particles.is_running());

    particles.stop();
    assert!(!particles.is_running());
    particles.stop();
}

#[wasm_bindgen_test]
fn canvas_without_2d_context_is_inert() {
    let canvas = canvas(100, 100);
    // A canvas that handed out a bitmaprenderer context returns null for "2d"
    canvas.get_context("bitmaprenderer").unwrap();
    let mut particles = CosmicParticles::new(canvas, "nebula", None).unwrap();

    assert!(particles.is_inert());
    particles.start().unwrap();
    assert!(!particles.is_running());
    assert_eq!(particles.particle_count(), 0);
    assert_eq!(particles.pointer_position().length(), 0);
}

#[wasm_bindgen_test]
fn backing_store_follows_pixel_ratio_and_resize() {
    let window = web_sys::window().unwrap();
    let ratio = window.device_pixel_ratio();
    let canvas = canvas(800, 600);
    let mut particles = CosmicParticles::new(canvas.clone(), "nebula", None).unwrap();
    assert_eq!(canvas.width(), (800.0 * ratio) as u32);
    assert_eq!(canvas.height(), (600.0 * ratio) as u32);
    particles.start().unwrap();

    canvas
        .set_attribute("style", "width: 300px; height: 200px")
        .unwrap();
    window
        .dispatch_event(&Event::new("resize").unwrap())
        .unwrap();

    assert_eq!(canvas.width(), (300.0 * ratio) as u32);
    assert_eq!(canvas.height(), (200.0 * ratio) as u32);
    let viewport = window.inner_width().unwrap().as_f64().unwrap();
    let expected = if viewport < 768.0 { 50 } else { 400 };
    assert_eq!(particles.particle_count(), expected);
    particles.stop();
}

#[wasm_bindgen_test]
fn resize_keeps_density_override() {
    let window = web_sys::window().unwrap();
    let canvas = canvas(640, 480);
    let mut particles = CosmicParticles::new(canvas, "supernova", Some(true)).unwrap();
    particles.start().unwrap();
    window
        .dispatch_event(&Event::new("resize").unwrap())
        .unwrap();
    assert_eq!(particles.particle_count(), 50);
    particles.stop();
}

#[wasm_bindgen_test]
#[allow(deprecated)]
fn mousemove_is_recorded_relative_to_canvas() {
    let window = web_sys::window().unwrap();
    let canvas = canvas(400, 300);
    canvas
        .set_attribute(
            "style",
            "position: absolute; left: 40px; top: 25px; width: 400px; height: 300px",
        )
        .unwrap();
    let mut particles = CosmicParticles::new(canvas.clone(), "nebula", None).unwrap();
    particles.start().unwrap();

    let mut init = MouseEventInit::new();
    init.client_x(150).client_y(120);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    window.dispatch_event(&event).unwrap();

    let rect = canvas.get_bounding_client_rect();
    let pos = particles.pointer_position().to_vec();
    assert_eq!(pos.len(), 2);
    assert!((pos[0] - (150.0 - rect.left())).abs() < 1e-9);
    assert!((pos[1] - (120.0 - rect.top())).abs() < 1e-9);

    // Listeners are gone once stopped
    particles.stop();
    init.client_x(10).client_y(10);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    window.dispatch_event(&event).unwrap();
    assert_eq!(particles.pointer_position().to_vec(), pos);
}

#[wasm_bindgen_test]
fn theme_preference_persists() {
    store_theme_preference("supernova").unwrap();
    assert_eq!(load_theme_preference(), "supernova");
    store_theme_preference("nebula").unwrap();
    assert_eq!(load_theme_preference(), "nebula");
    assert!(store_theme_preference("aurora").is_err());
}
