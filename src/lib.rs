#[macro_use]
mod utils;

extern crate nalgebra_glm as glm;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod shooting_star;
pub mod storage;
pub mod surface;

use animation::Animation;
use config::Theme;
use error::FieldError;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use field::{Connection, ParticleField};
pub use surface::{Bounds, Surface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Background particle effect for one canvas, driven by requestAnimationFrame
// while started. Freeing the object from JS stops it.
#[wasm_bindgen]
pub struct CosmicParticles {
    animation: Animation,
}

#[wasm_bindgen]
impl CosmicParticles {
    // `constrained` forces the small-viewport density; leave it undefined to
    // derive it from the window width
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        theme: &str,
        constrained: Option<bool>,
    ) -> Result<CosmicParticles, JsValue> {
        let theme: Theme = theme.parse()?;
        let animation = Animation::new(canvas, theme, constrained)?;
        Ok(CosmicParticles { animation })
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.animation.start()?;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.animation.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    #[wasm_bindgen(js_name = isInert)]
    pub fn is_inert(&self) -> bool {
        self.animation.is_inert()
    }

    pub fn theme(&self) -> String {
        self.animation.theme().to_string()
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme: Theme = theme.parse()?;
        self.animation.set_theme(theme);
        Ok(())
    }

    #[wasm_bindgen(js_name = setConstrained)]
    pub fn set_constrained(&mut self, constrained: Option<bool>) {
        self.animation.set_constrained(constrained);
    }

    #[wasm_bindgen(js_name = setProfiling)]
    pub fn set_profiling(&mut self, profiling: bool) {
        self.animation.set_profiling(profiling);
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.animation.particle_count()
    }

    // `[x, y]` relative to the canvas origin, empty while inert
    #[wasm_bindgen(js_name = pointerPosition)]
    pub fn pointer_position(&self) -> js_sys::Float64Array {
        match self.animation.pointer() {
            Some(pointer) => js_sys::Float64Array::from(&pointer.pos[..]),
            None => js_sys::Float64Array::new_with_length(0),
        }
    }

    #[wasm_bindgen(js_name = shootingStarCount)]
    pub fn shooting_star_count(&self) -> usize {
        self.animation.shooting_star_count()
    }
}

// Saved theme name, or the default theme when nothing valid was saved
#[wasm_bindgen(js_name = loadThemePreference)]
pub fn load_theme_preference() -> String {
    web_sys::window()
        .and_then(|window| storage::load_theme(&window))
        .unwrap_or_default()
        .to_string()
}

#[wasm_bindgen(js_name = storeThemePreference)]
pub fn store_theme_preference(theme: &str) -> Result<(), JsValue> {
    let theme: Theme = theme.parse()?;
    let window = web_sys::window().ok_or(FieldError::NoWindow)?;
    storage::save_theme(&window, theme)?;
    Ok(())
}
