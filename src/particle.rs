// Single background particle: drifts, bounces off the surface edges, twinkles,
// and brightens while the pointer is close

use crate::color::Hsla;
use crate::config::{FieldConfig, Theme};
use crate::pointer::Pointer;
use crate::surface::Bounds;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub alpha: f64,
    pub alpha_dir: f64,
    pub hue: f64,
    pub lightness: f64,
    pub base_lightness: f64,
    pub connections: u32,
}

impl Particle {
    pub const ALPHA_MIN: f64 = 0.2;
    pub const ALPHA_MAX: f64 = 0.9;
    pub const ALPHA_STEP: f64 = 0.01;
    pub const RESTING_ALPHA: f64 = 0.5;
    pub const HOVER_ALPHA: f64 = 0.7;
    pub const HOVER_ALPHA_BOOST: f64 = 0.3;
    pub const HOVER_LIGHTNESS_BOOST: f64 = 30.0;
    pub const PROXIMITY_RADIUS: f64 = 150.0;
    pub const EASING: f64 = 0.1;
    pub const SATURATION: f64 = 100.0;

    pub fn new(pos: [f64; 2], vel: [f64; 2], size: f64, hue: f64, base_lightness: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            alpha: 0.5,
            alpha_dir: 1.0,
            hue,
            lightness: base_lightness,
            base_lightness,
            connections: 0,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, theme: Theme, config: &FieldConfig) -> Particle {
        let (hue_min, hue_max) = theme.hue_range();
        let pos = [rng.gen::<f64>() * bounds.width, rng.gen::<f64>() * bounds.height];
        let vel = [
            (rng.gen::<f64>() - 0.5) * config.speed_factor,
            (rng.gen::<f64>() - 0.5) * config.speed_factor,
        ];
        let size = rng.gen::<f64>() * 2.0 + 0.9;
        let hue = rng.gen::<f64>() * (hue_max - hue_min) + hue_min;
        let base_lightness = rng.gen::<f64>() * 20.0 + 60.0;

        let mut particle = Particle::new(pos, vel, size, hue, base_lightness);
        particle.alpha = rng.gen::<f64>() * 0.4 + 0.3;
        particle.alpha_dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        particle
    }

    pub fn update(&mut self, bounds: Bounds, pointer: &Pointer) {
        let (x, vel_x) = reflect(self.pos[0] + self.vel[0], self.vel[0], bounds.width);
        let (y, vel_y) = reflect(self.pos[1] + self.vel[1], self.vel[1], bounds.height);
        self.pos = [x, y];
        self.vel = [vel_x, vel_y];

        let (alpha, alpha_dir) = oscillate_alpha(self.alpha, self.alpha_dir);
        self.alpha_dir = alpha_dir;
        self.connections = 0;

        let distance = pointer.distance_to(x, y);
        let (lightness, alpha) =
            respond_to_pointer(distance, self.base_lightness, self.lightness, alpha);
        self.lightness = lightness;
        self.alpha = alpha.max(Particle::ALPHA_MIN).min(Particle::ALPHA_MAX);
    }

    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, Particle::SATURATION, self.lightness, self.alpha)
    }
}

// Moves a coordinate that overshot [0, extent] back inside by mirroring the
// overshoot, and points the velocity back into the surface
pub fn reflect(position: f64, velocity: f64, extent: f64) -> (f64, f64) {
    if position < 0.0 {
        ((-position).min(extent.max(0.0)), velocity.abs())
    } else if position > extent {
        ((2.0 * extent - position).max(0.0), -velocity.abs())
    } else {
        (position, velocity)
    }
}

// One twinkle step; the direction turns around once a bound is reached
pub fn oscillate_alpha(alpha: f64, direction: f64) -> (f64, f64) {
    let alpha = alpha + direction * Particle::ALPHA_STEP;
    let direction = if alpha >= Particle::ALPHA_MAX {
        -1.0
    } else if alpha <= Particle::ALPHA_MIN {
        1.0
    } else {
        direction
    };
    (alpha, direction)
}

// New (lightness, alpha) given the pointer distance. Inside the proximity radius
// both jump up in proportion to closeness, outside they ease back to rest.
pub fn respond_to_pointer(distance: f64, base_lightness: f64, lightness: f64, alpha: f64) -> (f64, f64) {
    if distance < Particle::PROXIMITY_RADIUS {
        let closeness = 1.0 - distance / Particle::PROXIMITY_RADIUS;
        (
            base_lightness + closeness * Particle::HOVER_LIGHTNESS_BOOST,
            Particle::HOVER_ALPHA + closeness * Particle::HOVER_ALPHA_BOOST,
        )
    } else {
        (
            lightness + (base_lightness - lightness) * Particle::EASING,
            alpha + (Particle::RESTING_ALPHA - alpha) * Particle::EASING,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reflect_mirrors_overshoot_and_turns_velocity() {
        assert_eq!(reflect(-0.25, -0.3, 800.0), (0.25, 0.3));
        assert_eq!(reflect(800.5, 0.3, 800.0), (799.5, -0.3));
        assert_eq!(reflect(400.0, 0.3, 800.0), (400.0, 0.3));
    }

    #[test]
    fn reflect_stays_inside_degenerate_surface() {
        let (pos, _) = reflect(0.1, 0.1, 0.0);
        assert_eq!(pos, 0.0);
        let (pos, _) = reflect(-0.1, -0.1, 0.0);
        assert_eq!(pos, 0.0);
    }

    #[test]
    fn alpha_direction_turns_at_bounds() {
        let (alpha, dir) = oscillate_alpha(0.895, 1.0);
        assert!(alpha >= Particle::ALPHA_MAX);
        assert_eq!(dir, -1.0);

        let (alpha, dir) = oscillate_alpha(0.205, -1.0);
        assert!(alpha <= Particle::ALPHA_MIN);
        assert_eq!(dir, 1.0);

        let (alpha, dir) = oscillate_alpha(0.5, -1.0);
        assert!((alpha - 0.49).abs() < 1e-12);
        assert_eq!(dir, -1.0);
    }

    #[test]
    fn pointer_proximity_brightens_in_proportion() {
        let (lightness, alpha) = respond_to_pointer(0.0, 70.0, 70.0, 0.4);
        assert_eq!(lightness, 100.0);
        assert!((alpha - 1.0).abs() < 1e-12);

        let (lightness, alpha) = respond_to_pointer(75.0, 60.0, 60.0, 0.4);
        assert!((lightness - 75.0).abs() < 1e-12);
        assert!((alpha - 0.85).abs() < 1e-12);
    }

    #[test]
    fn distant_pointer_eases_back_to_rest() {
        let (lightness, alpha) = respond_to_pointer(150.0, 60.0, 90.0, 0.9);
        assert!((lightness - 87.0).abs() < 1e-12);
        assert!((alpha - 0.86).abs() < 1e-12);
    }

    #[test]
    fn hovered_particle_alpha_is_held_in_range() {
        let mut particle = Particle::new([100.0, 100.0], [0.0, 0.0], 1.0, 220.0, 70.0);
        particle.update(Bounds::new(800.0, 600.0), &Pointer::new(100.0, 100.0));
        assert_eq!(particle.alpha, Particle::ALPHA_MAX);
        assert_eq!(particle.lightness, 100.0);
    }

    #[test]
    fn random_particle_uses_theme_hues() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(800.0, 600.0);
        let config = FieldConfig::desktop();
        for _ in 0..200 {
            let p = Particle::random(&mut rng, bounds, Theme::Supernova, &config);
            assert!(p.hue >= 30.0 && p.hue < 60.0);
            assert!(bounds.contains(p.pos[0], p.pos[1]));
            assert!(p.size >= 0.9 && p.size < 2.9);
            assert!(p.vel[0].abs() <= 0.15 && p.vel[1].abs() <= 0.15);
            assert!(p.alpha >= 0.3 && p.alpha < 0.7);
            assert_eq!(p.lightness, p.base_lightness);
        }
    }

    #[test]
    fn update_resets_connection_count() {
        let mut particle = Particle::new([10.0, 10.0], [0.1, 0.1], 1.0, 220.0, 70.0);
        particle.connections = 5;
        particle.update(Bounds::new(800.0, 600.0), &Pointer::OFF_SURFACE);
        assert_eq!(particle.connections, 0);
        assert!((particle.pos[0] - 10.1).abs() < 1e-12);
    }
}
