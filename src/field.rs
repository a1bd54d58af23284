// The particle field: every particle and shooting star on the surface, plus the
// per-frame step that moves, connects and draws them.
//
// Nothing in here touches the browser. Randomness comes from the `Rng` the
// field is built with and drawing goes through a `Surface`, so a seeded field
// and a recording surface replay a frame exactly.

use crate::color::Hsla;
use crate::config::{FieldConfig, Theme};
use crate::particle::Particle;
use crate::pointer::Pointer;
use crate::shooting_star::ShootingStar;
use crate::surface::{Bounds, Surface};
use rand::rngs::StdRng;
use rand::Rng;

// A line between two nearby particles, as drawn this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub width: f64,
    pub color: Hsla,
}

pub struct ParticleField<R: Rng = StdRng> {
    bounds: Bounds,
    theme: Theme,
    config: FieldConfig,
    particles: Vec<Particle>,
    shooting_stars: Vec<ShootingStar>,
    connections: Vec<Connection>,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub const MAX_CONNECTIONS: u32 = 5;
    pub const MAX_CONNECTION_DISTANCE: f64 = 150.0;
    pub const CONNECTION_SATURATION: f64 = 80.0;
    pub const CONNECTION_LIGHTNESS: f64 = 70.0;
    pub const CONNECTION_OPACITY: f64 = 0.4;
    pub const CONNECTION_MIN_WIDTH: f64 = 0.3;
    pub const CONNECTION_WIDTH_RANGE: f64 = 0.7;

    // Builds a field and populates it with `config.particle_count` particles.
    pub fn new(bounds: Bounds, theme: Theme, config: FieldConfig, rng: R) -> Self {
        let mut field = ParticleField::from_particles(bounds, theme, config, Vec::new(), rng);
        field.regenerate();
        field
    }

    // Builds a field around an existing particle set, without generating any.
    pub fn from_particles(
        bounds: Bounds,
        theme: Theme,
        config: FieldConfig,
        particles: Vec<Particle>,
        rng: R,
    ) -> Self {
        ParticleField {
            bounds,
            theme,
            config,
            particles,
            shooting_stars: Vec::new(),
            connections: Vec::new(),
            rng,
        }
    }

    // Throws the current particles away and creates a fresh batch.
    pub fn regenerate(&mut self) {
        let count = self.config.particle_count;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::random(&mut self.rng, self.bounds, self.theme, &self.config);
            self.particles.push(particle);
        }
        self.connections.clear();
    }

    // New surface size and density class. Particles are regenerated, shooting
    // stars already in flight keep going.
    pub fn resize(&mut self, bounds: Bounds, config: FieldConfig) {
        self.bounds = bounds;
        self.config = config;
        self.regenerate();
    }

    // Starts over with the new theme's hues, including the sky.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.shooting_stars.clear();
        self.regenerate();
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn update_particles(&mut self, pointer: &Pointer) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.update(bounds, pointer);
        }
    }

    // Links every pair of particles closer than `MAX_CONNECTION_DISTANCE`
    // while neither end has reached `MAX_CONNECTIONS`.
    //
    // Particles are stably sorted by x first, so each particle only scans
    // forward until the x gap alone exceeds the distance limit. When caps run
    // out, pairs earlier in that scan order win.
    pub fn compute_connections(&mut self) -> &[Connection] {
        let max_distance = Self::MAX_CONNECTION_DISTANCE;
        self.connections.clear();
        self.particles.sort_by(|a, b| a.pos[0].total_cmp(&b.pos[0]));

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let p1 = self.particles[i];
                let p2 = self.particles[j];
                if p2.pos[0] - p1.pos[0] > max_distance {
                    break;
                }
                if p1.connections >= Self::MAX_CONNECTIONS {
                    break;
                }

                // Squared distance so pairs out of reach skip the sqrt
                let dx = p1.pos[0] - p2.pos[0];
                let dy = p1.pos[1] - p2.pos[1];
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= max_distance * max_distance
                    || p2.connections >= Self::MAX_CONNECTIONS
                {
                    continue;
                }

                let closeness = 1.0 - dist_sq.sqrt() / max_distance;
                self.connections.push(Connection {
                    from: p1.pos,
                    to: p2.pos,
                    width: Self::CONNECTION_MIN_WIDTH + closeness * Self::CONNECTION_WIDTH_RANGE,
                    color: Hsla::new(
                        Hsla::blend_hue(p1.hue, p2.hue),
                        Self::CONNECTION_SATURATION,
                        Self::CONNECTION_LIGHTNESS,
                        closeness * Self::CONNECTION_OPACITY,
                    ),
                });
                self.particles[i].connections += 1;
                self.particles[j].connections += 1;
            }
        }
        &self.connections
    }

    // Moves and fades every star, dropping the ones that have faded out.
    pub fn advance_shooting_stars(&mut self) {
        for star in &mut self.shooting_stars {
            star.update();
        }
        self.shooting_stars.retain(|star| !star.is_spent());
    }

    // Rolls the per-frame spawn chance; returns whether a star was added.
    pub fn maybe_spawn_shooting_star(&mut self) -> bool {
        if self.rng.gen::<f64>() < self.config.shooting_star_frequency {
            let star = ShootingStar::random(&mut self.rng, self.bounds);
            self.shooting_stars.push(star);
            true
        } else {
            false
        }
    }

    // Runs one full frame: clear, move, connect, draw, then the shooting stars.
    pub fn render_frame<S: Surface>(&mut self, pointer: &Pointer, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.bounds)?;

        self.update_particles(pointer);
        self.compute_connections();
        for connection in &self.connections {
            surface.stroke_line(connection.from, connection.to, connection.width, connection.color)?;
        }
        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.size, particle.color())?;
        }

        self.advance_shooting_stars();
        for star in &self.shooting_stars {
            surface.stroke_fading_line(star.head(), star.tail(), ShootingStar::LINE_WIDTH, star.color())?;
        }

        self.maybe_spawn_shooting_star();
        Ok(())
    }
}
