// Short-lived streak crossing the upper half of the surface.
// Moves in a straight line and fades out; dropped once fully transparent.

use crate::color::Hsla;
use crate::surface::Bounds;
use rand::Rng;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShootingStar {
    pub pos: [f64; 2],
    pub speed: f64,
    pub angle: f64,
    pub length: f64,
    pub alpha: f64,
}

impl ShootingStar {
    pub const FADE_STEP: f64 = 0.01;
    pub const LINE_WIDTH: f64 = 2.5;

    pub fn new(pos: [f64; 2], speed: f64, angle: f64, length: f64) -> ShootingStar {
        ShootingStar {
            pos,
            speed,
            angle,
            length,
            alpha: 1.0,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> ShootingStar {
        let pos = [
            rng.gen::<f64>() * bounds.width,
            rng.gen::<f64>() * bounds.height * 0.5,
        ];
        let speed = rng.gen::<f64>() * 8.0 + 8.0;
        // Between 45 and 75 degrees below the horizontal, heading right
        let angle = rng.gen::<f64>() * PI / 6.0 + PI / 4.0;
        let length = rng.gen::<f64>() * 100.0 + 50.0;
        ShootingStar::new(pos, speed, angle, length)
    }

    pub fn update(&mut self) {
        self.pos[0] += self.angle.cos() * self.speed;
        self.pos[1] += self.angle.sin() * self.speed;
        self.alpha -= ShootingStar::FADE_STEP;
    }

    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn head(&self) -> [f64; 2] {
        self.pos
    }

    pub fn tail(&self) -> [f64; 2] {
        [
            self.pos[0] - self.angle.cos() * self.length,
            self.pos[1] - self.angle.sin() * self.length,
        ]
    }

    pub fn color(&self) -> Hsla {
        Hsla::WHITE.with_alpha(self.alpha)
    }
}
