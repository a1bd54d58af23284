// Last known pointer position relative to the canvas origin.
// Starts far off the surface so nothing reacts until the mouse moves.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    pub pos: [f64; 2],
}

impl Pointer {
    pub const OFF_SURFACE: Pointer = Pointer {
        pos: [-9999.0, -9999.0],
    };

    pub fn new(x: f64, y: f64) -> Self {
        Pointer { pos: [x, y] }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        glm::distance(&glm::vec2(x, y), &glm::vec2(self.pos[0], self.pos[1]))
    }

    pub fn is_within(&self, x: f64, y: f64, radius: f64) -> bool {
        self.distance_to(x, y) < radius
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::OFF_SURFACE
    }
}
