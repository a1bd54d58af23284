// The drawing seam between the simulation and whatever it is drawn onto.
// The canvas renderer implements it in the browser; tests record the calls.

use crate::color::Hsla;

// Logical (CSS pixel) size of the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds { width, height }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }
}

pub trait Surface {
    type Error;

    fn clear(&mut self, bounds: Bounds) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Hsla)
        -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: Hsla,
    ) -> Result<(), Self::Error>;

    // Line whose color fades from `color` at `head` to fully transparent at `tail`
    fn stroke_fading_line(
        &mut self,
        head: [f64; 2],
        tail: [f64; 2],
        width: f64,
        color: Hsla,
    ) -> Result<(), Self::Error>;
}
