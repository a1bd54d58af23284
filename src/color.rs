// Simple HSLA color struct, formatted as a CSS color string for the canvas

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub const WHITE: Hsla = Hsla {
        hue: 0.0,
        saturation: 0.0,
        lightness: 100.0,
        alpha: 1.0,
    };

    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Hsla {
        Hsla {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Hsla {
        Hsla { alpha, ..self }
    }

    // Halfway between two hues, used to tint a line by both of its endpoints
    pub fn blend_hue(a: f64, b: f64) -> f64 {
        (a + b) / 2.0
    }

    pub fn to_css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css_hsla() {
        let color = Hsla::new(220.0, 100.0, 65.5, 0.5);
        assert_eq!(color.to_css(), "hsla(220, 100%, 65.5%, 0.5)");
    }

    #[test]
    fn transparent_copy_keeps_hue() {
        let faded = Hsla::WHITE.with_alpha(0.0);
        assert_eq!(faded.to_css(), "hsla(0, 0%, 100%, 0)");
        assert_eq!(Hsla::WHITE.alpha, 1.0);
    }

    #[test]
    fn blended_hue_is_the_midpoint() {
        assert_eq!(Hsla::blend_hue(200.0, 240.0), 220.0);
        assert_eq!(Hsla::blend_hue(30.0, 30.0), 30.0);
    }
}
