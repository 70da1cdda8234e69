use palette::Srgb;
use rand::Rng;

use crate::utils::lerp;

// RGBA colour with every component in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Colour = Colour::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    // Component-wise mean; an empty slice yields opaque black
    pub fn average(colours: &[Colour]) -> Colour {
        if colours.is_empty() {
            return Colour::BLACK;
        }
        let n = colours.len() as f32;
        let sum = colours.iter().fold([0.0f32; 4], |acc, c| {
            [
                acc[0] + c.red,
                acc[1] + c.green,
                acc[2] + c.blue,
                acc[3] + c.alpha,
            ]
        });
        Colour {
            red: sum[0] / n,
            green: sum[1] / n,
            blue: sum[2] / n,
            alpha: sum[3] / n,
        }
    }

    // Add another colour's RGB, saturating at 1
    pub fn add(&mut self, other: Colour) {
        self.red = (self.red + other.red).min(1.0);
        self.green = (self.green + other.green).min(1.0);
        self.blue = (self.blue + other.blue).min(1.0);
    }

    // Multiply RGB by a scalar, saturating at 1
    pub fn scale(&mut self, scalar: f32) {
        self.red = (self.red * scalar).clamp(0.0, 1.0);
        self.green = (self.green * scalar).clamp(0.0, 1.0);
        self.blue = (self.blue * scalar).clamp(0.0, 1.0);
    }

    pub fn scaled(mut self, scalar: f32) -> Colour {
        self.scale(scalar);
        self
    }

    // Brighten or darken all channels by the same random amount in [-magnitude, magnitude)
    pub fn shift<R: Rng + ?Sized>(&mut self, magnitude: f32, rng: &mut R) {
        if magnitude <= 0.0 {
            return;
        }
        let delta = rng.random_range(-magnitude..magnitude);
        self.red = (self.red + delta).clamp(0.0, 1.0);
        self.green = (self.green + delta).clamp(0.0, 1.0);
        self.blue = (self.blue + delta).clamp(0.0, 1.0);
    }

    pub fn lerp(self, other: Colour, t: f32) -> Colour {
        Colour {
            red: lerp(self.red, other.red, t),
            green: lerp(self.green, other.green, t),
            blue: lerp(self.blue, other.blue, t),
            alpha: lerp(self.alpha, other.alpha, t),
        }
    }

    // 8-bit sRGB triple for image buffers and textures
    pub fn to_rgb8(self) -> [u8; 3] {
        let rgb: Srgb<u8> = Srgb::new(
            self.red.clamp(0.0, 1.0),
            self.green.clamp(0.0, 1.0),
            self.blue.clamp(0.0, 1.0),
        )
        .into_format();
        [rgb.red, rgb.green, rgb.blue]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::BLACK
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Colour ({:.2}, {:.2}, {:.2}, {:.2})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
