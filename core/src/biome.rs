use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use log::warn;
use rand::Rng;

use crate::colour::Colour;
use crate::error::{GeoscapeError, Result};
use crate::point::TerrainPoint;

// Luminance bounds for Alpine slopes: flat ground is brightest, cliffs darkest
const ALPINE_MAX_LUMINANCE: f32 = 0.95;
const ALPINE_MIN_LUMINANCE: f32 = 0.45;

// Water wave parameters: offset = sin(speed·t + density·x) · (z/4) · weight
const WAVE_SPEED: f32 = 4.0;
const WAVE_DENSITY: f32 = 20.0;

// The closed set of natural biomes a terrain point can belong to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Biome {
    Alpine,
    Barren,
    Deciduous,
    Desert,
    Grasslands,
    Mountain,
    Prairie,
    Shrublands,
    Taiga,
    Tropical,
    Water,
    Void,
}

// Local surface information handed to texturizing rules.
// Computed from the grid before any rule runs, so rules only ever
// read and write the state of their own point.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub normal: Vec3,
}

impl Default for Surface {
    fn default() -> Self {
        Self { normal: Vec3::Z }
    }
}

// A probabilistic object (tree, bush, wheat, puddle) scattered over a biome
struct Scatter {
    threshold: f32, // minimum weight before anything appears
    chance: f32,    // probability at weight 1, scaled linearly below that
    rise: (f32, f32),
    red: (f32, f32),
    green: (f32, f32),
    blue: (f32, f32),
}

impl Scatter {
    fn apply<R: Rng + ?Sized>(&self, point: &mut TerrainPoint, weight: f32, rng: &mut R) {
        if weight <= self.threshold || rng.random::<f32>() >= self.chance * weight {
            return;
        }
        point.position.z += uniform(rng, self.rise);
        point.colour = Colour::rgb(
            uniform(rng, self.red),
            uniform(rng, self.green),
            uniform(rng, self.blue),
        );
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, (low, high): (f32, f32)) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

const BUSH: Scatter = Scatter {
    threshold: 0.3,
    chance: 0.04,
    rise: (0.002, 0.006),
    red: (0.15, 0.25),
    green: (0.35, 0.50),
    blue: (0.00, 0.05),
};

const WHEAT: Scatter = Scatter {
    threshold: 0.4,
    chance: 0.15,
    rise: (0.0005, 0.0015),
    red: (0.75, 0.85),
    green: (0.65, 0.75),
    blue: (0.20, 0.30),
};

const BROADLEAF: Scatter = Scatter {
    threshold: 0.5,
    chance: 0.08,
    rise: (0.005, 0.012),
    red: (0.15, 0.30),
    green: (0.35, 0.50),
    blue: (0.00, 0.10),
};

const CONIFER: Scatter = Scatter {
    threshold: 0.5,
    chance: 0.10,
    rise: (0.008, 0.015),
    red: (0.05, 0.10),
    green: (0.20, 0.30),
    blue: (0.10, 0.15),
};

const PUDDLE: Scatter = Scatter {
    threshold: 0.3,
    chance: 0.05,
    rise: (0.0, 0.0005),
    red: (0.10, 0.20),
    green: (0.30, 0.45),
    blue: (0.55, 0.75),
};

impl Biome {
    pub const ALL: [Biome; 12] = [
        Biome::Alpine,
        Biome::Barren,
        Biome::Deciduous,
        Biome::Desert,
        Biome::Grasslands,
        Biome::Mountain,
        Biome::Prairie,
        Biome::Shrublands,
        Biome::Taiga,
        Biome::Tropical,
        Biome::Water,
        Biome::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Alpine => "Alpine",
            Biome::Barren => "Barren",
            Biome::Deciduous => "Deciduous",
            Biome::Desert => "Desert",
            Biome::Grasslands => "Grasslands",
            Biome::Mountain => "Mountain",
            Biome::Prairie => "Prairie",
            Biome::Shrublands => "Shrublands",
            Biome::Taiga => "Taiga",
            Biome::Tropical => "Tropical",
            Biome::Water => "Water",
            Biome::Void => "Void",
        }
    }

    // Single-character code used by symbolic biome maps
    pub fn symbol(self) -> char {
        match self {
            Biome::Alpine => 'A',
            Biome::Barren => 'B',
            Biome::Deciduous => 'D',
            Biome::Desert => 'S',
            Biome::Grasslands => 'G',
            Biome::Mountain => 'M',
            Biome::Prairie => 'P',
            Biome::Shrublands => 'H',
            Biome::Taiga => 'T',
            Biome::Tropical => 'R',
            Biome::Water => 'W',
            Biome::Void => 'V',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Biome> {
        Biome::ALL
            .into_iter()
            .find(|biome| biome.symbol() == symbol)
            .ok_or(GeoscapeError::UnknownBiomeSymbol(symbol))
    }

    pub fn colour(self) -> Colour {
        match self {
            Biome::Alpine => Colour::rgb(0.60, 0.60, 0.60),
            Biome::Barren => Colour::rgb(0.70, 0.60, 0.40),
            Biome::Deciduous => Colour::rgb(0.40, 0.50, 0.00),
            Biome::Desert => Colour::rgb(0.70, 0.50, 0.30),
            Biome::Grasslands => Colour::rgb(0.35, 0.45, 0.00),
            Biome::Mountain => Colour::rgb(0.45, 0.30, 0.00),
            Biome::Prairie => Colour::rgb(0.75, 0.70, 0.30),
            Biome::Shrublands => Colour::rgb(0.30, 0.40, 0.25),
            Biome::Taiga => Colour::rgb(0.80, 1.00, 1.00),
            Biome::Tropical => Colour::rgb(0.00, 0.40, 0.00),
            Biome::Water => Colour::rgb(0.00, 0.50, 1.00),
            Biome::Void => Colour::rgb(0.20, 0.20, 0.20),
        }
    }

    // Colour of the specular highlight a light source leaves on this biome
    pub fn specular(self) -> Colour {
        match self {
            Biome::Alpine | Biome::Taiga => Colour::rgb(0.90, 0.90, 0.90),
            Biome::Water => Colour::rgb(0.80, 0.90, 1.00),
            Biome::Desert | Biome::Barren => Colour::rgb(0.30, 0.25, 0.20),
            Biome::Mountain => Colour::rgb(0.20, 0.20, 0.20),
            Biome::Deciduous
            | Biome::Grasslands
            | Biome::Prairie
            | Biome::Shrublands
            | Biome::Tropical => Colour::rgb(0.10, 0.12, 0.08),
            Biome::Void => Colour::BLACK,
        }
    }

    // Elevation scaling factor applied to the noise displacement
    pub fn scale(self) -> f32 {
        match self {
            Biome::Alpine | Biome::Mountain => 15.0,
            Biome::Shrublands | Biome::Taiga => 2.0,
            Biome::Deciduous => 1.0,
            Biome::Barren | Biome::Grasslands => 0.75,
            Biome::Prairie => 0.5,
            Biome::Desert | Biome::Tropical => 0.4,
            Biome::Water => 0.001,
            Biome::Void => 0.0,
        }
    }

    pub fn max_scale() -> f32 {
        Biome::ALL
            .iter()
            .map(|biome| biome.scale())
            .fold(0.0, f32::max)
    }

    // Apply this biome's texture to `point`, scaled by `weight` in [0, 1]
    pub fn texturize<R: Rng + ?Sized>(
        self,
        point: &mut TerrainPoint,
        weight: f32,
        surface: &Surface,
        rng: &mut R,
    ) {
        if !weight.is_finite() || !(0.0..=1.0 + 1e-4).contains(&weight) {
            warn!("{} ignored texture weight {} on {}", self, weight, point);
            return;
        }

        match self {
            Biome::Alpine => {
                let z = point.z();
                point.set_z(z + 0.05 * z * weight);
                point.shift(0.005 * weight, rng);
                // Quadratic falloff from flat (max) to vertical (min)
                let angle = surface.normal.angle_between(Vec3::Z).clamp(0.0, FRAC_PI_2);
                let t = angle / FRAC_PI_2;
                let luminance =
                    ALPINE_MAX_LUMINANCE - (ALPINE_MAX_LUMINANCE - ALPINE_MIN_LUMINANCE) * t * t;
                let grey = Colour::rgb(luminance, luminance, luminance);
                point.colour = point.colour.lerp(grey, weight);
            }
            Biome::Barren => point.shift(0.001 * weight, rng),
            Biome::Deciduous => BROADLEAF.apply(point, weight, rng),
            Biome::Desert => {
                // Two dune trains of different pitch layered on top of each other
                point.wave(20.0, 0.02, 200.0, 0.002 * weight);
                point.wave(10.0, 0.05, 300.0, 0.001 * weight);
            }
            Biome::Grasslands => {
                point.colour.shift(0.01 * weight, rng);
                BUSH.apply(point, weight, rng);
            }
            Biome::Mountain => {
                let z = point.z();
                point.set_z(z + 0.1 * z * weight);
                point.shift(0.005 * weight, rng);
                point.colour.shift(0.05 * weight, rng);
            }
            Biome::Prairie => WHEAT.apply(point, weight, rng),
            Biome::Shrublands => point.colour.shift(0.01 * weight, rng),
            Biome::Taiga => CONIFER.apply(point, weight, rng),
            Biome::Tropical => PUDDLE.apply(point, weight, rng),
            Biome::Water => point.colour.shift(0.02 * weight, rng),
            Biome::Void => {
                // Pull the point toward zero in proportion to the emptiness around it
                let z = point.z();
                point.set_z(z * (1.0 - weight));
            }
        }
    }

    // Per-frame animation; `time` is uptime in seconds.
    // Only touches the point's transient offset.
    pub fn update(self, point: &mut TerrainPoint, time: f64, weight: f32) {
        if self == Biome::Water {
            let height = point.z() / 4.0;
            let phase = WAVE_SPEED as f64 * time + (WAVE_DENSITY * point.x()) as f64;
            let dz = phase.sin() as f32 * height * weight;
            point.set_offset(dz);
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
