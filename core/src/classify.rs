use rand::Rng;

use crate::NoiseGenerator;
use crate::biome::Biome;
use crate::error::Result;
use crate::noise::NoiseField;

// Moisture bucket edges; a value equal to an edge stays in the drier bucket
const MOISTURE_EDGES: [f32; 3] = [0.40, 0.47, 0.53];

// Elevation rows, highest first, each paired with its biome per moisture bucket
const ELEVATION_ROWS: [(f32, [Biome; 4]); 4] = [
    (
        0.60,
        [Biome::Mountain, Biome::Mountain, Biome::Alpine, Biome::Alpine],
    ),
    (
        0.53,
        [Biome::Barren, Biome::Barren, Biome::Grasslands, Biome::Taiga],
    ),
    (
        0.47,
        [Biome::Barren, Biome::Prairie, Biome::Prairie, Biome::Deciduous],
    ),
    (
        0.40,
        [Biome::Desert, Biome::Barren, Biome::Prairie, Biome::Tropical],
    ),
];

// Dominant biome for a (moisture, elevation) pair, both in [0, 1].
// Pure: the same pair always yields the same biome.
pub fn classify(moisture: f32, elevation: f32) -> Biome {
    let bucket = MOISTURE_EDGES
        .iter()
        .filter(|&&edge| edge < moisture)
        .count();
    ELEVATION_ROWS
        .iter()
        .find(|(floor, _)| *floor < elevation)
        .map_or(Biome::Void, |(_, biomes)| biomes[bucket])
}

// Two independent noise fields sampled as moisture and elevation
pub struct BiomeClassifier<N: NoiseGenerator = NoiseField> {
    moisture: N,
    elevation: N,
}

impl BiomeClassifier<NoiseField> {
    // Build both fields on the same lattice resolution
    pub fn new<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let moisture = NoiseField::new(rows, cols, rng)?;
        let elevation = NoiseField::new(rows, cols, rng)?;
        Ok(Self::from_fields(moisture, elevation))
    }
}

impl<N: NoiseGenerator> BiomeClassifier<N> {
    pub fn from_fields(moisture: N, elevation: N) -> Self {
        Self {
            moisture,
            elevation,
        }
    }

    // Biome at normalized coordinates (u, v) ∈ [0, 1]²
    pub fn biome_at(&self, u: f32, v: f32) -> Biome {
        classify(self.moisture.get2(u, v), self.elevation.get2(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::{BiomeClassifier, classify};
    use crate::NoiseGenerator;
    use crate::biome::Biome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn decision_table() {
        // (moisture, elevation, expected)
        let cases = [
            (0.30, 0.70, Biome::Mountain),
            (0.45, 0.70, Biome::Mountain),
            (0.50, 0.70, Biome::Alpine),
            (0.60, 0.70, Biome::Alpine),
            (0.30, 0.55, Biome::Barren),
            (0.45, 0.55, Biome::Barren),
            (0.50, 0.55, Biome::Grasslands),
            (0.60, 0.55, Biome::Taiga),
            (0.30, 0.50, Biome::Barren),
            (0.45, 0.50, Biome::Prairie),
            (0.50, 0.50, Biome::Prairie),
            (0.60, 0.50, Biome::Deciduous),
            (0.30, 0.45, Biome::Desert),
            (0.45, 0.45, Biome::Barren),
            (0.50, 0.45, Biome::Prairie),
            (0.60, 0.45, Biome::Tropical),
            (0.10, 0.20, Biome::Void),
            (0.90, 0.35, Biome::Void),
        ];
        for (m, e, expected) in cases {
            assert_eq!(classify(m, e), expected, "moisture {m}, elevation {e}");
        }
    }

    #[test]
    fn ties_fall_into_the_lower_bucket() {
        assert_eq!(classify(0.40, 0.45), Biome::Desert);
        assert_eq!(classify(0.53, 0.55), Biome::Grasslands);
        assert_eq!(classify(0.60, 0.60), Biome::Taiga);
        assert_eq!(classify(0.60, 0.40), Biome::Void);
    }

    #[test]
    fn determinism() {
        for i in 0..50 {
            let m = i as f32 / 50.0;
            let e = 1.0 - m;
            assert_eq!(classify(m, e), classify(m, e));
        }
    }

    struct Constant(f32);

    impl NoiseGenerator for Constant {
        fn get2(&self, _u: f32, _v: f32) -> f32 {
            self.0
        }
    }

    #[test]
    fn classifier_reads_both_fields() {
        let c = BiomeClassifier::from_fields(Constant(0.45), Constant(0.65));
        assert_eq!(c.biome_at(0.3, 0.3), Biome::Mountain);
    }

    #[test]
    fn seeded_classifier_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(77);
        let mut b = ChaCha8Rng::seed_from_u64(77);
        let ca = BiomeClassifier::new(4, 4, &mut a).unwrap();
        let cb = BiomeClassifier::new(4, 4, &mut b).unwrap();
        for i in 0..=10 {
            let u = i as f32 / 10.0;
            assert_eq!(ca.biome_at(u, 1.0 - u), cb.biome_at(u, 1.0 - u));
        }
    }
}
