use std::collections::BTreeMap;

use crate::biome::Biome;

// Weighted mix of biomes influencing a single point.
// Weights sum to 1 once `normalize` has run (the mixer always does this).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeMixture {
    weights: BTreeMap<Biome, f32>,
}

impl BiomeMixture {
    pub fn new() -> Self {
        Self::default()
    }

    // A mixture fully dominated by one biome
    pub fn single(biome: Biome) -> Self {
        let mut mixture = Self::new();
        mixture.add(biome, 1.0);
        mixture
    }

    // Accumulate `weight` onto `biome`; negative or non-finite weights are dropped
    pub fn add(&mut self, biome: Biome, weight: f32) {
        if !weight.is_finite() || weight < 0.0 {
            return;
        }
        *self.weights.entry(biome).or_insert(0.0) += weight;
    }

    pub fn weight(&self, biome: Biome) -> f32 {
        self.weights.get(&biome).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f32 {
        self.weights.values().sum()
    }

    // Rescale so the weights sum to 1.
    // Returns false (and leaves the mixture untouched) when the total is zero.
    pub fn normalize(&mut self) -> bool {
        let total = self.total();
        if total <= f32::EPSILON {
            return false;
        }
        for weight in self.weights.values_mut() {
            *weight /= total;
        }
        true
    }

    // Biome with the largest weight
    pub fn dominant(&self) -> Option<Biome> {
        self.weights
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(biome, _)| *biome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Biome, f32)> + '_ {
        self.weights.iter().map(|(biome, weight)| (*biome, *weight))
    }

    // Blended elevation scale: (Π weight_i·scale_i)^(1/n).
    // Any low-scale biome in the mix drags the result toward zero,
    // which keeps borders next to void and water regions flat.
    pub fn scale(&self) -> f32 {
        geometric_scale(self.iter().map(|(biome, weight)| (weight, biome.scale())))
    }
}

// Geometric reduction over (weight, scale) pairs; an empty input yields 0
pub fn geometric_scale<I>(pairs: I) -> f32
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut product = 1.0f64;
    let mut n = 0;
    for (weight, scale) in pairs {
        product *= (weight * scale) as f64;
        n += 1;
    }
    if n == 0 {
        return 0.0;
    }
    product.max(0.0).powf(1.0 / n as f64) as f32
}

impl std::fmt::Display for BiomeMixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(biome, weight)| format!("{:.2} x {}", weight, biome))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
