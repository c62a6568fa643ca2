use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::attributes::PropertyAttributes;

/// Source of the bounded market-noise perturbations used by some scorers.
pub trait NoiseSource {
    /// Sample a value in `[low, high]`.
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

/// Pseudo-random noise from a seeded generator.
///
/// Seeded per property, so identical attributes always see the same noise.
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed derived from a SHA-256 digest of the attributes, mixed with `salt`.
    pub fn for_attributes(attributes: &PropertyAttributes, salt: u64) -> Self {
        Self::from_seed(attribute_seed(attributes) ^ salt)
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Deterministic noise: always the midpoint of the requested range.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointNoise;

impl NoiseSource for MidpointNoise {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        (low + high) / 2.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    #[default]
    Seeded,
    Midpoint,
}

impl NoiseMode {
    pub fn source_for(self, attributes: &PropertyAttributes, seed: u64) -> Box<dyn NoiseSource> {
        match self {
            NoiseMode::Seeded => Box::new(SeededNoise::for_attributes(attributes, seed)),
            NoiseMode::Midpoint => Box::new(MidpointNoise),
        }
    }
}

/// Stable 64-bit key for a set of attributes.
///
/// Each field is hashed with its length in front, so no two distinct
/// attribute sets share an encoding.
pub fn attribute_seed(attributes: &PropertyAttributes) -> u64 {
    let area = attributes.area.to_bits().to_le_bytes();
    let price = attributes
        .district_average_price
        .map(|p| p.to_bits().to_le_bytes().to_vec())
        .unwrap_or_default();
    let fields: [&[u8]; 6] = [
        &area,
        attributes.district.as_bytes(),
        attributes.sub_district.as_bytes(),
        attributes.layout.as_bytes(),
        attributes.decoration.as_bytes(),
        &price,
    ];

    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_noise() {
        let mut noise = MidpointNoise;
        assert_eq!(noise.sample(40.0, 60.0), 50.0);
        assert_eq!(noise.sample(-1.5, 1.5), 0.0);
    }

    #[test]
    fn test_seeded_noise_stays_in_range() {
        let mut noise = SeededNoise::from_seed(7);
        for _ in 0..1000 {
            let v = noise.sample(40.0, 60.0);
            assert!((40.0..=60.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let attrs = PropertyAttributes::new(100.0, "雨湖区");
        let mut a = SeededNoise::for_attributes(&attrs, 0);
        let mut b = SeededNoise::for_attributes(&attrs, 0);
        for _ in 0..10 {
            assert_eq!(a.sample(0.0, 1.0), b.sample(0.0, 1.0));
        }
    }

    #[test]
    fn test_seed_depends_on_attributes() {
        let a = PropertyAttributes::new(100.0, "雨湖区");
        let b = PropertyAttributes::new(100.0, "岳塘区");
        assert_eq!(attribute_seed(&a), attribute_seed(&a.clone()));
        assert_ne!(attribute_seed(&a), attribute_seed(&b));
    }

    #[test]
    fn test_seed_separates_field_boundaries() {
        let a = PropertyAttributes::new(100.0, "a|b");
        let b = PropertyAttributes::new(100.0, "a").with_sub_district("b");
        let c = PropertyAttributes::new(100.0, "a").with_layout("b");
        assert_ne!(attribute_seed(&a), attribute_seed(&b));
        assert_ne!(attribute_seed(&b), attribute_seed(&c));
    }

    #[test]
    fn test_empty_range_returns_low() {
        let mut noise = SeededNoise::from_seed(1);
        assert_eq!(noise.sample(5.0, 5.0), 5.0);
    }
}
