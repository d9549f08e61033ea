//! # Noise Field Module
//!
//! Seeded, deterministic noise sampling for world generation. A [`NoiseField`]
//! owns several independent Perlin generators (three 2-D channels and one 3-D
//! channel), each seeded from the world seed so that every sample is
//! reproducible bit-for-bit for the same seed and coordinate. There is no
//! hidden global state; every call is pure given the field instance.
//!
//! On top of the raw channels the module provides fractal summation
//! ([`NoiseField::fbm2`]) and the ridged transform ([`NoiseField::ridged2`],
//! `1 - |n|` per octave) used for mountain crests.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Parameters for fractal (octave-summed) noise sampling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FractalSettings {
    /// Base frequency applied to input coordinates.
    pub scale: f64,
    /// Number of octaves to sum.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub gain: f64,
}

/// The independent 2-D noise channels a [`NoiseField`] exposes.
///
/// Each channel has its own generator seed, so the channels are uncorrelated
/// even at identical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel2 {
    /// Broad continental shape of the height field.
    Continents,
    /// Mountain crest channel, consumed through the ridged transform.
    Ridges,
    /// Erosion channel modulating ridge amplitude.
    Erosion,
}

/// A seeded set of independent continuous noise functions with range
/// approximately [-1, 1].
pub struct NoiseField {
    continents: Perlin,
    ridges: Perlin,
    erosion: Perlin,
    caves: Perlin,
}

impl NoiseField {
    /// Creates a noise field whose channels derive deterministically from `seed`.
    ///
    /// # Arguments
    /// * `seed` - The opaque world seed string
    pub fn new(seed: &str) -> Self {
        let base = hash_seed(seed);
        NoiseField {
            continents: Perlin::new(base),
            ridges: Perlin::new(base.wrapping_add(1)),
            erosion: Perlin::new(base.wrapping_add(2)),
            caves: Perlin::new(base.wrapping_add(3)),
        }
    }

    fn channel(&self, channel: Channel2) -> &Perlin {
        match channel {
            Channel2::Continents => &self.continents,
            Channel2::Ridges => &self.ridges,
            Channel2::Erosion => &self.erosion,
        }
    }

    /// Samples a single octave of a 2-D channel at the given frequency.
    ///
    /// # Returns
    /// A value in approximately [-1, 1].
    pub fn sample2(&self, channel: Channel2, x: f64, z: f64, scale: f64) -> f64 {
        self.channel(channel).get([x * scale, z * scale])
    }

    /// Samples a single octave of the 3-D cave channel at the given frequency.
    ///
    /// # Returns
    /// A value in approximately [-1, 1].
    pub fn sample3(&self, x: f64, y: f64, z: f64, scale: f64) -> f64 {
        self.caves.get([x * scale, y * scale, z * scale])
    }

    /// Fractal Brownian motion: sums `settings.octaves` octaves of a 2-D
    /// channel, normalized by total amplitude back into [-1, 1].
    pub fn fbm2(&self, channel: Channel2, x: f64, z: f64, settings: &FractalSettings) -> f64 {
        let noise = self.channel(channel);
        let mut amplitude = 1.0;
        let mut frequency = settings.scale;
        let mut total = 0.0;
        let mut max_value = 0.0;
        for _ in 0..settings.octaves {
            total += amplitude * noise.get([x * frequency, z * frequency]);
            max_value += amplitude;
            amplitude *= settings.gain;
            frequency *= settings.lacunarity;
        }
        total / max_value
    }

    /// Ridged fractal: sums `1 - |n|` per octave (sharp crests at the noise
    /// zero crossings), normalized and remapped to [-1, 1].
    pub fn ridged2(&self, channel: Channel2, x: f64, z: f64, settings: &FractalSettings) -> f64 {
        let noise = self.channel(channel);
        let mut amplitude = 1.0;
        let mut frequency = settings.scale;
        let mut total = 0.0;
        let mut max_value = 0.0;
        for _ in 0..settings.octaves {
            let n = noise.get([x * frequency, z * frequency]);
            total += amplitude * (1.0 - n.abs());
            max_value += amplitude;
            amplitude *= settings.gain;
            frequency *= settings.lacunarity;
        }
        (total / max_value) * 2.0 - 1.0
    }
}

/// Hashes the opaque seed string down to the 32-bit seed space the noise
/// generators accept (FNV-1a folded to 32 bits).
pub fn hash_seed(seed: &str) -> u32 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash ^ (hash >> 32)) as u32
}
