//! # Generation Module
//!
//! Procedural world generation: seeded noise channels, the terrain height
//! and density fields derived from them, biome classification over the
//! height field, and the vegetation decoration pass.

pub mod biome;
pub mod noise_field;
pub mod terrain;
pub mod vegetation;
