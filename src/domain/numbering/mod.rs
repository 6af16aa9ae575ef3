//! Phone number normalization

pub mod normalizer;

pub use normalizer::NumberNormalizer;
