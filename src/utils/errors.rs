/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the utils module

/// Error types for the utils module
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    #[error("Cannot choose from an empty population")]
    EmptyPopulation,

    #[error("Weight list length {weights} does not match population length {population}")]
    WeightMismatch { population: usize, weights: usize },

    #[error("Weights must be non-negative with a positive sum")]
    InvalidWeights,
}

/// Result type for utility operations
pub type Result<T> = std::result::Result<T, UtilsError>;
