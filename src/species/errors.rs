/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the species module

/// Error types for the species module
#[derive(Debug, thiserror::Error)]
pub enum SpeciesError {
    #[error("Invalid chemical formula: {0}")]
    InvalidFormula(String),

    #[error("Species {0} is not defined in the adsorbate registries")]
    UnknownSpecies(String),

    #[error("No template geometry available for species {0}")]
    MissingTemplate(String),
}

/// Result type for species operations
pub type Result<T> = std::result::Result<T, SpeciesError>;
