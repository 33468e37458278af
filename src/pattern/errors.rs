/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the pattern module
//!
//! Only configuration mistakes surface as errors here; every trial-local
//! rejection (no space, too close, nothing to remove) is a soft failure
//! handled inside the generators.

/// Error types for the pattern module
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Species {0:?} are not defined in the adsorbate registries")]
    UnknownSpecies(Vec<String>),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Species probability keys do not match the adsorbate species list")]
    SpeciesWeightMismatch,

    #[error("Action probability keys do not match the action list")]
    ActionWeightMismatch,

    #[error("Image probability list length {weights} does not match image count {images}")]
    ImageWeightMismatch { images: usize, weights: usize },

    #[error("At least one input image is required")]
    NoImages,

    #[error("Site is not occupied, nothing to remove")]
    SiteNotOccupied,

    #[error("Species error: {0}")]
    SpeciesError(#[from] crate::species::SpeciesError),

    #[error("Coverage error: {0}")]
    CoverageError(#[from] crate::coverage::CoverageError),

    #[error("Io error: {0}")]
    IoError(#[from] crate::io::IoError),

    #[error("Choice error: {0}")]
    ChoiceError(#[from] crate::utils::UtilsError),
}

/// Result type for pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;
