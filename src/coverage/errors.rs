/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the coverage module

/// Error types for the coverage module
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("Structure error: {0}")]
    StructureError(#[from] crate::atoms::StructureError),

    #[error("Site error: {0}")]
    SiteError(#[from] crate::sites::SiteError),

    #[error("Resolution error: {0}")]
    ResolutionError(String),
}

/// Result type for coverage operations
pub type Result<T> = std::result::Result<T, CoverageError>;
