/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the sites module

/// Error types for the sites module
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Unknown site kind: {0}")]
    UnknownSiteKind(String),

    #[error("Substrate adjacency matrix must be square, got {rows}x{cols}")]
    NonSquareAdjacency { rows: usize, cols: usize },

    #[error("Site references substrate atom {index}, but only {count} substrate atoms exist")]
    SiteIndexOutOfRange { index: usize, count: usize },

    #[error("Surface atom index {index} out of range ({count} substrate atoms)")]
    SurfaceIndexOutOfRange { index: usize, count: usize },
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
