/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the io module

/// Error types for the io module
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Structure error: {0}")]
    StructureError(#[from] crate::atoms::StructureError),

    #[error("Site error: {0}")]
    SiteError(#[from] crate::sites::SiteError),
}

/// Result type for io operations
pub type Result<T> = std::result::Result<T, IoError>;
