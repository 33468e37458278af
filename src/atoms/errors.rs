/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Error types for the atoms module

/// Error types for the atoms module
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("Unknown element symbol: {0}")]
    UnknownElement(String),

    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    #[error("Atom index {index} out of range (structure has {len} atoms)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for structure operations
pub type Result<T> = std::result::Result<T, StructureError>;
