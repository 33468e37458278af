/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Sequential structure archive
//!
//! Accepted structures are appended to an XYZ-style archive, one frame per
//! structure. The comment line of each frame carries a JSON payload with
//! the cell, the periodicity flags and the frame's sorted label multiset,
//! so the archive doubles as the side channel for duplicate-detection
//! metadata. Frames are flushed as they are written; a rejected trial
//! never reaches the writer.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atoms::{Atom, AtomicStructure, Cell, Vector3D};

use super::errors::{IoError, Result};

/// Per-frame metadata payload stored on the comment line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMeta {
    /// Lattice vectors as rows
    pub lattice: [[f64; 3]; 3],
    /// Per-axis periodicity flags
    pub pbc: [bool; 3],
    /// Sorted label multiset of the occupied sites
    pub labels: Vec<String>,
}

/// Writes structures to a sequential archive
pub struct TrajectoryWriter {
    writer: BufWriter<File>,
}

impl TrajectoryWriter {
    /// Opens an archive for writing
    ///
    /// With `append` the file is extended; otherwise it is truncated.
    pub fn open<P: AsRef<Path>>(path: P, append: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends one frame together with its label multiset
    pub fn write(&mut self, structure: &AtomicStructure, labels: &[String]) -> Result<()> {
        let meta = FrameMeta {
            lattice: *structure.cell().matrix(),
            pbc: structure.cell().pbc(),
            labels: labels.to_vec(),
        };
        writeln!(self.writer, "{}", structure.atom_count())?;
        writeln!(self.writer, "{}", serde_json::to_string(&meta)?)?;
        for atom in structure.atoms() {
            let p = atom.position();
            writeln!(
                self.writer,
                "{} {:.8} {:.8} {:.8}",
                atom.symbol(),
                p.x,
                p.y,
                p.z
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads every frame of an archive
pub fn read_trajectory<P: AsRef<Path>>(path: P) -> Result<Vec<(AtomicStructure, Vec<String>)>> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();
    let mut frames = Vec::new();

    loop {
        let count_line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let trimmed = count_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let natoms: usize = trimmed
            .parse()
            .map_err(|_| IoError::ParseError(format!("invalid atom count: {}", trimmed)))?;
        let meta_line = lines
            .next()
            .ok_or_else(|| IoError::ParseError("missing frame metadata line".to_string()))??;
        let meta: FrameMeta = serde_json::from_str(meta_line.trim())?;

        let cell = Cell::new(meta.lattice, meta.pbc)?;
        let mut structure = AtomicStructure::new(cell);
        for _ in 0..natoms {
            let line = lines
                .next()
                .ok_or_else(|| IoError::ParseError("truncated frame".to_string()))??;
            let mut parts = line.split_whitespace();
            let symbol = parts
                .next()
                .ok_or_else(|| IoError::ParseError(format!("bad atom line: {}", line)))?;
            let coords: Vec<f64> = parts
                .take(3)
                .map(|p| {
                    p.parse::<f64>()
                        .map_err(|_| IoError::ParseError(format!("bad coordinate in: {}", line)))
                })
                .collect::<Result<_>>()?;
            if coords.len() != 3 {
                return Err(IoError::ParseError(format!("bad atom line: {}", line)));
            }
            structure.add_atom(Atom::new(
                symbol,
                Vector3D::new(coords[0], coords[1], coords[2]),
            ));
        }
        frames.push((structure, meta.labels));
    }
    Ok(frames)
}

/// Number of frames in an archive; zero for a missing file
pub fn frame_count<P: AsRef<Path>>(path: P) -> usize {
    if !path.as_ref().exists() {
        return 0;
    }
    read_trajectory(path).map(|f| f.len()).unwrap_or(0)
}
