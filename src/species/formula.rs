/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Chemical formula parsing and normalization
//!
//! Adsorbate names are written so that the first element is the bonding
//! element and hydrogens follow the atom they bond to (e.g. water is `OH2`,
//! methanol is `CH3OH`). Expansion turns such a name into its explicit
//! symbol sequence (`CH3OH` → C H H H O H), which is the canonical form
//! compared against the symbol sequence of a detected molecule.

use std::collections::BTreeMap;

use super::errors::{Result, SpeciesError};

/// Expands a formula string into its explicit symbol sequence
///
/// Counts apply to the directly preceding element; order of appearance is
/// preserved.
pub fn parse_formula(formula: &str) -> Result<Vec<String>> {
    let chars: Vec<char> = formula.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !c.is_ascii_uppercase() {
            return Err(SpeciesError::InvalidFormula(formula.to_string()));
        }
        let mut symbol = c.to_string();
        i += 1;
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            symbol.push(chars[i]);
            i += 1;
        }
        let mut count = 0usize;
        while i < chars.len() && chars[i].is_ascii_digit() {
            count = count * 10 + chars[i].to_digit(10).unwrap() as usize;
            i += 1;
        }
        let count = count.max(1);
        for _ in 0..count {
            symbols.push(symbol.clone());
        }
    }
    if symbols.is_empty() {
        return Err(SpeciesError::InvalidFormula(formula.to_string()));
    }
    Ok(symbols)
}

/// Expands a formula string into a concatenated symbol string
pub fn expand_formula(formula: &str) -> Result<String> {
    Ok(parse_formula(formula)?.concat())
}

/// Number of atoms described by a formula string
pub fn formula_atom_count(formula: &str) -> Result<usize> {
    Ok(parse_formula(formula)?.len())
}

/// Concatenates a symbol sequence, sorted, for order-insensitive matching
pub fn sorted_symbol_key<S: AsRef<str>>(symbols: &[S]) -> String {
    let mut sorted: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
    sorted.sort_unstable();
    sorted.concat()
}

/// Builds the Hill chemical formula for a symbol sequence
///
/// Carbon first, hydrogen second, remaining elements alphabetically; counts
/// of one are omitted.
pub fn hill_formula<S: AsRef<str>>(symbols: &[S]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for s in symbols {
        *counts.entry(s.as_ref()).or_insert(0) += 1;
    }

    let mut out = String::new();
    let mut push = |symbol: &str, count: usize| {
        out.push_str(symbol);
        if count > 1 {
            out.push_str(&count.to_string());
        }
    };

    if let Some(&c) = counts.get("C") {
        push("C", c);
        counts.remove("C");
        if let Some(&h) = counts.get("H") {
            push("H", h);
            counts.remove("H");
        }
    }
    for (symbol, count) in counts {
        push(symbol, count);
    }
    out
}
