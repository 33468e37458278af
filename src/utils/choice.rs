/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Weighted random selection primitives
//!
//! All stochastic decisions in the pattern generators (action, species,
//! image and site choices) go through this module, so seeding a single
//! `StdRng` makes an entire generation run reproducible.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::errors::{Result, UtilsError};

/// Creates the generator RNG, seeded for reproducibility when requested
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Chooses one item uniformly at random from a population
pub fn choice<'a, T>(rng: &mut StdRng, population: &'a [T]) -> Result<&'a T> {
    if population.is_empty() {
        return Err(UtilsError::EmptyPopulation);
    }
    let i = rng.gen_range(0..population.len());
    Ok(&population[i])
}

/// Chooses one item from a population with the given relative weights
///
/// With `weights == None` this degrades to a uniform choice.
pub fn weighted_choice<'a, T>(
    rng: &mut StdRng,
    population: &'a [T],
    weights: Option<&[f64]>,
) -> Result<&'a T> {
    let Some(weights) = weights else {
        return choice(rng, population);
    };
    if population.is_empty() {
        return Err(UtilsError::EmptyPopulation);
    }
    if weights.len() != population.len() {
        return Err(UtilsError::WeightMismatch {
            population: population.len(),
            weights: weights.len(),
        });
    }
    let dist = WeightedIndex::new(weights).map_err(|_| UtilsError::InvalidWeights)?;
    Ok(&population[dist.sample(rng)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_choice_is_deterministic() {
        let population = vec!["a", "b", "c", "d"];
        let picks1: Vec<&str> = {
            let mut rng = make_rng(Some(42));
            (0..10).map(|_| *choice(&mut rng, &population).unwrap()).collect()
        };
        let picks2: Vec<&str> = {
            let mut rng = make_rng(Some(42));
            (0..10).map(|_| *choice(&mut rng, &population).unwrap()).collect()
        };
        assert_eq!(picks1, picks2);
    }

    #[test]
    fn test_weighted_choice_respects_zero_weight() {
        let mut rng = make_rng(Some(7));
        let population = vec!["never", "always"];
        for _ in 0..50 {
            let pick = weighted_choice(&mut rng, &population, Some(&[0.0, 1.0])).unwrap();
            assert_eq!(*pick, "always");
        }
    }

    #[test]
    fn test_empty_population_is_an_error() {
        let mut rng = make_rng(Some(0));
        let empty: Vec<u8> = Vec::new();
        assert!(choice(&mut rng, &empty).is_err());
    }

    #[test]
    fn test_weight_length_mismatch_is_an_error() {
        let mut rng = make_rng(Some(0));
        let population = vec![1, 2, 3];
        assert!(weighted_choice(&mut rng, &population, Some(&[0.5, 0.5])).is_err());
    }
}
