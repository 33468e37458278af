/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Coverage pattern generation module
//!
//! The mutation/search drivers: stochastic sampling and systematic
//! enumeration over add/remove/move/replace actions, with duplicate
//! rejection via label multisets and graph isomorphism.

pub mod actions;
pub mod common;
pub mod errors;
pub mod history;
pub mod log;
pub mod stochastic;
pub mod systematic;

pub use actions::{add_adsorbate_to_site, remove_adsorbate_from_site};
pub use common::{Action, PatternGeneratorConfig};
pub use errors::{PatternError, Result};
pub use history::{Duplicate, PatternHistory};
pub use log::TrialLog;
pub use stochastic::{RunOptions, RunSummary, StochasticPatternGenerator};
pub use systematic::{EnumerationOptions, EnumerationSummary, SystematicPatternGenerator};
