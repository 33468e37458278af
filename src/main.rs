/*
MIT License with ACAT Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: ACAT
Copyright (c) 2019-2022 Shuang Han, Technical University of Denmark.
All rights reserved.
*/

//! Main executable for acat-rs

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("acat-rs v{}", acat_rs::VERSION);
    println!("Adsorbate coverage analysis and pattern generation for catalytic surfaces");
    println!("-----------------------------------------------------------");

    let cli = acat_rs::cli::Cli::parse();
    acat_rs::cli::run(cli)?;

    Ok(())
}
