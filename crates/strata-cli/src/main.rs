// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `strata`: open, inspect and re-save scene documents from the command line.
//!
//! Usage:
//!   strata open <scene>           # load, resolve assets, print a summary
//!   strata resave <in> <out>      # load and write back out
//!   strata inspect <scene>        # list entities, components and fields
//!   strata new <out>              # write an empty scene

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strata_io::StrataConfig;

#[derive(Parser)]
#[command(name = "strata", version)]
#[command(about = "Scene document tooling for Strata")]
struct Cli {
    /// Path of the project manifest.
    #[arg(long, global = true, default_value = "Strata.toml")]
    config: PathBuf,

    /// Overrides the asset root from the manifest.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a scene, resolve its assets and print a summary
    Open {
        /// Scene document to open.
        scene: PathBuf,
    },
    /// Load a scene and write it back out
    Resave {
        /// Scene document to read.
        input: PathBuf,
        /// Where to write the re-encoded document.
        output: PathBuf,
    },
    /// List entities, their components and reflected fields
    Inspect {
        /// Scene document to inspect.
        scene: PathBuf,
        /// Also print field metadata (ranges, hidden flags).
        #[arg(long)]
        meta: bool,
    },
    /// Write an empty scene document
    New {
        /// Where to write the document.
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StrataConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from '{}'", cli.config.display()))?;
    if let Some(root) = cli.assets {
        config.resolver.asset_root = root;
    }
    strata_telemetry::init_logging(&config.log_level).context("Failed to initialise logging")?;

    match cli.command {
        Commands::Open { scene } => commands::open(&config, &scene),
        Commands::Resave { input, output } => commands::resave(&input, &output),
        Commands::Inspect { scene, meta } => commands::inspect(&scene, meta),
        Commands::New { output } => commands::new_scene(&output),
    }
}
