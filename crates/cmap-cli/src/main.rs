//! cmap - color-map inspection and conversion CLI
//!
//! Thin front-end over cmap-core/cmap-ops/cmap-io: loads maps from the
//! built-in registry or from cpt/ct/json files and writes cpt tables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cmap_core::{ColorMap, Luminance};
use cmap_io::{DirStore, ExportOptions, open};
use cmap_ops::{greyscale, reverse};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "cmap")]
#[command(author, version, about = "Color-map inspection and conversion")]
#[command(long_about = "
Load color maps from the built-in registry or from cpt/ct/json color
tables, transform them, and export positional cpt tables.

Examples:
  cmap list                          # Registry names
  cmap info relief.cpt               # Show map structure
  cmap convert pal.ct out.cpt        # Re-encode as a cpt table
  cmap convert jet out.cpt -r        # Reversed built-in map
  cmap grey relief.cpt grey.cpt --profile rec601
  cmap sample gray -n 8              # Print an 8-entry LUT
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory color tables are loaded from and saved to
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in colormap names
    List,

    /// Display colormap structure
    #[command(visible_alias = "i")]
    Info {
        /// Registry name or color-table file
        source: String,
    },

    /// Convert any supported source to a cpt table
    #[command(visible_alias = "c")]
    Convert {
        /// Registry name or color-table file
        source: String,
        /// Output cpt file
        output: String,
        /// Number of LUT samples to discretize into
        #[arg(short = 'n', long, default_value = "255")]
        samples: usize,
        /// Reverse the map before writing
        #[arg(short, long)]
        reverse: bool,
    },

    /// Convert a map to greyscale and write it as a cpt table
    Grey {
        /// Registry name or color-table file
        source: String,
        /// Output cpt file
        output: String,
        /// Luminance weighting profile
        #[arg(long, value_enum, default_value = "rec709")]
        profile: Profile,
        /// Sampling resolution for segmented maps
        #[arg(long, default_value = "255")]
        resolution: usize,
        /// Number of LUT samples to discretize into
        #[arg(short = 'n', long, default_value = "255")]
        samples: usize,
    },

    /// Print an evenly spaced RGBA lookup table
    Sample {
        /// Registry name or color-table file
        source: String,
        /// Number of samples
        #[arg(short = 'n', long, default_value = "16")]
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Rec. 709 linear weights
    Rec709,
    /// Rec. 601 linear weights
    Rec601,
    /// Rec. 601 weights on squared channels
    Rec601Perceptual,
}

impl From<Profile> for Luminance {
    fn from(p: Profile) -> Self {
        match p {
            Profile::Rec709 => Luminance::Rec709,
            Profile::Rec601 => Luminance::Rec601,
            Profile::Rec601Perceptual => Luminance::Rec601Perceptual,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let store = DirStore::new(&cli.dir);
    match cli.command {
        Commands::List => {
            for name in cmap_core::builtin::names() {
                println!("{name}");
            }
        }
        Commands::Info { source } => {
            let map = open(&store, &source)
                .with_context(|| format!("failed to load {source}"))?;
            print_info(&map)?;
        }
        Commands::Convert {
            source,
            output,
            samples,
            reverse: rev,
        } => {
            let mut map = open(&store, &source)
                .with_context(|| format!("failed to load {source}"))?;
            if rev {
                map = reverse(&map);
            }
            let opts = ExportOptions {
                samples,
                ..Default::default()
            };
            cmap_io::cpt::save(&store, &output, &map, &opts)
                .with_context(|| format!("failed to write {output}"))?;
            debug!(%source, %output, samples, "converted");
        }
        Commands::Grey {
            source,
            output,
            profile,
            resolution,
            samples,
        } => {
            let map = open(&store, &source)
                .with_context(|| format!("failed to load {source}"))?;
            let grey = greyscale(&map, profile.into(), resolution)?;
            let opts = ExportOptions {
                samples,
                ..Default::default()
            };
            cmap_io::cpt::save(&store, &output, &grey, &opts)
                .with_context(|| format!("failed to write {output}"))?;
        }
        Commands::Sample { source, count } => {
            let map = open(&store, &source)
                .with_context(|| format!("failed to load {source}"))?;
            for (i, c) in map.sample(count)?.iter().enumerate() {
                let t = i as f32 / (count - 1) as f32;
                let [r, g, b] = c.to_rgb8();
                println!("{t:.4}  {r:3} {g:3} {b:3}  a={:.3}", c.a);
            }
        }
    }
    Ok(())
}

fn print_info(map: &ColorMap) -> Result<()> {
    println!("name:    {}", map.name());
    match map {
        ColorMap::Listed(m) => {
            println!("variant: listed ({} colors)", m.len());
        }
        ColorMap::Segmented(m) => {
            println!("variant: segmented");
            println!(
                "points:  r={} g={} b={} a={}",
                m.red.len(),
                m.green.len(),
                m.blue.len(),
                m.alpha.as_ref().map_or(0, Vec::len),
            );
            println!("breaks:  {}", m.breakpoints().len());
        }
    }
    let seg = map.to_segmented()?;
    let lo = seg.evaluate(0.0).to_rgb8();
    let hi = seg.evaluate(1.0).to_rgb8();
    println!("ends:    ({} {} {}) -> ({} {} {})", lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]);
    Ok(())
}
