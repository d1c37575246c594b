//! Command-line flags (C9). Every flag is `Option` so the binary can tell a
//! flag the user actually typed apart from a default value, which is what
//! lets [`Cli::merge_onto`] implement "CLI flags override the config file"
//! instead of always winning outright.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigLayout};

#[derive(Parser, Debug)]
#[command(name = "jacobi_heat", version, about = "Parallel Jacobi relaxation solver for steady-state 2D heat diffusion")]
pub struct Cli {
    /// Uniform starting value for every interior cell.
    #[arg(long = "init-value")]
    pub init_value: Option<f64>,

    /// Interior side length (the solved grid is `size + 2` including the boundary ring).
    #[arg(long)]
    pub size: Option<usize>,

    /// Maximum number of sweeps before giving up on convergence.
    #[arg(long = "max-iters")]
    pub max_iters: Option<u32>,

    /// Residual threshold below which the solve is considered converged.
    #[arg(long)]
    pub tol: Option<f64>,

    /// Worker thread count; 1 runs the sequential path, anything else must
    /// be a perfect square dividing `size`.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Physical grid storage engine.
    #[arg(long, value_enum)]
    pub layout: Option<CliLayout>,

    #[arg(long)]
    pub top: Option<f64>,
    #[arg(long)]
    pub bottom: Option<f64>,
    #[arg(long)]
    pub left: Option<f64>,
    #[arg(long)]
    pub right: Option<f64>,

    /// Optional TOML config file; explicit flags above override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CliLayout {
    Contiguous,
    Rows,
}

impl From<CliLayout> for ConfigLayout {
    fn from(value: CliLayout) -> Self {
        match value {
            CliLayout::Contiguous => ConfigLayout::Contiguous,
            CliLayout::Rows => ConfigLayout::Rows,
        }
    }
}

impl Cli {
    /// Merge this CLI invocation on top of `base` (typically loaded from
    /// `--config`, or `Config::default()` if none was given): any field the
    /// user actually passed on the command line overrides `base`'s value.
    pub fn merge_onto(&self, mut base: Config) -> Config {
        if let Some(v) = self.init_value {
            base.init_value = v;
        }
        if let Some(v) = self.size {
            base.size = v;
        }
        if let Some(v) = self.max_iters {
            base.max_iters = v;
        }
        if let Some(v) = self.tol {
            base.tol = v;
        }
        if let Some(v) = self.threads {
            base.threads = v;
        }
        if let Some(v) = self.layout {
            base.layout = v.into();
        }
        if let Some(v) = self.top {
            base.top = v;
        }
        if let Some(v) = self.bottom {
            base.bottom = v;
        }
        if let Some(v) = self.left {
            base.left = v;
        }
        if let Some(v) = self.right {
            base.right = v;
        }
        base
    }
}
