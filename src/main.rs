use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jacobi_heat::cli::Cli;
use jacobi_heat::config::{self, Config};
use jacobi_heat::consts::INVALID_PROBLEM_PARAMS_EXIT_CODE;
use jacobi_heat::grid::Boundary;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => config::load(path),
        None => Config::default(),
    };
    let cfg = cli.merge_onto(base);

    let boundary = Boundary::new(cfg.top, cfg.bottom, cfg.left, cfg.right);
    let layout = cfg.layout.into();

    let started = Instant::now();
    let (grid, iters, residual) = match jacobi_heat::solve(cfg.init_value, cfg.size, cfg.max_iters, cfg.tol, cfg.threads, boundary, layout) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(INVALID_PROBLEM_PARAMS_EXIT_CODE);
        }
    };
    let elapsed = started.elapsed();

    println!("{}", grid.format());
    println!("iterations: {iters}");
    println!("residual:   {residual:e}");
    println!("converged:  {}", residual <= cfg.tol);
    println!("elapsed:    {elapsed:?}");

    Ok(())
}
