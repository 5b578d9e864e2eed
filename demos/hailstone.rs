// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Prints the hailstone sequence and step count of every number from 1 up to a limit, first
//! with the naive counter and then with the memoizing one, and compares how long each took.
//!
//! Usage: `cargo run --example hailstone -- [limit]` (the limit defaults to 10000).

use hailmerge::{StepCache, StepCounter, hailstone, sentinel::VisitFn};
use std::{
    error::Error,
    io::{self, Write},
    time::Instant,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let limit = match std::env::args().nth(1) {
        Some(arg) => hailstone::start_value(arg.parse()?)?,
        None => 10_000,
    };
    let mut out = io::BufWriter::new(io::stdout().lock());

    writeln!(out, "Steps for hailstone sequence")?;

    writeln!(out, "Standard Algorithm")?;
    let start = Instant::now();
    for n in 1..=limit {
        write!(out, "Input number = {n}, Sequence = [ {n}")?;
        // sentinels cannot fail, so hold on to the first write error
        let mut failure = None;
        let steps = hailstone::steps_traced(
            n,
            VisitFn(|v| {
                if failure.is_none() {
                    failure = write!(out, " {v}").err();
                }
            }),
        )?;
        if let Some(e) = failure {
            return Err(e.into());
        }
        writeln!(out, " ], Steps = {steps}")?;
    }
    let simple_duration = start.elapsed();

    writeln!(out, "Optimized Algorithm")?;
    let mut counter = StepCounter::new();
    let start = Instant::now();
    for n in 1..=limit {
        let steps = counter.opt_steps(n)?;
        writeln!(out, "Input number = {n}, Steps = {steps}")?;
    }
    let opt_duration = start.elapsed();

    let max = counter.max_steps(1..=limit)?;
    writeln!(out, "Max Steps in previous sequence is = {max}")?;
    writeln!(out, "Total time simple algorithm = {simple_duration:?}")?;
    writeln!(out, "Total time opt algorithm = {opt_duration:?}")?;
    out.flush()?;

    info!(limit, cached = counter.cache().len(), "done");
    Ok(())
}
