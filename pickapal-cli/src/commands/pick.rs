use anyhow::{anyhow, Result};
use clap::Parser;
use pickapal_core::{seeded_rng, PickConfig};
use serde::Serialize;
use tracing::instrument;

use super::seeded_roster;

#[derive(Parser, Debug)]
pub struct PickArgs {
    /// Names to pick from (added after any configured seed names)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Include the built-in sample names
    #[arg(long)]
    pub sample: bool,

    /// Number of picks to make
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Remove each picked name before the next pick
    #[arg(long, short = 'r')]
    pub remove: bool,

    /// Seed the random generator for repeatable picks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PickOutput<'a> {
    picks: &'a [String],
    remaining: &'a [String],
}

#[instrument(skip_all)]
pub fn run_pick(args: PickArgs, config: &PickConfig) -> Result<()> {
    let mut roster = seeded_roster(config, args.sample, &args.names);
    if args.remove {
        roster.set_remove_on_pick(true);
    }

    let mut rng = seeded_rng(args.seed.or(config.picker.seed));
    let mut picks = Vec::with_capacity(args.count);
    let mut failure = None;

    for _ in 0..args.count {
        match roster.pick_random_with(&mut rng) {
            Ok(name) => picks.push(name),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    if args.json {
        let output = PickOutput {
            picks: &picks,
            remaining: roster.names(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for name in &picks {
            println!("{}", name);
        }
    }

    match failure {
        Some(err) => Err(anyhow!("{}", err.notice())),
        None => Ok(()),
    }
}
