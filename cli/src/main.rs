use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineboard_core::Difficulty;
use std::io;
use std::path::PathBuf;

mod app;
mod command;
mod render;
mod scores;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Board to start with: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random, later games count up from it
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best times are kept
    #[arg(long, default_value = "minesweeper-scores.json")]
    scores: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let mut scores = scores::BestTimes::load(&args.scores)?;
    let mut session = session::Session::new(args.difficulty, args.seed.into());

    app::run(&mut session, &mut scores, io::stdin().lock(), io::stdout().lock())
}
