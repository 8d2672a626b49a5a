use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_weaver::{
    AuthoredCollection, Difficulty, Generator, GeneratorConfig, InMemoryVocabulary,
    JsonFilePlayHistory, MemoryPlayHistory, PlayHistoryStore, PuzzleSelector, PuzzleSource,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve a vocabulary crossword", long_about = None)]
struct Args {
    /// Difficulty tier: easy, medium, hard or exam
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for puzzle choice and synthesis, for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show the solution instead of the blank grid
    #[arg(long)]
    reveal: bool,

    /// Play history file (defaults to the local data directory)
    #[arg(long, conflicts_with = "no_history")]
    history: Option<PathBuf>,

    /// Ignore and do not record the play history
    #[arg(long)]
    no_history: bool,

    /// Record the served puzzle as played
    #[arg(long)]
    mark_played: bool,

    /// JSON file of authored puzzles to use instead of the bundled ones
    #[arg(long)]
    authored: Option<PathBuf>,

    /// JSON vocabulary file to use instead of the bundled one
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Synthesis attempts before falling back to a replay
    #[arg(long, default_value_t = 3)]
    attempts: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_weaver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let authored = match &args.authored {
        Some(path) => AuthoredCollection::from_path(path)
            .with_context(|| format!("failed to load puzzles from {}", path.display()))?,
        None => AuthoredCollection::bundled().context("bundled puzzles are malformed")?,
    };

    let vocabulary = match &args.vocabulary {
        Some(path) => InMemoryVocabulary::from_path(path)
            .with_context(|| format!("failed to load vocabulary from {}", path.display()))?,
        None => InMemoryVocabulary::bundled().context("bundled vocabulary is malformed")?,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = Generator::with_config(GeneratorConfig {
        max_attempts: args.attempts,
        ..GeneratorConfig::default()
    });

    let history_path = if args.no_history {
        None
    } else {
        args.history.clone().or_else(JsonFilePlayHistory::default_path)
    };

    match history_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using play history file");
            let selector = PuzzleSelector::new(authored, vocabulary, JsonFilePlayHistory::new(path))
                .with_generator(generator);
            run(selector, &args, &mut rng)
        }
        None => {
            let selector = PuzzleSelector::new(authored, vocabulary, MemoryPlayHistory::default())
                .with_generator(generator);
            run(selector, &args, &mut rng)
        }
    }
}

fn run<H: PlayHistoryStore>(
    mut selector: PuzzleSelector<AuthoredCollection, InMemoryVocabulary, H>,
    args: &Args,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let selected = selector.select(args.difficulty, rng)?;
    let puzzle = &selected.puzzle;

    if args.json {
        println!("{}", serde_json::to_string_pretty(puzzle)?);
    } else {
        let source = match selected.source {
            PuzzleSource::Authored => "authored",
            PuzzleSource::Synthesized => "generated",
            PuzzleSource::Replay => "authored, replayed",
        };
        println!("{} ({}, {}x{}, {source})\n", puzzle.id, puzzle.difficulty, puzzle.size, puzzle.size);

        if args.reveal {
            println!("{puzzle}");
        } else {
            println!("{}", puzzle.blank_grid());
            for (heading, list) in [("Across", &puzzle.clues.across), ("Down", &puzzle.clues.down)] {
                println!("{heading}");
                for clue in list {
                    println!("  {}. {} ({})", clue.num, clue.clue, clue.length);
                }
                println!();
            }
        }
    }

    // generated ids are one-off
    if args.mark_played && selected.source != PuzzleSource::Synthesized {
        selector
            .history_mut()
            .mark_played(&puzzle.id)
            .context("failed to record the puzzle as played")?;
    }

    Ok(())
}
