//! Command-line interface for generating, solving and replaying levels

use crate::algorithm::generator::GeneratorConfig;
use crate::algorithm::pathfinder::HintSearch;
use crate::game::level::Level;
use crate::game::observer::LogSink;
use crate::game::session::Session;
use crate::game::state::{GameState, SavedGame};
use crate::game::worker::{GenerationJob, GenerationWorker, LevelSource, WorkerEvent};
use crate::io::configuration::{
    DEFAULT_BULK_TOTAL, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED, HINT_MAX_BRANCHES,
    HINT_MAX_RETRIES, INDEX_FILE_NAME, LEVEL_FILE_EXTENSION, SINGLE_GAME_DEADLINE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::level_file::{load_saved_game, read_levels, save_game};
use crate::io::progress::GenerationProgress;
use crate::spatial::Direction;
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "inertia")]
#[command(
    author,
    version,
    about = "Generate, solve and replay sliding-ball gem puzzles"
)]
/// Command-line arguments for the puzzle tool
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Dimension index mapping grid sizes to level files
    #[arg(long, global = true, default_value = INDEX_FILE_NAME)]
    pub index: PathBuf,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Grid size arguments
#[derive(Args, Clone, Copy, Debug)]
pub struct SizeArgs {
    /// Grid rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Grid columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,
}

/// Level selection arguments for commands that play a stored level
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Level file, or a saved game with --saved
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Zero-based record to load from a level file
    #[arg(long, default_value_t = 0)]
    pub record: usize,

    /// Treat FILE as a saved game
    #[arg(long)]
    pub saved: bool,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate games in bulk into a level file and register it in the index
    Generate {
        /// Grid size
        #[command(flatten)]
        size: SizeArgs,

        /// Number of games to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_BULK_TOTAL)]
        count: usize,

        /// Output level file (defaults to levels_<rows>x<cols>.lvl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducible generation
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Generate one game, falling back to a stored level on timeout
    New {
        /// Grid size
        #[command(flatten)]
        size: SizeArgs,

        /// Random seed for reproducible generation
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Write the game to this file as a saved game
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Follow hints until the level is solved and print the moves
    Hint {
        /// Level to solve
        #[command(flatten)]
        source: SourceArgs,

        /// Frontier size that restarts the hint search
        #[arg(long, default_value_t = HINT_MAX_BRANCHES)]
        max_branches: usize,

        /// Hint search restarts before giving up
        #[arg(long, default_value_t = HINT_MAX_RETRIES)]
        max_retries: usize,
    },

    /// Replay a sequence of moves on a level
    Play {
        /// Level to play
        #[command(flatten)]
        source: SourceArgs,

        /// Moves such as up, down-left or ur
        #[arg(value_name = "DIRECTION")]
        moves: Vec<Direction>,

        /// Write the resulting game to this file as a saved game
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter matching the verbosity flags
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// Runs the selected subcommand
pub struct CommandProcessor {
    cli: Cli,
}

impl CommandProcessor {
    /// Create a processor for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if generation, file access or level decoding fails
    pub fn process(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate {
                size,
                count,
                output,
                seed,
            } => {
                let output = output
                    .clone()
                    .unwrap_or_else(|| default_output_path(*size));
                self.generate(*size, *count, &output, *seed)
            }
            Command::New { size, seed, save } => self.new_game(*size, *seed, save.as_deref()),
            Command::Hint {
                source,
                max_branches,
                max_retries,
            } => Self::solve(source, HintSearch::new(*max_branches, *max_retries)),
            Command::Play {
                source,
                moves,
                save,
            } => Self::play(source, moves, save.as_deref()),
        }
    }

    // Allow print for the generation summary
    #[allow(clippy::print_stdout)]
    fn generate(&self, size: SizeArgs, count: usize, output: &Path, seed: u64) -> Result<()> {
        let worker = GenerationWorker::spawn(Arc::new(LogSink))?;
        worker.submit(GenerationJob::Bulk {
            config: generator_config(size, seed),
            total: count,
            output: output.to_path_buf(),
            index_path: self.cli.index.clone(),
        })?;

        let label = format!("{}x{}", size.rows, size.cols);
        let progress = GenerationProgress::new(count, self.cli.should_show_progress(), &label);

        loop {
            match worker.recv()? {
                WorkerEvent::Progress { .. } => progress.inc(),
                WorkerEvent::BulkCompleted { written, path } => {
                    progress.finish(written);
                    println!("Wrote {written}/{count} games to {}", path.display());
                    break;
                }
                WorkerEvent::Failed(error) => return Err(error),
                WorkerEvent::NewGame(_) => {}
            }
        }

        worker.shutdown()
    }

    // Allow print for rendering the generated level
    #[allow(clippy::print_stdout)]
    fn new_game(&self, size: SizeArgs, seed: u64, save: Option<&Path>) -> Result<()> {
        let worker = GenerationWorker::spawn(Arc::new(LogSink))?;
        worker.submit(GenerationJob::NewGame {
            config: generator_config(size, seed),
            deadline: SINGLE_GAME_DEADLINE,
            index_path: self.cli.index.clone(),
        })?;

        let outcome = loop {
            match worker.recv()? {
                WorkerEvent::NewGame(outcome) => break outcome,
                WorkerEvent::Failed(error) => return Err(error),
                WorkerEvent::Progress { .. } | WorkerEvent::BulkCompleted { .. } => {}
            }
        };
        worker.shutdown()?;

        let Some(game) = outcome else {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", size.rows, size.cols),
                &"no level could be generated in time and none are stored for this size",
            ));
        };

        match game.source {
            LevelSource::Generated => println!("Generated level:"),
            LevelSource::Stored => println!("Generation timed out, loaded a stored level:"),
        }
        let state = GameState::new(game.level);
        print!("{}", render(&state));

        if let Some(path) = save {
            save_game(path, &state.save())?;
            println!("Saved to {}", path.display());
        }
        Ok(())
    }

    // Allow print for the solution listing
    #[allow(clippy::print_stdout)]
    fn solve(source: &SourceArgs, search: HintSearch) -> Result<()> {
        let mut session = open_session(source)?.with_hint_search(search);
        let move_limit = session.state().grid().len() * Direction::ALL.len();
        let mut moves = Vec::new();

        while !session.state().is_completed() && moves.len() < move_limit {
            let Some(direction) = session.hint() else {
                break;
            };
            let result = session.move_ball(direction)?;
            session.announce_ball_position()?;
            moves.push(direction);
            if result.is_fatal() || session.state().explodes_with_any_move() {
                break;
            }
        }

        let listing: Vec<&str> = moves.iter().map(|direction| direction.name()).collect();
        println!("{}", listing.join(" "));
        if session.state().is_completed() {
            println!("Solved in {} moves", moves.len());
        } else {
            println!(
                "Stopped with {} gems left after {} moves",
                session.state().remaining_gems(),
                moves.len()
            );
        }
        Ok(())
    }

    // Allow print for the move-by-move replay
    #[allow(clippy::print_stdout)]
    fn play(source: &SourceArgs, moves: &[Direction], save: Option<&Path>) -> Result<()> {
        let mut session = open_session(source)?;

        for &direction in moves {
            let result = session.move_ball(direction)?;
            session.announce_ball_position()?;
            println!(
                "{direction}: {} -> {} ({} gems collected)",
                result.from,
                result.destination,
                result.collected.len()
            );
            if result.is_fatal() {
                println!("The ball hit a mine at {}", result.destination);
                break;
            }
            if session.state().is_completed() {
                println!("All gems collected");
                break;
            }
            if session.state().explodes_with_any_move() {
                println!("Every move from {} ends on a mine", result.destination);
                break;
            }
        }

        print!("{}", render(session.state()));
        if let Some(path) = save {
            save_game(path, &session.save())?;
            println!("Saved to {}", path.display());
        }
        Ok(())
    }
}

fn open_session(source: &SourceArgs) -> Result<Session<LogSink>> {
    if source.saved {
        let saved: SavedGame = load_saved_game(&source.file)?;
        return Session::resume(saved, LogSink);
    }
    let level: Level = read_levels(&source.file)?
        .into_iter()
        .nth(source.record)
        .ok_or_else(|| {
            invalid_parameter(
                "record",
                &source.record,
                &format!("{} has fewer records", source.file.display()),
            )
        })?;
    Ok(Session::new(level, LogSink))
}

const fn generator_config(size: SizeArgs, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        rows: size.rows,
        cols: size.cols,
        seed,
    }
}

fn default_output_path(size: SizeArgs) -> PathBuf {
    PathBuf::from(format!(
        "levels_{}x{}.{LEVEL_FILE_EXTENSION}",
        size.rows, size.cols
    ))
}

/// Text rendering of the live cells with the ball drawn as `@`
pub fn render(state: &GameState) -> String {
    let ball = state.ball();
    let mut out = String::new();
    for (index, line) in state.grid().to_string().lines().enumerate() {
        if index == ball.row {
            out.extend(line.chars().enumerate().map(|(col, symbol)| {
                if col == ball.col { '@' } else { symbol }
            }));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "ball {ball}, {} of {} gems left",
        state.remaining_gems(),
        state.level().gems_count()
    );
    out
}
