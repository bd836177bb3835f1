//! Long-lived background generation worker
//!
//! Generation jobs are queued over a channel and run one at a time on a
//! dedicated thread, which is the single writer of the level being built.
//! Results and progress flow back over a second channel. A bulk run ends
//! with a completion count on the sink. A new game is only handed back; the
//! session that installs it announces the reset.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use crate::algorithm::generator::{GeneratorConfig, LevelGenerator, RandomSelector};
use crate::game::level::Level;
use crate::game::observer::PresentationSink;
use crate::io::error::{GameError, Result};
use crate::io::index::DimensionIndex;
use crate::io::level_file::{LevelWriter, load_random_level};

/// Work accepted by the generation worker
#[derive(Debug, Clone)]
pub enum GenerationJob {
    /// Generate one interactive game, falling back to a stored level
    NewGame {
        /// Size and seed
        config: GeneratorConfig,
        /// Stop-pattern search deadline
        deadline: Duration,
        /// Index consulted for the fallback level
        index_path: PathBuf,
    },
    /// Generate levels into a file and register it in the index
    Bulk {
        /// Size and seed
        config: GeneratorConfig,
        /// Number of games requested
        total: usize,
        /// Level file to write
        output: PathBuf,
        /// Index to update
        index_path: PathBuf,
    },
}

/// Where a new game came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// Freshly generated
    Generated,
    /// Loaded from a stored level file
    Stored,
}

/// A level ready to be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    /// The level
    pub level: Level,
    /// Whether generation succeeded or the fallback was used
    pub source: LevelSource,
}

/// Messages sent back by the worker
#[derive(Debug)]
pub enum WorkerEvent {
    /// A bulk run wrote another game
    Progress {
        /// Games written so far
        written: usize,
        /// Games requested
        total: usize,
    },
    /// A new-game job finished; `None` when neither generation nor the
    /// stored levels produced one
    NewGame(Option<NewGame>),
    /// A bulk job finished
    BulkCompleted {
        /// Games written
        written: usize,
        /// Level file that was written
        path: PathBuf,
    },
    /// A job failed
    Failed(GameError),
}

/// Handle to the background generation thread
pub struct GenerationWorker {
    jobs: Option<Sender<GenerationJob>>,
    events: Receiver<WorkerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl GenerationWorker {
    /// Start the worker thread
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the thread cannot be spawned
    pub fn spawn<S: PresentationSink + 'static>(sink: Arc<S>) -> Result<Self> {
        let (job_tx, job_rx) = unbounded::<GenerationJob>();
        let (event_tx, event_rx) = unbounded::<WorkerEvent>();

        let handle = thread::Builder::new()
            .name("inertia-generation".to_string())
            .spawn(move || run(&job_rx, &event_tx, sink.as_ref()))
            .map_err(|error| GameError::WorkerUnavailable {
                reason: format!("failed to spawn generation thread: {error}"),
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Queue a job
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the worker thread has stopped
    pub fn submit(&self, job: GenerationJob) -> Result<()> {
        let jobs = self.jobs.as_ref().ok_or_else(|| GameError::WorkerUnavailable {
            reason: "worker is shutting down".to_string(),
        })?;
        jobs.send(job).map_err(|_send_error| GameError::WorkerUnavailable {
            reason: "generation thread stopped".to_string(),
        })
    }

    /// Wait for the next event
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the worker thread has stopped
    pub fn recv(&self) -> Result<WorkerEvent> {
        self.events
            .recv()
            .map_err(|_recv_error| GameError::WorkerUnavailable {
                reason: "generation thread stopped".to_string(),
            })
    }

    /// Wait up to `timeout` for the next event
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the worker thread has stopped
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerEvent>> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(GameError::WorkerUnavailable {
                reason: "generation thread stopped".to_string(),
            }),
        }
    }

    /// Stop accepting jobs and wait for queued ones to finish
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the worker thread panicked
    pub fn shutdown(mut self) -> Result<()> {
        self.jobs.take();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_panic| GameError::WorkerUnavailable {
                reason: "generation thread panicked".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Drop for GenerationWorker {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run<S: PresentationSink + ?Sized>(
    jobs: &Receiver<GenerationJob>,
    events: &Sender<WorkerEvent>,
    sink: &S,
) {
    for job in jobs {
        let event = match job {
            GenerationJob::NewGame {
                config,
                deadline,
                index_path,
            } => new_game(config, deadline, &index_path).map(WorkerEvent::NewGame),
            GenerationJob::Bulk {
                config,
                total,
                output,
                index_path,
            } => {
                let result = generate_to_file(config, total, &output, &index_path, |written| {
                    let _ = events.send(WorkerEvent::Progress { written, total });
                });
                if let Ok(written) = &result {
                    sink.generation_completed(*written);
                }
                result.map(|written| WorkerEvent::BulkCompleted {
                    written,
                    path: output,
                })
            }
        };

        let event = event.unwrap_or_else(|error| {
            log::warn!("Generation job failed: {error}");
            WorkerEvent::Failed(error)
        });
        if events.send(event).is_err() {
            log::debug!("Event receiver dropped, stopping generation worker");
            break;
        }
    }
}

/// Generate one interactive game, falling back to a random stored level
///
/// Returns `Ok(None)` when generation missed `deadline` and the index has no
/// level file for these dimensions.
///
/// # Errors
///
/// Returns an error if the index or the stored level file cannot be read
pub fn new_game(
    config: GeneratorConfig,
    deadline: Duration,
    index_path: &Path,
) -> Result<Option<NewGame>> {
    let mut generator = LevelGenerator::new(config)?;
    if let Some(level) = generator.generate_level(deadline)? {
        return Ok(Some(NewGame {
            level,
            source: LevelSource::Generated,
        }));
    }

    let index = DimensionIndex::load(index_path)?;
    let Some(path) = index.path_for(config.rows, config.cols) else {
        log::info!(
            "No stored {}x{} levels to fall back on",
            config.rows,
            config.cols
        );
        return Ok(None);
    };

    log::info!("Falling back to a stored level from {}", path.display());
    let mut random = RandomSelector::new(config.seed);
    Ok(load_random_level(path, &mut random)?.map(|level| NewGame {
        level,
        source: LevelSource::Stored,
    }))
}

/// Generate `total` games into `output` and register it in the index
///
/// `on_written` is called with the running count after each game. Returns
/// the number of games written.
///
/// # Errors
///
/// Returns an error if the level file or the index cannot be written, or if
/// `output` cannot be registered in the index
pub fn generate_to_file<F>(
    config: GeneratorConfig,
    total: usize,
    output: &Path,
    index_path: &Path,
    mut on_written: F,
) -> Result<usize>
where
    F: FnMut(usize),
{
    let mut index = DimensionIndex::load(index_path)?;
    index.update(config.rows, config.cols, output)?;

    let mut generator = LevelGenerator::new(config)?;
    let mut writer = LevelWriter::create(output)?;

    generator.generate_batch(total, |level| {
        writer.write(level)?;
        on_written(writer.written());
        Ok(())
    })?;
    let written = writer.finish()?;

    index.save(index_path)?;

    log::info!("Wrote {written} games to {}", output.display());
    Ok(written)
}
