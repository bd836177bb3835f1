//! Tests for the background generation worker

#[cfg(test)]
mod tests {
    use inertia::algorithm::generator::GeneratorConfig;
    use inertia::game::level::Level;
    use inertia::game::observer::{EventQueue, SinkEvent};
    use inertia::game::session::Session;
    use inertia::game::worker::{
        GenerationJob, GenerationWorker, LevelSource, WorkerEvent, generate_to_file, new_game,
    };
    use inertia::io::index::DimensionIndex;
    use inertia::io::level_file::{LevelWriter, read_levels};
    use inertia::spatial::{Grid, Position};
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    const fn config(rows: usize, cols: usize, seed: u64) -> GeneratorConfig {
        GeneratorConfig { rows, cols, seed }
    }

    fn trap_level() -> Level {
        let grid: Grid = "x####\n..o*.\n.###.\n.###.\n*###."
            .parse()
            .expect("valid grid text");
        Level::new(
            grid,
            Position::new(1, 2),
            BTreeSet::from([Position::new(4, 0)]),
            vec![Position::new(4, 0)],
        )
        .expect("valid level")
    }

    fn store_trap_level(dir: &Path) -> PathBuf {
        let levels = dir.join("levels_5x5.lvl");
        let mut writer = LevelWriter::create(&levels).expect("create level file");
        writer.write(&trap_level()).expect("write level");
        writer.finish().expect("flush level file");

        let index_path = dir.join("levels.idx");
        let mut index = DimensionIndex::new();
        index.update(5, 5, &levels).expect("register level file");
        index.save(&index_path).expect("save index");
        index_path
    }

    // Tests the stored-level fallback when generation misses its deadline
    // Verified by skipping the index lookup
    #[test]
    fn test_new_game_falls_back_to_stored_level() {
        let dir = TempDir::new().expect("temp dir");
        let index_path = store_trap_level(dir.path());

        let game = new_game(config(5, 5, 1), Duration::ZERO, &index_path)
            .expect("new game")
            .expect("stored level available");

        assert_eq!(game.source, LevelSource::Stored);
        assert_eq!(game.level, trap_level());
    }

    // Tests that no level is produced without generation or storage
    #[test]
    fn test_new_game_without_fallback() {
        let dir = TempDir::new().expect("temp dir");
        let index_path = store_trap_level(dir.path());

        let missing_size =
            new_game(config(6, 6, 1), Duration::ZERO, &index_path).expect("new game");
        assert_eq!(missing_size, None);

        let missing_index = dir.path().join("absent.idx");
        let nothing = new_game(config(5, 5, 1), Duration::ZERO, &missing_index).expect("new game");
        assert_eq!(nothing, None);
    }

    // Tests bulk generation into a file and the index update
    // Verified by updating the index before writing the levels
    #[test]
    fn test_generate_to_file_updates_index() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("levels_5x5.lvl");
        let index_path = dir.path().join("levels.idx");
        let mut counts = Vec::new();

        let written = generate_to_file(config(5, 5, 4), 2, &output, &index_path, |count| {
            counts.push(count);
        })
        .expect("bulk generation");

        assert!(written <= 2);
        assert_eq!(counts, (1..=written).collect::<Vec<_>>());
        assert_eq!(read_levels(&output).expect("read levels").len(), written);

        let index = DimensionIndex::load(&index_path).expect("load index");
        assert_eq!(index.path_for(5, 5), Some(output.as_path()));
    }

    // Tests that a new game is announced once, by the session installing it
    // Verified by bracketing the new-game job with a reset pair on the worker
    #[test]
    fn test_worker_new_game_job() {
        let dir = TempDir::new().expect("temp dir");
        let index_path = store_trap_level(dir.path());
        let sink = Arc::new(EventQueue::new());
        let worker = GenerationWorker::spawn(Arc::clone(&sink)).expect("spawn worker");

        worker
            .submit(GenerationJob::NewGame {
                config: config(5, 5, 2),
                deadline: Duration::ZERO,
                index_path,
            })
            .expect("submit");

        let game = match worker.recv().expect("event") {
            WorkerEvent::NewGame(Some(game)) => game,
            other => unreachable!("expected a stored game, got {other:?}"),
        };
        assert_eq!(game.source, LevelSource::Stored);
        worker.shutdown().expect("shutdown");
        assert!(sink.drain().is_empty());

        let _session = Session::new(game.level, Arc::clone(&sink));
        let events = sink.drain();
        assert_eq!(
            events
                .iter()
                .filter(|&&event| event == SinkEvent::ResetBegin)
                .count(),
            1
        );
        assert_eq!(
            events
                .iter()
                .filter(|&&event| event == SinkEvent::ResetEnd)
                .count(),
            1
        );
    }

    // Tests progress events and the completion notification of a bulk job
    #[test]
    fn test_worker_bulk_job() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("bulk.lvl");
        let sink = Arc::new(EventQueue::new());
        let worker = GenerationWorker::spawn(Arc::clone(&sink)).expect("spawn worker");

        worker
            .submit(GenerationJob::Bulk {
                config: config(5, 5, 8),
                total: 2,
                output: output.clone(),
                index_path: dir.path().join("levels.idx"),
            })
            .expect("submit");

        let mut progress = Vec::new();
        let last = loop {
            match worker.recv().expect("event") {
                WorkerEvent::Progress { written, total } => progress.push((written, total)),
                other => break other,
            }
        };
        worker.shutdown().expect("shutdown");

        let written = progress.last().map_or(0, |&(count, _)| count);
        assert!(progress.iter().all(|&(_, total)| total == 2));
        let completed = matches!(
            &last,
            WorkerEvent::BulkCompleted { written: done, path }
                if *done == written && *path == output
        );
        assert!(completed, "unexpected event {last:?}");
        assert_eq!(sink.drain(), vec![SinkEvent::GenerationCompleted(written)]);
    }

    // Tests that failures are reported as events and the worker keeps running
    #[test]
    fn test_worker_reports_failures() {
        let dir = TempDir::new().expect("temp dir");
        let worker = GenerationWorker::spawn(Arc::new(EventQueue::new())).expect("spawn worker");

        worker
            .submit(GenerationJob::Bulk {
                config: config(0, 5, 1),
                total: 1,
                output: dir.path().join("never.lvl"),
                index_path: dir.path().join("levels.idx"),
            })
            .expect("submit");
        assert!(matches!(worker.recv().expect("event"), WorkerEvent::Failed(_)));

        worker
            .submit(GenerationJob::NewGame {
                config: config(5, 5, 1),
                deadline: Duration::ZERO,
                index_path: dir.path().join("levels.idx"),
            })
            .expect("submit");
        let event = worker
            .recv_timeout(Duration::from_secs(30))
            .expect("worker alive");
        assert!(matches!(event, Some(WorkerEvent::NewGame(None))));
    }
}
