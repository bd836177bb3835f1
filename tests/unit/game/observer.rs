//! Tests for presentation notifications

#[cfg(test)]
mod tests {
    use inertia::game::observer::{EventQueue, LogSink, NullSink, PresentationSink, SinkEvent};
    use inertia::spatial::{Direction, Position};
    use std::sync::Arc;
    use std::thread;

    fn notify_all<S: PresentationSink + ?Sized>(sink: &S) {
        sink.reset_begin();
        sink.cells_changed(Position::new(0, 0), Position::new(2, 2));
        sink.reset_end();
        sink.ball_moved(Position::new(1, 1));
        sink.hint(Some(Direction::Up));
        sink.hint(None);
        sink.game_completed();
        sink.generation_completed(3);
    }

    // Tests that the queue records notifications in order and drains them
    // Verified by draining without clearing
    #[test]
    fn test_event_queue_records_in_order() {
        let queue = EventQueue::new();
        notify_all(&queue);

        assert_eq!(
            queue.drain(),
            vec![
                SinkEvent::ResetBegin,
                SinkEvent::CellsChanged(Position::new(0, 0), Position::new(2, 2)),
                SinkEvent::ResetEnd,
                SinkEvent::BallMoved(Position::new(1, 1)),
                SinkEvent::Hint(Some(Direction::Up)),
                SinkEvent::Hint(None),
                SinkEvent::GameCompleted,
                SinkEvent::GenerationCompleted(3),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    // Tests notifications from another thread through a shared sink
    #[test]
    fn test_shared_sink_across_threads() {
        let queue = Arc::new(EventQueue::new());
        let remote = Arc::clone(&queue);

        thread::spawn(move || remote.generation_completed(7))
            .join()
            .expect("notifying thread should not panic");

        assert_eq!(queue.drain(), vec![SinkEvent::GenerationCompleted(7)]);
    }

    // Tests that the silent sinks accept every notification
    #[test]
    fn test_null_and_log_sinks() {
        notify_all(&NullSink);
        notify_all(&LogSink);
        let boxed: Box<dyn PresentationSink> = Box::new(NullSink);
        notify_all(boxed.as_ref());
    }
}
