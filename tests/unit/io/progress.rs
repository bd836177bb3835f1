//! Tests for bulk generation progress display

#[cfg(test)]
mod tests {
    use inertia::io::progress::GenerationProgress;

    // Tests counting on a hidden bar
    // Verified by skipping the increment when hidden
    #[test]
    fn test_hidden_progress_counts() {
        let progress = GenerationProgress::new(5, false, "5x5");

        progress.inc();
        progress.inc();
        assert_eq!(progress.position(), 2);

        progress.finish(2);
        assert_eq!(progress.position(), 2);
    }

    // Tests that a visible bar accepts the same updates
    #[test]
    fn test_visible_progress_updates() {
        let progress = GenerationProgress::new(3, true, "8x8");
        for _ in 0..3 {
            progress.inc();
        }
        assert_eq!(progress.position(), 3);
        progress.finish(3);
    }
}
