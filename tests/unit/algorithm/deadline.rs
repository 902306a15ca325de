//! Tests for the wall-clock budget

#[cfg(test)]
mod tests {
    use frieze::FriezeError;
    use frieze::algorithm::deadline::Deadline;
    use std::time::Duration;

    // Tests an unlimited deadline never fires
    // Verified by treating a missing budget as zero
    #[test]
    fn test_unlimited() {
        let deadline = Deadline::unlimited();
        assert!(deadline.check("detect").is_ok());
        assert!(Deadline::start(None).check("detect").is_ok());
    }

    // Tests a generous budget passes
    // Verified by inverting the comparison
    #[test]
    fn test_within_budget() {
        let deadline = Deadline::start(Some(Duration::from_secs(3600)));
        assert!(deadline.check("detect").is_ok());
    }

    // Tests a spent budget reports the stage and elapsed time
    // Verified by reporting the budget instead of the elapsed time
    #[test]
    fn test_expired_budget() {
        let deadline = Deadline::start(Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(5));

        let Err(FriezeError::Interrupted { stage, elapsed }) = deadline.check("symmetry matching")
        else {
            panic!("expected Interrupted");
        };
        assert_eq!(stage, "symmetry matching");
        assert!(elapsed >= Duration::from_millis(5));
        assert!(deadline.elapsed() >= elapsed);
    }
}
