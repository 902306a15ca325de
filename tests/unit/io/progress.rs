//! Tests for progress tracking and multi-file batch processing

#[cfg(test)]
mod tests {
    use frieze::algorithm::pipeline::STAGES;
    use frieze::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PIPELINE_STAGES};
    use frieze::io::progress::ProgressManager;
    use std::path::Path;

    fn run_file(pm: &mut ProgressManager, index: usize, name: &str) {
        pm.start_file(index, Path::new(name));
        for stage in 0..STAGES.len() {
            pm.complete_stage(index, stage);
        }
        pm.complete_file(index, "p1");
    }

    // Tests ProgressManager construction and default
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let pm = ProgressManager::new();
        assert_eq!(pm.file_count(), 0);
        assert!(!pm.is_batched());

        let pm = ProgressManager::default();
        assert_eq!(pm.file_count(), 0);
        assert!(!pm.is_batched());
    }

    // Tests the stage count matches the pipeline
    // Verified by adding a stage without updating the constant
    #[test]
    fn test_stage_count() {
        assert_eq!(STAGES.len(), PIPELINE_STAGES);
    }

    // Tests individual progress bars for small batches
    // Verified by changing batch mode threshold
    #[test]
    fn test_initialize_multiple_files_under_limit() {
        let mut pm = ProgressManager::new();
        let file_count = MAX_INDIVIDUAL_PROGRESS_BARS + 1;
        pm.initialize(file_count);
        assert_eq!(pm.file_count(), file_count);
        assert!(!pm.is_batched());

        for i in 0..file_count {
            run_file(&mut pm, i, &format!("file{i}.csv"));
        }
        pm.finish();
    }

    // Tests batch progress bar for large batches
    // Verified by changing batch mode threshold
    #[test]
    fn test_initialize_multiple_files_over_limit() {
        let mut pm = ProgressManager::new();
        let large_file_count = MAX_INDIVIDUAL_PROGRESS_BARS + 5;
        pm.initialize(large_file_count);
        assert!(pm.is_batched());

        for i in 0..large_file_count {
            run_file(&mut pm, i, &format!("file{i}.csv"));
        }
        pm.finish();
    }

    // Tests out-of-order, repeated and failed files
    // Verified by breaking state storage and resize logic
    #[test]
    fn test_file_processing_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        pm.start_file(0, Path::new("first.csv"));
        pm.complete_stage(0, 0);
        pm.complete_file(0, "failed");

        pm.start_file(5, Path::new("out_of_order.csv"));
        pm.complete_stage(5, STAGES.len() + 3);
        pm.complete_file(5, "p2mm");

        pm.complete_stage(10, 1);
        pm.finish();
    }

    // Tests empty file list handling
    // Verified by adding panic for zero files
    #[test]
    fn test_empty_file_list() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);
        pm.finish();
    }

    // Tests out-of-bounds index handling
    // Verified by using unchecked indexing
    #[test]
    fn test_out_of_bounds_file_index() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        pm.complete_stage(10, 2);
        pm.complete_file(10, "p1");
        pm.finish();
    }
}
