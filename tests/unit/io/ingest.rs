//! Tests for CSV ingestion of point, segment and lattice rows

#[cfg(test)]
mod tests {
    use frieze::FriezeError;
    use frieze::io::ingest::{CsvDialect, CsvIngestor, IngestConfig, ingest};
    use frieze::spatial::primitive::{Point, Shape};

    // Tests points and segments are read in input order
    // Verified by swapping the segment field order
    #[test]
    fn test_points_and_segments() {
        let pattern = ingest(b"0,0\n1.5,-2\n0,0,3,4\n").expect("Failed to ingest");
        let shapes: Vec<Shape> = pattern.primitives().iter().map(|p| p.shape).collect();
        assert_eq!(
            shapes,
            vec![
                Shape::Point(Point::new(0.0, 0.0)),
                Shape::Point(Point::new(1.5, -2.0)),
                Shape::Segment(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            ]
        );
        let indices: Vec<usize> = pattern.primitives().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    // Tests whitespace, comments and blank lines are tolerated
    // Verified by disabling field trimming
    #[test]
    fn test_whitespace_and_comments() {
        let pattern = ingest(b"# motif\n 1 , 2 \n\n3,4\n").expect("Failed to ingest");
        assert_eq!(pattern.len(), 2);
        assert!(pattern.rejections().is_empty());
    }

    // Tests a header row is rejected without aborting ingestion
    // Verified by failing on the first bad row
    #[test]
    fn test_header_row_rejected() {
        let pattern = ingest(b"x,y\n0,0\n10,0\n").expect("Failed to ingest");
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.rejections().len(), 1);
        assert_eq!(pattern.rejections().first().map(|r| r.row), Some(1));
    }

    // Tests wrong field counts and non-finite values are rejected per row
    // Verified by accepting three-field rows as points
    #[test]
    fn test_invalid_rows_rejected() {
        let pattern = ingest(b"1,2,3\n4,5\nnan,1\ninf,2\n1,2,3,4,5\n").expect("Failed to ingest");
        assert_eq!(pattern.len(), 1);
        assert_eq!(pattern.rejections().len(), 4);
    }

    // Tests empty, whitespace-only and comment-only buffers
    // Verified by reporting MalformedInput for empty buffers
    #[test]
    fn test_empty_input() {
        for content in [&b""[..], b"   \n\n", b"# only a comment\n"] {
            assert!(matches!(ingest(content), Err(FriezeError::EmptyInput)));
        }
    }

    // Tests all-rejected input reports count and first reason
    // Verified by reporting the last reason
    #[test]
    fn test_all_rows_malformed() {
        let result = ingest(b"a,b\n1,2,3\n");
        let Err(FriezeError::MalformedInput {
            rejected_rows,
            first_reason,
        }) = &result
        else {
            panic!("expected MalformedInput, got {result:?}");
        };
        assert_eq!(*rejected_rows, 2);
        assert!(first_reason.starts_with("row 1"));
    }

    // Tests one valid row among nine malformed ones is ingested
    // Verified by requiring a majority of valid rows
    #[test]
    fn test_one_valid_row_among_malformed() {
        let mut csv = String::new();
        for i in 0..9 {
            csv.push_str(&format!("bad{i},row\n"));
        }
        csv.push_str("2,3\n");
        let pattern = ingest(csv.as_bytes()).expect("Failed to ingest");
        assert_eq!(pattern.len(), 1);
        assert_eq!(pattern.rejections().len(), 9);
    }

    // Tests a custom delimiter
    // Verified by ignoring the configured delimiter
    #[test]
    fn test_custom_delimiter() {
        let ingestor = CsvIngestor::new(IngestConfig {
            delimiter: b';',
            ..IngestConfig::default()
        });
        let pattern = ingestor.ingest(b"1;2\n3;4\n").expect("Failed to ingest");
        assert_eq!(pattern.len(), 2);
    }

    // Tests lattice rows become unit segments with stable row indices
    // Verified by numbering lattice rows after rejections are dropped
    #[test]
    fn test_lattice_dialect() {
        let ingestor = CsvIngestor::new(IngestConfig {
            dialect: CsvDialect::Lattice,
            ..IngestConfig::default()
        });
        let pattern = ingestor.ingest(b"4,0\n99,1\n1,0\n").expect("Failed to ingest");
        let shapes: Vec<Shape> = pattern.primitives().iter().map(|p| p.shape).collect();
        assert_eq!(
            shapes,
            vec![
                Shape::Segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
                Shape::Segment(Point::new(0.0, -2.0), Point::new(0.0, -1.0)),
            ]
        );
        assert_eq!(pattern.rejections().len(), 1);
    }

    // Tests an all-zero lattice is empty
    // Verified by treating zero masks as rejected rows
    #[test]
    fn test_lattice_all_zero() {
        let ingestor = CsvIngestor::new(IngestConfig {
            dialect: CsvDialect::Lattice,
            ..IngestConfig::default()
        });
        assert!(matches!(
            ingestor.ingest(b"0,0\n0,0\n"),
            Err(FriezeError::EmptyInput)
        ));
    }
}
