//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use blocoder::AlgorithmError;
    use blocoder::io::error::{file_system_error, invalid_parameter};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/best.isl", "write", io_error);

        assert!(error.source().is_some());
        assert!(error.to_string().contains("write"));
        assert!(error.to_string().contains("/tmp/best.isl"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("depth", &"-1", &"must not be negative");

        let message = error.to_string();
        assert!(message.contains("depth"));
        assert!(message.contains("-1"));
        assert!(message.contains("must not be negative"));
        assert!(error.source().is_none());
    }

    // Tests rejection messages name the blocks involved
    // Verified by omitting the second block from the message
    #[test]
    fn test_incompatible_blocks_message() {
        let error = AlgorithmError::IncompatibleBlocks {
            opcode: "merge",
            first: "0.1".to_string(),
            second: "0.3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Blocks 0.1 and 0.3 are incompatible for merge"
        );
    }

    // Tests parse errors carry the line number and text
    // Verified by omitting the line number
    #[test]
    fn test_program_parse_message() {
        let error = AlgorithmError::ProgramParse {
            line: 4,
            text: "paint [0]".to_string(),
            reason: "unknown".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("line 4"));
        assert!(message.contains("paint [0]"));
    }

    // Tests overflow message names the limit
    // Verified by omitting the digit limit
    #[test]
    fn test_identifier_overflow_message() {
        let error = AlgorithmError::IdentifierOverflow {
            id: "0.1.2".to_string(),
            max_digits: 29,
        };
        assert!(error.to_string().contains("29"));
    }

    // Tests conversion from io errors
    // Verified by dropping the From implementation
    #[test]
    fn test_from_io_error() {
        let error: AlgorithmError = std::io::Error::other("boom").into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
    }
}
