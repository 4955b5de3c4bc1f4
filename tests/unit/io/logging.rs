//! Tests for log level selection and subscriber installation

#[cfg(test)]
mod tests {
    use blocoder::io::logging::{init, level_for};
    use tracing::Level;

    // Tests verbosity lowers the level one step per flag
    // Verified by mapping one flag to trace
    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, false), Level::INFO);
        assert_eq!(level_for(1, false), Level::DEBUG);
        assert_eq!(level_for(2, false), Level::TRACE);
        assert_eq!(level_for(9, false), Level::TRACE);
    }

    // Tests quiet wins over verbosity
    // Verified by checking quiet after verbosity
    #[test]
    fn test_quiet_level() {
        assert_eq!(level_for(0, true), Level::WARN);
        assert_eq!(level_for(2, true), Level::WARN);
    }

    // Tests a second installation reports failure instead of panicking
    // Verified by using init instead of try_init
    #[test]
    fn test_init_twice() {
        let _ = init(0, true);
        assert!(!init(0, true));
    }
}
