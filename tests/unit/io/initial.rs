//! Tests for initial configuration parsing and state construction

#[cfg(test)]
mod tests {
    use blocoder::canvas::block::Rect;
    use blocoder::io::initial::InitialConfiguration;
    use blocoder::scoring::KernelChoice;
    use blocoder::search::{Driver, DriverConfig};
    use blocoder::{Bitmap, BlockId};
    use image::Rgba;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SAMPLE: &str = "0 0,0 4,2 255,0,0,255\n3 0,2 4,4 0,0,255,255\n";

    // Tests well-formed lines parse into blocks in file order
    // Verified by reading the color before the corners
    #[test]
    fn test_parse_blocks() {
        let configuration = InitialConfiguration::parse(SAMPLE);
        assert_eq!(configuration.blocks.len(), 2);

        let second = configuration.blocks.get(1).expect("two blocks");
        assert_eq!(second.id, 3);
        assert_eq!(second.rect, Rect::new(0, 2, 4, 4));
        assert_eq!(second.color, Rgba([0, 0, 255, 255]));
        assert_eq!(configuration.next_counter(), 4);
    }

    // Tests malformed lines are skipped
    // Verified by aborting on the first malformed line
    #[test]
    fn test_parse_skips_malformed() {
        let text = "# header\n1 0,0 2,2 1,2,3,4\n2 0,0 2,2 1,2,3\n3 0,0 0,5 1,2,3,4\n4 0,0 2,2 300,2,3,4\n\n";
        let configuration = InitialConfiguration::parse(text);
        assert_eq!(configuration.blocks.len(), 1);
        assert_eq!(configuration.next_counter(), 2);
    }

    // Tests an empty configuration starts the counter at one
    // Verified by starting the counter at zero
    #[test]
    fn test_empty_configuration() {
        let configuration = InitialConfiguration::parse("");
        assert!(configuration.is_empty());
        assert_eq!(configuration.next_counter(), 1);

        let state = configuration.into_state(Bitmap::filled(3, 3, Rgba([0, 0, 0, 255])), KernelChoice::Scalar);
        assert_eq!(state.valid_blocks(), vec![BlockId::ROOT]);
        assert_eq!(state.counter(), 1);
    }

    // Tests the state is pre-painted and pre-cut
    // Verified by registering blocks without painting them
    #[test]
    fn test_into_state() {
        let state = InitialConfiguration::parse(SAMPLE)
            .into_state(Bitmap::filled(4, 4, Rgba([0, 0, 0, 255])), KernelChoice::Scalar);

        assert_eq!(state.valid_blocks(), vec![BlockId::Counter(0), BlockId::Counter(3)]);
        assert_eq!(state.counter(), 4);
        assert_eq!(state.canvas().pixel(1, 1), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(state.canvas().pixel(1, 3), Some(Rgba([0, 0, 255, 255])));
    }

    // Tests reset returns to the configured canvas rather than a blank one
    // Verified by resetting to a blank root
    #[test]
    fn test_reset_keeps_configuration() {
        let mut state = InitialConfiguration::parse(SAMPLE)
            .into_state(Bitmap::filled(4, 4, Rgba([0, 0, 0, 255])), KernelChoice::Scalar);
        let canvas = state.canvas().clone();
        state.reset();
        assert_eq!(state.canvas(), &canvas);
        assert_eq!(state.valid_blocks().len(), 2);
    }

    // Tests the configuration file sits next to the target
    // Verified by appending the extension instead of replacing it
    #[test]
    fn test_path_for_target() {
        assert_eq!(
            InitialConfiguration::path_for(Path::new("problems/26.png")),
            Path::new("problems/26.txt")
        );
    }

    // Tests loading from a target with and without a configuration file
    // Verified by failing when the file is absent
    #[test]
    fn test_for_target() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().join("5.png");
        assert!(InitialConfiguration::for_target(&target).expect("no file").is_empty());

        fs::write(dir.path().join("5.txt"), SAMPLE).expect("write configuration");
        let configuration = InitialConfiguration::for_target(&target).expect("readable file");
        assert_eq!(configuration.blocks.len(), 2);
    }

    // Tests blocks reaching outside the target are dropped and the run stays healthy
    // Verified by registering the out-of-range block and undoing a speculative recolor on it
    #[test]
    fn test_blocks_outside_target_skipped() {
        let text = "0 0,0 4,4 255,255,255,255\n1 10,10 12,12 0,0,0,255\n2 2,2 5,4 0,0,0,255\n";
        let state = InitialConfiguration::parse(text)
            .into_state(Bitmap::filled(4, 4, Rgba([255, 0, 0, 255])), KernelChoice::Scalar);

        assert_eq!(state.valid_blocks(), vec![BlockId::ROOT]);
        assert_eq!(state.counter(), 1);

        let config = DriverConfig {
            depth: 0,
            ..DriverConfig::default()
        };
        let mut driver = Driver::new(state, config);
        driver.run().expect("driver run");
        assert_eq!(driver.best_score().canvas_error, 0);
    }

    // Tests a configuration made only of out-of-range blocks falls back to a blank root
    // Verified by keeping the configured counter after dropping every block
    #[test]
    fn test_all_blocks_outside_target() {
        let state = InitialConfiguration::parse("7 5,5 9,9 1,2,3,255\n")
            .into_state(Bitmap::filled(4, 4, Rgba([0, 0, 0, 255])), KernelChoice::Scalar);

        assert_eq!(state.valid_blocks(), vec![BlockId::ROOT]);
        assert_eq!(state.counter(), 1);
        assert_eq!(state.canvas().pixel(0, 0), Some(Rgba([255, 255, 255, 255])));
    }
}
