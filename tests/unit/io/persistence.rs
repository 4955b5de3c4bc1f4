//! Tests for solution file naming and writing

#[cfg(test)]
mod tests {
    use blocoder::io::persistence::{SolutionWriter, problem_from_path};
    use blocoder::isl::parser::parse_program;
    use blocoder::{BlockId, Instruction, Program, ProgramScore};
    use image::Rgba;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn program() -> Program {
        Program::from(vec![Instruction::Recolor {
            block: BlockId::ROOT,
            color: Rgba([1, 2, 3, 255]),
        }])
    }

    fn score(total: u64) -> ProgramScore {
        ProgramScore {
            total,
            instruction_cost: 5,
            canvas_error: total - 5,
            rejected: 0,
        }
    }

    // Tests file names are zero padded scores under the problem directory
    // Verified by padding to six digits
    #[test]
    fn test_primary_path() {
        let writer = SolutionWriter::new("out", 12);
        assert_eq!(writer.primary_path(4321), PathBuf::from("out/12/0004321.isl"));
        assert_eq!(writer.problem(), 12);
    }

    // Tests the flat fallback name pads the problem to two digits
    // Verified by dropping the problem padding
    #[test]
    fn test_fallback_path() {
        let writer = SolutionWriter::new("out", 3);
        assert_eq!(
            writer.fallback_path(77),
            PathBuf::from("out/solution-03-0000077.isl")
        );
    }

    // Tests writing creates the problem directory and the file parses back
    // Verified by not creating parent directories
    #[test]
    fn test_write_primary() {
        let dir = TempDir::new().expect("temp dir");
        let writer = SolutionWriter::new(dir.path(), 4);
        let path = writer.write(&program(), &score(40)).expect("write solution");

        assert_eq!(path, dir.path().join("4").join("0000040.isl"));
        let text = fs::read_to_string(&path).expect("readable");
        assert!(text.contains("# SCORE : 40"));
        assert_eq!(parse_program(&text).expect("valid program"), program());
    }

    // Tests a blocked problem directory falls back to the flat name
    // Verified by returning the primary error without a fallback
    #[test]
    fn test_write_fallback() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("4"), "not a directory").expect("write blocker");

        let writer = SolutionWriter::new(dir.path(), 4);
        let path = writer.write(&program(), &score(40)).expect("fallback write");
        assert_eq!(path, dir.path().join("solution-04-0000040.isl"));
        assert!(path.is_file());
    }

    // Tests the problem number comes from leading digits of the file stem
    // Verified by reading trailing digits
    #[test]
    fn test_problem_from_path() {
        assert_eq!(problem_from_path(Path::new("targets/35.png")), Some(35));
        assert_eq!(problem_from_path(Path::new("7-initial.png")), Some(7));
        assert_eq!(problem_from_path(Path::new("image12.png")), None);
    }
}
