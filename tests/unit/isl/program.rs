//! Tests for program editing, redundancy removal and text rendering

#[cfg(test)]
mod tests {
    use blocoder::isl::instruction::{Instruction, Orientation};
    use blocoder::isl::parser::parse_program;
    use blocoder::{BlockId, Program, ProgramScore};
    use image::Rgba;

    fn recolor(block: &str, shade: u8) -> Instruction {
        Instruction::Recolor {
            block: block.parse().expect("valid id"),
            color: Rgba([shade, shade, shade, 255]),
        }
    }

    // Tests an overwritten recolor is removed and the later one kept
    // Verified by removing the later recolor instead
    #[test]
    fn test_remove_overwritten_recolor() {
        let mut program = Program::from(vec![recolor("0", 10), recolor("0", 20)]);
        assert_eq!(program.remove_redundant_recolors(), 1);
        assert_eq!(program.instructions(), &[recolor("0", 20)]);
    }

    // Tests a recolor survives when its block is cut before the next recolor
    // Verified by ignoring non-recolor references
    #[test]
    fn test_keep_recolor_before_cut() {
        let cut = Instruction::LineCut {
            block: BlockId::ROOT,
            orientation: Orientation::Vertical,
            position: 3,
        };
        let mut program = Program::from(vec![recolor("0", 10), cut, recolor("0", 20)]);
        assert_eq!(program.remove_redundant_recolors(), 0);
        assert_eq!(program.len(), 3);
    }

    // Tests recolors of different blocks do not shadow each other
    // Verified by comparing opcodes instead of blocks
    #[test]
    fn test_keep_recolors_of_other_blocks() {
        let mut program = Program::from(vec![recolor("0.1", 1), recolor("0.2", 2), recolor("0.1", 3)]);
        assert_eq!(program.remove_redundant_recolors(), 1);
        assert_eq!(program.instructions(), &[recolor("0.2", 2), recolor("0.1", 3)]);
    }

    // Tests a swap touching the block keeps the earlier recolor
    // Verified by checking only the first operand of swaps
    #[test]
    fn test_keep_recolor_before_swap() {
        let swap = Instruction::Swap {
            first: "0.0".parse().expect("valid id"),
            second: "0.1".parse().expect("valid id"),
        };
        let mut program = Program::from(vec![recolor("0.1", 1), swap, recolor("0.1", 3)]);
        assert_eq!(program.remove_redundant_recolors(), 0);
    }

    // Tests the header carries solver, problem and score breakdown
    // Verified by omitting the canvas error line
    #[test]
    fn test_isl_text_header() {
        let program = Program::from(vec![recolor("0", 0)]);
        let score = ProgramScore {
            total: 30,
            instruction_cost: 5,
            canvas_error: 25,
            rejected: 0,
        };
        let text = program.to_isl_text(7, Some(&score));

        assert!(text.starts_with("# Solver : blocoder\n# Problem : 7\n"));
        assert!(text.contains("# SCORE : 30\n"));
        assert!(text.contains("# Instructions : 5\n"));
        assert!(text.contains("# Canvas error : 25\n"));
        assert!(text.ends_with("color [0] [0,0,0,255]\n"));
        assert_eq!(parse_program(&text).expect("header is comments"), program);
    }

    // Tests rejected instructions disqualify a score
    // Verified by returning the total regardless of rejections
    #[test]
    fn test_effective_score_with_rejections() {
        let mut score = ProgramScore {
            total: 10,
            ..ProgramScore::default()
        };
        assert_eq!(score.effective(), 10);
        score.rejected = 1;
        assert_eq!(score.effective(), u64::MAX);
    }

    // Tests extend_from appends in order
    // Verified by prepending instead of appending
    #[test]
    fn test_extend_from_appends() {
        let mut program = Program::from(vec![recolor("0", 1)]);
        let addition: Program = vec![recolor("0.1", 2), recolor("0.2", 3)].into_iter().collect();
        program.extend_from(&addition);

        assert_eq!(program.len(), 3);
        assert_eq!(program.instructions().last(), Some(&recolor("0.2", 3)));
    }
}
