//! Tests for the instruction cost formula and its rounding

#[cfg(test)]
mod tests {
    use blocoder::isl::instruction::Opcode;
    use blocoder::scoring::instruction_cost;

    // Tests whole-canvas instructions cost their base cost
    // Verified by dividing by total pixels instead of operand area
    #[test]
    fn test_full_canvas_costs_base() {
        let total = 400 * 400;
        assert_eq!(instruction_cost(Opcode::PointCut, total, total), 10);
        assert_eq!(instruction_cost(Opcode::LineCut, total, total), 7);
        assert_eq!(instruction_cost(Opcode::Recolor, total, total), 5);
        assert_eq!(instruction_cost(Opcode::Swap, total, total), 3);
        assert_eq!(instruction_cost(Opcode::Merge, total, total), 1);
    }

    // Tests smaller operands scale the cost up
    // Verified by multiplying by the area instead of dividing
    #[test]
    fn test_quarter_block_costs_four_times() {
        assert_eq!(instruction_cost(Opcode::Recolor, 100 * 100, 200 * 200), 20);
    }

    // Tests exact halves round up and smaller fractions round down
    // Verified by truncating instead of rounding
    #[test]
    fn test_rounding_half_up() {
        // 5 * 6 / 4 = 7.5
        assert_eq!(instruction_cost(Opcode::Recolor, 4, 6), 8);
        // 7 * 10 / 3 = 23.33
        assert_eq!(instruction_cost(Opcode::LineCut, 3, 10), 23);
        // 1 * 5 / 3 = 1.67
        assert_eq!(instruction_cost(Opcode::Merge, 3, 5), 2);
    }

    // Tests an empty operand is charged like a single pixel
    // Verified by removing the zero-area guard
    #[test]
    fn test_zero_area_counts_as_one() {
        assert_eq!(instruction_cost(Opcode::Swap, 0, 16), 48);
    }
}
