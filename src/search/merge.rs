//! Greedy merge pass along one seam orientation

use crate::canvas::engine::CanvasState;
use crate::io::error::Result;
use crate::isl::instruction::{Instruction, Orientation};
use crate::isl::program::{Program, ProgramScore};
use tracing::info;

/// Commit the cheapest merge along `seam` until no mergeable pair is left
///
/// The cheapest merge is committed even when it raises the score: merges pay off
/// through the cheaper recolors of the larger block found later by the solver.
/// `program` and `score` are extended like in [`crate::search::swap::swap_pass`].
/// Returns the number of merges committed.
///
/// # Errors
///
/// Returns an error if committing a scored merge fails
pub fn merge_pass(
    state: &mut CanvasState,
    program: &mut Program,
    score: &mut ProgramScore,
    seam: Orientation,
) -> Result<usize> {
    let mut committed = 0;

    loop {
        let mut best: Option<(Instruction, ProgramScore, u64)> = None;
        let records = state.registry().records().to_vec();

        for (i, a) in records.iter().enumerate() {
            if !a.valid {
                continue;
            }
            for b in records.iter().skip(i + 1) {
                if !(b.valid && a.is_mergeable_along(b, seam)) {
                    continue;
                }
                let merge = Instruction::Merge {
                    first: a.id.clone(),
                    second: b.id.clone(),
                };
                let probe = state.probe_program(&Program::from(vec![merge.clone()]));
                if probe.rejected > 0 {
                    continue;
                }
                let total = probe.canvas_error + score.instruction_cost + probe.instruction_cost;
                if best.as_ref().is_none_or(|(_, _, best_total)| total < *best_total) {
                    best = Some((merge, probe, total));
                }
            }
        }

        let Some((merge, probe, total)) = best else {
            break;
        };
        state.commit(&merge)?;
        program.push(merge);
        score.instruction_cost += probe.instruction_cost;
        score.canvas_error = probe.canvas_error;
        score.total = total;
        committed += 1;
        info!(
            score = score.total,
            blocks = state.registry().valid_count(),
            "Committed merge"
        );
    }

    Ok(committed)
}
