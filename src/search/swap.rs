//! Greedy swap pass over equal-size blocks of an initial configuration

use crate::canvas::engine::CanvasState;
use crate::io::error::Result;
use crate::isl::instruction::Instruction;
use crate::isl::program::{Program, ProgramScore};
use crate::search::exclusion::ExclusionMatrix;
use tracing::{debug, info};

/// Commit the best swap of each scan until a scan finds none that improves
///
/// `program` and `score` describe what is already committed on `state`; both are
/// extended with every accepted swap. Pairs that failed to beat the running best are
/// remembered and skipped until one of their blocks takes part in an improvement.
/// Returns the number of swaps committed.
///
/// # Errors
///
/// Returns an error if committing a scored swap fails
pub fn swap_pass(
    state: &mut CanvasState,
    program: &mut Program,
    score: &mut ProgramScore,
) -> Result<usize> {
    let size = state.registry().len();
    let mut excluded = ExclusionMatrix::new(size);
    let mut committed = 0;

    loop {
        let mut best: Option<(Instruction, ProgramScore)> = None;
        let mut best_total = score.total;

        for i in 0..size {
            for j in i + 1..size {
                if excluded.is_excluded(i, j) {
                    continue;
                }
                let (Some(a), Some(b)) = (state.registry().record(i), state.registry().record(j))
                else {
                    continue;
                };
                if !(a.valid && b.valid && a.is_swappable(b)) {
                    continue;
                }

                let swap = Instruction::Swap {
                    first: a.id.clone(),
                    second: b.id.clone(),
                };
                let probe = state.probe_program(&Program::from(vec![swap.clone()]));
                let total = probe.canvas_error + score.instruction_cost + probe.instruction_cost;
                if probe.rejected == 0 && total < best_total {
                    debug!(%swap, total, "Swap beats running best");
                    best_total = total;
                    best = Some((swap, probe));
                    excluded.clear_index(i);
                    excluded.clear_index(j);
                } else {
                    excluded.exclude(i, j);
                    excluded.exclude(j, i);
                }
            }
        }

        let Some((swap, probe)) = best else {
            break;
        };
        state.commit(&swap)?;
        program.push(swap);
        score.instruction_cost += probe.instruction_cost;
        score.canvas_error = probe.canvas_error;
        score.total = best_total;
        committed += 1;
        info!(score = score.total, "Committed swap");
    }

    Ok(committed)
}
