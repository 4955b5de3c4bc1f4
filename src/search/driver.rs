use crate::canvas::engine::CanvasState;
use crate::io::configuration::{DEFAULT_DEPTH, DEFAULT_SEED};
use crate::io::error::Result;
use crate::io::persistence::SolutionWriter;
use crate::io::progress::SweepProgress;
use crate::isl::instruction::Orientation;
use crate::isl::program::{Program, ProgramScore};
use crate::search::hill_climb::hill_climb;
use crate::search::merge::merge_pass;
use crate::search::solver::{SearchResult, Solver};
use crate::search::swap::swap_pass;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Outer loop parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Solver lookahead depth
    pub depth: u32,
    /// Seed for the first merge orientation
    pub seed: u64,
    /// Stop after this many solver sweeps
    pub max_sweeps: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: DEFAULT_SEED,
            max_sweeps: None,
        }
    }
}

/// Where the driver is in its loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Swap and merge the blocks of an initial configuration
    Preprocess,
    /// Run the solver on every valid block
    Solve,
    /// Hill-climb the parameters of the best program
    PostOptimize,
    /// No sweep improved, or the sweep limit was reached
    Converged,
}

/// Anytime optimizer alternating solver sweeps and local optimization
///
/// Every improvement is written through the optional [`SolutionWriter`] as soon as
/// it is found, so an interrupted run keeps its best program on disk.
pub struct Driver {
    state: CanvasState,
    config: DriverConfig,
    solver: Solver,
    best: Program,
    score: ProgramScore,
    phase: Phase,
    sweeps: usize,
    writer: Option<SolutionWriter>,
    progress: Option<SweepProgress>,
}

impl Driver {
    /// Start from the initial configuration of `state` with an empty program
    pub fn new(mut state: CanvasState, config: DriverConfig) -> Self {
        let best = Program::new();
        let score = state.score_program(&best);
        Self {
            state,
            config,
            solver: Solver::new(),
            best,
            score,
            phase: Phase::Preprocess,
            sweeps: 0,
            writer: None,
            progress: None,
        }
    }

    /// Continue from an existing program instead of preprocessing
    #[must_use]
    pub fn with_program(mut self, program: Program) -> Self {
        self.score = self.state.score_program(&program);
        self.best = program;
        self.phase = Phase::Solve;
        self
    }

    /// Persist every improvement
    #[must_use]
    pub fn with_writer(mut self, writer: SolutionWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Report sweep progress on a terminal bar
    #[must_use]
    pub fn with_progress(mut self, progress: SweepProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Best program so far
    pub const fn best_program(&self) -> &Program {
        &self.best
    }

    /// Score of the best program
    pub const fn best_score(&self) -> ProgramScore {
        self.score
    }

    /// Completed solver sweeps
    pub const fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Engine state, reset or holding the committed program depending on the phase
    pub const fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Run one phase, returning false once converged
    ///
    /// # Errors
    ///
    /// Returns an error if committing the best program or persisting it fails
    pub fn step(&mut self) -> Result<bool> {
        self.phase = match self.phase {
            Phase::Preprocess => {
                self.preprocess()?;
                Phase::Solve
            }
            Phase::Solve => {
                if self.sweep()? {
                    Phase::PostOptimize
                } else {
                    Phase::Converged
                }
            }
            Phase::PostOptimize => {
                self.post_optimize()?;
                Phase::Solve
            }
            Phase::Converged => Phase::Converged,
        };
        Ok(self.phase != Phase::Converged)
    }

    /// Step until converged and return the best program
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step
    pub fn run(&mut self) -> Result<&Program> {
        while self.step()? {}
        if let Some(progress) = &self.progress {
            progress.finish();
        }
        info!(
            score = self.score.total,
            instructions = self.best.len(),
            sweeps = self.sweeps,
            cache_hit_rate = self.solver.cache_stats().hit_rate(),
            "Converged"
        );
        Ok(&self.best)
    }

    fn preprocess(&mut self) -> Result<()> {
        self.state.reset();
        if self.state.registry().valid_count() <= 1 {
            return Ok(());
        }
        if let Some(progress) = &self.progress {
            progress.set_phase("preprocessing");
        }

        let first = if StdRng::seed_from_u64(self.config.seed).random::<bool>() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };

        let swaps = swap_pass(&mut self.state, &mut self.best, &mut self.score)?;
        let merges = merge_pass(&mut self.state, &mut self.best, &mut self.score, first)?
            + merge_pass(
                &mut self.state,
                &mut self.best,
                &mut self.score,
                first.flipped(),
            )?;
        info!(
            swaps,
            merges,
            score = self.score.total,
            instruction_cost = self.score.instruction_cost,
            canvas_error = self.score.canvas_error,
            "Preprocessing done"
        );
        Ok(())
    }

    /// One solver pass over every valid block; true if an improvement was appended
    fn sweep(&mut self) -> Result<bool> {
        if self
            .config
            .max_sweeps
            .is_some_and(|limit| self.sweeps >= limit)
        {
            info!(sweeps = self.sweeps, "Sweep limit reached");
            return Ok(false);
        }
        self.sweeps += 1;

        self.state.reset();
        let committed_cost = self.state.apply_program(&self.best)?;
        let blocks = self.state.valid_blocks();
        if let Some(progress) = &self.progress {
            progress.start_sweep(self.sweeps, blocks.len());
        }

        let mut sweep_best = SearchResult::bound(self.score.effective());
        for block in &blocks {
            let mut found = SearchResult::bound(sweep_best.score);
            self.solver.solve(
                &mut self.state,
                block,
                self.config.depth,
                committed_cost,
                &mut found,
            )?;

            if !found.program.is_empty() {
                let probe = self.state.probe_program(&found.program);
                let total = probe.canvas_error + committed_cost + probe.instruction_cost;
                if probe.rejected == 0 && sweep_best.offer(total, found.program) {
                    info!(%block, score = total, "New approximation");
                    self.persist_candidate(&sweep_best.program)?;
                }
            }

            if let Some(progress) = &self.progress {
                progress.block_done(sweep_best.score);
            }
        }
        debug!(
            nodes = self.solver.nodes(),
            cache_hits = self.solver.cache_stats().hits,
            cache_misses = self.solver.cache_stats().misses,
            "Sweep finished"
        );

        if sweep_best.program.is_empty() {
            return Ok(false);
        }
        self.best.extend_from(&sweep_best.program);
        self.best.remove_redundant_recolors();
        self.score = self.state.score_program(&self.best);
        Ok(true)
    }

    fn post_optimize(&mut self) -> Result<()> {
        if let Some(progress) = &self.progress {
            progress.set_phase("local optimization");
        }
        self.best = hill_climb(&mut self.state, &self.best);
        self.score = self.state.score_program(&self.best);
        info!(score = self.score.total, "Post-processed solution");
        self.persist(&self.best, self.score)?;
        Ok(())
    }

    fn persist_candidate(&self, addition: &Program) -> Result<()> {
        if self.writer.is_none() {
            return Ok(());
        }
        let mut candidate = self.best.clone();
        candidate.extend_from(addition);
        candidate.remove_redundant_recolors();
        let score = self.state.clone().score_program(&candidate);
        self.persist(&candidate, score)
    }

    fn persist(&self, program: &Program, score: ProgramScore) -> Result<()> {
        if let Some(writer) = &self.writer {
            writer.write(program, &score)?;
        }
        Ok(())
    }
}
