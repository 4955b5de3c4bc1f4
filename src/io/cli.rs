//! Command-line interface for synthesizing block programs from target images

use crate::canvas::bitmap::Bitmap;
use crate::io::configuration::{DEFAULT_DEPTH, DEFAULT_SEED};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::initial::InitialConfiguration;
use crate::io::persistence::{SolutionWriter, problem_from_path};
use crate::io::progress::SweepProgress;
use crate::isl::parser::parse_program;
use crate::isl::program::{Program, ProgramScore};
use crate::scoring::pixel_error::KernelChoice;
use crate::search::driver::{Driver, DriverConfig};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "blocoder")]
#[command(
    author,
    version,
    about = "Synthesize low-cost cut and paint programs approximating a target image"
)]
/// Command-line arguments for the program synthesizer
pub struct Cli {
    /// Target PNG image
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Solver lookahead depth
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Random seed for the merge orientation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Stop after this many solver sweeps
    #[arg(short = 'n', long)]
    pub max_sweeps: Option<usize>,

    /// Continue from an existing ISL program
    #[arg(short, long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Only score the replayed program and exit
    #[arg(short, long, requires = "replay")]
    pub evaluate: bool,

    /// Problem number for headers and file names (default: leading digits of the target name)
    #[arg(short, long)]
    pub problem: Option<u32>,

    /// Directory receiving improved programs
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Pixel error kernel
    #[arg(short, long, value_enum, default_value_t = KernelChoice::Auto)]
    pub kernel: KernelChoice,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Problem number from the flag or the target file name, 0 if neither gives one
    pub fn problem_number(&self) -> u32 {
        self.problem
            .or_else(|| problem_from_path(&self.target))
            .unwrap_or(0)
    }

    /// Driver parameters from the flags
    pub const fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            depth: self.depth,
            seed: self.seed,
            max_sweeps: self.max_sweeps,
        }
    }
}

/// Runs one target from the command line to convergence
pub struct TargetProcessor {
    cli: Cli,
}

impl TargetProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the target, then either score the replayed program or optimize
    ///
    /// # Errors
    ///
    /// Returns an error if the target, configuration or replay file cannot be read, the
    /// replayed program is invalid, or a solution cannot be written
    pub fn process(&self) -> Result<ProgramScore> {
        let target = Bitmap::load_png(&self.cli.target)?;
        let (width, height) = (target.width(), target.height());
        let configuration = InitialConfiguration::for_target(&self.cli.target)?;
        let mut state = configuration.into_state(target, self.cli.kernel);
        let problem = self.cli.problem_number();
        info!(
            target = %self.cli.target.display(),
            problem,
            width,
            height,
            blocks = state.registry().valid_count(),
            kernel = ?self.cli.kernel.resolve(),
            "Loaded target"
        );

        let replay = self.load_replay()?;
        if let Some(program) = &replay {
            let score = state.score_program(program);
            info!(
                score = score.total,
                instruction_cost = score.instruction_cost,
                canvas_error = score.canvas_error,
                rejected = score.rejected,
                instructions = program.len(),
                "Replayed program"
            );
            if score.rejected > 0 {
                return Err(invalid_parameter(
                    "replay",
                    &self.cli.replay.as_ref().map_or_else(String::new, |p| p.display().to_string()),
                    &format!("{} instructions were rejected", score.rejected),
                ));
            }
            if self.cli.evaluate {
                return Ok(score);
            }
        }

        let mut driver = Driver::new(state, self.cli.driver_config())
            .with_writer(SolutionWriter::new(&self.cli.output_dir, problem));
        if let Some(program) = replay {
            driver = driver.with_program(program);
        }
        if self.cli.should_show_progress() {
            driver = driver.with_progress(SweepProgress::new());
        }
        driver.run()?;
        Ok(driver.best_score())
    }

    fn load_replay(&self) -> Result<Option<Program>> {
        let Some(path) = &self.cli.replay else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read", e))?;
        parse_program(&text).map(Some)
    }
}
