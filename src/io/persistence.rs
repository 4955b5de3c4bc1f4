//! Writing improved programs to disk

use crate::io::configuration::{PROGRAM_EXTENSION, SCORE_FILE_DIGITS};
use crate::io::error::{Result, file_system_error};
use crate::isl::program::{Program, ProgramScore};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes each accepted program to `<output_dir>/<problem>/<score>.isl`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionWriter {
    output_dir: PathBuf,
    problem: u32,
}

impl SolutionWriter {
    /// Create a writer for one problem
    pub fn new(output_dir: impl Into<PathBuf>, problem: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            problem,
        }
    }

    /// Problem number written into file names and headers
    pub const fn problem(&self) -> u32 {
        self.problem
    }

    /// Per-problem directory path for a score
    pub fn primary_path(&self, score: u64) -> PathBuf {
        self.output_dir
            .join(self.problem.to_string())
            .join(format!("{score:0SCORE_FILE_DIGITS$}.{PROGRAM_EXTENSION}"))
    }

    /// Flat path used when the per-problem directory cannot be written
    pub fn fallback_path(&self, score: u64) -> PathBuf {
        self.output_dir.join(format!(
            "solution-{:02}-{score:0SCORE_FILE_DIGITS$}.{PROGRAM_EXTENSION}",
            self.problem
        ))
    }

    /// Write a program with its score header, returning the path written
    ///
    /// # Errors
    ///
    /// Returns an error if neither the primary nor the fallback path can be written
    pub fn write(&self, program: &Program, score: &ProgramScore) -> Result<PathBuf> {
        let text = program.to_isl_text(self.problem, Some(score));
        let primary = self.primary_path(score.total);

        match write_file(&primary, &text) {
            Ok(()) => {
                info!(path = %primary.display(), score = score.total, "Wrote solution");
                Ok(primary)
            }
            Err(error) => {
                let fallback = self.fallback_path(score.total);
                warn!(%error, fallback = %fallback.display(), "Falling back to flat solution path");
                write_file(&fallback, &text)?;
                info!(path = %fallback.display(), score = score.total, "Wrote solution");
                Ok(fallback)
            }
        }
    }
}

/// Problem number from the leading digits of a target file name
pub fn problem_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_system_error(parent, "create", e))?;
    }
    std::fs::write(path, text).map_err(|e| file_system_error(path, "write", e))
}
