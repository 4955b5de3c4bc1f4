//! Canvas simulation engine
//!
//! `CanvasState` is the single owner of the simulated canvas and block registry.
//! Every instruction goes through [`CanvasState::apply`], which validates it, mutates
//! the state and hands back an [`UndoRecord`]. Passing that record to
//! [`CanvasState::undo`] restores the registry and canvas bit for bit. Speculative
//! work should go through [`CanvasState::begin`], which undoes automatically.

use crate::canvas::bitmap::Bitmap;
use crate::canvas::block::{BlockRecord, Point, Rect};
use crate::canvas::registry::BlockRegistry;
use crate::canvas::transaction::Transaction;
use crate::io::configuration::{BLANK_CANVAS, LINE_CUT_CHILDREN, POINT_CUT_CHILDREN};
use crate::io::error::{AlgorithmError, Result};
use crate::isl::block_id::BlockId;
use crate::isl::instruction::{Instruction, Opcode, Orientation};
use crate::isl::program::{Program, ProgramScore};
use crate::scoring::cost::instruction_cost;
use crate::scoring::pixel_error::{KernelChoice, pixel_error};
use image::Rgba;
use tracing::{debug, warn};

/// State needed to reverse one applied instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    cost: u64,
    action: UndoAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UndoAction {
    Cut,
    Recolor { origin: Point, pixels: Bitmap },
    Swap,
    Merge { created: BlockId },
}

impl UndoRecord {
    /// Cost charged when the instruction was applied
    pub const fn cost(&self) -> u64 {
        self.cost
    }
}

/// Simulated canvas, target and block registry
#[derive(Debug, Clone)]
pub struct CanvasState {
    target: Bitmap,
    canvas: Bitmap,
    initial_canvas: Bitmap,
    registry: BlockRegistry,
    initial_registry: BlockRegistry,
    counter: u64,
    initial_counter: u64,
    kernel: KernelChoice,
}

impl CanvasState {
    /// Blank white canvas with a single root block covering the target
    pub fn new(target: Bitmap, kernel: KernelChoice) -> Self {
        let canvas = Bitmap::filled(target.width(), target.height(), Rgba(BLANK_CANVAS));
        let registry = BlockRegistry::with_root(target.bounds());
        Self::with_initial(target, canvas, registry, 1, kernel)
    }

    /// Start from a prepared canvas and registry; `reset` returns to this configuration
    pub fn with_initial(
        target: Bitmap,
        canvas: Bitmap,
        registry: BlockRegistry,
        counter: u64,
        kernel: KernelChoice,
    ) -> Self {
        Self {
            target,
            initial_canvas: canvas.clone(),
            canvas,
            initial_registry: registry.clone(),
            registry,
            counter,
            initial_counter: counter,
            kernel,
        }
    }

    /// Image being approximated
    pub const fn target(&self) -> &Bitmap {
        &self.target
    }

    /// Working canvas
    pub const fn canvas(&self) -> &Bitmap {
        &self.canvas
    }

    /// Live block registry
    pub const fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Next id the counter will hand out
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Pixel error kernel in use
    pub const fn kernel(&self) -> KernelChoice {
        self.kernel
    }

    /// Target width and height
    pub fn dimensions(&self) -> (u32, u32) {
        (self.target.width(), self.target.height())
    }

    /// Target pixel count
    pub fn total_pixels(&self) -> u64 {
        self.target.pixel_count()
    }

    /// Valid record with the given id
    pub fn lookup(&self, id: &BlockId) -> Option<&BlockRecord> {
        self.registry.get(id)
    }

    /// Ids of all valid blocks in registry order
    pub fn valid_blocks(&self) -> Vec<BlockId> {
        self.registry.valid_ids()
    }

    /// Pixel error of the canvas against the target
    pub fn canvas_error(&self) -> u64 {
        pixel_error(&self.kernel, self.canvas.as_bytes(), self.target.as_bytes())
    }

    /// Return canvas, registry and counter to the initial configuration
    pub fn reset(&mut self) {
        self.canvas.clone_from(&self.initial_canvas);
        self.registry.clone_from(&self.initial_registry);
        self.counter = self.initial_counter;
    }

    /// Start a speculative transaction that undoes its instructions when dropped
    pub fn begin(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Apply an instruction and keep its effects, returning its cost
    ///
    /// # Errors
    ///
    /// Returns an error if the instruction is invalid on the current state
    pub fn commit(&mut self, instruction: &Instruction) -> Result<u64> {
        self.apply(instruction).map(|record| record.cost)
    }

    /// Commit every instruction of a program, returning the summed cost
    ///
    /// # Errors
    ///
    /// Returns the first rejection; instructions before it stay applied
    pub fn apply_program(&mut self, program: &Program) -> Result<u64> {
        let mut cost = 0;
        for instruction in program.instructions() {
            cost += self.commit(instruction)?;
        }
        Ok(cost)
    }

    /// Score a program on top of the current state and roll it back
    ///
    /// Rejected instructions are skipped, logged and counted in the score.
    pub fn evaluate_program(&mut self, program: &Program) -> ProgramScore {
        self.evaluate(program, true)
    }

    /// Like [`Self::evaluate_program`] but rejections are only logged at debug level
    pub fn probe_program(&mut self, program: &Program) -> ProgramScore {
        self.evaluate(program, false)
    }

    /// Reset to the initial configuration and score a program from there
    pub fn score_program(&mut self, program: &Program) -> ProgramScore {
        self.reset();
        self.probe_program(program)
    }

    fn evaluate(&mut self, program: &Program, loud: bool) -> ProgramScore {
        let mut transaction = self.begin();
        let mut score = ProgramScore::default();
        for instruction in program.instructions() {
            match transaction.apply(instruction) {
                Ok(cost) => score.instruction_cost += cost,
                Err(error) => {
                    if loud {
                        warn!(%instruction, %error, "Skipping rejected instruction");
                    } else {
                        debug!(%instruction, %error, "Skipping rejected instruction");
                    }
                    score.rejected += 1;
                }
            }
        }
        score.canvas_error = transaction.state().canvas_error();
        score.total = score.canvas_error + score.instruction_cost;
        score
    }

    /// Validate and perform one instruction
    ///
    /// # Errors
    ///
    /// Returns an error, without mutating anything, if a referenced block is not
    /// valid, a cut point is not strictly inside its block, a swap or merge pair does
    /// not satisfy its geometric predicate, or a child id would overflow
    pub fn apply(&mut self, instruction: &Instruction) -> Result<UndoRecord> {
        match instruction {
            Instruction::PointCut { block, x, y } => {
                let bounds = *self.valid(block, Opcode::PointCut)?.bounds();
                if !bounds.contains_interior(*x, *y) {
                    return Err(AlgorithmError::InvalidCut {
                        id: block.to_string(),
                        reason: format!("point ({x},{y}) is not inside {bounds:?}"),
                    });
                }
                let quadrants = [
                    Rect::new(bounds.x1, bounds.y1, *x, *y),
                    Rect::new(*x, bounds.y1, bounds.x2, *y),
                    Rect::new(*x, *y, bounds.x2, bounds.y2),
                    Rect::new(bounds.x1, *y, *x, bounds.y2),
                ];
                self.split(block, &quadrants, Opcode::PointCut, bounds.area())
            }
            Instruction::LineCut {
                block,
                orientation,
                position,
            } => {
                let bounds = *self.valid(block, Opcode::LineCut)?.bounds();
                let (low, high) = match orientation {
                    Orientation::Vertical => (bounds.x1, bounds.x2),
                    Orientation::Horizontal => (bounds.y1, bounds.y2),
                };
                if !(low < *position && *position < high) {
                    return Err(AlgorithmError::InvalidCut {
                        id: block.to_string(),
                        reason: format!(
                            "{} = {position} is not strictly between {low} and {high}",
                            orientation.letter()
                        ),
                    });
                }
                let halves = match orientation {
                    Orientation::Vertical => [
                        Rect::new(bounds.x1, bounds.y1, *position, bounds.y2),
                        Rect::new(*position, bounds.y1, bounds.x2, bounds.y2),
                    ],
                    Orientation::Horizontal => [
                        Rect::new(bounds.x1, bounds.y1, bounds.x2, *position),
                        Rect::new(bounds.x1, *position, bounds.x2, bounds.y2),
                    ],
                };
                self.split(block, &halves, Opcode::LineCut, bounds.area())
            }
            Instruction::Recolor { block, color } => {
                let record = self.valid(block, Opcode::Recolor)?;
                let bounds = *record.bounds();
                let cost = self.cost(Opcode::Recolor, record.area());
                let pixels = self.canvas.copy_rect(&bounds);
                self.canvas.fill_rect(&bounds, *color);
                Ok(UndoRecord {
                    cost,
                    action: UndoAction::Recolor {
                        origin: Point {
                            x: bounds.x1,
                            y: bounds.y1,
                        },
                        pixels,
                    },
                })
            }
            Instruction::Swap { first, second } => {
                let (a, b) = self.pair(first, second, Opcode::Swap)?;
                if !a.is_swappable(b) {
                    return Err(incompatible(Opcode::Swap, first, second));
                }
                let cost = self.cost(Opcode::Swap, a.area());
                self.exchange(first, second)?;
                Ok(UndoRecord {
                    cost,
                    action: UndoAction::Swap,
                })
            }
            Instruction::Merge { first, second } => {
                let (a, b) = self.pair(first, second, Opcode::Merge)?;
                if !a.is_mergeable(b) {
                    return Err(incompatible(Opcode::Merge, first, second));
                }
                let cost = self.cost(Opcode::Merge, a.area().max(b.area()));
                let union = a.bounds().union(b.bounds());
                let created = BlockId::Counter(self.counter);
                self.registry.set_valid(first, false);
                self.registry.set_valid(second, false);
                self.registry.insert(BlockRecord::new(created.clone(), union));
                self.counter += 1;
                Ok(UndoRecord {
                    cost,
                    action: UndoAction::Merge { created },
                })
            }
        }
    }

    /// Reverse an instruction applied by [`Self::apply`]
    ///
    /// Records must be undone in reverse order of application.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not belong to the instruction or the
    /// state changed since it was applied
    pub fn undo(&mut self, instruction: &Instruction, record: UndoRecord) -> Result<()> {
        match (instruction, record.action) {
            (
                Instruction::PointCut { block, .. } | Instruction::LineCut { block, .. },
                UndoAction::Cut,
            ) => {
                let children = match instruction.opcode() {
                    Opcode::PointCut => POINT_CUT_CHILDREN,
                    _ => LINE_CUT_CHILDREN,
                };
                for slot in (0..children).rev() {
                    self.registry.remove(&block.child(slot)?);
                }
                self.registry.set_valid(block, true);
                Ok(())
            }
            (Instruction::Recolor { .. }, UndoAction::Recolor { origin, pixels }) => {
                self.canvas.paste(&pixels, origin.x, origin.y);
                Ok(())
            }
            (Instruction::Swap { first, second }, UndoAction::Swap) => {
                self.exchange(first, second)
            }
            (Instruction::Merge { first, second }, UndoAction::Merge { created }) => {
                self.registry.remove(&created);
                self.registry.set_valid(first, true);
                self.registry.set_valid(second, true);
                self.counter = self.counter.saturating_sub(1);
                Ok(())
            }
            (other, _) => Err(crate::io::error::invalid_parameter(
                "undo record",
                other,
                &"record was produced by a different instruction",
            )),
        }
    }

    fn valid(&self, id: &BlockId, opcode: Opcode) -> Result<&BlockRecord> {
        self.registry
            .get(id)
            .ok_or_else(|| AlgorithmError::UnknownBlock {
                id: id.to_string(),
                opcode: opcode.mnemonic(),
            })
    }

    fn pair(
        &self,
        first: &BlockId,
        second: &BlockId,
        opcode: Opcode,
    ) -> Result<(&BlockRecord, &BlockRecord)> {
        let a = self.valid(first, opcode)?;
        let b = self.valid(second, opcode)?;
        if first == second {
            return Err(incompatible(opcode, first, second));
        }
        Ok((a, b))
    }

    fn cost(&self, opcode: Opcode, operand_area: u64) -> u64 {
        instruction_cost(opcode, operand_area, self.total_pixels())
    }

    fn split(
        &mut self,
        block: &BlockId,
        children: &[Rect],
        opcode: Opcode,
        area: u64,
    ) -> Result<UndoRecord> {
        let ids = (0..children.len())
            .map(|slot| block.child(slot as u8))
            .collect::<Result<Vec<_>>>()?;
        self.registry.set_valid(block, false);
        for (id, rect) in ids.into_iter().zip(children) {
            self.registry.insert(BlockRecord::new(id, *rect));
        }
        Ok(UndoRecord {
            cost: self.cost(opcode, area),
            action: UndoAction::Cut,
        })
    }

    fn exchange(&mut self, first: &BlockId, second: &BlockId) -> Result<()> {
        let (Some(a), Some(b)) = (self.registry.slot_of(first), self.registry.slot_of(second))
        else {
            return Err(incompatible(Opcode::Swap, first, second));
        };
        let (record_a, record_b) = self
            .registry
            .pair_mut(a, b)
            .ok_or_else(|| incompatible(Opcode::Swap, first, second))?;

        let (rect_a, rect_b) = (*record_a.bounds(), *record_b.bounds());
        record_a.swap_geometry(record_b);

        let pixels_a = self.canvas.copy_rect(&rect_a);
        let pixels_b = self.canvas.copy_rect(&rect_b);
        self.canvas.paste(&pixels_b, rect_a.x1, rect_a.y1);
        self.canvas.paste(&pixels_a, rect_b.x1, rect_b.y1);
        Ok(())
    }
}

fn incompatible(opcode: Opcode, first: &BlockId, second: &BlockId) -> AlgorithmError {
    AlgorithmError::IncompatibleBlocks {
        opcode: opcode.mnemonic(),
        first: first.to_string(),
        second: second.to_string(),
    }
}
