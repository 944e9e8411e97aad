//! Renderer trait for drawing surfaces
//!
//! The crate never paints pixels itself. Both live capture and replay emit
//! [`DrawInstruction`] values, and anything that can clear a surface, lift the
//! pen and draw a straight line implements [`Renderer`] to consume them.

use crate::types::Position;

/// Output surface driven by capture echo and playback
pub trait Renderer {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Lift the pen and start a new path at `pos`
    fn begin_path(&mut self, pos: Position);

    /// Draw a straight line from the pen position to `pos`
    fn line_to(&mut self, pos: Position);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn begin_path(&mut self, pos: Position) {
        (**self).begin_path(pos);
    }

    fn line_to(&mut self, pos: Position) {
        (**self).line_to(pos);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn begin_path(&mut self, pos: Position) {
        (**self).begin_path(pos);
    }

    fn line_to(&mut self, pos: Position) {
        (**self).line_to(pos);
    }
}

/// A single self-contained draw operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawInstruction {
    Clear,
    BeginPath(Position),
    LineTo(Position),
}

impl DrawInstruction {
    /// Forward this instruction to a renderer
    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        match *self {
            DrawInstruction::Clear => renderer.clear(),
            DrawInstruction::BeginPath(pos) => renderer.begin_path(pos),
            DrawInstruction::LineTo(pos) => renderer.line_to(pos),
        }
    }

    /// Target position, if the instruction has one
    pub fn position(&self) -> Option<Position> {
        match *self {
            DrawInstruction::Clear => None,
            DrawInstruction::BeginPath(pos) | DrawInstruction::LineTo(pos) => Some(pos),
        }
    }
}

impl std::fmt::Display for DrawInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawInstruction::Clear => write!(f, "clear"),
            DrawInstruction::BeginPath(pos) => write!(f, "begin_path {}", pos),
            DrawInstruction::LineTo(pos) => write!(f, "line_to {}", pos),
        }
    }
}

/// Renderer that records every instruction it receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionLog {
    instructions: Vec<DrawInstruction>,
}

impl InstructionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions received so far, oldest first
    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of line segments drawn
    pub fn line_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::LineTo(_)))
            .count()
    }

    pub fn into_instructions(self) -> Vec<DrawInstruction> {
        self.instructions
    }
}

impl Renderer for InstructionLog {
    fn clear(&mut self) {
        self.instructions.push(DrawInstruction::Clear);
    }

    fn begin_path(&mut self, pos: Position) {
        self.instructions.push(DrawInstruction::BeginPath(pos));
    }

    fn line_to(&mut self, pos: Position) {
        self.instructions.push(DrawInstruction::LineTo(pos));
    }
}

/// Renderer that logs each instruction at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderer {
    drawn: usize,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instructions logged
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl Renderer for TracingRenderer {
    fn clear(&mut self) {
        self.drawn += 1;
        tracing::info!("clear");
    }

    fn begin_path(&mut self, pos: Position) {
        self.drawn += 1;
        tracing::info!(x = pos.x, y = pos.y, "begin_path");
    }

    fn line_to(&mut self, pos: Position) {
        self.drawn += 1;
        tracing::info!(x = pos.x, y = pos.y, "line_to");
    }
}
