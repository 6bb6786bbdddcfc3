use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

use super::instruction::Instruction;

/// Instruction sequence plus, per instruction, the span of the node that
/// produced it. The index into `instructions` is the program counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    instructions: Vec<Instruction>,
    spans: Vec<SrcSpan>,
    depth: usize,
    max_depth: usize,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunk without source positions, e.g. for a hand-assembled program.
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        let mut chunk = Self::new();

        for instruction in instructions {
            chunk.emit(instruction, SrcSpan::default());
        }

        chunk
    }

    pub fn emit(&mut self, instruction: Instruction, span: SrcSpan) {
        let (pops, pushes) = instruction.stack_effect();

        self.depth = self.depth.saturating_sub(pops) + pushes;
        self.max_depth = self.max_depth.max(self.depth);

        self.instructions.push(instruction);
        self.spans.push(span);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn span_at(&self, index: usize) -> Option<SrcSpan> {
        self.spans.get(index).copied()
    }

    /// Deepest the operand stack gets while running this chunk.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Stack depth after the last instruction.
    pub fn final_depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{index:04} {instruction}")?;
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Chunk {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
