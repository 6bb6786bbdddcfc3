use crate::parser::prelude::{BinaryOperator, Expression, UnaryOperator};

use super::{chunk::Chunk, instruction::Instruction};

/// Lowers an analyzed tree to stack instructions in post-order, so every
/// operator finds its operands already pushed and the whole chunk leaves
/// exactly one value behind.
#[derive(Debug, Default)]
pub struct Codegen {
    chunk: Chunk,
}

impl Codegen {
    pub fn generate(expression: &Expression) -> Chunk {
        let mut codegen = Codegen::default();

        codegen.compile_expression(expression);

        codegen.chunk
    }

    fn compile_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::NumberLiteral(number) => {
                self.chunk.emit(Instruction::PushConst(number.value), number.location);
            },
            Expression::VariableReference(variable) => {
                self.chunk.emit(Instruction::LoadVar(variable.name.clone()), variable.location);
            },
            Expression::Assignment(assignment) => {
                self.compile_expression(&assignment.value);

                self.chunk.emit(
                    Instruction::StoreVar(assignment.identifier.value.clone()),
                    assignment.location
                );
            },
            Expression::BinaryOp(binary) => {
                self.compile_expression(&binary.left);
                self.compile_expression(&binary.right);

                let instruction = match binary.operator {
                    BinaryOperator::Add => Instruction::Add,
                    BinaryOperator::Sub => Instruction::Sub,
                    BinaryOperator::Mul => Instruction::Mul,
                    BinaryOperator::Div => Instruction::Div,
                };

                self.chunk.emit(instruction, binary.location);
            },
            Expression::UnaryOp(unary) => {
                self.compile_expression(&unary.expression);

                match unary.operator {
                    UnaryOperator::Negate => self.chunk.emit(Instruction::Negate, unary.location),
                }
            }
        }
    }
}

pub fn generate(expression: &Expression) -> Chunk {
    Codegen::generate(expression)
}
