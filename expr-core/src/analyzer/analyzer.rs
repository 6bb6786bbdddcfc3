use std::collections::HashMap;

use crate::{
    analyzer::prelude::{AnalyzeError, Problems, Warning},
    environment::prelude::{SymbolTable, ValueType},
    parser::prelude::{BinaryOperator, Expression, UnaryOperator},
    utils::prelude::TypeWarningEmitter
};

/// Resolves variables and annotates every node with its result type.
#[derive(Debug)]
pub struct ExpressionAnalyzer<'a> {
    symbols: &'a SymbolTable,
    // names assigned earlier in the same input, visible to later reads
    assigned: HashMap<String, ValueType>,
    problems: Problems,
}

impl<'a> ExpressionAnalyzer<'a> {
    pub fn analyze(
        mut expression: Expression,
        symbols: &'a SymbolTable,
        warnings: &TypeWarningEmitter
    ) -> Result<Expression, AnalyzeError> {
        let mut analyzer = ExpressionAnalyzer {
            symbols,
            assigned: HashMap::new(),
            problems: Default::default()
        };

        analyzer.analyze_expression(&mut expression)?;

        analyzer.problems.sort();

        for warning in analyzer.problems.take_warnings() {
            warnings.emit(warning);
        }

        Ok(expression)
    }

    fn analyze_expression(&mut self, expression: &mut Expression) -> Result<ValueType, AnalyzeError> {
        let value_type = match expression {
            Expression::NumberLiteral(_) => ValueType::Integer,
            Expression::VariableReference(variable) => {
                match self.declared_type(&variable.name) {
                    Some(value_type) => value_type,
                    None => return Err(AnalyzeError::UndefinedVariable {
                        location: variable.location,
                        variable: variable.name.clone()
                    })
                }
            },
            Expression::Assignment(assignment) => {
                if let Expression::VariableReference(variable) = assignment.value.as_ref() {
                    if variable.name == assignment.identifier.value {
                        self.problems.warning(Warning::SelfAssignment { location: assignment.location });
                    }
                }

                let value_type = self.analyze_expression(&mut assignment.value)?;

                // provisional: a variable keeps the type of its first value
                if let Some(declared) = self.declared_type(&assignment.identifier.value) {
                    if declared != value_type {
                        return Err(AnalyzeError::TypeMismatch {
                            location: assignment.value.location(),
                            expected: declared,
                            got: value_type
                        });
                    }
                }

                self.assigned.insert(assignment.identifier.value.clone(), value_type);

                value_type
            },
            Expression::BinaryOp(binary) => {
                let left_type = self.analyze_expression(&mut binary.left)?;
                let right_type = self.analyze_expression(&mut binary.right)?;

                let allowed_types = allowed_types_for_binary(binary.operator);

                check_operand(allowed_types, left_type, &binary.left)?;
                check_operand(allowed_types, right_type, &binary.right)?;

                if left_type != right_type {
                    return Err(AnalyzeError::TypeMismatch {
                        location: binary.right.location(),
                        expected: left_type,
                        got: right_type
                    });
                }

                if binary.operator == BinaryOperator::Div {
                    if let Expression::NumberLiteral(divisor) = binary.right.as_ref() {
                        if divisor.value == 0 {
                            self.problems.warning(Warning::DivisionByZeroLiteral { location: divisor.location });
                        }
                    }
                }

                binary_result_type(binary.operator, left_type)
            },
            Expression::UnaryOp(unary) => {
                let operand_type = self.analyze_expression(&mut unary.expression)?;

                check_operand(allowed_types_for_unary(unary.operator), operand_type, &unary.expression)?;

                operand_type
            }
        };

        expression.set_value_type(value_type);

        Ok(value_type)
    }

    fn declared_type(&self, name: &str) -> Option<ValueType> {
        self.assigned.get(name)
            .copied()
            .or_else(|| self.symbols.lookup(name).map(|(value_type, _)| value_type))
    }
}

/// Analyzes without reporting warnings.
pub fn analyze(expression: Expression, symbols: &SymbolTable) -> Result<Expression, AnalyzeError> {
    ExpressionAnalyzer::analyze(expression, symbols, &TypeWarningEmitter::null())
}

fn check_operand(
    allowed_types: &[ValueType],
    operand_type: ValueType,
    operand: &Expression
) -> Result<(), AnalyzeError> {
    match allowed_types.first() {
        Some(expected) if !allowed_types.contains(&operand_type) => Err(AnalyzeError::TypeMismatch {
            location: operand.location(),
            expected: *expected,
            got: operand_type
        }),
        _ => Ok(())
    }
}

fn allowed_types_for_binary(operator: BinaryOperator) -> &'static [ValueType] {
    match operator {
        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div => &[ValueType::Integer],
    }
}

fn allowed_types_for_unary(operator: UnaryOperator) -> &'static [ValueType] {
    match operator {
        UnaryOperator::Negate => &[ValueType::Integer],
    }
}

fn binary_result_type(operator: BinaryOperator, operand_type: ValueType) -> ValueType {
    match operator {
        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div => operand_type,
    }
}
