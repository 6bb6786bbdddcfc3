use crate::{
    analyzer::prelude::analyze,
    codegen::prelude::{generate, Chunk, Instruction, Opcode, Operand},
    environment::prelude::{SymbolTable, Value, ValueType},
    parser::prelude::{parse_expression, Expression},
    utils::prelude::SrcSpan
};

fn analyzed(input: &str, symbols: &SymbolTable) -> Expression {
    let expression = parse_expression(input)
        .unwrap_or_else(|err| panic!("Failed to parse {input:?}: {err}"));

    analyze(expression, symbols)
        .unwrap_or_else(|err| panic!("Failed to analyze {input:?}: {err}"))
}

fn compile(input: &str) -> Chunk {
    generate(&analyzed(input, &SymbolTable::new()))
}

#[test]
fn test_post_order() {
    let chunk = compile("1 + 2 * 3");

    assert_eq!(
        chunk.instructions(),
        &[
            Instruction::PushConst(1),
            Instruction::PushConst(2),
            Instruction::PushConst(3),
            Instruction::Mul,
            Instruction::Add,
        ]
    );
}

#[test]
fn test_operand_order_is_preserved() {
    let chunk = compile("10 - 4 / 2");

    assert_eq!(
        chunk.instructions(),
        &[
            Instruction::PushConst(10),
            Instruction::PushConst(4),
            Instruction::PushConst(2),
            Instruction::Div,
            Instruction::Sub,
        ]
    );
}

#[test]
fn test_assignment_and_negation() {
    let chunk = compile("x = -(4 - 1)");

    assert_eq!(
        chunk.instructions(),
        &[
            Instruction::PushConst(4),
            Instruction::PushConst(1),
            Instruction::Sub,
            Instruction::Negate,
            Instruction::StoreVar("x".to_string()),
        ]
    );
}

#[test]
fn test_variable_reference() {
    let mut symbols = SymbolTable::new();
    symbols.declare_or_update("y", ValueType::Integer, Value::from(3));

    let chunk = generate(&analyzed("y * y", &symbols));

    assert_eq!(
        chunk.instructions(),
        &[
            Instruction::LoadVar("y".to_string()),
            Instruction::LoadVar("y".to_string()),
            Instruction::Mul,
        ]
    );
}

#[test]
fn test_net_stack_effect_is_one() {
    for input in ["1", "-1", "x = 5", "1 + 2 * 3", "a = b = (1 + 2) * -3", "(y = 2) + y * 4"] {
        let chunk = compile(input);

        assert_eq!(chunk.final_depth(), 1, "{input:?}");
        assert!(!chunk.is_empty());
    }
}

#[test]
fn test_max_depth() {
    assert_eq!(compile("7").max_depth(), 1);
    assert_eq!(compile("1 + 2 + 3").max_depth(), 2);
    assert_eq!(compile("1 + (2 + (3 + 4))").max_depth(), 4);
}

#[test]
fn test_spans_follow_nodes() {
    let chunk = compile("12 + 3");

    assert_eq!(chunk.len(), 3);
    assert_eq!(chunk.span_at(0), Some(SrcSpan { start: 0, end: 2 }));
    assert_eq!(chunk.span_at(1), Some(SrcSpan { start: 5, end: 6 }));
    assert_eq!(chunk.span_at(2), Some(SrcSpan { start: 0, end: 6 }));
    assert_eq!(chunk.span_at(3), None);
}

#[test]
fn test_listing() {
    let chunk = compile("x = 2 * -3");

    let expected = "\
0000 push 2
0001 push 3
0002 neg
0003 mul
0004 store x
";

    assert_eq!(chunk.to_string(), expected);
}

#[test]
fn test_instruction_parts() {
    let store = Instruction::StoreVar("x".to_string());

    assert_eq!(store.opcode(), Opcode::StoreVar);
    assert_eq!(store.operand(), Some(Operand::Variable("x")));
    assert_eq!(store.stack_effect(), (1, 1));

    assert_eq!(Instruction::PushConst(-4).operand(), Some(Operand::Constant(-4)));
    assert_eq!(Instruction::Div.operand(), None);
    assert_eq!(Instruction::Div.stack_effect(), (2, 1));
    assert_eq!(Instruction::LoadVar("y".to_string()).stack_effect(), (0, 1));
}

#[test]
fn test_hand_assembled_chunk() {
    let chunk = Chunk::from_instructions(vec![
        Instruction::PushConst(1),
        Instruction::PushConst(2),
    ]);

    assert_eq!(chunk.final_depth(), 2);
    assert_eq!(chunk.span_at(1), Some(SrcSpan::default()));
    assert_eq!(chunk.iter().count(), 2);
}
