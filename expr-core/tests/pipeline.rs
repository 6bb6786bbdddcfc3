use expr_core::{
    analyzer::prelude::{analyze, AnalyzeError},
    codegen::prelude::generate,
    environment::prelude::{SymbolTable, Value},
    eval::prelude::{execute, RuntimeErrorType},
    lexer::prelude::tokenize,
    parser::prelude::{parse, ParseErrorType, MAX_EXPRESSION_DEPTH},
    session::prelude::{process, Session},
    utils::prelude::{Error, SrcSpan, Stage},
};

fn eval(input: &str) -> Result<Value, Error> {
    process(input, &mut Session::null())
}

fn integer(input: &str) -> i64 {
    match eval(input) {
        Ok(Value::Integer { value }) => value,
        Err(err) => panic!("{input:?} failed: {}", err.report()),
    }
}

#[test]
fn stages_compose_by_hand() {
    let mut symbols = SymbolTable::new();

    let parsed = parse(tokenize("x = 2 * (3 + 4)")).expect("parse");
    let analyzed = analyze(parsed, &symbols).expect("analyze");
    let chunk = generate(&analyzed);
    let value = execute(&chunk, &mut symbols).expect("execute");

    assert_eq!(value, Value::from(14));
    assert_eq!(symbols.lookup("x").map(|(_, value)| value), Some(Value::from(14)));
}

#[test]
fn precedence() {
    assert_eq!(integer("1 + 2 * 3"), 7);
    assert_eq!(integer("(1 + 2) * 3"), 9);
}

#[test]
fn associativity() {
    assert_eq!(integer("10 - 3 - 2"), 5);
    assert_eq!(integer("100 / 10 / 5"), 2);
}

#[test]
fn unary_precedence() {
    assert_eq!(integer("-2 * 3"), -6);
    assert_eq!(integer("-(2 * 3)"), -6);
    assert_eq!(integer("--4"), 4);
}

#[test]
fn chained_assignment() {
    assert_eq!(integer("x = (y = 2)"), 2);
    assert_eq!(integer("a = b = 3 * 3"), 9);
    assert_eq!(integer("(y = 2) + y"), 4);
}

#[test]
fn assignment_persists_across_inputs() -> Result<(), Error> {
    let mut session = Session::null();

    process("x = 5", &mut session)?;

    assert_eq!(process("x + 1", &mut session)?, Value::from(6));

    Ok(())
}

#[test]
fn undefined_variable_is_semantic() {
    match eval("y + 1") {
        Err(Error::Semantic { error: AnalyzeError::UndefinedVariable { variable, location }, .. }) => {
            assert_eq!(variable, "y");
            assert_eq!(location, SrcSpan { start: 0, end: 1 });
        },
        other => panic!("Expected a semantic error, got {other:?}")
    }
}

#[test]
fn division_by_zero_is_runtime() {
    match eval("4 / 0") {
        Err(err @ Error::Runtime { .. }) => {
            let report = err.report();

            assert_eq!(report.stage, Stage::Runtime);
            assert_eq!(report.kind, "DivisionByZero");
        },
        other => panic!("Expected a runtime error, got {other:?}")
    }
}

#[test]
fn overflow_is_runtime() {
    for input in ["9223372036854775807 + 1", "-9223372036854775807 - 2", "x = 3037000500 * 3037000500"] {
        match eval(input) {
            Err(Error::Runtime { error, .. }) => assert_eq!(error.error, RuntimeErrorType::Overflow),
            other => panic!("Expected overflow for {input:?}, got {other:?}")
        }
    }
}

#[test]
fn unmatched_paren_points_at_end() {
    match eval("(1 + 2") {
        Err(Error::Syntax { error, .. }) => {
            assert!(matches!(error.error, ParseErrorType::UnclosedParen { .. }));
            assert_eq!(error.span, SrcSpan::point(6));
        },
        other => panic!("Expected a syntax error, got {other:?}")
    }
}

#[test]
fn idempotent_on_unchanged_table() -> Result<(), Error> {
    let mut session = Session::null();
    session.process("x = 7")?;

    for input in ["x * 2 - 1", "y + 1", "x / 0"] {
        let first = session.process(input);
        let second = session.process(input);

        assert_eq!(first, second, "{input:?}");
    }

    Ok(())
}

#[test]
fn diagnostics_stay_within_input() {
    let inputs = [
        "", "(", ")", "1 +", "1 2", "(1 + 2", "1 + 2)", "$", "x", "€ + 1", "(x) = 1",
        "1 = 2", "4 / 0", "-(", "a = ", "99999999999999999999", "1 + (2 * (3 - x))",
    ];

    for input in inputs {
        if let Err(err) = eval(input) {
            let span = err.span().unwrap_or_else(|| panic!("{input:?} has no span"));

            assert!(span.start <= span.end, "{input:?}: {span}");
            assert!(span.end as usize <= input.len(), "{input:?}: {span}");
        }
    }
}

#[test]
fn failed_input_is_atomic() -> Result<(), Error> {
    let mut session = Session::null();

    session.process("x = 1")?;
    assert!(session.process("x = (y = 5) / 0").is_err());

    assert_eq!(session.process("x")?, Value::from(1));
    assert!(!session.symbols().contains("y"));

    Ok(())
}

#[test]
fn long_inputs_end_in_value_or_diagnostic() {
    assert_eq!(integer(&vec!["1"; 200].join("+")), 200);
    assert_eq!(integer(&format!("{}7{}", "(".repeat(200), ")".repeat(200))), 7);

    let inputs = [
        vec!["1"; 100_000].join("+"),
        vec!["x"; 100_000].join(" * "),
        format!("{}1", "-".repeat(100_000)),
        format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000)),
        format!("{}1", "-(".repeat(50_000)),
    ];

    for input in inputs {
        match eval(&input) {
            Err(Error::Syntax { error, .. }) => {
                assert_eq!(error.error, ParseErrorType::ExpressionTooDeep { limit: MAX_EXPRESSION_DEPTH });
                assert!(error.span.end as usize <= input.len());
            },
            other => panic!("Expected a depth error, got {:?}", other.map_err(|err| err.report()))
        }
    }
}
