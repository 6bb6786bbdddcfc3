use crate::{
    lexer::prelude::{tokenize, Token},
    parser::prelude::{parse, parse_expression, Expression, ParseError, ParseErrorType, Parser, MAX_EXPRESSION_DEPTH},
    utils::prelude::SrcSpan
};

fn parse_err(input: &str) -> ParseError {
    match parse_expression(input) {
        Ok(expression) => panic!("Expected a syntax error for {input:?}, got {expression}"),
        Err(err) => err
    }
}

#[test]
fn test_precedence() -> Result<(), ParseError> {
    assert_eq!(parse_expression("1 + 2 * 3")?.to_string(), "(1 + (2 * 3))");
    assert_eq!(parse_expression("(1 + 2) * 3")?.to_string(), "((1 + 2) * 3)");
    assert_eq!(parse_expression("1 * 2 + 3 / 4")?.to_string(), "((1 * 2) + (3 / 4))");

    Ok(())
}

#[test]
fn test_left_associativity() -> Result<(), ParseError> {
    assert_eq!(parse_expression("10 - 3 - 2")?.to_string(), "((10 - 3) - 2)");
    assert_eq!(parse_expression("8 / 4 / 2")?.to_string(), "((8 / 4) / 2)");
    assert_eq!(parse_expression("1 - 2 + 3")?.to_string(), "((1 - 2) + 3)");

    Ok(())
}

#[test]
fn test_unary() -> Result<(), ParseError> {
    assert_eq!(parse_expression("-2 * 3")?.to_string(), "((-2) * 3)");
    assert_eq!(parse_expression("-(2 * 3)")?.to_string(), "(-(2 * 3))");
    assert_eq!(parse_expression("--x")?.to_string(), "(-(-x))");
    assert_eq!(parse_expression("1 - -1")?.to_string(), "(1 - (-1))");

    Ok(())
}

#[test]
fn test_assignment() -> Result<(), ParseError> {
    assert_eq!(parse_expression("x = (4 - 1) * 2")?.to_string(), "(x = ((4 - 1) * 2))");
    assert_eq!(parse_expression("a = b = 1")?.to_string(), "(a = (b = 1))");
    assert_eq!(parse_expression("x = (y = 2)")?.to_string(), "(x = (y = 2))");
    assert_eq!(parse_expression("(y = 2) + y")?.to_string(), "((y = 2) + y)");

    Ok(())
}

#[test]
fn test_invalid_assignment_targets() {
    for input in ["(x) = 1", "1 = 2", "x + y = 3", "-x = 1"] {
        let err = parse_err(input);
        let equals = input.find('=').map(|at| at as u32);

        assert!(
            matches!(err.error, ParseErrorType::InvalidAssignmentTarget { .. }),
            "{input:?} gave {:?}", err.error
        );
        assert_eq!(Some(err.span.start), equals);
    }
}

#[test]
fn test_spans_cover_source() -> Result<(), ParseError> {
    let input = "(1 + 2) * x";
    let expression = parse_expression(input)?;

    assert_eq!(expression.location(), SrcSpan { start: 0, end: 11 });

    match &expression {
        Expression::BinaryOp(binary) => {
            assert_eq!(binary.left.location(), SrcSpan { start: 0, end: 7 });
            assert_eq!(binary.right.location(), SrcSpan { start: 10, end: 11 });
            assert_eq!(binary.operator_location, SrcSpan { start: 8, end: 9 });
        },
        other => panic!("Expected a binary operation, got {other:?}")
    }

    let assignment = parse_expression("  y = -3")?;
    assert_eq!(assignment.location(), SrcSpan { start: 2, end: 8 });

    Ok(())
}

#[test]
fn test_unclosed_paren_points_at_end() {
    let err = parse_err("(1 + 2");

    assert_eq!(err.error, ParseErrorType::UnclosedParen { open: SrcSpan { start: 0, end: 1 } });
    assert_eq!(err.span, SrcSpan::point(6));
}

#[test]
fn test_missing_close_paren_before_token() {
    let err = parse_err("(1 2");

    assert_eq!(
        err.error,
        ParseErrorType::UnexpectedToken {
            token: Token::Number(String::from("2")),
            expected: vec!["`)`".to_string()]
        }
    );
    assert_eq!(err.span, SrcSpan { start: 3, end: 4 });
}

#[test]
fn test_trailing_tokens() {
    let err = parse_err("1 + 2 3");
    assert!(matches!(err.error, ParseErrorType::UnexpectedToken { .. }));
    assert_eq!(err.span, SrcSpan { start: 6, end: 7 });

    let err = parse_err("1 + 2)");
    assert_eq!(err.error, ParseErrorType::UnmatchedParen);
    assert_eq!(err.span, SrcSpan { start: 5, end: 6 });
}

#[test]
fn test_missing_operand() {
    let err = parse_err("1 +");
    assert!(matches!(err.error, ParseErrorType::UnexpectedEof { .. }));
    assert_eq!(err.span, SrcSpan::point(3));

    let err = parse_err("");
    assert!(matches!(err.error, ParseErrorType::UnexpectedEof { .. }));
    assert_eq!(err.span, SrcSpan::point(0));

    let err = parse_err("* 2");
    assert!(matches!(err.error, ParseErrorType::UnexpectedToken { token: Token::Star, .. }));
}

#[test]
fn test_invalid_character_reported_in_context() {
    let err = parse_err("1 + $");

    match &err.error {
        ParseErrorType::InvalidCharacter { ch, expected } => {
            assert_eq!(*ch, '$');
            assert!(expected.contains(&"a number".to_string()));
        },
        other => panic!("Expected an invalid character error, got {other:?}")
    }
    assert_eq!(err.span, SrcSpan { start: 4, end: 5 });
}

#[test]
fn test_number_out_of_range() {
    let err = parse_err("99999999999999999999 + 1");

    assert_eq!(
        err.error,
        ParseErrorType::NumberOutOfRange { literal: "99999999999999999999".to_string() }
    );
    assert_eq!(err.span, SrcSpan { start: 0, end: 20 });
}

#[test]
fn test_parse_token_stream() -> Result<(), ParseError> {
    let mut parser = Parser::new(tokenize("x * (y - 1)"));
    let from_parser = parser.parse()?;

    let from_fn = parse(tokenize("x * (y - 1)"))?;

    assert_eq!(from_parser, from_fn);

    Ok(())
}

#[test]
fn test_pretty_tree() -> Result<(), ParseError> {
    let tree = parse_expression("x = 1 + 2 * -3")?.pretty_tree();

    let expected = "\
Assignment x
└── BinaryOp +
    ├── NumberLiteral 1
    └── BinaryOp *
        ├── NumberLiteral 2
        └── UnaryOp -
            └── NumberLiteral 3
";

    assert_eq!(tree, expected);

    Ok(())
}

#[test]
fn test_invalid_assignment_target_inside_parens() {
    let err = parse_err("((x) = 1)");
    assert_eq!(err.error, ParseErrorType::InvalidAssignmentTarget { target: SrcSpan { start: 1, end: 4 } });
    assert_eq!(err.span, SrcSpan { start: 5, end: 6 });

    let err = parse_err("(1 + x = 2)");
    assert_eq!(err.error, ParseErrorType::InvalidAssignmentTarget { target: SrcSpan { start: 1, end: 6 } });
    assert_eq!(err.span, SrcSpan { start: 7, end: 8 });
}

#[test]
fn test_unexpected_token_message() {
    let err = parse_err("1 2");

    assert_eq!(err.to_string(), "unexpected number `2`, expected an operator or end of input");
}

#[test]
fn test_depth_limit_on_long_sum() -> Result<(), ParseError> {
    let fits = vec!["1"; MAX_EXPRESSION_DEPTH].join(" + ");
    parse_expression(&fits)?;

    let input = vec!["1"; MAX_EXPRESSION_DEPTH + 1].join(" + ");
    let err = parse_err(&input);

    assert_eq!(err.error, ParseErrorType::ExpressionTooDeep { limit: MAX_EXPRESSION_DEPTH });
    // the operator that would make the tree one level too tall
    let at = (MAX_EXPRESSION_DEPTH as u32 - 1) * 4 + 2;
    assert_eq!(err.span, SrcSpan { start: at, end: at + 1 });

    Ok(())
}

#[test]
fn test_depth_limit_on_nesting() -> Result<(), ParseError> {
    let depth = MAX_EXPRESSION_DEPTH - 1;

    parse_expression(&format!("{}1", "-".repeat(depth)))?;
    parse_expression(&format!("{}1{}", "(".repeat(depth), ")".repeat(depth)))?;

    for input in [
        format!("{}1", "-".repeat(MAX_EXPRESSION_DEPTH)),
        format!("{}1{}", "(".repeat(MAX_EXPRESSION_DEPTH), ")".repeat(MAX_EXPRESSION_DEPTH)),
        format!("x = {}", "(".repeat(100_000)),
    ] {
        let err = parse_err(&input);

        assert_eq!(err.error, ParseErrorType::ExpressionTooDeep { limit: MAX_EXPRESSION_DEPTH });
        assert!(err.span.end as usize <= input.len());
    }

    Ok(())
}
