use super::prelude::{tokenize, Token};

fn tokens(input: &str) -> Vec<Token> {
    tokenize(input).map(|(_, token, _)| token).collect()
}

#[test]
fn test_operators() {
    let expected = vec![
        Token::Plus,
        Token::Minus,
        Token::Star,
        Token::Slash,
        Token::LParen,
        Token::RParen,
        Token::Equals,
        Token::Eof,
    ];

    assert_eq!(tokens("+ - * / ( ) ="), expected);
    assert_eq!(tokens("+-*/()="), expected);
}

#[test]
fn test_numbers_and_identifiers() {
    let input = "x = (4 - 1) * 20 + _tmp2";

    let expected = vec![
        Token::Ident(String::from("x")),
        Token::Equals,
        Token::LParen,
        Token::Number(String::from("4")),
        Token::Minus,
        Token::Number(String::from("1")),
        Token::RParen,
        Token::Star,
        Token::Number(String::from("20")),
        Token::Plus,
        Token::Ident(String::from("_tmp2")),
        Token::Eof,
    ];

    for (idx, (token, next_token)) in expected.iter().zip(tokens(input)).enumerate() {
        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }
}

#[test]
fn test_longest_match() {
    // digits stop the identifier only when they lead
    assert_eq!(
        tokens("123abc abc123"),
        vec![
            Token::Number(String::from("123")),
            Token::Ident(String::from("abc")),
            Token::Ident(String::from("abc123")),
            Token::Eof,
        ]
    );
}

#[test]
fn test_spans() {
    let spans = tokenize("  12 +  foo")
        .map(|(start, _, end)| (start, end))
        .collect::<Vec<_>>();

    assert_eq!(spans, vec![(2, 4), (5, 6), (8, 11), (11, 11)]);
}

#[test]
fn test_invalid_character_is_a_token() {
    let tokens = tokenize("1 $ 2").collect::<Vec<_>>();

    assert_eq!(tokens[1], (2, Token::Invalid('$'), 3));
    assert_eq!(tokens[2].1, Token::Number(String::from("2")));
    assert_eq!(tokens.last().map(|t| t.1.clone()), Some(Token::Eof));
}

#[test]
fn test_multibyte_invalid_character() {
    let tokens = tokenize("1 € 2").collect::<Vec<_>>();

    assert_eq!(tokens[1], (2, Token::Invalid('€'), 5));
    assert_eq!(tokens[2], (6, Token::Number(String::from("2")), 7));
    assert_eq!(tokens[3], (7, Token::Eof, 7));
}

#[test]
fn test_eof_is_yielded_once() {
    let mut lexer = tokenize("");

    assert_eq!(lexer.next(), Some((0, Token::Eof, 0)));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_restartable() {
    let input = "a + 1";

    let first = tokenize(input).collect::<Vec<_>>();
    let second = tokenize(input).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn test_no_float_literals() {
    assert_eq!(
        tokens("1.5"),
        vec![
            Token::Number(String::from("1")),
            Token::Invalid('.'),
            Token::Number(String::from("5")),
            Token::Eof,
        ]
    );
}
