//! End-to-end behaviour of `parse_json`, checked against `serde_json`
//! where both should agree.

use json_ast::{
    parse_json, parse_json_with_options, tokenize, AstNode, JsonError, JsonNumber, LexError,
    ParseError, ParseOptions, TokenKind,
};
use serde_json::{self, Value as SerdeValue};

fn num(n: f64) -> AstNode {
    AstNode::Number(JsonNumber::Float(n))
}

fn parse_err(input: &str) -> ParseError {
    match parse_json(input) {
        Err(JsonError::Parse(e)) => e,
        other => panic!("{input:?}: expected a parse error, got {other:?}"),
    }
}

fn lex_err(input: &str) -> LexError {
    match parse_json(input) {
        Err(JsonError::Lex(e)) => e,
        other => panic!("{input:?}: expected a lex error, got {other:?}"),
    }
}

#[test]
fn document_with_five_keys() {
    let input = r#"{"id":"647ceaf3657eade56f8224eb","index":0,"something":[],"boolean":true,"nullValue":null}"#;
    let ast = parse_json(input).unwrap();
    let object = ast.as_object().unwrap();

    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "index", "something", "boolean", "nullValue"]);
    assert_eq!(object["id"], AstNode::from("647ceaf3657eade56f8224eb"));
    assert_eq!(object["index"], num(0.0));
    assert_eq!(object["something"], AstNode::Array(vec![]));
    assert_eq!(object["boolean"], AstNode::Boolean(true));
    assert_eq!(object["nullValue"], AstNode::Null);
}

#[test]
fn pretty_printed_document_with_five_keys() {
    let input = r#"{
  "id": "647ceaf3657eade56f8224eb",
  "index": 0,
  "something": [],
  "boolean": true,
  "nullValue": null
}"#;
    let compact = r#"{"id":"647ceaf3657eade56f8224eb","index":0,"something":[],"boolean":true,"nullValue":null}"#;
    assert_eq!(parse_json(input).unwrap(), parse_json(compact).unwrap());
}

#[test]
fn mixed_nested_array() {
    let ast = parse_json(r#"[1, 2, [3, 4], {"x": 5}]"#).unwrap();
    let items = ast.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], num(1.0));
    assert_eq!(items[1], num(2.0));
    assert_eq!(items[2], AstNode::Array(vec![num(3.0), num(4.0)]));

    let object = items[3].as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["x"], num(5.0));
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(parse_err(""), ParseError::EmptyInput);
    assert_eq!(parse_err(" \r\n\t"), ParseError::EmptyInput);
}

#[test]
fn trailing_comma_is_an_error_not_a_dropped_token() {
    assert!(matches!(parse_err(r#"{"a":1,}"#), ParseError::TrailingComma { .. }));
    assert!(matches!(parse_err("[true,]"), ParseError::TrailingComma { .. }));
}

#[test]
fn escaped_newline_becomes_a_real_newline() {
    let tokens = tokenize("\"a\\nb\"").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::String);
    assert_eq!(tokens[0].lexeme(), "a\nb");
    assert_eq!(tokens[1].kind(), TokenKind::EndOfInput);
}

#[test]
fn nesting_limit_boundary() {
    let options = ParseOptions::default().with_max_depth(32);
    let nested = |depth: usize| "[".repeat(depth) + &"]".repeat(depth);

    assert!(parse_json_with_options(&nested(31), &options).is_ok());
    assert!(matches!(
        parse_json_with_options(&nested(32), &options),
        Err(JsonError::Parse(ParseError::MaxDepthExceeded { max_depth: 32, .. }))
    ));
    assert!(matches!(
        parse_json_with_options(&nested(33), &options),
        Err(JsonError::Parse(ParseError::MaxDepthExceeded { .. }))
    ));
}

#[test]
fn rfc_8259_rejections() {
    assert!(matches!(lex_err("// a comment\n[1, 2]"), LexError::UnexpectedCharacter { character: '/', .. }));
    assert!(matches!(lex_err("0123"), LexError::InvalidNumber { .. }));
    assert!(matches!(lex_err("1."), LexError::InvalidNumber { .. }));
    assert!(matches!(lex_err(".5"), LexError::UnexpectedCharacter { character: '.', .. }));
    assert!(matches!(lex_err("+1"), LexError::UnexpectedCharacter { character: '+', .. }));
    assert!(matches!(lex_err("NaN"), LexError::UnexpectedCharacter { character: 'N', .. }));
    assert!(matches!(lex_err("[Infinity]"), LexError::UnexpectedCharacter { character: 'I', .. }));
    assert!(matches!(lex_err("['single']"), LexError::UnexpectedCharacter { character: '\'', .. }));
    assert!(matches!(lex_err("\"tab\there\""), LexError::ControlCharacter { byte: b'\t', .. }));
    assert!(matches!(lex_err("[nul]"), LexError::UnrecognizedToken { .. }));
    assert!(matches!(lex_err("{a: 1}"), LexError::UnexpectedCharacter { character: 'a', .. }));
    assert!(matches!(parse_err("{1: 1}"), ParseError::ExpectedObjectKey { found: TokenKind::Number, .. }));
    assert!(matches!(parse_err(r#"{"a" 1}"#), ParseError::ExpectedColon { .. }));
    assert!(matches!(parse_err(r#"[1 2]"#), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_err("[] []"), ParseError::TrailingContent { .. }));
}

#[test]
fn error_messages_carry_line_and_column() {
    let err = parse_json("{\n  \"a\": [1,\n  ]\n}").unwrap_err();
    assert_eq!(err.to_string(), "Trailing comma before ']' at line 2, column 10");

    let err = parse_json("[\n\"unterminated").unwrap_err();
    assert_eq!(err.to_string(), "Unterminated string starting at line 2, column 1");
}

#[test]
fn agrees_with_serde_json_on_valid_documents() {
    let documents = [
        r#"{"name": "Babbage", "age": 30, "admin": true, "friends": ["Ada", "Charles"]}"#,
        r#"[{"id": 1, "done": false}, {"id": 2, "done": true}, null]"#,
        r#"{"nested": {"key": [null, 1, 1.25, -0.5, {"deep": [[[]]]}]}}"#,
        r#""escapes: \" \\ \/ \b \f \n \r \t é 😀""#,
        r#"{"unicode": "héllo wörld 😀", "empty": "", "obj": {}}"#,
        "-12",
        "true",
        "null",
    ];

    for doc in documents {
        let ours = serde_json::to_value(parse_json(doc).unwrap()).unwrap();
        let theirs: SerdeValue = serde_json::from_str(doc).unwrap();
        assert_eq!(ours, theirs, "{doc}");
    }
}

#[test]
fn reserialized_output_parses_to_the_same_tree() {
    let doc = r#"
    {
        "user_id": 12345,
        "username": "big_int_user",
        "active": true,
        "ratio": 0.125,
        "nested": { "values": [1.5, null, "a\tb"], "z": {}, "a": [] }
    }
    "#;
    let first = parse_json(doc).unwrap();
    let text = serde_json::to_string(&first).unwrap();
    let second = parse_json(&text).unwrap();
    assert_eq!(first, second);

    // Member order survives the trip.
    let keys: Vec<&str> = second.get("nested").unwrap().as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["values", "z", "a"]);
}

#[test]
fn strict_options_reject_duplicates_and_keep_digits() {
    let options = ParseOptions::strict();
    assert!(matches!(
        parse_json_with_options(r#"{"k": 1, "k": 2}"#, &options),
        Err(JsonError::Parse(ParseError::DuplicateKey { .. }))
    ));

    let ast = parse_json_with_options("[12345678901234567890, 0.10]", &options).unwrap();
    assert_eq!(
        ast,
        AstNode::Array(vec![
            AstNode::Number(JsonNumber::Exact("12345678901234567890".to_string())),
            AstNode::Number(JsonNumber::Exact("0.10".to_string())),
        ])
    );
}

#[test]
fn results_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AstNode>();
    assert_send_sync::<JsonError>();

    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || parse_json(&format!("[{i}, {{\"i\": {i}}}]"))))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let ast = handle.join().unwrap().unwrap();
        assert_eq!(ast.get_index(0), Some(&num(i as f64)));
    }
}
