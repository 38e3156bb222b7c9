use json_ast::{parse_json, tokenize, AstNode, JsonNumber, Object, TokenKind};
use proptest::prelude::*;

fn arb_ast() -> impl Strategy<Value = AstNode> {
    let leaf = prop_oneof![
        Just(AstNode::Null),
        any::<bool>().prop_map(AstNode::Boolean),
        any::<i32>().prop_map(|n| AstNode::Number(JsonNumber::Float(n as f64))),
        (-1.0e6f64..1.0e6).prop_map(|n| AstNode::Number(JsonNumber::Float(n))),
        ".*".prop_map(AstNode::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(AstNode::Array),
            prop::collection::vec(("[a-z]{0,6}", inner), 0..8)
                .prop_map(|members| AstNode::Object(members.into_iter().collect::<Object>())),
        ]
    })
}

proptest! {
    #[test]
    fn reserialized_trees_parse_back_equal(ast in arb_ast()) {
        let text = serde_json::to_string(&ast).unwrap();
        let reparsed = parse_json(&text).unwrap();
        prop_assert_eq!(&reparsed, &ast);

        let pretty = serde_json::to_string_pretty(&ast).unwrap();
        prop_assert_eq!(parse_json(&pretty).unwrap(), ast);
    }

    #[test]
    fn tokens_advance_and_end_with_end_of_input(input in ".*") {
        if let Ok(tokens) = tokenize(&input) {
            let last = tokens.last().unwrap();
            prop_assert_eq!(last.kind(), TokenKind::EndOfInput);
            prop_assert!(last.position().offset <= input.len());
            for w in tokens.windows(2) {
                prop_assert!(w[0].position().offset < w[1].position().offset);
            }
        }
    }

    #[test]
    fn arbitrary_text_never_panics(input in "[\\[\\]{}:,\"\\\\a-z0-9.+\\- \n]{0,64}") {
        let _ = parse_json(&input);
    }
}
