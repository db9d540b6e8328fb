//! Reassembling function calls from streamed chat-completion chunks

use chat_function::prelude::*;
use futures::{StreamExt, executor::block_on, stream};

/// Chunks as a chat-completion stream delivers them, one `data:` payload each.
const CHUNKS: &[&str] = &[
    r#"{"choices":[{"delta":{"function_call":{"name":"get_weather","arguments":""}}}]}"#,
    r#"{"choices":[{"delta":{"function_call":{"arguments":"{\"loc"}}}]}"#,
    r#"{"choices":[{"delta":{"function_call":{"arguments":"ation\":\"NYC\","}}}]}"#,
    r#"{"choices":[{"delta":{"function_call":{"arguments":" \"unit\": \"celsius\"}"}}}]}"#,
    r#"{"choices":[{"delta":{},"finish_reason":"function_call"}]}"#,
];

fn delta_of(chunk: &str) -> Option<FunctionDelta> {
    let chunk: Value = serde_json::from_str(chunk).unwrap();
    let call = chunk["choices"][0]["delta"].get("function_call")?.clone();
    Some(serde_json::from_value(call).unwrap())
}

#[test]
fn test_reassembles_streamed_call() {
    let function: Function = CHUNKS.iter().filter_map(|c| delta_of(c)).collect();

    assert_eq!(function.name(), Some("get_weather"));
    assert_eq!(
        function.arguments().unwrap(),
        Some(&json!({ "location": "NYC", "unit": "celsius" }))
    );
    assert_eq!(function.parameters().unwrap(), None);
}

#[test]
fn test_premature_reads_fail_until_complete() {
    let mut function = Function::default();
    let deltas: Vec<_> = CHUNKS.iter().filter_map(|c| delta_of(c)).collect();
    let (last, rest) = deltas.split_last().unwrap();

    for delta in rest {
        function.merge(delta);
    }
    assert!(matches!(
        function.arguments(),
        Err(FunctionError::Parse(_))
    ));

    function.merge(last);
    assert!(function.arguments().unwrap().is_some());
}

#[test]
fn test_any_split_parses_like_the_whole() {
    let text = r#"{"query":"rust \"serde\"","limit":[1,2.5,null],"nested":{"ok":true}}"#;
    let expected: Value = serde_json::from_str(text).unwrap();

    for (at, _) in text.char_indices().skip(1) {
        let (head, tail) = text.split_at(at);
        let function: Function = vec![
            FunctionDelta::new().with_name("search"),
            FunctionDelta::new().with_arguments(head),
            FunctionDelta::new().with_arguments(tail),
        ]
        .into_iter()
        .collect();

        assert_eq!(function.arguments().unwrap(), Some(&expected), "split at {at}");
    }
}

#[test]
fn test_folds_stream_into_call() {
    let deltas = stream::iter(CHUNKS.iter().filter_map(|c| delta_of(c)));
    let function = block_on(deltas.fold(Function::default(), |mut f, delta| async move {
        f.merge(&delta);
        f
    }));

    let call = function.into_call().unwrap();
    assert_eq!(
        call,
        FunctionCall {
            name: "get_weather".into(),
            arguments: json!({ "location": "NYC", "unit": "celsius" }),
        }
    );
}

#[test]
fn test_wire_objects_round_trip() {
    let wire = json!([
        {
            "name": "get_weather",
            "description": "Current weather",
            "parameters": {
                "type": "object",
                "properties": { "location": { "type": "string" } },
                "required": ["location"]
            }
        },
        { "description": "not named yet" }
    ]);

    let functions: Vec<Function> = serde_json::from_value(wire.clone()).unwrap();
    assert!(functions[0].validate_name().is_ok());
    assert_eq!(functions[1].name(), None);
    assert_eq!(serde_json::to_value(&functions).unwrap(), wire);
}
