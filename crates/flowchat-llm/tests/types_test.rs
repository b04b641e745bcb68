use flowchat_llm::{ChatCompletionRequest, Conversation, Message, Role};
use serde_json::json;

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"assistant","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "Test");
}

#[test]
fn test_unknown_role_is_rejected() {
    let json = r#"{"role":"tool","content":"Test"}"#;
    assert!(serde_json::from_str::<Message>(json).is_err());
}

#[test]
fn test_request_body_shape() {
    let mut history = Conversation::new();
    history.push_user("Hi");
    history.push_assistant("Hello!");
    history.push_user("What next?");

    let request = ChatCompletionRequest::new("mcu-dify", history.messages().to_vec());
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(
        body,
        json!({
            "model": "mcu-dify",
            "messages": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello!"},
                {"role": "user", "content": "What next?"},
            ],
            "stream": true,
            "show_node_events": true,
        })
    );
}
