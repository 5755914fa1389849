use super::*;

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    let err = LlmError::ApiRequest("conn refused".into());
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_429() {
    let err = LlmError::ApiResponse { status: 429, body: "quota".into() };
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_503() {
    let err = LlmError::ApiResponse { status: 503, body: "unavailable".into() };
    assert!(err.retryable());
}

#[test]
fn not_retryable_api_response_401() {
    let err = LlmError::ApiResponse { status: 401, body: "unauthorized".into() };
    assert!(!err.retryable());
}

#[test]
fn not_retryable_parse_and_config() {
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "KEY".into() }.retryable());
    assert!(!LlmError::HttpClientBuild("tls".into()).retryable());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn missing_api_key_names_the_variable() {
    let err = LlmError::MissingApiKey { var: "GEMINI_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var GEMINI_API_KEY not set");
}

#[test]
fn api_response_shows_status() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.to_string(), "API response error: status 500");
}

// =============================================================================
// Message
// =============================================================================

#[test]
fn message_constructors_set_roles() {
    assert_eq!(Message::user("hi"), Message { role: "user".into(), content: "hi".into() });
    assert_eq!(Message::assistant("yo"), Message { role: "assistant".into(), content: "yo".into() });
}

#[test]
fn message_serializes_as_role_and_content() {
    let json = serde_json::to_value(Message::user("hello")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "hello" }));
}
