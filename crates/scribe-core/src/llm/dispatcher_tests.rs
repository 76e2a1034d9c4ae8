//! Integration tests for the provider dispatcher with a mock server

#[cfg(test)]
mod tests {
    use crate::config::profile::{ProviderProfile, StructuredOutputStyle};
    use crate::error::ScribeError;
    use crate::llm::dispatcher::{build_request_body, ProviderDispatcher, DEFAULT_MAX_TOKENS};
    use crate::llm::messages::ChatMessage;
    use crate::llm::normalizer::MessageNormalizer;
    use crate::llm::request::{InvocationRequest, OutputSchema, ToolSpec};
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_dispatcher() -> ProviderDispatcher {
        let http = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        ProviderDispatcher::with_client(http)
    }

    fn test_profile(base_url: &str) -> ProviderProfile {
        ProviderProfile::new("openai", base_url).with_api_key("test-api-key")
    }

    fn test_request() -> InvocationRequest {
        InvocationRequest::new("gpt-4o", vec![ChatMessage::user("Summarize the inspection.")])
    }

    fn completion_response(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_response("A tidy report.")),
            )
            .mount(&mock_server)
            .await;

        let profile = test_profile(&mock_server.uri());
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;
        assert!(result.is_ok(), "Expected success, got: {:?}", result);

        let response = result.unwrap();
        assert_eq!(response.provider, "openai");
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(response.content_text().unwrap(), "A tidy report.");
    }

    #[tokio::test]
    async fn test_dispatch_sends_bearer_auth() {
        let mock_server = MockServer::start().await;

        // The mock only matches when the Authorization header is present,
        // so a successful dispatch proves the header was sent.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("ok")))
            .mount(&mock_server)
            .await;

        let profile = test_profile(&mock_server.uri());
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;
        assert!(result.is_ok(), "Expected success, got: {:?}", result);
    }

    #[tokio::test]
    async fn test_http_error_becomes_provider_call_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API key", "api_key": "sk-leaked-secret-value"}
            })))
            .mount(&mock_server)
            .await;

        let profile = test_profile(&mock_server.uri());
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;

        match result {
            Err(ScribeError::ProviderCall {
                provider,
                status,
                body,
                ..
            }) => {
                assert_eq!(provider, "openai");
                assert_eq!(status, 401);
                assert!(!body.contains("sk-leaked-secret-value"));
                assert!(body.contains("[REDACTED]"));
            }
            other => panic!("expected provider call error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_is_bounded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
            .mount(&mock_server)
            .await;

        let profile = test_profile(&mock_server.uri());
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;

        match result {
            Err(ScribeError::ProviderCall { status, body, .. }) => {
                assert_eq!(status, 500);
                assert!(body.chars().count() < 1100, "body not bounded: {}", body.len());
            }
            other => panic!("expected provider call error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&mock_server)
            .await;

        let profile = test_profile(&mock_server.uri());
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;
        assert!(matches!(result, Err(ScribeError::Json { .. })));
    }

    #[tokio::test]
    async fn test_missing_credential_is_config_error() {
        let profile = ProviderProfile::new("openai", "http://127.0.0.1:9");
        let request = test_request();
        let messages = MessageNormalizer::to_wire(&request.messages);

        let result = test_dispatcher()
            .dispatch(&profile, "gpt-4o", messages, &request)
            .await;
        assert!(matches!(result, Err(ScribeError::Config { .. })));
    }

    #[test]
    fn test_body_applies_default_max_tokens() {
        let profile = test_profile("https://api.openai.com/v1");
        let request = test_request();
        let body = build_request_body(&profile, "gpt-4o", vec![], &request);

        assert_eq!(body["max_tokens"], json!(DEFAULT_MAX_TOKENS));
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_body_respects_explicit_params() {
        let profile = test_profile("https://api.openai.com/v1");
        let request = test_request().with_max_tokens(256).with_temperature(0.1);
        let body = build_request_body(&profile, "gpt-4o", vec![], &request);

        assert_eq!(body["max_tokens"], json!(256));
        assert_eq!(body["temperature"], json!(0.1f32));
    }

    #[test]
    fn test_schema_maps_to_response_format_for_json_schema_style() {
        let profile = test_profile("https://api.openai.com/v1")
            .with_output_style(StructuredOutputStyle::JsonSchema);
        let schema = OutputSchema::new("inspection_report", json!({"type": "object"}));
        let request = test_request().with_output_schema(schema);
        let body = build_request_body(&profile, "gpt-4o", vec![], &request);

        assert_eq!(body["response_format"]["type"], json!("json_schema"));
        assert_eq!(
            body["response_format"]["json_schema"]["name"],
            json!("inspection_report")
        );
        assert_eq!(
            body["response_format"]["json_schema"]["schema"],
            json!({"type": "object"})
        );
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_schema_maps_to_forced_tool_for_tool_call_style() {
        let profile = test_profile("https://openrouter.ai/api/v1")
            .with_output_style(StructuredOutputStyle::ToolCall);
        let schema = OutputSchema::new("inspection_report", json!({"type": "object"}));
        let request = test_request().with_output_schema(schema);
        let body = build_request_body(&profile, "openai/gpt-4o", vec![], &request);

        assert!(body.get("response_format").is_none());
        assert_eq!(
            body["tool_choice"],
            json!({"type": "function", "function": {"name": "inspection_report"}})
        );
        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["function"]["name"], json!("inspection_report"));
        assert_eq!(tools[0]["function"]["parameters"], json!({"type": "object"}));
    }

    #[test]
    fn test_caller_tools_precede_synthetic_schema_tool() {
        let profile = test_profile("https://openrouter.ai/api/v1")
            .with_output_style(StructuredOutputStyle::ToolCall);
        let tool =
            ToolSpec::new("lookup_part", "Look up a part number.", json!({"type": "object"}));
        let schema = OutputSchema::new("inspection_report", json!({"type": "object"}));
        let request = test_request().with_tools(vec![tool]).with_output_schema(schema);
        let body = build_request_body(&profile, "openai/gpt-4o", vec![], &request);

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["function"]["name"], json!("lookup_part"));
        assert_eq!(tools[1]["function"]["name"], json!("inspection_report"));
    }
}
