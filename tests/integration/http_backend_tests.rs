//! HTTP backend tests against a mock OpenAI-compatible server

#[cfg(test)]
mod tests {
    use crate::common::{chat_body, sse_content, test_config};
    use actix_web::{http::StatusCode, test, web};
    use futures::StreamExt;
    use persona_gateway::config::Config;
    use persona_gateway::core::providers::{
        ChatBackend, HttpBackend, ProviderError, ProviderKind, ProviderRegistry,
    };
    use persona_gateway::core::types::ChatMessage;
    use persona_gateway::server::{AppState, HttpServer};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, kind: ProviderKind, key: &str) -> Config {
        let mut config = Config::default();
        let endpoint = config.providers.get_mut(kind);
        endpoint.api_key = Some(key.to_string());
        endpoint.base_url = Some(server.uri());
        config
    }

    fn backend_for(config: &Config) -> (ProviderRegistry, HttpBackend) {
        let registry = ProviderRegistry::from_config(&config.providers);
        let backend = HttpBackend::new(&registry, Duration::from_secs(5)).unwrap();
        (registry, backend)
    }

    fn completion_response(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "created": 1704067200,
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
        })
    }

    fn sse_response(deltas: &[&str]) -> String {
        let mut body = String::new();
        for delta in deltas {
            let chunk = json!({ "choices": [{ "index": 0, "delta": { "content": delta } }] });
            body.push_str(&format!("data: {}\n\n", chunk));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "deepseek-chat", "temperature": 0.8 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("Simplicity.")))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::DeepSeek, "sk-test");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::DeepSeek).unwrap();

        let completion = backend
            .complete(provider, &[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(completion.content, "Simplicity.");
        assert_eq!(completion.tokens, Some(30));
    }

    #[tokio::test]
    async fn test_zhipu_key_is_exchanged_for_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header_regex(
                "authorization",
                r"^Bearer [A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::Zhipu, "key-id.key-secret");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::Zhipu).unwrap();

        let completion = backend
            .complete(provider, &[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(completion.content, "ok");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::OpenAi, "sk-wrong");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::OpenAi).unwrap();

        let err = backend
            .complete(provider, &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Authentication { provider: "openai", .. }));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::DeepSeek, "sk-test");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::DeepSeek).unwrap();

        let err = backend
            .complete(provider, &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        match err {
            ProviderError::ApiError { status, message, .. } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let mut config = Config::default();
        let endpoint = config.providers.get_mut(ProviderKind::DeepSeek);
        endpoint.api_key = Some("sk-test".to_string());
        endpoint.base_url = Some("http://127.0.0.1:1".to_string());
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::DeepSeek).unwrap();

        let err = backend.probe(provider).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network { .. }));
    }

    #[tokio::test]
    async fn test_stream_yields_deltas() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "stream": true })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sse_response(&["Think ", "different."]), "text/event-stream"),
            )
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::DeepSeek, "sk-test");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::DeepSeek).unwrap();

        let stream = backend
            .stream(provider, &[ChatMessage::user("hi")])
            .await
            .unwrap();
        let deltas: Vec<String> = stream.map(|delta| delta.unwrap()).collect().await;
        assert_eq!(deltas, vec!["Think ".to_string(), "different.".to_string()]);
    }

    #[tokio::test]
    async fn test_probe_sends_small_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "max_tokens": 10,
                "messages": [{ "role": "user", "content": "Hi" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("Hello")))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, ProviderKind::OpenAi, "sk-test");
        let (registry, backend) = backend_for(&config);
        let provider = registry.get_provider(ProviderKind::OpenAi).unwrap();

        backend.probe(provider).await.unwrap();
    }

    #[actix_web::test]
    async fn test_chat_endpoint_over_http_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sse_response(&["Art ", "matters."]), "text/event-stream"),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(&[], dir.path());
        let endpoint = config.providers.get_mut(ProviderKind::DeepSeek);
        endpoint.api_key = Some("sk-test".to_string());
        endpoint.base_url = Some(server.uri());

        let state = AppState::new(config).unwrap();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(chat_body("hi"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(sse_content(&body), "Art matters.");

        let received = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(sent["messages"][0]["role"], "system");
        assert_eq!(sent["messages"][1]["content"], "hi");
        assert_eq!(sent["stream"], true);
    }
}
