//! Error handling integration tests
//!
//! Verify that component errors surface with the right status, kind and message.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use persona_gateway::core::providers::ProviderError;
    use persona_gateway::core::router::RouterError;
    use persona_gateway::core::security::SafetyReason;
    use persona_gateway::utils::error::{ErrorResponse, GatewayError};

    async fn render(err: GatewayError) -> (u16, ErrorResponse) {
        let response = err.error_response();
        let status = response.status().as_u16();
        let body = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_no_provider_configured_flow() {
        let err: GatewayError = RouterError::NoProviderConfigured.into();
        let (status, body) = render(err).await;
        assert_eq!(status, 503);
        assert_eq!(body.error, "service_unavailable");
    }

    #[tokio::test]
    async fn test_exhausted_flow_hides_provider_details() {
        let err: GatewayError = RouterError::AllProvidersExhausted {
            attempts: 3,
            last: ProviderError::authentication("openai", "sk-secret rejected"),
        }
        .into();
        assert!(matches!(err, GatewayError::AllProvidersExhausted(_)));

        let (status, body) = render(err).await;
        assert_eq!(status, 502);
        assert_eq!(body.error, "ai_service_error");
        assert!(!body.message.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_rate_limited_flow_carries_reset() {
        let (status, body) = render(GatewayError::rate_limited("slow down", 1_700_000_000_000)).await;
        assert_eq!(status, 429);
        assert_eq!(body.message, "slow down");
        assert_eq!(body.reset_at, Some(1_700_000_000_000));
    }

    #[tokio::test]
    async fn test_content_blocked_flow() {
        let (status, body) = render(GatewayError::content_blocked(SafetyReason::AdContent)).await;
        assert_eq!(status, 400);
        assert_eq!(body.error, "content_blocked");
        assert_eq!(body.reset_at, None);
    }

    #[tokio::test]
    async fn test_internal_errors_are_not_leaked() {
        let (status, body) = render(GatewayError::internal("database password is hunter2")).await;
        assert_eq!(status, 500);
        assert_eq!(body.error, "internal_error");
        assert!(!body.message.contains("hunter2"));
    }

    #[test]
    fn test_provider_error_retryability() {
        assert!(ProviderError::network("zhipu", "reset").is_retryable());
        assert!(ProviderError::api_error("deepseek", 503, "busy").is_retryable());
    }
}
