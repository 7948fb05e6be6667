//! `/api/analytics` endpoint tests

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedBackend, test_config, test_state};
    use actix_web::{http::StatusCode, test, web};
    use persona_gateway::server::HttpServer;
    use persona_gateway::server::routes::analytics::{EVENT_REQUIRED, EventAccepted};
    use persona_gateway::services::AnalyticsStats;
    use persona_gateway::utils::error::ErrorResponse;
    use serde_json::{Value, json};
    use std::sync::Arc;

    macro_rules! app {
        ($dir:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new(test_state(
                test_config(&[], $dir),
                Arc::new(ScriptedBackend::new()),
            ))))
            .await
        };
    }

    fn post_event(body: Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/analytics/event")
            .insert_header(("x-forwarded-for", "1.2.3.4, 10.0.0.1"))
            .insert_header(("user-agent", "integration-test"))
            .set_json(body)
    }

    #[actix_web::test]
    async fn test_event_is_stored_with_masked_ip() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let req = post_event(json!({
            "event": "chat.opened",
            "properties": { "source": "hero" },
            "sessionId": "session_abc"
        }))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: EventAccepted = test::read_body_json(resp).await;
        assert!(body.success);
        assert!(body.event_id.starts_with("evt_"));

        let raw = std::fs::read_to_string(dir.path().join("analytics.json")).unwrap();
        assert!(!raw.contains("1.2.3.4"));
        let stored: Value = serde_json::from_str(&raw).unwrap();
        let event = &stored["events"][0];
        assert_eq!(event["event"], "chat.opened");
        assert_eq!(event["sessionId"], "session_abc");
        assert_eq!(event["properties"]["source"], "hero");
        assert_eq!(event["properties"]["ip"], "1.2.3.***");
        assert_eq!(event["properties"]["user_agent"], "integration-test");
        assert_eq!(stored["stats"]["total_events"], 1);
    }

    #[actix_web::test]
    async fn test_missing_session_gets_generated_id() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let req = post_event(json!({ "event": "tag.clicked", "properties": "ignored" })).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let raw = std::fs::read_to_string(dir.path().join("analytics.json")).unwrap();
        let stored: Value = serde_json::from_str(&raw).unwrap();
        let event = &stored["events"][0];
        assert!(event["sessionId"].as_str().unwrap().starts_with("session_"));
        assert_eq!(event["properties"].as_object().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_event_name_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        for body in [json!({}), json!({ "event": 42 }), json!({ "event": "" })] {
            let resp = test::call_service(&app, post_event(body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let error: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(error.error, "invalid_request");
            assert_eq!(error.message, EVENT_REQUIRED);
        }
        assert!(!dir.path().join("analytics.json").exists());
    }

    #[actix_web::test]
    async fn test_stats_are_zero_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let req = test::TestRequest::get().uri("/api/analytics/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stats: AnalyticsStats = test::read_body_json(resp).await;
        assert_eq!(stats.chats.total_chats, 0);
        assert_eq!(stats.chats.avg_duration_ms, 0);
        assert!(stats.popular_tags.is_empty());
        assert!(stats.top_quotes.is_empty());
        assert_eq!(stats.brand_triggers, 0);
        assert_eq!(stats.errors.total_errors, 0);
        assert!(stats.errors.errors_by_type.is_empty());
        assert!(stats.last_updated > 0);
    }

    #[actix_web::test]
    async fn test_stats_reflect_recorded_events() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let events = [
            json!({ "event": "chat.opened" }),
            json!({ "event": "chat.message_sent" }),
            json!({ "event": "chat.completed", "properties": { "rounds": 2, "duration_ms": 3000 } }),
            json!({ "event": "tag.clicked", "properties": { "tag_label": "Open Source" } }),
            json!({ "event": "keyword.triggered", "properties": { "category": "brand" } }),
            json!({ "event": "rate_limit.hit" }),
        ];
        for body in events {
            let resp = test::call_service(&app, post_event(body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/api/analytics/stats").to_request();
        let stats: AnalyticsStats = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats.chats.total_chats, 1);
        assert_eq!(stats.chats.total_messages, 1);
        assert_eq!(stats.chats.avg_rounds, 2);
        assert_eq!(stats.chats.avg_duration_ms, 3000);
        assert_eq!(stats.popular_tags[0].tag_id, "open-source");
        assert_eq!(stats.brand_triggers, 1);
        assert_eq!(stats.errors.total_errors, 1);
        assert_eq!(stats.errors.errors_by_type["rate_limit.hit"], 1);
        assert_eq!(stats.errors.error_rate, 16.67);
    }
}
