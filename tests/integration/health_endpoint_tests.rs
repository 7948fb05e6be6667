//! `/api/health` endpoint tests

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedBackend, Step, chat_body, test_config, test_state};
    use actix_web::{http::StatusCode, test, web};
    use persona_gateway::core::providers::ProviderKind;
    use persona_gateway::server::HttpServer;
    use serde_json::Value;
    use std::sync::Arc;

    macro_rules! app {
        ($kinds:expr, $dir:expr, $backend:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new(test_state(
                test_config($kinds, $dir),
                $backend,
            ))))
            .await
        };
    }

    fn provider<'a>(providers: &'a Value, id: &str) -> &'a Value {
        providers
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == id || p["provider"] == id)
            .unwrap()
    }

    #[actix_web::test]
    async fn test_health_lists_all_providers() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(
            &[ProviderKind::DeepSeek],
            dir.path(),
            Arc::new(ScriptedBackend::new())
        );

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));

        let providers = &body["data"]["providers"];
        assert_eq!(providers.as_array().unwrap().len(), 3);
        assert_eq!(provider(providers, "deepseek")["enabled"], true);
        assert_eq!(provider(providers, "zhipu")["enabled"], false);
        assert_eq!(provider(providers, "openai")["failureCount"], 0);
    }

    #[actix_web::test]
    async fn test_health_reports_failure_counts() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(
            ScriptedBackend::new()
                .script(ProviderKind::Zhipu, &[Step::Fail])
                .script(ProviderKind::DeepSeek, &[Step::Reply("ok")]),
        );
        let app = app!(&[ProviderKind::Zhipu, ProviderKind::DeepSeek], dir.path(), backend);

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(chat_body("hi"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        test::read_body(resp).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let providers = &body["data"]["providers"];
        assert_eq!(provider(providers, "zhipu")["failureCount"], 1);
        assert_eq!(provider(providers, "zhipu")["inCooldown"], true);
        assert_eq!(provider(providers, "deepseek")["failureCount"], 0);
    }

    #[actix_web::test]
    async fn test_provider_probe_details() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new().failing_probe(ProviderKind::DeepSeek));
        let app = app!(&[ProviderKind::Zhipu, ProviderKind::DeepSeek], dir.path(), backend);

        let req = test::TestRequest::get()
            .uri("/api/health/providers")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];
        assert_eq!(data["healthyCount"], 1);
        assert_eq!(data["hasBackup"], false);

        let providers = &data["providers"];
        assert_eq!(provider(providers, "zhipu")["healthy"], true);
        assert!(provider(providers, "zhipu")["responseTimeMs"].is_u64());
        assert_eq!(provider(providers, "deepseek")["error"], "连接失败");
        assert_eq!(provider(providers, "openai")["error"], "未启用");
    }
}
