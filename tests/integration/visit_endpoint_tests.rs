//! `/api/visit` endpoint tests

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedBackend, test_config, test_state};
    use actix_web::{http::StatusCode, test, web};
    use persona_gateway::server::HttpServer;
    use persona_gateway::server::routes::ApiResponse;
    use persona_gateway::services::VisitStats;
    use persona_gateway::services::visit_counter::DEFAULT_TOTAL_VISITS;
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

    fn post_visit(ip: Option<&str>) -> test::TestRequest {
        let req = test::TestRequest::post().uri("/api/visit");
        match ip {
            Some(ip) => req.insert_header(("x-forwarded-for", ip)),
            None => req,
        }
    }

    #[actix_web::test]
    async fn test_get_returns_defaults_without_recording() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let req = test::TestRequest::get().uri("/api/visit").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ApiResponse<VisitStats> = test::read_body_json(resp).await;
        assert!(body.success);
        let stats = body.data.unwrap();
        assert_eq!(stats.total_visits, DEFAULT_TOTAL_VISITS);
        assert_eq!(stats.unique_visitors, 0);
        assert!(!dir.path().join("visit-stats.json").exists());
    }

    #[actix_web::test]
    async fn test_post_counts_each_ip_once() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        for ip in ["1.1.1.1", "1.1.1.1", "2.2.2.2"] {
            let resp = test::call_service(&app, post_visit(Some(ip)).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/api/visit").to_request();
        let body: ApiResponse<VisitStats> = test::call_and_read_body_json(&app, req).await;
        let stats = body.data.unwrap();
        assert_eq!(stats.unique_visitors, 2);
        assert_eq!(stats.total_visits, DEFAULT_TOTAL_VISITS + 2);
    }

    #[actix_web::test]
    async fn test_post_without_ip_is_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path());

        let body: ApiResponse<VisitStats> =
            test::call_and_read_body_json(&app, post_visit(None).to_request()).await;
        assert!(body.success);
        assert_eq!(body.data.unwrap().unique_visitors, 0);
    }
}
