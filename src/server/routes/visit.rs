//! Visit statistics endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::server::utils::client_ip;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

/// Configure visit routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/visit")
            .route(web::get().to(visit_stats))
            .route(web::post().to(record_visit)),
    );
}

/// Current statistics without recording a visit
pub async fn visit_stats(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let stats = state.visits.stats().await;
    Ok(ApiResponse::success(stats).to_http_response())
}

/// Record a visit from the caller and return the updated statistics
pub async fn record_visit(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let ip = client_ip(&req);
    match state.visits.record_visit(&ip).await {
        Ok(stats) => Ok(ApiResponse::success(stats).to_http_response()),
        Err(e) => {
            error!("Failed to record visit: {}", e);
            Ok(ApiResponse::<()>::error("记录访问失败").to_http_response())
        }
    }
}
