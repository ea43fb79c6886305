use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::school_breaks::requests::{SchoolBreakListQuery, SchoolBreakRequest};
use crate::services::SchoolBreakService;
use crate::utils::SafeIDI64;

static SCHOOL_BREAK_SERVICE: Lazy<SchoolBreakService> = Lazy::new(SchoolBreakService::new_lazy);

pub async fn list_school_breaks(
    req: HttpRequest,
    query: web::Query<SchoolBreakListQuery>,
) -> ActixResult<HttpResponse> {
    SCHOOL_BREAK_SERVICE
        .list_school_breaks(&req, query.into_inner())
        .await
}

pub async fn create_school_break(
    req: HttpRequest,
    school_break_data: web::Json<SchoolBreakRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_BREAK_SERVICE
        .create_school_break(&req, school_break_data.into_inner())
        .await
}

pub async fn get_school_break(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_BREAK_SERVICE.get_school_break(&req, id.0).await
}

pub async fn update_school_break(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<SchoolBreakRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_BREAK_SERVICE
        .update_school_break(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_school_break(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_BREAK_SERVICE.delete_school_break(&req, id.0).await
}

pub fn configure_school_break_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/school-breaks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_school_breaks))
                    .route(web::post().to(create_school_break)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_school_break))
                    .route(web::put().to(update_school_break))
                    .route(web::delete().to(delete_school_break)),
            ),
    );
}
