use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::MoveRequest;
use crate::models::grade_levels::requests::{GradeLevelListQuery, GradeLevelRequest};
use crate::services::GradeLevelService;
use crate::utils::SafeIDI64;

static GRADE_LEVEL_SERVICE: Lazy<GradeLevelService> = Lazy::new(GradeLevelService::new_lazy);

pub async fn list_grade_levels(
    req: HttpRequest,
    query: web::Query<GradeLevelListQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_LEVEL_SERVICE
        .list_grade_levels(&req, query.into_inner())
        .await
}

pub async fn create_grade_level(
    req: HttpRequest,
    grade_level_data: web::Json<GradeLevelRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_LEVEL_SERVICE
        .create_grade_level(&req, grade_level_data.into_inner())
        .await
}

pub async fn update_grade_level(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<GradeLevelRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_LEVEL_SERVICE
        .update_grade_level(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_grade_level(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_LEVEL_SERVICE.delete_grade_level(&req, id.0).await
}

pub async fn list_courses(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_LEVEL_SERVICE.list_courses(&req, id.0).await
}

pub async fn move_course(
    req: HttpRequest,
    id: SafeIDI64,
    path: web::Path<(String, String)>,
    move_request: web::Json<MoveRequest>,
) -> ActixResult<HttpResponse> {
    let (_, course_uuid) = path.into_inner();
    GRADE_LEVEL_SERVICE
        .move_course(&req, id.0, course_uuid, move_request.into_inner())
        .await
}

// 配置路由
pub fn configure_grade_level_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grade-levels")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grade_levels))
                    .route(web::post().to(create_grade_level)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_grade_level))
                    .route(web::delete().to(delete_grade_level)),
            )
            .route("/{id}/courses", web::get().to(list_courses))
            .route(
                "/{id}/courses/{course_uuid}/move",
                web::post().to(move_course),
            ),
    );
}
