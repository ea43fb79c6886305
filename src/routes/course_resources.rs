use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::course_resources::requests::CourseResourceRequest;
use crate::services::CourseResourceService;

static COURSE_RESOURCE_SERVICE: Lazy<CourseResourceService> =
    Lazy::new(CourseResourceService::new_lazy);

// 挂在 /api/v1/courses/{uuid}/resources 下
pub async fn list_resources(
    req: HttpRequest,
    course_uuid: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_RESOURCE_SERVICE
        .list_resources(&req, course_uuid.into_inner())
        .await
}

pub async fn create_resource(
    req: HttpRequest,
    course_uuid: web::Path<String>,
    resource_data: web::Json<CourseResourceRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_RESOURCE_SERVICE
        .create_resource(&req, course_uuid.into_inner(), resource_data.into_inner())
        .await
}

pub async fn update_resource(
    req: HttpRequest,
    uuid: web::Path<String>,
    update_data: web::Json<CourseResourceRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_RESOURCE_SERVICE
        .update_resource(&req, uuid.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_resource(
    req: HttpRequest,
    uuid: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_RESOURCE_SERVICE
        .delete_resource(&req, uuid.into_inner())
        .await
}

pub fn configure_course_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/resources")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{uuid}")
                    .route(web::put().to(update_resource))
                    .route(web::delete().to(delete_resource)),
            ),
    );
}
