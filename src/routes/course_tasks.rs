use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::MoveRequest;
use crate::models::course_tasks::requests::CourseTaskRequest;
use crate::services::CourseTaskService;

static COURSE_TASK_SERVICE: Lazy<CourseTaskService> = Lazy::new(CourseTaskService::new_lazy);

// 以下两个处理程序挂在 /api/v1/courses/{uuid}/tasks 下
pub async fn list_tasks(
    req: HttpRequest,
    course_uuid: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE
        .list_tasks(&req, course_uuid.into_inner())
        .await
}

pub async fn create_task(
    req: HttpRequest,
    course_uuid: web::Path<String>,
    task_data: web::Json<CourseTaskRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE
        .create_task(&req, course_uuid.into_inner(), task_data.into_inner())
        .await
}

pub async fn get_task(req: HttpRequest, uuid: web::Path<String>) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE.get_task(&req, uuid.into_inner()).await
}

pub async fn update_task(
    req: HttpRequest,
    uuid: web::Path<String>,
    update_data: web::Json<CourseTaskRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE
        .update_task(&req, uuid.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_task(req: HttpRequest, uuid: web::Path<String>) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE.delete_task(&req, uuid.into_inner()).await
}

pub async fn move_task(
    req: HttpRequest,
    uuid: web::Path<String>,
    move_request: web::Json<MoveRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_TASK_SERVICE
        .move_task(&req, uuid.into_inner(), move_request.into_inner())
        .await
}

pub fn configure_course_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{uuid}")
                    .route(web::get().to(get_task))
                    .route(web::put().to(update_task))
                    .route(web::delete().to(delete_task)),
            )
            .route("/{uuid}/move", web::post().to(move_task)),
    );
}
