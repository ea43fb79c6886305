use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{course_resources, course_tasks};
use crate::middlewares;
use crate::models::courses::requests::{CreateCourseRequest, TaskCountQuery, UpdateCourseRequest};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, uuid: web::Path<String>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, uuid.into_inner()).await
}

pub async fn update_course(
    req: HttpRequest,
    uuid: web::Path<String>,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, uuid.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, uuid: web::Path<String>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, uuid.into_inner()).await
}

pub async fn count_tasks(
    req: HttpRequest,
    uuid: web::Path<String>,
    query: web::Query<TaskCountQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .count_tasks(&req, uuid.into_inner(), query.into_inner())
        .await
}

// 配置路由，课程下的任务与资源也挂在这里
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_course))
            .service(
                web::resource("/{uuid}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            )
            .route("/{uuid}/task-count", web::get().to(count_tasks))
            .service(
                web::resource("/{uuid}/tasks")
                    .route(web::get().to(course_tasks::list_tasks))
                    .route(web::post().to(course_tasks::create_task)),
            )
            .service(
                web::resource("/{uuid}/resources")
                    .route(web::get().to(course_resources::list_resources))
                    .route(web::post().to(course_resources::create_resource)),
            ),
    );
}
