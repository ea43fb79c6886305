use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{
    CompleteTaskRequest, CreateStudentRequest, EnrollRequest, GradeRequest, StudentListQuery,
};
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn grade(
    req: HttpRequest,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.grade(&req, grade_data.into_inner()).await
}

pub async fn get_course(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (student_uuid, course_uuid) = path.into_inner();
    STUDENT_SERVICE
        .get_course(&req, student_uuid, course_uuid)
        .await
}

pub async fn enroll(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    let (student_uuid, school_year_uuid) = path.into_inner();
    STUDENT_SERVICE
        .enroll(&req, student_uuid, school_year_uuid, enroll_data.into_inner())
        .await
}

// 请求体可省略，完成日期默认为当天
pub async fn complete_task(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    complete_data: Option<web::Json<CompleteTaskRequest>>,
) -> ActixResult<HttpResponse> {
    let (student_uuid, task_uuid) = path.into_inner();
    let complete_data = complete_data.map(|data| data.into_inner()).unwrap_or_default();
    STUDENT_SERVICE
        .complete_task(&req, student_uuid, task_uuid, complete_data)
        .await
}

pub async fn uncomplete_task(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (student_uuid, task_uuid) = path.into_inner();
    STUDENT_SERVICE
        .uncomplete_task(&req, student_uuid, task_uuid)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            // 放在 /{uuid} 系列路由之前
            .route("/grade", web::post().to(grade))
            .route(
                "/{uuid}/courses/{course_uuid}",
                web::get().to(get_course),
            )
            .route(
                "/{uuid}/enroll/{school_year_uuid}",
                web::post().to(enroll),
            )
            .service(
                web::resource("/{uuid}/tasks/{task_uuid}/complete")
                    .route(web::post().to(complete_task))
                    .route(web::delete().to(uncomplete_task)),
            ),
    );
}
