use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::school_years::requests::{SchoolDaysQuery, SchoolYearRequest};
use crate::services::SchoolYearService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SchoolYearService 实例
static SCHOOL_YEAR_SERVICE: Lazy<SchoolYearService> = Lazy::new(SchoolYearService::new_lazy);

pub async fn list_school_years(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.list_school_years(&req).await
}

pub async fn create_school_year(
    req: HttpRequest,
    school_year_data: web::Json<SchoolYearRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE
        .create_school_year(&req, school_year_data.into_inner())
        .await
}

pub async fn get_school_year(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.get_school_year(&req, id.0).await
}

pub async fn update_school_year(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<SchoolYearRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE
        .update_school_year(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_school_year(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE.delete_school_year(&req, id.0).await
}

pub async fn count_school_days(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<SchoolDaysQuery>,
) -> ActixResult<HttpResponse> {
    SCHOOL_YEAR_SERVICE
        .count_school_days(&req, id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_school_year_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/school-years")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_school_years))
                    .route(web::post().to(create_school_year)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_school_year))
                    .route(web::put().to(update_school_year))
                    .route(web::delete().to(delete_school_year)),
            )
            .route("/{id}/school-days", web::get().to(count_school_days)),
    );
}
