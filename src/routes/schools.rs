use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::SchoolService;

static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);

pub async fn get_school(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_school(&req).await
}

pub fn configure_school_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/school")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_school)),
    );
}
