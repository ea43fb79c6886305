use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::auth::{RegisterRequest, RegisterResponse};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    // 1. 字段校验
    if let Err(response) = check_fields(&username, &email, &register_request.password) {
        return Ok(response);
    }

    // 2. 用户名、邮箱唯一
    if let Err(response) = check_username_exists(&storage, &username).await {
        return Ok(response);
    }
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Register failed, unable to hash password", e)),
    };

    // 4. 创建用户及其学校
    let create_request = CreateUserRequest {
        username,
        email,
        password: password_hash,
        display_name: register_request
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    };

    match storage.create_user_with_school(create_request).await {
        Ok((user, school)) => {
            info!("User {} registered with school {}", user.username, school.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RegisterResponse { user, school },
                "Registration successful",
            )))
        }
        Err(e) => {
            tracing::error!("Register failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

fn check_fields(username: &str, email: &str, password: &str) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_username(username) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_email(email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    if let Err(messages) = validate_password(password) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            messages.join(" "),
        )));
    }

    Ok(())
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error("Register failed", e)),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error("Register failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_check_fields() {
        assert!(check_fields("parent", "parent@example.com", "homeschool1").is_ok());

        let response = check_fields("p", "parent@example.com", "homeschool1").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(check_fields("parent", "not-an-email", "homeschool1").is_err());
        assert!(check_fields("parent", "parent@example.com", "short").is_err());
    }
}
