use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 新邮箱需合法且未被其他用户使用
    let email = update_data.email.map(|email| email.trim().to_lowercase());
    if let Some(ref email) = email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }

        match storage.get_user_by_email(email).await {
            Ok(Some(existing_user)) if existing_user.id != current_user.id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to update profile", e)),
        }
    }

    let hashed_password = match update_data.password {
        Some(ref password) => {
            if let Err(messages) = validate_password(password) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserPasswordInvalid,
                    messages.join(" "),
                )));
            }

            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(internal_error("Failed to hash password", e)),
            }
        }
        None => None,
    };

    let storage_update = UpdateUserRequest {
        email,
        password: hashed_password,
        display_name: update_data.display_name.map(|name| name.trim().to_string()),
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            // 缓存中的旧资料不再有效
            RequireJWT::invalidate_cached_user(request).await;
            tracing::info!("User {} updated profile", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update profile for {}: {}", current_user.id, e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                "Failed to update profile",
            )))
        }
    }
}
