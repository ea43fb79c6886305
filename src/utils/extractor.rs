//! 路径参数提取
//!
//! 整数主键通过 `SafeIDI64` 提取，无法解析时直接返回 404，
//! 与记录不存在的响应一致。外部 UUID 以字符串形式传入存储层，
//! 由 `parse_uuid` 解析，格式错误同样按不存在处理。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::StatusCode,
};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::models::{ApiResponse, ErrorCode};

/// 从路径 `{id}` 段提取的 i64 主键
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => Err(InternalError::from_response(
                "invalid id",
                HttpResponse::build(StatusCode::NOT_FOUND).json(ApiResponse::error_empty(
                    ErrorCode::NotFound,
                    "Resource not found",
                )),
            )
            .into()),
        })
    }
}

/// 解析外部 UUID，格式错误时返回 `None`
pub fn parse_uuid(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_accepts_hyphenated() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()), Some(id));
        assert_eq!(parse_uuid(&id.simple().to_string()), Some(id));
    }

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        assert_eq!(parse_uuid("not-a-uuid"), None);
        assert_eq!(parse_uuid(""), None);
        assert_eq!(parse_uuid("12345"), None);
    }
}
