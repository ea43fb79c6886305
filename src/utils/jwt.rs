use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
const REFRESH_COOKIE_NAME: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    fn build_claims(user_id: i64, token_type: &str, expiry: chrono::Duration) -> Claims {
        let now = chrono::Utc::now();
        Claims {
            sub: user_id.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    fn encode_with_secret(
        claims: &Claims,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|token_data| token_data.claims)
    }

    fn check_type(claims: Claims, expected_type: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 生成 Access Token
    pub fn generate_access_token(user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let claims = Self::build_claims(
            user_id,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        );
        Self::encode_with_secret(&claims, &Self::get_secret())
    }

    // 生成 Refresh Token，未指定有效期时使用配置默认值
    pub fn generate_refresh_token(
        user_id: i64,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let expiry =
            token_expiry.unwrap_or_else(|| chrono::Duration::days(config.jwt.refresh_token_expiry));
        let claims = Self::build_claims(user_id, REFRESH_TOKEN, expiry);
        Self::encode_with_secret(&claims, &Self::get_secret())
    }

    // 生成完整的 Token 响应（包含 access 和 refresh token）
    pub fn generate_token_pair(
        user_id: i64,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id)?,
            refresh_token: Self::generate_refresh_token(user_id, refresh_token_expiry)?,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::decode_with_secret(token, &Self::get_secret())?;
        Self::check_type(claims, ACCESS_TOKEN)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::decode_with_secret(token, &Self::get_secret())?;
        Self::check_type(claims, REFRESH_TOKEN)
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        max_age_days: i64,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_roundtrip_keeps_subject() {
        let claims = JwtUtils::build_claims(42, ACCESS_TOKEN, chrono::Duration::minutes(5));
        let token = JwtUtils::encode_with_secret(&claims, SECRET).unwrap();
        let decoded = JwtUtils::decode_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id(), Some(42));
        assert_eq!(decoded.token_type, ACCESS_TOKEN);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = JwtUtils::build_claims(1, ACCESS_TOKEN, chrono::Duration::minutes(5));
        let token = JwtUtils::encode_with_secret(&claims, SECRET).unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "another-secret").is_err());
    }

    #[test]
    fn test_token_type_is_enforced() {
        let claims = JwtUtils::build_claims(1, REFRESH_TOKEN, chrono::Duration::days(1));
        assert!(JwtUtils::check_type(claims.clone(), ACCESS_TOKEN).is_err());
        assert!(JwtUtils::check_type(claims, REFRESH_TOKEN).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = JwtUtils::build_claims(1, ACCESS_TOKEN, chrono::Duration::hours(-2));
        let token = JwtUtils::encode_with_secret(&claims, SECRET).unwrap();
        assert!(JwtUtils::decode_with_secret(&token, SECRET).is_err());
    }
}
