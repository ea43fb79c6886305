//! 请求字段校验
//!
//! 这里只放与存储无关的单字段规则，跨记录的规则（重叠、归属）在各服务的
//! `validate` 模块中完成。

use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const COURSE_NAME_MAX_LEN: usize = 256;
pub const RESOURCE_TITLE_MAX_LEN: usize = 512;
pub const PERSON_NAME_MAX_LEN: usize = 64;
pub const GRADE_LEVEL_NAME_MAX_LEN: usize = 128;
pub const MAX_SCORE: i32 = 100;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(3..=150).contains(&len) {
        return Err("Username length must be between 3 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers and @/./+/-/_ characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address");
    }
    Ok(())
}

/// 密码至少 8 位，且同时包含字母和数字
pub fn validate_password(password: &str) -> Result<(), Vec<&'static str>> {
    let mut errors = Vec::new();
    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if password.chars().all(|c| c.is_ascii_digit()) && !password.is_empty() {
        errors.push("Password cannot be entirely numeric");
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// 必填文本字段：去掉首尾空白后非空且不超过长度上限
pub fn validate_required_text(value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("This field is required.".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!(
            "Ensure this value has at most {max_len} characters (it has {}).",
            trimmed.chars().count()
        ));
    }
    Ok(())
}

/// 分钟数必须非负
pub fn validate_duration(minutes: i32) -> Result<(), &'static str> {
    if minutes < 0 {
        return Err("Ensure this value is greater than or equal to 0.");
    }
    Ok(())
}

pub fn validate_score(score: i32) -> Result<(), String> {
    if !(0..=MAX_SCORE).contains(&score) {
        return Err(format!("A score must be between 0 and {MAX_SCORE}."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("parent_1").is_ok());
        assert!(validate_username("mom@home.org").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("parent@example.com").is_ok());
        assert!(validate_email("parent@example").is_err());
        assert!(validate_email("parent.example.com").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Lessons2024").is_ok());
        let errors = validate_password("12345678").unwrap_err();
        assert!(errors.contains(&"Password cannot be entirely numeric"));
        assert!(errors.contains(&"Password must contain at least one letter"));
        let errors = validate_password("abc").unwrap_err();
        assert!(errors.contains(&"Password must be at least 8 characters long"));
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Math", COURSE_NAME_MAX_LEN).is_ok());
        assert_eq!(
            validate_required_text("   ", COURSE_NAME_MAX_LEN).unwrap_err(),
            "This field is required."
        );
        let long = "x".repeat(COURSE_NAME_MAX_LEN + 1);
        assert!(validate_required_text(&long, COURSE_NAME_MAX_LEN).is_err());
    }

    #[test]
    fn test_duration_and_score_bounds() {
        assert!(validate_duration(0).is_ok());
        assert!(validate_duration(-1).is_err());
        assert!(validate_score(0).is_ok());
        assert!(validate_score(100).is_ok());
        assert!(validate_score(101).is_err());
        assert!(validate_score(-1).is_err());
    }
}
