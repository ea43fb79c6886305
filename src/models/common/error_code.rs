use serde::{Serialize, Serializer};

/// API 业务错误码，序列化为整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1022,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户 3xxx
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserEmailAlreadyExists = 3005,
    UserUpdateFailed = 3006,

    // 学校与学年 4xxx
    SchoolNotFound = 4000,
    SchoolYearNotFound = 4100,
    SchoolBreakNotFound = 4200,
    GradeLevelNotFound = 4300,

    // 课程 5xxx
    CourseNotFound = 5000,
    CourseTaskNotFound = 5100,
    CourseResourceNotFound = 5200,

    // 学生 6xxx
    StudentNotFound = 6000,
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*self as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::ValidationFailed as i32, 1022);
        assert_eq!(ErrorCode::CourseTaskNotFound as i32, 5100);
        assert_eq!(
            serde_json::to_value(ErrorCode::StudentNotFound).unwrap(),
            6000
        );
    }
}
