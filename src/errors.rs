//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_homeschool_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum HomeschoolError {
            $($variant(String),)*
        }

        impl HomeschoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(HomeschoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(HomeschoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(HomeschoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl HomeschoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        HomeschoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_homeschool_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Ownership("E012", "Ownership Error"),
}

impl HomeschoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for HomeschoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HomeschoolError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for HomeschoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        HomeschoolError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HomeschoolError {
    fn from(err: std::io::Error) -> Self {
        HomeschoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HomeschoolError {
    fn from(err: serde_json::Error) -> Self {
        HomeschoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for HomeschoolError {
    fn from(err: chrono::ParseError) -> Self {
        HomeschoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HomeschoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HomeschoolError::cache_connection("test").code(), "E001");
        assert_eq!(HomeschoolError::database_config("test").code(), "E003");
        assert_eq!(HomeschoolError::validation("test").code(), "E007");
        assert_eq!(HomeschoolError::ownership("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            HomeschoolError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            HomeschoolError::date_parse("test").error_type(),
            "Date Parse Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = HomeschoolError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = HomeschoolError::not_found("School year 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("School year 42"));
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = "2024-13-45"
            .parse::<chrono::NaiveDate>()
            .expect_err("invalid date should not parse");
        let err: HomeschoolError = parse_err.into();
        assert_eq!(err.code(), "E010");
    }
}
