pub mod error_code;
pub mod form_errors;
pub mod pagination;
pub mod response;

use serde::Deserialize;

use crate::utils::MoveTarget;

pub use error_code::ErrorCode;
pub use form_errors::FormErrors;
pub use pagination::{PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

// 排序移动请求
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub to: MoveTarget,
}
