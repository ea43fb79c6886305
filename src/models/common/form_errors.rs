use actix_web::HttpResponse;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ApiResponse, ErrorCode};

/// 表单校验错误
///
/// `non_field_errors` 收集跨字段的规则（日期顺序、重叠、归属），
/// `field_errors` 按字段名收集单字段规则。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub non_field_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只有一条跨字段错误
    pub fn single(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_non_field(message);
        errors
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.non_field_errors.is_empty() && self.field_errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// 首条错误信息，用作响应的 message
    pub fn summary(&self) -> String {
        self.non_field_errors
            .first()
            .cloned()
            .or_else(|| {
                self.field_errors
                    .iter()
                    .find_map(|(field, messages)| {
                        messages.first().map(|message| format!("{field}: {message}"))
                    })
            })
            .unwrap_or_else(|| "Validation failed".to_string())
    }

    /// 400 响应，错误详情放在 data 中
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            self.clone(),
            self.summary(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_errors() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());
        errors.add_field("score", "too high");
        errors.add_field("score", "not a number");
        errors.add_non_field("bad dates");
        assert_eq!(errors.field_errors["score"].len(), 2);
        assert!(errors.has_field("score"));
        assert_eq!(errors.summary(), "bad dates");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_summary_falls_back_to_field() {
        let mut errors = FormErrors::new();
        errors.add_field("name", "This field is required.");
        assert_eq!(errors.summary(), "name: This field is required.");
        assert!(FormErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let errors = FormErrors::single("Invalid school year.");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["non_field_errors"][0], "Invalid school year.");
        assert!(value["field_errors"].as_object().unwrap().is_empty());
    }
}
