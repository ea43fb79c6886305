use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::FormErrors;
use crate::models::grade_levels::requests::GradeLevelRequest;
use crate::models::school_years::entities::SchoolYear;
use crate::models::schools::entities::School;
use crate::services::school_years::validate::load_owned_school_year;
use crate::storage::Storage;
use crate::utils::validate::{GRADE_LEVEL_NAME_MAX_LEN, validate_required_text};

pub const DIFFERENT_USER: &str =
    "A grade level cannot be created for a different user's school year.";

pub fn check_name(name: &str) -> Result<String, FormErrors> {
    validate_required_text(name, GRADE_LEVEL_NAME_MAX_LEN).map_err(|msg| {
        let mut errors = FormErrors::new();
        errors.add_field("name", msg);
        errors
    })?;
    Ok(name.trim().to_string())
}

/// 学年归属校验通过后再检查名称
pub async fn validate_grade_level(
    storage: &Arc<dyn Storage>,
    school: &School,
    request: &GradeLevelRequest,
) -> Result<(SchoolYear, String), HttpResponse> {
    let school_year =
        load_owned_school_year(storage, school, request.school_year_id, DIFFERENT_USER).await?;
    let name = check_name(&request.name).map_err(|errors| errors.to_response())?;
    Ok((school_year, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{fixtures, test_storage};

    #[test]
    fn test_check_name() {
        assert_eq!(check_name("  3rd Grade ").unwrap(), "3rd Grade");
        let errors = check_name("").unwrap_err();
        assert!(errors.has_field("name"));
        assert!(check_name(&"x".repeat(GRADE_LEVEL_NAME_MAX_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_validate_grade_level_ownership() {
        let storage = test_storage().await;
        let school = fixtures::school(&storage, "parent").await;
        let other_school = fixtures::school(&storage, "neighbor").await;
        let year = fixtures::school_year(
            &storage,
            school.id,
            fixtures::date(2024, 9, 1),
            fixtures::date(2025, 6, 1),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let request = GradeLevelRequest {
            school_year_id: Some(year.id),
            name: "1st Grade".to_string(),
        };
        let (school_year, name) = validate_grade_level(&storage, &school, &request)
            .await
            .unwrap();
        assert_eq!(school_year.id, year.id);
        assert_eq!(name, "1st Grade");

        assert!(
            validate_grade_level(&storage, &other_school, &request)
                .await
                .is_err()
        );

        let missing = GradeLevelRequest {
            school_year_id: None,
            name: "1st Grade".to_string(),
        };
        assert!(validate_grade_level(&storage, &school, &missing).await.is_err());
    }
}
