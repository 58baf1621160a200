//! Stored style preferences and how they feed the stylist's prompt context.

use sqlx::PgPool;
use uuid::Uuid;

use crate::agents::router::AuxiliaryContext;
use crate::errors::AppError;
use crate::models::profile::StylePreferences;

pub async fn load_style_preferences(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<StylePreferences>, AppError> {
    Ok(sqlx::query_as::<_, StylePreferences>(
        r#"
        SELECT style_type, body_type, favorite_colors, budget_range
        FROM style_preferences
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

impl StylePreferences {
    /// Fills context keys the request left blank. Explicit request values win.
    pub fn merge_into(&self, context: &mut AuxiliaryContext) {
        if !self.style_type.is_empty() {
            context.insert_default("style_type", self.style_type.join(", "));
        }
        if let Some(body_type) = self.body_type.as_deref().filter(|b| !b.trim().is_empty()) {
            context.insert_default("body_type", body_type);
        }
        if !self.favorite_colors.is_empty() {
            context.insert_default("favorite_colors", self.favorite_colors.join(", "));
        }
        if let Some(budget) = self.budget_range.as_deref().filter(|b| !b.trim().is_empty()) {
            context.insert_default("budget_range", budget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> StylePreferences {
        StylePreferences {
            style_type: vec!["minimalist".to_string(), "classic".to_string()],
            body_type: Some("athletic".to_string()),
            favorite_colors: vec!["navy".to_string()],
            budget_range: None,
        }
    }

    #[test]
    fn test_preferences_fill_missing_context() {
        let mut context = AuxiliaryContext::new();
        prefs().merge_into(&mut context);
        assert_eq!(context.get("style_type"), Some("minimalist, classic"));
        assert_eq!(context.get("body_type"), Some("athletic"));
        assert_eq!(context.get("favorite_colors"), Some("navy"));
        assert_eq!(context.get("budget_range"), None);
    }

    #[test]
    fn test_request_values_win() {
        let mut context = AuxiliaryContext::new().with("body_type", "petite");
        prefs().merge_into(&mut context);
        assert_eq!(context.get("body_type"), Some("petite"));
    }

    #[test]
    fn test_blank_request_value_is_replaced() {
        let mut context = AuxiliaryContext::new().with("favorite_colors", "  ");
        prefs().merge_into(&mut context);
        assert_eq!(context.get("favorite_colors"), Some("navy"));
    }
}
