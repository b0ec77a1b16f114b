use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod api;
pub mod risk;

pub use risk::{Disease, RiskResult, RiskResults, RiskTier};

/// One questionnaire section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    EatingHabits,
    PhysicalActivity,
    BodyIndicators,
    SleepRoutine,
    Substances,
    FamilyHistory,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::EatingHabits,
        Category::PhysicalActivity,
        Category::BodyIndicators,
        Category::SleepRoutine,
        Category::Substances,
        Category::FamilyHistory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::EatingHabits => "eating_habits",
            Category::PhysicalActivity => "physical_activity",
            Category::BodyIndicators => "body_indicators",
            Category::SleepRoutine => "sleep_routine",
            Category::Substances => "substances",
            Category::FamilyHistory => "family_history",
        }
    }
}

/// Answers for a single category, keyed by question id.
///
/// Values are kept as raw JSON so that whatever the client sent is stored
/// verbatim. Only string values count as answer labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CategoryAnswers(BTreeMap<String, Value>);

impl CategoryAnswers {
    pub fn label(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, label: impl Into<String>) {
        self.0.insert(field.into(), Value::String(label.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentInput {
    #[serde(default)]
    pub eating_habits: Option<CategoryAnswers>,
    #[serde(default)]
    pub physical_activity: Option<CategoryAnswers>,
    #[serde(default)]
    pub body_indicators: Option<CategoryAnswers>,
    #[serde(default)]
    pub sleep_routine: Option<CategoryAnswers>,
    #[serde(default)]
    pub substances: Option<CategoryAnswers>,
    #[serde(default)]
    pub family_history: Option<CategoryAnswers>,
}

impl AssessmentInput {
    pub fn category(&self, category: Category) -> Option<&CategoryAnswers> {
        match category {
            Category::EatingHabits => self.eating_habits.as_ref(),
            Category::PhysicalActivity => self.physical_activity.as_ref(),
            Category::BodyIndicators => self.body_indicators.as_ref(),
            Category::SleepRoutine => self.sleep_routine.as_ref(),
            Category::Substances => self.substances.as_ref(),
            Category::FamilyHistory => self.family_history.as_ref(),
        }
    }

    fn category_slot(&mut self, category: Category) -> &mut Option<CategoryAnswers> {
        match category {
            Category::EatingHabits => &mut self.eating_habits,
            Category::PhysicalActivity => &mut self.physical_activity,
            Category::BodyIndicators => &mut self.body_indicators,
            Category::SleepRoutine => &mut self.sleep_routine,
            Category::Substances => &mut self.substances,
            Category::FamilyHistory => &mut self.family_history,
        }
    }

    /// Label answered for `field` in `category`, if the category is present
    /// and the value is a string.
    pub fn label(&self, category: Category, field: &str) -> Option<&str> {
        self.category(category)
            .and_then(|answers| answers.label(field))
    }

    pub fn set(&mut self, category: Category, field: impl Into<String>, label: impl Into<String>) {
        self.category_slot(category)
            .get_or_insert_with(CategoryAnswers::default)
            .insert(field, label);
    }

    pub fn with(
        mut self,
        category: Category,
        field: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.set(category, field, label);
        self
    }
}

/// Request body of a submission: the answers plus an optional owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentSubmission {
    #[serde(flatten)]
    pub answers: AssessmentInput,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_accepts_partial_categories() {
        let payload = json!({
            "substances": { "smoking": "daily" },
            "body_indicators": { "weight": "obese", "gender": "male" },
            "user_id": "u-1"
        });
        let submission: AssessmentSubmission =
            serde_json::from_value(payload).expect("deserialize");
        assert_eq!(submission.user_id.as_deref(), Some("u-1"));
        assert_eq!(
            submission.answers.label(Category::Substances, "smoking"),
            Some("daily")
        );
        assert_eq!(
            submission.answers.label(Category::BodyIndicators, "gender"),
            Some("male")
        );
        assert!(submission.answers.eating_habits.is_none());
        assert!(submission.answers.family_history.is_none());
    }

    #[test]
    fn null_category_is_absent() {
        let payload = json!({ "eating_habits": null, "sleep_routine": {} });
        let input: AssessmentInput = serde_json::from_value(payload).expect("deserialize");
        assert!(input.eating_habits.is_none());
        assert!(input.sleep_routine.as_ref().map(CategoryAnswers::is_empty).unwrap_or(false));
    }

    #[test]
    fn non_string_values_are_kept_but_not_labels() {
        let payload = json!({
            "family_history": { "heart": true, "notes": "grandfather" },
            "body_indicators": { "age": 61 }
        });
        let input: AssessmentInput = serde_json::from_value(payload).expect("deserialize");
        assert_eq!(input.label(Category::BodyIndicators, "age"), None);
        assert_eq!(input.label(Category::FamilyHistory, "notes"), Some("grandfather"));
        assert_eq!(input.family_history.as_ref().map(CategoryAnswers::len), Some(2));

        let encoded = serde_json::to_value(&input).expect("serialize");
        assert_eq!(encoded["family_history"]["heart"], json!(true));
        assert_eq!(encoded["body_indicators"]["age"], json!(61));
    }

    #[test]
    fn builder_creates_missing_category() {
        let input = AssessmentInput::default()
            .with(Category::PhysicalActivity, "exercise", "none")
            .with(Category::PhysicalActivity, "sitting", "high");
        let activity = input.physical_activity.as_ref().expect("category");
        assert_eq!(activity.len(), 2);
        assert_eq!(input.label(Category::PhysicalActivity, "sitting"), Some("high"));
        assert_eq!(input.label(Category::SleepRoutine, "sleep"), None);
    }

    #[test]
    fn category_names_match_wire_keys() {
        for category in Category::ALL {
            let encoded = serde_json::to_value(category).expect("serialize");
            assert_eq!(encoded, json!(category.as_str()));
        }
    }
}
