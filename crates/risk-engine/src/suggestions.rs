use protocol::{AssessmentInput, Disease};

use crate::rules::{
    Condition, HEAVY_WEIGHT, INACTIVE, LOW_VEGETABLES, PROCESSED_DIET, SEDENTARY, SHORT_SLEEP,
    SMOKER,
};

pub const MAX_SUGGESTIONS: usize = 3;

/// Advice line, shown when `when` holds or unconditionally when it is `None`.
#[derive(Debug, Clone, Copy)]
pub struct Suggestion {
    pub when: Option<Condition>,
    pub text: &'static str,
}

impl Suggestion {
    const fn when(condition: Condition, text: &'static str) -> Self {
        Self {
            when: Some(condition),
            text,
        }
    }

    const fn always(text: &'static str) -> Self {
        Self { when: None, text }
    }

    pub fn applies(&self, input: &AssessmentInput) -> bool {
        self.when
            .as_ref()
            .map(|condition| condition.holds(input))
            .unwrap_or(true)
    }
}

pub const HEART: &[Suggestion] = &[
    Suggestion::when(
        SMOKER,
        "Quit smoking - this is the single most important change for heart health",
    ),
    Suggestion::when(
        LOW_VEGETABLES,
        "Increase vegetable and fruit intake to 5+ servings daily",
    ),
    Suggestion::when(INACTIVE, "Aim for 150+ minutes of moderate exercise per week"),
    Suggestion::when(PROCESSED_DIET, "Reduce processed and fast food consumption"),
    Suggestion::when(HEAVY_WEIGHT, "Work towards a healthy body weight"),
];

pub const DIABETES: &[Suggestion] = &[
    Suggestion::when(
        HEAVY_WEIGHT,
        "Losing 5-10% of body weight can significantly reduce diabetes risk",
    ),
    Suggestion::when(
        INACTIVE,
        "Regular exercise improves insulin sensitivity - start with 30 min daily walks",
    ),
    Suggestion::when(
        PROCESSED_DIET,
        "Replace refined carbohydrates with whole grains and vegetables",
    ),
    Suggestion::when(
        SEDENTARY,
        "Break up sitting time - stand and move every 30 minutes",
    ),
];

pub const KIDNEY: &[Suggestion] = &[
    Suggestion::when(SMOKER, "Stop smoking to protect kidney function"),
    Suggestion::always("Stay well-hydrated with 6-8 glasses of water daily"),
    Suggestion::when(PROCESSED_DIET, "Reduce sodium and processed food intake"),
    Suggestion::always("Monitor blood pressure and blood sugar levels regularly"),
];

pub const OBESITY: &[Suggestion] = &[
    Suggestion::when(
        INACTIVE,
        "Increase physical activity - aim for 150+ minutes per week",
    ),
    Suggestion::when(
        PROCESSED_DIET,
        "Cook more meals at home and reduce takeout/fast food",
    ),
    Suggestion::when(
        SHORT_SLEEP,
        "Aim for 7-9 hours of quality sleep - poor sleep increases obesity risk",
    ),
    Suggestion::always("Focus on portion control and eating mindfully"),
];

pub fn rules_for(disease: Disease) -> &'static [Suggestion] {
    match disease {
        Disease::Heart => HEART,
        Disease::Diabetes => DIABETES,
        Disease::Kidney => KIDNEY,
        Disease::Obesity => OBESITY,
    }
}

/// First [`MAX_SUGGESTIONS`] applicable lines, in list order.
pub fn select(rules: &[Suggestion], input: &AssessmentInput) -> Vec<String> {
    rules
        .iter()
        .filter(|suggestion| suggestion.applies(input))
        .take(MAX_SUGGESTIONS)
        .map(|suggestion| suggestion.text.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Category;

    #[test]
    fn kidney_falls_back_to_generic_advice() {
        let picked = select(KIDNEY, &AssessmentInput::default());
        assert_eq!(
            picked,
            vec![
                "Stay well-hydrated with 6-8 glasses of water daily".to_string(),
                "Monitor blood pressure and blood sugar levels regularly".to_string(),
            ]
        );
    }

    #[test]
    fn kidney_truncation_drops_trailing_generic_item() {
        let input = AssessmentInput::default()
            .with(Category::Substances, "smoking", "occasional")
            .with(Category::EatingHabits, "processedFood", "often");
        let picked = select(KIDNEY, &input);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0], "Stop smoking to protect kidney function");
        assert_eq!(picked[1], "Stay well-hydrated with 6-8 glasses of water daily");
        assert_eq!(picked[2], "Reduce sodium and processed food intake");
    }

    #[test]
    fn heart_keeps_rule_order_not_severity() {
        let input = AssessmentInput::default()
            .with(Category::BodyIndicators, "weight", "obese")
            .with(Category::EatingHabits, "processedFood", "daily")
            .with(Category::PhysicalActivity, "exercise", "none")
            .with(Category::EatingHabits, "vegetables", "none");
        let picked = select(HEART, &input);
        assert_eq!(
            picked,
            vec![
                "Increase vegetable and fruit intake to 5+ servings daily".to_string(),
                "Aim for 150+ minutes of moderate exercise per week".to_string(),
                "Reduce processed and fast food consumption".to_string(),
            ]
        );
    }

    #[test]
    fn heart_and_diabetes_have_no_generic_items() {
        let empty = AssessmentInput::default();
        assert!(select(HEART, &empty).is_empty());
        assert!(select(DIABETES, &empty).is_empty());
        assert_eq!(
            select(OBESITY, &empty),
            vec!["Focus on portion control and eating mindfully".to_string()]
        );
    }

    #[test]
    fn obesity_sleep_advice_ignores_long_sleep() {
        let long_sleep = AssessmentInput::default().with(Category::SleepRoutine, "sleep", "high");
        assert_eq!(select(OBESITY, &long_sleep).len(), 1);
        let short_sleep =
            AssessmentInput::default().with(Category::SleepRoutine, "sleep", "moderate");
        assert_eq!(
            select(OBESITY, &short_sleep)[0],
            "Aim for 7-9 hours of quality sleep - poor sleep increases obesity risk"
        );
    }

    #[test]
    fn diabetes_sitting_advice() {
        let input =
            AssessmentInput::default().with(Category::PhysicalActivity, "sitting", "very_high");
        assert_eq!(
            select(DIABETES, &input),
            vec!["Break up sitting time - stand and move every 30 minutes".to_string()]
        );
    }
}
