//! Rule-based scoring of questionnaire answers into per-disease risk.
//!
//! Scores are plain sums over a fixed weight table plus a handful of
//! compound bonuses. Unanswered or unknown answers add nothing, so every
//! input yields a complete result.

use protocol::{AssessmentInput, Disease, RiskResult, RiskResults};

pub mod rules;
pub mod suggestions;
pub mod tier;

use rules::{CompoundRule, DirectWeight, Weights, COMPOUND_RULES, DIRECT_WEIGHTS};

#[derive(Debug, Clone, Copy)]
pub struct RiskScorer {
    direct: &'static [DirectWeight],
    compound: &'static [CompoundRule],
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            direct: DIRECT_WEIGHTS,
            compound: COMPOUND_RULES,
        }
    }
}

impl RiskScorer {
    pub fn score(&self, input: &AssessmentInput) -> RiskResults {
        let totals = self.totals(input);
        RiskResults {
            heart: build_result(Disease::Heart, &totals, input),
            diabetes: build_result(Disease::Diabetes, &totals, input),
            kidney: build_result(Disease::Kidney, &totals, input),
            obesity: build_result(Disease::Obesity, &totals, input),
        }
    }

    pub fn totals(&self, input: &AssessmentInput) -> Weights {
        let mut totals = Weights::ZERO;
        for row in self.direct.iter().filter(|row| row.matches(input)) {
            totals += row.weights;
        }
        for rule in self.compound.iter().filter(|rule| rule.applies(input)) {
            totals += rule.bonus;
        }
        totals
    }
}

pub fn score(input: &AssessmentInput) -> RiskResults {
    RiskScorer::default().score(input)
}

fn build_result(disease: Disease, totals: &Weights, input: &AssessmentInput) -> RiskResult {
    let score = totals.get(disease);
    RiskResult {
        tier: tier::classify(score),
        score,
        contributing_habits: Vec::new(),
        suggestions: suggestions::select(suggestions::rules_for(disease), input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Category, RiskTier};
    use serde_json::json;

    fn worst_case() -> AssessmentInput {
        AssessmentInput::default()
            .with(Category::EatingHabits, "vegetables", "none")
            .with(Category::EatingHabits, "processedFood", "daily")
            .with(Category::PhysicalActivity, "exercise", "none")
            .with(Category::PhysicalActivity, "sitting", "very_high")
            .with(Category::SleepRoutine, "sleep", "low")
            .with(Category::Substances, "smoking", "daily")
            .with(Category::BodyIndicators, "age", "senior")
            .with(Category::BodyIndicators, "weight", "obese")
            .with(Category::BodyIndicators, "gender", "male")
    }

    #[test]
    fn empty_input_scores_zero() {
        let results = score(&AssessmentInput::default());
        for disease in Disease::ALL {
            let result = results.get(disease);
            assert_eq!(result.score, 0, "{}", disease.as_str());
            assert_eq!(result.tier, RiskTier::Low);
            assert!(result.contributing_habits.is_empty());
        }
        assert_eq!(results.kidney.suggestions.len(), 2);
    }

    #[test]
    fn smoker_with_obesity() {
        let input = AssessmentInput::default()
            .with(Category::Substances, "smoking", "daily")
            .with(Category::BodyIndicators, "weight", "obese");
        let results = score(&input);
        assert_eq!(results.heart.score, 45);
        assert_eq!(results.heart.tier, RiskTier::Moderate);
        assert_eq!(results.diabetes.score, 33);
        assert_eq!(results.diabetes.tier, RiskTier::Moderate);
        assert_eq!(results.kidney.score, 32);
        assert_eq!(results.obesity.score, 35);
        assert_eq!(results.obesity.tier, RiskTier::Moderate);
    }

    #[test]
    fn inactivity_bonus_applies_to_heavy_weight() {
        let base = AssessmentInput::default().with(Category::BodyIndicators, "weight", "obese");
        let sedentary = score(&base.clone().with(Category::PhysicalActivity, "exercise", "none"));
        let active = score(&base.with(Category::PhysicalActivity, "exercise", "moderate"));
        // 25 + 18 + 10 versus 25 + 3
        assert_eq!(sedentary.diabetes.score, 53);
        assert_eq!(active.diabetes.score, 28);
        assert!(sedentary.diabetes.score > active.diabetes.score);
        assert_eq!(sedentary.heart.score, 20 + 20 + 8);
    }

    #[test]
    fn smoking_and_processed_food_bonus() {
        let input = AssessmentInput::default()
            .with(Category::Substances, "smoking", "occasional")
            .with(Category::EatingHabits, "processedFood", "often");
        let results = score(&input);
        assert_eq!(results.heart.score, 15 + 12 + 8);
        assert_eq!(results.kidney.score, 12 + 4);
    }

    #[test]
    fn senior_smoker_bonus_is_kidney_only() {
        let input = AssessmentInput::default()
            .with(Category::Substances, "smoking", "daily")
            .with(Category::BodyIndicators, "age", "senior");
        let results = score(&input);
        assert_eq!(results.kidney.score, 20 + 12 + 8);
        assert_eq!(results.heart.score, 25 + 15);
        assert_eq!(results.diabetes.score, 8 + 12);
    }

    #[test]
    fn worst_case_totals() {
        let results = score(&worst_case());
        assert_eq!(results.heart.score, 164);
        assert_eq!(results.diabetes.score, 123);
        assert_eq!(results.kidney.score, 60);
        assert_eq!(results.obesity.score, 107);
        for disease in Disease::ALL {
            assert_eq!(results.get(disease).tier, RiskTier::Higher);
            assert_eq!(results.get(disease).suggestions.len(), 3);
        }
        assert_eq!(
            results.obesity.suggestions[2],
            "Aim for 7-9 hours of quality sleep - poor sleep increases obesity risk"
        );
    }

    #[test]
    fn unknown_labels_add_nothing() {
        let input = AssessmentInput::default()
            .with(Category::EatingHabits, "vegetables", "five")
            .with(Category::EatingHabits, "processedFood", "rarely")
            .with(Category::PhysicalActivity, "exercise", "high")
            .with(Category::SleepRoutine, "sleep", "good")
            .with(Category::Substances, "smoking", "never")
            .with(Category::BodyIndicators, "age", "young")
            .with(Category::BodyIndicators, "gender", "female")
            .with(Category::BodyIndicators, "height", "tall");
        assert_eq!(score(&input), score(&AssessmentInput::default()));
    }

    #[test]
    fn family_history_is_not_scored() {
        let input: AssessmentInput = serde_json::from_value(json!({
            "family_history": { "heartDisease": "yes", "diabetes": "yes", "kidney": "yes" }
        }))
        .expect("input");
        assert_eq!(score(&input), score(&AssessmentInput::default()));
    }

    #[test]
    fn non_string_answers_add_nothing() {
        let input: AssessmentInput = serde_json::from_value(json!({
            "substances": { "smoking": 1 },
            "body_indicators": { "weight": ["obese"], "age": null }
        }))
        .expect("input");
        assert_eq!(score(&input).heart.score, 0);
    }

    #[test]
    fn adding_any_answer_never_lowers_scores() {
        let partial = AssessmentInput::default()
            .with(Category::Substances, "smoking", "daily")
            .with(Category::BodyIndicators, "weight", "overweight");
        let bases = [AssessmentInput::default(), partial];
        for base in bases {
            let before = score(&base);
            for row in DIRECT_WEIGHTS {
                if base.label(row.category, row.field).is_some() {
                    continue;
                }
                let after = score(&base.clone().with(row.category, row.field, row.value));
                for disease in Disease::ALL {
                    assert!(
                        after.get(disease).score >= before.get(disease).score,
                        "{}={} lowered {}",
                        row.field,
                        row.value,
                        disease.as_str()
                    );
                }
            }
        }
    }

    #[test]
    fn each_row_contributes_its_weights_alone() {
        for row in DIRECT_WEIGHTS {
            let input = AssessmentInput::default().with(row.category, row.field, row.value);
            let results = score(&input);
            for disease in Disease::ALL {
                assert_eq!(results.get(disease).score, row.weights.get(disease));
            }
        }
    }

    #[test]
    fn scoring_is_repeatable() {
        let scorer = RiskScorer::default();
        let input = worst_case();
        assert_eq!(scorer.score(&input), scorer.score(&input));
    }

    #[test]
    fn suggestions_are_capped() {
        let results = score(&worst_case());
        for disease in Disease::ALL {
            assert!(results.get(disease).suggestions.len() <= suggestions::MAX_SUGGESTIONS);
        }
    }
}
