use protocol::Category::{BodyIndicators, EatingHabits, PhysicalActivity, SleepRoutine, Substances};
use protocol::{AssessmentInput, Category, Disease};
use std::ops::AddAssign;

/// Points added to each disease total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weights {
    pub heart: u32,
    pub diabetes: u32,
    pub kidney: u32,
    pub obesity: u32,
}

impl Weights {
    pub const ZERO: Weights = Weights::new(0, 0, 0, 0);

    pub const fn new(heart: u32, diabetes: u32, kidney: u32, obesity: u32) -> Self {
        Self {
            heart,
            diabetes,
            kidney,
            obesity,
        }
    }

    pub fn get(&self, disease: Disease) -> u32 {
        match disease {
            Disease::Heart => self.heart,
            Disease::Diabetes => self.diabetes,
            Disease::Kidney => self.kidney,
            Disease::Obesity => self.obesity,
        }
    }
}

impl AddAssign for Weights {
    fn add_assign(&mut self, other: Weights) {
        self.heart += other.heart;
        self.diabetes += other.diabetes;
        self.kidney += other.kidney;
        self.obesity += other.obesity;
    }
}

/// Field-membership test: the answer to `field` in `category` is one of
/// `values`. An absent category or field never matches.
#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub category: Category,
    pub field: &'static str,
    pub values: &'static [&'static str],
}

impl Condition {
    pub const fn any_of(
        category: Category,
        field: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            category,
            field,
            values,
        }
    }

    pub fn holds(&self, input: &AssessmentInput) -> bool {
        input
            .label(self.category, self.field)
            .map(|label| self.values.contains(&label))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DirectWeight {
    pub category: Category,
    pub field: &'static str,
    pub value: &'static str,
    pub weights: Weights,
}

impl DirectWeight {
    pub fn matches(&self, input: &AssessmentInput) -> bool {
        input.label(self.category, self.field) == Some(self.value)
    }
}

const fn row(
    category: Category,
    field: &'static str,
    value: &'static str,
    weights: Weights,
) -> DirectWeight {
    DirectWeight {
        category,
        field,
        value,
        weights,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompoundRule {
    pub name: &'static str,
    pub when: [Condition; 2],
    pub bonus: Weights,
}

impl CompoundRule {
    pub fn applies(&self, input: &AssessmentInput) -> bool {
        self.when.iter().all(|condition| condition.holds(input))
    }
}

// Columns: heart, diabetes, kidney, obesity.
pub const DIRECT_WEIGHTS: &[DirectWeight] = &[
    row(EatingHabits, "vegetables", "none", Weights::new(15, 12, 0, 12)),
    row(EatingHabits, "vegetables", "one", Weights::new(8, 6, 0, 6)),
    row(EatingHabits, "vegetables", "three", Weights::new(3, 2, 0, 0)),
    row(EatingHabits, "processedFood", "daily", Weights::new(20, 15, 8, 18)),
    row(EatingHabits, "processedFood", "often", Weights::new(12, 10, 4, 12)),
    row(EatingHabits, "processedFood", "sometimes", Weights::new(4, 3, 0, 4)),
    row(PhysicalActivity, "exercise", "none", Weights::new(20, 18, 0, 22)),
    row(PhysicalActivity, "exercise", "low", Weights::new(12, 10, 0, 15)),
    row(PhysicalActivity, "exercise", "moderate", Weights::new(4, 3, 0, 5)),
    row(PhysicalActivity, "sitting", "very_high", Weights::new(15, 15, 0, 12)),
    row(PhysicalActivity, "sitting", "high", Weights::new(10, 10, 0, 8)),
    row(PhysicalActivity, "sitting", "moderate", Weights::new(3, 3, 0, 0)),
    row(SleepRoutine, "sleep", "low", Weights::new(10, 8, 0, 8)),
    row(SleepRoutine, "sleep", "moderate", Weights::new(4, 3, 0, 0)),
    row(SleepRoutine, "sleep", "high", Weights::new(0, 0, 0, 3)),
    row(Substances, "smoking", "daily", Weights::new(25, 8, 20, 0)),
    row(Substances, "smoking", "occasional", Weights::new(15, 5, 12, 0)),
    row(Substances, "smoking", "former", Weights::new(4, 0, 3, 0)),
    row(BodyIndicators, "age", "senior", Weights::new(15, 12, 12, 0)),
    row(BodyIndicators, "age", "middle", Weights::new(8, 8, 4, 0)),
    row(BodyIndicators, "age", "adult", Weights::new(3, 0, 0, 0)),
    row(BodyIndicators, "weight", "obese", Weights::new(20, 25, 12, 35)),
    row(BodyIndicators, "weight", "overweight", Weights::new(12, 15, 7, 20)),
    row(BodyIndicators, "weight", "underweight", Weights::new(4, 0, 0, 5)),
    row(BodyIndicators, "gender", "male", Weights::new(8, 0, 0, 0)),
];

pub const HEAVY_WEIGHT: Condition =
    Condition::any_of(BodyIndicators, "weight", &["obese", "overweight"]);
pub const INACTIVE: Condition = Condition::any_of(PhysicalActivity, "exercise", &["none", "low"]);
pub const SMOKER: Condition = Condition::any_of(Substances, "smoking", &["daily", "occasional"]);
pub const PROCESSED_DIET: Condition =
    Condition::any_of(EatingHabits, "processedFood", &["daily", "often"]);
pub const LOW_VEGETABLES: Condition =
    Condition::any_of(EatingHabits, "vegetables", &["none", "one"]);
pub const SEDENTARY: Condition =
    Condition::any_of(PhysicalActivity, "sitting", &["high", "very_high"]);
pub const SHORT_SLEEP: Condition = Condition::any_of(SleepRoutine, "sleep", &["low", "moderate"]);
pub const SENIOR: Condition = Condition::any_of(BodyIndicators, "age", &["senior"]);

pub const COMPOUND_RULES: &[CompoundRule] = &[
    CompoundRule {
        name: "weight_and_inactivity",
        when: [HEAVY_WEIGHT, INACTIVE],
        bonus: Weights::new(8, 10, 0, 0),
    },
    CompoundRule {
        name: "smoking_and_processed_diet",
        when: [SMOKER, PROCESSED_DIET],
        bonus: Weights::new(8, 0, 0, 0),
    },
    CompoundRule {
        name: "senior_smoker",
        when: [SENIOR, SMOKER],
        bonus: Weights::new(0, 0, 8, 0),
    },
];
