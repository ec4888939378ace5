use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// BMI category based on the rounded BMI value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,

    /// BMI from 18.5 up to (not including) 25
    Normal,

    /// BMI from 25 up to (not including) 30
    Overweight,

    /// BMI of 30 or more
    Obese,
}

impl BmiCategory {
    /// Label shown in the category pill
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Style class of the category pill
    pub fn pill_class(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "cat-under",
            BmiCategory::Normal => "cat-normal",
            BmiCategory::Overweight => "cat-over",
            BmiCategory::Obese => "cat-obese",
        }
    }

    /// Fixed advice text for the category
    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "BMI below healthy range. Consider discussing nutrition and weight gain with a professional."
            }
            BmiCategory::Normal => {
                "BMI is in the healthy range. Continue balanced diet and regular physical activity."
            }
            BmiCategory::Overweight => {
                "BMI above healthy range. Adjusting diet and increasing activity may help."
            }
            BmiCategory::Obese => {
                "BMI in obese range. Consider a structured weight management plan with a healthcare professional."
            }
        }
    }

    /// Label, pill class and advice bundled together
    pub fn info(&self) -> CategoryInfo {
        CategoryInfo {
            category: *self,
            label: self.label(),
            pill_class: self.pill_class(),
            advice: self.advice(),
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification output for a BMI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: BmiCategory,
    pub label: &'static str,
    pub pill_class: &'static str,
    pub advice: &'static str,
}

/// Result of a BMI computation for the current measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub value: f64,

    /// Category the rounded value falls into
    pub category: BmiCategory,

    /// Category label (e.g. "Normal weight")
    pub label: String,

    /// Advice text for the category
    pub advice: String,
}

impl BmiResult {
    /// Build a result from an already rounded BMI value
    pub fn new(value: f64, category: BmiCategory) -> Self {
        Self {
            value,
            category,
            label: category.label().to_string(),
            advice: category.advice().to_string(),
        }
    }
}
