use crate::entities::bmi::{BmiCategory, CategoryInfo};

/// Lower bound of the normal band
pub const NORMAL_THRESHOLD: f64 = 18.5;

/// Lower bound of the overweight band
pub const OVERWEIGHT_THRESHOLD: f64 = 25.0;

/// Lower bound of the obese band
pub const OBESE_THRESHOLD: f64 = 30.0;

/// Round to one decimal place, halves away from zero.
///
/// Rounds the exact binary value, so `24.95` (stored just below the
/// midpoint) gives `24.9`. Only values sitting exactly on a midpoint,
/// such as `70.25`, are pushed away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Exact midpoints are odd multiples of 1/20; mul_add checks exactness
    // without the rounding error of a plain multiply.
    let twentieths = (value * 20.0).round();
    if twentieths % 2.0 != 0.0 && value.mul_add(20.0, -twentieths) == 0.0 {
        return (twentieths + twentieths.signum()) / 2.0 / 10.0;
    }

    // Formatting rounds the exact value; ties were handled above.
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Render with exactly one fractional digit, using [`round_one_decimal`]
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

/// Compute BMI from weight (kg) and height (cm), rounded to one decimal.
///
/// No bounds are applied to the output.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_one_decimal(weight_kg / (height_m * height_m))
}

/// Categorize a (rounded) BMI value
pub fn categorize_bmi(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_THRESHOLD {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_THRESHOLD {
        BmiCategory::Normal
    } else if bmi < OBESE_THRESHOLD {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Categorize a BMI value and attach its label, pill class and advice
pub fn classify(bmi: f64) -> CategoryInfo {
    categorize_bmi(bmi).info()
}
