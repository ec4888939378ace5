// Domain entities
// Plain data carried between the normalizer, validator, engine and presenter

pub mod bmi;
pub mod measurement;
