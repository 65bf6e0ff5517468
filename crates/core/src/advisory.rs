use crate::models::AdvisoryCategory;

pub const HIGH_MOISTURE_THRESHOLD: f64 = 0.40;
pub const LOW_MOISTURE_THRESHOLD: f64 = 0.18;

pub fn classify_soil_moisture(moisture: Option<f64>) -> Option<AdvisoryCategory> {
    let value = moisture?;

    // NaN compares false against both thresholds and would read as optimal.
    if value.is_nan() {
        return None;
    }

    if value > HIGH_MOISTURE_THRESHOLD {
        Some(AdvisoryCategory::Saturated)
    } else if value < LOW_MOISTURE_THRESHOLD {
        Some(AdvisoryCategory::Dry)
    } else {
        Some(AdvisoryCategory::Optimal)
    }
}
