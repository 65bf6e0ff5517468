use crate::models::{CropRecommendation, Season};

pub const CROP_RECOMMENDATIONS: &[CropRecommendation] = &[
    CropRecommendation {
        crop: "wheat",
        label: "Wheat / गेहूं",
        season: Season::Rabi,
        sowing_window: "Oct-Nov",
        field_window: "Nov-Mar",
        ideal_temp: "15-20°C",
        seed_rate: "100-120 kg/ha",
        match_percent: 95,
        reason_hindi: "मिट्टी और मौसम के अनुकूल",
        reason_english: "Suitable for soil & weather",
    },
    CropRecommendation {
        crop: "rice",
        label: "Rice / चावल",
        season: Season::Kharif,
        sowing_window: "Jun-Jul",
        field_window: "Jun-Oct",
        ideal_temp: "20-35°C",
        seed_rate: "20-25 kg/ha",
        match_percent: 88,
        reason_hindi: "मिट्टी और मौसम के अनुकूल",
        reason_english: "Suitable for soil & weather",
    },
    CropRecommendation {
        crop: "maize",
        label: "Maize / मक्का",
        season: Season::Kharif,
        sowing_window: "May-Jun",
        field_window: "May-Sep",
        ideal_temp: "21-27°C",
        seed_rate: "18-20 kg/ha",
        match_percent: 82,
        reason_hindi: "मिट्टी और मौसम के अनुकूल",
        reason_english: "Suitable for soil & weather",
    },
];

pub fn recommendations(season: Option<Season>) -> Vec<&'static CropRecommendation> {
    CROP_RECOMMENDATIONS
        .iter()
        .filter(|card| season.map_or(true, |season| card.season == season))
        .collect()
}
