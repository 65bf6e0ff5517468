pub mod advisory;
pub mod crops;
pub mod districts;
pub mod market;
pub mod models;
pub mod pests;
pub mod router;
pub mod weather;

pub use advisory::{classify_soil_moisture, HIGH_MOISTURE_THRESHOLD, LOW_MOISTURE_THRESHOLD};
pub use crops::{recommendations, CROP_RECOMMENDATIONS};
pub use districts::{default_district, nearest_district, District, DISTRICTS};
pub use market::{extract_price, report_from_rows, MarketBoard};
pub use models::*;
pub use pests::{interpret_predictions, PestError};
pub use router::{
    clip_utterance, normalize_utterance, quick_questions, route, ResponseEntry, ResponseTable,
    FALLBACK_RESPONSE, GREETING, MAX_UTTERANCE_GRAPHEMES,
};
pub use weather::{condition_for_code, first_hour_after};
