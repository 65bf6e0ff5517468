use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCategory {
    Saturated,
    Dry,
    Optimal,
}

impl AdvisoryCategory {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Saturated => "saturated",
            Self::Dry => "dry",
            Self::Optimal => "optimal",
        }
    }

    pub fn advisory_text(self) -> &'static str {
        match self {
            Self::Saturated => {
                "मिट्टी संतृप्त है। जलभराव से बचने के लिए सिंचाई न करें।\n\nSoil is saturated. Avoid irrigation to prevent waterlogging."
            }
            Self::Dry => {
                "मिट्टी सूखी है। जल्द सिंचाई करने की सलाह है।\n\nSoil is dry. Irrigation is recommended soon."
            }
            Self::Optimal => {
                "मिट्टी की नमी उपयुक्त है। अभी सिंचाई की आवश्यकता नहीं है।\n\nSoil moisture is optimal. No immediate irrigation needed."
            }
        }
    }

    pub fn style(self) -> DisplayStyle {
        match self {
            Self::Saturated => DisplayStyle::Info,
            Self::Dry => DisplayStyle::Warning,
            Self::Optimal => DisplayStyle::Success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    Info,
    Warning,
    Success,
}

impl DisplayStyle {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationAdvisory {
    pub category: AdvisoryCategory,
    pub message: String,
    pub style: DisplayStyle,
}

impl IrrigationAdvisory {
    pub fn for_category(category: AdvisoryCategory) -> Self {
        Self {
            category,
            message: category.advisory_text().to_string(),
            style: category.style(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    Thunderstorm,
    Showers,
    Rain,
    Drizzle,
    Cloudy,
    Overcast,
    PartlyCloudy,
    MainlyClear,
    ClearSky,
}

impl SkyCondition {
    pub fn label(self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Showers => "Showers",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::MainlyClear => "Mainly Clear",
            Self::ClearSky => "Clear Sky",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Thunderstorm | Self::Showers | Self::Rain | Self::Drizzle => "cloud-rain",
            Self::Cloudy | Self::Overcast | Self::PartlyCloudy => "cloud",
            Self::MainlyClear | Self::ClearSky => "sun",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilHourly {
    pub time: Vec<DateTime<Utc>>,
    pub soil_moisture_0_to_1cm: Vec<f64>,
    pub soil_moisture_1_to_3cm: Vec<f64>,
    pub soil_temperature_0cm: Vec<f64>,
    pub soil_temperature_6cm: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSnapshot {
    pub at: DateTime<Utc>,
    pub moisture_0_1cm: f64,
    pub moisture_1_3cm: f64,
    pub surface_temp_c: i32,
    pub temp_6cm_c: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Rabi,
    Kharif,
}

impl Season {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "rabi" | "रबी" => Some(Self::Rabi),
            "kharif" | "खरीफ" => Some(Self::Kharif),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Rabi => "rabi",
            Self::Kharif => "kharif",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CropRecommendation {
    pub crop: &'static str,
    pub label: &'static str,
    pub season: Season,
    pub sowing_window: &'static str,
    pub field_window: &'static str,
    pub ideal_temp: &'static str,
    pub seed_rate: &'static str,
    pub match_percent: u8,
    pub reason_hindi: &'static str,
    pub reason_english: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickQuestion {
    pub hindi: &'static str,
    pub english: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub at: DateTime<Utc>,
    pub role: MessageRole,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInput {
    pub session_id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub session_id: String,
    pub reply_text: String,
    pub matched_keyword: Option<String>,
    pub fallback: bool,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub district: String,
    pub market: String,
    pub variety: String,
    pub max_price: Option<f64>,
    pub min_price: Option<f64>,
    pub avg_price: f64,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    pub state: String,
    pub commodity: String,
    pub summary: Vec<SummaryEntry>,
    pub records: Vec<MarketRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PestSeverity {
    Low,
    Moderate,
    High,
}

impl PestSeverity {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BilingualNote {
    pub english: &'static str,
    pub hindi: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PestDiagnosis {
    pub disease: String,
    pub confidence_percent: u8,
    pub severity: PestSeverity,
    pub treatment: BilingualNote,
    pub prevention: BilingualNote,
}
