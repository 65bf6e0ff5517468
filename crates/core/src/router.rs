use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::QuickQuestion;

pub const MAX_UTTERANCE_GRAPHEMES: usize = 500;

pub const GREETING: &str = "नमस्ते! मैं SEWA AI असिस्टेंट हूँ। मैं आपकी खेती संबंधी समस्याओं में मदद कर सकता हूँ।\n\nHello! I'm SEWA AI Assistant. I can help you with your farming queries.";

pub const FALLBACK_RESPONSE: &str = "मुझे आपकी समस्या समझ में नहीं आई। कृपया अधिक विस्तार से बताएं या हमारे एक्सपर्ट से बात करें।\n\nI didn't understand your problem. Please provide more details or talk to our expert.";

const WHEAT_RESPONSE: &str = "गेहूं की बुआई अक्टूबर-नवंबर में करना सबसे अच्छा होता है। तापमान 15-20°C होना चाहिए। बीज दर 100-120 किग्रा प्रति हेक्टेयर रखें।\n\nWheat should be sown in October-November when temperature is 15-20°C. Use seed rate of 100-120 kg per hectare.";

const PEST_RESPONSE: &str = "कीटनाशक का छिड़काव शाम के समय करें जब हवा शांत हो। सुरक्षा उपकरण जैसे मास्क और दस्ताने पहनें। बारिश से पहले छिड़काव न करें।\n\nSpray pesticides in the evening when wind is calm. Wear protective equipment like mask and gloves. Don't spray before rain.";

const RAIN_RESPONSE: &str = "बारिश के दौरान फसल में जल निकासी की व्यवस्था करें। कवक रोगों से बचाव के लिए उचित दवा का छिड़काव करें। बीज भंडारण सूखी जगह पर करें।\n\nEnsure proper drainage during rains. Spray fungicide to prevent diseases. Store seeds in dry place.";

const SOIL_RESPONSE: &str = "मिट्टी की जाँच नजदीकी कृषि विज्ञान केंद्र में कराएं। सॉइल हेल्थ कार्ड के लिए आवेदन दें। जाँच की रिपोर्ट के आधार पर खाद डालें।\n\nGet soil tested at nearest Krishi Vigyan Kendra. Apply for Soil Health Card. Apply fertilizer based on test report.";

const QUICK_QUESTIONS: &[QuickQuestion] = &[
    QuickQuestion {
        hindi: "गेहूं की खेती कब करें?",
        english: "When to cultivate wheat?",
    },
    QuickQuestion {
        hindi: "कीटनाशक कैसे छिड़कें?",
        english: "How to spray pesticides?",
    },
    QuickQuestion {
        hindi: "बारिश में क्या सावधानी बरतें?",
        english: "Precautions during rain?",
    },
    QuickQuestion {
        hindi: "मिट्टी की जाँच कहाँ कराएं?",
        english: "Where to test soil?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEntry {
    pub keyword: &'static str,
    pub response: &'static str,
}

#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: Vec<ResponseEntry>,
    fallback: &'static str,
}

impl ResponseTable {
    pub fn new(entries: Vec<ResponseEntry>, fallback: &'static str) -> Self {
        Self { entries, fallback }
    }

    // Entry order decides ties: the first keyword found as a substring wins.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                ResponseEntry { keyword: "गेहूं", response: WHEAT_RESPONSE },
                ResponseEntry { keyword: "wheat", response: WHEAT_RESPONSE },
                ResponseEntry { keyword: "कीट", response: PEST_RESPONSE },
                ResponseEntry { keyword: "pest", response: PEST_RESPONSE },
                ResponseEntry { keyword: "बारिश", response: RAIN_RESPONSE },
                ResponseEntry { keyword: "rain", response: RAIN_RESPONSE },
                ResponseEntry { keyword: "मिट्टी", response: SOIL_RESPONSE },
                ResponseEntry { keyword: "soil", response: SOIL_RESPONSE },
            ],
            FALLBACK_RESPONSE,
        )
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    pub fn match_entry(&self, utterance: &str) -> Option<ResponseEntry> {
        let folded = utterance.to_lowercase();
        self.entries
            .iter()
            .copied()
            .find(|entry| folded.contains(&entry.keyword.to_lowercase()))
    }

    pub fn route(&self, utterance: &str) -> &'static str {
        self.match_entry(utterance)
            .map(|entry| entry.response)
            .unwrap_or(self.fallback)
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN_TABLE: Lazy<ResponseTable> = Lazy::new(ResponseTable::builtin);

pub fn route(utterance: &str) -> &'static str {
    BUILTIN_TABLE.route(utterance)
}

pub fn quick_questions() -> &'static [QuickQuestion] {
    QUICK_QUESTIONS
}

pub fn normalize_utterance(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

// Grapheme-aware so a trailing Devanagari cluster is never split mid-character.
pub fn clip_utterance(input: &str) -> &str {
    match input.grapheme_indices(true).nth(MAX_UTTERANCE_GRAPHEMES) {
        Some((byte_offset, _)) => &input[..byte_offset],
        None => input,
    }
}
