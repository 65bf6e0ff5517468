use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{BilingualNote, PestDiagnosis, PestSeverity};

const DEFAULT_TREATMENT: BilingualNote = BilingualNote {
    english: "Consult with a local agricultural expert for specific treatment.",
    hindi: "विशिष्ट उपचार के लिए स्थानीय कृषि विशेषज्ञ से सलाह लें।",
};

const DEFAULT_PREVENTION: BilingualNote = BilingualNote {
    english: "Follow best practices for crop health and regular monitoring.",
    hindi: "फसल स्वास्थ्य और नियमित निगरानी के लिए सर्वोत्तम प्रथाओं का पालन करें।",
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PestError {
    #[error("no predictions found in the response")]
    EmptyPredictions,
}

pub fn interpret_predictions(
    predictions: &BTreeMap<String, f64>,
) -> Result<PestDiagnosis, PestError> {
    let mut top: Option<(&str, f64)> = None;
    for (label, probability) in predictions {
        // Ties take the later label.
        let replace = match top {
            Some((_, best)) => *probability >= best,
            None => true,
        };
        if replace {
            top = Some((label, *probability));
        }
    }

    let (disease, probability) = top.ok_or(PestError::EmptyPredictions)?;

    Ok(PestDiagnosis {
        disease: disease.to_string(),
        confidence_percent: (probability * 100.0).round() as u8,
        severity: PestSeverity::Moderate,
        treatment: DEFAULT_TREATMENT,
        prevention: DEFAULT_PREVENTION,
    })
}
