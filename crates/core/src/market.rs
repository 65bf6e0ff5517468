use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{MarketRecord, MarketReport, SummaryEntry};

static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,]+").expect("valid price regex"));

// First run of digits/commas in the cell, commas stripped. "Rs 2,350/qtl" -> 2350.0
pub fn extract_price(text: &str) -> Option<f64> {
    let matched = PRICE_PATTERN.find(text)?;
    matched.as_str().replace(',', "").parse::<f64>().ok()
}

pub fn report_from_rows(state: &str, commodity: &str, rows: &[Vec<String>]) -> MarketReport {
    let mut summary = Vec::new();
    let mut records = Vec::new();

    for cells in rows {
        if cells.len() == 2 {
            summary.push(SummaryEntry {
                label: cells[0].trim().trim_end_matches(':').to_string(),
                value: cells[1].trim().to_string(),
            });
            continue;
        }

        if cells.len() > 7 {
            // Rows without an average price are partial scrapes and get dropped.
            let Some(avg_price) = extract_price(&cells[6]) else {
                continue;
            };

            records.push(MarketRecord {
                district: cells[0].trim().to_string(),
                market: cells[1].trim().to_string(),
                variety: cells[3].trim().to_string(),
                max_price: extract_price(&cells[4]),
                min_price: extract_price(&cells[5]),
                avg_price,
                date: cells[7].trim().to_string(),
            });
        }
    }

    MarketReport {
        state: state.to_string(),
        commodity: commodity.to_string(),
        summary,
        records,
    }
}

#[derive(Debug, Clone)]
pub struct MarketBoard {
    records: Vec<MarketRecord>,
    selected_market: Option<String>,
}

impl MarketBoard {
    // The first listed market starts selected, matching the price screen.
    pub fn new(records: Vec<MarketRecord>) -> Self {
        let selected_market = records.first().map(|record| record.market.clone());
        Self {
            records,
            selected_market,
        }
    }

    pub fn selected_market(&self) -> Option<&str> {
        self.selected_market.as_deref()
    }

    pub fn select(&mut self, market: &str) -> bool {
        if self.records.iter().any(|record| record.market == market) {
            self.selected_market = Some(market.to_string());
            return true;
        }
        false
    }

    pub fn selected_records(&self) -> Vec<&MarketRecord> {
        match self.selected_market.as_deref() {
            Some(market) => self
                .records
                .iter()
                .filter(|record| record.market == market)
                .collect(),
            None => Vec::new(),
        }
    }
}
