use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sewa_agents::SahayakAgent;
use sewa_core::{
    default_district, nearest_district, quick_questions, ChatInput, ResponseTable, Season,
    DISTRICTS, GREETING,
};
use sewa_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "sewa")]
#[command(about = "SEWA Sahayak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat with the keyword-routed assistant.
    Chat,
    /// Irrigation advisory for a soil-moisture reading. Omit --moisture
    /// for the no-reading case.
    Advisory {
        #[arg(long)]
        moisture: Option<f64>,
    },
    /// Interpret a WMO weather code.
    Weather {
        #[arg(long)]
        code: u16,
    },
    /// Crop recommendation cards, optionally filtered by season.
    Crops {
        #[arg(long)]
        season: Option<String>,
    },
    /// District table, with the nearest district when a location is given.
    Districts {
        #[arg(long)]
        lat: Option<f64>,
        #[arg(long)]
        lon: Option<f64>,
    },
    /// Build a market price report from scraped table rows.
    Market {
        #[arg(long, default_value = "Punjab")]
        state: String,
        #[arg(long, default_value = "Wheat")]
        commodity: String,
        /// JSON file holding an array of row-cell arrays.
        #[arg(long)]
        rows: PathBuf,
    },
    /// Interpret a pest-detection prediction map.
    Pests {
        /// JSON file holding a label -> probability map.
        #[arg(long)]
        predictions: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing("sewa_cli");
    let cli = Cli::parse();

    let agent = SahayakAgent::new(ResponseTable::builtin(), AppMetrics::shared());

    match cli.command {
        Command::Chat => run_chat(agent)?,
        Command::Advisory { moisture } => match agent.irrigation_advisory(moisture) {
            Some(advisory) => println!("{}", serde_json::to_string_pretty(&advisory)?),
            None => println!("no advisory: no soil-moisture reading available"),
        },
        Command::Weather { code } => {
            let condition = agent.weather_condition(code);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "code": code,
                    "condition": condition,
                    "label": condition.label(),
                    "icon": condition.icon(),
                }))?
            );
        }
        Command::Crops { season } => {
            let season = match season.as_deref() {
                Some(raw) => {
                    Some(Season::parse(raw).context("invalid --season: use rabi or kharif")?)
                }
                None => None,
            };
            let cards = agent.crop_cards(season);
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        Command::Districts { lat, lon } => {
            let nearest = match (lat, lon) {
                (Some(lat), Some(lon)) => nearest_district(lat, lon),
                _ => default_district(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "districts": DISTRICTS,
                    "nearest": nearest,
                }))?
            );
        }
        Command::Market {
            state,
            commodity,
            rows,
        } => {
            let raw = fs::read_to_string(&rows)
                .with_context(|| format!("failed reading rows file {}", rows.display()))?;
            let rows: Vec<Vec<String>> =
                serde_json::from_str(&raw).context("rows file must be an array of row arrays")?;

            let report = agent.market_report(&state, &commodity, &rows);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Pests { predictions } => {
            let raw = fs::read_to_string(&predictions).with_context(|| {
                format!("failed reading predictions file {}", predictions.display())
            })?;
            let predictions: BTreeMap<String, f64> = serde_json::from_str(&raw)
                .context("predictions file must be a label -> probability map")?;

            let diagnosis = agent
                .pest_diagnosis(&predictions)
                .context("could not interpret predictions")?;
            println!("{}", serde_json::to_string_pretty(&diagnosis)?);
        }
    }

    Ok(())
}

fn run_chat(agent: SahayakAgent) -> Result<()> {
    let mut session_id: Option<String> = None;

    println!("{GREETING}\n");
    println!("Quick questions:");
    for question in quick_questions() {
        println!("- {} / {}", question.hindi, question.english);
    }
    println!("\ntype 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let reply = agent.handle_chat(ChatInput {
            session_id: session_id.clone(),
            text: message.to_string(),
        });
        session_id = Some(reply.session_id.clone());

        println!("\n{}\n", reply.reply_text);
    }

    Ok(())
}
