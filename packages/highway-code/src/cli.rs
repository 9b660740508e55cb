//! Command-line interface: print sections and rules as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::assembler::SectionAssembler;
use crate::config::{HighwayCodeConfig, StoreConfig};
use crate::db::create_pool;
use crate::error::Result;
use crate::memory::MemoryStore;
use crate::models::{parse_rule_number, Rule};
use crate::postgres::PgStore;
use crate::store::HighwayCodeStore;

/// Highway Code - Print sections and rules from the Highway Code database.
#[derive(Parser)]
#[command(name = "highway-code")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read rules and sections from a JSON file instead of DATABASE_URL
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one section with its rules and pagination flags.
    Section {
        /// Section number
        sec_no: String,

        /// Render audio sources as the HTML5 player fragment
        #[arg(long)]
        audio_html: bool,
    },
    /// Print one or more rules.
    Rule {
        /// Rule numbers
        #[arg(required = true)]
        hcnos: Vec<String>,

        /// Render audio sources as the HTML5 player fragment
        #[arg(long)]
        audio_html: bool,
    },
    /// List all sections.
    Sections,
}

/// Run the CLI.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = HighwayCodeConfig::from_env();

    match cli.data {
        Some(path) => {
            let store = MemoryStore::from_json_file(&path)?;
            execute(SectionAssembler::new(store, config), cli.command).await
        }
        None => {
            let pool = create_pool(&StoreConfig::from_env()?).await?;
            let store = PgStore::new(pool, &config);
            execute(SectionAssembler::new(store, config), cli.command).await
        }
    }
}

async fn execute<S: HighwayCodeStore>(
    hc: SectionAssembler<S>,
    command: Commands,
) -> Result<ExitCode> {
    let output = match command {
        Commands::Section { sec_no, audio_html } => {
            let Some(view) = hc.build_section(&sec_no).await? else {
                eprintln!("Section {sec_no} not found");
                return Ok(ExitCode::FAILURE);
            };
            let mut value = serde_json::to_value(&view)?;
            value["rules"] = rules_json(&view.rules, audio_html)?;
            value
        }
        Commands::Rule { hcnos, audio_html } => {
            if let [hcno] = hcnos.as_slice() {
                let Some(rule) = hc.get_rule(hcno).await? else {
                    eprintln!("Rule {hcno} not found");
                    return Ok(ExitCode::FAILURE);
                };
                rule_json(&rule, audio_html)?
            } else {
                let numbers: Vec<i32> = hcnos
                    .iter()
                    .filter_map(|hcno| parse_rule_number(hcno))
                    .collect();
                rules_json(&hc.get_rules(&numbers).await?, audio_html)?
            }
        }
        Commands::Sections => serde_json::to_value(hc.list_sections().await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(ExitCode::SUCCESS)
}

fn rules_json(rules: &[Rule], audio_html: bool) -> Result<Value> {
    let rules = rules
        .iter()
        .map(|rule| rule_json(rule, audio_html))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(rules))
}

fn rule_json(rule: &Rule, audio_html: bool) -> Result<Value> {
    let mut value = serde_json::to_value(rule)?;
    if audio_html {
        if let Some(audio) = &rule.audio {
            value["audio"] = Value::String(audio.to_html());
        }
    }
    Ok(value)
}
