use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

use propcalc_core::scoring::weights::{self, WeightedScoreInput};

use crate::input;

/// Arguments for weight normalization
#[derive(Args)]
pub struct NormalizeWeightsArgs {
    /// Path to JSON input file: an object of name -> weight
    #[arg(long)]
    pub input: Option<String>,

    /// Weights as name=value pairs (e.g. "quality=0.3,price=0.5")
    #[arg(long, value_delimiter = ',')]
    pub weights: Option<Vec<String>>,
}

pub fn run_normalize_weights(
    args: NormalizeWeightsArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: BTreeMap<String, Decimal> = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let pairs = args
            .weights
            .ok_or("--weights name=value[,name=value...] is required (or provide --input)")?;
        parse_weight_pairs(&pairs)?
    };

    let normalized = weights::normalize_weights(&raw)?;
    Ok(serde_json::to_value(normalized)?)
}

/// Arguments for weighted composite score
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to JSON input file with "scores" and "weights" objects
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let score_input: WeightedScoreInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for score".into());
    };

    let result = weights::weighted_score(&score_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_weight_pairs(
    pairs: &[String],
) -> Result<BTreeMap<String, Decimal>, Box<dyn std::error::Error>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid weight '{pair}': expected name=value"))?;
        let parsed: Decimal = value
            .parse()
            .map_err(|e| format!("Invalid weight value '{value}': {e}"))?;
        map.insert(name.trim().to_string(), parsed);
    }
    Ok(map)
}
