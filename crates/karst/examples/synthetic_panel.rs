//! Run the factor pipeline over a synthetic panel.
//!
//! Usage: `cargo run --example synthetic_panel`
#![allow(missing_docs)]

use karst::{
    pipeline::{FactorPipeline, PipelineConfig},
    primitives::StandardizeMethod,
};
use chrono::{Days, NaiveDate};
use polars::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

const INDUSTRIES: [&str; 5] = ["energy", "financials", "health", "tech", "utilities"];

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default()
}

fn synthetic_panel(
    n_entities: usize,
    n_dates: usize,
) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    let returns = Normal::new(0.0005, 0.02)?;
    let caps = Normal::new(22.0, 1.5)?;

    let mut entity = Vec::new();
    let mut day = Vec::new();
    let mut close = Vec::new();
    let mut market_cap = Vec::new();
    let mut industry = Vec::new();

    for e in 0..n_entities {
        let mut price = 50.0;
        let base_cap: f64 = caps.sample(&mut rng);
        for d in 0..n_dates {
            price *= 1.0 + returns.sample(&mut rng);
            entity.push(format!("E{e:04}"));
            day.push(first_day() + Days::new(d as u64));
            close.push(price);
            market_cap.push(base_cap.exp() * price / 50.0);
            industry.push(INDUSTRIES[e % INDUSTRIES.len()]);
        }
    }

    let date = Series::new("date".into(), day);
    let mut df = df! {
        "entity_id" => entity,
        "close_price" => close,
        "market_cap" => market_cap,
        "industry" => industry,
    }?;
    df.with_column(date)?;
    Ok(df)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let panel = synthetic_panel(200, 60)?;
    println!("Panel: {} rows", panel.height());

    let pipeline = FactorPipeline::new(PipelineConfig::default().with_lookback(20))?;
    let (panel, report) = pipeline.run(panel)?;

    println!("\n{report}");

    let columns = pipeline.columns();
    let mut selected = vec!["entity_id".to_string(), "date".to_string(), columns.raw.clone()];
    selected.extend(StandardizeMethod::ALL.iter().map(|&m| columns.neutralized(m)));
    println!("{}", panel.select(selected)?.tail(Some(10)));

    Ok(())
}
