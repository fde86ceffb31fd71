use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use squad_scout::config::{AppConfig, CliArgs};
use squad_scout::keywords::KeywordExtractor;
use squad_scout::position::Position;
use squad_scout::recommender::Recommender;
use squad_scout::snapshot::DatasetHandle;
use squad_scout::source;

// recommend [--position FW] [--players p.json --teams t.json | --sqlite db | --demo SEED] <requirements...>
fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    squad_scout::init_tracing();

    let args = CliArgs::parse_with_text(std::env::args().skip(1));
    let requirements = args.positional.join(" ");
    if requirements.trim().is_empty() {
        return Err(anyhow!("usage: recommend [--position POS] [source flags] <requirements>"));
    }
    let position = args.flag("position").and_then(Position::parse_filter);

    let cfg = AppConfig::from_args_and_env(&args)?;
    let (players, teams) = source::load_tables(&cfg).context("load player and team tables")?;
    let recommender = Recommender::new(Arc::new(DatasetHandle::new(players, teams)))
        .with_top_n(cfg.top_n)
        .with_extractor(KeywordExtractor::new(cfg.keyword_top_k));

    let response = recommender.recommend(position, &requirements);
    if response.keywords.is_empty() {
        eprintln!("no scoring keywords recognized in {requirements:?}");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
