use std::path::PathBuf;

use anyhow::{Context, Result};

use squad_scout::config::{AppConfig, CliArgs};
use squad_scout::position::Position;
use squad_scout::report::{self, TOP_PER_POSITION, priority_label};
use squad_scout::scorer::top_rated;
use squad_scout::snapshot::Dataset;
use squad_scout::source;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    squad_scout::init_tracing();

    let args = CliArgs::parse(std::env::args().skip(1));
    let cfg = AppConfig::from_args_and_env(&args)?;
    let (players, teams) = source::load_tables(&cfg).context("load player and team tables")?;
    let dataset = Dataset::new(1, players, teams);
    let analyzer = &dataset.needs;
    let players = &dataset.players;

    println!("{}", dataset.describe());
    println!("Squad needs ({} teams)", analyzer.needs().len());
    for team in analyzer.needs() {
        println!(
            "{}: offense={:.2} creativity={:.2} defense={:.2} -> {}",
            team.team_name,
            team.scores.offense,
            team.scores.creativity,
            team.scores.defense,
            team.primary_need
        );
        for rec in analyzer
            .recommended_player_types(&team.team_name)
            .unwrap_or_default()
        {
            println!(
                "  [{}] {} ({})",
                priority_label(rec.priority),
                rec.archetype,
                rec.key_attributes.join(", ")
            );
        }
    }

    println!();
    println!("Top rated by position");
    for position in Position::ALL {
        let top = top_rated(players, position, TOP_PER_POSITION);
        if top.is_empty() {
            continue;
        }
        println!("{} / {}", position.label(), position.label_zh());
        for p in top {
            println!(
                "  {} ({}) rating={}",
                p.name,
                p.club,
                p.rating.map(|r| format!("{r:.2}")).unwrap_or_else(|| "n/a".to_string())
            );
        }
    }

    if let Some(path) = args.flag("xlsx") {
        let path = PathBuf::from(path);
        let summary = report::export_needs_workbook(&path, analyzer, players)?;
        println!();
        println!("Workbook: {}", path.display());
        println!(
            "teams={} archetypes={} top_players={}",
            summary.teams, summary.archetypes, summary.top_players
        );
    }

    Ok(())
}
