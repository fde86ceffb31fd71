use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::needs::{NeedsAnalyzer, Priority, TeamNeeds, recommended_archetypes};
use crate::position::Position;
use crate::records::PlayerRecord;
use crate::scorer::top_rated;

pub const TOP_PER_POSITION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub teams: usize,
    pub archetypes: usize,
    pub top_players: usize,
}

pub fn export_needs_workbook(
    path: &Path,
    analyzer: &NeedsAnalyzer,
    players: &[PlayerRecord],
) -> Result<ExportReport> {
    let needs_rows = team_needs_rows(analyzer.needs());
    let archetype_rows = archetype_rows(analyzer.needs());
    let player_rows = top_player_rows(players, TOP_PER_POSITION);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamNeeds")?;
        write_rows(sheet, &needs_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Archetypes")?;
        write_rows(sheet, &archetype_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TopPlayers")?;
        write_rows(sheet, &player_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        teams: needs_rows.len().saturating_sub(1),
        archetypes: archetype_rows.len().saturating_sub(1),
        top_players: player_rows.len().saturating_sub(1),
    })
}

fn team_needs_rows(needs: &[TeamNeeds]) -> Vec<Vec<String>> {
    let mut rows = vec![header(&[
        "team",
        "offense_need",
        "creativity_need",
        "defense_need",
        "primary_need",
    ])];
    rows.extend(needs.iter().map(|n| {
        vec![
            n.team_name.clone(),
            format!("{:.3}", n.scores.offense),
            format!("{:.3}", n.scores.creativity),
            format!("{:.3}", n.scores.defense),
            n.primary_need.label().to_string(),
        ]
    }));
    rows
}

fn archetype_rows(needs: &[TeamNeeds]) -> Vec<Vec<String>> {
    let mut rows = vec![header(&["team", "priority", "archetype", "key_attributes"])];
    for team in needs {
        for rec in recommended_archetypes(&team.scores) {
            rows.push(vec![
                team.team_name.clone(),
                priority_label(rec.priority).to_string(),
                rec.archetype.to_string(),
                rec.key_attributes.join(", "),
            ]);
        }
    }
    rows
}

fn top_player_rows(players: &[PlayerRecord], n: usize) -> Vec<Vec<String>> {
    let mut rows = vec![header(&[
        "position", "rank", "player", "club", "rating", "goals", "assists",
    ])];
    for position in Position::ALL {
        for (idx, p) in top_rated(players, position, n).into_iter().enumerate() {
            rows.push(vec![
                position.label().to_string(),
                (idx + 1).to_string(),
                p.name.clone(),
                p.club.clone(),
                opt_to_string(p.rating),
                opt_to_string(p.goals),
                opt_to_string(p.assists),
            ]);
        }
    }
    rows
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
    }
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TeamRecord;

    #[test]
    fn archetype_rows_follow_need_buckets() {
        let teams = vec![
            TeamRecord::new("Strong", 40.0, 300.0, 0.13, 300.0, 20.0),
            TeamRecord::new("Weak", 10.0, 400.0, 0.025, 100.0, 60.0),
        ];
        let analyzer = NeedsAnalyzer::new(&teams);
        let rows = archetype_rows(analyzer.needs());
        assert!(rows.iter().skip(1).all(|r| r[0] == "Weak"));
        assert!(rows.iter().any(|r| r[2] == "Playmaker"));
        assert_eq!(team_needs_rows(analyzer.needs()).len(), 3);
    }

    #[test]
    fn top_players_are_capped_per_position() {
        let mut players = Vec::new();
        for i in 0..5 {
            let mut p = PlayerRecord::new(&format!("K{i}"), "C", "GK");
            p.rating = Some(6.0 + i as f64 / 10.0);
            players.push(p);
        }
        let rows = top_player_rows(&players, TOP_PER_POSITION);
        assert_eq!(rows.len(), 1 + TOP_PER_POSITION);
        assert_eq!(rows[1][2], "K4");
    }

    #[test]
    fn writes_workbook_to_disk() {
        let dir = std::env::temp_dir().join(format!("squad_scout_report_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("needs.xlsx");
        let analyzer = NeedsAnalyzer::new(&[TeamRecord::new("A", 1.0, 2.0, 0.5, 3.0, 4.0)]);
        let report = export_needs_workbook(&path, &analyzer, &[]).unwrap();
        assert_eq!(report.teams, 1);
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
