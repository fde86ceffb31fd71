use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::metrics::finite_or_zero;
use crate::records::TeamRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTeam {
    pub team_name: String,
    pub goals: f64,
    pub shots: f64,
    pub conversion_rate: f64,
    pub key_passes: f64,
    pub goals_conceded: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NeedAxis {
    Offense,
    Creativity,
    Defense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimaryNeed {
    AttackingPlayer,
    CreativeMidfielder,
    DefensivePlayer,
}

impl PrimaryNeed {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryNeed::AttackingPlayer => "Attacking Player",
            PrimaryNeed::CreativeMidfielder => "Creative Midfielder",
            PrimaryNeed::DefensivePlayer => "Defensive Player",
        }
    }
}

impl fmt::Display for PrimaryNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeedsScore {
    pub offense: f64,
    pub creativity: f64,
    pub defense: f64,
}

impl NeedsScore {
    pub fn from_normalized(team: &NormalizedTeam) -> Self {
        let offensive = 0.4 * team.goals + 0.3 * (1.0 - team.shots) + 0.3 * team.conversion_rate;
        let defensive = 1.0 - team.goals_conceded;
        Self {
            offense: 1.0 - offensive,
            creativity: 1.0 - team.key_passes,
            defense: 1.0 - defensive,
        }
    }

    pub fn get(&self, axis: NeedAxis) -> f64 {
        match axis {
            NeedAxis::Offense => self.offense,
            NeedAxis::Creativity => self.creativity,
            NeedAxis::Defense => self.defense,
        }
    }

    /// Largest need wins; ties go offense, then defense, then creativity.
    pub fn primary(&self) -> PrimaryNeed {
        let candidates = [
            (PrimaryNeed::AttackingPlayer, self.offense),
            (PrimaryNeed::DefensivePlayer, self.defense),
            (PrimaryNeed::CreativeMidfielder, self.creativity),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamNeeds {
    pub team_name: String,
    pub scores: NeedsScore,
    pub primary_need: PrimaryNeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeRecommendation {
    pub axis: NeedAxis,
    pub archetype: &'static str,
    pub key_attributes: [&'static str; 3],
    pub priority: Priority,
}

struct Archetype {
    axis: NeedAxis,
    high: (&'static str, [&'static str; 3]),
    medium: (&'static str, [&'static str; 3]),
}

const ARCHETYPES: [Archetype; 3] = [
    Archetype {
        axis: NeedAxis::Offense,
        high: (
            "Clinical Finisher",
            ["High conversion rate", "Shot accuracy", "Off-ball movement"],
        ),
        medium: (
            "Complete Forward",
            ["Shooting", "Physicality", "Heading"],
        ),
    },
    Archetype {
        axis: NeedAxis::Creativity,
        high: ("Playmaker", ["Vision", "Passing", "Key passes"]),
        medium: (
            "Attacking Midfielder",
            ["Dribbling", "Long shots", "Short passing"],
        ),
    },
    Archetype {
        axis: NeedAxis::Defense,
        high: (
            "Defensive Midfielder",
            ["Tackling", "Interceptions", "Positioning"],
        ),
        medium: ("Centre-Back", ["Heading", "Marking", "Clearances"]),
    },
];

const HIGH_NEED: f64 = 0.6;
const MEDIUM_NEED: f64 = 0.4;

pub fn normalize_teams(teams: &[TeamRecord]) -> Vec<NormalizedTeam> {
    let goals = min_max(teams.iter().map(|t| t.goals));
    let shots = min_max(teams.iter().map(|t| t.shots));
    let conversion = min_max(teams.iter().map(|t| t.conversion_rate * 100.0));
    let key_passes = min_max(teams.iter().map(|t| t.key_passes));
    let conceded = min_max(teams.iter().map(|t| t.goals_conceded));

    teams
        .iter()
        .enumerate()
        .map(|(i, t)| NormalizedTeam {
            team_name: t.team_name.clone(),
            goals: goals[i],
            shots: shots[i],
            conversion_rate: conversion[i],
            key_passes: key_passes[i],
            goals_conceded: conceded[i],
        })
        .collect()
}

fn min_max(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let values: Vec<f64> = values.map(finite_or_zero).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| {
            if range > 0.0 {
                finite_or_zero((v - min) / range)
            } else {
                0.0
            }
        })
        .collect()
}

pub fn analyze_needs(teams: &[TeamRecord]) -> Vec<TeamNeeds> {
    needs_from_normalized(&normalize_teams(teams))
}

fn needs_from_normalized(normalized: &[NormalizedTeam]) -> Vec<TeamNeeds> {
    normalized
        .iter()
        .map(|team| {
            let scores = NeedsScore::from_normalized(team);
            TeamNeeds {
                team_name: team.team_name.clone(),
                primary_need: scores.primary(),
                scores,
            }
        })
        .collect()
}

pub fn recommended_archetypes(scores: &NeedsScore) -> Vec<ArchetypeRecommendation> {
    let mut out: Vec<ArchetypeRecommendation> = ARCHETYPES
        .iter()
        .filter_map(|a| {
            let need = scores.get(a.axis);
            let (priority, (archetype, key_attributes)) = if need > HIGH_NEED {
                (Priority::High, a.high)
            } else if need > MEDIUM_NEED {
                (Priority::Medium, a.medium)
            } else {
                return None;
            };
            Some(ArchetypeRecommendation {
                axis: a.axis,
                archetype,
                key_attributes,
                priority,
            })
        })
        .collect();
    out.sort_by_key(|r| r.priority);
    out
}

#[derive(Debug, Clone)]
pub struct NeedsAnalyzer {
    normalized: Vec<NormalizedTeam>,
    needs: Vec<TeamNeeds>,
}

impl NeedsAnalyzer {
    pub fn new(teams: &[TeamRecord]) -> Self {
        let normalized = normalize_teams(teams);
        let needs = needs_from_normalized(&normalized);
        debug!(teams = needs.len(), "computed team needs");
        Self { normalized, needs }
    }

    pub fn normalized(&self) -> &[NormalizedTeam] {
        &self.normalized
    }

    pub fn needs(&self) -> &[TeamNeeds] {
        &self.needs
    }

    pub fn needs_for(&self, team_name: &str) -> Option<&TeamNeeds> {
        self.needs.iter().find(|n| n.team_name == team_name)
    }

    pub fn recommended_player_types(&self, team_name: &str) -> Option<Vec<ArchetypeRecommendation>> {
        self.needs_for(team_name)
            .map(|n| recommended_archetypes(&n.scores))
    }
}
