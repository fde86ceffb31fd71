use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize, Serializer};

use crate::keywords::KeywordCategory;
use crate::metrics::finite_or_zero;
use crate::position::Position;
use crate::records::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub position_bonus: f64,
    pub goals_per_minute: f64,
    pub assists_per_minute: f64,
    pub yellow_card: f64,
    pub red_card: f64,
    pub card_scale: f64,
    pub pass_success_rate: f64,
    pub rating: f64,
    pub minutes_played: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            position_bonus: 30.0,
            goals_per_minute: 20.0,
            assists_per_minute: 20.0,
            yellow_card: 0.5,
            red_card: 1.0,
            card_scale: 10.0,
            pass_success_rate: 15.0,
            rating: 10.0,
            minutes_played: 0.01,
        }
    }
}

// Position bonus only applies alongside at least one category.
pub fn score_player(
    player: &PlayerRecord,
    categories: &BTreeSet<KeywordCategory>,
    position: Option<Position>,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = 0.0;
    if !categories.is_empty() && position.is_some_and(|p| p == player.position) {
        score += weights.position_bonus;
    }
    for category in categories {
        score += category_contribution(player, *category, weights);
    }
    finite_or_zero(score)
}

fn category_contribution(player: &PlayerRecord, category: KeywordCategory, w: &ScoringWeights) -> f64 {
    let v = |x: Option<f64>| finite_or_zero(x.unwrap_or(0.0));
    match category {
        KeywordCategory::Offense => player.goals_per_minute * w.goals_per_minute,
        KeywordCategory::Creativity => player.assists_per_minute * w.assists_per_minute,
        KeywordCategory::Defense => {
            (v(player.yellow_cards) * w.yellow_card + v(player.red_cards) * w.red_card)
                * w.card_scale
        }
        KeywordCategory::Efficiency => v(player.pass_success_rate) * w.pass_success_rate,
        KeywordCategory::Technique => v(player.rating) * w.rating,
        KeywordCategory::Stamina => v(player.minutes_played) * w.minutes_played,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlayer<'a> {
    pub player: &'a PlayerRecord,
    pub score: f64,
}

pub fn rank_players<'a>(
    players: &'a [PlayerRecord],
    position: Option<Position>,
    categories: &BTreeSet<KeywordCategory>,
    weights: &ScoringWeights,
) -> Vec<ScoredPlayer<'a>> {
    let mut scored: Vec<ScoredPlayer<'a>> = players
        .iter()
        .filter(|p| position.is_none_or(|pos| p.position == pos))
        .map(|player| ScoredPlayer {
            player,
            score: score_player(player, categories, position, weights),
        })
        .filter(|s| s.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionalAverages {
    pub players: usize,
    pub goals: Option<f64>,
    pub assists: Option<f64>,
    pub minutes_played: Option<f64>,
    pub rating: Option<f64>,
    pub pass_success_rate: Option<f64>,
}

pub fn positional_averages(players: &[PlayerRecord]) -> HashMap<Position, PositionalAverages> {
    let mut out = HashMap::new();
    for position in Position::ALL {
        let group: Vec<&PlayerRecord> = players.iter().filter(|p| p.position == position).collect();
        if group.is_empty() {
            continue;
        }
        out.insert(
            position,
            PositionalAverages {
                players: group.len(),
                goals: mean(group.iter().map(|p| p.goals)),
                assists: mean(group.iter().map(|p| p.assists)),
                minutes_played: mean(group.iter().map(|p| p.minutes_played)),
                rating: mean(group.iter().map(|p| p.rating)),
                pass_success_rate: mean(group.iter().map(|p| p.pass_success_rate)),
            },
        );
    }
    out
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.flatten().filter(|v| v.is_finite()) {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparison {
    #[serde(serialize_with = "number_or_na")]
    pub value: Option<f64>,
    #[serde(serialize_with = "number_or_na")]
    pub average: Option<f64>,
}

impl MetricComparison {
    pub fn new(value: Option<f64>, average: Option<f64>) -> Self {
        match value {
            Some(v) => Self {
                value: Some(v),
                average,
            },
            None => Self {
                value: None,
                average: None,
            },
        }
    }
}

fn number_or_na<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str("N/A"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparisons {
    pub goals: MetricComparison,
    pub assists: MetricComparison,
    pub minutes_played: MetricComparison,
    pub rating: MetricComparison,
    pub pass_success_rate: MetricComparison,
}

impl MetricComparisons {
    pub fn build(player: &PlayerRecord, avg: Option<&PositionalAverages>) -> Self {
        let avg = avg.copied().unwrap_or_default();
        Self {
            goals: MetricComparison::new(player.goals, avg.goals),
            assists: MetricComparison::new(player.assists, avg.assists),
            minutes_played: MetricComparison::new(player.minutes_played, avg.minutes_played),
            rating: MetricComparison::new(player.rating, avg.rating),
            pass_success_rate: MetricComparison::new(player.pass_success_rate, avg.pass_success_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub club: String,
    pub position: Position,
    pub score: f64,
    pub match_pct: String,
    pub comparison: MetricComparisons,
}

pub fn build_recommendations(
    ranked: &[ScoredPlayer<'_>],
    averages: &HashMap<Position, PositionalAverages>,
    top_n: usize,
) -> Vec<Recommendation> {
    ranked
        .iter()
        .take(top_n)
        .map(|s| Recommendation {
            name: s.player.name.clone(),
            club: s.player.club.clone(),
            position: s.player.position,
            score: s.score,
            match_pct: format!("{:.1}%", s.score),
            comparison: MetricComparisons::build(s.player, averages.get(&s.player.position)),
        })
        .collect()
}

/// Best-rated players of one position; players without a rating sort last.
pub fn top_rated(players: &[PlayerRecord], position: Position, n: usize) -> Vec<&PlayerRecord> {
    let mut group: Vec<&PlayerRecord> = players.iter().filter(|p| p.position == position).collect();
    group.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    group.truncate(n);
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, pos: &str) -> PlayerRecord {
        PlayerRecord::new(name, "Club", pos)
    }

    fn cats(list: &[KeywordCategory]) -> BTreeSet<KeywordCategory> {
        list.iter().copied().collect()
    }

    #[test]
    fn category_weights_match_formula() {
        let mut p = player("A", "ST");
        p.goals_per_minute = 0.01;
        p.assists_per_minute = 0.005;
        p.yellow_cards = Some(4.0);
        p.red_cards = Some(1.0);
        p.pass_success_rate = Some(0.8);
        p.rating = Some(7.0);
        p.minutes_played = Some(1000.0);
        let w = ScoringWeights::default();
        let all = cats(&KeywordCategory::ALL);
        let expected = 0.2 + 0.1 + 30.0 + 12.0 + 70.0 + 10.0;
        assert!((score_player(&p, &all, None, &w) - expected).abs() < 1e-9);
        assert!((score_player(&p, &all, Some(Position::Forward), &w) - expected - 30.0).abs() < 1e-9);
    }

    #[test]
    fn position_bonus_needs_a_category() {
        let p = player("A", "ST");
        let w = ScoringWeights::default();
        assert_eq!(score_player(&p, &BTreeSet::new(), Some(Position::Forward), &w), 0.0);
    }

    #[test]
    fn missing_fields_contribute_zero() {
        let p = player("A", "CB");
        let w = ScoringWeights::default();
        let all = cats(&KeywordCategory::ALL);
        assert_eq!(score_player(&p, &all, None, &w), 0.0);
    }

    #[test]
    fn ranking_excludes_zero_and_sorts_descending() {
        let mut a = player("A", "ST");
        a.rating = Some(6.0);
        let b = player("B", "ST");
        let mut c = player("C", "CM");
        c.rating = Some(8.0);
        let players = vec![a, b, c];
        let ranked = rank_players(
            &players,
            None,
            &cats(&[KeywordCategory::Technique]),
            &ScoringWeights::default(),
        );
        let names: Vec<&str> = ranked.iter().map(|s| s.player.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn filter_keeps_only_matching_position() {
        let mut a = player("A", "ST");
        a.rating = Some(6.0);
        let mut c = player("C", "CM");
        c.rating = Some(8.0);
        let players = vec![a, c];
        let ranked = rank_players(
            &players,
            Some(Position::Forward),
            &cats(&[KeywordCategory::Technique]),
            &ScoringWeights::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 90.0);
    }

    #[test]
    fn averages_skip_missing_values() {
        let mut a = player("A", "ST");
        a.goals = Some(10.0);
        a.rating = Some(7.0);
        let mut b = player("B", "CF");
        b.goals = Some(4.0);
        let avgs = positional_averages(&[a, b]);
        let fwd = avgs[&Position::Forward];
        assert_eq!(fwd.players, 2);
        assert_eq!(fwd.goals, Some(7.0));
        assert_eq!(fwd.rating, Some(7.0));
        assert_eq!(fwd.assists, None);
        assert!(!avgs.contains_key(&Position::Goalkeeper));
    }

    #[test]
    fn missing_metric_serializes_as_na_on_both_sides() {
        let cmp = MetricComparison::new(None, Some(3.0));
        let json = serde_json::to_value(cmp).unwrap();
        assert_eq!(json["value"], "N/A");
        assert_eq!(json["average"], "N/A");
        let json = serde_json::to_value(MetricComparison::new(Some(2.0), None)).unwrap();
        assert_eq!(json["value"], 2.0);
        assert_eq!(json["average"], "N/A");
    }

    #[test]
    fn top_rated_puts_unrated_last() {
        let mut a = player("A", "GK");
        a.rating = Some(6.5);
        let b = player("B", "GK");
        let mut c = player("C", "GK");
        c.rating = Some(7.2);
        let players = vec![a, b, c];
        let top: Vec<&str> = top_rated(&players, Position::Goalkeeper, 3)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(top, vec!["C", "A", "B"]);
    }
}
