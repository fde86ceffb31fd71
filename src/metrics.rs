use serde::{Deserialize, Serialize};

use crate::records::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefensiveWeights {
    pub yellow_cards: f64,
    pub red_cards: f64,
    pub tackles: f64,
    pub interceptions: f64,
    pub clearances: f64,
    pub blocks: f64,
}

impl DefensiveWeights {
    pub fn cards() -> Self {
        Self {
            yellow_cards: 0.5,
            red_cards: 1.0,
            tackles: 0.0,
            interceptions: 0.0,
            clearances: 0.0,
            blocks: 0.0,
        }
    }

    pub fn actions() -> Self {
        Self {
            yellow_cards: 0.0,
            red_cards: 0.0,
            tackles: 1.0,
            interceptions: 1.0,
            clearances: 0.5,
            blocks: 0.5,
        }
    }

    pub fn detect(players: &[PlayerRecord]) -> Self {
        if players.iter().any(PlayerRecord::has_defensive_actions) {
            Self::actions()
        } else {
            Self::cards()
        }
    }
}

impl Default for DefensiveWeights {
    fn default() -> Self {
        Self::cards()
    }
}

pub fn per_minute(count: Option<f64>, minutes: Option<f64>) -> f64 {
    let (Some(count), Some(minutes)) = (count, minutes) else {
        return 0.0;
    };
    if !count.is_finite() || !minutes.is_finite() || minutes <= 0.0 {
        return 0.0;
    }
    finite_or_zero(count / minutes)
}

pub fn defensive_contribution(player: &PlayerRecord, weights: &DefensiveWeights) -> f64 {
    let terms = [
        (player.yellow_cards, weights.yellow_cards),
        (player.red_cards, weights.red_cards),
        (player.tackles, weights.tackles),
        (player.interceptions, weights.interceptions),
        (player.clearances, weights.clearances),
        (player.blocks, weights.blocks),
    ];
    let sum = terms
        .iter()
        .map(|(value, weight)| finite_or_zero(value.unwrap_or(0.0)) * weight)
        .sum::<f64>();
    finite_or_zero(sum)
}

pub fn derive_metrics(players: &mut [PlayerRecord], weights: &DefensiveWeights) {
    for player in players.iter_mut() {
        player.goals_per_minute = per_minute(player.goals, player.minutes_played);
        player.assists_per_minute = per_minute(player.assists, player.minutes_played);
        player.defensive_contribution = defensive_contribution(player, weights);
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_minute_guards_bad_denominators() {
        assert_eq!(per_minute(Some(5.0), Some(0.0)), 0.0);
        assert_eq!(per_minute(Some(5.0), Some(-90.0)), 0.0);
        assert_eq!(per_minute(Some(5.0), None), 0.0);
        assert_eq!(per_minute(None, Some(900.0)), 0.0);
        assert_eq!(per_minute(Some(f64::NAN), Some(900.0)), 0.0);
        assert!((per_minute(Some(9.0), Some(900.0)) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn card_weights_by_default() {
        let mut p = PlayerRecord::new("A", "C", "CB");
        p.yellow_cards = Some(4.0);
        p.red_cards = Some(1.0);
        assert_eq!(defensive_contribution(&p, &DefensiveWeights::default()), 3.0);
    }

    #[test]
    fn action_weights_detected_and_missing_columns_count_zero() {
        let mut p = PlayerRecord::new("A", "C", "CB");
        p.tackles = Some(10.0);
        p.clearances = Some(4.0);
        let players = vec![p.clone()];
        let w = DefensiveWeights::detect(&players);
        assert_eq!(w, DefensiveWeights::actions());
        assert_eq!(defensive_contribution(&p, &w), 12.0);
    }

    #[test]
    fn derived_fields_are_always_finite() {
        let mut players = vec![
            PlayerRecord::new("zero", "C", "ST"),
            PlayerRecord::new("neg", "C", "ST"),
            PlayerRecord::new("ok", "C", "ST"),
        ];
        players[0].goals = Some(3.0);
        players[0].minutes_played = Some(0.0);
        players[1].assists = Some(2.0);
        players[1].minutes_played = Some(-1.0);
        players[2].goals = Some(10.0);
        players[2].minutes_played = Some(1000.0);
        derive_metrics(&mut players, &DefensiveWeights::cards());
        for p in &players {
            assert!(p.goals_per_minute.is_finite());
            assert!(p.assists_per_minute.is_finite());
            assert!(p.defensive_contribution.is_finite());
        }
        assert_eq!(players[0].goals_per_minute, 0.0);
        assert_eq!(players[1].assists_per_minute, 0.0);
        assert!((players[2].goals_per_minute - 0.01).abs() < 1e-12);
    }
}
