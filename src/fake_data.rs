use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::metrics::{self, DefensiveWeights};
use crate::records::{PlayerRecord, TeamRecord};

const CLUBS: [&str; 8] = [
    "Northbridge", "Eastvale", "Harbor City", "Kingsford", "Riverside", "Oakmont", "Westport",
    "Stonegate",
];

// A squad's position labels, mixing both vocabularies the ingester accepts.
const SQUAD: [&str; 14] = [
    "GK", "门将", "CB", "中后卫", "LB", "RWB", "CDM", "CM", "前腰", "RM", "ST", "中锋", "LW",
    "右边锋",
];

#[derive(Debug, Clone)]
pub struct DemoLeague {
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamRecord>,
}

pub fn demo_league(seed: u64) -> DemoLeague {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut players = Vec::with_capacity(CLUBS.len() * SQUAD.len());
    let mut teams = Vec::with_capacity(CLUBS.len());

    for club in CLUBS {
        for (idx, label) in SQUAD.iter().enumerate() {
            players.push(fake_player(&mut rng, club, idx, label));
        }
        teams.push(fake_team(&mut rng, club));
    }

    metrics::derive_metrics(&mut players, &DefensiveWeights::cards());
    DemoLeague { players, teams }
}

pub fn demo_players(seed: u64, n: usize) -> Vec<PlayerRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut players: Vec<PlayerRecord> = (0..n)
        .map(|i| {
            let club = CLUBS[i % CLUBS.len()];
            let label = SQUAD[i % SQUAD.len()];
            fake_player(&mut rng, club, i, label)
        })
        .collect();
    metrics::derive_metrics(&mut players, &DefensiveWeights::cards());
    players
}

fn fake_player(rng: &mut StdRng, club: &str, idx: usize, label: &str) -> PlayerRecord {
    let mut p = PlayerRecord::new(&format!("{club} #{}", idx + 1), club, label);
    let matches = rng.gen_range(0..=38) as f64;
    let minutes = (matches * rng.gen_range(20.0..90.0)).round();
    let attacking = matches!(label, "ST" | "中锋" | "LW" | "右边锋");
    let goal_rate = if attacking { 0.006 } else { 0.0015 };
    p.age = Some(rng.gen_range(17..=36));
    p.matches_played = Some(matches);
    p.minutes_played = Some(minutes);
    p.goals = Some((minutes * goal_rate * rng.gen_range(0.0..2.0)).round());
    p.assists = Some((minutes * 0.002 * rng.gen_range(0.0..2.0)).round());
    p.yellow_cards = Some(rng.gen_range(0..=10) as f64);
    p.red_cards = Some(if rng.gen_bool(0.1) { 1.0 } else { 0.0 });
    p.pass_success_rate = Some((rng.gen_range(0.6..0.93_f64) * 1000.0).round() / 1000.0);
    p.chances_created = Some(rng.gen_range(0..=60) as f64);
    p.headers_won = Some(rng.gen_range(0..=80) as f64);
    p.rating = Some((rng.gen_range(6.0..8.0_f64) * 100.0).round() / 100.0);
    p.market_value = Some(rng.gen_range(1..=120) as f64 * 1_000_000.0);
    p
}

fn fake_team(rng: &mut StdRng, club: &str) -> TeamRecord {
    let shots = rng.gen_range(300.0..600.0_f64).round();
    let goals = (shots * rng.gen_range(0.07..0.14)).round();
    TeamRecord::new(
        club,
        goals,
        shots,
        if shots > 0.0 { goals / shots } else { 0.0 },
        rng.gen_range(200.0..450.0_f64).round(),
        rng.gen_range(20.0..75.0_f64).round(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_league() {
        let a = demo_league(7);
        let b = demo_league(7);
        assert_eq!(a.players, b.players);
        assert_eq!(a.teams, b.teams);
        assert_eq!(a.teams.len(), CLUBS.len());
        assert_eq!(a.players.len(), CLUBS.len() * SQUAD.len());
    }

    #[test]
    fn every_position_bucket_is_populated() {
        use crate::position::Position;
        let league = demo_league(1);
        for pos in [
            Position::Forward,
            Position::Midfielder,
            Position::Defender,
            Position::Goalkeeper,
        ] {
            assert!(league.players.iter().any(|p| p.position == pos));
        }
    }
}
