use std::collections::BTreeSet;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use squad_scout::fake_data::{demo_league, demo_players};
use squad_scout::ingest;
use squad_scout::keywords::{KeywordCategory, KeywordExtractor};
use squad_scout::needs::NeedsAnalyzer;
use squad_scout::position::Position;
use squad_scout::recommender::Recommender;
use squad_scout::scorer::{ScoringWeights, rank_players};
use squad_scout::snapshot::DatasetHandle;
use squad_scout::table::RawTable;

fn bench_rank_players(c: &mut Criterion) {
    let players = demo_players(11, 5_000);
    let categories: BTreeSet<KeywordCategory> = KeywordCategory::ALL.into_iter().collect();
    let weights = ScoringWeights::default();
    c.bench_function("rank_players_5k", |b| {
        b.iter(|| {
            let ranked = rank_players(
                black_box(&players),
                Some(Position::Forward),
                &categories,
                &weights,
            );
            black_box(ranked.len());
        })
    });
}

fn bench_recommend(c: &mut Criterion) {
    let league = demo_league(3);
    let recommender = Recommender::new(Arc::new(DatasetHandle::new(league.players, league.teams)));
    c.bench_function("recommend_zh_request", |b| {
        b.iter(|| {
            let response =
                recommender.recommend(Some(Position::Forward), black_box("需要更多进球和射门效率"));
            black_box(response.recommendations.len());
        })
    });
}

fn bench_keyword_extract(c: &mut Criterion) {
    let extractor = KeywordExtractor::default();
    c.bench_function("keyword_extract", |b| {
        b.iter(|| {
            let cats = extractor.categories(black_box("寻找一名防守稳健、传球成功率高的中场"));
            black_box(cats.len());
        })
    });
}

fn bench_needs_analysis(c: &mut Criterion) {
    let teams: Vec<_> = (0..50).flat_map(|seed| demo_league(seed).teams).collect();
    c.bench_function("needs_analysis_400_teams", |b| {
        b.iter(|| {
            let analyzer = NeedsAnalyzer::new(black_box(&teams));
            black_box(analyzer.needs().len());
        })
    });
}

fn bench_player_ingest(c: &mut Criterion) {
    c.bench_function("player_ingest_fixture", |b| {
        b.iter(|| {
            let table = RawTable::from_json_records(black_box(PLAYERS_JSON)).unwrap();
            let outcome = ingest::players_from_table(table).unwrap();
            black_box(outcome.records.len());
        })
    });
}

criterion_group!(
    perf,
    bench_rank_players,
    bench_recommend,
    bench_keyword_extract,
    bench_needs_analysis,
    bench_player_ingest
);
criterion_main!(perf);

static PLAYERS_JSON: &str = include_str!("../tests/fixtures/players.json");
