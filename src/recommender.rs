use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::keywords::{KeywordCategory, KeywordExtractor};
use crate::position::Position;
use crate::scorer::{self, Recommendation, ScoringWeights};
use crate::snapshot::{Dataset, DatasetHandle};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub keywords: BTreeSet<KeywordCategory>,
}

#[derive(Debug, Clone)]
pub struct Recommender {
    data: Arc<DatasetHandle>,
    extractor: KeywordExtractor,
    weights: ScoringWeights,
    top_n: usize,
}

impl Recommender {
    pub fn new(data: Arc<DatasetHandle>) -> Self {
        Self {
            data,
            extractor: KeywordExtractor::default(),
            weights: ScoringWeights::default(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn handle(&self) -> &Arc<DatasetHandle> {
        &self.data
    }

    pub fn extract_keywords(&self, requirements: &str) -> BTreeSet<KeywordCategory> {
        self.extractor.categories(requirements)
    }

    pub fn get_recommendations(
        &self,
        position: Option<Position>,
        requirements: &str,
    ) -> Vec<Recommendation> {
        let categories = self.extract_keywords(requirements);
        let dataset = self.data.current();
        self.rank(&dataset, position, &categories)
    }

    pub fn recommend(&self, position: Option<Position>, requirements: &str) -> RecommendationResponse {
        let keywords = self.extract_keywords(requirements);
        let dataset = self.data.current();
        RecommendationResponse {
            recommendations: self.rank(&dataset, position, &keywords),
            keywords,
        }
    }

    fn rank(
        &self,
        dataset: &Dataset,
        position: Option<Position>,
        categories: &BTreeSet<KeywordCategory>,
    ) -> Vec<Recommendation> {
        debug!(
            version = dataset.version,
            ?position,
            ?categories,
            "scoring players"
        );
        let ranked = scorer::rank_players(&dataset.players, position, categories, &self.weights);
        debug!(
            matched = ranked.len(),
            top = ?ranked.iter().take(3).map(|s| s.score).collect::<Vec<_>>(),
            "ranked candidates"
        );
        scorer::build_recommendations(&ranked, &dataset.averages, self.top_n)
    }
}
