use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::cycle::{CycleResult, analyze_cycles};
use crate::analysis::frequency::{
    FrequencyResult, RecentTrendResult, analyze_frequency, analyze_recent_trend,
};
use crate::analysis::pattern::{
    ConsecutiveResult, EndingDigitResult, PatternResult, analyze_consecutive,
    analyze_ending_digits, analyze_patterns,
};
use crate::config::{EngineConfig, FullAnalysisOptions, RecommendationConfig};
use crate::error::{EngineError, Result};
use crate::import::convert_records;
use crate::models::DrawRecord;
use crate::sampler::{self, Recommendation};

/// Derniers résultats calculés, un emplacement par type d'analyse.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    pub frequency: Option<FrequencyResult>,
    pub recent_trend: Option<RecentTrendResult>,
    pub patterns: Option<PatternResult>,
    pub consecutive: Option<ConsecutiveResult>,
    pub ending_digits: Option<EndingDigitResult>,
    pub cycles: Option<CycleResult>,
    pub recommendations: Option<Vec<Recommendation>>,
}

impl ResultCache {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_none()
            && self.recent_trend.is_none()
            && self.patterns.is_none()
            && self.consecutive.is_none()
            && self.ending_digits.is_none()
            && self.cycles.is_none()
            && self.recommendations.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_draws: usize,
    pub first_date: String,
    pub last_date: String,
    pub latest_draw_number: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FullAnalysis {
    pub frequency: FrequencyResult,
    pub recent_trend: RecentTrendResult,
    pub patterns: PatternResult,
    pub consecutive: ConsecutiveResult,
    pub ending_digits: EndingDigitResult,
    pub cycles: CycleResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
}

/// Moteur d'analyse : possède la séquence de tirages et le cache des résultats.
///
/// Chaque analyse est recalculée à l'appel puis remplace l'entrée du cache ;
/// un chargement réussi remplace la séquence et vide le cache en une seule étape.
#[derive(Debug, Default)]
pub struct AnalysisEngine {
    config: EngineConfig,
    draws: Vec<DrawRecord>,
    cache: ResultCache,
}

impl AnalysisEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            draws: Vec::new(),
            cache: ResultCache::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn has_data(&self) -> bool {
        !self.draws.is_empty()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Charge des enregistrements bruts (`draw_no`, `draw_date`, `num1`..`num6`, `bonus`).
    /// En cas d'erreur l'état précédent est conservé.
    pub fn load(&mut self, records: &[Value]) -> Result<usize> {
        let draws = convert_records(records, &self.config)?;
        Ok(self.replace(draws))
    }

    /// Chargement de tirages déjà typés, sans validation par échantillon.
    pub fn load_draws(&mut self, draws: Vec<DrawRecord>) -> Result<usize> {
        if draws.is_empty() {
            return Err(EngineError::EmptyData);
        }
        Ok(self.replace(draws))
    }

    fn replace(&mut self, draws: Vec<DrawRecord>) -> usize {
        self.draws = draws;
        self.cache.clear();
        info!("{} tirages chargés", self.draws.len());
        self.draws.len()
    }

    pub fn analyze_frequency(&mut self) -> &FrequencyResult {
        self.cache.frequency.insert(analyze_frequency(&self.draws))
    }

    pub fn analyze_recent_trend(&mut self, window: usize) -> &RecentTrendResult {
        self.cache
            .recent_trend
            .insert(analyze_recent_trend(&self.draws, window))
    }

    pub fn analyze_patterns(&mut self) -> &PatternResult {
        self.cache.patterns.insert(analyze_patterns(&self.draws))
    }

    pub fn analyze_consecutive(&mut self) -> &ConsecutiveResult {
        self.cache.consecutive.insert(analyze_consecutive(&self.draws))
    }

    pub fn analyze_ending_digits(&mut self) -> &EndingDigitResult {
        self.cache.ending_digits.insert(analyze_ending_digits(&self.draws))
    }

    pub fn analyze_cycles(&mut self) -> &CycleResult {
        self.cache.cycles.insert(analyze_cycles(&self.draws))
    }

    /// Recalcule fréquences, tendance et cycles puis compose les grilles.
    pub fn generate_recommendations(
        &mut self,
        config: &RecommendationConfig,
        rng: &mut impl Rng,
    ) -> Result<&[Recommendation]> {
        config.validate()?;
        let frequency = self.analyze_frequency().clone();
        let trend = self.analyze_recent_trend(config.recent_window).clone();
        let cycles = self.analyze_cycles().clone();

        let sets = sampler::generate_recommendations(&frequency, &trend, &cycles, config, rng)?;
        Ok(self.cache.recommendations.insert(sets).as_slice())
    }

    /// Comme `generate_recommendations`, avec un générateur issu de `config.seed`
    /// (ou de l'entropie système à défaut).
    pub fn generate_recommendations_seeded(
        &mut self,
        config: &RecommendationConfig,
    ) -> Result<&[Recommendation]> {
        let mut rng: StdRng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.generate_recommendations(config, &mut rng)
    }

    pub fn run_full_analysis(
        &mut self,
        options: &FullAnalysisOptions,
        rng: &mut impl Rng,
    ) -> Result<FullAnalysis> {
        if let Some(config) = &options.recommendations {
            config.validate()?;
        }
        debug!("Analyse complète sur {} tirages", self.draws.len());

        let frequency = self.analyze_frequency().clone();
        let recent_trend = self.analyze_recent_trend(options.recent_window).clone();
        let patterns = self.analyze_patterns().clone();
        let consecutive = self.analyze_consecutive().clone();
        let ending_digits = self.analyze_ending_digits().clone();
        let cycles = self.analyze_cycles().clone();

        let recommendations = match &options.recommendations {
            Some(config) => {
                let sets = sampler::generate_recommendations(
                    &frequency,
                    &self.recommendation_trend(config, &recent_trend),
                    &cycles,
                    config,
                    rng,
                )?;
                Some(self.cache.recommendations.insert(sets).clone())
            }
            None => None,
        };

        Ok(FullAnalysis {
            frequency,
            recent_trend,
            patterns,
            consecutive,
            ending_digits,
            cycles,
            recommendations,
        })
    }

    /// La tendance des recommandations peut utiliser une autre fenêtre que
    /// celle de l'analyse complète.
    fn recommendation_trend(
        &self,
        config: &RecommendationConfig,
        computed: &RecentTrendResult,
    ) -> RecentTrendResult {
        if config.recent_window == computed.window {
            computed.clone()
        } else {
            analyze_recent_trend(&self.draws, config.recent_window)
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        let first = self.draws.first()?;
        let last = self.draws.last()?;
        Some(Summary {
            total_draws: self.draws.len(),
            first_date: first.draw_date.clone(),
            last_date: last.draw_date.clone(),
            latest_draw_number: last.draw_number,
        })
    }

    pub fn require_summary(&self) -> Result<Summary> {
        self.summary().ok_or(EngineError::EmptyDataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;
    use crate::models::{make_draw, make_test_draws};
    use serde_json::json;

    fn raw_records(draws: &[DrawRecord]) -> Vec<Value> {
        draws.iter().map(DrawRecord::to_raw).collect()
    }

    fn loaded(n: usize) -> AnalysisEngine {
        let mut engine = AnalysisEngine::default();
        engine.load(&raw_records(&make_test_draws(n))).unwrap();
        engine
    }

    #[test]
    fn test_load_single_record_scenario() {
        let mut engine = AnalysisEngine::default();
        let records = vec![json!({
            "draw_no": 1, "draw_date": "2023-01-01",
            "num1": 1, "num2": 2, "num3": 3, "num4": 4, "num5": 5, "num6": 6,
            "bonus": 7,
        })];
        assert_eq!(engine.load(&records).unwrap(), 1);

        let result = engine.analyze_frequency();
        for n in 1..=6 {
            assert_eq!(result.count(n), 1);
        }
        for n in 7..=45 {
            assert_eq!(result.count(n), 0);
        }
        assert!((result.expected_frequency - 0.1333).abs() < 1e-3);
    }

    #[test]
    fn test_load_empty_keeps_state() {
        let mut engine = AnalysisEngine::default();
        assert!(matches!(engine.load(&[]), Err(EngineError::EmptyData)));
        assert!(!engine.has_data());
        assert!(engine.summary().is_none());

        let mut engine = loaded(10);
        engine.analyze_frequency();
        assert!(matches!(engine.load(&[]), Err(EngineError::EmptyData)));
        assert_eq!(engine.draws().len(), 10);
        assert!(engine.cache().frequency.is_some());
    }

    #[test]
    fn test_load_invalid_keeps_state() {
        let mut engine = loaded(10);
        engine.analyze_cycles();
        let mut records = raw_records(&make_test_draws(3));
        records[1]["num3"] = json!(46);
        assert!(matches!(
            engine.load(&records),
            Err(EngineError::Validation { index: 1, .. })
        ));
        assert_eq!(engine.draws().len(), 10);
        assert!(engine.cache().cycles.is_some());
    }

    #[test]
    fn test_load_unreadable_keeps_state() {
        let config = EngineConfig {
            validate_on_load: false,
            ..Default::default()
        };
        let mut engine = AnalysisEngine::new(config);
        engine.load(&raw_records(&make_test_draws(3))).unwrap();
        engine.analyze_frequency();

        assert!(matches!(
            engine.load(&[json!("x")]),
            Err(EngineError::EmptyData)
        ));
        assert_eq!(engine.draws(), make_test_draws(3).as_slice());
        assert!(engine.cache().frequency.is_some());
    }

    #[test]
    fn test_load_clears_cache() {
        let mut engine = loaded(10);
        engine.analyze_frequency();
        engine.analyze_patterns();
        let config = RecommendationConfig {
            seed: Some(1),
            ..Default::default()
        };
        engine.generate_recommendations_seeded(&config).unwrap();
        assert!(!engine.cache().is_empty());

        engine.load(&raw_records(&make_test_draws(4))).unwrap();
        assert!(engine.cache().is_empty());
        assert_eq!(engine.draws().len(), 4);
    }

    #[test]
    fn test_validation_disabled() {
        let config = EngineConfig {
            validate_on_load: false,
            ..Default::default()
        };
        let mut engine = AnalysisEngine::new(config);
        let mut records = raw_records(&make_test_draws(3));
        records[0]["num1"] = json!(99);
        assert_eq!(engine.load(&records).unwrap(), 3);
        // Le numéro hors univers est ignoré par les compteurs
        let total: u32 = engine.analyze_frequency().counts.iter().sum();
        assert_eq!(total, 17);
    }

    #[test]
    fn test_out_of_universe_ignored_by_every_analysis() {
        let config = EngineConfig {
            validate_on_load: false,
            ..Default::default()
        };
        let mut engine = AnalysisEngine::new(config);
        let mut draw = make_draw(1, [1, 2, 4, 6, 8, 10]).to_raw();
        draw["num1"] = json!(0);
        draw["num6"] = json!(99);
        engine.load(&[draw]).unwrap();

        let frequency_total: u32 = engine.analyze_frequency().counts.iter().sum();
        assert_eq!(frequency_total, 4);

        let patterns = engine.analyze_patterns();
        assert_eq!(patterns.odd_even[0].pattern.to_string(), "0:4");
        assert_eq!(patterns.low_high[0].pattern.to_string(), "4:0");

        // 0 et 1 ne forment pas une paire consécutive
        engine
            .load(&[make_draw(2, [0, 1, 10, 11, 30, 41]).to_raw()])
            .unwrap();
        let consecutive = engine.analyze_consecutive();
        assert_eq!(consecutive.has_consecutive, 1);
        assert_eq!(consecutive.distribution.get(&1), Some(&1));
    }

    #[test]
    fn test_analyses_cached_by_kind() {
        let mut engine = loaded(30);
        let trend_window = engine.analyze_recent_trend(5).window;
        assert_eq!(trend_window, 5);
        engine.analyze_recent_trend(10);
        assert_eq!(engine.cache().recent_trend.as_ref().unwrap().window, 10);
        assert!(engine.cache().frequency.is_none());
    }

    #[test]
    fn test_empty_engine_degrades_gracefully() {
        let mut engine = AnalysisEngine::default();
        assert_eq!(engine.analyze_frequency().counts, vec![0; 45]);
        assert_eq!(engine.analyze_recent_trend(10).not_appeared.len(), 45);
        assert!(engine.analyze_patterns().odd_even.is_empty());
        assert_eq!(engine.analyze_consecutive().percentage, 0.0);
        assert_eq!(engine.analyze_ending_digits().counts, [0; 10]);
        assert!(engine.analyze_cycles().sorted_by_cycle.is_empty());
        assert!(engine.summary().is_none());
        assert!(matches!(
            engine.require_summary(),
            Err(EngineError::EmptyDataset)
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let sets = engine
            .generate_recommendations(&RecommendationConfig::default(), &mut rng)
            .unwrap();
        assert_eq!(sets.len(), 5);
    }

    #[test]
    fn test_cycle_scenario_number_seven() {
        let mut engine = AnalysisEngine::default();
        engine
            .load_draws(vec![
                make_draw(1, [7, 1, 2, 3, 4, 5]),
                make_draw(2, [8, 7, 9, 10, 11, 12]),
            ])
            .unwrap();
        let cycles = engine.analyze_cycles();
        assert_eq!(cycles.average_cycle(7), Some(1.0));
        assert_eq!(cycles.current_gap(7), Some(0));
    }

    #[test]
    fn test_balanced_scenario() {
        let mut engine = loaded(25);
        let mut rng = StdRng::seed_from_u64(11);
        let config = RecommendationConfig {
            count: 1,
            strategy: Strategy::Balanced,
            ..Default::default()
        };
        let sets = engine.generate_recommendations(&config, &mut rng).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].numbers.iter().filter(|&&n| n % 2 == 1).count(), 3);
        assert_eq!(sets[0].numbers.iter().filter(|&&n| n % 2 == 0).count(), 3);
    }

    #[test]
    fn test_seeded_recommendations_reproducible() {
        let config = RecommendationConfig {
            count: 8,
            seed: Some(2024),
            ..Default::default()
        };
        let a = loaded(40)
            .generate_recommendations_seeded(&config)
            .unwrap()
            .to_vec();
        let b = loaded(40)
            .generate_recommendations_seeded(&config)
            .unwrap()
            .to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary() {
        let engine = loaded(12);
        let summary = engine.summary().unwrap();
        let draws = make_test_draws(12);
        assert_eq!(summary.total_draws, 12);
        assert_eq!(summary.first_date, draws[0].draw_date);
        assert_eq!(summary.last_date, draws[11].draw_date);
        assert_eq!(summary.latest_draw_number, 12);
    }

    #[test]
    fn test_full_analysis() {
        let mut engine = loaded(50);
        let mut rng = StdRng::seed_from_u64(3);
        let options = FullAnalysisOptions {
            recent_window: 10,
            recommendations: Some(RecommendationConfig {
                count: 6,
                ..Default::default()
            }),
        };
        let full = engine.run_full_analysis(&options, &mut rng).unwrap();
        assert_eq!(full.frequency.total_draws, 50);
        assert_eq!(full.recent_trend.draws_considered, 10);
        assert_eq!(full.recommendations.as_ref().map(Vec::len), Some(6));
        assert!(engine.cache().ending_digits.is_some());
        assert!(engine.cache().recommendations.is_some());

        let json = serde_json::to_value(&full).unwrap();
        assert!(json.get("cycles").is_some());
        assert!(json.get("recommendations").is_some());

        let full = engine
            .run_full_analysis(&FullAnalysisOptions::default(), &mut rng)
            .unwrap();
        assert!(full.recommendations.is_none());
        let json = serde_json::to_value(&full).unwrap();
        assert!(json.get("recommendations").is_none());
    }

    #[test]
    fn test_full_analysis_rejects_bad_config_before_work() {
        let mut engine = loaded(5);
        let mut rng = StdRng::seed_from_u64(0);
        let options = FullAnalysisOptions {
            recent_window: 0,
            recommendations: Some(RecommendationConfig {
                count: 0,
                ..Default::default()
            }),
        };
        assert!(engine.run_full_analysis(&options, &mut rng).is_err());
        assert!(engine.cache().is_empty());
    }
}
