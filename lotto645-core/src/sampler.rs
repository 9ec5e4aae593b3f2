use log::debug;
use rand::{Rng, RngExt};
use serde::Serialize;

use crate::analysis::cycle::CycleResult;
use crate::analysis::frequency::{FrequencyResult, RecentTrendResult};
use crate::config::{RecommendationConfig, Strategy};
use crate::error::Result;
use crate::models::{MAX_NUMBER, PICK_COUNT};

/// Type de grille, pour la couleur d'affichage uniquement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Hot,
    Cold,
    Balanced,
    Mixed,
    Random,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Hot => write!(f, "hot"),
            RecommendationKind::Cold => write!(f, "cold"),
            RecommendationKind::Balanced => write!(f, "balanced"),
            RecommendationKind::Mixed => write!(f, "mixed"),
            RecommendationKind::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub label: String,
    pub kind: RecommendationKind,
    /// Toujours triés par ordre croissant.
    pub numbers: [u8; PICK_COUNT],
}

impl Recommendation {
    fn new(label: impl Into<String>, kind: RecommendationKind, numbers: &[u8]) -> Self {
        let mut sorted = [0u8; PICK_COUNT];
        sorted.copy_from_slice(&numbers[..PICK_COUNT]);
        sorted.sort_unstable();
        Self {
            label: label.into(),
            kind,
            numbers: sorted,
        }
    }
}

/// Compose les grilles heuristiques puis complète avec des grilles aléatoires
/// jusqu'à `config.count`.
pub fn generate_recommendations(
    frequency: &FrequencyResult,
    trend: &RecentTrendResult,
    cycles: &CycleResult,
    config: &RecommendationConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Recommendation>> {
    config.validate()?;
    let strategy = config.strategy;
    let mut sets = Vec::with_capacity(config.count);

    if strategy.includes(Strategy::Frequency) {
        sets.push(hot_set(frequency));
    }
    if strategy.includes(Strategy::Gap) {
        sets.push(due_set(cycles));
    }
    if strategy.includes(Strategy::Balanced) {
        sets.push(balanced_set(frequency));
    }
    if strategy == Strategy::Mixed {
        sets.push(mixed_set(frequency, trend, cycles));
    }

    let needed = config.count.saturating_sub(sets.len());
    let random = random_sets(&sets, needed, rng);
    sets.extend(random);
    sets.truncate(config.count);

    debug!("{} grilles générées (stratégie {})", sets.len(), strategy);
    Ok(sets)
}

pub fn hot_set(frequency: &FrequencyResult) -> Recommendation {
    let numbers: Vec<u8> = frequency
        .hot_numbers
        .iter()
        .take(PICK_COUNT)
        .map(|c| c.number)
        .collect();
    Recommendation::new("Numéros chauds", RecommendationKind::Hot, &numbers)
}

pub fn due_set(cycles: &CycleResult) -> Recommendation {
    let numbers: Vec<u8> = cycles.top_gap.iter().take(PICK_COUNT).map(|g| g.number).collect();
    Recommendation::new("Numéros en retard", RecommendationKind::Cold, &numbers)
}

/// Trois impairs et trois pairs parmi les plus fréquents.
pub fn balanced_set(frequency: &FrequencyResult) -> Recommendation {
    let half = PICK_COUNT / 2;
    let odd = frequency.ranked.iter().filter(|c| c.number % 2 == 1).take(half);
    let even = frequency.ranked.iter().filter(|c| c.number % 2 == 0).take(half);
    let numbers: Vec<u8> = odd.chain(even).map(|c| c.number).collect();
    Recommendation::new("Équilibre pair/impair", RecommendationKind::Balanced, &numbers)
}

/// Deux chauds, les deux premiers en retard s'ils ne sont pas déjà pris,
/// puis complément par la tendance récente.
pub fn mixed_set(
    frequency: &FrequencyResult,
    trend: &RecentTrendResult,
    cycles: &CycleResult,
) -> Recommendation {
    let mut numbers: Vec<u8> = frequency.hot_numbers.iter().take(2).map(|c| c.number).collect();

    for due in cycles.top_gap.iter().take(2) {
        if !numbers.contains(&due.number) {
            numbers.push(due.number);
        }
    }

    let fill = trend
        .hot_numbers
        .iter()
        .chain(frequency.ranked.iter())
        .map(|c| c.number);
    for n in fill {
        if numbers.len() >= PICK_COUNT {
            break;
        }
        if !numbers.contains(&n) {
            numbers.push(n);
        }
    }

    Recommendation::new("Mixte", RecommendationKind::Mixed, &numbers)
}

/// Six numéros distincts tirés uniformément dans 1-45, triés.
pub fn random_numbers(rng: &mut impl Rng) -> [u8; PICK_COUNT] {
    let mut numbers: Vec<u8> = Vec::with_capacity(PICK_COUNT);
    while numbers.len() < PICK_COUNT {
        let n = rng.random_range(1..=MAX_NUMBER);
        if !numbers.contains(&n) {
            numbers.push(n);
        }
    }
    let mut sorted = [0u8; PICK_COUNT];
    sorted.copy_from_slice(&numbers);
    sorted.sort_unstable();
    sorted
}

/// Grilles aléatoires ; la numérotation des libellés suit les grilles existantes.
pub fn random_sets(
    existing: &[Recommendation],
    needed: usize,
    rng: &mut impl Rng,
) -> Vec<Recommendation> {
    let offset = existing
        .iter()
        .filter(|r| r.kind == RecommendationKind::Random)
        .count();
    (0..needed)
        .map(|i| {
            let numbers = random_numbers(rng);
            Recommendation::new(
                format!("Aléatoire #{}", offset + i + 1),
                RecommendationKind::Random,
                &numbers,
            )
        })
        .collect()
}
