use std::collections::BTreeMap;

use log::debug;
use serde::{Serialize, Serializer};

use crate::models::{DrawRecord, LOW_MAX, PICK_COUNT, in_universe};

/// Répartition d'un tirage en deux classes, affichée « a:b ».
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Split {
    pub first: u8,
    pub second: u8,
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.first, self.second)
    }
}

impl Serialize for Split {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn valid_numbers(numbers: &[u8; PICK_COUNT]) -> impl Iterator<Item = u8> + '_ {
    numbers.iter().copied().filter(|&n| in_universe(n))
}

/// Seuls les numéros 1-45 sont classés : la somme vaut 6 pour un tirage valide.
pub fn odd_even_split(numbers: &[u8; PICK_COUNT]) -> Split {
    let (odd, even) = valid_numbers(numbers).fold((0u8, 0u8), |(odd, even), n| {
        if n % 2 == 1 {
            (odd + 1, even)
        } else {
            (odd, even + 1)
        }
    });
    Split {
        first: odd,
        second: even,
    }
}

pub fn low_high_split(numbers: &[u8; PICK_COUNT]) -> Split {
    let (low, high) = valid_numbers(numbers).fold((0u8, 0u8), |(low, high), n| {
        if n <= LOW_MAX {
            (low + 1, high)
        } else {
            (low, high + 1)
        }
    });
    Split {
        first: low,
        second: high,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCount {
    pub pattern: Split,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternResult {
    pub total_draws: usize,
    /// (impairs:pairs), par fréquence décroissante.
    pub odd_even: Vec<PatternCount>,
    /// (bas:hauts), par fréquence décroissante.
    pub low_high: Vec<PatternCount>,
}

/// Agrège les motifs ; à égalité, l'ordre de première apparition est conservé.
fn aggregate(splits: impl Iterator<Item = Split>) -> Vec<PatternCount> {
    let mut buckets: Vec<PatternCount> = Vec::new();
    for split in splits {
        match buckets.iter_mut().find(|b| b.pattern == split) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(PatternCount {
                pattern: split,
                count: 1,
            }),
        }
    }
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

pub fn analyze_patterns(draws: &[DrawRecord]) -> PatternResult {
    debug!("Motifs calculés sur {} tirages", draws.len());
    PatternResult {
        total_draws: draws.len(),
        odd_even: aggregate(draws.iter().map(|d| odd_even_split(&d.main_numbers))),
        low_high: aggregate(draws.iter().map(|d| low_high_split(&d.main_numbers))),
    }
}

// ── Numéros consécutifs ──

/// Nombre de paires adjacentes (après tri) d'écart 1 : une suite de trois
/// numéros compte pour 2.
pub fn count_consecutive(numbers: &[u8; PICK_COUNT]) -> u8 {
    let mut sorted: Vec<u8> = valid_numbers(numbers).collect();
    sorted.sort_unstable();
    sorted.windows(2).filter(|w| w[1] - w[0] == 1).count() as u8
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsecutiveResult {
    pub total_draws: usize,
    /// Nombre de paires consécutives → nombre de tirages.
    pub distribution: BTreeMap<u8, u32>,
    pub has_consecutive: u32,
    /// Pourcentage arrondi à une décimale.
    pub percentage: f64,
}

pub fn analyze_consecutive(draws: &[DrawRecord]) -> ConsecutiveResult {
    let mut distribution = BTreeMap::new();
    let mut has_consecutive = 0u32;

    for draw in draws {
        let pairs = count_consecutive(&draw.main_numbers);
        *distribution.entry(pairs).or_insert(0) += 1;
        if pairs > 0 {
            has_consecutive += 1;
        }
    }

    let percentage = if draws.is_empty() {
        0.0
    } else {
        round_one_decimal(has_consecutive as f64 / draws.len() as f64 * 100.0)
    };
    debug!("Consécutifs : {}/{} tirages", has_consecutive, draws.len());

    ConsecutiveResult {
        total_draws: draws.len(),
        distribution,
        has_consecutive,
        percentage,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ── Chiffre des unités ──

#[derive(Debug, Clone, Serialize)]
pub struct EndingDigitResult {
    /// Index = chiffre 0-9.
    pub counts: [u32; 10],
}

pub fn analyze_ending_digits(draws: &[DrawRecord]) -> EndingDigitResult {
    let mut counts = [0u32; 10];
    for draw in draws {
        for &n in &draw.main_numbers {
            if in_universe(n) {
                counts[(n % 10) as usize] += 1;
            }
        }
    }
    EndingDigitResult { counts }
}
