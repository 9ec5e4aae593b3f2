use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use super::HOT_COLD_SIZE;
use crate::models::{DrawRecord, MAX_NUMBER, in_universe};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleEntry {
    pub number: u8,
    pub average_cycle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapEntry {
    pub number: u8,
    pub gap: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub total_draws: usize,
    /// Positions (1-based, rang dans la séquence) de chaque numéro ; index = numéro - 1.
    pub appearances: Vec<Vec<usize>>,
    /// Écart moyen entre apparitions, uniquement pour les numéros vus au moins deux fois.
    pub average_cycles: BTreeMap<u8, f64>,
    /// Tirages écoulés depuis la dernière apparition ; index = numéro - 1.
    pub current_gaps: Vec<usize>,
    pub sorted_by_cycle: Vec<CycleEntry>,
    pub sorted_by_gap: Vec<GapEntry>,
    pub top_frequent: Vec<CycleEntry>,
    pub top_gap: Vec<GapEntry>,
}

impl CycleResult {
    pub fn average_cycle(&self, number: u8) -> Option<f64> {
        self.average_cycles.get(&number).copied()
    }

    pub fn current_gap(&self, number: u8) -> Option<usize> {
        in_universe(number).then(|| self.current_gaps[(number - 1) as usize])
    }

    pub fn last_appearance(&self, number: u8) -> Option<usize> {
        if !in_universe(number) {
            return None;
        }
        self.appearances[(number - 1) as usize].last().copied()
    }
}

pub fn analyze_cycles(draws: &[DrawRecord]) -> CycleResult {
    let size = MAX_NUMBER as usize;
    let total = draws.len();

    let mut appearances: Vec<Vec<usize>> = vec![Vec::new(); size];
    for (i, draw) in draws.iter().enumerate() {
        let position = i + 1;
        for &n in &draw.main_numbers {
            if !in_universe(n) {
                continue;
            }
            let positions = &mut appearances[(n - 1) as usize];
            // Un doublon dans un tirage non validé ne crée pas d'écart nul
            if positions.last() != Some(&position) {
                positions.push(position);
            }
        }
    }

    let mut average_cycles = BTreeMap::new();
    for (i, positions) in appearances.iter().enumerate() {
        if positions.len() < 2 {
            continue;
        }
        let gaps: Vec<usize> = positions.windows(2).map(|w| w[1] - w[0]).collect();
        let mean = gaps.iter().sum::<usize>() as f64 / gaps.len() as f64;
        average_cycles.insert((i + 1) as u8, mean);
    }

    let current_gaps: Vec<usize> = appearances
        .iter()
        .map(|positions| total - positions.last().copied().unwrap_or(0))
        .collect();

    let mut sorted_by_cycle: Vec<CycleEntry> = average_cycles
        .iter()
        .map(|(&number, &average_cycle)| CycleEntry {
            number,
            average_cycle,
        })
        .collect();
    sorted_by_cycle.sort_by(|a, b| {
        a.average_cycle
            .partial_cmp(&b.average_cycle)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut sorted_by_gap: Vec<GapEntry> = current_gaps
        .iter()
        .enumerate()
        .map(|(i, &gap)| GapEntry {
            number: (i + 1) as u8,
            gap,
        })
        .collect();
    sorted_by_gap.sort_by(|a, b| b.gap.cmp(&a.gap));

    debug!(
        "Cycles : {} numéros avec cycle moyen sur {} tirages",
        sorted_by_cycle.len(),
        total
    );

    CycleResult {
        total_draws: total,
        top_frequent: sorted_by_cycle.iter().take(HOT_COLD_SIZE).copied().collect(),
        top_gap: sorted_by_gap.iter().take(HOT_COLD_SIZE).copied().collect(),
        appearances,
        average_cycles,
        current_gaps,
        sorted_by_cycle,
        sorted_by_gap,
    }
}
