use log::debug;
use serde::Serialize;

use super::{cold_numbers, count_at, count_numbers, hot_numbers, rank_by_count};
use crate::models::{DrawRecord, MAX_NUMBER, NumberCount, PICK_COUNT};

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyResult {
    pub total_draws: usize,
    /// Index = numéro - 1.
    pub counts: Vec<u32>,
    pub ranked: Vec<NumberCount>,
    pub hot_numbers: Vec<NumberCount>,
    pub cold_numbers: Vec<NumberCount>,
    /// Espérance sous loi uniforme : tirages × 6 / 45.
    pub expected_frequency: f64,
}

impl FrequencyResult {
    pub fn count(&self, number: u8) -> u32 {
        count_at(&self.counts, number)
    }
}

pub fn analyze_frequency(draws: &[DrawRecord]) -> FrequencyResult {
    let counts = count_numbers(draws);
    let ranked = rank_by_count(&counts);
    debug!("Fréquences calculées sur {} tirages", draws.len());

    FrequencyResult {
        total_draws: draws.len(),
        hot_numbers: hot_numbers(&ranked),
        cold_numbers: cold_numbers(&ranked),
        expected_frequency: (draws.len() * PICK_COUNT) as f64 / MAX_NUMBER as f64,
        counts,
        ranked,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentTrendResult {
    /// Fenêtre demandée (0 = tout l'historique).
    pub window: usize,
    pub draws_considered: usize,
    pub counts: Vec<u32>,
    pub ranked: Vec<NumberCount>,
    pub hot_numbers: Vec<NumberCount>,
    pub cold_numbers: Vec<NumberCount>,
    /// Numéros absents de la fenêtre, ordre croissant.
    pub not_appeared: Vec<u8>,
}

impl RecentTrendResult {
    pub fn count(&self, number: u8) -> u32 {
        count_at(&self.counts, number)
    }
}

/// Les `window` derniers tirages ; tout l'historique si `window` vaut 0
/// ou dépasse la taille de la séquence.
pub fn recent_slice(draws: &[DrawRecord], window: usize) -> &[DrawRecord] {
    if window == 0 || window >= draws.len() {
        draws
    } else {
        &draws[draws.len() - window..]
    }
}

pub fn analyze_recent_trend(draws: &[DrawRecord], window: usize) -> RecentTrendResult {
    let recent = recent_slice(draws, window);
    let counts = count_numbers(recent);
    let ranked = rank_by_count(&counts);
    let not_appeared = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == 0)
        .map(|(i, _)| (i + 1) as u8)
        .collect();
    debug!("Tendance récente : fenêtre {} → {} tirages", window, recent.len());

    RecentTrendResult {
        window,
        draws_considered: recent.len(),
        hot_numbers: hot_numbers(&ranked),
        cold_numbers: cold_numbers(&ranked),
        not_appeared,
        counts,
        ranked,
    }
}
