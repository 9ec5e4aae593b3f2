pub mod cycle;
pub mod frequency;
pub mod pattern;

use crate::models::{DrawRecord, MAX_NUMBER, NumberCount, in_universe};

/// Taille des listes « chaudes » et « froides ».
pub const HOT_COLD_SIZE: usize = 10;

/// Compte les apparitions de chaque numéro (index = numéro - 1), bonus exclu.
/// Les numéros hors univers sont ignorés.
pub fn count_numbers(draws: &[DrawRecord]) -> Vec<u32> {
    let mut counts = vec![0u32; MAX_NUMBER as usize];
    for draw in draws {
        for &n in &draw.main_numbers {
            if in_universe(n) {
                counts[(n - 1) as usize] += 1;
            }
        }
    }
    counts
}

/// Classement par fréquence décroissante ; tri stable, donc à égalité
/// le plus petit numéro reste devant.
pub fn rank_by_count(counts: &[u32]) -> Vec<NumberCount> {
    let mut ranked: Vec<NumberCount> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| NumberCount {
            number: (i + 1) as u8,
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

pub fn hot_numbers(ranked: &[NumberCount]) -> Vec<NumberCount> {
    ranked.iter().take(HOT_COLD_SIZE).copied().collect()
}

/// Les 10 derniers du classement, le moins fréquent en tête.
pub fn cold_numbers(ranked: &[NumberCount]) -> Vec<NumberCount> {
    ranked.iter().rev().take(HOT_COLD_SIZE).copied().collect()
}

pub(crate) fn count_at(counts: &[u32], number: u8) -> u32 {
    if in_universe(number) {
        counts[(number - 1) as usize]
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{make_draw, make_test_draws};

    #[test]
    fn test_count_numbers_covers_universe() {
        let counts = count_numbers(&[]);
        assert_eq!(counts.len(), 45);
        assert!(counts.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_count_numbers_ignores_bonus_and_out_of_range() {
        let mut draw = make_draw(1, [1, 2, 3, 4, 5, 6]);
        draw.bonus_number = 45;
        let mut bad = make_draw(2, [1, 2, 3, 4, 5, 99]);
        bad.bonus_number = 44;
        let counts = count_numbers(&[draw, bad]);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[5], 1);
        assert_eq!(counts[43], 0);
        assert_eq!(counts[44], 0);
        assert_eq!(counts.iter().sum::<u32>(), 11);
    }

    #[test]
    fn test_rank_stable_ties() {
        let mut counts = vec![0u32; 45];
        counts[9] = 3;
        counts[4] = 3;
        counts[30] = 5;
        let ranked = rank_by_count(&counts);
        assert_eq!((ranked[0].number, ranked[0].count), (31, 5));
        assert_eq!(ranked[1].number, 5);
        assert_eq!(ranked[2].number, 10);
        // Puis les zéros dans l'ordre croissant
        assert_eq!(ranked[3].number, 1);
        assert_eq!(ranked[44].number, 45);
    }

    #[test]
    fn test_cold_is_reversed_bottom() {
        let counts = count_numbers(&make_test_draws(37));
        let ranked = rank_by_count(&counts);
        let cold = cold_numbers(&ranked);
        let mut bottom: Vec<NumberCount> = ranked[35..].to_vec();
        bottom.reverse();
        assert_eq!(cold, bottom);
        assert_eq!(hot_numbers(&ranked), ranked[..10].to_vec());
    }
}
