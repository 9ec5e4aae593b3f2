use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rand::{Rng, RngExt};

use lotto645_core::models::{DrawRecord, MAX_NUMBER, PICK_COUNT};
use lotto645_core::sampler::random_numbers;

/// Premier tirage du Lotto 6/45 (samedi).
pub const DEFAULT_START: &str = "2002-12-07";

/// Génère `count` tirages hebdomadaires à partir de `start`.
pub fn generate_demo_draws(
    count: usize,
    start: NaiveDate,
    rng: &mut impl Rng,
) -> Result<Vec<DrawRecord>> {
    let mut draws = Vec::with_capacity(count);
    for i in 0..count {
        let date = start
            .checked_add_days(Days::new(7 * i as u64))
            .with_context(|| format!("Date hors limites pour le tirage {}", i + 1))?;

        let main_numbers: [u8; PICK_COUNT] = random_numbers(rng);
        let bonus_number = loop {
            let n = rng.random_range(1..=MAX_NUMBER);
            if !main_numbers.contains(&n) {
                break n;
            }
        };

        draws.push(DrawRecord {
            draw_number: (i + 1) as u32,
            draw_date: date.format("%Y-%m-%d").to_string(),
            main_numbers,
            bonus_number,
        });
    }
    Ok(draws)
}

pub fn parse_start_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Format de date invalide: '{}' (attendu AAAA-MM-JJ)", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto645_core::models::in_universe;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_demo_draws_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = parse_start_date(DEFAULT_START).unwrap();
        let draws = generate_demo_draws(200, start, &mut rng).unwrap();
        assert_eq!(draws.len(), 200);
        for (i, draw) in draws.iter().enumerate() {
            assert_eq!(draw.draw_number as usize, i + 1);
            assert!(draw.main_numbers.iter().all(|&n| in_universe(n)));
            assert!(in_universe(draw.bonus_number));
            assert!(!draw.main_numbers.contains(&draw.bonus_number));
        }
    }

    #[test]
    fn test_demo_dates_weekly() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = parse_start_date("2023-01-07").unwrap();
        let draws = generate_demo_draws(3, start, &mut rng).unwrap();
        assert_eq!(draws[0].draw_date, "2023-01-07");
        assert_eq!(draws[1].draw_date, "2023-01-14");
        assert_eq!(draws[2].draw_date, "2023-01-21");
    }

    #[test]
    fn test_demo_deterministic() {
        let start = parse_start_date(DEFAULT_START).unwrap();
        let a = generate_demo_draws(10, start, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_demo_draws(10, start, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_start_date_invalid() {
        assert!(parse_start_date("07/12/2002").is_err());
    }
}
