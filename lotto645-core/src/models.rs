use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Plus grand numéro tirable (univers 1-45).
pub const MAX_NUMBER: u8 = 45;
/// Nombre de numéros principaux par tirage.
pub const PICK_COUNT: usize = 6;
/// Un numéro ≤ 22 est « bas », au-delà il est « haut ».
pub const LOW_MAX: u8 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw_number: u32,
    pub draw_date: String,
    pub main_numbers: [u8; PICK_COUNT],
    pub bonus_number: u8,
}

impl DrawRecord {
    pub fn sorted_numbers(&self) -> [u8; PICK_COUNT] {
        let mut numbers = self.main_numbers;
        numbers.sort_unstable();
        numbers
    }

    /// Forme externe : `draw_no`, `draw_date`, `num1`..`num6`, `bonus`.
    pub fn to_raw(&self) -> Value {
        let [n1, n2, n3, n4, n5, n6] = self.main_numbers;
        json!({
            "draw_no": self.draw_number,
            "draw_date": self.draw_date,
            "num1": n1,
            "num2": n2,
            "num3": n3,
            "num4": n4,
            "num5": n5,
            "num6": n6,
            "bonus": self.bonus_number,
        })
    }
}

pub fn in_universe(number: u8) -> bool {
    (1..=MAX_NUMBER).contains(&number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

pub fn make_draw(draw_number: u32, main_numbers: [u8; PICK_COUNT]) -> DrawRecord {
    let bonus_number = (1..=MAX_NUMBER)
        .find(|n| !main_numbers.contains(n))
        .unwrap_or(MAX_NUMBER);
    DrawRecord {
        draw_number,
        draw_date: format!("2024-{:02}-{:02}", (draw_number / 28) % 12 + 1, draw_number % 28 + 1),
        main_numbers,
        bonus_number,
    }
}

/// Tirages synthétiques déterministes, numéros distincts garantis
/// (décalages 0, 7, ..., 35 modulo 45).
pub fn make_test_draws(n: usize) -> Vec<DrawRecord> {
    (0..n)
        .map(|i| {
            let base = i * 11;
            let mut main_numbers = [0u8; PICK_COUNT];
            for (j, slot) in main_numbers.iter_mut().enumerate() {
                *slot = ((base + j * 7) % 45 + 1) as u8;
            }
            DrawRecord {
                draw_number: (i + 1) as u32,
                draw_date: format!("2024-{:02}-{:02}", (i / 28) % 12 + 1, i % 28 + 1),
                main_numbers,
                bonus_number: ((base + 42) % 45 + 1) as u8,
            }
        })
        .collect()
}
