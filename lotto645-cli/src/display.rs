use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use lotto645_core::analysis::cycle::CycleResult;
use lotto645_core::analysis::frequency::{FrequencyResult, RecentTrendResult};
use lotto645_core::analysis::pattern::{
    ConsecutiveResult, EndingDigitResult, PatternCount, PatternResult,
};
use lotto645_core::engine::{FullAnalysis, Summary};
use lotto645_core::models::{DrawRecord, NumberCount};
use lotto645_core::sampler::{Recommendation, RecommendationKind};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_summary(summary: &Summary) {
    println!("\n📋 Données chargées\n");
    let mut table = new_table(vec!["Tirages", "Premier", "Dernier", "Dernier n°"]);
    table.add_row(vec![
        summary.total_draws.to_string(),
        summary.first_date.clone(),
        summary.last_date.clone(),
        summary.latest_draw_number.to_string(),
    ]);
    println!("{table}");
}

pub fn display_draws(draws: &[DrawRecord]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["N°", "Date", "Numéros", "Bonus"]);
    for draw in draws {
        table.add_row(vec![
            draw.draw_number.to_string(),
            draw.draw_date.clone(),
            format_numbers(&draw.sorted_numbers()),
            format!("{:2}", draw.bonus_number),
        ]);
    }
    println!("{table}");
}

fn count_table(counts: &[NumberCount]) -> Table {
    let mut table = new_table(vec!["Numéro", "Apparitions"]);
    for c in counts {
        table.add_row(vec![format!("{:2}", c.number), c.count.to_string()]);
    }
    table
}

pub fn display_frequency(result: &FrequencyResult) {
    println!(
        "\n📊 Fréquences sur {} tirages (espérance uniforme : {:.2})\n",
        result.total_draws, result.expected_frequency
    );

    let mut table = new_table(vec!["Numéro", "Apparitions", "Écart / espérance"]);
    for c in &result.ranked {
        let deviation = c.count as f64 - result.expected_frequency;
        let color = if deviation > 0.0 {
            Color::Green
        } else if deviation < 0.0 {
            Color::Red
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", c.number)),
            Cell::new(c.count),
            Cell::new(format!("{:+.2}", deviation)).fg(color),
        ]);
    }
    println!("{table}");

    println!("\n── Numéros chauds ──");
    println!("{}", count_table(&result.hot_numbers));
    println!("\n── Numéros froids ──");
    println!("{}", count_table(&result.cold_numbers));
}

pub fn display_trend(result: &RecentTrendResult) {
    let scope = if result.window == 0 || result.draws_considered < result.window {
        "tout l'historique".to_string()
    } else {
        format!("les {} derniers tirages", result.window)
    };
    println!("\n📈 Tendance récente sur {} ({} tirages)\n", scope, result.draws_considered);

    println!("── Numéros chauds ──");
    println!("{}", count_table(&result.hot_numbers));

    if result.not_appeared.is_empty() {
        println!("\nTous les numéros sont sortis sur la période.");
    } else {
        println!(
            "\nAbsents sur la période ({}) : {}",
            result.not_appeared.len(),
            format_numbers(&result.not_appeared)
        );
    }
}

fn pattern_table(title: &str, patterns: &[PatternCount], total: usize) -> Table {
    let mut table = new_table(vec![title, "Tirages", "%"]);
    for p in patterns {
        let share = if total > 0 {
            p.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            p.pattern.to_string(),
            p.count.to_string(),
            format!("{:.1}", share),
        ]);
    }
    table
}

pub fn display_patterns(result: &PatternResult) {
    println!("\n🔢 Répartitions sur {} tirages\n", result.total_draws);
    println!("── Impairs : pairs ──");
    println!("{}", pattern_table("Impairs:Pairs", &result.odd_even, result.total_draws));
    println!("\n── Bas (≤22) : hauts ──");
    println!("{}", pattern_table("Bas:Hauts", &result.low_high, result.total_draws));
}

pub fn display_consecutive(result: &ConsecutiveResult) {
    println!(
        "\n🔗 Numéros consécutifs : {} tirages sur {} ({:.1} %)\n",
        result.has_consecutive, result.total_draws, result.percentage
    );
    let mut table = new_table(vec!["Paires consécutives", "Tirages"]);
    for (pairs, draws) in &result.distribution {
        table.add_row(vec![pairs.to_string(), draws.to_string()]);
    }
    println!("{table}");
}

pub fn display_ending_digits(result: &EndingDigitResult) {
    println!("\n🔚 Chiffre des unités\n");
    let mut table = new_table(vec!["Chiffre", "Apparitions"]);
    for (digit, count) in result.counts.iter().enumerate() {
        table.add_row(vec![digit.to_string(), count.to_string()]);
    }
    println!("{table}");
}

pub fn display_cycles(result: &CycleResult) {
    println!("\n🔁 Cycles sur {} tirages\n", result.total_draws);

    println!("── Cycles les plus courts ──");
    if result.top_frequent.is_empty() {
        println!("Pas assez de tirages pour calculer un cycle.");
    } else {
        let mut table = new_table(vec!["Numéro", "Cycle moyen", "Retard actuel"]);
        for entry in &result.top_frequent {
            table.add_row(vec![
                format!("{:2}", entry.number),
                format!("{:.2}", entry.average_cycle),
                result
                    .current_gap(entry.number)
                    .map(|g| g.to_string())
                    .unwrap_or_default(),
            ]);
        }
        println!("{table}");
    }

    println!("\n── Plus longs retards ──");
    let mut table = new_table(vec!["Numéro", "Retard actuel", "Cycle moyen"]);
    for entry in &result.top_gap {
        table.add_row(vec![
            format!("{:2}", entry.number),
            entry.gap.to_string(),
            result
                .average_cycle(entry.number)
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "—".to_string()),
        ]);
    }
    println!("{table}");
}

fn kind_color(kind: RecommendationKind) -> Color {
    match kind {
        RecommendationKind::Hot => Color::Red,
        RecommendationKind::Cold => Color::Blue,
        RecommendationKind::Balanced => Color::Green,
        RecommendationKind::Mixed => Color::Magenta,
        RecommendationKind::Random => Color::White,
    }
}

pub fn display_recommendations(recommendations: &[Recommendation]) {
    println!("\n🎲 Grilles suggérées\n");

    let mut table = new_table(vec!["#", "Type", "Numéros"]);
    for (i, rec) in recommendations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&rec.label).fg(kind_color(rec.kind)),
            Cell::new(format_numbers(&rec.numbers)),
        ]);
    }
    println!("{table}");
}

pub fn display_full(full: &FullAnalysis) {
    display_frequency(&full.frequency);
    display_trend(&full.recent_trend);
    display_patterns(&full.patterns);
    display_consecutive(&full.consecutive);
    display_ending_digits(&full.ending_digits);
    display_cycles(&full.cycles);
    if let Some(recommendations) = &full.recommendations {
        display_recommendations(recommendations);
    }
}
