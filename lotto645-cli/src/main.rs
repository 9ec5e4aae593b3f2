mod demo;
mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use lotto645_core::AnalysisEngine;
use lotto645_core::config::{EngineConfig, FullAnalysisOptions, RecommendationConfig, Strategy};
use lotto645_core::models::DrawRecord;

use crate::display::{
    display_consecutive, display_cycles, display_draws, display_ending_digits, display_frequency,
    display_full, display_patterns, display_recommendations, display_summary, display_trend,
};

#[derive(Parser)]
#[command(name = "lotto645", about = "Analyseur statistique des tirages Lotto 6/45")]
struct Cli {
    /// Fichier de tirages (JSON, ou CSV avec en-tête)
    #[arg(short, long, global = true, default_value = "data/draws.json")]
    file: PathBuf,

    /// Configuration du moteur (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Désactiver la validation des premiers enregistrements
    #[arg(long, global = true)]
    no_validate: bool,

    /// Sortie JSON au lieu des tableaux
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RecommendArgs {
    /// Nombre de grilles
    #[arg(short, long, default_value = "5")]
    count: usize,

    /// Stratégie de composition
    #[arg(short, long, default_value = "mixed")]
    strategy: Strategy,

    /// Fenêtre de tendance récente (0 = tout l'historique)
    #[arg(long, default_value = "0")]
    recent_window: usize,

    /// Seed pour la reproductibilité
    #[arg(long)]
    seed: Option<u64>,
}

impl From<&RecommendArgs> for RecommendationConfig {
    fn from(args: &RecommendArgs) -> Self {
        Self {
            count: args.count,
            strategy: args.strategy,
            recent_window: args.recent_window,
            seed: args.seed,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Résumé des données chargées
    Summary,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Fréquence d'apparition de chaque numéro
    Frequency,

    /// Tendance sur les derniers tirages
    Trend {
        /// Fenêtre d'analyse (0 = tout l'historique)
        #[arg(short, long, default_value = "50")]
        window: usize,
    },

    /// Répartitions impairs/pairs et bas/hauts
    Patterns,

    /// Numéros consécutifs
    Consecutive,

    /// Chiffre des unités
    Digits,

    /// Cycles et retards
    Cycles,

    /// Suggérer des grilles
    Recommend(RecommendArgs),

    /// Toutes les analyses
    Full {
        /// Fenêtre de tendance récente
        #[arg(short, long, default_value = "50")]
        window: usize,

        /// Ajouter les grilles suggérées
        #[arg(long)]
        recommend: bool,

        #[command(flatten)]
        recommend_args: RecommendArgs,
    },

    /// Générer un fichier de tirages de démonstration
    Demo {
        /// Fichier JSON à écrire
        #[arg(short, long, default_value = "data/demo.json")]
        output: PathBuf,

        /// Nombre de tirages
        #[arg(short = 'n', long, default_value = "500")]
        draws: usize,

        /// Date du premier tirage (AAAA-MM-JJ)
        #[arg(long, default_value = demo::DEFAULT_START)]
        start: String,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Summary => {
            let summary = load_engine(&cli)?.require_summary()?;
            emit(cli.json, &summary, display_summary)
        }
        Command::List { last } => {
            let engine = load_engine(&cli)?;
            let draws = engine.draws();
            let recent: Vec<DrawRecord> = draws[draws.len().saturating_sub(*last)..]
                .iter()
                .rev()
                .cloned()
                .collect();
            emit(cli.json, &recent, |d: &Vec<DrawRecord>| display_draws(d))
        }
        Command::Frequency => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_frequency(), display_frequency)
        }
        Command::Trend { window } => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_recent_trend(*window), display_trend)
        }
        Command::Patterns => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_patterns(), display_patterns)
        }
        Command::Consecutive => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_consecutive(), display_consecutive)
        }
        Command::Digits => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_ending_digits(), display_ending_digits)
        }
        Command::Cycles => {
            let mut engine = load_engine(&cli)?;
            emit(cli.json, engine.analyze_cycles(), display_cycles)
        }
        Command::Recommend(args) => {
            let mut engine = load_engine(&cli)?;
            let config = RecommendationConfig::from(args);
            let sets = engine.generate_recommendations_seeded(&config)?;
            emit(cli.json, sets, display_recommendations)
        }
        Command::Full {
            window,
            recommend,
            recommend_args,
        } => {
            let mut engine = load_engine(&cli)?;
            let config = RecommendationConfig::from(recommend_args);
            let mut rng = rng_from(config.seed);
            let options = FullAnalysisOptions {
                recent_window: *window,
                recommendations: recommend.then_some(config),
            };
            let full = engine.run_full_analysis(&options, &mut rng)?;
            emit(cli.json, &full, display_full)
        }
        Command::Demo {
            output,
            draws,
            start,
            seed,
        } => cmd_demo(output, *draws, start, *seed),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn load_engine(cli: &Cli) -> Result<AnalysisEngine> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Impossible de lire {:?}", path))?;
            serde_json::from_str::<EngineConfig>(&json)
                .with_context(|| format!("Configuration invalide dans {:?}", path))?
        }
        None => EngineConfig::default(),
    };
    if cli.no_validate {
        config.validate_on_load = false;
    }

    let records = import::read_records(&cli.file)?;
    let mut engine = AnalysisEngine::new(config);
    let loaded = engine
        .load(&records)
        .with_context(|| format!("Chargement de {:?} impossible", cli.file))?;
    info!("{} tirages chargés depuis {:?}", loaded, cli.file);
    Ok(engine)
}

/// Affiche `value` en JSON ou via la fonction d'affichage en tableau.
fn emit<T: Serialize + ?Sized>(json: bool, value: &T, display: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        display(value);
    }
    Ok(())
}

fn cmd_demo(output: &Path, count: usize, start: &str, seed: Option<u64>) -> Result<()> {
    let start = demo::parse_start_date(start)?;
    let mut rng = rng_from(seed);
    let draws = demo::generate_demo_draws(count, start, &mut rng)?;
    let records: Vec<serde_json::Value> = draws.iter().map(DrawRecord::to_raw).collect();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(output, json).with_context(|| format!("Impossible d'écrire {:?}", output))?;

    println!("{} tirages de démonstration écrits dans {}", draws.len(), output.display());
    Ok(())
}
