use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Valider les premiers enregistrements au chargement.
    pub validate_on_load: bool,
    /// Nombre d'enregistrements validés en tête de séquence.
    pub sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            sample_size: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Frequency,
    Gap,
    Balanced,
    #[default]
    Mixed,
}

impl Strategy {
    /// Vrai si la grille de `kind` est produite par cette stratégie.
    pub fn includes(&self, kind: Strategy) -> bool {
        *self == kind || *self == Strategy::Mixed
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Frequency => write!(f, "frequency"),
            Strategy::Gap => write!(f, "gap"),
            Strategy::Balanced => write!(f, "balanced"),
            Strategy::Mixed => write!(f, "mixed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub count: usize,
    pub strategy: Strategy,
    /// Fenêtre de la tendance récente (0 = tout l'historique).
    pub recent_window: usize,
    pub seed: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            count: 5,
            strategy: Strategy::Mixed,
            recent_window: 0,
            seed: None,
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(EngineError::InvalidConfig(
                "le nombre de grilles doit être positif".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullAnalysisOptions {
    pub recent_window: usize,
    /// `None` : pas de recommandations.
    pub recommendations: Option<RecommendationConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_config() {
        let config = EngineConfig::default();
        assert!(config.validate_on_load);
        assert_eq!(config.sample_size, 5);
    }

    #[test]
    fn test_default_recommendation_config() {
        let config = RecommendationConfig::default();
        assert_eq!(config.count, 5);
        assert_eq!(config.strategy, Strategy::Mixed);
        assert_eq!(config.recent_window, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"validate_on_load": false}"#).unwrap();
        assert!(!config.validate_on_load);
        assert_eq!(config.sample_size, 5);

        let config: RecommendationConfig =
            serde_json::from_str(r#"{"strategy": "balanced"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Balanced);
        assert_eq!(config.count, 5);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = RecommendationConfig {
            count: 3,
            strategy: Strategy::Gap,
            recent_window: 20,
            seed: Some(42),
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: RecommendationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = RecommendationConfig {
            count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_strategy_includes() {
        assert!(Strategy::Mixed.includes(Strategy::Frequency));
        assert!(Strategy::Mixed.includes(Strategy::Gap));
        assert!(Strategy::Gap.includes(Strategy::Gap));
        assert!(!Strategy::Gap.includes(Strategy::Balanced));
        assert!(!Strategy::Balanced.includes(Strategy::Mixed));
    }
}
