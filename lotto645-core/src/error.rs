/// Erreurs du moteur d'analyse.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Aucun tirage fourni")]
    EmptyData,

    #[error("Tirage invalide (enregistrement {index}) : {reason}")]
    Validation { index: usize, reason: String },

    #[error("Aucun tirage chargé")]
    EmptyDataset,

    #[error("Configuration invalide : {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
