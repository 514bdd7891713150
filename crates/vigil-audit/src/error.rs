use vigil_config::ConfigError;
use vigil_retention::RetentionError;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Retention(#[from] RetentionError),

    #[error("failed to initialize tracing subscriber: {0}")]
    Telemetry(String),
}
