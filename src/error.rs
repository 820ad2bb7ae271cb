use thiserror::Error;

/// Everything that can abort a load cycle. The GUI only ever sees the
/// rendered message string, never the variant.
#[derive(Debug, Error)]
pub enum DashboardError {
  #[error("resolution failed : {0}")]
  Resolution(String),

  #[error("decode failed : {0}")]
  Decode(String),

  #[error("parse failed : {0}")]
  Parse(String),

  #[error("request failed : {0}")]
  Http(#[from] reqwest::Error),
}
