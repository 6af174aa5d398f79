use thiserror::Error;

/// Rejected [`RefreshConfig`](crate::RefreshConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("metric `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("metric `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("max distance must be positive, got {0}")]
    NonPositiveMaxDistance(f32),

    #[error("opened extent {opened} must be positive and smaller than the total extent {total}")]
    InvalidOpenedExtent { opened: f32, total: f32 },

    #[error("arrow thickness {size} leaves no room inside arrow radius {radius}")]
    ArrowTooThick { size: f32, radius: f32 },
}
