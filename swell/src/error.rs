use std::fmt;

/// Errors raised when a heightfield or floater is built from bad configuration.
///
/// These are programmer errors: construction fails fast rather than producing
/// undefined geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid dimension must be at least one cell.
    InvalidDimension(u32),
    /// A heightfield needs at least one octave.
    NoOctaves,
    /// A floater needs at least one float point.
    NoFloatPoints,
    /// Drag coefficients must be finite and non-negative.
    NegativeDrag { name: &'static str, value: f32 },
    /// UV scale must be finite and strictly positive.
    InvalidUvScale(f32),
    /// Every component of the grid world scale must be finite and non-zero.
    InvalidWorldScale([f32; 3]),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimension(d) => {
                write!(f, "Heightfield dimension must be positive, got {d}")
            }
            ConfigError::NoOctaves => write!(f, "Heightfield needs at least one octave"),
            ConfigError::NoFloatPoints => write!(f, "Floater needs at least one float point"),
            ConfigError::NegativeDrag { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            ConfigError::InvalidUvScale(s) => {
                write!(f, "UV scale must be finite and positive, got {s}")
            }
            ConfigError::InvalidWorldScale(s) => write!(
                f,
                "Heightfield world scale must be finite and non-zero, got {:?}",
                s
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
