use thiserror::Error;

/// Errors reported while configuring, building or analysing a random Boolean network.
///
/// Configuration problems are always reported before any simulation step runs. Note that
/// a trajectory which is too short to contain an attractor is *not* an error, see
/// `attractor::AttractorSearch::Undetermined`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RbnError {
    /// Invalid node count, connectivity, bias, noise probability or initial state.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Attractor detection was requested for a trajectory generated with noise.
    #[error("Cannot detect attractors in a noisy trajectory (noise probability {0}).")]
    NoiseAttractorConflict(f64),
    /// The network text format could not be parsed.
    #[error("Invalid network description: {0}")]
    Parse(String),
}

impl RbnError {
    /// **(internal)** Shorthand for building a `Config` error.
    pub(crate) fn config<T: Into<String>>(message: T) -> RbnError {
        RbnError::Config(message.into())
    }

    /// **(internal)** Shorthand for building a `Parse` error.
    pub(crate) fn parse<T: Into<String>>(message: T) -> RbnError {
        RbnError::Parse(message.into())
    }

    /// True if this error was caused by an invalid configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, RbnError::Config(_))
    }
}
