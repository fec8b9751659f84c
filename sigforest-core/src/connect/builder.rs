//! Builder for configuring [`Connector`] runs.

use super::{Connector, ConnectorError, PhaseParams};

const DEFAULT_TARGET_SIZE: usize = 6;
const DEFAULT_ATTEMPTS: usize = 100;
const DEFAULT_COARSE_THRESHOLD: usize = 10;
const DEFAULT_MAX_ROUNDS: usize = 1_000;
const DEFAULT_STEP_LIMIT: u64 = 5_000_000;
const DEFAULT_COARSE_SCALING: f64 = 1.0;
const DEFAULT_FINAL_SCALING: f64 = 0.9;

/// Configures and constructs [`Connector`] instances.
///
/// # Examples
/// ```
/// use sigforest_core::ConnectorBuilder;
///
/// let connector = ConnectorBuilder::new()
///     .with_target_size(4)
///     .with_attempts(20)
///     .with_seed(7)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(connector.attempts(), 20);
/// assert_eq!(connector.coarse_phase().balance(), 5);
/// assert_eq!(connector.final_phase().balance(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectorBuilder {
    target_size: usize,
    attempts: usize,
    coarse_threshold: usize,
    max_rounds: usize,
    step_limit: u64,
    coarse_scaling: f64,
    final_scaling: f64,
    seed: Option<u64>,
}

impl Default for ConnectorBuilder {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            attempts: DEFAULT_ATTEMPTS,
            coarse_threshold: DEFAULT_COARSE_THRESHOLD,
            max_rounds: DEFAULT_MAX_ROUNDS,
            step_limit: DEFAULT_STEP_LIMIT,
            coarse_scaling: DEFAULT_COARSE_SCALING,
            final_scaling: DEFAULT_FINAL_SCALING,
            seed: None,
        }
    }
}

impl ConnectorBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item size the walks should settle around.
    #[must_use]
    pub fn with_target_size(mut self, size: usize) -> Self {
        self.target_size = size;
        self
    }

    /// Returns the configured target size.
    #[must_use]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Sets how many walks each component gets per round.
    #[must_use]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Returns the configured number of walks per component and round.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Sets the component count at which the coarse phase hands over to the
    /// final phase.
    #[must_use]
    pub fn with_coarse_threshold(mut self, threshold: usize) -> Self {
        self.coarse_threshold = threshold;
        self
    }

    /// Returns the configured coarse threshold.
    #[must_use]
    pub fn coarse_threshold(&self) -> usize {
        self.coarse_threshold
    }

    /// Caps the number of rounds each of the coarse and final phases may run.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Returns the configured round cap.
    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Caps the number of moves a single walk may take.
    #[must_use]
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = steps;
        self
    }

    /// Returns the configured per-walk step limit.
    #[must_use]
    pub fn step_limit(&self) -> u64 {
        self.step_limit
    }

    /// Overrides the size-penalty scaling of the sweep and coarse phases.
    #[must_use]
    pub fn with_coarse_scaling(mut self, scaling: f64) -> Self {
        self.coarse_scaling = scaling;
        self
    }

    /// Overrides the size-penalty scaling of the final phase.
    #[must_use]
    pub fn with_final_scaling(mut self, scaling: f64) -> Self {
        self.final_scaling = scaling;
        self
    }

    /// Fixes the random seed so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Connector`].
    ///
    /// # Errors
    /// Returns [`ConnectorError::InvalidTargetSize`],
    /// [`ConnectorError::InvalidAttempts`],
    /// [`ConnectorError::InvalidRoundLimit`],
    /// [`ConnectorError::InvalidStepLimit`] or
    /// [`ConnectorError::InvalidScaling`] when the matching parameter is zero
    /// or, for scalings, not a positive finite number.
    pub fn build(self) -> Result<Connector, ConnectorError> {
        if self.target_size == 0 {
            return Err(ConnectorError::InvalidTargetSize { got: 0 });
        }
        if self.attempts == 0 {
            return Err(ConnectorError::InvalidAttempts { got: 0 });
        }
        if self.max_rounds == 0 {
            return Err(ConnectorError::InvalidRoundLimit { got: 0 });
        }
        if self.step_limit == 0 {
            return Err(ConnectorError::InvalidStepLimit { got: 0 });
        }
        for scaling in [self.coarse_scaling, self.final_scaling] {
            if !scaling.is_finite() || scaling <= 0.0 {
                return Err(ConnectorError::InvalidScaling { got: scaling });
            }
        }

        let coarse_balance = self.target_size.saturating_mul(2).saturating_sub(3).max(1);
        let final_balance = self.target_size.saturating_mul(2);

        Ok(Connector {
            attempts: self.attempts,
            coarse_threshold: self.coarse_threshold,
            max_rounds: self.max_rounds,
            coarse: PhaseParams::new(coarse_balance, self.coarse_scaling, self.step_limit),
            finish: PhaseParams::new(final_balance, self.final_scaling, self.step_limit),
            seed: self.seed,
        })
    }
}
