//! Random-walk connectivity search over a [`KeyedDisjointSet`].
//!
//! The [`Connector`] repeatedly walks away from each component's
//! representative and merges the component with whatever item the walk
//! reaches. Because a handle-side merge keeps the component in its list slot,
//! the driver can keep walking the list while components disappear around it.
//!
//! The search runs in three phases:
//!
//! - a single sweep that walks once from every component;
//! - coarse rounds until at most `coarse_threshold` components remain;
//! - final rounds, with a wider size balance, until one component remains.
//!
//! The coarse and final phases are capped at `max_rounds` rounds each so a
//! search that cannot connect the set still terminates.

mod builder;


use std::{error::Error as StdError, fmt, sync::Arc};

use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    codec::KeyCodec,
    error::{ReconstructionError, define_error_codes},
    keyset::{ComponentHandle, KeyedDisjointSet},
};

pub use self::builder::ConnectorBuilder;

/// Local search over items, used to find merge partners.
pub trait RandomWalk {
    /// Item type the walk moves between.
    type Item;

    /// Failure raised when a walk cannot reach its target.
    type Error: StdError + Send + Sync + 'static;

    /// Moves `item` in place until it reaches the walk's target.
    ///
    /// On error `item` may be left anywhere along the walk.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when no move applies or `phase.step_limit()`
    /// moves were not enough.
    fn walk(
        &self,
        item: &mut Self::Item,
        phase: &PhaseParams,
        rng: &mut SmallRng,
    ) -> Result<(), Self::Error>;
}

/// Size bias handed to every walk of a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseParams {
    balance: usize,
    scaling: f64,
    step_limit: u64,
}

impl PhaseParams {
    /// Creates phase parameters.
    ///
    /// # Examples
    /// ```
    /// use sigforest_core::PhaseParams;
    ///
    /// let params = PhaseParams::new(9, 1.0, 100);
    /// assert_eq!(params.balance(), 9);
    /// assert_eq!(params.step_limit(), 100);
    /// ```
    #[must_use]
    pub const fn new(balance: usize, scaling: f64, step_limit: u64) -> Self {
        Self {
            balance,
            scaling,
            step_limit,
        }
    }

    /// Item size around which walks should hover.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Severity of the penalty for drifting away from the balance.
    #[must_use]
    pub const fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Maximum number of moves per walk.
    #[must_use]
    pub const fn step_limit(&self) -> u64 {
        self.step_limit
    }
}

/// Stage of a [`Connector`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One walk from every component.
    Sweep,
    /// Rounds until the coarse threshold is reached.
    Coarse,
    /// Rounds until a single component remains.
    Final,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sweep => "sweep",
            Self::Coarse => "coarse",
            Self::Final => "final",
        })
    }
}

/// Errors raised while configuring or running a [`Connector`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Target size must be at least one.
    #[error("target size must be at least 1 (got {got})")]
    InvalidTargetSize {
        /// The rejected target size.
        got: usize,
    },
    /// Each component needs at least one walk per round.
    #[error("attempts must be at least 1 (got {got})")]
    InvalidAttempts {
        /// The rejected attempt count.
        got: usize,
    },
    /// Phases need at least one round.
    #[error("max_rounds must be at least 1 (got {got})")]
    InvalidRoundLimit {
        /// The rejected round limit.
        got: usize,
    },
    /// Walks need room for at least one move.
    #[error("step_limit must be at least 1 (got {got})")]
    InvalidStepLimit {
        /// The rejected step limit.
        got: u64,
    },
    /// Penalty scaling must be positive and finite.
    #[error("scaling must be positive and finite (got {got})")]
    InvalidScaling {
        /// The rejected scaling.
        got: f64,
    },
    /// The set to connect holds no items.
    #[error("key set `{name}` contains no items")]
    EmptySet {
        /// Name of the empty set.
        name: Arc<str>,
    },
    /// A representative could not be reconstructed.
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),
}

define_error_codes! {
    /// Stable codes describing [`ConnectorError`] variants.
    enum ConnectorErrorCode for ConnectorError {
        /// Target size must be at least one.
        InvalidTargetSize => InvalidTargetSize { .. } => "CONNECT_INVALID_TARGET_SIZE",
        /// Attempts must be at least one.
        InvalidAttempts => InvalidAttempts { .. } => "CONNECT_INVALID_ATTEMPTS",
        /// Round limit must be at least one.
        InvalidRoundLimit => InvalidRoundLimit { .. } => "CONNECT_INVALID_ROUND_LIMIT",
        /// Step limit must be at least one.
        InvalidStepLimit => InvalidStepLimit { .. } => "CONNECT_INVALID_STEP_LIMIT",
        /// Scaling must be positive and finite.
        InvalidScaling => InvalidScaling { .. } => "CONNECT_INVALID_SCALING",
        /// The set holds no items.
        EmptySet => EmptySet { .. } => "CONNECT_EMPTY_SET",
        /// A representative failed to reconstruct.
        Reconstruction => Reconstruction(..) => "CONNECT_RECONSTRUCTION",
    }
}

/// Outcome of a [`Connector::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectReport {
    /// Merges performed during the sweep.
    pub sweep_merges: usize,
    /// Rounds run in the coarse phase.
    pub coarse_rounds: usize,
    /// Rounds run in the final phase.
    pub final_rounds: usize,
    /// Merges performed across all phases.
    pub merges: usize,
    /// Walks that failed to reach their target.
    pub stalled_walks: usize,
    /// Components left when the run finished.
    pub components: usize,
}

impl ConnectReport {
    /// Returns whether the run left a single component.
    #[must_use]
    pub const fn connected(&self) -> bool {
        self.components == 1
    }
}

/// Drives the phased connectivity search.
///
/// Construct with [`ConnectorBuilder`].
#[derive(Debug, Clone)]
pub struct Connector {
    attempts: usize,
    coarse_threshold: usize,
    max_rounds: usize,
    coarse: PhaseParams,
    finish: PhaseParams,
    seed: Option<u64>,
}

impl Connector {
    /// Returns the number of walks each component gets per round.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns the parameters used by the sweep and coarse phases.
    #[must_use]
    pub const fn coarse_phase(&self) -> &PhaseParams {
        &self.coarse
    }

    /// Returns the parameters used by the final phase.
    #[must_use]
    pub const fn final_phase(&self) -> &PhaseParams {
        &self.finish
    }

    /// Connects the components of `set` by walking from their
    /// representatives with `walk`.
    ///
    /// Every successful merge makes the walk's destination the component's
    /// representative. Failed walks are logged and counted; they never abort
    /// the run.
    ///
    /// # Errors
    /// Returns [`ConnectorError::EmptySet`] when `set` is empty and
    /// [`ConnectorError::Reconstruction`] when a representative's key is
    /// malformed.
    #[instrument(
        name = "connect.run",
        err,
        skip(self, set, walk),
        fields(
            key_set = %set.name(),
            items = set.len(),
            components = set.component_count(),
            attempts = self.attempts,
        ),
    )]
    pub fn run<C, W>(
        &self,
        set: &mut KeyedDisjointSet<C>,
        walk: &W,
    ) -> Result<ConnectReport, ConnectorError>
    where
        C: KeyCodec,
        W: RandomWalk<Item = C::Item>,
    {
        if set.is_empty() {
            return Err(ConnectorError::EmptySet {
                name: Arc::from(set.name()),
            });
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut search = Search {
            walk,
            rng: &mut rng,
            report: ConnectReport::default(),
        };

        search.sweep(set, &self.coarse)?;
        search.report.sweep_merges = search.report.merges;
        info!(
            phase = %Phase::Sweep,
            components = set.component_count(),
            merges = search.report.sweep_merges,
            "phase complete"
        );

        search.report.coarse_rounds =
            self.rounds(&mut search, set, Phase::Coarse, self.coarse_threshold.max(1))?;
        search.report.final_rounds = self.rounds(&mut search, set, Phase::Final, 1)?;

        search.report.components = set.component_count();
        if !search.report.connected() {
            warn!(
                components = search.report.components,
                max_rounds = self.max_rounds,
                "round limit reached before the set was connected"
            );
        }
        Ok(search.report)
    }

    fn rounds<C, W>(
        &self,
        search: &mut Search<'_, W>,
        set: &mut KeyedDisjointSet<C>,
        phase: Phase,
        stop_at: usize,
    ) -> Result<usize, ConnectorError>
    where
        C: KeyCodec,
        W: RandomWalk<Item = C::Item>,
    {
        let params = match phase {
            Phase::Final => self.finish,
            Phase::Sweep | Phase::Coarse => self.coarse,
        };

        let mut rounds = 0;
        while set.component_count() > stop_at && rounds < self.max_rounds {
            rounds += 1;
            search.round(set, &params, self.attempts)?;
            debug!(
                phase = %phase,
                round = rounds,
                components = set.component_count(),
                "round complete"
            );
        }
        info!(
            phase = %phase,
            rounds,
            components = set.component_count(),
            "phase complete"
        );
        Ok(rounds)
    }
}

/// Mutable state threaded through one run.
struct Search<'a, W> {
    walk: &'a W,
    rng: &'a mut SmallRng,
    report: ConnectReport,
}

impl<W: RandomWalk> Search<'_, W> {
    fn sweep<C>(
        &mut self,
        set: &mut KeyedDisjointSet<C>,
        params: &PhaseParams,
    ) -> Result<(), ConnectorError>
    where
        C: KeyCodec<Item = W::Item>,
    {
        let mut cursor = set.components();
        while let Some(handle) = cursor {
            let mut item = handle.representative(set)?;
            if self.step(&mut item, params) {
                self.merge(set, handle, &item);
            }
            cursor = handle.next(set);
        }
        Ok(())
    }

    fn round<C>(
        &mut self,
        set: &mut KeyedDisjointSet<C>,
        params: &PhaseParams,
        attempts: usize,
    ) -> Result<(), ConnectorError>
    where
        C: KeyCodec<Item = W::Item>,
    {
        let mut cursor = set.components();
        while let Some(handle) = cursor {
            let mut item = handle.representative(set)?;
            for _ in 0..attempts {
                if self.step(&mut item, params) && self.merge(set, handle, &item) {
                    break;
                }
            }
            cursor = handle.next(set);
        }
        Ok(())
    }

    fn step(&mut self, item: &mut W::Item, params: &PhaseParams) -> bool {
        match self.walk.walk(item, params, self.rng) {
            Ok(()) => true,
            Err(error) => {
                self.report.stalled_walks += 1;
                warn!(error = %error, "walk stalled");
                false
            }
        }
    }

    fn merge<C>(
        &mut self,
        set: &mut KeyedDisjointSet<C>,
        handle: ComponentHandle,
        item: &W::Item,
    ) -> bool
    where
        C: KeyCodec<Item = W::Item>,
    {
        let merged = set.merge_component(handle, item, false);
        if merged {
            self.report.merges += 1;
            debug!(
                representative = handle.representative_key(set),
                size = handle.size(set),
                components = set.component_count(),
                "components merged"
            );
        }
        merged
    }
}
