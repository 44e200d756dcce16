//! Builder utilities for configuring Strand runs.
//!
//! Exposes the execution strategy selection surface and the validation that
//! runs before a [`Strand`] is constructed.

use std::num::NonZeroUsize;

use crate::{Result, error::StrandError, strand::Strand};

/// Indicates how [`Strand`] runs the per-point neighbour queries.
///
/// `Auto` uses Rayon when the `parallel` feature is compiled in and falls
/// back to a sequential scan otherwise, so it never fails at build time.
/// Results are identical under every strategy.
///
/// # Examples
/// ```
/// use strand_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Let the library choose based on the compiled features.
    Auto,
    /// Run every query on the calling thread.
    Sequential,
    /// Fan queries out over the Rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Returns whether the strategy resolves to parallel queries in this
    /// build.
    #[must_use]
    pub const fn is_parallel(self) -> bool {
        match self {
            Self::Auto | Self::Parallel => cfg!(feature = "parallel"),
            Self::Sequential => false,
        }
    }
}

/// Configures and constructs [`Strand`] instances.
///
/// # Examples
/// ```
/// use strand_core::{ExecutionStrategy, StrandBuilder};
///
/// let strand = StrandBuilder::new()
///     .with_connections(10)
///     .with_top_k(3)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(strand.connections(), 10);
/// assert_eq!(strand.top_k().get(), 3);
/// assert_eq!(strand.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct StrandBuilder {
    connections: usize,
    top_k: usize,
    execution_strategy: ExecutionStrategy,
}

impl Default for StrandBuilder {
    fn default() -> Self {
        Self {
            connections: 1000,
            top_k: 3,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl StrandBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use strand_core::{ExecutionStrategy, StrandBuilder};
    ///
    /// let builder = StrandBuilder::new();
    /// assert_eq!(builder.connections(), 1000);
    /// assert_eq!(builder.top_k(), 3);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides how many ranked edges the bounded query consumes.
    #[must_use]
    pub fn with_connections(mut self, connections: usize) -> Self {
        self.connections = connections;
        self
    }

    /// Returns the configured connection count.
    #[must_use]
    pub fn connections(&self) -> usize {
        self.connections
    }

    /// Overrides how many of the largest components are reported.
    ///
    /// # Examples
    /// ```
    /// use strand_core::StrandBuilder;
    ///
    /// let builder = StrandBuilder::new().with_top_k(5);
    /// assert_eq!(builder.top_k(), 5);
    /// ```
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Returns the configured component count.
    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Sets the execution strategy used for neighbour queries.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`Strand`] instance.
    ///
    /// # Errors
    /// Returns [`StrandError::InvalidTopK`] when `top_k` is zero and
    /// [`StrandError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use strand_core::{StrandBuilder, StrandError};
    ///
    /// let err = StrandBuilder::new().with_top_k(0).build().expect_err("zero is rejected");
    /// assert_eq!(err, StrandError::InvalidTopK { got: 0 });
    /// ```
    pub fn build(self) -> Result<Strand> {
        let top_k =
            NonZeroUsize::new(self.top_k).ok_or(StrandError::InvalidTopK { got: self.top_k })?;

        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(StrandError::BackendUnavailable {
                requested: self.execution_strategy,
            });
        }

        Ok(Strand::new(self.connections, top_k, self.execution_strategy))
    }
}
