//! Error types for the Strand core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running [`crate::Strand`] and its
/// stages.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StrandError {
    /// The number of reported components must be greater than zero.
    #[error("top_k must be at least 1 (got {got})")]
    InvalidTopK {
        /// The invalid value supplied by the caller.
        got: usize,
    },
    /// An edge or lookup referenced a point outside the store.
    #[error("point index {index} is out of bounds for {point_count} points")]
    InvalidPointIndex {
        /// The offending point index.
        index: usize,
        /// Number of points available.
        point_count: usize,
    },
    /// The edge stream ended before every point joined a single component.
    #[error(
        "edge stream exhausted after {consumed} edges with {components} components and \
         {untouched} untouched points; widen the edge bound and retry"
    )]
    InsufficientEdges {
        /// Number of edges consumed before the stream ran dry.
        consumed: usize,
        /// Number of components formed by the consumed edges.
        components: usize,
        /// Number of points no consumed edge reached.
        untouched: usize,
    },
    /// Multiplying the reported component sizes overflowed `u64`.
    #[error("product of component sizes {sizes:?} overflows u64")]
    ProductOverflow {
        /// Sizes whose product could not be represented.
        sizes: Vec<usize>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`StrandError`] variants.
    enum StrandErrorCode for StrandError {
        /// The number of reported components must be greater than zero.
        InvalidTopK => InvalidTopK { .. } => "STRAND_INVALID_TOP_K",
        /// An edge or lookup referenced a point outside the store.
        InvalidPointIndex => InvalidPointIndex { .. } => "STRAND_INVALID_POINT_INDEX",
        /// The edge stream ended before spanning completed.
        InsufficientEdges => InsufficientEdges { .. } => "STRAND_INSUFFICIENT_EDGES",
        /// Multiplying the reported component sizes overflowed.
        ProductOverflow => ProductOverflow { .. } => "STRAND_PRODUCT_OVERFLOW",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "STRAND_BACKEND_UNAVAILABLE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, StrandError>;
