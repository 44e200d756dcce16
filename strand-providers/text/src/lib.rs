//! Text provider reading one `x,y,z` point record per line into a
//! [`PointStore`].
//!
//! Blank lines are skipped. Every other line must hold exactly three
//! non-negative integers separated by commas and/or whitespace. A comma
//! always closes a field, so leading, trailing, or doubled commas are
//! rejected rather than skipped. A point's index is its ordinal among the
//! non-blank lines.
use std::fmt;
use std::io::{self, BufRead};

use strand_core::{Point, PointStore};
use thiserror::Error;

/// Errors raised while reading point records.
#[derive(Debug, Error)]
pub enum TextPointSourceError {
    /// A record did not contain exactly three coordinates.
    #[error("line {line}: expected 3 coordinates but found {found}")]
    MalformedRecord {
        /// One-based physical line number.
        line: usize,
        /// Number of tokens present on the line.
        found: usize,
    },
    /// A comma-separated field held no coordinate.
    #[error("line {line}: field {field} is empty")]
    EmptyField {
        /// One-based physical line number.
        line: usize,
        /// One-based position of the empty field among the comma fields.
        field: usize,
    },
    /// A coordinate was not a non-negative integer fitting `u32`.
    #[error("line {line}: `{token}` is not a non-negative 32-bit integer")]
    InvalidCoordinate {
        /// One-based physical line number.
        line: usize,
        /// The rejected token.
        token: String,
    },
    /// Reading from the underlying source failed.
    #[error("failed to read point records: {0}")]
    Io(#[from] io::Error),
}

/// Stable codes describing [`TextPointSourceError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TextPointSourceErrorCode {
    /// A record did not contain exactly three coordinates.
    MalformedRecord,
    /// A comma-separated field held no coordinate.
    EmptyField,
    /// A coordinate was not a non-negative integer fitting `u32`.
    InvalidCoordinate,
    /// Reading from the underlying source failed.
    Io,
}

impl TextPointSourceErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRecord => "TEXT_SOURCE_MALFORMED_RECORD",
            Self::EmptyField => "TEXT_SOURCE_EMPTY_FIELD",
            Self::InvalidCoordinate => "TEXT_SOURCE_INVALID_COORDINATE",
            Self::Io => "TEXT_SOURCE_IO",
        }
    }
}

impl fmt::Display for TextPointSourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TextPointSourceError {
    /// Retrieve the stable [`TextPointSourceErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> TextPointSourceErrorCode {
        match self {
            Self::MalformedRecord { .. } => TextPointSourceErrorCode::MalformedRecord,
            Self::EmptyField { .. } => TextPointSourceErrorCode::EmptyField,
            Self::InvalidCoordinate { .. } => TextPointSourceErrorCode::InvalidCoordinate,
            Self::Io(_) => TextPointSourceErrorCode::Io,
        }
    }
}

/// Parses a single record.
///
/// Returns `Ok(None)` for blank lines. `line` is only used for error
/// reporting.
///
/// # Errors
/// Returns [`TextPointSourceError::EmptyField`] when a comma-separated field
/// is blank, [`TextPointSourceError::MalformedRecord`] when the record does
/// not hold three tokens, and [`TextPointSourceError::InvalidCoordinate`] when
/// a token is not a `u32`.
///
/// # Examples
/// ```
/// use strand_core::Point;
/// use strand_providers_text::parse_record;
///
/// assert_eq!(parse_record(1, "162,817,812")?, Some(Point::new(162, 817, 812)));
/// assert_eq!(parse_record(2, " 1, 2  3 ")?, Some(Point::new(1, 2, 3)));
/// assert_eq!(parse_record(3, "   ")?, None);
/// assert!(parse_record(4, "1,2").is_err());
/// assert!(parse_record(5, "1,,2,3").is_err());
/// # Ok::<(), strand_providers_text::TextPointSourceError>(())
/// ```
pub fn parse_record(line: usize, record: &str) -> Result<Option<Point>, TextPointSourceError> {
    if record.trim().is_empty() {
        return Ok(None);
    }
    let mut tokens = Vec::new();
    for (position, field) in record.split(',').enumerate() {
        let before = tokens.len();
        tokens.extend(field.split_whitespace());
        if tokens.len() == before {
            return Err(TextPointSourceError::EmptyField {
                line,
                field: position + 1,
            });
        }
    }
    let [x, y, z] = tokens[..] else {
        return Err(TextPointSourceError::MalformedRecord {
            line,
            found: tokens.len(),
        });
    };
    let coordinate = |token: &str| {
        token
            .parse::<u32>()
            .map_err(|_| TextPointSourceError::InvalidCoordinate {
                line,
                token: token.to_owned(),
            })
    };
    Ok(Some(Point::new(coordinate(x)?, coordinate(y)?, coordinate(z)?)))
}

/// Points parsed from a line-oriented text source.
///
/// # Examples
/// ```
/// use strand_providers_text::TextPointSource;
///
/// let source = TextPointSource::try_from_str("demo", "0,0,0\n\n3,4,0\n")?;
/// assert_eq!(source.len(), 2);
/// let store = source.into_store();
/// assert_eq!(store.name(), "demo");
/// assert_eq!(store.squared_distance(0, 1)?, 25);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextPointSource {
    store: PointStore,
}

impl TextPointSource {
    /// Reads every record from `reader`.
    ///
    /// # Errors
    /// Returns the first parse failure, or [`TextPointSourceError::Io`] when
    /// reading fails or the input is not UTF-8.
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextPointSourceError> {
        let mut points = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            if let Some(point) = parse_record(index + 1, &line?)? {
                points.push(point);
            }
        }
        Ok(Self {
            store: PointStore::new(name, points),
        })
    }

    /// Parses records held in memory.
    ///
    /// # Errors
    /// Returns the first parse failure.
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, TextPointSourceError> {
        Self::try_from_reader(name, text.as_bytes())
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.store.name()
    }

    /// Returns the number of parsed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether no records were present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the parsed points.
    #[must_use]
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Consumes the source and returns its point store.
    #[must_use]
    pub fn into_store(self) -> PointStore {
        self.store
    }
}

impl From<TextPointSource> for PointStore {
    fn from(source: TextPointSource) -> Self {
        source.into_store()
    }
}
