use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

/// Upper bound on scale ticks for one chart row.
pub const MAX_SCALE_TICKS: usize = 10_000;

/// One bullet graph row as supplied by the caller.
///
/// `scale` and `qualitative_bands` keep their textual, comma-delimited form so
/// documents written for the markup format load unchanged. They are only
/// interpreted by [`ChartDefinition::parse`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// `"min,max,increment"`, e.g. `"0,60,2"`.
    #[serde(default)]
    pub scale: String,
    /// Band thresholds, e.g. `"27,29"`.
    #[serde(default, rename = "qmeasure", alias = "qualitative_bands")]
    pub qualitative_bands: String,
    #[serde(default, rename = "cmeasure", alias = "comparative_measure")]
    pub comparative_measure: f64,
    #[serde(default)]
    pub measure: f64,
}

impl ChartDefinition {
    #[must_use]
    pub fn new(title: impl Into<String>, scale: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scale: scale.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: impl Into<String>) -> Self {
        self.qualitative_bands = bands.into();
        self
    }

    #[must_use]
    pub fn with_measure(mut self, measure: f64) -> Self {
        self.measure = measure;
        self
    }

    #[must_use]
    pub fn with_comparative(mut self, comparative_measure: f64) -> Self {
        self.comparative_measure = comparative_measure;
        self
    }

    /// Validates the textual fields and resolves them into numbers.
    ///
    /// Tokens that are present but not numeric fall back to `0.0`; only the
    /// structural problems listed in [`SkipReason`] reject the record.
    pub fn parse(&self) -> Result<ParsedChart, SkipReason> {
        let scale_tokens = split_tokens(&self.scale);
        if scale_tokens.len() != 3 {
            return Err(SkipReason::ScaleArity {
                found: scale_tokens.len(),
            });
        }

        let band_tokens = split_tokens(&self.qualitative_bands);
        if band_tokens.is_empty() {
            return Err(SkipReason::MissingBands);
        }

        let scale = ScaleSpec {
            min: parse_token(scale_tokens[0], "scale min"),
            max: parse_token(scale_tokens[1], "scale max"),
            increment: parse_token(scale_tokens[2], "scale increment"),
        };
        scale.validate()?;

        for (field, value) in [
            ("measure", self.measure),
            ("comparative measure", self.comparative_measure),
        ] {
            if !value.is_finite() {
                return Err(SkipReason::NonFiniteValue {
                    field: field.to_owned(),
                });
            }
        }

        let bands: SmallVec<[f64; 4]> = band_tokens
            .into_iter()
            .map(|token| parse_token(token, "qualitative band"))
            .collect();
        if bands.iter().any(|band| !band.is_finite()) {
            return Err(SkipReason::NonFiniteValue {
                field: "qualitative band".to_owned(),
            });
        }

        Ok(ParsedChart {
            scale,
            bands,
            measure: self.measure,
            comparative_measure: self.comparative_measure,
        })
    }
}

/// Quantitative axis of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
}

impl ScaleSpec {
    fn validate(self) -> Result<(), SkipReason> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min == self.max {
            return Err(SkipReason::DegenerateScale { value: self.min });
        }
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(SkipReason::InvalidIncrement {
                value: self.increment,
            });
        }
        let count = self.tick_count();
        if count > MAX_SCALE_TICKS {
            return Err(SkipReason::TooManyTicks {
                count,
                limit: MAX_SCALE_TICKS,
            });
        }
        Ok(())
    }

    /// Number of ticks from `min` to `max` inclusive. A reversed scale has none.
    #[must_use]
    pub fn tick_count(self) -> usize {
        if self.max < self.min {
            return 0;
        }
        let steps = ((self.max - self.min) / self.increment + TICK_TOLERANCE).floor();
        if steps >= usize::MAX as f64 {
            return usize::MAX;
        }
        steps as usize + 1
    }

    /// Tick values `min + i * increment`, computed by index so long scales do
    /// not accumulate rounding drift.
    pub fn ticks(self) -> impl Iterator<Item = f64> {
        (0..self.tick_count()).map(move |i| self.min + i as f64 * self.increment)
    }
}

// Absorbs representation error in steps such as `0,1,0.1`.
const TICK_TOLERANCE: f64 = 1e-9;

/// Numeric form of a [`ChartDefinition`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedChart {
    pub scale: ScaleSpec,
    pub bands: SmallVec<[f64; 4]>,
    pub measure: f64,
    pub comparative_measure: f64,
}

/// Why a chart row was left out of the rendering.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("scale must have exactly 3 values (min,max,increment), found {found}")]
    ScaleArity { found: usize },

    #[error("at least one qualitative band is required")]
    MissingBands,

    #[error("scale min and max must be finite and distinct (min is {value})")]
    DegenerateScale { value: f64 },

    #[error("scale increment must be finite and > 0, got {value}")]
    InvalidIncrement { value: f64 },

    #[error("scale would produce {count} ticks, limit is {limit}")]
    TooManyTicks { count: usize, limit: usize },

    #[error("{field} must be finite")]
    NonFiniteValue { field: String },

    #[error("a value maps outside the representable pixel range")]
    NonFiniteGeometry,
}

fn split_tokens(raw: &str) -> SmallVec<[&str; 4]> {
    if raw.trim().is_empty() {
        return SmallVec::new();
    }
    raw.split(',').map(str::trim).collect()
}

fn parse_token(token: &str, field: &str) -> f64 {
    match token.parse::<f64>() {
        Ok(value) => value,
        Err(err) => {
            debug!(token, field, error = %err, "non-numeric token, using 0");
            0.0
        }
    }
}
