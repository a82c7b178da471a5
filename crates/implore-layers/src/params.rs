//! Stat parameters.
//!
//! A layer declares its stat parameters loosely, as a [`StatParams`] bag of
//! JSON-like values. Each stat turns that bag into an immutable, typed
//! parameter struct once, at construction, with defaults already applied.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StatError, StatResult};

/// Largest float whose integer neighbours are all representable (2^53)
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn is_exact_positive_int(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && (1.0..=MAX_EXACT_FLOAT_INT).contains(&v)
}

/// Runtime parameter value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Human-readable type name, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Try to extract as a positive integer.
    ///
    /// Integral floats such as `50.0` are accepted up to 2^53, beyond which
    /// a float no longer pins down a single integer.
    pub fn as_positive_int(&self) -> Option<NonZeroUsize> {
        match self {
            ParamValue::Int(v) => usize::try_from(*v).ok().and_then(NonZeroUsize::new),
            ParamValue::Float(v) if is_exact_positive_int(*v) => NonZeroUsize::new(*v as usize),
            _ => None,
        }
    }

    /// Try to extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::String(v) => write!(f, "{:?}", v),
        }
    }
}

/// Container for the parameter values a layer declares for its stat
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatParams {
    values: HashMap<String, ParamValue>,
}

impl StatParams {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set an integer parameter
    pub fn set_int(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), ParamValue::Int(value));
    }

    /// Set a float parameter
    pub fn set_float(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), ParamValue::Float(value));
    }

    /// Set a boolean parameter
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), ParamValue::Bool(value));
    }

    /// Set a string parameter
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), ParamValue::String(value.into()));
    }

    /// Explicitly unset a parameter (`None` in the layer declaration)
    pub fn set_null(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), ParamValue::Null);
    }

    /// Get a parameter value by name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Get a parameter, treating an explicit null as absent
    pub fn get_present(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).filter(|v| !v.is_null())
    }

    /// Parameter names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.values)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let values = serde_json::from_str(json)?;
        Ok(Self { values })
    }
}

/// Rendering primitive used downstream of the stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geom {
    /// Horizontal-then-vertical steps between vertices
    #[default]
    Step,
    Line,
    Point,
}

impl Geom {
    pub fn name(&self) -> &'static str {
        match self {
            Geom::Step => "step",
            Geom::Line => "line",
            Geom::Point => "point",
        }
    }
}

impl FromStr for Geom {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step" => Ok(Geom::Step),
            "line" => Ok(Geom::Line),
            "point" => Ok(Geom::Point),
            other => Err(StatError::invalid_parameter(
                "geom",
                format!("unknown geom {:?}, expected one of step, line, point", other),
            )),
        }
    }
}

/// Layout adjustment applied downstream of the stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Identity,
    Dodge,
    Jitter,
}

impl Position {
    pub fn name(&self) -> &'static str {
        match self {
            Position::Identity => "identity",
            Position::Dodge => "dodge",
            Position::Jitter => "jitter",
        }
    }
}

impl FromStr for Position {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(Position::Identity),
            "dodge" => Ok(Position::Dodge),
            "jitter" => Ok(Position::Jitter),
            other => Err(StatError::invalid_parameter(
                "position",
                format!(
                    "unknown position {:?}, expected one of identity, dodge, jitter",
                    other
                ),
            )),
        }
    }
}

/// Parameters of the ECDF stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdfParams {
    /// Passed through to the renderer
    pub geom: Geom,

    /// Passed through to the renderer
    pub position: Position,

    /// `None`: evaluate at every distinct x. `Some(k)`: at k evenly spaced points.
    pub n: Option<NonZeroUsize>,

    /// Drop non-finite x values without a warning
    pub na_rm: bool,
}

impl EcdfParams {
    /// Parameter names the ECDF stat understands
    pub const NAMES: [&'static str; 4] = ["geom", "position", "n", "na_rm"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n(mut self, n: NonZeroUsize) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_geom(mut self, geom: Geom) -> Self {
        self.geom = geom;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_na_rm(mut self, na_rm: bool) -> Self {
        self.na_rm = na_rm;
        self
    }
}

impl TryFrom<&StatParams> for EcdfParams {
    type Error = StatError;

    fn try_from(params: &StatParams) -> StatResult<Self> {
        let mut ecdf = EcdfParams::new();

        if let Some(value) = params.get_present("n") {
            let n = value.as_positive_int().ok_or_else(|| {
                StatError::invalid_parameter(
                    "n",
                    format!("expected a positive integer or null, got {}", value),
                )
            })?;
            ecdf.n = Some(n);
        }

        if let Some(value) = params.get_present("geom") {
            ecdf.geom = expect_str("geom", value)?.parse()?;
        }

        if let Some(value) = params.get_present("position") {
            ecdf.position = expect_str("position", value)?.parse()?;
        }

        if let Some(value) = params.get_present("na_rm") {
            ecdf.na_rm = value.as_bool().ok_or_else(|| {
                StatError::invalid_parameter(
                    "na_rm",
                    format!("expected a bool, got {}", value.type_name()),
                )
            })?;
        }

        for name in params.names() {
            if !Self::NAMES.contains(&name) {
                tracing::warn!("Ignoring unknown ecdf parameter '{}'", name);
            }
        }

        Ok(ecdf)
    }
}

fn expect_str<'a>(name: &str, value: &'a ParamValue) -> StatResult<&'a str> {
    value.as_str().ok_or_else(|| {
        StatError::invalid_parameter(
            name,
            format!("expected a string, got {}", value.type_name()),
        )
    })
}
