//! Raw form input and the parsed prediction request

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{LustreError, Result};

pub const FIELD_CARAT: &str = "Carat(Weight of Daimond)";
pub const FIELD_CUT: &str = "Cut(Quality)";
pub const FIELD_COLOR: &str = "Color";
pub const FIELD_CLARITY: &str = "Clarity";
pub const FIELD_DEPTH: &str = "Depth";
pub const FIELD_TABLE: &str = "Table";
pub const FIELD_X: &str = "X(length)";
pub const FIELD_Y: &str = "Y(width)";
pub const FIELD_Z: &str = "Z(Depth)";

/// Unparsed `/predict` form, one string per field.
///
/// Serializes with the exact form field names, so it can be posted
/// directly as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionForm {
    #[serde(rename = "Carat(Weight of Daimond)")]
    pub carat: String,
    #[serde(rename = "Cut(Quality)")]
    pub cut: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Clarity")]
    pub clarity: String,
    #[serde(rename = "Depth")]
    pub depth: String,
    #[serde(rename = "Table")]
    pub table: String,
    #[serde(rename = "X(length)")]
    pub x: String,
    #[serde(rename = "Y(width)")]
    pub y: String,
    #[serde(rename = "Z(Depth)")]
    pub z: String,
}

impl PredictionForm {
    /// Build a form from decoded key/value pairs.
    ///
    /// The first occurrence of a repeated field wins; unknown fields are
    /// ignored. Fields are resolved in form order, so the first missing
    /// one is reported.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let field = |name| lookup(pairs, name).map(str::to_owned);

        Ok(Self {
            carat: field(FIELD_CARAT)?,
            cut: field(FIELD_CUT)?,
            color: field(FIELD_COLOR)?,
            clarity: field(FIELD_CLARITY)?,
            depth: field(FIELD_DEPTH)?,
            table: field(FIELD_TABLE)?,
            x: field(FIELD_X)?,
            y: field(FIELD_Y)?,
            z: field(FIELD_Z)?,
        })
    }
}

/// A parsed prediction request: numbers are numbers, labels are untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub carat: f64,
    pub cut: String,
    pub color: String,
    pub clarity: String,
    pub depth: f64,
    pub table: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PredictionRequest {
    /// Start a request from the three categorical labels; numeric fields
    /// default to zero.
    pub fn new(
        cut: impl Into<String>,
        color: impl Into<String>,
        clarity: impl Into<String>,
    ) -> Self {
        Self {
            carat: 0.0,
            cut: cut.into(),
            color: color.into(),
            clarity: clarity.into(),
            depth: 0.0,
            table: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn carat(mut self, carat: f64) -> Self {
        self.carat = carat;
        self
    }

    pub fn depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn table(mut self, table: f64) -> Self {
        self.table = table;
        self
    }

    /// Read and parse decoded key/value pairs one field at a time, in form
    /// order.
    ///
    /// Each numeric field is parsed as soon as it is read, so a bad number
    /// ahead of a missing field is the error reported. Repeated and unknown
    /// fields behave as in [`PredictionForm::from_pairs`].
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let label = |name| lookup(pairs, name).map(str::to_owned);
        let number = |name| lookup(pairs, name).and_then(|raw| parse_number(name, raw));

        Ok(Self {
            carat: number(FIELD_CARAT)?,
            cut: label(FIELD_CUT)?,
            color: label(FIELD_COLOR)?,
            clarity: label(FIELD_CLARITY)?,
            depth: number(FIELD_DEPTH)?,
            table: number(FIELD_TABLE)?,
            x: number(FIELD_X)?,
            y: number(FIELD_Y)?,
            z: number(FIELD_Z)?,
        })
    }

    /// Set the three dimensions in millimetres.
    pub fn dimensions(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }
}

impl TryFrom<&PredictionForm> for PredictionRequest {
    type Error = LustreError;

    fn try_from(form: &PredictionForm) -> Result<Self> {
        Ok(Self {
            carat: parse_number(FIELD_CARAT, &form.carat)?,
            cut: form.cut.clone(),
            color: form.color.clone(),
            clarity: form.clarity.clone(),
            depth: parse_number(FIELD_DEPTH, &form.depth)?,
            table: parse_number(FIELD_TABLE, &form.table)?,
            x: parse_number(FIELD_X, &form.x)?,
            y: parse_number(FIELD_Y, &form.y)?,
            z: parse_number(FIELD_Z, &form.z)?,
        })
    }
}

impl From<&PredictionRequest> for PredictionForm {
    fn from(request: &PredictionRequest) -> Self {
        Self {
            carat: request.carat.to_string(),
            cut: request.cut.clone(),
            color: request.color.clone(),
            clarity: request.clarity.clone(),
            depth: request.depth.to_string(),
            table: request.table.to_string(),
            x: request.x.to_string(),
            y: request.y.to_string(),
            z: request.z.to_string(),
        }
    }
}

/// First value submitted under `name`.
fn lookup<'a, K, V>(pairs: &'a [(K, V)], name: &'static str) -> Result<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(key, _)| key.as_ref() == name)
        .map(|(_, value)| value.as_ref())
        .ok_or(LustreError::MissingField(name))
}

/// Parse a numeric form value.
///
/// Surrounding whitespace is ignored and single underscores between
/// digits are accepted as separators (`1_000`). Non-finite values parse;
/// the gateway rejects them before they reach a model.
fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    strip_digit_separators(raw.trim())
        .parse::<f64>()
        .map_err(|source| LustreError::InvalidNumber {
            field,
            value: raw.to_owned(),
            source,
        })
}

/// Drop `_` separators when every one sits between two ASCII digits.
/// Anything else is returned unchanged and left for the parser to reject.
fn strip_digit_separators(text: &str) -> Cow<'_, str> {
    if !text.contains('_') {
        return Cow::Borrowed(text);
    }
    let bytes = text.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if separated {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    }
}
