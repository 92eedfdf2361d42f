use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Validation failures for candidate search parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Must specify either ll and radius, or near, or both ne and sw")]
    LocationMissing,

    #[error("invalid '{field}': expected {expected}")]
    FieldInvalid {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Relevance,
    Distance,
}

/// Parameters for the Foursquare place search endpoint. Every field is
/// optional; absent fields are omitted from the outbound query entirely
/// rather than sent as null or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceSearchParams {
    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// "lat,lng" center of a circular boundary. Pairs with `radius`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ll: Option<String>,
    /// Circular boundary radius in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    /// Geocodable place name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<String>,
    /// "lat,lng" northeast corner of a rectangular boundary. Pairs with `sw`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ne: Option<String>,
    /// "lat,lng" southwest corner of a rectangular boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    /// Comma-separated category IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Comma-separated chain IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    /// Comma-separated price tiers, 1 (cheap) through 4 (very expensive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Comma-separated response fields to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl PlaceSearchParams {
    /// Build a validated record from the model's decoded tool-call
    /// arguments.
    ///
    /// The location rule is checked against the raw values before any
    /// per-field type check: a request naming no location is a location
    /// error even when some other field is also malformed. Unknown keys
    /// are ignored.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, ParamsError> {
        let circular = location_present(args.get("ll")) && location_present(args.get("radius"));
        let named = location_present(args.get("near"));
        let rectangular = location_present(args.get("ne")) && location_present(args.get("sw"));

        if !(circular || named || rectangular) {
            return Err(ParamsError::LocationMissing);
        }

        Ok(Self {
            query: string_field(args, "query")?,
            ll: string_field(args, "ll")?,
            radius: integer_field(args, "radius")?,
            near: string_field(args, "near")?,
            ne: string_field(args, "ne")?,
            sw: string_field(args, "sw")?,
            limit: integer_field(args, "limit")?,
            sort: sort_field(args)?,
            categories: string_field(args, "categories")?,
            chain_ids: string_field(args, "chain_ids")?,
            open_now: bool_field(args, "open_now")?,
            price: string_field(args, "price")?,
            fields: string_field(args, "fields")?,
        })
    }
}

/// A raw value counts toward the location rule when it is non-null and,
/// for strings, non-empty.
fn location_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn string_field(
    args: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ParamsError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ParamsError::FieldInvalid {
            field,
            expected: "a string",
        }),
    }
}

fn integer_field(
    args: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<u32>, ParamsError> {
    let invalid = ParamsError::FieldInvalid {
        field,
        expected: "a non-negative integer",
    };
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or(invalid),
        Some(_) => Err(invalid),
    }
}

fn bool_field(
    args: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>, ParamsError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ParamsError::FieldInvalid {
            field,
            expected: "a boolean",
        }),
    }
}

fn sort_field(args: &Map<String, Value>) -> Result<Option<SortOrder>, ParamsError> {
    let invalid = ParamsError::FieldInvalid {
        field: "sort",
        expected: "one of RELEVANCE, DISTANCE",
    };
    match args.get("sort") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => match s.as_str() {
            "RELEVANCE" => Ok(Some(SortOrder::Relevance)),
            "DISTANCE" => Ok(Some(SortOrder::Distance)),
            _ => Err(invalid),
        },
        Some(_) => Err(invalid),
    }
}
