/// Shared data structures for the application state
///
/// These structs represent the catalog records exactly as they
/// appear in `apartments.json`. Hand-edited catalogs are common, so the
/// numeric fields also accept `1.0` for integers and numbers written as
/// strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Represents a single apartment unit in the catalog
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Unit {
    /// Unique identifier (e.g., "A1")
    pub id: String,
    /// Floor the unit is on
    #[serde(deserialize_with = "integer")]
    pub nivel: i64,
    /// Number of bedrooms
    #[serde(deserialize_with = "count")]
    pub habitaciones: u32,
    /// Floor area in square meters
    #[serde(deserialize_with = "number")]
    pub area_m2: f64,
    /// Price in USD (None = price not published or unreadable)
    #[serde(default, deserialize_with = "optional_number")]
    pub precio_usd: Option<f64>,
    /// true = available, false = reserved
    pub disponible: bool,
    /// Free-text description
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Floor-plan image path, relative to the catalog directory
    #[serde(default)]
    pub plano: Option<String>,
}

impl Unit {
    /// Text the search box matches against: "<id> <descripcion>"
    pub fn search_text(&self) -> String {
        format!("{} {}", self.id, self.descripcion.as_deref().unwrap_or(""))
    }

    /// Whether the unit is reserved (inverse of `disponible`)
    pub fn is_reserved(&self) -> bool {
        !self.disponible
    }
}

/// A JSON number, or a string holding one
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(v) => Some(*v),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Numeric::deserialize(deserializer)?
        .value()
        .ok_or_else(|| de::Error::custom("expected a number"))
}

/// Unreadable prices become "not published" instead of failing the record
fn optional_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Numeric>::deserialize(deserializer)?.and_then(|n| n.value()))
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let v = number(deserializer)?;
    if v.fract() != 0.0 || v < i64::MIN as f64 || v > i64::MAX as f64 {
        return Err(de::Error::custom(format!("expected a whole number, got {}", v)));
    }
    Ok(v as i64)
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let v = integer(deserializer)?;
    u32::try_from(v).map_err(|_| de::Error::custom(format!("expected a count, got {}", v)))
}
