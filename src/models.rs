use serde::Deserialize;

/// Top-level shape of the cartir JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(rename = "Items")]
    pub items: Vec<RawRecord>,
}

/// One survey entry as stored: seven `/`-separated fields packed into `Value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

#[cfg(test)]
impl RawRecord {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub id: String,
    pub date: String,
    pub shift: String,
    pub street: String,
    pub trench: String,
    pub section: String,
    pub value: f64,
    /// Seventh field. Carried through untouched; nothing reads it.
    pub raw_value2: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreetTotal {
    pub street: String,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionAggregate {
    pub section: String,
    pub total_value: f64,
    pub streets: Vec<StreetTotal>,
}
