use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::date::Timestamp;
use crate::{Error, Result};

/// One holiday record as returned by the provider.
///
/// The record is kept opaque so that every provider-defined attribute is
/// written back out untouched. Only `date.iso` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holiday(Map<String, Value>);

impl Holiday {
    /// Raw `date.iso` text, if the record carries one.
    pub fn date_iso(&self) -> Option<&str> {
        self.0.get("date")?.get("iso")?.as_str()
    }

    /// Parsed `date.iso`, offset dropped.
    pub fn timestamp(&self) -> Result<Timestamp> {
        let iso = self
            .date_iso()
            .ok_or_else(|| Error::MissingDate(self.name().unwrap_or_default().to_string()))?;
        Timestamp::parse(iso)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name")?.as_str()
    }
}

impl From<Map<String, Value>> for Holiday {
    #[inline]
    fn from(value: Map<String, Value>) -> Self {
        Holiday(value)
    }
}

impl TryFrom<Value> for Holiday {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
