//! Medication catalog models.

use serde::{Deserialize, Serialize};

/// A medication entry exactly as it appears in the data file, before an id
/// is assigned and before deduplication.
///
/// Field names follow the published `medicamentos.json` document. Unknown
/// fields are ignored and missing text fields read as empty. A field of the
/// wrong JSON type is coerced where the meaning is clear and dropped
/// otherwise, so one sloppy entry never fails the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMedication {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub presentation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub family: Option<String>,
    #[serde(default, rename = "simpleFamily", deserialize_with = "lenient::text")]
    pub simple_family: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub uses: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub indications: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub dose_adult: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub dose_pediatric: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub contraindications: Option<String>,
    #[serde(default, rename = "isCalculable", deserialize_with = "lenient::flag")]
    pub is_calculable: Option<bool>,
    /// mg of active substance per mL of preparation
    #[serde(default, deserialize_with = "lenient::number")]
    pub concentration: Option<f64>,
    #[serde(default, rename = "doseMin_mg_kg_dia", deserialize_with = "lenient::number")]
    pub dose_min_mg_kg_day: Option<f64>,
    #[serde(default, rename = "doseMax_mg_kg_dia", deserialize_with = "lenient::number")]
    pub dose_max_mg_kg_day: Option<f64>,
    #[serde(default, rename = "doseIntervals", deserialize_with = "lenient::intervals")]
    pub dose_intervals: Option<DoseIntervals>,
    #[serde(default, rename = "doseMin_mg_kg_dosis", deserialize_with = "lenient::number")]
    pub dose_min_mg_kg_dose: Option<f64>,
    #[serde(default, rename = "doseMax_mg_kg_dosis", deserialize_with = "lenient::number")]
    pub dose_max_mg_kg_dose: Option<f64>,
    /// Administrations per day
    #[serde(default, rename = "doseFreq", deserialize_with = "lenient::number")]
    pub dose_freq: Option<f64>,
}

/// Field decoders that accept whatever JSON type the data file happens to use.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::DoseIntervals;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            _ => None,
        })
    }

    pub fn intervals<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DoseIntervals>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().map(DoseIntervals::Count),
            Value::String(s) => Some(DoseIntervals::Text(s)),
            _ => None,
        })
    }
}

/// Number of daily administrations for a per-day formula.
///
/// The data file carries either a plain number or text such as `"2-3"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DoseIntervals {
    Count(f64),
    Text(String),
}

impl DoseIntervals {
    /// The interval count to divide the daily dose by.
    ///
    /// For a range like `"2-3"` the last number wins. Leading digits of the
    /// trailing segment are used, so `"3 veces"` reads as 3. Numbers go
    /// through the same rule on their written form, so `-3` reads as 3.
    pub fn count(&self) -> Option<u32> {
        let text = self.as_text();
        let last = text.rsplit('-').next()?.trim_start();
        let digits: String = last
            .trim_start_matches('+')
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u32>().ok().filter(|n| *n > 0)
    }

    /// The value as written in the data file.
    pub fn as_text(&self) -> String {
        match self {
            DoseIntervals::Count(n) => n.to_string(),
            DoseIntervals::Text(text) => text.clone(),
        }
    }
}

/// Weight-based dosing formula of a calculable record.
///
/// The two shapes are mutually exclusive; when the data file carries both,
/// the per-day shape wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DosingParams {
    /// A daily mg/kg range split across `intervals` administrations.
    PerDay {
        min_mg_per_kg_per_day: f64,
        max_mg_per_kg_per_day: f64,
        intervals: Option<DoseIntervals>,
    },
    /// A mg/kg range for each single administration.
    PerTake {
        min_mg_per_kg_per_dose: f64,
        max_mg_per_kg_per_dose: f64,
        freq_per_day: Option<f64>,
    },
}

/// A deduplicated, immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    /// Position of the first occurrence in the raw document
    pub id: usize,
    pub name: String,
    pub presentation: String,
    /// Full display label
    pub family: String,
    /// Canonical short label used for filtering
    pub simple_family: String,
    pub uses: String,
    pub indications: String,
    pub dose_adult: String,
    pub dose_pediatric: String,
    pub contraindications: String,
    /// Whether a pediatric dose calculator is offered
    pub is_calculable: bool,
    /// mg per mL
    pub concentration: Option<f64>,
    pub dosing: Option<DosingParams>,
}

/// A numeric parameter carries a formula only when it is finite and positive.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl RawMedication {
    /// Deduplication identity. A missing field is distinct from an empty one.
    pub fn identity(&self) -> (Option<String>, Option<String>) {
        (self.name.clone(), self.presentation.clone())
    }

    /// The `name|presentation` label of [`identity`](Self::identity), for logs.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}",
            self.name.as_deref().unwrap_or_default(),
            self.presentation.as_deref().unwrap_or_default()
        )
    }

    /// Resolve which dosing shape, if any, this entry carries.
    pub fn dosing(&self) -> Option<DosingParams> {
        if let (Some(min), Some(max)) = (
            present(self.dose_min_mg_kg_day),
            present(self.dose_max_mg_kg_day),
        ) {
            return Some(DosingParams::PerDay {
                min_mg_per_kg_per_day: min,
                max_mg_per_kg_per_day: max,
                intervals: self.dose_intervals.clone(),
            });
        }

        if let (Some(min), Some(max)) = (
            present(self.dose_min_mg_kg_dose),
            present(self.dose_max_mg_kg_dose),
        ) {
            return Some(DosingParams::PerTake {
                min_mg_per_kg_per_dose: min,
                max_mg_per_kg_per_dose: max,
                freq_per_day: present(self.dose_freq),
            });
        }

        None
    }

    /// Convert into a catalog record with the given id.
    pub fn into_record(self, id: usize) -> MedicationRecord {
        let dosing = self.dosing();
        MedicationRecord {
            id,
            name: self.name.unwrap_or_default(),
            presentation: self.presentation.unwrap_or_default(),
            family: self.family.unwrap_or_default(),
            simple_family: self.simple_family.unwrap_or_default(),
            uses: self.uses.unwrap_or_default(),
            indications: self.indications.unwrap_or_default(),
            dose_adult: self.dose_adult.unwrap_or_default(),
            dose_pediatric: self.dose_pediatric.unwrap_or_default(),
            contraindications: self.contraindications.unwrap_or_default(),
            is_calculable: self.is_calculable.unwrap_or(false),
            concentration: self.concentration,
            dosing,
        }
    }
}

impl MedicationRecord {
    /// Create a record with required fields; everything else empty.
    pub fn new(id: usize, name: impl Into<String>, presentation: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            presentation: presentation.into(),
            family: String::new(),
            simple_family: String::new(),
            uses: String::new(),
            indications: String::new(),
            dose_adult: String::new(),
            dose_pediatric: String::new(),
            contraindications: String::new(),
            is_calculable: false,
            concentration: None,
            dosing: None,
        }
    }

    /// The `name|presentation` identity used for deduplication.
    pub fn identity_key(&self) -> String {
        format!("{}|{}", self.name, self.presentation)
    }
}
