//! Pediatric dose calculator for calculable catalog records.
//!
//! Per-day: `weight * mg/kg/day / concentration / intervals` mL per take.
//! Per-take: `weight * mg/kg/dose / concentration` mL, every `24 / freq` hours.

use tracing::warn;

use crate::models::{DoseResult, DosingParams, MedicationRecord};

use super::{validate_weight, CalcError, CalcResult};

const HOURS_PER_DAY: f64 = 24.0;

/// Compute the volume range to administer for a record and patient weight.
///
/// The weight is checked first, then the record's formula, then its
/// concentration.
pub fn compute_dose(record: &MedicationRecord, weight_kg: Option<f64>) -> CalcResult<DoseResult> {
    let weight = validate_weight(weight_kg)?;

    compute_for_record(record, weight).inspect_err(|e| {
        if e.is_data_integrity() {
            warn!(id = record.id, name = %record.name, error = %e, "Dose calculation failed on record data");
        }
    })
}

fn compute_for_record(record: &MedicationRecord, weight: f64) -> CalcResult<DoseResult> {
    let dosing = record.dosing.as_ref().ok_or(CalcError::NoDosingFormula)?;
    let concentration = record
        .concentration
        .filter(|c| c.is_finite() && *c > 0.0)
        .ok_or(CalcError::InvalidConcentration)?;

    match dosing {
        DosingParams::PerDay {
            min_mg_per_kg_per_day,
            max_mg_per_kg_per_day,
            intervals,
        } => {
            let times_per_day = intervals
                .as_ref()
                .and_then(|i| i.count())
                .ok_or_else(|| {
                    CalcError::InvalidIntervals(
                        intervals.as_ref().map(|i| i.as_text()).unwrap_or_default(),
                    )
                })?;
            let divisor = concentration * f64::from(times_per_day);

            Ok(DoseResult::PerDay {
                min_ml_per_take: weight * min_mg_per_kg_per_day / divisor,
                max_ml_per_take: weight * max_mg_per_kg_per_day / divisor,
                times_per_day,
            })
        }
        DosingParams::PerTake {
            min_mg_per_kg_per_dose,
            max_mg_per_kg_per_dose,
            freq_per_day,
        } => Ok(DoseResult::PerTake {
            min_ml: weight * min_mg_per_kg_per_dose / concentration,
            max_ml: weight * max_mg_per_kg_per_dose / concentration,
            every_hours: freq_per_day.map(|freq| (HOURS_PER_DAY / freq).round() as u32),
        }),
    }
}
