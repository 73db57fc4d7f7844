//! Fixed-formula calculators that do not depend on catalog records.
//!
//! The hydration deficit is a flat "moderate deficit" estimate of 50 mL/kg,
//! kept as written in the guide. It is illustrative, not a validated
//! clinical constant.

use crate::models::{HydrationPlan, IbuprofenDose};

use super::{validate_weight, CalcResult};

const MODERATE_DEFICIT_ML_PER_KG: f64 = 50.0;

const IBUPROFEN_MG_PER_KG: f64 = 10.0;
/// 100 mg / 5 mL suspension
const IBUPROFEN_MG_PER_ML: f64 = 20.0;

/// Daily maintenance fluids plus a moderate deficit.
///
/// Maintenance is tiered: 100 mL/kg for the first 10 kg, 50 mL/kg for the
/// next 10 kg, 20 mL/kg above 20 kg.
pub fn hydration(weight_kg: Option<f64>) -> CalcResult<HydrationPlan> {
    let weight = validate_weight(weight_kg)?;

    let maintenance = if weight < 10.0 {
        weight * 100.0
    } else if weight <= 20.0 {
        1000.0 + (weight - 10.0) * 50.0
    } else {
        1500.0 + (weight - 20.0) * 20.0
    };
    let deficit = weight * MODERATE_DEFICIT_ML_PER_KG;

    Ok(HydrationPlan {
        maintenance_ml_per_day: maintenance,
        deficit_ml: deficit,
        total_ml: maintenance + deficit,
    })
}

/// Single ibuprofen dose at 10 mg/kg, given every 8 hours.
pub fn ibuprofen_dose(weight_kg: Option<f64>) -> CalcResult<IbuprofenDose> {
    let weight = validate_weight(weight_kg)?;
    let dose_mg = weight * IBUPROFEN_MG_PER_KG;

    Ok(IbuprofenDose {
        dose_mg,
        dose_ml: dose_mg / IBUPROFEN_MG_PER_ML,
    })
}
