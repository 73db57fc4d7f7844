//! Calculator result models.
//!
//! Numeric fields keep full precision; the `Display` impls produce the
//! rounded, display-ready text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calc::round_to;

/// Volume to administer for a calculable record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DoseResult {
    /// Daily range already divided by the number of administrations.
    PerDay {
        min_ml_per_take: f64,
        max_ml_per_take: f64,
        times_per_day: u32,
    },
    /// Range for a single administration.
    PerTake {
        min_ml: f64,
        max_ml: f64,
        every_hours: Option<u32>,
    },
}

impl DoseResult {
    /// Lower bound in mL per administration.
    pub fn min_ml(&self) -> f64 {
        match self {
            DoseResult::PerDay { min_ml_per_take, .. } => *min_ml_per_take,
            DoseResult::PerTake { min_ml, .. } => *min_ml,
        }
    }

    /// Upper bound in mL per administration.
    pub fn max_ml(&self) -> f64 {
        match self {
            DoseResult::PerDay { max_ml_per_take, .. } => *max_ml_per_take,
            DoseResult::PerTake { max_ml, .. } => *max_ml,
        }
    }
}

impl fmt::Display for DoseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseResult::PerDay {
                min_ml_per_take,
                max_ml_per_take,
                times_per_day,
            } => write!(
                f,
                "between {:.1} and {:.1} mL, {} times per day",
                round_to(*min_ml_per_take, 1),
                round_to(*max_ml_per_take, 1),
                times_per_day
            ),
            DoseResult::PerTake {
                min_ml,
                max_ml,
                every_hours,
            } => {
                write!(
                    f,
                    "between {:.1} and {:.1} mL per take",
                    round_to(*min_ml, 1),
                    round_to(*max_ml, 1)
                )?;
                if let Some(hours) = every_hours {
                    write!(f, ", every {} hours", hours)?;
                }
                Ok(())
            }
        }
    }
}

/// Fluid plan from the hydration calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HydrationPlan {
    pub maintenance_ml_per_day: f64,
    pub deficit_ml: f64,
    pub total_ml: f64,
}

impl fmt::Display for HydrationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Maintenance: {:.0} mL/day | Deficit: {:.0} mL | Total 24h: {:.0} mL",
            round_to(self.maintenance_ml_per_day, 0),
            round_to(self.deficit_ml, 0),
            round_to(self.total_ml, 0)
        )
    }
}

/// Single ibuprofen dose from the weight-based calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IbuprofenDose {
    pub dose_mg: f64,
    pub dose_ml: f64,
}

impl IbuprofenDose {
    /// Fixed administration interval.
    pub const FREQUENCY_TEXT: &'static str = "every 8 hours";
}

impl fmt::Display for IbuprofenDose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dose: {:.1} mL ({:.0} mg) {}",
            round_to(self.dose_ml, 1),
            round_to(self.dose_mg, 0),
            Self::FREQUENCY_TEXT
        )
    }
}
