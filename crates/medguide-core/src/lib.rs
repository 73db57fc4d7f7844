//! MedGuide Core Library
//!
//! Offline medication guide: catalog search and weight-based dose calculators.
//!
//! # Architecture
//!
//! ```text
//! medicamentos.json ──► CatalogIndex::build (dedup + stable ids)
//!                                │
//!          user event ──► ViewState transition
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!          search (score + rank)      list_by_family
//!                  └─────────────┬─────────────┘
//!                                ▼
//!                       listing for presentation
//!
//! selected record + weight ──► compute_dose ──► display text
//! weight ──► hydration / ibuprofen_dose ──► display text
//! ```
//!
//! The catalog is immutable once built. Every query is a synchronous pure
//! function over it; debouncing keystrokes is left to the presentation layer.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicationRecord, DoseResult, ViewState, etc.)
//! - [`search`]: Text normalizer and relevance scorer
//! - [`catalog`]: Deduplicated catalog index and data loading
//! - [`calc`]: Dose, hydration and ibuprofen calculators
//! - [`config`]: Guide configuration

pub mod calc;
pub mod catalog;
pub mod config;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use calc::{compute_dose, hydration, ibuprofen_dose, CalcError};
pub use catalog::{CatalogError, CatalogIndex, FAMILY_ALL};
pub use config::GuideConfig;
pub use models::{
    DoseIntervals, DoseResult, DosingParams, HydrationPlan, IbuprofenDose, MedicationRecord,
    RawMedication, Theme, View, ViewState,
};
pub use search::{normalize, score};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing::debug;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedGuideError {
    #[error("Load failed: {0}")]
    LoadFailed(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("No dosing formula: {0}")]
    NoDosingFormula(String),

    #[error("Invalid concentration: {0}")]
    InvalidConcentration(String),

    #[error("Invalid dose intervals: {0}")]
    InvalidIntervals(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for MedGuideError {
    fn from(e: CatalogError) -> Self {
        MedGuideError::LoadFailed(e.user_message().to_string())
    }
}

impl From<CalcError> for MedGuideError {
    fn from(e: CalcError) -> Self {
        let message = e.to_string();
        match e {
            CalcError::InvalidWeight => MedGuideError::InvalidWeight(message),
            CalcError::NoDosingFormula => MedGuideError::NoDosingFormula(message),
            CalcError::InvalidConcentration => MedGuideError::InvalidConcentration(message),
            CalcError::InvalidIntervals(_) => MedGuideError::InvalidIntervals(message),
        }
    }
}

impl From<config::ConfigError> for MedGuideError {
    fn from(e: config::ConfigError) -> Self {
        MedGuideError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedGuideError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedGuideError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a guide with the default configuration and an empty catalog.
#[uniffi::export]
pub fn new_med_guide() -> Arc<MedGuide> {
    Arc::new(MedGuide::with_config(GuideConfig::default()))
}

/// Create a guide from a JSON configuration document.
#[uniffi::export]
pub fn new_med_guide_with_config(config_json: String) -> Result<Arc<MedGuide>, MedGuideError> {
    let config = GuideConfig::from_json_str(&config_json)?;
    Ok(Arc::new(MedGuide::with_config(config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Call surface for the presentation layer.
///
/// Until a catalog loads, every query runs against an empty catalog.
#[derive(uniffi::Object)]
pub struct MedGuide {
    catalog: Mutex<Arc<CatalogIndex>>,
    state: Mutex<ViewState>,
    config: GuideConfig,
}

impl MedGuide {
    /// Create a guide with an empty catalog.
    pub fn with_config(config: GuideConfig) -> Self {
        Self {
            catalog: Mutex::new(Arc::new(CatalogIndex::default())),
            state: Mutex::new(ViewState::default()),
            config,
        }
    }

    /// Snapshot of the current catalog.
    fn catalog(&self) -> Result<Arc<CatalogIndex>, MedGuideError> {
        Ok(Arc::clone(&*self.catalog.lock()?))
    }

    fn install(&self, catalog: CatalogIndex) -> Result<u32, MedGuideError> {
        let count = catalog.len() as u32;
        *self.catalog.lock()? = Arc::new(catalog);
        Ok(count)
    }

    /// Apply a state transition and return the resulting listing.
    fn transition<F>(&self, f: F) -> Result<FfiListing, MedGuideError>
    where
        F: FnOnce(&ViewState) -> ViewState,
    {
        let catalog = self.catalog()?;
        let mut state = self.state.lock()?;
        let next = f(&*state);
        debug!(?next, "View state transition");
        *state = next;
        Ok(FfiListing::new(&state, &catalog))
    }
}

#[uniffi::export]
impl MedGuide {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Build the catalog from the data document. Returns the unique count.
    pub fn load_catalog_json(&self, json: String) -> Result<u32, MedGuideError> {
        let catalog = CatalogIndex::from_json_str(&json)?;
        self.install(catalog)
    }

    /// Build the catalog from a fetched response (status + body).
    pub fn load_catalog_response(&self, status: u16, body: String) -> Result<u32, MedGuideError> {
        let catalog = CatalogIndex::from_response(status, &body)?;
        self.install(catalog)
    }

    /// Build the catalog from the configured data file.
    pub fn load_catalog_file(&self) -> Result<u32, MedGuideError> {
        let catalog = CatalogIndex::from_path(&self.config.data_path)?;
        self.install(catalog)
    }

    /// Number of unique medications.
    pub fn medication_count(&self) -> Result<u32, MedGuideError> {
        Ok(self.catalog()?.len() as u32)
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Listing for the current state.
    pub fn current_listing(&self) -> Result<FfiListing, MedGuideError> {
        self.transition(ViewState::clone)
    }

    /// Search text changed.
    pub fn on_query_changed(&self, query: String) -> Result<FfiListing, MedGuideError> {
        self.transition(|s| s.with_query(&query))
    }

    /// A family filter was picked (use "Todos" for all).
    pub fn on_family_selected(&self, family: String) -> Result<FfiListing, MedGuideError> {
        self.transition(|s| s.with_family(&family))
    }

    /// A guide theme was picked.
    pub fn on_theme_selected(&self, theme_id: String) -> Result<FfiListing, MedGuideError> {
        self.transition(|s| s.with_theme(&theme_id))
    }

    /// Full details of one medication.
    pub fn on_record_selected(&self, id: u32) -> Result<FfiMedication, MedGuideError> {
        let catalog = self.catalog()?;
        catalog
            .find_by_id(id as usize)
            .map(FfiMedication::from)
            .ok_or_else(|| MedGuideError::NotFound(format!("medication {}", id)))
    }

    /// Filter options: "Todos" followed by the sorted families.
    pub fn families(&self) -> Result<Vec<String>, MedGuideError> {
        Ok(self.catalog()?.distinct_families())
    }

    /// Built-in guide themes.
    pub fn themes(&self) -> Vec<FfiTheme> {
        Theme::builtin().into_iter().map(FfiTheme::from).collect()
    }

    // =========================================================================
    // Calculators
    // =========================================================================

    /// Pediatric dose for a calculable medication.
    pub fn compute_dose(
        &self,
        id: u32,
        weight_kg: Option<f64>,
    ) -> Result<FfiDoseResult, MedGuideError> {
        let catalog = self.catalog()?;
        let record = catalog
            .find_by_id(id as usize)
            .ok_or_else(|| MedGuideError::NotFound(format!("medication {}", id)))?;
        let result = compute_dose(record, weight_kg)?;
        Ok(result.into())
    }

    /// Maintenance fluids plus moderate deficit.
    pub fn compute_hydration(
        &self,
        weight_kg: Option<f64>,
    ) -> Result<FfiHydrationPlan, MedGuideError> {
        Ok(hydration(weight_kg)?.into())
    }

    /// Weight-based ibuprofen dose.
    pub fn compute_ibuprofen(
        &self,
        weight_kg: Option<f64>,
    ) -> Result<FfiIbuprofenDose, MedGuideError> {
        Ok(ibuprofen_dose(weight_kg)?.into())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Values for the presentation layer and offline cache.
    pub fn config(&self) -> FfiGuideConfig {
        self.config.clone().into()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiView {
    Medications,
    Themes,
}

impl From<View> for FfiView {
    fn from(view: View) -> Self {
        match view {
            View::Medications => FfiView::Medications,
            View::Themes => FfiView::Themes,
        }
    }
}

/// What the presentation should show after an event.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiListing {
    pub view: FfiView,
    pub active_family: String,
    pub active_theme: Option<String>,
    pub searching: bool,
    pub medications: Vec<FfiMedicationCard>,
}

impl FfiListing {
    fn new(state: &ViewState, catalog: &CatalogIndex) -> Self {
        Self {
            view: state.effective_view().into(),
            active_family: state.active_family.clone(),
            active_theme: state.active_theme.clone(),
            searching: state.is_searching(),
            medications: state
                .visible(catalog)
                .into_iter()
                .map(FfiMedicationCard::from)
                .collect(),
        }
    }
}

/// FFI-safe list card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicationCard {
    pub id: u32,
    pub name: String,
    pub presentation: String,
    pub family: String,
    pub uses: String,
}

impl From<&MedicationRecord> for FfiMedicationCard {
    fn from(record: &MedicationRecord) -> Self {
        Self {
            id: record.id as u32,
            name: record.name.clone(),
            presentation: record.presentation.clone(),
            family: record.family.clone(),
            uses: record.uses.clone(),
        }
    }
}

/// FFI-safe medication details.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: u32,
    pub name: String,
    pub presentation: String,
    pub family: String,
    pub simple_family: String,
    pub uses: String,
    pub indications: String,
    pub dose_adult: String,
    pub dose_pediatric: String,
    pub contraindications: String,
    pub is_calculable: bool,
}

impl From<&MedicationRecord> for FfiMedication {
    fn from(record: &MedicationRecord) -> Self {
        Self {
            id: record.id as u32,
            name: record.name.clone(),
            presentation: record.presentation.clone(),
            family: record.family.clone(),
            simple_family: record.simple_family.clone(),
            uses: record.uses.clone(),
            indications: record.indications.clone(),
            dose_adult: record.dose_adult.clone(),
            dose_pediatric: record.dose_pediatric.clone(),
            contraindications: record.contraindications.clone(),
            is_calculable: record.is_calculable,
        }
    }
}

/// FFI-safe dose result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseResult {
    pub text: String,
    pub min_ml: f64,
    pub max_ml: f64,
    pub times_per_day: Option<u32>,
    pub every_hours: Option<u32>,
}

impl From<DoseResult> for FfiDoseResult {
    fn from(result: DoseResult) -> Self {
        let (times_per_day, every_hours) = match &result {
            DoseResult::PerDay { times_per_day, .. } => (Some(*times_per_day), None),
            DoseResult::PerTake { every_hours, .. } => (None, *every_hours),
        };
        Self {
            text: result.to_string(),
            min_ml: result.min_ml(),
            max_ml: result.max_ml(),
            times_per_day,
            every_hours,
        }
    }
}

/// FFI-safe hydration plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHydrationPlan {
    pub text: String,
    pub maintenance_ml_per_day: f64,
    pub deficit_ml: f64,
    pub total_ml: f64,
}

impl From<HydrationPlan> for FfiHydrationPlan {
    fn from(plan: HydrationPlan) -> Self {
        Self {
            text: plan.to_string(),
            maintenance_ml_per_day: plan.maintenance_ml_per_day,
            deficit_ml: plan.deficit_ml,
            total_ml: plan.total_ml,
        }
    }
}

/// FFI-safe ibuprofen dose.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIbuprofenDose {
    pub text: String,
    pub dose_mg: f64,
    pub dose_ml: f64,
}

impl From<IbuprofenDose> for FfiIbuprofenDose {
    fn from(dose: IbuprofenDose) -> Self {
        Self {
            text: dose.to_string(),
            dose_mg: dose.dose_mg,
            dose_ml: dose.dose_ml,
        }
    }
}

/// FFI-safe theme.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTheme {
    pub id: String,
    pub name: String,
}

impl From<Theme> for FfiTheme {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
        }
    }
}

/// FFI-safe configuration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGuideConfig {
    pub data_path: String,
    pub search_debounce_ms: u64,
    pub cache_name: String,
    pub precache_assets: Vec<String>,
}

impl From<GuideConfig> for FfiGuideConfig {
    fn from(config: GuideConfig) -> Self {
        Self {
            data_path: config.data_path,
            search_debounce_ms: config.search_debounce_ms,
            cache_name: config.cache_name,
            precache_assets: config.precache_assets,
        }
    }
}
