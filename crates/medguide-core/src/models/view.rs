//! Browsing state of the guide.
//!
//! Every user event produces a new [`ViewState`]; nothing is mutated in place.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogIndex, FAMILY_ALL};
use crate::models::MedicationRecord;
use crate::search::normalize;

/// Which section of the guide is showing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Medications,
    Themes,
}

/// A clinical guide page listed next to the medication families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    pub id: String,
    pub name: String,
}

impl Theme {
    /// Built-in guide pages.
    pub fn builtin() -> Vec<Theme> {
        vec![Theme {
            id: "gpc-insulina".into(),
            name: "Guía Clínica de Insulinoterapia".into(),
        }]
    }
}

/// Current view, family filter, theme and normalized search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    pub view: View,
    pub active_family: String,
    pub active_theme: Option<String>,
    /// Already normalized; empty means no search is active.
    pub query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view: View::Medications,
            active_family: FAMILY_ALL.to_string(),
            active_theme: None,
            query: String::new(),
        }
    }
}

impl ViewState {
    /// Search text changed. A non-empty query always shows medications.
    pub fn with_query(&self, raw_query: &str) -> ViewState {
        let query = normalize(raw_query);
        let view = if query.is_empty() {
            self.view
        } else {
            View::Medications
        };
        ViewState {
            view,
            query,
            ..self.clone()
        }
    }

    /// A family was picked: medications view, search cleared, theme dropped.
    pub fn with_family(&self, family: &str) -> ViewState {
        ViewState {
            view: View::Medications,
            active_family: family.to_string(),
            active_theme: None,
            query: String::new(),
        }
    }

    /// A theme was picked: themes view and the family filter resets.
    ///
    /// The search text is left alone. While it is non-empty the view stays on
    /// medications, and stays there once the search is cleared.
    pub fn with_theme(&self, theme_id: &str) -> ViewState {
        let view = if self.is_searching() {
            View::Medications
        } else {
            View::Themes
        };
        ViewState {
            view,
            active_family: FAMILY_ALL.to_string(),
            active_theme: Some(theme_id.to_string()),
            query: self.query.clone(),
        }
    }

    /// Whether a search is active.
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// The view actually on screen once the query is taken into account.
    pub fn effective_view(&self) -> View {
        if self.is_searching() {
            View::Medications
        } else {
            self.view
        }
    }

    /// Records to show for this state: ranked results while searching,
    /// otherwise the family listing. Nothing while a theme page is showing.
    pub fn visible<'a>(&self, catalog: &'a CatalogIndex) -> Vec<&'a MedicationRecord> {
        if self.is_searching() {
            return catalog.search(&self.query);
        }
        match self.view {
            View::Medications => catalog.list_by_family(&self.active_family),
            View::Themes => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMedication;

    #[test]
    fn test_query_is_normalized_and_forces_medications() {
        let state = ViewState::default().with_theme("gpc-insulina");
        assert_eq!(state.view, View::Themes);

        let searching = state.with_query("  Insulína ");
        assert_eq!(searching.query, "  insulina ");
        assert_eq!(searching.view, View::Medications);
        assert_eq!(searching.active_theme.as_deref(), Some("gpc-insulina"));
    }

    #[test]
    fn test_empty_query_keeps_view() {
        let state = ViewState::default().with_theme("gpc-insulina").with_query("");
        assert_eq!(state.view, View::Themes);
        assert!(!state.is_searching());
    }

    #[test]
    fn test_family_selection_clears_search_and_theme() {
        let state = ViewState::default()
            .with_theme("gpc-insulina")
            .with_query("amox")
            .with_family("Antibióticos");

        assert_eq!(state.view, View::Medications);
        assert_eq!(state.active_family, "Antibióticos");
        assert_eq!(state.active_theme, None);
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_theme_selection_resets_family() {
        let state = ViewState::default()
            .with_family("Analgésicos")
            .with_theme("gpc-insulina");

        assert_eq!(state.active_family, FAMILY_ALL);
        assert_eq!(state.effective_view(), View::Themes);
    }

    #[test]
    fn test_search_text_overrides_theme_page() {
        let state = ViewState::default().with_query("para").with_theme("gpc-insulina");
        assert_eq!(state.view, View::Medications);
        assert_eq!(state.active_theme.as_deref(), Some("gpc-insulina"));
        assert_eq!(state.active_family, FAMILY_ALL);

        // Clearing the search lists every medication, not the theme page
        let cleared = state.with_query("");
        assert_eq!(cleared.view, View::Medications);
        assert_eq!(cleared.effective_view(), View::Medications);
    }

    #[test]
    fn test_cleared_search_after_theme_lists_all_medications() {
        let first = RawMedication {
            name: Some("Paracetamol".into()),
            simple_family: Some("Analgésicos".into()),
            ..Default::default()
        };
        let second = RawMedication {
            name: Some("Insulina".into()),
            simple_family: Some("Hormonas".into()),
            ..Default::default()
        };
        let catalog = CatalogIndex::build(vec![first, second]);

        let state = ViewState::default()
            .with_family("Hormonas")
            .with_query("para")
            .with_theme("gpc-insulina")
            .with_query("");

        let names: Vec<&str> = state.visible(&catalog).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Paracetamol", "Insulina"]);
    }

    #[test]
    fn test_transitions_do_not_mutate_previous_state() {
        let before = ViewState::default();
        let _after = before.with_family("Antibióticos");
        assert_eq!(before, ViewState::default());
    }
}
