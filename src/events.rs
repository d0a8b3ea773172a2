// 🧾 Event Extractor - Lifecycle events from registry records
// Company creation, name changes, officer appointments and resignations

use serde::{Deserialize, Serialize};

use crate::models::{CompanyRecord, OfficerRecord};

// ============================================================================
// EVENT
// ============================================================================

/// A dated line on the timeline.
///
/// `date` is the raw ISO string from the registry. It may be missing: a
/// previous name without `ceased_on` still produces its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub date: Option<String>,
    pub description: String,
}

impl Event {
    pub fn new(date: Option<String>, description: impl Into<String>) -> Self {
        Event {
            date,
            description: description.into(),
        }
    }

    /// Sort key: missing dates compare as the empty string
    pub fn date_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Events from a company profile: creation, then two per previous name
pub fn company_events(company: &CompanyRecord) -> Vec<Event> {
    let mut events = Vec::with_capacity(1 + company.previous_company_names.len() * 2);

    if let Some(created) = &company.date_of_creation {
        events.push(Event::new(Some(created.clone()), "Company created"));
    }

    for previous in &company.previous_company_names {
        let name = previous.name.as_deref().unwrap_or("");

        events.push(Event::new(
            previous.effective_from.clone(),
            format!("Company name changed to: {}", name),
        ));
        events.push(Event::new(
            previous.ceased_on.clone(),
            format!("Company name changed from: {}", name),
        ));
    }

    events
}

/// Appointment and resignation events for each officer, in input order
pub fn officer_events(officers: &[OfficerRecord]) -> Vec<Event> {
    let mut events = Vec::new();

    for officer in officers {
        let name = officer.name.as_deref().unwrap_or("");

        if let Some(appointed) = &officer.appointed_on {
            events.push(Event::new(
                Some(appointed.clone()),
                format!("Appointed as officer of company: {}", name),
            ));
        }

        if let Some(resigned) = &officer.resigned_on {
            events.push(Event::new(
                Some(resigned.clone()),
                format!("Resigned as officer of company: {}", name),
            ));
        }
    }

    events
}

// ============================================================================
// TESTS
// ============================================================================
