// 🗂️ Registry Models - Typed views of Companies House JSON
// Every upstream field is optional; absent keys fall back to None / empty

use serde::{Deserialize, Serialize};

use crate::dob::DobSortKey;

// ============================================================================
// COMPANY
// ============================================================================

/// Company profile as returned by `GET /company/{company_number}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub company_number: Option<String>,

    /// active, dissolved, liquidation, ...
    #[serde(default)]
    pub company_status: Option<String>,

    /// ltd, plc, llp, ...
    #[serde(default, rename = "type")]
    pub company_type: Option<String>,

    /// ISO date the company was incorporated
    #[serde(default)]
    pub date_of_creation: Option<String>,

    #[serde(default)]
    pub date_of_cessation: Option<String>,

    #[serde(default)]
    pub jurisdiction: Option<String>,

    #[serde(default)]
    pub registered_office_address: Option<Address>,

    #[serde(default)]
    pub sic_codes: Vec<String>,

    /// Former names, newest first as the registry lists them
    #[serde(default)]
    pub previous_company_names: Vec<PreviousCompanyName>,
}

impl CompanyRecord {
    /// Display name, falling back to the number when the name is missing
    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .or(self.company_number.as_deref())
            .unwrap_or("Unknown company")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviousCompanyName {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub effective_from: Option<String>,

    #[serde(default)]
    pub ceased_on: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub premises: Option<String>,

    #[serde(default)]
    pub address_line_1: Option<String>,

    #[serde(default)]
    pub address_line_2: Option<String>,

    #[serde(default)]
    pub locality: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

impl Address {
    /// Single-line rendering, skipping empty parts
    pub fn one_line(&self) -> String {
        [
            &self.premises,
            &self.address_line_1,
            &self.address_line_2,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

// ============================================================================
// OFFICERS
// ============================================================================

/// One officer item. The same shape covers company officer lists,
/// appointment lists and officer search hits; each fills different fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerRecord {
    #[serde(default)]
    pub name: Option<String>,

    /// Search results carry the display name here instead of `name`
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub officer_role: Option<String>,

    #[serde(default)]
    pub appointed_on: Option<String>,

    #[serde(default)]
    pub resigned_on: Option<String>,

    #[serde(default)]
    pub date_of_birth: Option<DateOfBirth>,

    #[serde(default)]
    pub address_snippet: Option<String>,

    #[serde(default)]
    pub appointed_to: Option<AppointedTo>,

    #[serde(default)]
    pub links: Option<OfficerLinks>,

    /// Derived locally; never read from upstream JSON
    #[serde(default, skip_deserializing)]
    pub dob_sort_key: Option<DobSortKey>,
}

impl OfficerRecord {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("Unknown officer")
    }

    /// Local path of this officer's appointment list, if the registry linked one
    pub fn appointments_path(&self) -> Option<&str> {
        let links = self.links.as_ref()?;
        links
            .officer
            .as_ref()
            .and_then(|officer| officer.appointments.as_deref())
            .or(links.self_link.as_deref().filter(|path| path.ends_with("/appointments")))
    }
}

/// Partial birth date; the registry withholds the day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOfBirth {
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointedTo {
    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub company_number: Option<String>,

    #[serde(default)]
    pub company_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerLinks {
    #[serde(default, rename = "self")]
    pub self_link: Option<String>,

    #[serde(default)]
    pub officer: Option<OfficerLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerLink {
    #[serde(default)]
    pub appointments: Option<String>,
}

/// `{ items: [...] }` wrapper shared by officer lists, appointments and officer search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerList {
    #[serde(default)]
    pub items: Vec<OfficerRecord>,

    /// Present on appointment lists: the officer the list belongs to
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub total_results: Option<u64>,
}

// ============================================================================
// COMPANY SEARCH
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchResults {
    #[serde(default)]
    pub items: Vec<CompanySearchItem>,

    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchItem {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub company_number: Option<String>,

    #[serde(default)]
    pub company_status: Option<String>,

    #[serde(default)]
    pub date_of_creation: Option<String>,

    #[serde(default)]
    pub address_snippet: Option<String>,
}

// ============================================================================
// TESTS
// ============================================================================
