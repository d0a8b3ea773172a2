// Companies House Viewer - Core Library
// Exposes all modules for use in the CLI, the web server, and tests

pub mod models;
pub mod date_format;    // ISO → "4 Mar 2021"
pub mod events;         // Company + officer lifecycle events
pub mod timeline;       // Stable date-ordered merge
pub mod dob;            // (year, month) officer sort key
pub mod form;           // Search form dispatch
pub mod config;
pub mod error;
pub mod client;         // Registry API (reqwest)
pub mod lookup;         // Client calls + shaping, shared by CLI and server

#[cfg(feature = "server")]
pub mod flash;
#[cfg(feature = "server")]
pub mod views;
#[cfg(feature = "server")]
pub mod web;

// Re-export commonly used types
pub use models::{
    Address, AppointedTo, CompanyRecord, CompanySearchItem, CompanySearchResults,
    DateOfBirth, OfficerList, OfficerRecord, PreviousCompanyName,
};
pub use date_format::{format_date, format_date_str, format_month_year};
pub use events::{company_events, officer_events, Event};
pub use timeline::build_timeline;
pub use dob::{attach_dob_sort_keys, dob_sort_key, sort_by_dob, DobSortKey};
pub use form::{dispatch, FormOutcome, SearchForm};
pub use config::Config;
pub use error::{ConfigError, RegistryError};
pub use client::{RegistryApi, RegistryClient};
pub use lookup::{company_overview, officer_search, CompanyOverview};

#[cfg(feature = "server")]
pub use web::{router, AppError, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
