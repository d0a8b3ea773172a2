// 🔎 Lookup Service - Registry calls + local shaping
// Shared by the web handlers and the CLI

use serde::Serialize;
use tracing::info;

use crate::client::RegistryApi;
use crate::dob::sort_by_dob;
use crate::error::RegistryError;
use crate::events::{company_events, officer_events, Event};
use crate::models::{CompanyRecord, CompanySearchResults, OfficerList, OfficerRecord};
use crate::timeline::build_timeline;

/// Everything the company detail view shows
#[derive(Debug, Clone, Serialize)]
pub struct CompanyOverview {
    pub company: CompanyRecord,
    pub officers: Vec<OfficerRecord>,
    pub timeline: Vec<Event>,
}

/// Company profile, officers and the merged timeline.
///
/// Both resources are fetched concurrently; the merge order is fixed
/// (company events, then officer events) regardless of which lands first.
pub async fn company_overview(
    api: &dyn RegistryApi,
    company_number: &str,
) -> Result<CompanyOverview, RegistryError> {
    let (company, officers) = tokio::try_join!(
        api.company(company_number),
        api.company_officers(company_number)
    )?;

    let timeline = build_timeline([company_events(&company), officer_events(&officers.items)]);
    info!(company_number, events = timeline.len(), "built timeline");

    Ok(CompanyOverview {
        company,
        officers: officers.items,
        timeline,
    })
}

/// Officer search results ordered by birth date, unknown first
pub async fn officer_search(
    api: &dyn RegistryApi,
    query: &str,
    items_per_page: u32,
) -> Result<Vec<OfficerRecord>, RegistryError> {
    let mut officers = api.search_officers(query, items_per_page).await?.items;
    sort_by_dob(&mut officers);
    Ok(officers)
}

pub async fn company_search(
    api: &dyn RegistryApi,
    query: &str,
    items_per_page: u32,
) -> Result<CompanySearchResults, RegistryError> {
    api.search_companies(query, items_per_page).await
}

pub async fn officer_appointments(api: &dyn RegistryApi, officer_id: &str) -> Result<OfficerList, RegistryError> {
    api.officer_appointments(officer_id).await
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateOfBirth, PreviousCompanyName};
    use async_trait::async_trait;

    struct StubRegistry {
        officers_fail: bool,
    }

    #[async_trait]
    impl RegistryApi for StubRegistry {
        async fn company(&self, company_number: &str) -> Result<CompanyRecord, RegistryError> {
            Ok(CompanyRecord {
                company_number: Some(company_number.to_string()),
                date_of_creation: Some("2015-05-01".to_string()),
                previous_company_names: vec![PreviousCompanyName {
                    name: Some("Old Co".to_string()),
                    effective_from: Some("2015-05-01".to_string()),
                    ceased_on: Some("2016-01-01".to_string()),
                }],
                ..Default::default()
            })
        }

        async fn company_officers(&self, _company_number: &str) -> Result<OfficerList, RegistryError> {
            if self.officers_fail {
                return Err(RegistryError::Upstream { status: 500, body: String::new() });
            }
            Ok(OfficerList {
                items: vec![OfficerRecord {
                    name: Some("DOE, Jane".to_string()),
                    appointed_on: Some("2015-05-01".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            })
        }

        async fn officer_appointments(&self, _officer_id: &str) -> Result<OfficerList, RegistryError> {
            Ok(OfficerList::default())
        }

        async fn search_officers(&self, _query: &str, _items_per_page: u32) -> Result<OfficerList, RegistryError> {
            let officer = |name: &str, dob: Option<(i32, u32)>| OfficerRecord {
                title: Some(name.to_string()),
                date_of_birth: dob.map(|(year, month)| DateOfBirth {
                    year: Some(year),
                    month: Some(month),
                }),
                ..Default::default()
            };
            Ok(OfficerList {
                items: vec![
                    officer("b", Some((1990, 1))),
                    officer("a", None),
                    officer("c", Some((1980, 5))),
                ],
                ..Default::default()
            })
        }

        async fn search_companies(
            &self,
            _query: &str,
            _items_per_page: u32,
        ) -> Result<CompanySearchResults, RegistryError> {
            Ok(CompanySearchResults::default())
        }
    }

    #[tokio::test]
    async fn test_company_overview_merges_company_first_on_ties() {
        let api = StubRegistry { officers_fail: false };

        let overview = company_overview(&api, "00000006").await.unwrap();

        let descriptions: Vec<&str> = overview.timeline.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Company created",
                "Company name changed to: Old Co",
                "Appointed as officer of company: DOE, Jane",
                "Company name changed from: Old Co",
            ]
        );
        assert_eq!(overview.officers.len(), 1);
    }

    #[tokio::test]
    async fn test_company_overview_propagates_upstream_error() {
        let api = StubRegistry { officers_fail: true };

        let err = company_overview(&api, "00000006").await.unwrap_err();
        assert!(matches!(err, RegistryError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_officer_search_sorted_by_dob() {
        let api = StubRegistry { officers_fail: false };

        let officers = officer_search(&api, "doe", 20).await.unwrap();

        let names: Vec<&str> = officers.iter().map(|o| o.display_name()).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }
}
