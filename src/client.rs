// 📡 Registry Client - Companies House API over reqwest
// `RegistryApi` is what the web layer and CLI call; `RegistryClient` talks HTTP

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RegistryError;
use crate::models::{CompanyRecord, CompanySearchResults, OfficerList};

#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// `GET /company/{company_number}`
    async fn company(&self, company_number: &str) -> Result<CompanyRecord, RegistryError>;

    /// `GET /company/{company_number}/officers`
    async fn company_officers(&self, company_number: &str) -> Result<OfficerList, RegistryError>;

    /// `GET /officers/{officer_id}/appointments`
    async fn officer_appointments(&self, officer_id: &str) -> Result<OfficerList, RegistryError>;

    /// `GET /search/officers?q=&items_per_page=`
    async fn search_officers(&self, query: &str, items_per_page: u32) -> Result<OfficerList, RegistryError>;

    /// `GET /search/companies?q=&items_per_page=`
    async fn search_companies(
        &self,
        query: &str,
        items_per_page: u32,
    ) -> Result<CompanySearchResults, RegistryError>;
}

/// HTTP client for the Companies House public data API.
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RegistryClient {
    /// `base_url` should be like `https://api.company-information.service.gov.uk` (no trailing slash).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated GET; decodes the body as `T` only on a 2xx status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RegistryError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, "registry request");
        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "registry returned an error status");
            return Err(RegistryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

/// Encode one path segment so ids and numbers cannot escape their slot
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn company(&self, company_number: &str) -> Result<CompanyRecord, RegistryError> {
        let company: CompanyRecord = self
            .get_json(&format!("/company/{}", segment(company_number)), &[])
            .await?;
        info!(company_number, "fetched company");
        Ok(company)
    }

    async fn company_officers(&self, company_number: &str) -> Result<OfficerList, RegistryError> {
        let officers: OfficerList = self
            .get_json(&format!("/company/{}/officers", segment(company_number)), &[])
            .await?;
        info!(company_number, count = officers.items.len(), "fetched officers");
        Ok(officers)
    }

    async fn officer_appointments(&self, officer_id: &str) -> Result<OfficerList, RegistryError> {
        let appointments: OfficerList = self
            .get_json(&format!("/officers/{}/appointments", segment(officer_id)), &[])
            .await?;
        info!(officer_id, count = appointments.items.len(), "fetched appointments");
        Ok(appointments)
    }

    async fn search_officers(&self, query: &str, items_per_page: u32) -> Result<OfficerList, RegistryError> {
        let results: OfficerList = self
            .get_json(
                "/search/officers",
                &[("q", query.to_string()), ("items_per_page", items_per_page.to_string())],
            )
            .await?;
        info!(query, count = results.items.len(), "officer search");
        Ok(results)
    }

    async fn search_companies(
        &self,
        query: &str,
        items_per_page: u32,
    ) -> Result<CompanySearchResults, RegistryError> {
        let results: CompanySearchResults = self
            .get_json(
                "/search/companies",
                &[("q", query.to_string()), ("items_per_page", items_per_page.to_string())],
            )
            .await?;
        info!(query, count = results.items.len(), "company search");
        Ok(results)
    }
}
