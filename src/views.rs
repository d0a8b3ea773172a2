// 🖼️ Views - minijinja templates and their contexts
//
// Templates are compiled into the binary. Names end in `.html`, which turns
// on minijinja's HTML auto-escaping for every registry-sourced string.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::date_format::format_date_str;
use crate::dob::dob_sort_key;
use crate::lookup::CompanyOverview;
use crate::models::{CompanySearchResults, OfficerList, OfficerRecord};

const BASE_TEMPLATE: &str = include_str!("../templates/base.html.jinja");
const HOME_TEMPLATE: &str = include_str!("../templates/home.html.jinja");
const COMPANY_TEMPLATE: &str = include_str!("../templates/company.html.jinja");
const APPOINTMENTS_TEMPLATE: &str = include_str!("../templates/appointments.html.jinja");
const OFFICER_SEARCH_TEMPLATE: &str = include_str!("../templates/officer_search.html.jinja");
const COMPANY_SEARCH_TEMPLATE: &str = include_str!("../templates/company_search.html.jinja");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html.jinja");

// ============================================================================
// VIEW MODELS
// ============================================================================

/// One officer row, flattened for the templates
#[derive(Debug, Clone, Serialize)]
pub struct OfficerRow {
    pub name: String,
    pub role: Option<String>,
    pub appointed_on: Option<String>,
    pub resigned_on: Option<String>,
    pub born: Option<String>,
    pub address: Option<String>,
    pub appointments_path: Option<String>,
    pub company_name: Option<String>,
    pub company_number: Option<String>,
}

impl From<&OfficerRecord> for OfficerRow {
    fn from(officer: &OfficerRecord) -> Self {
        let key = officer.dob_sort_key.unwrap_or_else(|| dob_sort_key(officer));
        let appointed_to = officer.appointed_to.as_ref();

        OfficerRow {
            name: officer.display_name().to_string(),
            role: officer.officer_role.as_ref().map(|role| role.replace('-', " ")),
            appointed_on: officer.appointed_on.clone(),
            resigned_on: officer.resigned_on.clone(),
            born: key.display(),
            address: officer.address_snippet.clone(),
            appointments_path: officer.appointments_path().map(String::from),
            company_name: appointed_to.and_then(|a| a.company_name.clone()),
            company_number: appointed_to.and_then(|a| a.company_number.clone()),
        }
    }
}

fn rows(officers: &[OfficerRecord]) -> Vec<OfficerRow> {
    officers.iter().map(OfficerRow::from).collect()
}

// ============================================================================
// TEMPLATE ENVIRONMENT
// ============================================================================

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("home.html", HOME_TEMPLATE)?;
        env.add_template("company.html", COMPANY_TEMPLATE)?;
        env.add_template("appointments.html", APPOINTMENTS_TEMPLATE)?;
        env.add_template("officer_search.html", OFFICER_SEARCH_TEMPLATE)?;
        env.add_template("company_search.html", COMPANY_SEARCH_TEMPLATE)?;
        env.add_template("error.html", ERROR_TEMPLATE)?;

        env.add_filter("format_date", |value: Option<String>| {
            value.map(|date| format_date_str(&date)).unwrap_or_default()
        });

        Ok(Views { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    pub fn home(&self, flash: Option<&str>) -> Result<String, minijinja::Error> {
        self.render("home.html", context! { flash })
    }

    pub fn company(&self, overview: &CompanyOverview, flash: Option<&str>) -> Result<String, minijinja::Error> {
        let company = &overview.company;
        self.render(
            "company.html",
            context! {
                flash,
                title => company.display_name(),
                company,
                address => company.registered_office_address.as_ref().map(|a| a.one_line()),
                timeline => &overview.timeline,
                officers => rows(&overview.officers),
            },
        )
    }

    pub fn appointments(
        &self,
        officer_id: &str,
        appointments: &OfficerList,
        flash: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let name = appointments
            .name
            .as_deref()
            .or_else(|| appointments.items.first().map(|item| item.display_name()))
            .unwrap_or(officer_id);

        self.render(
            "appointments.html",
            context! {
                flash,
                title => name,
                officer_id,
                total => appointments.total_results.unwrap_or(appointments.items.len() as u64),
                appointments => rows(&appointments.items),
            },
        )
    }

    pub fn officer_search(
        &self,
        query: &str,
        officers: &[OfficerRecord],
        flash: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "officer_search.html",
            context! {
                flash,
                title => format!("Officers matching \"{}\"", query),
                query,
                officers => rows(officers),
            },
        )
    }

    pub fn company_search(
        &self,
        query: &str,
        results: &CompanySearchResults,
        flash: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "company_search.html",
            context! {
                flash,
                title => format!("Companies matching \"{}\"", query),
                query,
                companies => &results.items,
                total => results.total_results,
            },
        )
    }

    pub fn error(&self, status: u16, message: &str, flash: Option<&str>) -> Result<String, minijinja::Error> {
        self.render(
            "error.html",
            context! {
                title => "Something went wrong",
                status,
                message,
                flash,
            },
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::models::{CompanyRecord, CompanySearchItem, DateOfBirth};

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_company_page_formats_dates_and_escapes() {
        let views = Views::new().unwrap();
        let overview = CompanyOverview {
            company: CompanyRecord {
                company_name: Some("<b>ACME</b> LTD".to_string()),
                company_number: Some("00000006".to_string()),
                date_of_creation: Some("2021-03-04".to_string()),
                ..Default::default()
            },
            officers: vec![],
            timeline: vec![
                Event::new(None, "Company name changed from: X"),
                Event::new(Some("2021-03-04".to_string()), "Company created"),
            ],
        };

        let html = views.company(&overview, Some("hello")).unwrap();

        assert!(html.contains("4 Mar 2021"));
        assert!(html.contains("Date unknown"));
        assert!(html.contains("&lt;b&gt;ACME"));
        assert!(!html.contains("<b>ACME</b>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_officer_row_born_and_role() {
        let officer = OfficerRecord {
            title: Some("Jane DOE".to_string()),
            officer_role: Some("corporate-secretary".to_string()),
            date_of_birth: Some(DateOfBirth { year: Some(1980), month: Some(5) }),
            ..Default::default()
        };

        let row = OfficerRow::from(&officer);

        assert_eq!(row.name, "Jane DOE");
        assert_eq!(row.role.as_deref(), Some("corporate secretary"));
        assert_eq!(row.born.as_deref(), Some("May 1980"));
    }

    #[test]
    fn test_company_search_links_to_detail() {
        let views = Views::new().unwrap();
        let results = CompanySearchResults {
            items: vec![CompanySearchItem {
                title: Some("ACME LTD".to_string()),
                company_number: Some("00000006".to_string()),
                ..Default::default()
            }],
            total_results: Some(1),
        };

        let html = views.company_search("acme", &results, None).unwrap();

        assert!(html.contains("href=\"/company/00000006\""));
        assert!(html.contains("ACME LTD"));
    }

    #[test]
    fn test_error_page() {
        let html = Views::new()
            .unwrap()
            .error(502, "The registry is unavailable.", Some("Please enter valid details."))
            .unwrap();
        assert!(html.contains("502"));
        assert!(html.contains("The registry is unavailable."));
        assert!(html.contains("Please enter valid details."));
    }
}
