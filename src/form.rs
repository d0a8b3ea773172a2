// 📝 Form Handler - Decide where a search submission goes
// Pure: no HTTP types here, the web layer turns the outcome into a redirect

use serde::Deserialize;

/// Registry company numbers are always eight characters (e.g. "00000006", "SC123456")
pub const COMPANY_NUMBER_LEN: usize = 8;

pub const INVALID_COMPANY_NUMBER: &str = "Company number must be exactly 8 characters.";
pub const INVALID_DETAILS: &str = "Please enter valid details.";

/// The home-page search form. Browsers send every input, so empty strings
/// count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub company_number: Option<String>,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub officer_name: Option<String>,
}

/// Where to send the browser, plus an optional one-shot message for the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub location: String,
    pub flash: Option<String>,
}

impl FormOutcome {
    fn redirect(location: String) -> Self {
        FormOutcome { location, flash: None }
    }

    fn home_with(message: &str) -> Self {
        FormOutcome {
            location: "/".to_string(),
            flash: Some(message.to_string()),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

pub fn is_valid_company_number(company_number: &str) -> bool {
    company_number.chars().count() == COMPANY_NUMBER_LEN
}

/// Pick a lookup path. Priority: company number, company name, officer name.
pub fn dispatch(form: &SearchForm) -> FormOutcome {
    if let Some(company_number) = present(&form.company_number) {
        if !is_valid_company_number(company_number) {
            return FormOutcome::home_with(INVALID_COMPANY_NUMBER);
        }
        return FormOutcome::redirect(format!("/company/{}", urlencoding::encode(company_number)));
    }

    if let Some(company_name) = present(&form.company_name) {
        return FormOutcome::redirect(format!("/search/company/{}", urlencoding::encode(company_name)));
    }

    if let Some(officer_name) = present(&form.officer_name) {
        return FormOutcome::redirect(format!("/search/officer/{}", urlencoding::encode(officer_name)));
    }

    FormOutcome::home_with(INVALID_DETAILS)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(number: Option<&str>, name: Option<&str>, officer: Option<&str>) -> SearchForm {
        SearchForm {
            company_number: number.map(String::from),
            company_name: name.map(String::from),
            officer_name: officer.map(String::from),
        }
    }

    #[test]
    fn test_short_company_number_is_rejected() {
        let outcome = dispatch(&form(Some("1234567"), None, None));

        assert_eq!(outcome.location, "/");
        assert_eq!(outcome.flash.as_deref(), Some(INVALID_COMPANY_NUMBER));
    }

    #[test]
    fn test_valid_company_number_goes_to_detail() {
        let outcome = dispatch(&form(Some("00000006"), Some("ignored"), None));

        assert_eq!(outcome, FormOutcome::redirect("/company/00000006".to_string()));
    }

    #[test]
    fn test_company_number_wins_even_when_invalid() {
        let outcome = dispatch(&form(Some("123456789"), Some("Acme"), Some("Jane Doe")));
        assert_eq!(outcome.location, "/");
        assert!(outcome.flash.is_some());
    }

    #[test]
    fn test_company_name_search() {
        let outcome = dispatch(&form(Some(""), Some("Acme & Sons"), None));
        assert_eq!(outcome.location, "/search/company/Acme%20%26%20Sons");
        assert_eq!(outcome.flash, None);
    }

    #[test]
    fn test_officer_name_search() {
        let outcome = dispatch(&form(None, None, Some("Jane Doe")));
        assert_eq!(outcome.location, "/search/officer/Jane%20Doe");
        assert_eq!(outcome.flash, None);
    }

    #[test]
    fn test_nothing_entered() {
        assert_eq!(dispatch(&SearchForm::default()), FormOutcome::home_with(INVALID_DETAILS));
        assert_eq!(
            dispatch(&form(Some("  "), Some(""), Some(" "))).flash.as_deref(),
            Some(INVALID_DETAILS)
        );
    }

    #[test]
    fn test_company_number_length_counts_characters() {
        assert!(is_valid_company_number("SC123456"));
        assert!(!is_valid_company_number("SC12345"));
        assert!(!is_valid_company_number(""));
    }
}
