// 🎂 DOB Sort Key - Order officers by partial birth date
// Unknown birth dates collate first as (0, 0)

use serde::{Deserialize, Serialize};

use crate::date_format::format_month_year;
use crate::models::OfficerRecord;

/// `(year, month)` key; field order gives year-then-month ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DobSortKey {
    pub year: i32,
    pub month: u32,
}

impl DobSortKey {
    /// Sentinel for officers without a full (year, month) birth date
    pub const UNKNOWN: DobSortKey = DobSortKey { year: 0, month: 0 };

    pub fn new(year: i32, month: u32) -> Self {
        DobSortKey { year, month }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// `Mon YYYY` for display, `None` when unknown
    pub fn display(&self) -> Option<String> {
        format_month_year(self.year, self.month)
    }
}

impl From<(i32, u32)> for DobSortKey {
    fn from((year, month): (i32, u32)) -> Self {
        DobSortKey::new(year, month)
    }
}

/// Key for one officer: both parts present or the sentinel
pub fn dob_sort_key(officer: &OfficerRecord) -> DobSortKey {
    match officer.date_of_birth {
        Some(dob) => match (dob.year, dob.month) {
            (Some(year), Some(month)) => DobSortKey::new(year, month),
            _ => DobSortKey::UNKNOWN,
        },
        None => DobSortKey::UNKNOWN,
    }
}

/// Store the derived key on every record
pub fn attach_dob_sort_keys(officers: &mut [OfficerRecord]) {
    for officer in officers.iter_mut() {
        officer.dob_sort_key = Some(dob_sort_key(officer));
    }
}

/// Attach keys, then stable-sort ascending. Equal keys keep upstream order.
pub fn sort_by_dob(officers: &mut [OfficerRecord]) {
    attach_dob_sort_keys(officers);
    officers.sort_by_key(|officer| officer.dob_sort_key.unwrap_or(DobSortKey::UNKNOWN));
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateOfBirth;

    fn officer(name: &str, year: Option<i32>, month: Option<u32>) -> OfficerRecord {
        OfficerRecord {
            name: Some(name.to_string()),
            date_of_birth: if year.is_none() && month.is_none() {
                None
            } else {
                Some(DateOfBirth { year, month })
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_key_from_full_birth_date() {
        let key = dob_sort_key(&officer("A", Some(1980), Some(5)));
        assert_eq!(key, DobSortKey::new(1980, 5));
        assert_eq!(key.display(), Some("May 1980".to_string()));
    }

    #[test]
    fn test_key_defaults_when_missing() {
        assert_eq!(dob_sort_key(&officer("A", None, None)), DobSortKey::UNKNOWN);
        assert_eq!(dob_sort_key(&officer("B", Some(1980), None)), DobSortKey::new(0, 0));
        assert_eq!(dob_sort_key(&officer("C", None, Some(5))), DobSortKey::UNKNOWN);
        assert!(DobSortKey::UNKNOWN.is_unknown());
        assert_eq!(DobSortKey::UNKNOWN.display(), None);
    }

    #[test]
    fn test_key_ordering() {
        let mut keys: Vec<DobSortKey> = vec![(1990, 1).into(), (0, 0).into(), (1980, 5).into()];
        keys.sort();

        assert_eq!(keys, vec![DobSortKey::new(0, 0), DobSortKey::new(1980, 5), DobSortKey::new(1990, 1)]);
    }

    #[test]
    fn test_sort_by_dob_is_stable() {
        let mut officers = vec![
            officer("late", Some(1990), Some(1)),
            officer("unknown-1", None, None),
            officer("early-1", Some(1980), Some(5)),
            officer("unknown-2", Some(1970), None),
            officer("early-2", Some(1980), Some(5)),
        ];

        sort_by_dob(&mut officers);

        let names: Vec<&str> = officers.iter().map(|o| o.display_name()).collect();
        assert_eq!(names, vec!["unknown-1", "unknown-2", "early-1", "early-2", "late"]);
        assert!(officers.iter().all(|o| o.dob_sort_key.is_some()));
    }
}
