//! Filter criteria applied before sorting and pagination

use chrono::NaiveDate;

use crate::models::{UserRecord, UserStatus};

/// Criteria set from the filter modal; empty fields match everything
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub organization: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Calendar day (UTC) the user joined
    pub date_joined: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn is_active(&self) -> bool {
        *self != UserFilter::default()
    }

    pub fn matches(&self, user: &UserRecord) -> bool {
        contains_ignore_case(&user.organization, self.organization.as_deref())
            && contains_ignore_case(&user.full_name, self.full_name.as_deref())
            && contains_ignore_case(&user.email, self.email.as_deref())
            && self
                .date_joined
                .map_or(true, |day| user.date_joined.date_naive() == day)
            && phone_matches(&user.phone_number, self.phone_number.as_deref())
            && self.status.map_or(true, |status| user.status == status)
    }
}

fn contains_ignore_case(value: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Compare digits only, so "0807 890" finds "08078903721"
fn phone_matches(value: &str, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let digits = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    digits(value).contains(&digits(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::user;

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = UserFilter::default();
        assert!(!filter.is_active());
        assert!(filter.matches(&user("1", "Grace Effiom", UserStatus::Unknown)));
    }

    #[test]
    fn test_text_fields_match_substrings() {
        let filter = UserFilter {
            full_name: Some("effi".to_string()),
            organization: Some("LENDSQR".to_string()),
            ..UserFilter::default()
        };
        assert!(filter.is_active());
        assert!(filter.matches(&user("1", "Grace Effiom", UserStatus::Active)));
        assert!(!filter.matches(&user("2", "Tosin Dokunmu", UserStatus::Active)));
    }

    #[test]
    fn test_phone_ignores_formatting() {
        let filter = UserFilter {
            phone_number: Some("0801 234".to_string()),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("1", "Grace Effiom", UserStatus::Active)));
    }

    #[test]
    fn test_status_and_date() {
        let filter = UserFilter {
            status: Some(UserStatus::Blacklisted),
            date_joined: NaiveDate::from_ymd_opt(2020, 5, 15),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("1", "A", UserStatus::Blacklisted)));
        assert!(!filter.matches(&user("2", "B", UserStatus::Active)));

        let other_day = UserFilter {
            date_joined: NaiveDate::from_ymd_opt(2020, 5, 16),
            ..UserFilter::default()
        };
        assert!(!other_day.matches(&user("3", "C", UserStatus::Blacklisted)));
    }
}
