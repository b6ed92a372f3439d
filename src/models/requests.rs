use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

const MAX_HEIGHT_INPUT: usize = 10;
const MAX_DATE_INPUT: usize = 10;

/// Request to verify a one-time code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(alias = "challenge_id", rename = "challengeId")]
    pub challenge_id: Uuid,
    pub code: String,
}

/// Profile created after the first login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileSetupRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_date_of_birth"))]
    #[serde(alias = "date_of_birth", rename = "dateOfBirth")]
    pub date_of_birth: String,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(length(min = 1))]
    #[serde(alias = "looking_for", rename = "lookingFor")]
    pub looking_for: String,
    #[validate(custom(function = "validate_height"))]
    pub height: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(alias = "about_yourself", rename = "aboutYourself")]
    pub about_yourself: String,
    #[validate(length(min = 1))]
    pub languages: Vec<String>,
    #[serde(default, alias = "photo_ref", rename = "photoRef")]
    pub photo_ref: Option<String>,
}

/// What the user is looking for in a partner
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_range"))]
pub struct PartnerPreferencesRequest {
    #[validate(range(min = 18, max = 100))]
    #[serde(alias = "age_min", rename = "ageMin")]
    pub age_min: u8,
    #[validate(range(min = 18, max = 100))]
    #[serde(alias = "age_max", rename = "ageMax")]
    pub age_max: u8,
    #[validate(range(min = 1))]
    #[serde(alias = "distance_miles", rename = "distanceMiles")]
    pub distance_miles: u16,
    #[validate(custom(function = "validate_height"))]
    #[serde(alias = "height_min", rename = "heightMin")]
    pub height_min: String,
    #[validate(custom(function = "validate_height"))]
    #[serde(alias = "height_max", rename = "heightMax")]
    pub height_max: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

fn validate_age_range(prefs: &PartnerPreferencesRequest) -> Result<(), ValidationError> {
    if prefs.age_min > prefs.age_max {
        return Err(ValidationError::new("age_range"));
    }
    Ok(())
}

fn validate_height(value: &str) -> Result<(), ValidationError> {
    if is_valid_height(value) {
        Ok(())
    } else {
        Err(ValidationError::new("height_format"))
    }
}

fn validate_date_of_birth(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date_of_birth"))
}

/// Strip everything but digits, `'` and `"` from a height input
///
/// Returns `None` when the cleaned input is too long, in which case the
/// previous value should be kept.
pub fn sanitize_height_input(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '\'' || *c == '"')
        .collect();
    (cleaned.len() <= MAX_HEIGHT_INPUT).then_some(cleaned)
}

/// Accepts feet and inches (`5'8"`, `5'8`, `5'`) or a plain cm value (`172`)
pub fn is_valid_height(text: &str) -> bool {
    is_feet_inches(text) || (text.len() <= 3 && !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
}

// Shape: digits, optional ' or ", digits, optional "
fn is_feet_inches(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    let feet_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == feet_start {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'\'' || bytes[i] == b'"') {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'"' {
        i += 1;
    }
    i == bytes.len()
}

/// Keep digits and hyphens and insert hyphens to shape `YYYY-MM-DD`
///
/// Returns `None` when the cleaned input is longer than a full date.
pub fn format_date_input(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.len() > MAX_DATE_INPUT {
        return None;
    }

    let mut formatted = cleaned.clone();
    if cleaned.len() >= 4 && !cleaned.contains('-') {
        formatted = format!("{}-{}", &cleaned[..4], &cleaned[4..]);
    }
    if cleaned.len() >= 7 && formatted.split('-').count() == 2 {
        formatted = format!("{}-{}", &formatted[..7], &formatted[7..]);
    }
    Some(formatted)
}

/// Language tags entered one at a time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageList(Vec<String>);

impl LanguageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed language; blank input is ignored
    pub fn add(&mut self, input: &str) -> bool {
        let language = input.trim();
        if language.is_empty() {
            return false;
        }
        self.0.push(language.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileSetupRequest {
        ProfileSetupRequest {
            name: "John Doe".to_string(),
            date_of_birth: "1995-04-12".to_string(),
            gender: "male".to_string(),
            looking_for: "female".to_string(),
            height: "5'10\"".to_string(),
            email: "john@example.com".to_string(),
            about_yourself: "Runner and coffee snob".to_string(),
            languages: vec!["English".to_string()],
            photo_ref: Some("selfie".to_string()),
        }
    }

    #[test]
    fn test_height_formats() {
        assert!(is_valid_height("5'8\""));
        assert!(is_valid_height("5'8"));
        assert!(is_valid_height("172"));
        assert!(!is_valid_height(""));
        assert!(!is_valid_height("5'8'"));
        assert!(!is_valid_height("'8"));
    }

    #[test]
    fn test_sanitize_height_input() {
        assert_eq!(sanitize_height_input("5 ft 8\""), Some("58\"".to_string()));
        assert_eq!(sanitize_height_input("172cm"), Some("172".to_string()));
        assert_eq!(sanitize_height_input("12345678901"), None);
    }

    #[test]
    fn test_format_date_input() {
        assert_eq!(format_date_input("1995"), Some("1995-".to_string()));
        assert_eq!(format_date_input("19950412"), Some("1995-04-12".to_string()));
        assert_eq!(format_date_input("1995-04"), Some("1995-04-".to_string()));
        assert_eq!(format_date_input("1995/04/12"), Some("1995-04-12".to_string()));
        assert_eq!(format_date_input("1995-04-12-1"), None);
    }

    #[test]
    fn test_language_list() {
        let mut languages = LanguageList::new();
        assert!(languages.add("  English "));
        assert!(!languages.add("   "));
        assert!(languages.add("Spanish"));

        assert_eq!(languages.remove(0), Some("English".to_string()));
        assert_eq!(languages.remove(5), None);
        assert_eq!(languages.as_slice(), ["Spanish".to_string()]);
    }

    #[test]
    fn test_profile_valid() {
        assert!(profile().validate().is_ok());
    }

    #[test]
    fn test_profile_requires_language_and_email() {
        let mut request = profile();
        request.languages.clear();
        request.email = "not-an-email".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("languages"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_profile_rejects_bad_date() {
        let mut request = profile();
        request.date_of_birth = "1995-13-40".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_partner_preferences_age_range() {
        let request = PartnerPreferencesRequest {
            age_min: 35,
            age_max: 25,
            distance_miles: 25,
            height_min: "5'2\"".to_string(),
            height_max: "180".to_string(),
            languages: vec![],
        };
        assert!(request.validate().is_err());

        let request = PartnerPreferencesRequest { age_min: 25, age_max: 35, ..request };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_partner_preferences_field_limits() {
        let valid = PartnerPreferencesRequest {
            age_min: 18,
            age_max: 100,
            distance_miles: 1,
            height_min: "5'".to_string(),
            height_max: "190".to_string(),
            languages: vec![],
        };
        assert!(valid.validate().is_ok());

        let young = PartnerPreferencesRequest { age_min: 17, ..valid.clone() };
        assert!(young.validate().is_err());

        let old = PartnerPreferencesRequest { age_max: 101, ..valid.clone() };
        assert!(old.validate().is_err());

        let nowhere = PartnerPreferencesRequest { distance_miles: 0, ..valid.clone() };
        assert!(nowhere.validate().is_err());

        let blank_height = PartnerPreferencesRequest { height_max: String::new(), ..valid };
        assert!(blank_height.validate().is_err());
    }
}
