//! Rule-table validation for filter criteria and form input
//!
//! A [`Validator`] is parametrized by a table mapping field names to [`Rule`]s.
//! The filter form is one such table ([`Validator::filter_form`]); criteria and
//! saved filter definitions have dedicated structural checks.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use logsift_types::{FilterType, Item};

use crate::criteria::{CriteriaDraft, FilterConfigDraft};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").unwrap());

/// Result of a validation pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Record a failure
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn extend(&mut self, other: ValidationReport) {
        for e in other.errors {
            self.push(e);
        }
    }
}

/// A single check applied to a field value
#[derive(Clone, Debug)]
pub enum Rule {
    Required,
    Email,
    Url,
    Number,
    Integer,
    MinLength(usize),
    MaxLength(usize),
    Range(f64, f64),
    Pattern(Regex),
    Date,
    FutureDate,
    PastDate,
}

impl Rule {
    /// Check a value against this rule
    pub fn test(&self, value: Option<&str>) -> bool {
        let v = value.unwrap_or("");
        match self {
            Self::Required => !v.trim().is_empty(),
            Self::Email => EMAIL_RE.is_match(v),
            Self::Url => URL_RE.is_match(v),
            Self::Number => parse_number(v).is_some(),
            Self::Integer => parse_number(v).is_some_and(|n| n.fract() == 0.0),
            Self::MinLength(min) => v.chars().count() >= *min,
            Self::MaxLength(max) => v.chars().count() <= *max,
            Self::Range(min, max) => parse_number(v).is_some_and(|n| n >= *min && n <= *max),
            Self::Pattern(re) => re.is_match(v),
            Self::Date => parse_date(v).is_some(),
            Self::FutureDate => parse_date(v).is_some_and(|d| d > Utc::now()),
            Self::PastDate => parse_date(v).is_some_and(|d| d < Utc::now()),
        }
    }

    /// User-facing message for a failed check
    pub fn message(&self) -> String {
        match self {
            Self::Required => "This field is required".to_string(),
            Self::Email => "Please enter a valid email address".to_string(),
            Self::Url => "Please enter a valid URL".to_string(),
            Self::Number => "Please enter a valid number".to_string(),
            Self::Integer => "Please enter a valid integer".to_string(),
            Self::MinLength(n) => format!("Minimum length is {} characters", n),
            Self::MaxLength(n) => format!("Maximum length is {} characters", n),
            Self::Range(min, max) => format!("Value must be between {} and {}", min, max),
            Self::Pattern(_) => "Please enter a valid value".to_string(),
            Self::Date => "Please enter a valid date".to_string(),
            Self::FutureDate => "Please enter a future date".to_string(),
            Self::PastDate => "Please enter a past date".to_string(),
        }
    }
}

/// Field validator driven by a rules table
#[derive(Clone, Debug, Default)]
pub struct Validator {
    /// Field name to rules, in declaration order
    rules: Vec<(String, Vec<Rule>)>,

    /// Failures from the most recent checks, per field
    errors: HashMap<String, Vec<String>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rules for a field
    pub fn with_field(mut self, field: impl Into<String>, rules: Vec<Rule>) -> Self {
        let field = field.into();
        self.rules.retain(|(f, _)| *f != field);
        self.rules.push((field, rules));
        self
    }

    /// Rules table used by the filter form
    pub fn filter_form() -> Self {
        Self::new()
            .with_field("activitySelect", vec![Rule::Required])
            .with_field("startDate", vec![Rule::Date])
            .with_field("endDate", vec![Rule::Date])
            .with_field("minValue", vec![Rule::Number])
            .with_field("maxValue", vec![Rule::Number])
            .with_field(
                "filterName",
                vec![Rule::Required, Rule::MinLength(3), Rule::MaxLength(50)],
            )
    }

    pub fn rules_for(&self, field: &str) -> Option<&[Rule]> {
        self.rules
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, r)| r.as_slice())
    }

    /// Validate one field value against its rules.
    ///
    /// Blank values only fail `Required`; other rules apply to non-blank input.
    pub fn validate_field(&mut self, field: &str, value: Option<&str>) -> bool {
        let Some(rules) = self.rules_for(field) else {
            tracing::warn!(field, "No validation rules for field");
            return true;
        };

        let blank = value.is_none_or(|v| v.trim().is_empty());
        let failures: Vec<String> = rules
            .iter()
            .filter(|rule| !blank || matches!(rule, Rule::Required))
            .filter(|rule| !rule.test(value))
            .map(Rule::message)
            .collect();

        let ok = failures.is_empty();
        if ok {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), failures);
        }
        ok
    }

    /// Validate every field of the table against the supplied form values
    pub fn validate_fields(&mut self, values: &HashMap<String, String>) -> ValidationReport {
        let fields: Vec<String> = self.rules.iter().map(|(f, _)| f.clone()).collect();
        for field in &fields {
            self.validate_field(field, values.get(field).map(String::as_str));
        }

        let errors = fields
            .iter()
            .filter_map(|f| self.errors.get(f))
            .flatten()
            .cloned()
            .collect();
        ValidationReport::from_errors(errors)
    }

    /// Failures per field from the most recent checks
    pub fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Structural checks for criteria
pub fn validate_criteria(criteria: &CriteriaDraft) -> ValidationReport {
    let mut report = ValidationReport::valid();

    if !matches!(criteria.action.as_deref(), Some("retain" | "remove")) {
        report.push("Invalid action specified");
    }

    if criteria.values.as_ref().is_none_or(|v| v.is_empty()) {
        report.push("At least one value must be selected");
    }

    if !matches!(criteria.matching.as_deref(), Some("any" | "all")) {
        report.push("Invalid matching type specified");
    }

    if let (Some(start), Some(end)) = (&criteria.start_date, &criteria.end_date) {
        match (parse_date(start), parse_date(end)) {
            (Some(s), Some(e)) if s > e => report.push("Start date must be before end date"),
            (Some(_), Some(_)) => {}
            _ => report.push("Invalid date format"),
        }
    }

    if let (Some(min), Some(max)) = (&criteria.min_value, &criteria.max_value) {
        match (parse_number(min), parse_number(max)) {
            (Some(lo), Some(hi)) if lo > hi => {
                report.push("Minimum value must be less than maximum value")
            }
            (Some(_), Some(_)) => {}
            _ => report.push("Invalid number format"),
        }
    }

    report
}

/// Checks for a named filter definition
pub fn validate_filter_config(config: &FilterConfigDraft) -> ValidationReport {
    let mut report = ValidationReport::valid();

    if config.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        report.push("Filter name is required");
    }

    if config
        .filter_type
        .as_deref()
        .and_then(FilterType::parse)
        .is_none()
    {
        report.push("Invalid filter type");
    }

    match &config.criteria {
        Some(criteria) => report.extend(validate_criteria(criteria)),
        None => report.push("Filter criteria is required"),
    }

    report
}

/// Checks for loaded source items
pub fn validate_items(items: &[Item]) -> ValidationReport {
    let range = Rule::Range(0.0, 100.0);
    let mut report = ValidationReport::valid();

    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            report.push(format!("Activity #{}: name is required", idx + 1));
        }
        if !range.test(Some(&item.frequency.to_string())) {
            report.push(format!(
                "Activity '{}': frequency {}",
                item.name,
                range.message().to_lowercase()
            ));
        }
    }

    report
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD` dates
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(action: &str, values: &[&str], matching: &str) -> CriteriaDraft {
        CriteriaDraft {
            filter_type: Some("activity".into()),
            action: Some(action.into()),
            values: Some(values.iter().map(|v| v.to_string()).collect()),
            matching: Some(matching.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_checks() {
        assert!(Rule::Email.test(Some("ops@example.com")));
        assert!(!Rule::Email.test(Some("ops@example")));
        assert!(Rule::Url.test(Some("https://example.com/logs?id=1")));
        assert!(!Rule::Url.test(Some("example.com")));
        assert!(Rule::Integer.test(Some("3.0")));
        assert!(!Rule::Integer.test(Some("3.5")));
        assert!(!Rule::Number.test(Some("NaN")));
        assert!(Rule::Range(0.0, 100.0).test(Some("100")));
        assert!(!Rule::Range(0.0, 100.0).test(Some("100.5")));
        assert!(Rule::Pattern(Regex::new("^[a-z]+$").unwrap()).test(Some("abc")));
        assert!(Rule::Date.test(Some("2024-02-29")));
        assert!(!Rule::Date.test(Some("2023-02-29")));
        assert!(Rule::PastDate.test(Some("2001-01-01T00:00:00Z")));
        assert!(Rule::FutureDate.test(Some("2999-01-01")));
        assert!(!Rule::Required.test(Some("   ")));
        assert!(!Rule::Required.test(None));
    }

    #[test]
    fn test_rule_messages() {
        assert_eq!(Rule::MinLength(3).message(), "Minimum length is 3 characters");
        assert_eq!(Rule::Range(1.0, 5.5).message(), "Value must be between 1 and 5.5");
        assert_eq!(Rule::Required.message(), "This field is required");
    }

    #[test]
    fn test_filter_form_name_rules() {
        let mut v = Validator::filter_form();
        assert!(!v.validate_field("filterName", Some("ab")));
        assert_eq!(
            v.errors()["filterName"],
            vec!["Minimum length is 3 characters"]
        );
        assert!(v.validate_field("filterName", Some("Main path")));
        assert!(v.is_valid());

        let long = "x".repeat(51);
        assert!(!v.validate_field("filterName", Some(&long)));
    }

    #[test]
    fn test_optional_fields_skip_blank() {
        let mut v = Validator::filter_form();
        assert!(v.validate_field("startDate", None));
        assert!(v.validate_field("minValue", Some("")));
        assert!(!v.validate_field("minValue", Some("ten")));
    }

    #[test]
    fn test_unknown_field_passes() {
        let mut v = Validator::filter_form();
        assert!(v.validate_field("colour", Some("red")));
    }

    #[test]
    fn test_validate_fields_report_order() {
        let mut v = Validator::filter_form();
        let mut values = HashMap::new();
        values.insert("maxValue".to_string(), "lots".to_string());
        let report = v.validate_fields(&values);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "This field is required",
                "Please enter a valid number",
                "This field is required",
            ]
        );

        v.clear();
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_validate_criteria_ok() {
        assert!(validate_criteria(&draft("retain", &["Review"], "any")).is_valid);
    }

    #[test]
    fn test_validate_criteria_ranges() {
        let mut d = draft("remove", &["Review"], "all");
        d.start_date = Some("2024-05-01".into());
        d.end_date = Some("2024-04-01".into());
        d.min_value = Some("9".into());
        d.max_value = Some("3".into());
        assert_eq!(
            validate_criteria(&d).errors,
            vec![
                "Start date must be before end date",
                "Minimum value must be less than maximum value",
            ]
        );

        d.start_date = Some("yesterday".into());
        d.min_value = Some("x".into());
        assert_eq!(
            validate_criteria(&d).errors,
            vec!["Invalid date format", "Invalid number format"]
        );
    }

    #[test]
    fn test_validate_filter_config() {
        let config = FilterConfigDraft {
            name: Some(" ".into()),
            filter_type: Some("weather".into()),
            criteria: None,
        };
        assert_eq!(
            validate_filter_config(&config).errors,
            vec![
                "Filter name is required",
                "Invalid filter type",
                "Filter criteria is required",
            ]
        );

        let config = FilterConfigDraft {
            name: Some("Happy path".into()),
            filter_type: Some("activity".into()),
            criteria: Some(draft("retain", &[], "any")),
        };
        assert_eq!(
            validate_filter_config(&config).errors,
            vec!["At least one value must be selected"]
        );
    }

    #[test]
    fn test_validate_items() {
        let items = vec![Item::new("Review", 1, 50.0), Item::new("", 1, 120.0)];
        let report = validate_items(&items);
        assert_eq!(
            report.errors,
            vec![
                "Activity #2: name is required",
                "Activity '': frequency value must be between 0 and 100",
            ]
        );
    }
}
