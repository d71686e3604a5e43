use serde::{Deserialize, Serialize};

use logsift_types::{FilterAction, FilterType, Matching};

use crate::error::{FilterError, Result};
use crate::selection::SelectionSet;
use crate::validation::validate_criteria;

/// One filter operation.
///
/// Fields are private so a model cannot change after it is built; each apply
/// creates a new instance. Stored criteria come back as [`CriteriaDraft`] and
/// must pass validation to become a model again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CriteriaModel {
    #[serde(rename = "type")]
    filter_type: FilterType,
    action: FilterAction,
    values: Vec<String>,
    matching: Matching,
}

impl CriteriaModel {
    /// Build criteria from the current selection.
    ///
    /// The selection must not be empty.
    pub fn build(
        selection: &SelectionSet,
        action: FilterAction,
        matching: Matching,
        filter_type: FilterType,
    ) -> Result<Self> {
        if selection.is_empty() {
            return Err(FilterError::validation(
                "Please select at least one activity to filter",
            ));
        }

        Ok(Self {
            filter_type,
            action,
            values: selection.values().to_vec(),
            matching,
        })
    }

    /// Build activity criteria from the current selection
    pub fn build_activity(
        selection: &SelectionSet,
        action: FilterAction,
        matching: Matching,
    ) -> Result<Self> {
        Self::build(selection, action, matching, FilterType::Activity)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn action(&self) -> FilterAction {
        self.action
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn matching(&self) -> Matching {
        self.matching
    }

    /// Short one-line description, e.g. `retain activity (2 values, any)`
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({} value{}, {})",
            self.action.as_str(),
            self.filter_type.as_str(),
            self.values.len(),
            if self.values.len() == 1 { "" } else { "s" },
            self.matching.as_str()
        )
    }
}

/// Loosely-typed criteria as it arrives from a form or a stored blob
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaDraft {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
}

impl From<&CriteriaModel> for CriteriaDraft {
    fn from(c: &CriteriaModel) -> Self {
        Self {
            filter_type: Some(c.filter_type.as_str().to_string()),
            action: Some(c.action.as_str().to_string()),
            values: Some(c.values.clone()),
            matching: Some(c.matching.as_str().to_string()),
            ..Default::default()
        }
    }
}

impl TryFrom<&CriteriaDraft> for CriteriaModel {
    type Error = FilterError;

    fn try_from(draft: &CriteriaDraft) -> Result<Self> {
        let mut report = validate_criteria(draft);

        // A missing type means activity, but an unknown one is rejected
        let filter_type = match draft.filter_type.as_deref() {
            None => Some(FilterType::Activity),
            Some(s) => FilterType::parse(s),
        };
        if filter_type.is_none() {
            report.push("Invalid filter type");
        }

        let (Some(filter_type), Some(action), Some(matching), Some(values), true) = (
            filter_type,
            draft.action.as_deref().and_then(FilterAction::parse),
            draft.matching.as_deref().and_then(Matching::parse),
            draft.values.clone(),
            report.is_valid,
        ) else {
            return Err(FilterError::Validation(report.errors));
        };

        Ok(Self {
            filter_type,
            action,
            values,
            matching,
        })
    }
}

/// A named filter definition, checked before it is saved
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfigDraft {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub filter_type: Option<String>,

    #[serde(default)]
    pub criteria: Option<CriteriaDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(names: &[&str]) -> SelectionSet {
        let mut sel = SelectionSet::new();
        for n in names {
            sel.toggle(n);
        }
        sel
    }

    #[test]
    fn test_build_from_selection() {
        let c = CriteriaModel::build_activity(
            &selection(&["Review", "Approve"]),
            FilterAction::Retain,
            Matching::Any,
        )
        .unwrap();
        assert_eq!(c.filter_type(), FilterType::Activity);
        assert_eq!(c.values(), ["Review", "Approve"]);
        assert_eq!(c.summary(), "retain activity (2 values, any)");
    }

    #[test]
    fn test_build_empty_selection_rejected() {
        let err = CriteriaModel::build(
            &SelectionSet::new(),
            FilterAction::Remove,
            Matching::All,
            FilterType::Resource,
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::Validation(_)));
    }

    #[test]
    fn test_draft_roundtrip_through_model() {
        let c = CriteriaModel::build_activity(&selection(&["A"]), FilterAction::Remove, Matching::All)
            .unwrap();
        let draft = CriteriaDraft::from(&c);
        assert_eq!(draft.action.as_deref(), Some("remove"));
        assert_eq!(CriteriaModel::try_from(&draft).unwrap(), c);
    }

    #[test]
    fn test_draft_with_bad_fields_collects_errors() {
        let draft = CriteriaDraft {
            filter_type: Some("colour".into()),
            action: Some("keep".into()),
            values: Some(vec![]),
            matching: None,
            ..Default::default()
        };
        let FilterError::Validation(errors) = CriteriaModel::try_from(&draft).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            vec![
                "Invalid action specified",
                "At least one value must be selected",
                "Invalid matching type specified",
                "Invalid filter type",
            ]
        );
    }

    #[test]
    fn test_engine_rechecks_empty_values() {
        let empty = CriteriaModel {
            filter_type: FilterType::Activity,
            action: FilterAction::Retain,
            values: Vec::new(),
            matching: Matching::Any,
        };
        let items = vec![logsift_types::Item::new("Review", 1, 10.0)];
        assert!(matches!(
            crate::engine::FilterEngine::apply(&items, &empty),
            Err(FilterError::InvalidCriteria)
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let c = CriteriaModel::build_activity(&selection(&["Review"]), FilterAction::Retain, Matching::Any)
            .unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "activity", "action": "retain", "values": ["Review"], "matching": "any"})
        );
    }
}
