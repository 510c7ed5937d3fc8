//! Input documents for file-driven commands
//!
//! Commands that analyze a batch of goals, categories or a projection read
//! it from a JSON or YAML file, picked by extension.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::models::{CategorySpending, Goal};

/// Goals to analyze
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalsDocument {
    #[serde(default)]
    pub goals: Vec<Goal>,
}

/// Category spending for one period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetDocument {
    #[serde(default)]
    pub categories: Vec<CategorySpending>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> PlanResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(PlanError::Validation(format!(
            "Unsupported input file '{}'. Use a .json, .yaml or .yml file",
            path.display()
        ))),
    }
}

/// Parse document contents in the given file's format
pub fn parse_document<T: DeserializeOwned>(path: &Path, contents: &str) -> PlanResult<T> {
    match detect_format(path)? {
        Format::Json => Ok(serde_json::from_str(contents)?),
        Format::Yaml => Ok(serde_yaml::from_str(contents)?),
    }
}

/// Read and parse a JSON or YAML document
pub fn load_document<T: DeserializeOwned>(path: &Path) -> PlanResult<T> {
    // Reject unknown extensions before touching the file
    detect_format(path)?;

    let contents = std::fs::read_to_string(path)
        .map_err(|e| PlanError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_document(path, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectionInput;
    use std::io::Write;

    #[test]
    fn test_parse_goals_json() {
        let doc: GoalsDocument = parse_document(
            Path::new("goals.json"),
            r#"{"goals": [{"id": "car", "name": "Car", "targetCents": 5000000, "monthlyAllocation": 100000}]}"#,
        )
        .unwrap();

        assert_eq!(doc.goals.len(), 1);
        assert_eq!(doc.goals[0].target.cents(), 5000000);
        assert!(doc.goals[0].is_active());
    }

    #[test]
    fn test_parse_budget_yaml() {
        let yaml = "categories:\n  - categoryId: food\n    categoryName: Food\n    budgetCents: 80000\n    spentCents: 90000\n";
        let doc: BudgetDocument = parse_document(Path::new("budget.YML"), yaml).unwrap();

        assert_eq!(doc.categories.len(), 1);
        assert!(doc.categories[0].is_overspent());
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let err = parse_document::<GoalsDocument>(Path::new("goals.toml"), "").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = parse_document::<GoalsDocument>(Path::new("goals.json"), "{").unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));
    }

    #[test]
    fn test_load_document_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"startingBalance": 1000, "monthsAhead": 3}}"#).unwrap();

        let input: ProjectionInput = load_document(file.path()).unwrap();
        assert_eq!(input.months_ahead, Some(3));
        assert_eq!(input.starting_balance.cents(), 1000);
    }
}
