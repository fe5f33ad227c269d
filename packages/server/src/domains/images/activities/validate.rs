//! Row validation and prompt normalization.

use serde_json::Value;

use crate::domains::images::data::{RawRow, SpreadsheetRow};

pub const PROMPT_KEY: &str = "actual_prompt_for_image_generating_ai_tool";
pub const FILE_NAME_KEY: &str = "file_name";

/// Substituted for blank or placeholder prompts.
pub const DEFAULT_PROMPT: &str = "a professional high quality stock photograph";

const PLACEHOLDER_PROMPTS: &[&str] = &["n/a", "na", "none", "null", "tbd", "placeholder", "-"];

/// Rows that passed validation, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRows {
    pub rows: Vec<SpreadsheetRow>,
    pub skipped: usize,
}

impl ValidatedRows {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep rows that are objects with a non-blank `file_name` string and a
/// prompt string (which may be empty). Indexes refer to the submitted list.
pub fn validate_rows(rows: &[Value]) -> ValidatedRows {
    let mut validated = ValidatedRows::default();

    for (index, value) in rows.iter().enumerate() {
        match parse_row(index, value) {
            Some(row) => validated.rows.push(row),
            None => validated.skipped += 1,
        }
    }

    validated
}

fn parse_row(index: usize, value: &Value) -> Option<SpreadsheetRow> {
    let object = value.as_object()?;
    if !object.get(PROMPT_KEY).is_some_and(Value::is_string)
        || !object.get(FILE_NAME_KEY).is_some_and(Value::is_string)
    {
        return None;
    }

    let raw: RawRow = serde_json::from_value(value.clone()).ok()?;
    let file_name = raw.file_name?.trim().to_string();
    if file_name.is_empty() {
        return None;
    }

    Some(SpreadsheetRow {
        index,
        prompt: raw.prompt.unwrap_or_default(),
        file_name,
    })
}

/// The prompt actually sent to a generator.
pub fn effective_prompt(raw: &str) -> String {
    let trimmed = raw.trim();
    let is_placeholder = PLACEHOLDER_PROMPTS
        .iter()
        .any(|p| trimmed.eq_ignore_ascii_case(p));

    if trimmed.is_empty() || is_placeholder {
        DEFAULT_PROMPT.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_complete_rows_and_counts_the_rest() {
        let rows = vec![
            json!({ "actual_prompt_for_image_generating_ai_tool": "a red barn", "file_name": "barn1" }),
            json!({ "file_name": "no-prompt" }),
            json!({ "actual_prompt_for_image_generating_ai_tool": "no name" }),
            json!({ "actual_prompt_for_image_generating_ai_tool": "blank name", "file_name": "   " }),
            json!({ "actual_prompt_for_image_generating_ai_tool": 7, "file_name": "numeric" }),
            json!("not an object"),
            json!({ "actual_prompt_for_image_generating_ai_tool": "", "file_name": " barn2 " }),
        ];

        let validated = validate_rows(&rows);

        assert_eq!(validated.skipped, 5);
        assert_eq!(
            validated.rows,
            vec![
                SpreadsheetRow {
                    index: 0,
                    prompt: "a red barn".into(),
                    file_name: "barn1".into(),
                },
                SpreadsheetRow {
                    index: 6,
                    prompt: String::new(),
                    file_name: "barn2".into(),
                },
            ]
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = vec![json!({
            "actual_prompt_for_image_generating_ai_tool": "a lake",
            "file_name": "lake",
            "notes": "hero image",
            "priority": 3
        })];

        let validated = validate_rows(&rows);
        assert_eq!(validated.rows.len(), 1);
        assert_eq!(validated.skipped, 0);
    }

    #[test]
    fn all_invalid_is_empty() {
        let validated = validate_rows(&[json!({}), json!(null)]);
        assert!(validated.is_empty());
        assert_eq!(validated.skipped, 2);
    }

    #[test]
    fn blank_and_placeholder_prompts_use_default() {
        for raw in ["", "   ", "N/A", "na", "None", "NULL", "tbd", "Placeholder", " - "] {
            assert_eq!(effective_prompt(raw), DEFAULT_PROMPT, "prompt {:?}", raw);
        }
    }

    #[test]
    fn real_prompts_are_trimmed_and_kept() {
        assert_eq!(effective_prompt("  a red barn "), "a red barn");
        assert_eq!(effective_prompt("nature"), "nature");
    }
}
