use serde_json::{json, Value};

pub fn row(prompt: &str, file_name: &str) -> Value {
    json!({
        "actual_prompt_for_image_generating_ai_tool": prompt,
        "file_name": file_name
    })
}

pub fn generate_body(rows: Vec<Value>, ai_model: &str, storage_service: &str, wp: Value) -> Value {
    json!({
        "spreadsheetData": rows,
        "aiModel": ai_model,
        "storageService": storage_service,
        "wpCredentials": wp
    })
}
