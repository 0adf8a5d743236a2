//! Multipart upload body for a worker bundle.

use edgeworker_types::{WorkerBundle, WorkerModule};
use reqwest::multipart::{Form, Part};
use serde_json::{json, Map, Value};

use crate::error::ClientResult;

/// Metadata part describing the bundle to the upload API.
pub fn worker_metadata(bundle: &WorkerBundle) -> Value {
    let mut metadata = Map::new();
    let entry_key = if bundle.is_module_worker() { "main_module" } else { "body_part" };
    metadata.insert(entry_key.to_string(), json!(bundle.main_module.name));
    metadata.insert("bindings".to_string(), json!(bundle.bindings));
    if let Some(date) = &bundle.compatibility_date {
        metadata.insert("compatibility_date".to_string(), json!(date));
    }
    if !bundle.compatibility_flags.is_empty() {
        metadata.insert("compatibility_flags".to_string(), json!(bundle.compatibility_flags));
    }
    if !bundle.keep_bindings.is_empty() {
        metadata.insert("keep_bindings".to_string(), json!(bundle.keep_bindings));
    }
    Value::Object(metadata)
}

/// Serialize code, compatibility settings and bindings into an upload form.
pub fn create_worker_upload_form(bundle: &WorkerBundle) -> ClientResult<Form> {
    let metadata = worker_metadata(bundle).to_string();
    let mut form = Form::new().part(
        "metadata",
        Part::text(metadata).file_name("metadata.json").mime_str("application/json")?,
    );

    for module in std::iter::once(&bundle.main_module).chain(bundle.modules.iter()) {
        form = form.part(module.name.clone(), module_part(module)?);
    }

    Ok(form)
}

fn module_part(module: &WorkerModule) -> ClientResult<Part> {
    let part = Part::bytes(module.content.clone())
        .file_name(module.name.clone())
        .mime_str(module.module_type.content_type())?;
    Ok(part)
}
