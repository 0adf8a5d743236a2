//! Worker bundle model, the input of an upload.

use serde::{Deserialize, Serialize};

/// How a module's bytes should be interpreted by the runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    Esm,
    CommonJs,
    Text,
    Data,
    CompiledWasm,
    Json,
}

impl ModuleType {
    /// MIME type used for the module's form part.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Esm => "application/javascript+module",
            Self::CommonJs => "application/javascript",
            Self::Text => "text/plain",
            Self::Data => "application/octet-stream",
            Self::CompiledWasm => "application/wasm",
            Self::Json => "application/json",
        }
    }

    /// Guess the module type from a file name.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("js" | "mjs") => Self::Esm,
            Some("cjs") => Self::CommonJs,
            Some("txt" | "html") => Self::Text,
            Some("wasm") => Self::CompiledWasm,
            Some("json") => Self::Json,
            _ => Self::Data,
        }
    }
}

/// One file of a worker bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerModule {
    /// Module name, used as the form part name and file name
    pub name: String,
    pub content: Vec<u8>,
    pub module_type: ModuleType,
}

impl WorkerModule {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>, module_type: ModuleType) -> Self {
        Self { name: name.into(), content: content.into(), module_type }
    }
}

/// A binding exposed to the worker at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Binding {
    PlainText { name: String, text: String },
    SecretText { name: String, text: String },
    Json { name: String, json: serde_json::Value },
}

impl Binding {
    pub fn name(&self) -> &str {
        match self {
            Self::PlainText { name, .. } | Self::SecretText { name, .. } | Self::Json { name, .. } => {
                name
            },
        }
    }
}

/// Code, compatibility settings and bindings of a worker, ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerBundle {
    /// Script name; empty when the worker is anonymous
    pub name: String,
    /// Entry point. An `Esm` entry uploads as a module worker, anything else
    /// as a service-worker script.
    pub main_module: WorkerModule,
    /// Additional modules shipped alongside the entry point
    pub modules: Vec<WorkerModule>,
    pub compatibility_date: Option<String>,
    pub compatibility_flags: Vec<String>,
    pub bindings: Vec<Binding>,
    /// Binding types to keep from the previous version
    pub keep_bindings: Vec<String>,
}

impl WorkerBundle {
    /// Bundle consisting of a single entry module.
    pub fn new(name: impl Into<String>, main_module: WorkerModule) -> Self {
        Self {
            name: name.into(),
            main_module,
            modules: Vec::new(),
            compatibility_date: None,
            compatibility_flags: Vec::new(),
            bindings: Vec::new(),
            keep_bindings: Vec::new(),
        }
    }

    /// Whether the bundle uploads in modules format.
    pub fn is_module_worker(&self) -> bool {
        self.main_module.module_type == ModuleType::Esm
    }

    /// Worker name, if it has one.
    pub fn name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_type_from_file_name() {
        assert_eq!(ModuleType::from_file_name("index.js"), ModuleType::Esm);
        assert_eq!(ModuleType::from_file_name("worker.MJS"), ModuleType::Esm);
        assert_eq!(ModuleType::from_file_name("legacy.cjs"), ModuleType::CommonJs);
        assert_eq!(ModuleType::from_file_name("add.wasm"), ModuleType::CompiledWasm);
        assert_eq!(ModuleType::from_file_name("blob"), ModuleType::Data);
    }

    #[test]
    fn test_anonymous_bundle_has_no_name() {
        let main = WorkerModule::new("index.js", "export default {}", ModuleType::Esm);
        let bundle = WorkerBundle::new("", main.clone());
        assert_eq!(bundle.name(), None);
        assert!(bundle.is_module_worker());

        let named = WorkerBundle::new("foo", main);
        assert_eq!(named.name(), Some("foo"));
    }
}
