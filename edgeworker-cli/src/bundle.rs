//! Assemble a worker bundle from files on disk.

use anyhow::{Context, Result};
use std::path::Path;

use edgeworker_types::{Binding, ModuleType, PreviewContext, Route, RouteConfig, WorkerBundle, WorkerModule};

use crate::cli::TargetArgs;

pub struct BundleOptions<'a> {
    pub script: &'a Path,
    pub name: Option<String>,
    pub modules: &'a [std::path::PathBuf],
    pub compatibility_date: Option<String>,
    pub compatibility_flags: Vec<String>,
    pub vars: &'a [String],
}

pub fn load_bundle(opts: BundleOptions<'_>) -> Result<WorkerBundle> {
    let main_module = read_module(opts.script)?;
    let name = match opts.name {
        Some(name) => name,
        None => opts
            .script
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let mut bundle = WorkerBundle::new(name, main_module);
    for path in opts.modules {
        bundle.modules.push(read_module(path)?);
    }
    bundle.compatibility_date = opts.compatibility_date;
    bundle.compatibility_flags = opts.compatibility_flags;
    for var in opts.vars {
        bundle.bindings.push(parse_var(var)?);
    }
    Ok(bundle)
}

fn read_module(path: &Path) -> Result<WorkerModule> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", path.display()))?;
    let module_type = ModuleType::from_file_name(&name);
    Ok(WorkerModule::new(name, content, module_type))
}

fn parse_var(var: &str) -> Result<Binding> {
    let (name, text) = var
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got `{}`", var))?;
    if name.is_empty() {
        anyhow::bail!("Binding name is empty in `{}`", var);
    }
    Ok(Binding::PlainText { name: name.to_string(), text: text.to_string() })
}

pub fn preview_context(target: &TargetArgs) -> PreviewContext {
    let mut routes: Vec<Route> = target.route.iter().map(|r| Route::from(r.as_str())).collect();
    routes.extend(target.custom_domain.iter().map(|domain| {
        Route::Structured(RouteConfig {
            pattern: domain.clone(),
            zone_id: target.zone.clone(),
            custom_domain: Some(true),
            ..Default::default()
        })
    }));

    PreviewContext {
        zone: target.zone.clone(),
        host: target.host.clone(),
        env: target.env.clone(),
        legacy_env: target.legacy_env,
        routes,
    }
}
