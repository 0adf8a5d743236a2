use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use edgeworker_client::{
    account_from_env, CancellationToken, ClientConfig, CloudflaredAccess, PreviewClient,
    PREVIEW_TOKEN_HEADER,
};
use edgeworker_types::{PreviewSession, PreviewToken};

use crate::bundle::{load_bundle, preview_context, BundleOptions};
use crate::cli::{Commands, TargetArgs};

pub async fn run(command: Commands, cancel: CancellationToken) -> Result<()> {
    match command {
        Commands::Session { target, json } => handle_session(&target, json, &cancel).await,
        Commands::Preview {
            script,
            name,
            module,
            compatibility_date,
            compatibility_flags,
            vars,
            minimal_mode,
            access,
            target,
            json,
        } => {
            let bundle = load_bundle(BundleOptions {
                script: &script,
                name,
                modules: &module,
                compatibility_date,
                compatibility_flags,
                vars: &vars,
            })?;
            let client = build_client(access)?;
            let account = account_from_env().context("Missing account credentials")?;
            let ctx = preview_context(&target);

            let session = client.create_preview_session(&account, &ctx, &cancel).await?;
            let minimal_mode = minimal_mode.then_some(true);
            let token = client
                .create_worker_preview(&account, &bundle, &ctx, &session, &cancel, minimal_mode)
                .await?;

            print_token(&token, json)
        },
    }
}

async fn handle_session(target: &TargetArgs, json: bool, cancel: &CancellationToken) -> Result<()> {
    let client = build_client(false)?;
    let account = account_from_env().context("Missing account credentials")?;
    let session = client.create_preview_session(&account, &preview_context(target), cancel).await?;
    print_session(&session, json)
}

fn build_client(access: bool) -> Result<PreviewClient> {
    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    let client = PreviewClient::new(config)?;
    if access {
        return Ok(client.with_access_resolver(Arc::new(CloudflaredAccess::new()?)));
    }
    Ok(client)
}

fn print_session(session: &PreviewSession, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }
    println!("{}", "Preview session ready".cyan().bold());
    println!("  Session:   {}", session.id);
    println!("  Host:      {}", session.host);
    println!("  Inspector: {}", mask_query(session.inspector_url.as_str()));
    println!("  Prewarm:   {}", session.prewarm_url);
    Ok(())
}

fn print_token(token: &PreviewToken, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(token)?);
        return Ok(());
    }
    println!("{} Preview available at {}", "✓".green(), format!("https://{}", token.host).green());
    println!("  {}: {}", PREVIEW_TOKEN_HEADER, mask_key(&token.value));
    println!("  Inspector: {}", mask_query(token.inspector_url.as_str()));
    println!("  Use --json to print the full token.");
    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn mask_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?…", base),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn test_mask_query() {
        assert_eq!(
            mask_query("wss://i.example.com/ws?cf_workers_preview_token=abc"),
            "wss://i.example.com/ws?…"
        );
        assert_eq!(mask_query("https://p.example.com/warm"), "https://p.example.com/warm");
    }
}
