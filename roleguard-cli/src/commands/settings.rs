use super::{actor, Context};
use anyhow::{Context as _, Result};
use roleguard_core::settings::Settings;
use std::fmt::Write;
use std::fs;
use std::path::Path;

pub fn defaults() -> Result<String> {
    Ok(serde_json::to_string_pretty(&Settings::defaults())?)
}

pub fn show(ctx: &Context) -> Result<String> {
    let settings = ctx.control().settings().load()?;
    Ok(serde_json::to_string_pretty(&settings)?)
}

pub fn submit(ctx: &Context, roles: &str, form: &Path) -> Result<String> {
    let content = fs::read_to_string(form)
        .with_context(|| format!("Failed to read form submission: {}", form.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse form submission: {}", form.display()))?;
    let host = ctx.host()?;

    let saved = ctx.control().submit_settings(&actor(roles), &raw, &host.roles)?;

    let mut out = serde_json::to_string_pretty(&saved.settings)?;
    for issue in &saved.issues {
        write!(out, "\nwarning: {}", issue)?;
    }
    Ok(out)
}

pub fn uninstall(ctx: &Context, roles: &str) -> Result<String> {
    ctx.control().uninstall(&actor(roles))?;
    Ok("Settings deleted.".to_string())
}
