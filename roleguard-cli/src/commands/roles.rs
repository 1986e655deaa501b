use super::{actor, Context};
use anyhow::{Context as _, Result};
use roleguard_core::export::StaticTokenVerifier;
use roleguard_core::policy::CapabilityRemoval;
use std::fs;
use std::path::Path;

pub fn activate(ctx: &Context, roles: &str) -> Result<String> {
    let mut host = ctx.host()?;
    let removed = ctx.control().activate(&actor(roles), &mut host.roles)?;
    host.save(ctx.host_path()?)?;

    Ok(format!("Activated with default settings.\n{}", describe(&removed)))
}

pub fn enforce(ctx: &Context) -> Result<String> {
    let mut host = ctx.host()?;
    let removed = ctx.control().enforce_capabilities(&mut host.roles);
    if !removed.is_empty() {
        host.save(ctx.host_path()?)?;
    }

    Ok(describe(&removed))
}

pub fn export_role(
    ctx: &Context,
    roles: &str,
    token: &str,
    output: Option<&Path>,
) -> Result<String> {
    let verifier = StaticTokenVerifier::from_config(&ctx.config.policy);
    let export = ctx.control().export_role(&actor(roles), token, &verifier)?;

    match output {
        Some(path) => {
            fs::write(path, export.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(format!("Wrote {} to {}", export.file_name, path.display()))
        }
        None => Ok(export.body.trim_end().to_string()),
    }
}

fn describe(removed: &[CapabilityRemoval]) -> String {
    if removed.is_empty() {
        return "No capabilities removed.".to_string();
    }

    let mut lines = vec![format!("Removed {} capabilities:", removed.len())];
    lines.extend(removed.iter().map(|r| format!("  {}: {}", r.role, r.capability)));
    lines.join("\n")
}
