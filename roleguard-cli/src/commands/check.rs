use super::{actor, Context};
use anyhow::Result;
use roleguard_core::guard::Screen;
use std::fmt::Write;

/// Summarize how Roleguard treats an account
pub fn check(ctx: &Context, roles: &str, screen: Option<&str>) -> Result<String> {
    let host = ctx.host()?;
    let request = ctx.control().request(actor(roles));

    let mut out = String::new();
    writeln!(out, "access: {}", request.access())?;
    writeln!(out, "settings menu: {}", shown(request.show_settings_menu()))?;
    writeln!(out, "reusable blocks menu: {}", shown(request.show_reusable_blocks_in_menu()))?;

    let visible = request.visible_plugins(&host.plugins);
    writeln!(out, "visible plugins ({} of {}):", visible.len(), host.plugins.len())?;
    for plugin in visible.iter() {
        writeln!(out, "  {} ({})", plugin.path, plugin.name)?;
    }

    if let Some(path) = screen {
        let screen = Screen::from_admin_path(path);
        match request.check_screen(&screen) {
            Ok(()) => write!(out, "screen {}: allowed", screen)?,
            Err(e) => write!(out, "screen {}: denied ({})", screen, e)?,
        }
    }

    if let Some(notice) = request.setup_notice(&host.roles) {
        write!(out, "\nnotice: {}", notice.title)?;
        for (i, step) in notice.steps.iter().enumerate() {
            write!(out, "\n  {}. {}", i + 1, step)?;
        }
    }

    Ok(out.trim_end().to_string())
}

/// Editor style rules as injected for the block editor screen
pub fn css(ctx: &Context, roles: &str, head: bool) -> Result<String> {
    let request = ctx.control().request(actor(roles));

    let Some(sheet) = request.editor_styles(&Screen::BlockEditor) else {
        log::info!("No editor restrictions apply to roles '{}'", roles);
        return Ok(String::new());
    };

    Ok(if head { sheet.head_element() } else { sheet.inline_style().css })
}

fn shown(flag: bool) -> &'static str {
    if flag {
        "shown"
    } else {
        "hidden"
    }
}
