//! Roleguard CLI - operator host for Roleguard access policies.
//!
//! Host data (roles and installed plugins) is read from a JSON snapshot:
//!
//! ```bash
//! roleguard --host demos/host.json check --as admin_manager --screen plugins.php
//! roleguard --host demos/host.json submit --as administrator --form demos/form.json
//! ```
//!
//! See `roleguard --help` for all available commands and options.

mod commands;
mod host;

use clap::{Parser, Subcommand};
use commands::Context;
use roleguard_core::config::{RoleguardConfig, DEFAULT_CONFIG_FILE};
use roleguard_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "roleguard",
    about = "Evaluate and administer Roleguard access restrictions",
    version
)]
struct Cli {
    /// Runtime configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Host snapshot (roles and plugin inventory) as JSON
    #[arg(long, global = true)]
    host: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default settings
    Defaults,

    /// Print the effective settings (stored record merged over defaults)
    Show,

    /// Store the default settings and restrict the default managed role
    Activate {
        /// Comma-separated roles of the acting account
        #[arg(long = "as")]
        roles: String,
    },

    /// Sanitize and save a settings-form submission
    Submit {
        #[arg(long = "as")]
        roles: String,

        /// Form submission as JSON
        #[arg(long)]
        form: PathBuf,
    },

    /// Show what an account sees and may open
    Check {
        #[arg(long = "as")]
        roles: String,

        /// Admin path to check, e.g. "plugins.php"
        #[arg(long)]
        screen: Option<String>,
    },

    /// Print the block editor style rules for an account
    Css {
        #[arg(long = "as")]
        roles: String,

        /// Render as a <style> element for the admin head
        #[arg(long)]
        head: bool,
    },

    /// Strip restricted capabilities from the target roles
    Enforce,

    /// Download the static role export
    ExportRole {
        #[arg(long = "as")]
        roles: String,

        /// Download token
        #[arg(long)]
        token: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete the stored settings
    Uninstall {
        #[arg(long = "as")]
        roles: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = RoleguardConfig::load_from(&cli.config).and_then(|config| {
        init_logging(&config.logging);
        let ctx = Context::new(config, cli.host);
        run(&ctx, cli.command)
    });

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(ctx: &Context, command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Defaults => commands::settings::defaults(),
        Commands::Show => commands::settings::show(ctx),
        Commands::Activate { roles } => commands::roles::activate(ctx, &roles),
        Commands::Submit { roles, form } => commands::settings::submit(ctx, &roles, &form),
        Commands::Check { roles, screen } => commands::check::check(ctx, &roles, screen.as_deref()),
        Commands::Css { roles, head } => commands::check::css(ctx, &roles, head),
        Commands::Enforce => commands::roles::enforce(ctx),
        Commands::ExportRole { roles, token, output } => {
            commands::roles::export_role(ctx, &roles, &token, output.as_deref())
        }
        Commands::Uninstall { roles } => commands::settings::uninstall(ctx, &roles),
    }
}
