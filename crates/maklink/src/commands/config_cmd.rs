//! `maklink config` — config file helpers.

use maklink_config::{Config, config_path, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = super::effective_config(global)?;
            println!("base_url      = {}", cfg.base_url);
            println!(
                "username      = {}",
                cfg.username.as_deref().unwrap_or("(unset)")
            );
            println!(
                "password      = {}",
                if cfg.password.is_some() { "********" } else { "(unset)" }
            );
            println!("poll_interval = {}s", cfg.poll_interval);
            println!("timeout       = {}s", cfg.timeout);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config_path();
            if path.exists() {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists", path.display()),
                });
            }
            let cfg = Config {
                username: global.username.clone(),
                password: global.password.clone(),
                ..Config::default()
            };
            save_config(&cfg)?;
            println!("Wrote {}", path.display());
            if cfg.username.is_none() {
                println!("Fill in username/password, or export MAKLINK_USERNAME / MAKLINK_PASSWORD.");
            }
            Ok(())
        }
    }
}
