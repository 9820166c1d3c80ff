//! Config CLI commands
//!
//! Shows file locations and settings, and updates individual settings.

use clap::Subcommand;

use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show file locations and current settings
    Show,
    /// Change a setting (e.g. `account-deletion orphan`)
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command; `None` shows the configuration
pub fn handle_config_command(
    paths: &TrackerPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> TrackerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("money-tracker Configuration");
            println!("===========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.data_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            for (key, value) in settings.entries() {
                println!("  {:<22} {}", key, value);
            }
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Updated {} = {}", key.trim(), value.trim());
        }
    }

    Ok(())
}
