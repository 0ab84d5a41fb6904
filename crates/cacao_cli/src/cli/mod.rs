use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cacao care reminders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep reminders in memory for this run only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Override configuration values (format KEY=VALUE, keys: catalog, palette, log_level).
    /// In the interactive session an override lasts for one command and log_level is rejected.
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the to-do list for a date
    ///
    /// Example: cacaodx view 2024-05-01
    /// Example: cacaodx view (defaults to today)
    View { date: Option<String> },
    /// Mark a task done, or pending again
    ///
    /// Example: cacaodx toggle 2024-05-01-0
    Toggle { id: String },
    /// Delete a task
    ///
    /// Example: cacaodx delete 2024-05-01-0 --yes
    Delete {
        id: String,
        /// Confirm the deletion without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Add a task to a date
    ///
    /// Example: cacaodx add "Spray neem oil" --date 2024-05-01
    Add {
        text: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Show how many tasks are done for a date
    ///
    /// Example: cacaodx progress 2024-05-01
    Progress { date: Option<String> },
    /// List every stored task
    ///
    /// Example: cacaodx list
    List,
    /// Rate a candidate password
    ///
    /// Example: cacaodx password-strength "Cacao-Pod-2024"
    PasswordStrength { password: String },
    /// Check a password change before submitting it
    ///
    /// Example: cacaodx check-password-change --current old-pass --new Cacao-2024 --confirm Cacao-2024
    CheckPasswordChange {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Catalog,
    Palette,
    LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

impl ParsedConfigOverride {
    /// Comma separated entries, trimmed, blanks dropped.
    pub fn entries(&self) -> Vec<String> {
        self.value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "catalog" | "chores" => ConfigOverrideTarget::Catalog,
        "palette" | "colors" => ConfigOverrideTarget::Palette,
        "log_level" | "log" => ConfigOverrideTarget::LogLevel,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if value.is_empty() {
        return Err(format!("{canonical_field} override needs a value"));
    }

    Ok(ParsedConfigOverride { target, value })
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
