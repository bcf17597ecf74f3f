//! Server listing and editing command handler.

use anyhow::{Result, bail};

use crate::cli::ServersCommand;
use crate::config::{ConfigFile, ConfigManager, ServerConfig};
use crate::status;
use crate::ui::Style;

pub fn run_servers(command: Option<ServersCommand>) -> Result<()> {
    let manager = ConfigManager::new()?;

    match command.unwrap_or(ServersCommand::List) {
        ServersCommand::List => {
            print_servers(&manager.load_or_default()?);
            Ok(())
        }
        ServersCommand::Add {
            name,
            api_url,
            description,
            default,
        } => {
            let mut config = manager.load_or_default()?;
            add_server(&mut config, &name, api_url, description, default);
            manager.save(&config)?;
            status!(
                "{} server {}",
                Style::success("Saved"),
                Style::value(&name)
            );
            Ok(())
        }
        ServersCommand::Remove { name } => {
            let mut config = manager.load_or_default()?;
            remove_server(&mut config, &name)?;
            manager.save(&config)?;
            status!(
                "{} server {}",
                Style::success("Removed"),
                Style::value(&name)
            );
            Ok(())
        }
    }
}

/// Prints configured servers to stdout.
fn print_servers(config: &ConfigFile) {
    if config.servers.is_empty() {
        println!("No servers configured.");
        println!("Add one with: rhasspy-client servers add <name> <api-url>");
        return;
    }

    let default_server = config.client.server.as_deref();
    let mut names: Vec<&String> = config.servers.keys().collect();
    names.sort();

    println!("{}\n", Style::header("Configured servers:"));
    for name in names {
        let server = &config.servers[name];
        let marker = if default_server == Some(name.as_str()) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(name));
        println!(
            "    {} {}",
            Style::label("api_url:"),
            Style::secondary(&server.api_url)
        );
        if let Some(description) = &server.description {
            println!("    {} {description}", Style::label("description:"));
        }
    }
}

fn add_server(
    config: &mut ConfigFile,
    name: &str,
    api_url: String,
    description: Option<String>,
    make_default: bool,
) {
    config.servers.insert(
        name.to_string(),
        ServerConfig {
            api_url,
            description,
        },
    );
    if make_default || config.client.server.is_none() {
        config.client.server = Some(name.to_string());
    }
}

fn remove_server(config: &mut ConfigFile, name: &str) -> Result<()> {
    if config.servers.remove(name).is_none() {
        bail!("Server '{name}' not found");
    }
    if config.client.server.as_deref() == Some(name) {
        config.client.server = None;
    }
    Ok(())
}
