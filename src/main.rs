// dhcpcd-prefs - Main Entry Point
// SPDX-License-Identifier: MIT

//! Command-line frontend for the dhcpcd block editor engine.
//!
//! This binary drives [`EditorSession`] non-interactively: it lists and
//! shows configuration blocks, applies field edits, clears blocks, and
//! triggers rebinds. All business behavior lives in the library; the
//! frontend only renders field sets and forwards raw edits.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use dhcpcd_prefs::{
    network_utils, AppConfig, Category, ClassifiedName, ConfFileStore, DaemonClient,
    EditorSession, FieldSet, TextField,
};

/// Human-readable application name.
pub const APP_NAME: &str = "dhcpcd-prefs";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

type Session = EditorSession<ConfFileStore, DaemonClient, DaemonClient>;

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("License: MIT");
    println!();
    println!("Editor for dhcpcd's per-interface and per-SSID configuration blocks.");
}

/// Print help information and exit.
fn print_help() {
    println!(
        "Usage: {} [OPTIONS] COMMAND",
        env::args().next().unwrap_or_else(|| APP_NAME.to_string())
    );
    println!();
    println!("Editor for dhcpcd's per-interface and per-SSID configuration blocks.");
    println!();
    println!("Commands:");
    println!("  list <interface|ssid>");
    println!("      List configuration block names, marked new or saved");
    println!("  show <interface|ssid> <name>");
    println!("      Show the editable fields of one block");
    println!("  set <interface|ssid> <name> [--auto on|off] [--address ADDR]");
    println!("      [--router LIST] [--dns-servers LIST] [--dns-search LIST]");
    println!("      Edit fields and commit the block");
    println!("  clear <interface|ssid> <name>");
    println!("      Reset a block to defaults");
    println!("  rebind <interface|ssid> <name>");
    println!("      Commit the block and re-negotiate matching leases");
    println!();
    println!("Options:");
    println!("  -h, --help             Show this help message and exit");
    println!("  -v, --version          Show version information and exit");
    println!("  -d, --debug            Enable debug logging");
    println!("  -f, --config-file F    Edit F instead of the configured dhcpcd.conf");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG               Set log level (trace, debug, info, warn, error)");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let mut debug_mode = false;
    let mut conf_path: Option<PathBuf> = None;
    let mut command: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            "-d" | "--debug" => {
                debug_mode = true;
            }
            "-f" | "--config-file" => {
                i += 1;
                match args.get(i) {
                    Some(path) => conf_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("{} requires a path argument", args[i - 1]);
                        return ExitCode::FAILURE;
                    }
                }
            }
            other => command.push(other.to_string()),
        }
        i += 1;
    }

    // Initialize logging with appropriate level
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(path) = conf_path {
        config.conf_path = path;
    }

    let mut client = DaemonClient::new();
    if let Err(e) = client.connect() {
        tracing::warn!("{}", e);
    }
    let store = ConfFileStore::new(&config.conf_path);
    let mut session = EditorSession::new(
        store,
        client.clone(),
        client,
        network_utils::snapshot(),
    );

    run(&mut session, &command)
}

fn run(session: &mut Session, args: &[String]) -> ExitCode {
    let Some(command) = args.first() else {
        print_help();
        return ExitCode::FAILURE;
    };

    match command.as_str() {
        "list" => {
            let Some(category) = parse_category(args.get(1)) else {
                return usage("list <interface|ssid>");
            };
            session.select_category(category);
            if !session.name_selector_enabled() {
                println!("no configuration blocks for category {}", category);
                return ExitCode::SUCCESS;
            }
            for entry in session.names() {
                println!("{:5}  {}", status(entry), entry.name);
            }
            ExitCode::SUCCESS
        }
        "show" => {
            let (Some(category), Some(name)) = (parse_category(args.get(1)), args.get(2)) else {
                return usage("show <interface|ssid> <name>");
            };
            session.select_category(category);
            session.select_name(Some(name.as_str()));
            print_fields(session.fields());
            // read-only: exit without close() so nothing is rewritten
            ExitCode::SUCCESS
        }
        "set" => {
            let (Some(category), Some(name)) = (parse_category(args.get(1)), args.get(2)) else {
                return usage("set <interface|ssid> <name> [FIELD OPTIONS]");
            };
            session.select_category(category);
            session.select_name(Some(name.as_str()));
            if apply_field_args(session, &args[3..]).is_err() {
                return usage("set <interface|ssid> <name> [FIELD OPTIONS]");
            }
            session.close();
            ExitCode::SUCCESS
        }
        "clear" => {
            let (Some(category), Some(name)) = (parse_category(args.get(1)), args.get(2)) else {
                return usage("clear <interface|ssid> <name>");
            };
            session.select_category(category);
            session.select_name(Some(name.as_str()));
            session.clear();
            ExitCode::SUCCESS
        }
        "rebind" => {
            let (Some(category), Some(name)) = (parse_category(args.get(1)), args.get(2)) else {
                return usage("rebind <interface|ssid> <name>");
            };
            session.select_category(category);
            session.select_name(Some(name.as_str()));
            session.rebind();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Try '--help' for more information.");
            ExitCode::FAILURE
        }
    }
}

/// Apply `--auto`/field flags to the selected block.
fn apply_field_args(session: &mut Session, args: &[String]) -> Result<(), ()> {
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let Some(value) = args.get(i) else {
            eprintln!("{} requires a value", flag);
            return Err(());
        };
        match flag {
            "--auto" => session.set_auto_configure(matches!(value.as_str(), "on" | "true")),
            "--address" => edit(session, TextField::IpAddress, value),
            "--router" => edit(session, TextField::Router, value),
            "--dns-servers" => edit(session, TextField::DnsServers, value),
            "--dns-search" => edit(session, TextField::DnsSearch, value),
            other => {
                eprintln!("Unknown option: {}", other);
                return Err(());
            }
        }
        i += 1;
    }
    Ok(())
}

/// Forward a raw edit, reporting the destructive correction when the
/// engine rejected the input.
fn edit(session: &mut Session, field: TextField, raw: &str) {
    session.edit_field(field, raw);
    let stored = match field {
        TextField::IpAddress => session.fields().ip_address.as_str(),
        TextField::Router => session.fields().router.as_str(),
        TextField::DnsServers => session.fields().dns_servers.as_str(),
        TextField::DnsSearch => session.fields().dns_search.as_str(),
    };
    if stored != raw {
        eprintln!("invalid value {:?} cleared", raw);
    }
}

fn parse_category(arg: Option<&String>) -> Option<Category> {
    Category::parse(arg?.as_str())
}

fn status(entry: &ClassifiedName) -> &'static str {
    if entry.has_persisted_block {
        "saved"
    } else {
        "new"
    }
}

fn print_fields(fields: &FieldSet) {
    println!(
        "auto-configure: {}",
        if fields.auto_configure { "on" } else { "off" }
    );
    println!("ip address:     {}", fields.ip_address);
    println!("router:         {}", fields.router);
    println!("dns servers:    {}", fields.dns_servers);
    println!("dns search:     {}", fields.dns_search);
}

fn usage(expected: &str) -> ExitCode {
    eprintln!("Usage: {} {}", APP_NAME, expected);
    ExitCode::FAILURE
}
