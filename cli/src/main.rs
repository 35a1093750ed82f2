//! OceanWatch user directory CLI
//!
//! Front end for the staff directory of the ocean hazard monitoring
//! dashboard. The directory lives in memory and is seeded on every start.
//!
//! ```sh
//! # Admins at Hawaii, as JSON
//! oceanwatch list --search hawaii --role admin --json
//!
//! # Approve a pending account
//! oceanwatch approve USR-004
//!
//! # Watch five presence ticks of demo mode
//! oceanwatch demo --ticks 5 --interval-secs 1
//!
//! # Validate config without running anything
//! oceanwatch --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use oceanwatch::config::AppConfig;
use oceanwatch::notifications::{EventMessage, EventSubscriber};
use oceanwatch::runtime::{init_tracing, DirectoryRuntime, RuntimeOptions};
use oceanwatch::{FilterCriteria, Selector, UserRecord, UserRole, UserStatus};

/// OceanWatch: staff directory for the hazard monitoring dashboard.
#[derive(Parser, Debug)]
#[command(
    name = "oceanwatch",
    version,
    about = "Manage OceanWatch staff accounts",
    long_about = "OceanWatch user directory: list and filter staff accounts, \
                  change roles and statuses, and simulate presence in demo mode.\n\n\
                  Default config: ~/.config/oceanwatch/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "OCEANWATCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List accounts matching the filters.
    List {
        /// Case-insensitive match on name, email, location or department.
        #[arg(short, long, default_value = "")]
        search: String,
        /// Role key or `all`.
        #[arg(long, default_value = "all")]
        role: Selector<UserRole>,
        /// Status key or `all`.
        #[arg(long, default_value = "all")]
        status: Selector<UserStatus>,
        /// Department name or `all`.
        #[arg(long, default_value = "all")]
        department: Selector<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show directory totals.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Show one account.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Replace an account's role.
    SetRole { id: String, role: UserRole },
    /// Replace an account's status.
    SetStatus { id: String, status: UserStatus },
    /// Activate an account.
    Approve { id: String },
    /// Remove an account.
    Delete { id: String },
    /// List distinct departments.
    Departments,
    /// Run the presence simulator and print its notifications.
    Demo {
        /// Stop after this many presence ticks.
        #[arg(short, long, default_value_t = 3)]
        ticks: usize,
        /// Override `[presence] interval_secs`.
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Override `[presence] seed`.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(oceanwatch::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => return Err(e.into()),
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            run(cli, AppConfig::default()).await?;
            return Ok(());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
        println!(
            "   Demo mode   : {} (every {}s, threshold {})",
            if config.presence.enabled { "on" } else { "off" },
            config.presence.interval_secs,
            config.presence.online_threshold
        );
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());
    run(cli, config).await
}

async fn run(cli: Cli, mut config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.unwrap_or(Command::List {
        search: String::new(),
        role: Selector::All,
        status: Selector::All,
        department: Selector::All,
        json: false,
    });

    // Only `demo` runs the simulator.
    match &command {
        Command::Demo {
            interval_secs,
            seed,
            ..
        } => {
            config.presence.enabled = true;
            if let Some(secs) = interval_secs {
                config.presence.interval_secs = (*secs).max(1);
            }
            if let Some(seed) = seed {
                config.presence.seed = Some(*seed);
            }
        }
        _ => config.presence.enabled = false,
    }

    let runtime = DirectoryRuntime::start(RuntimeOptions {
        config,
        ..RuntimeOptions::default()
    })
    .await;
    let mut events = runtime.event_bus.subscribe();
    let service = runtime.service.clone();

    let result = async {
        match command {
            Command::List {
                search,
                role,
                status,
                department,
                json,
            } => {
                let criteria = FilterCriteria {
                    search_term: search,
                    role,
                    status,
                    department,
                };
                let users = service.filter(&criteria).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&users)?);
                } else {
                    print_table(&users);
                }
            }
            Command::Stats { json } => {
                let stats = service.stats().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("Total users : {}", stats.total);
                    println!("Active      : {}", stats.active);
                    println!("Inactive    : {}", stats.inactive);
                    println!("Pending     : {}", stats.pending);
                    println!("Suspended   : {}", stats.suspended);
                    println!("Online      : {}", stats.online);
                }
            }
            Command::Show { id, json } => {
                let user = service.get(&id).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                } else {
                    print_user(&user);
                }
            }
            Command::SetRole { id, role } => {
                service.change_role(&id, role).await?;
                print_notifications(&mut events);
            }
            Command::SetStatus { id, status } => {
                service.change_status(&id, status).await?;
                print_notifications(&mut events);
            }
            Command::Approve { id } => {
                service.approve(&id).await?;
                print_notifications(&mut events);
            }
            Command::Delete { id } => {
                if service.delete(&id).await?.is_none() {
                    println!("No user with id {}", id);
                }
                print_notifications(&mut events);
            }
            Command::Departments => {
                for department in service.departments().await? {
                    println!("{}", department);
                }
            }
            Command::Demo { ticks, .. } => {
                let shutdown = runtime.shutdown_signal();
                runtime.listen_for_signals();
                let mut seen = 0;
                while seen < ticks {
                    let message = tokio::select! {
                        msg = events.recv() => msg,
                        _ = shutdown.wait() => None,
                    };
                    let Some(message) = message else { break };
                    if message.event.event_type() == "presence_ticked" {
                        seen += 1;
                    }
                    print_notification(&message);
                }
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .await;

    runtime.shutdown().await;
    print_notifications(&mut events);
    result
}

fn print_table(users: &[UserRecord]) {
    println!(
        "{:<8} {:<24} {:<16} {:<10} {:<24} {:<8}",
        "ID", "NAME", "ROLE", "STATUS", "DEPARTMENT", "ONLINE"
    );
    for user in users {
        println!(
            "{:<8} {:<24} {:<16} {:<10} {:<24} {:<8}",
            user.id,
            user.name,
            user.role.as_str(),
            user.status.as_str(),
            user.department,
            if user.is_online { "●" } else { "○" }
        );
    }
    println!("{} user(s)", users.len());
}

fn print_user(user: &UserRecord) {
    println!("{} ({})  [{}]", user.name, user.initials(), user.id);
    println!("  Email       : {}", user.email);
    println!("  Phone       : {}", user.phone);
    println!("  Role        : {} ({})", user.role.label(), user.role.description());
    println!("  Status      : {}", user.status);
    println!("  Location    : {}", user.location);
    println!("  Department  : {}", user.department);
    println!("  Joined      : {}", user.joined_date);
    println!(
        "  Last active : {}{}",
        user.last_active,
        if user.is_online { " (online)" } else { "" }
    );
    match user.verification_rate() {
        Some(rate) => println!(
            "  Reports     : {} submitted, {} verified ({:.0}%)",
            user.reports_submitted, user.verified_reports, rate
        ),
        None => println!("  Reports     : none"),
    }
    if !user.permissions.is_empty() {
        println!("  Permissions : {}", user.permissions.join(", "));
    }
    let actions: Vec<_> = user
        .status
        .available_actions()
        .iter()
        .map(|a| a.as_str())
        .collect();
    if !actions.is_empty() {
        println!("  Actions     : {}", actions.join(", "));
    }
}

fn print_notification(message: &EventMessage) {
    println!(
        "[{}] {}",
        message.timestamp.format("%H:%M:%S"),
        message.event.notification()
    );
}

fn print_notifications(events: &mut EventSubscriber) {
    while let Some(message) = events.try_recv() {
        if message.event.event_type() != "demo_mode_changed" {
            print_notification(&message);
        }
    }
}
