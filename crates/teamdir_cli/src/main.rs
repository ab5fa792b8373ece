//! teamdir CLI
//!
//! Command-line front end for the member directory.
//!
//! Every invocation loads the collection, applies at most one change (which
//! saves the whole collection) and prints the resulting sync status.
//!
//! # Commands
//!
//! - `list` - List members, optionally filtered
//! - `show` - Show one member with tasks and skills
//! - `add` / `update` / `delete` - Edit members
//! - `task` / `skill` / `summary` - Edit a member's details
//! - `export` - Write the CSV report
//! - `stats` - Dashboard figures
//! - `status` - Load and report sync status only

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use teamdir_core::{Department, Proficiency};
use teamdir_sync::{Backend, ConfigSource, Session};
use tracing_subscriber::EnvFilter;

/// Team member, skills and project directory.
#[derive(Parser)]
#[command(name = "teamdir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(flatten)]
    remote: RemoteArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the collection is stored.
#[derive(Args, Debug, Clone, Default)]
struct RemoteArgs {
    /// Access token; without one, saves go to the local endpoint
    #[arg(global = true, long, env = "TEAMDIR_GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository owner
    #[arg(global = true, long, env = "TEAMDIR_GITHUB_OWNER")]
    owner: Option<String>,

    /// Repository name
    #[arg(global = true, long, env = "TEAMDIR_GITHUB_REPO")]
    repo: Option<String>,

    /// File path inside the repository
    #[arg(global = true, long = "file-path", env = "TEAMDIR_GITHUB_PATH")]
    file_path: Option<String>,

    /// Branch
    #[arg(global = true, long, env = "TEAMDIR_GITHUB_BRANCH")]
    branch: Option<String>,

    /// Contents API base URL
    #[arg(global = true, long = "api", env = "TEAMDIR_GITHUB_API")]
    api_base: Option<String>,

    /// Local write endpoint
    #[arg(global = true, long, env = "TEAMDIR_LOCAL_ENDPOINT")]
    local_endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(global = true, long, env = "TEAMDIR_TIMEOUT_SECS")]
    timeout: Option<u64>,
}

impl RemoteArgs {
    fn into_source(self) -> ConfigSource {
        ConfigSource {
            token: self.token,
            owner: self.owner,
            repo: self.repo,
            path: self.file_path,
            branch: self.branch,
            api_base: self.api_base,
            local_endpoint: self.local_endpoint,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List members
    List {
        /// Filter by name, employee id, skill or client
        #[arg(short, long)]
        search: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show one member
    Show {
        /// Member id or employee id
        member: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a member
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Employee id
        #[arg(long)]
        emp_id: String,

        /// Designation
        #[arg(long)]
        designation: String,

        /// Department (IT, Audit, OPS, FRONT OFFICE)
        #[arg(long)]
        department: Department,

        /// Professional summary
        #[arg(long)]
        summary: Option<String>,
    },

    /// Update a member's profile
    Update {
        /// Member id or employee id
        member: String,

        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Employee id
        #[arg(long)]
        emp_id: Option<String>,

        /// Designation
        #[arg(long)]
        designation: Option<String>,

        /// Department
        #[arg(long)]
        department: Option<Department>,
    },

    /// Delete a member
    Delete {
        /// Member id or employee id
        member: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add or remove project assignments
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Add or remove skills
    Skill {
        #[command(subcommand)]
        command: SkillCommand,
    },

    /// Replace a member's summary
    Summary {
        /// Member id or employee id
        member: String,

        /// New summary text
        text: String,
    },

    /// Write the CSV report
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Show dashboard figures
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Load the collection and report sync status
    Status,

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a project assignment
    Add {
        /// Member id or employee id
        member: String,

        /// Project name
        #[arg(long)]
        name: String,

        /// Client
        #[arg(long)]
        client: String,

        /// Role on the project
        #[arg(long, default_value = "")]
        role: String,

        /// Start period
        #[arg(long, default_value = "")]
        from: String,

        /// End period
        #[arg(long, default_value = "", conflicts_with = "ongoing")]
        to: String,

        /// Still running
        #[arg(long)]
        ongoing: bool,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Day-to-day narrative
        #[arg(long)]
        day_to_day: Option<String>,
    },

    /// Remove a project assignment
    Remove {
        /// Member id or employee id
        member: String,

        /// Task id
        task_id: String,
    },
}

#[derive(Subcommand)]
enum SkillCommand {
    /// Add a skill
    Add {
        /// Member id or employee id
        member: String,

        /// Skill name
        #[arg(long)]
        name: String,

        /// Proficiency (Beginner, Intermediate, Expert)
        #[arg(long, default_value = "Beginner")]
        proficiency: Proficiency,

        /// Certifications
        #[arg(long, default_value = "")]
        certifications: String,
    },

    /// Remove a skill
    Remove {
        /// Member id or employee id
        member: String,

        /// Skill id
        skill_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("teamdir CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("teamdir core v{}", teamdir_core::VERSION);
        return Ok(());
    }

    let config = cli.remote.into_source().resolve()?;
    let backend = Backend::from_config(&config)?;
    let mut session = Session::new(backend);
    let loaded = session.bootstrap().await;
    if let Err(e) = &loaded {
        tracing::error!(error = %e, "Initial load failed");
    }
    let load_error = loaded.as_ref().err();

    match cli.command {
        Commands::List { search, format } => {
            commands::list::run(&session, search.as_deref(), &format)?;
        }
        Commands::Show { member, format } => {
            commands::show::run(&mut session, &member, &format)?;
        }
        Commands::Add {
            name,
            emp_id,
            designation,
            department,
            summary,
        } => {
            commands::ensure_loaded(load_error)?;
            commands::members::add(&mut session, name, emp_id, designation, department, summary)
                .await?;
        }
        Commands::Update {
            member,
            name,
            emp_id,
            designation,
            department,
        } => {
            commands::ensure_loaded(load_error)?;
            let changes = commands::members::ProfileChanges {
                name,
                emp_id,
                designation,
                department,
            };
            commands::members::update(&mut session, &member, changes).await?;
        }
        Commands::Delete { member, yes } => {
            commands::ensure_loaded(load_error)?;
            commands::members::delete(&mut session, &member, yes).await?;
        }
        Commands::Task { command } => {
            commands::ensure_loaded(load_error)?;
            match command {
                TaskCommand::Add {
                    member,
                    name,
                    client,
                    role,
                    from,
                    to,
                    ongoing,
                    description,
                    day_to_day,
                } => {
                    let draft = commands::details::task_draft(
                        name,
                        client,
                        role,
                        from,
                        if ongoing { None } else { Some(to) },
                        description,
                        day_to_day,
                    );
                    commands::details::add_task(&mut session, &member, draft).await?;
                }
                TaskCommand::Remove { member, task_id } => {
                    commands::details::remove_task(&mut session, &member, &task_id).await?;
                }
            }
        }
        Commands::Skill { command } => {
            commands::ensure_loaded(load_error)?;
            match command {
                SkillCommand::Add {
                    member,
                    name,
                    proficiency,
                    certifications,
                } => {
                    commands::details::add_skill(
                        &mut session,
                        &member,
                        name,
                        proficiency,
                        certifications,
                    )
                    .await?;
                }
                SkillCommand::Remove { member, skill_id } => {
                    commands::details::remove_skill(&mut session, &member, &skill_id).await?;
                }
            }
        }
        Commands::Summary { member, text } => {
            commands::ensure_loaded(load_error)?;
            commands::details::set_summary(&mut session, &member, text).await?;
        }
        Commands::Export { out } => {
            commands::export::run(&session, &out)?;
        }
        Commands::Stats { format } => {
            commands::stats::run(&session, &format)?;
        }
        Commands::Status => {
            commands::status::run(&session);
        }
        Commands::Version => {}
    }

    commands::finish(&session.status())
}
