use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdk_changelog::cli::orchestration;
use sdk_changelog::config::{self, Config};
use sdk_changelog::domain::{ChangelogEntry, EntryType};
use sdk_changelog::git::{Git2Repository, Repository};
use sdk_changelog::ui;
use sdk_changelog::warning::PipelineWarning;

#[derive(Parser)]
#[command(
    name = "sdk-changelog",
    version,
    about = "Generate the SDK changelog from change fragments"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the changelog from unreleased and released change-sets (default)
    Generate {
        #[arg(long, help = "Do not add the changelog to the git index")]
        no_stage: bool,

        #[arg(short, long, help = "Write the changelog to this file")]
        output: Option<PathBuf>,
    },

    /// Record an unreleased change; missing fields are prompted for
    NewChange {
        #[arg(
            short = 't',
            long = "type",
            help = "feature, bugfix, deprecation or removal"
        )]
        kind: Option<String>,

        #[arg(long, help = "Category, usually the service name")]
        category: Option<String>,

        #[arg(short, long, help = "Description of the change")]
        description: Option<String>,

        #[arg(long, help = "Name of the external contributor")]
        contributor: Option<String>,
    },

    /// Bundle the unreleased changes into a release document
    #[command(disable_version_flag = true)]
    Release {
        #[arg(long, help = "Version being released, e.g. 2.1.0")]
        version: String,

        #[arg(long, help = "Release date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Do not stage the new and removed files")]
        no_stage: bool,
    },

    /// Generate the documentation cross-link redirect page
    Crosslinks {
        #[arg(long, help = "Directory searched for service models")]
        services_root: Option<PathBuf>,

        #[arg(long, help = "HTML template with mapping placeholders")]
        template: Option<PathBuf>,

        #[arg(short, long, help = "Write the page to this file")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            process::exit(1);
        }
    };

    let command = args.command.unwrap_or(Command::Generate {
        no_stage: false,
        output: None,
    });

    if let Err(e) = run(command, config) {
        ui::display_error(&e.to_string());
        process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("sdk_changelog=debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("sdk_changelog=warn"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Generate { no_stage, output } => {
            if let Some(output) = output {
                config.paths.changelog = output;
            }
            let repo = open_repository(config.changelog.stage && !no_stage);

            ui::display_status("Generating changelog...");
            let result = orchestration::run_generate(
                &config,
                repo.as_ref().map(|r| r as &dyn Repository),
                Local::now().date_naive(),
            )?;

            display_warnings(&result.warnings);
            ui::display_changelog_summary(
                &result.output,
                result.releases,
                result.unreleased_entries,
            );
            let output = result.output.display();
            ui::display_success(&format!("Changelog written to {}", output));
        }

        Command::NewChange {
            kind,
            category,
            description,
            contributor,
        } => {
            let interactive = kind.is_none() || category.is_none() || description.is_none();

            let kind = match kind {
                Some(kind) => kind.parse::<EntryType>()?,
                None => ui::select_entry_type()?,
            };
            let category = match category {
                Some(category) => category,
                None => ui::prompt_line("Category")?,
            };
            let description = match description {
                Some(description) => description,
                None => ui::prompt_description()?,
            };
            let contributor = match contributor {
                Some(contributor) => Some(contributor),
                None if interactive => ui::prompt_optional("Contributor")?,
                None => None,
            };

            let mut entry = ChangelogEntry::new(kind, category.trim(), description);
            if let Some(contributor) = contributor {
                entry = entry.with_contributor(contributor.trim());
            }

            if interactive {
                ui::display_status(&ui::format_entry_summary(&entry));
                if !ui::confirm_action("Write this change?")? {
                    println!("Operation cancelled by user.");
                    return Ok(());
                }
            }

            let path = orchestration::run_new_change(&config, &entry, &Local::now())?;
            ui::display_success(&format!("Created {}", path.display()));
        }

        Command::Release {
            version,
            date,
            no_stage,
        } => {
            let date = match date {
                Some(date) => orchestration::parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            let repo = open_repository(config.changelog.stage && !no_stage);

            ui::display_status(&format!("Bundling unreleased changes into {}...", version));
            let result = orchestration::run_release(
                &config,
                &version,
                date,
                repo.as_ref().map(|r| r as &dyn Repository),
            )?;

            display_warnings(&result.warnings);
            ui::display_release_summary(
                &result.version.to_string(),
                &result.path,
                &result.entries,
            );
            ui::display_success(&format!(
                "Released {} ({} fragments removed)",
                result.version,
                result.removed.len()
            ));
        }

        Command::Crosslinks {
            services_root,
            template,
            output,
        } => {
            if let Some(services_root) = services_root {
                config.crosslinks.services_root = services_root;
            }
            if let Some(template) = template {
                config.crosslinks.template = template;
            }
            if let Some(output) = output {
                config.crosslinks.output = output;
            }

            ui::display_status("Scanning service models...");
            let result = orchestration::run_crosslinks(&config)?;

            display_warnings(&result.warnings);
            ui::display_crosslink_summary(
                &result.output,
                result.tables.module_to_client.len(),
                result.tables.uid_to_module.len(),
            );
            let output = result.output.display();
            ui::display_success(&format!("Cross-link page written to {}", output));
        }
    }

    Ok(())
}

/// Open the enclosing repository when staging is wanted; outside git, files are just written
fn open_repository(stage: bool) -> Option<Git2Repository> {
    if !stage {
        return None;
    }

    match Git2Repository::open(".") {
        Ok(repo) => Some(repo),
        Err(e) => {
            tracing::warn!(error = %e, "no git repository found, files will not be staged");
            None
        }
    }
}

fn display_warnings(warnings: &[PipelineWarning]) {
    for warning in warnings {
        ui::display_warning(warning);
    }
}
