use anyhow::Context;
use clap::Args;
use colored::Colorize;
use is_terminal::IsTerminal;
use log::{error, info};
use project_migrate::api::{MigrationClient, Poller};
use project_migrate::config::{Config, project::load_project_config};
use project_migrate::migrate::{MigrateOptions, MigrationContext, MigrationOutcome, migrate_app};
use project_migrate::ui::{DialoguerPrompts, NonInteractivePrompts, PromptProvider};

#[derive(Args)]
pub struct MigrateCommands {
    /// Account name or id from the config file
    #[arg(long)]
    pub account: Option<String>,

    /// Name of the project to create
    #[arg(long)]
    pub name: Option<String>,

    /// Directory the new project is created in
    #[arg(long)]
    pub dest: Option<String>,

    /// Id of the app to migrate
    #[arg(long)]
    pub app_id: Option<u64>,

    /// Platform version of the resulting project (2023.2 or 2025.2)
    #[arg(long)]
    pub platform_version: Option<String>,

    /// Target the unstable platform version
    #[arg(long, hide = true)]
    pub unstable: bool,

    /// Never prompt; fail when input would be required
    #[arg(long)]
    pub non_interactive: bool,

    /// Answer yes to confirmations (only with --non-interactive)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl MigrateCommands {
    fn options(&self) -> MigrateOptions {
        MigrateOptions {
            name: self.name.clone(),
            dest: self.dest.clone(),
            app_id: self.app_id,
            platform_version: self.platform_version.clone(),
            unstable: self.unstable,
        }
    }
}

/// Handle migrate command
pub async fn handle_migrate_command(args: MigrateCommands) -> anyhow::Result<()> {
    let config = Config::load()?;
    let account = config.resolve_account_with_env(args.account.as_deref())?;

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let project_config = load_project_config(&cwd)?;
    if let Some(loaded) = &project_config {
        info!("Running inside project at {}", loaded.project_dir.display());
    }

    let client = MigrationClient::new(account.api_base_url(), account.access_token.clone())?;
    let interactive = !args.non_interactive && std::io::stdin().is_terminal();
    let poller = Poller::new(config.settings.poll_config().with_spinner(!args.non_interactive));

    let prompts: Box<dyn PromptProvider> = if interactive {
        Box::new(DialoguerPrompts)
    } else {
        Box::new(NonInteractivePrompts::new(args.yes))
    };

    let ctx = MigrationContext {
        api: &client,
        prompts: prompts.as_ref(),
        poller: &poller,
        cwd,
    };

    // printed by main; only logged here
    let outcome = migrate_app(&ctx, account.account_id, &args.options(), project_config.as_ref())
        .await
        .inspect_err(|err| error!("Migration failed: {:#}", err))?;

    match outcome {
        MigrationOutcome::Cancelled => {
            println!("{}", "Migration cancelled. No changes were made.".dimmed());
        }
        MigrationOutcome::Completed {
            session,
            project_dir,
            build_id,
        } => {
            println!(
                "\n{} {}",
                "✓ Migrated into project".green().bold(),
                session.project_name.as_deref().unwrap_or_default().cyan()
            );
            if let Some(app_id) = session.app_id_to_migrate {
                println!("App:       {}", app_id);
            }
            if let Some(migration_id) = session.migration_id {
                println!("Migration: {}", migration_id);
            }
            if !session.uid_map.is_empty() {
                println!("Components:");
                for (component_id, uid) in &session.uid_map {
                    println!("  {} -> {}", component_id, uid);
                }
            }
            println!("Build:     {}", build_id);
            println!("Location:  {}", project_dir.display());
            if project_config.is_some() {
                println!(
                    "The previous source was moved to {}",
                    project_dir.join("archive").display().to_string().yellow()
                );
            }
        }
    }

    Ok(())
}
