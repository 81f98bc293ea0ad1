use std::path::{Path, PathBuf};

use colored::Colorize;
use tably_sdk::{FileStatus, Head, Repository, StageOutcome};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Add(args) => cmd_add(args),
        Command::Commit(args) => cmd_commit(args),
        Command::Log(args) => cmd_log(args),
        Command::View(args) => cmd_view(args),
        Command::Activate(args) => cmd_activate(args),
        Command::Status(_) => cmd_status(),
        Command::ForgetSchema(args) => cmd_forget_schema(args),
    }
}

fn open_repo() -> anyhow::Result<Repository> {
    let cwd = std::env::current_dir()?;
    let repo = Repository::discover(&cwd)?;
    debug!(root = %repo.root().display(), "opened repository");
    Ok(repo)
}

fn head_label(repo: &Repository) -> anyhow::Result<String> {
    Ok(match repo.current_view()? {
        Some(view) => format!("view {}", view.yellow().bold()),
        None => match repo.resolve_head()? {
            Some(id) => format!("{} {}", "detached at".red(), id.short_hex().yellow()),
            None => "detached HEAD".red().to_string(),
        },
    })
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let path = PathBuf::from(args.path.unwrap_or_else(|| ".".into()));
    let repo = Repository::init(&path)?;
    println!(
        "{} Initialized tably repository in {}",
        "✓".green().bold(),
        repo.control_dir().display().to_string().bold()
    );
    println!("  View: {}", repo.config().default_view.yellow());
    Ok(())
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    for path in &args.paths {
        let outcome = repo.add(Path::new(path))?;
        match outcome.outcome {
            StageOutcome::Staged => println!(
                "  {} {} {}",
                "staged:".green(),
                outcome.path,
                outcome.recipe.short_hex().dimmed()
            ),
            StageOutcome::Unchanged => {
                println!("  {} {}", "no changes:".dimmed(), outcome.path)
            }
        }
    }
    Ok(())
}

fn cmd_commit(args: CommitArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let outcome = repo.commit(&args.message)?;
    println!(
        "{} [{} {}] {}",
        "✓".green().bold(),
        outcome.view.yellow(),
        outcome.id.short_hex().yellow().bold(),
        outcome.manifest.message
    );
    Ok(())
}

fn cmd_log(args: LogArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let entries = repo.log(args.limit)?;
    if entries.is_empty() {
        println!("No commits yet.");
        return Ok(());
    }
    for entry in entries {
        if args.oneline {
            println!("{} {}", entry.id.short_hex().yellow(), entry.manifest.message);
        } else {
            println!("{} {}", "commit".yellow(), entry.id.to_hex().yellow().bold());
            println!(
                "Date:   {}",
                entry.manifest.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("\n    {}\n", entry.manifest.message);
        }
    }
    Ok(())
}

fn cmd_view(args: ViewArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    match args.name {
        Some(name) => {
            let tip = repo.create_view(&name, args.commit.as_deref())?;
            println!(
                "{} Created view {} at {}",
                "✓".green().bold(),
                name.yellow(),
                tip.short_hex().yellow()
            );
        }
        None => {
            for view in repo.list_views()? {
                let tip = view
                    .tip
                    .map(|id| id.short_hex())
                    .unwrap_or_else(|| "(no commits)".into());
                if view.is_current {
                    println!("* {} {}", view.name.green().bold(), tip.dimmed());
                } else {
                    println!("  {} {}", view.name, tip.dimmed());
                }
            }
        }
    }
    Ok(())
}

fn cmd_activate(args: ActivateArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let activation = repo.activate(&args.target)?;
    match &activation.head {
        Head::Symbolic(view) => {
            println!("{} Activated view {}", "✓".green().bold(), view.yellow().bold())
        }
        Head::Detached(id) => println!(
            "{} HEAD is now detached at {}",
            "!".yellow().bold(),
            id.short_hex().yellow()
        ),
    }
    println!("  {} file(s) written", activation.report.written.len());
    for skipped in &activation.report.skipped {
        println!("  {} {}: {}", "skipped:".red(), skipped.path, skipped.reason);
    }
    Ok(())
}

fn cmd_status() -> anyhow::Result<()> {
    let repo = open_repo()?;
    println!("On {}", head_label(&repo)?);
    let status = repo.status()?;
    if status.is_clean() {
        println!("\nNothing to commit, working directory clean.");
        return Ok(());
    }
    if !status.staged.is_empty() {
        println!("\nChanges to be committed:");
        for entry in &status.staged {
            let label = match entry.status {
                FileStatus::New => "new file:",
                FileStatus::Modified => "modified:",
            };
            println!("  {} {}", label.green(), entry.path.green());
        }
    }
    if !status.modified.is_empty() || !status.deleted.is_empty() {
        println!("\nChanges not staged for commit:");
        for path in &status.modified {
            println!("  {} {}", "modified:".red(), path.red());
        }
        for path in &status.deleted {
            println!("  {} {}", "deleted:".red(), path.red());
        }
    }
    if !status.untracked.is_empty() {
        println!("\nUntracked files:");
        for path in &status.untracked {
            println!("  {}", path.red());
        }
    }
    Ok(())
}

fn cmd_forget_schema(args: ForgetSchemaArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    for path in &args.paths {
        if repo.forget_schema(Path::new(path))? {
            println!("  {} {}", "forgot schema:".green(), path);
        } else {
            println!("  {} {}", "no cached schema:".dimmed(), path);
        }
    }
    Ok(())
}
