use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tably",
    about = "tably: column-wise version control for tabular data",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new repository
    Init(InitArgs),
    /// Stage CSV files for the next commit
    Add(AddArgs),
    /// Record the staged files as a new commit
    Commit(CommitArgs),
    /// Show commit history from HEAD
    Log(LogArgs),
    /// List views, or create one
    View(ViewArgs),
    /// Switch to a view or commit and rebuild its files
    Activate(ActivateArgs),
    /// Show staged, modified, deleted and untracked files
    Status(StatusArgs),
    /// Drop cached schemas so the next add infers column types again
    ForgetSchema(ForgetSchemaArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Name of the view to create; lists views when omitted
    pub name: Option<String>,
    /// Commit hash to start the new view at (defaults to HEAD)
    #[arg(short = 'c', long = "commit", requires = "name")]
    pub commit: Option<String>,
}

#[derive(Args)]
pub struct ActivateArgs {
    /// View name or full commit hash
    pub target: String,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct ForgetSchemaArgs {
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init_with_path() {
        let cli = Cli::try_parse_from(["tably", "init", "data"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.path, Some("data".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_add_many() {
        let cli = Cli::try_parse_from(["tably", "add", "a.csv", "b.csv"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.paths, vec!["a.csv", "b.csv"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn add_requires_a_path() {
        assert!(Cli::try_parse_from(["tably", "add"]).is_err());
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["tably", "commit"]).is_err());
        let cli = Cli::try_parse_from(["tably", "commit", "-m", "first"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.message, "first");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_log_flags() {
        let cli = Cli::try_parse_from(["tably", "log", "-n", "3", "--oneline"]).unwrap();
        if let Command::Log(args) = cli.command {
            assert_eq!(args.limit, Some(3));
            assert!(args.oneline);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_view_create_at_commit() {
        let cli = Cli::try_parse_from(["tably", "view", "dev", "-c", "abc"]).unwrap();
        if let Command::View(args) = cli.command {
            assert_eq!(args.name, Some("dev".into()));
            assert_eq!(args.commit, Some("abc".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn view_commit_needs_name() {
        assert!(Cli::try_parse_from(["tably", "view", "-c", "abc"]).is_err());
    }

    #[test]
    fn parse_activate() {
        let cli = Cli::try_parse_from(["tably", "activate", "main"]).unwrap();
        if let Command::Activate(args) = cli.command {
            assert_eq!(args.target, "main");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_forget_schema() {
        assert!(Cli::try_parse_from(["tably", "forget-schema"]).is_err());
        let cli = Cli::try_parse_from(["tably", "forget-schema", "a.csv"]).unwrap();
        if let Command::ForgetSchema(args) = cli.command {
            assert_eq!(args.paths, vec!["a.csv"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["tably", "--verbose", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Status(_)));
    }
}
