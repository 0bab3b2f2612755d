use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for tilecraft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, deny, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run cargo deny check
    Deny,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Validate a world snapshot with the CLI
    Validate {
        #[arg(default_value = "world.json")]
        world: PathBuf,
    },
}

/// A cargo invocation with a short label for progress output.
struct Step {
    label: &'static str,
    args: Vec<String>,
}

impl Step {
    fn new(label: &'static str, args: &[&str]) -> Self {
        Self {
            label,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn run(&self) -> Result<()> {
        println!("==> cargo {}", self.args.join(" "));
        let status = Command::new("cargo").args(&self.args).status()?;
        if !status.success() {
            anyhow::bail!("{} failed ({status})", self.label);
        }
        Ok(())
    }
}

fn fmt() -> Step {
    Step::new("fmt", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Step {
    Step::new(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Step {
    Step::new("test", &["test", "--workspace"])
}

fn deny() -> Step {
    Step::new("deny", &["deny", "check", "licenses", "bans", "sources"])
}

fn doc() -> Step {
    Step::new("doc", &["doc", "--workspace", "--no-deps"])
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps = match cli.command {
        Commands::Check => vec![fmt(), clippy(), test(), deny(), doc()],
        Commands::Fmt => vec![fmt()],
        Commands::Clippy => vec![clippy()],
        Commands::Test => vec![test()],
        Commands::Deny => vec![deny()],
        Commands::Doc => vec![doc()],
        Commands::Build => vec![Step::new("build", &["build", "--workspace"])],
        Commands::Validate { world } => {
            let world = world.display().to_string();
            vec![Step::new(
                "validate",
                &["run", "-q", "-p", "tilecraft-cli", "--", "validate", &world],
            )]
        }
    };

    for step in &steps {
        step.run()?;
    }
    println!("==> {} step(s) passed", steps.len());
    Ok(())
}
