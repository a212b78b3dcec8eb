use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test suite, using cargo nextest when it is installed
    Test {
        #[arg(long)]
        release: bool,
    },
    /// Check formatting and run clippy with warnings denied
    Lint,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Test { release } => run_tests(release)?,
        Commands::Lint => run_lint()?,
    }
    Ok(())
}

fn run_tests(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    if nextest_available() {
        cmd.arg("nextest").arg("run");
    } else {
        cmd.arg("test");
    }
    cmd.arg("--workspace");
    if release {
        cmd.arg("--release");
    }
    run(cmd, "tests failed")
}

fn run_lint() -> Result<()> {
    let mut fmt = Command::new("cargo");
    fmt.args(["fmt", "--all", "--check"]);
    run(fmt, "cargo fmt found unformatted code")?;

    let mut clippy = Command::new("cargo");
    clippy.args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    run(clippy, "cargo clippy reported warnings")
}

fn nextest_available() -> bool {
    Command::new("cargo")
        .args(["nextest", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

fn run(mut cmd: Command, failure: &str) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{failure}");
    }
    Ok(())
}
