use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

const SUITES: &[(&str, fn() -> Result<()>)] = &[
    ("rebrand-core tests", test_core),
    ("rebrand-bin tests", test_bin),
    ("doc tests", test_docs),
    ("CLI smoke tests", test_cli),
];

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install the rebrand binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run rebrand with arguments")
                .arg(
                    clap::Arg::new("args")
                        .help("Arguments to pass through to rebrand")
                        .action(clap::ArgAction::Append)
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .trailing_var_arg(true),
                ),
        )
        .subcommand(
            Command::new("test")
                .about("Test operations")
                .subcommand(Command::new("all").about("Run every test suite"))
                .subcommand(Command::new("core").about("Run rebrand-core tests"))
                .subcommand(Command::new("bin").about("Run rebrand-bin tests"))
                .subcommand(Command::new("cli").about("Smoke-test the built CLI")),
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", _)) => install(),
        Some(("run", args)) => run(args),
        Some(("test", args)) => test(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn install() -> Result<()> {
    println!("Installing rebrand...");
    cargo(&["install", "--path", "crates/rebrand-bin"])
}

fn run(args: &ArgMatches) -> Result<()> {
    let mut cargo_args = vec!["run", "--bin", "rebrand", "--"];
    if let Some(passthrough) = args.get_many::<String>("args") {
        cargo_args.extend(passthrough.map(String::as_str));
    }
    cargo(&cargo_args)
}

fn test(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        Some(("all", _)) => {
            for (label, suite) in SUITES {
                println!("Running {label}...");
                suite()?;
            }
            println!("All test suites passed.");
            Ok(())
        }
        Some(("core", _)) => test_core(),
        Some(("bin", _)) => test_bin(),
        Some(("cli", _)) => test_cli(),
        _ => {
            println!("Available test commands: all, core, bin, cli");
            Ok(())
        }
    }
}

fn test_core() -> Result<()> {
    cargo(&["test", "--package", "rebrand-core"])
}

fn test_bin() -> Result<()> {
    cargo(&["test", "--package", "rebrand-bin"])
}

fn test_docs() -> Result<()> {
    cargo(&["test", "--doc", "--package", "rebrand-core"])
}

fn test_cli() -> Result<()> {
    cargo(&["run", "--bin", "rebrand", "--", "--help"])?;
    cargo(&["run", "--bin", "rebrand", "--", "--version"])
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = process::Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
