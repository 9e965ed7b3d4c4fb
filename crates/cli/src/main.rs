//! `testlens` — locate, run and debug single Jest tests from the command line.

mod host;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use host::{FileHost, PrintLauncher, ScriptFactory};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use testlens_command::RunnerConfig;
use testlens_lens::{enumerate, ActionKind, ExternalActionSource};
use testlens_parser::TestFileParser;
use testlens_runner::Dispatcher;
use testlens_tree::locate;

#[derive(Parser)]
#[command(name = "testlens", version, about = "Locate, run and debug single Jest tests")]
struct Cli {
    /// Runner configuration JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace root bounding action-manifest discovery
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the full test name at a line
    Locate {
        /// Test file to inspect
        file: PathBuf,
        /// 1-based source line
        line: usize,
    },

    /// Enumerate the action groups of a test file
    Lens {
        /// Test file to inspect
        file: PathBuf,
        /// Emit groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the test nearest a line
    Run {
        /// Test file to run
        file: PathBuf,
        /// 1-based source line (defaults to the top of the file)
        #[arg(long)]
        line: Option<usize>,
        /// Explicit test name, skips location
        #[arg(long)]
        name: Option<String>,
        /// Extra jest options, repeatable
        #[arg(long = "option", allow_hyphen_values = true)]
        options: Vec<String>,
        /// Print the shell script instead of executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the whole file
    File {
        /// Test file to run
        file: PathBuf,
        /// Extra jest options, repeatable
        #[arg(long = "option", allow_hyphen_values = true)]
        options: Vec<String>,
        /// Print the shell script instead of executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the debug launch configuration for the test nearest a line
    Debug {
        /// Test file to debug
        file: PathBuf,
        /// 1-based source line
        #[arg(long)]
        line: Option<usize>,
        /// Explicit test name, skips location
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let workspace = match &cli.workspace {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("cannot determine working directory")?,
    };
    let config = load_config(cli.config.as_deref(), &workspace)?;

    match cli.command {
        Command::Locate { file, line } => {
            let forest = TestFileParser::parse_file(&file)
                .with_context(|| format!("cannot parse {}", file.display()))?;
            match locate(line, &forest) {
                Some(name) => println!("{name}"),
                None => println!("(whole file)"),
            }
        }

        Command::Lens { file, json } => {
            let forest = TestFileParser::parse_file(&file)
                .with_context(|| format!("cannot parse {}", file.display()))?;
            let source = external_source(&file, &workspace);
            let groups = enumerate(Arc::new(forest), Arc::new(source)).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                for group in &groups {
                    let titles: Vec<&str> =
                        group.actions.iter().map(|a| a.title.as_str()).collect();
                    let name = group.actions.first().map_or("", |a| match &a.action {
                        ActionKind::Fixed { test_name, .. } => test_name,
                        ActionKind::External { name, .. } => name,
                    });
                    let range = group
                        .actions
                        .first()
                        .map_or((0, 0), |a| (a.start.line, a.end.line));
                    println!("{}-{} {name}: {}", range.0, range.1, titles.join(" | "));
                }
            }
        }

        Command::Run {
            file,
            line,
            name,
            options,
            dry_run,
        } => {
            let (mut dispatcher, script) =
                build_dispatcher(config, &file, line.unwrap_or(1), &workspace);
            dispatcher
                .run_current_test_ex(name.as_deref(), &options)
                .await?;
            finish_script(&script, dry_run).await?;
        }

        Command::File {
            file,
            options,
            dry_run,
        } => {
            let (mut dispatcher, script) = build_dispatcher(config, &file, 1, &workspace);
            dispatcher.run_current_file(&options).await?;
            finish_script(&script, dry_run).await?;
        }

        Command::Debug { file, line, name } => {
            let (mut dispatcher, _script) =
                build_dispatcher(config, &file, line.unwrap_or(1), &workspace);
            dispatcher.debug_current_test(name.as_deref()).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, workspace: &Path) -> Result<RunnerConfig> {
    match path {
        Some(path) => {
            RunnerConfig::load(path).with_context(|| format!("cannot load {}", path.display()))
        }
        None => Ok(RunnerConfig::for_project(workspace)),
    }
}

fn external_source(file: &Path, workspace: &Path) -> ExternalActionSource {
    let start = file.parent().unwrap_or(workspace);
    ExternalActionSource::new(start, workspace)
}

fn build_dispatcher(
    config: RunnerConfig,
    file: &Path,
    line: usize,
    workspace: &Path,
) -> (Dispatcher, Arc<std::sync::Mutex<Vec<String>>>) {
    let (factory, script) = ScriptFactory::new();
    let dispatcher = Dispatcher::new(
        config,
        Arc::new(FileHost::new(file.to_path_buf(), line)),
        Box::new(factory),
        Arc::new(PrintLauncher),
        Arc::new(external_source(file, workspace)),
    );
    (dispatcher, script)
}

/// Print or execute the script the dispatcher sent to its surface
async fn finish_script(script: &std::sync::Mutex<Vec<String>>, dry_run: bool) -> Result<()> {
    let lines = script.lock().unwrap_or_else(|e| e.into_inner()).join("\n");
    if dry_run {
        println!("{lines}");
        return Ok(());
    }

    log::debug!("Executing:\n{lines}");
    let status = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&lines)
        .status()
        .await
        .context("cannot start shell")?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
