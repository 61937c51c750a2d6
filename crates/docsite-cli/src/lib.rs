use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use docsite_config::{ConfigError, LoadOptions};
use docsite_core::DocSite;
use docsite_format::{CheckFormat, SidebarFormat};
use docsite_ops::{
    CheckOptions, CheckOutcome, OperationError, Operations, SidebarOptions, SidebarOutcome,
};
use serde_json::json;
use tracing::debug;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut options = LoadOptions::default();
    if let Some(dir) = cli.cwd {
        options = options.with_working_dir(dir);
    }
    if let Some(path) = cli.config {
        options = options.with_override_path(path);
    }

    let engine = match DocSite::load(options) {
        Ok(engine) => engine,
        Err(ConfigError::Validation(errors)) => {
            for error in errors.iter() {
                eprintln!("{error}");
            }
            return Ok(1);
        }
        Err(err) => return Err(err.into()),
    };
    debug!(title = %engine.config().title, "site configuration loaded");
    let ops = engine.operations();

    match cli.command {
        Command::Check(args) => handle_check(ops, args),
        Command::Sidebar(args) => handle_sidebar(ops, args),
        Command::Routes(args) => handle_routes(ops, args),
        Command::Redirects(args) => handle_redirects(ops, args),
    }
}

fn handle_check(ops: &Operations, args: CheckArgs) -> Result<i32> {
    let format = match args.format.unwrap_or(FormatValue::Plain) {
        FormatValue::Plain => CheckFormat::Plain,
        FormatValue::Json => CheckFormat::Json,
    };

    let CheckOutcome {
        rendered,
        exit_code,
        ..
    } = ops.check(CheckOptions { format })?;

    emit(&rendered)?;
    Ok(exit_code)
}

fn handle_sidebar(ops: &Operations, args: SidebarArgs) -> Result<i32> {
    let SidebarArgs { plugin_id, format } = args;
    let format = match format.unwrap_or(FormatValue::Plain) {
        FormatValue::Plain => SidebarFormat::Plain,
        FormatValue::Json => SidebarFormat::Json,
    };

    match ops.sidebars(SidebarOptions { plugin_id, format }) {
        Ok(SidebarOutcome { rendered, .. }) => {
            emit(&rendered)?;
            Ok(0)
        }
        Err(err @ OperationError::UnknownPlugin { .. }) => {
            eprintln!("{err}");
            Ok(2)
        }
        Err(err @ OperationError::Sidebar { .. }) => {
            eprintln!("{err}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

fn handle_routes(ops: &Operations, args: RoutesArgs) -> Result<i32> {
    let routes = match ops.routes() {
        Ok(routes) => routes,
        Err(err @ OperationError::Sidebar { .. }) => {
            eprintln!("{err}");
            return Ok(1);
        }
        Err(err) => return Err(err.into()),
    };

    match args.format.unwrap_or(FormatValue::Plain) {
        FormatValue::Json => {
            let payload = json!({
                "routes": routes.iter().collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        FormatValue::Plain => {
            if routes.is_empty() {
                println!("No routes found.");
            }
            for route in routes.iter() {
                println!("{}\t{}:{}", route.path, route.plugin_id, route.doc_id);
            }
        }
    }
    Ok(0)
}

fn handle_redirects(ops: &Operations, args: RedirectsArgs) -> Result<i32> {
    let RedirectsArgs { lookup, format } = args;
    let format = format.unwrap_or(FormatValue::Plain);

    let index = match ops.redirects() {
        Ok(index) => index,
        Err(err) => {
            eprintln!("{err}");
            return Ok(1);
        }
    };

    if let Some(path) = lookup {
        let Some(target) = index.lookup(&path) else {
            eprintln!("no redirect for '{path}'");
            return Ok(2);
        };
        match format {
            FormatValue::Json => {
                let payload = json!({ "from": path, "to": target });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
            FormatValue::Plain => println!("{target}"),
        }
        return Ok(0);
    }

    match format {
        FormatValue::Json => {
            let payload = json!({ "redirects": index.entries() });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        FormatValue::Plain => {
            if index.is_empty() {
                println!("No redirects configured.");
            }
            for rule in index.rules() {
                println!("{} -> {}", rule.from, rule.to);
            }
        }
    }
    Ok(0)
}

fn emit(content: &str) -> Result<()> {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Validate documentation site configuration and navigation",
    propagate_version = true
)]
struct Cli {
    /// Override configuration file (highest precedence)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Working directory used to discover configuration
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate configuration, sidebars, redirects and internal links
    Check(CheckArgs),
    /// Print the resolved sidebars of a docs plugin
    Sidebar(SidebarArgs),
    /// List the routes produced by the docs plugins
    Routes(RoutesArgs),
    /// List redirects or resolve one path
    Redirects(RedirectsArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Select check output format
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
}

#[derive(Args)]
struct SidebarArgs {
    /// Id of the docs plugin
    #[arg(value_name = "PLUGIN_ID")]
    plugin_id: String,
    /// Select sidebar output format
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
}

#[derive(Args)]
struct RoutesArgs {
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
}

#[derive(Args)]
struct RedirectsArgs {
    /// Resolve a single source path instead of listing every redirect
    #[arg(long, value_name = "PATH")]
    lookup: Option<String>,
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatValue {
    Plain,
    Json,
}
