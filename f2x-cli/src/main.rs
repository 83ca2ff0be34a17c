//! Command-line interface for f2x
//! This binary runs the f2x front end on one source file and prints the recovered block tree.
//!
//! Usage:
//!   f2x `<path>` [--format `<format>`] [--path `<kind[:tag]/...>`] [--config `<file>`]
//!       [--prune `<pass>`]... [--discard `<regex>`]... [--free-form] [-v]
//!   f2x --list-formats                                  - List all available output formats
//!
//! Settings are layered: built-in defaults, then `./f2x.toml` if present, then `--config`,
//! then the command line.

use clap::{Arg, ArgAction, ArgMatches, Command};
use f2x_config::{F2xConfig, Loader, PROJECT_FILE};
use f2x_parser::fortran::ast::{format_source_context, parse_path, Node};
use f2x_parser::fortran::formats::FormatRegistry;
use f2x_parser::fortran::loader::{LoaderError, SourceLoader};
use f2x_parser::fortran::transforms::standard::ParseOptions;
use std::collections::HashMap;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// One `--prune` value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PrunePass {
    Using,
    EmptyLoops,
    Assignments(String),
}

fn parse_prune_pass(value: &str) -> Result<PrunePass, String> {
    match value {
        "using" => Ok(PrunePass::Using),
        "empty-loops" => Ok(PrunePass::EmptyLoops),
        _ => match value.strip_prefix("assign:") {
            Some(pattern) if !pattern.is_empty() => Ok(PrunePass::Assignments(pattern.to_string())),
            _ => Err(format!(
                "unknown prune pass '{}' (expected using, empty-loops or assign:REGEX)",
                value
            )),
        },
    }
}

fn cli() -> Command {
    Command::new("f2x")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recover the block structure of legacy Fortran sources")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the source file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: dump)"),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .short('p')
                .help("Print only the subtree at kind[:tag]/kind[:tag]/..."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("prune")
                .long("prune")
                .help("Pruning pass: using, empty-loops or assign:REGEX (repeatable)")
                .action(ArgAction::Append)
                .value_parser(parse_prune_pass),
        )
        .arg(
            Arg::new("discard")
                .long("discard")
                .help("Drop logical lines matching REGEX before classification (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("free-form")
                .long("free-form")
                .help("Do not treat column-1 `c`, `C` and `*` as comment markers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .help("Prefix treeviz output with physical line numbers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug events unless F2X_LOG says otherwise")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let input = matches
        .get_one::<String>("input")
        .expect("input is required unless listing formats");
    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });
    handle_execute_command(input, &config, &matches);
}

/// `F2X_LOG` takes `EnvFilter` directives; without it only warnings are shown.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("F2X_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<F2xConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("free-form") {
        loader = loader.set_override("source.fixed_form_comments", false)?;
    }
    loader.build()
}

/// Configuration first, then the command-line passes on top.
fn parse_options(config: &F2xConfig, matches: &ArgMatches) -> ParseOptions {
    let mut options = ParseOptions {
        fixed_form_comments: config.source.fixed_form_comments,
        discard: config.classifier.discard.clone(),
        drop_using: config.prune.drop_using,
        drop_assignments: config.prune.drop_assignments.clone(),
        drop_empty_loops: config.prune.drop_empty_loops,
    };
    if let Some(patterns) = matches.get_many::<String>("discard") {
        options.discard.extend(patterns.cloned());
    }
    for pass in matches.get_many::<PrunePass>("prune").into_iter().flatten() {
        match pass {
            PrunePass::Using => options.drop_using = true,
            PrunePass::EmptyLoops => options.drop_empty_loops = true,
            PrunePass::Assignments(pattern) => options.drop_assignments.push(pattern.clone()),
        }
    }
    options
}

/// Handle the execute command
fn handle_execute_command(input: &str, config: &F2xConfig, matches: &ArgMatches) {
    let registry = FormatRegistry::with_defaults();
    let format = config.output.format.as_str();
    if !registry.has(format) {
        eprintln!("Unknown format '{}'", format);
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        process::exit(1);
    }

    let loader = SourceLoader::from_path(input).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let options = parse_options(config, matches);
    debug!(?options, "parse options");

    let root = loader.parse_with(&options).unwrap_or_else(|e| {
        report_failure(input, loader.source_ref(), &e);
        process::exit(1);
    });

    let node = match matches.get_one::<String>("path") {
        Some(path) => select_subtree(&root, path),
        None => &root,
    };

    let formatted = if format == "treeviz" && matches.get_flag("line-numbers") {
        let params = HashMap::from([("show-linum".to_string(), "true".to_string())]);
        f2x_parser::fortran::formats::to_treeviz_str_with_params(node, &params)
    } else {
        registry.serialize(node, format).unwrap_or_else(|e| {
            eprintln!("Error formatting output: {}", e);
            process::exit(1);
        })
    };

    print!("{}", formatted);
}

fn select_subtree<'a>(root: &'a Node, path: &str) -> &'a Node {
    let steps = parse_path(path).unwrap_or_else(|e| {
        eprintln!("Invalid path '{}': {}", path, e);
        process::exit(1);
    });
    root.find_path(&steps).unwrap_or_else(|| {
        eprintln!("No node at path '{}'", path);
        process::exit(1);
    })
}

fn report_failure(input: &str, source: &str, err: &LoaderError) {
    eprintln!("{}: {}", input, err);
    if let LoaderError::TransformError(inner) = err {
        if let Some(parse_error) = inner.parse_error() {
            eprint!("{}", format_source_context(source, parse_error.line()));
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
            println!();
        }
    }
}
