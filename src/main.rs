use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use flexsection::manifest::parse_manifest;
use flexsection::{
    parse_document, Collaborators, FormRenderer, IdGenerator, RandomIdGenerator,
    SequentialIdGenerator, SpanIconProvider, StaticPermissions,
};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cli() -> Command {
    Command::new("flexsection")
        .about("Render flex form sections and inspect extension manifests")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log output (-v debug, -vv trace)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("render")
                .about("Render a section document to HTML")
                .arg(
                    Arg::new("input")
                        .help("Section document (JSON)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("deny-default-language")
                        .long("deny-default-language")
                        .action(ArgAction::SetTrue)
                        .help("Render as a user without access to the default language"),
                )
                .arg(
                    Arg::new("deterministic-ids")
                        .long("deterministic-ids")
                        .action(ArgAction::SetTrue)
                        .help("Use counting id tokens instead of random ones"),
                )
                .arg(
                    Arg::new("aux")
                        .long("aux")
                        .action(ArgAction::SetTrue)
                        .help("Print the auxiliary output as JSON after the HTML"),
                ),
        )
        .subcommand(
            Command::new("manifest")
                .about("Validate an extension manifest and print a summary")
                .arg(
                    Arg::new("input")
                        .help("Extension manifest (JSON)")
                        .required(true)
                        .index(1),
                ),
        )
}

fn run_render(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?;
    let document = parse_document(&json).with_context(|| format!("failed to parse {}", input))?;

    let permissions = if matches.get_flag("deny-default-language") {
        StaticPermissions::deny_all()
    } else {
        StaticPermissions::allow_all()
    };
    let ids: Arc<dyn IdGenerator> = if matches.get_flag("deterministic-ids") {
        Arc::new(SequentialIdGenerator::new())
    } else {
        Arc::new(RandomIdGenerator)
    };
    let renderer = FormRenderer::new(Collaborators::new(
        Arc::new(permissions),
        Arc::new(SpanIconProvider),
        ids,
    ));

    let result = renderer
        .render(document)
        .with_context(|| format!("failed to render {}", input))?;
    println!("{}", result.html);
    if matches.get_flag("aux") {
        println!("{}", serde_json::to_string_pretty(&result.aux)?);
    }
    Ok(())
}

fn run_manifest(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?;
    let manifest = parse_manifest(&json).with_context(|| format!("invalid manifest {}", input))?;

    println!("{} {} ({})", manifest.title, manifest.version, manifest.state);
    println!("category: {}", manifest.category);
    for (label, constraints) in [
        ("depends", &manifest.constraints.depends),
        ("conflicts", &manifest.constraints.conflicts),
        ("suggests", &manifest.constraints.suggests),
    ] {
        for (extension, range) in constraints {
            println!("{}: {} {}", label, extension, range);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("render", sub)) => run_render(sub),
        Some(("manifest", sub)) => run_manifest(sub),
        _ => unreachable!("subcommand is required"),
    }
}
