//! # nohow
//!
//! Extract an addressable table of contents from a book's markdown.
//!
//! ## Usage
//!
//! Show the heading tree with conversation keys and line ranges:
//! ```sh
//! nohow toc.md
//! ```
//!
//! Store the tree and read it back:
//! ```sh
//! nohow -o json toc.md > toc.json
//! nohow --load toc.json
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use nohow::{Config, Document, TocOptions, TocTree};
use std::io::Read;
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = Config::load();
    let format = args
        .output
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
    let show_lines = config.output.show_lines && !args.no_lines;

    // A stored tree replaces markdown parsing entirely
    if let Some(ref load_path) = args.load {
        let blob = std::fs::read_to_string(load_path)
            .wrap_err_with(|| format!("Failed to read {}", load_path.display()))?;
        let tree = TocTree::from_json_str(&blob)?;
        debug!(path = %load_path.display(), headings = tree.len(), "loaded stored tree");
        return print_tree_output(&args, &tree, format, show_lines);
    }

    let options = resolve_options(&args, &config)?;
    if args.save_levels {
        return save_levels(config, options);
    }

    let content = read_source(args.file.as_deref())?;
    let doc = Document::new(content, options)?;

    if let Some(ref key) = args.section {
        return print_section(&doc, key);
    }

    print_tree_output(&args, doc.tree(), format, show_lines)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "nohow=debug" } else { "nohow=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// CLI level flags override the config window one bound at a time.
fn resolve_options(args: &Cli, config: &Config) -> Result<TocOptions> {
    let min = args.min_level.unwrap_or(config.toc.min_level);
    let max = args.max_level.unwrap_or(config.toc.max_level);
    Ok(TocOptions::new(min, max)?)
}

fn save_levels(mut config: Config, options: TocOptions) -> Result<()> {
    config.set_levels(options.min_level(), options.max_level())?;
    config
        .save()
        .map_err(|e| eyre!("Failed to save config: {}", e))?;

    if let Some(path) = Config::config_path() {
        println!(
            "Saved heading levels {}-{} to {}",
            options.min_level(),
            options.max_level(),
            path.display()
        );
    }
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .wrap_err("Failed to read markdown from stdin")?;
            Ok(content)
        }
    }
}

fn print_tree_output(
    args: &Cli,
    tree: &TocTree,
    format: OutputFormat,
    show_lines: bool,
) -> Result<()> {
    if args.signature {
        print_signatures(tree);
    } else if args.list {
        print_flattened(tree, format)?;
    } else if args.tree {
        print!("{}", tree.render(show_lines));
    } else {
        match format {
            OutputFormat::Tree => print!("{}", tree.render(show_lines)),
            OutputFormat::Plain => print_flattened(tree, format)?,
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree)?),
        }
    }
    Ok(())
}

fn print_flattened(tree: &TocTree, format: OutputFormat) -> Result<()> {
    let entries = tree.flatten();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain | OutputFormat::Tree => {
            for (node, entry) in tree.headings().zip(&entries) {
                println!(
                    "{} {} [{}-{}] {}",
                    "#".repeat(entry.level),
                    entry.title,
                    entry.start_line,
                    entry.end_line,
                    node.conversation_key()
                );
            }
        }
    }
    Ok(())
}

fn print_signatures(tree: &TocTree) {
    let counts: Vec<String> = tree
        .topology_signature()
        .iter()
        .map(|c| c.to_string())
        .collect();
    println!("topology: ({})", counts.join(", "));
    println!("shape:    {}", tree.shape_signature());
}

fn print_section(doc: &Document, key: &str) -> Result<()> {
    match doc.extract_section(key)? {
        Some(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        None => {
            eprintln!("Section '{}' not found", key);
            process::exit(1);
        }
    }
}

