//! trawl - parse HTML and query it from the terminal
//!
//! Reads a file, stdin, or an inline string, then prints the parsed tree,
//! the token stream, recovered parse issues, or the elements matching a
//! selector.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use simple_logger::SimpleLogger;
use trawl::html::{HTMLTokenizer, Token, tree_dump};
use trawl::{Document, ParseOptions, Selector};

/// trawl - lenient HTML parsing and CSS selector queries
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the parsed tree
    trawl page.html --tree

    # Print every link
    trawl page.html -s 'a[href]'

    # Only the first match, as text
    trawl page.html -s 'h1' --first --text

    # Read from stdin and print the generic tree as JSON
    curl -s https://example.com | trawl --json

    # Parse inline HTML and show what the parser recovered from
    trawl --html '<p><b></p><p>' --issues
"#)]
struct Cli {
    /// HTML file to read; stdin when omitted
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the elements matching this selector
    #[arg(short, long, value_name = "SELECTOR")]
    select: Option<String>,

    /// Stop after the first match
    #[arg(long, requires = "select")]
    first: bool,

    /// Print the text content of matches instead of their HTML
    #[arg(long, requires = "select")]
    text: bool,

    /// Print the parsed tree
    #[arg(long)]
    tree: bool,

    /// Print the generic tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the token stream and exit
    #[arg(long)]
    tokens: bool,

    /// Print recovered parse issues
    #[arg(long)]
    issues: bool,

    /// Parse as if scripting were enabled (affects <noscript>)
    #[arg(long)]
    scripting: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    let html = read_input(&cli)?;
    let options = ParseOptions::default().with_scripting(cli.scripting);

    if cli.tokens {
        print_tokens(&html, &options);
        return Ok(());
    }

    let doc = Document::parse_with_options(&html, &options);

    if cli.tree {
        print_tree(&doc);
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&doc.to_generic_tree())
            .context("serializing the generic tree")?;
        println!("{json}");
    }

    if let Some(ref selector) = cli.select {
        let selector: Selector = selector
            .parse()
            .with_context(|| format!("parsing selector {selector:?}"))?;
        print_matches(&doc, &selector, &cli)?;
    }

    if cli.issues {
        print_issues(&doc);
    }

    // Nothing asked for: show the tree.
    if !(cli.tree || cli.json || cli.select.is_some() || cli.issues) {
        print_tree(&doc);
    }

    Ok(())
}

/// Load HTML from `--html`, the file argument, or stdin.
fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    if let Some(ref path) = cli.path {
        return fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()));
    }
    let mut html = String::new();
    let _ = io::stdin()
        .read_to_string(&mut html)
        .context("reading stdin")?;
    Ok(html)
}

fn print_tokens(html: &str, options: &ParseOptions) {
    let tokenizer = HTMLTokenizer::with_options(html, options.tokenizer.clone());
    for token in tokenizer {
        match token {
            Token::StartTag { .. } | Token::EndTag { .. } => println!("{}", token.cyan()),
            Token::Comment { .. } => println!("{}", token.dimmed()),
            Token::Doctype { .. } => println!("{}", token.magenta()),
            Token::Character { .. } => println!("{token}"),
            Token::EndOfFile => println!("{}", token.bold()),
        }
    }
}

/// Print the tree dump, one color per node kind.
fn print_tree(doc: &Document) {
    println!("{}", "=== DOM Tree ===".bold());
    for line in tree_dump(doc.tree()).lines() {
        let body = line.trim_start_matches("| ").trim_start();
        let indent = &line[..line.len() - body.len()];
        if body.starts_with("<!--") {
            println!("{indent}{}", body.dimmed());
        } else if body.starts_with("<!DOCTYPE") {
            println!("{indent}{}", body.magenta());
        } else if body.starts_with('<') {
            println!("{indent}{}", body.cyan());
        } else if body.starts_with('"') {
            println!("{indent}{}", body.green());
        } else {
            println!("{indent}{}", body.yellow());
        }
    }
}

fn print_matches(doc: &Document, selector: &Selector, cli: &Cli) -> anyhow::Result<()> {
    let limit = if cli.first { 1 } else { usize::MAX };
    let mut count = 0;
    for node in doc.select(doc.root(), selector)?.take(limit) {
        count += 1;
        println!("{}", doc.xpath(node)?.bold().blue());
        let body = if cli.text {
            doc.text(node)?
        } else {
            doc.outer_html(node)?
        };
        println!("{body}");
    }
    log::debug!("{count} match(es) for {selector}");
    if count == 0 {
        eprintln!("{}", format!("no elements match {selector}").yellow());
    }
    Ok(())
}

fn print_issues(doc: &Document) {
    let issues = doc.issues();
    println!("{}", format!("=== Parse Issues ({}) ===", issues.len()).bold());
    for issue in issues {
        println!("  - {}", issue.yellow());
    }
}
