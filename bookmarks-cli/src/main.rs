//! Bookmarks CLI
//!
//! Reads a Netscape bookmark file or a Chrome bookmark JSON file, prints
//! what it holds and optionally converts it to a Netscape document.

mod print;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use bookmarks_chrome::{ChromeReader, looks_like_chrome_json};
use bookmarks_common::encoding::TextEncoding;
use bookmarks_common::warning::{clear_warnings, warnings};
use bookmarks_netscape::{NetscapeReader, NetscapeWriter};
use bookmarks_tree::Folder;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;

/// Inspect and convert browser bookmark files
#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the folder tree of an exported bookmark file
    bookmarks bookmarks.html

    # List every link in Chrome's bookmarks
    bookmarks --links ~/.config/google-chrome/Default/Bookmarks

    # Convert Chrome bookmarks to a UTF-16 Netscape file
    bookmarks Bookmarks --output bookmarks.html --encoding utf-16
"#)]
struct Cli {
    /// Bookmark file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Input format (detected from the content by default)
    #[arg(short, long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Write the bookmarks to this file as a Netscape document
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Text encoding of the written document
    #[arg(short, long, value_name = "LABEL", default_value = "utf-8")]
    encoding: String,

    /// Print a flat list of links instead of the folder tree
    #[arg(long, conflicts_with = "json")]
    links: bool,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,
}

/// Input formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Chrome JSON if the file starts like JSON, Netscape otherwise
    Auto,
    /// Netscape bookmark file (HTML)
    Netscape,
    /// Chrome bookmarks file or extension API dump (JSON)
    Chrome,
}

impl Format {
    /// Settle `Auto` by looking at the input.
    fn resolve(self, input: &[u8]) -> Self {
        match self {
            Self::Auto if looks_like_chrome_json(input) => Self::Chrome,
            Self::Auto => Self::Netscape,
            other => other,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let root = load(&cli.input, cli.format)?;
    let skipped = warnings().len();
    if skipped > 0 {
        eprintln!("{} {skipped} problem(s) in the input were skipped", "Note:".yellow().bold());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&print::folder_to_json(&root))?);
    } else if cli.links {
        print::print_links(&root);
    } else {
        print::print_tree(&root);
    }

    if let Some(ref output) = cli.output {
        let encoding = TextEncoding::from_label(&cli.encoding)
            .ok_or_else(|| anyhow!("unsupported encoding {:?}", cli.encoding))?;
        save(&root, output, encoding)?;
        eprintln!(
            "{} {} ({})",
            "Wrote".green().bold(),
            output.display(),
            encoding.web_name()
        );
    }

    Ok(())
}

/// Read and parse a bookmark file.
fn load(path: &Path, format: Format) -> Result<Folder> {
    let input = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    match format.resolve(&input) {
        Format::Chrome => ChromeReader::new()
            .read_bytes(&input)
            .with_context(|| format!("{} is not a Chrome bookmarks file", path.display())),
        Format::Netscape | Format::Auto => NetscapeReader::new()
            .read_bytes(&input)
            .with_context(|| format!("{} is not a Netscape bookmark file", path.display())),
    }
}

/// Write `root` to `path` as a Netscape document.
fn save(root: &Folder, path: &Path, encoding: TextEncoding) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    NetscapeWriter::new(encoding)
        .write_to(root, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))
}
