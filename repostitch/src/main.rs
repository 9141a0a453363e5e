use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use repostitch_lib::{
    parse_size, stitch_contents, OutputFormat, StitchConfig, TextEncoding, DEFAULT_MAX_FILE_SIZE,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Stitches a directory tree into a single Markdown or plain-text context document.",
    long_about = "Repostitch walks a directory, filters entries through ignore patterns, hidden-file \
and size policies, and renders a folder tree followed by the textual content of every visible \
file. Binary and unreadable files appear as placeholders. The document is written to a file \
(auto-named by default) or to stdout, ready to paste into a bounded context window."
)]
struct Cli {
    /// Root directory to stitch.
    #[arg(long, value_name = "PATH", default_value = ".")]
    root: PathBuf,

    /// Output file path (default: auto-generated timestamped name).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the document to stdout instead of a file.
    #[arg(long)]
    stdout: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "md")]
    format: FormatArg,

    /// Path to a gitignore-style file to respect (default: <root>/.gitignore).
    #[arg(long, value_name = "PATH")]
    gitignore: Option<PathBuf>,

    /// Do not respect any gitignore file, even if present.
    #[arg(long)]
    no_gitignore: bool,

    /// Ecosystem preset adding common ignore patterns.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Extra ignore pattern in gitignore syntax. Can be used multiple times.
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Include dotfiles and dot-directories.
    #[arg(long)]
    include_hidden: bool,

    /// Skip files larger than SIZE (e.g. 500k, 2m).
    #[arg(long, value_name = "SIZE", default_value = "1m")]
    max_file_size: String,

    /// Follow symbolic links while walking.
    #[arg(long)]
    follow_symlinks: bool,

    /// Render absolute paths in per-file sections (default: relative).
    #[arg(long)]
    absolute_paths: bool,

    /// Text encoding for file contents.
    #[arg(long, value_name = "NAME", default_value = "utf-8")]
    encoding: String,

    /// Suppress the success message and error echo.
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Md,
    Txt,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Md => OutputFormat::Markdown,
            FormatArg::Txt => OutputFormat::Text,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Python,
    Node,
}

impl PresetArg {
    fn name(self) -> &'static str {
        match self {
            PresetArg::Python => "python",
            PresetArg::Node => "node",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(log_level).init();
    debug!("Parsed arguments: {:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.quiet {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let format: OutputFormat = cli.format.into();
    let config = StitchConfig {
        root: cli.root.clone(),
        format,
        gitignore_path: cli.gitignore.clone(),
        use_gitignore: !cli.no_gitignore,
        preset: cli.preset.map(|p| p.name().to_string()),
        extra_ignores: cli.ignore.clone(),
        include_hidden: cli.include_hidden,
        max_file_size: parse_size(&cli.max_file_size, DEFAULT_MAX_FILE_SIZE)?,
        follow_symlinks: cli.follow_symlinks,
        absolute_paths: cli.absolute_paths,
        encoding: TextEncoding::from_name(&cli.encoding)?,
        quiet: cli.quiet,
    };

    let document = stitch_contents(&config)?;

    // --stdout wins over --output when both are given.
    if cli.stdout {
        io::stdout()
            .write_all(document.as_bytes())
            .context("Failed to write document to stdout")?;
        io::stdout().flush().context("Failed to flush stdout")?;
        return Ok(());
    }

    let output_path = cli.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "repostitch-{}.{}",
            Local::now().timestamp(),
            format.extension()
        ))
    });
    fs::write(&output_path, &document)
        .with_context(|| format!("Failed to write output file: {:?}", output_path))?;
    info!("Wrote document to {:?}", output_path);
    if !cli.quiet {
        println!("Wrote {}", output_path.display());
    }
    Ok(())
}
