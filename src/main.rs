use clap::{Parser, Subcommand, ValueEnum};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use transfo::{ConcatOptions, CopyOptions, Result, StripMode, TemplateValue};

const LONG_HELP: &str = r#"
Template tokens (banner, footer, separator, copy destinations):
  {{ files }}     - Ordered list of joined source paths
  {{ count }}     - Number of joined sources
  {{ dest }}      - Destination path
  {{ timestamp }} - Current time, RFC 3339
  Unresolved tokens expand to an empty string.

Banner stripping modes:
  --strip-banners         - Strip block-comment banners, keep /*! banners
  --strip-banners=block   - Strip any block-comment banner, /*! included
  --strip-banners=line    - Strip leading runs of // line comments only

Examples:
  # Join files with the default "\n" separator
  transfo concat src/a.js src/b.js -o dist/bundle.js
  # Custom banner, footer and separator (backslash escapes decoded)
  transfo concat src/a.js src/b.js -o dist/bundle.js \
      --banner '/* built {{ timestamp }} */\n' --separator '\n;\n' --footer '\n'
  # Strip license banners before joining
  transfo concat src/*.js -o dist/bundle.js --strip-banners
  # Machine-readable run report, including skipped sources
  transfo concat src/*.js -o dist/bundle.js --report json
  # Mirror a directory tree
  transfo copy assets dist/assets
  # Flatten it instead, skipping markdown files
  transfo copy assets dist/assets --flatten -x '*.md'
  # Expand a version token in the destination name
  transfo copy pkg 'dist/pkg_{{ version }}' --set version=0.1.0

Unreadable sources are reported as warnings and skipped; the destination is
still written from the remaining files. Only a failing processor or an
unwritable destination aborts the run.
"#;

/// Concatenate and copy text files with banner/footer/separator templating.
#[derive(Parser, Debug)]
#[command(
    name = "transfo",
    version,
    about = "Concatenate and copy text files with banner/footer/separator templating.",
    after_long_help = LONG_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Concatenate source files into one destination file
    Concat {
        /// Source files to join, in order
        #[arg(value_name = "SOURCES")]
        sources: Vec<PathBuf>,

        /// Destination file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Separator between adjacent files
        #[arg(short, long, value_name = "TEXT", default_value = "\\n")]
        separator: String,

        /// Banner prepended once to the output
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        banner: String,

        /// Footer appended once to the output
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        footer: String,

        /// Strip leading banner comments from each source
        #[arg(
            long,
            value_name = "MODE",
            value_enum,
            num_args = 0..=1,
            default_missing_value = "auto"
        )]
        strip_banners: Option<StripArg>,

        /// Report format printed after the run
        #[arg(long, value_enum, default_value = "plain")]
        report: ReportFormat,
    },
    /// Copy a file or directory tree, no content transformation
    Copy {
        /// Source file or directory
        #[arg(value_name = "SRC")]
        src: PathBuf,

        /// Destination path; {{ token }} references expand via --set
        #[arg(value_name = "DEST")]
        dest: PathBuf,

        /// Discard intermediate directories, keep only basenames
        #[arg(long)]
        flatten: bool,

        /// Exclude glob patterns (repeatable), relative to the source root
        #[arg(short = 'x', long = "exclude", value_name = "GLOB", action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        /// Destination template variables
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, action = clap::ArgAction::Append)]
        vars: Vec<(String, String)>,

        /// Report format printed after the run
        #[arg(long, value_enum, default_value = "plain")]
        report: ReportFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StripArg {
    /// Strip block-comment banners, keeping /*! banners
    Auto,
    /// Strip any block-comment banner, /*! included
    Block,
    /// Strip line-comment banners only
    Line,
}

impl From<StripArg> for StripMode {
    fn from(arg: StripArg) -> Self {
        match arg {
            StripArg::Auto => Self::default(),
            StripArg::Block => Self {
                block: true,
                line: false,
            },
            StripArg::Line => Self {
                block: false,
                line: true,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ReportFormat {
    /// Human-readable summary
    Plain,
    /// JSON output for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Concat {
            sources,
            output,
            separator,
            banner,
            footer,
            strip_banners,
            report,
        } => {
            let options = ConcatOptions {
                separator: TemplateValue::from(unescape(&separator)),
                banner: TemplateValue::from(unescape(&banner)),
                footer: TemplateValue::from(unescape(&footer)),
                strip_banners: strip_banners.map(Into::into),
                process: None,
            };

            let outcome = transfo::concat(&sources, &output, &options)?;
            match report {
                ReportFormat::Plain => {
                    println!(
                        "Concatenated {} of {} source(s) into {}",
                        outcome.joined.len(),
                        sources.len(),
                        outcome.dest.display()
                    );
                    for warning in &outcome.warnings {
                        println!("  skipped {}: {}", warning.path.display(), warning.message);
                    }
                }
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
            Ok(())
        }
        Command::Copy {
            src,
            dest,
            flatten,
            exclude,
            vars,
            report,
        } => {
            let options = CopyOptions {
                flatten,
                exclude: build_exclude_set(&exclude)?,
                vars: vars.into_iter().collect(),
            };

            let outcome = transfo::copy(&src, &dest, &options)?;
            match report {
                ReportFormat::Plain => println!("Copied {} file(s)", outcome.copied.len()),
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
            Ok(())
        }
    }
}

fn init_logger(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new().filter_level(level).init();
}

fn build_exclude_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}

/// Decodes `\n`, `\t`, `\r`, and `\\` in option values so separators and
/// banners can be written inline on the command line.
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}
