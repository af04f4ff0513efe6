use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commentpress_config::Config;
use commentpress_engine::{
    DEFAULT_PREFIX, EntryState, FormatterMode, ParsePolicy, SegmentOptions, segment,
};
use commentpress_markup::{LoadOptions, SourceEncoding, load_with, serialize_encoded};

#[derive(Parser)]
#[command(
    name = "commentpress",
    version,
    about = "Split rendered entries into commentable textblocks"
)]
struct Cli {
    /// Config file to use instead of ~/.config/commentpress/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate an entry's markup, or print its block manifest
    Segment(SegmentArgs),

    /// Write a config file with every setting at its default
    InitConfig,
}

#[derive(clap::Args)]
struct SegmentArgs {
    /// HTML file to segment, or `-` for stdin
    file: String,

    /// Entry id; identifiers come from the configured prefix template
    #[arg(long, conflicts_with = "prefix")]
    post_id: Option<u64>,

    /// Identifier prefix used as-is
    #[arg(long)]
    prefix: Option<String>,

    /// Formatter mode: prose, poetry or plain
    #[arg(short, long)]
    mode: Option<String>,

    /// Sequence index of the first block
    #[arg(long)]
    offset: Option<usize>,

    /// Print the JSON manifest instead of annotated markup
    #[arg(long)]
    manifest: bool,

    /// Leave out the comment-icon placeholder spans
    #[arg(long)]
    no_placeholders: bool,

    /// Input is ISO-8859-1 and output is written back as ISO-8859-1
    #[arg(long)]
    latin1: bool,

    /// Number of comments on the entry, for the skip policy
    #[arg(long)]
    comment_count: Option<usize>,

    /// Comments on the entry are closed, for the skip policy
    #[arg(long, requires = "comment_count")]
    comments_closed: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .as_deref()
        .map(|path| Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()));

    match cli.command {
        Command::Segment(args) => {
            let config = match &config_path {
                Some(path) => Config::load_from_path(path)?,
                None => Config::load()?,
            }
            .unwrap_or_default();
            run_segment(&args, &config)
        }
        Command::InitConfig => {
            let config = Config::default();
            let written = match config_path {
                Some(path) => config.save_to_path(&path).map(|()| path),
                None => config.save().map(|()| Config::config_path()),
            }
            .context("Failed to write config file")?;
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}

fn run_segment(args: &SegmentArgs, config: &Config) -> Result<()> {
    let input = read_input(&args.file)?;
    let mut stdout = io::stdout().lock();

    let policy = ParsePolicy {
        skip_uncommented_closed: config.skip_uncommented_closed,
    };
    if let Some(entry) = entry_state(args)
        && !policy.should_segment(&entry)
    {
        log::info!("{}: no comments and comments closed, leaving as-is", args.file);
        stdout.write_all(&input)?;
        return Ok(());
    }

    let encoding = source_encoding(args, config)?;
    let load_options = LoadOptions {
        nesting_limit: config.nesting_limit,
    };
    let tree = load_with(&input, encoding, load_options)
        .with_context(|| format!("Failed to load {}", args.file))?;

    let options = segment_options(args, config);
    log::debug!(
        "segmenting {} as {} with prefix {:?}",
        args.file,
        options.mode,
        options.prefix
    );
    let segmentation = segment(tree, &options);

    if args.manifest {
        let json = serde_json::to_string_pretty(&segmentation.manifest())?;
        writeln!(stdout, "{json}")?;
    } else {
        stdout.write_all(&serialize_encoded(&segmentation.annotated, encoding))?;
    }
    Ok(())
}

fn read_input(file: &str) -> Result<Vec<u8>> {
    if file == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(Path::new(file)).with_context(|| format!("Failed to read {file}"))
}

fn entry_state(args: &SegmentArgs) -> Option<EntryState> {
    args.comment_count.map(|comment_count| EntryState {
        comment_count,
        comments_open: !args.comments_closed,
    })
}

fn source_encoding(args: &SegmentArgs, config: &Config) -> Result<SourceEncoding> {
    if args.latin1 {
        return Ok(SourceEncoding::Latin1);
    }
    Ok(config.encoding.parse::<SourceEncoding>()?)
}

/// Flags win over the config file.
fn segment_options(args: &SegmentArgs, config: &Config) -> SegmentOptions {
    let prefix = match (&args.prefix, args.post_id) {
        (Some(prefix), _) => prefix.clone(),
        (None, Some(post_id)) => config.prefix_for(post_id),
        (None, None) => DEFAULT_PREFIX.to_string(),
    };
    let mode = args.mode.as_deref().unwrap_or(&config.formatter);

    SegmentOptions::new(prefix)
        .with_mode(FormatterMode::resolve(mode))
        .with_start_offset(args.offset.unwrap_or(config.start_offset))
        .with_placeholders(config.placeholders && !args.no_placeholders)
}
