use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use flexia_dict::{snapshot, DictionaryIndex, IndexBuilder, Lexicon};
use flexia_parser::{MorphedToken, Transducer};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compiles inflection dictionaries and morphs annotated sentences")]
struct Cli {
    /// Log filter, e.g. `info` or `flexia_dict=debug`
    #[arg(long, global = true, env = "FLEXIA_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a text dictionary into a binary snapshot
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Inflect annotated sentences (reads stdin lines when none are given)
    Morph {
        #[arg(short, long, value_name = "FILE", env = "FLEXIA_DICT")]
        dict: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,

        /// Print a JSON report per sentence instead of the plain result
        #[arg(long)]
        explain: bool,

        sentences: Vec<String>,
    },

    /// Print a text dictionary as JSON
    Dump {
        #[arg(short, long, value_name = "FILE", env = "FLEXIA_DICT")]
        dict: PathBuf,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Snapshot for `.rkyv` files, text otherwise
    Auto,
    Text,
    Snapshot,
}

impl Format {
    fn resolve(self, path: &Path) -> Format {
        match self {
            Format::Auto if path.extension().is_some_and(|ext| ext == "rkyv") => Format::Snapshot,
            Format::Auto => Format::Text,
            explicit => explicit,
        }
    }
}

#[derive(Serialize)]
struct Explanation<'a> {
    input: &'a str,
    output: String,
    tokens: Vec<MorphedToken<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Morph {
            dict,
            format,
            explain,
            sentences,
        } => match format.resolve(&dict) {
            Format::Snapshot => {
                let bytes = snapshot::read(&dict)?;
                let archived = snapshot::archived(&bytes)
                    .with_context(|| format!("loading snapshot {}", dict.display()))?;
                tracing::info!(lemmas = archived.len(), path = %dict.display(), "snapshot loaded");
                run_morph(Transducer::new(archived), &sentences, explain)
            }
            Format::Text | Format::Auto => {
                let index = DictionaryIndex::from_path(&dict)?;
                tracing::info!(lemmas = index.len(), path = %dict.display(), "dictionary loaded");
                run_morph(Transducer::new(&index), &sentences, explain)
            }
        },
        Command::Dump { dict, pretty } => dump(&dict, pretty),
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    tracing::info!(path = %input.display(), "reading dictionary");
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;

    let mut builder = IndexBuilder::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", input.display()))?;
        builder.push_line(&line);
    }
    let (index, stats) = builder.finish();
    tracing::info!(
        lines = stats.lines,
        lemmas = stats.lemmas,
        forms = index.form_count(),
        "dictionary compiled"
    );

    let written = snapshot::write(output, &index)
        .with_context(|| format!("writing snapshot {}", output.display()))?;
    tracing::info!(bytes = written, path = %output.display(), "snapshot written");
    Ok(())
}

fn run_morph<L: Lexicon + ?Sized>(
    transducer: Transducer<'_, L>,
    sentences: &[String],
    explain: bool,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut emit = |sentence: &str| -> anyhow::Result<()> {
        if explain {
            let tokens = transducer.analyze(sentence);
            let output = tokens
                .iter()
                .map(|t| t.output.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let report = Explanation {
                input: sentence,
                output,
                tokens,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            writeln!(out, "{}", transducer.morph(sentence))?;
        }
        Ok(())
    };

    if sentences.is_empty() {
        for line in io::stdin().lock().lines() {
            emit(&line.context("reading stdin")?)?;
        }
    } else {
        for sentence in sentences {
            emit(sentence)?;
        }
    }
    Ok(())
}

fn dump(dict: &Path, pretty: bool) -> anyhow::Result<()> {
    let index = DictionaryIndex::from_path(dict)?;

    let mut lemmas: Vec<_> = index.lemmas().collect();
    lemmas.sort_by(|a, b| a.key().cmp(b.key()));

    let json = if pretty {
        serde_json::to_string_pretty(&lemmas)?
    } else {
        serde_json::to_string(&lemmas)?
    };
    println!("{}", json);
    Ok(())
}
