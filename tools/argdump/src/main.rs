use std::{
    collections::HashSet,
    fmt::Write as _,
    fs,
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use proto2args::{
    ArgsParser,
    core::{ArgCollector, ArgRecord},
    schema::DescriptorPool,
};

#[derive(Parser)]
#[command(name = "argdump", about = "Dump the decoded arguments of a binary-encoded message")]
struct Cli {
    /// Path to a serialized google.protobuf.FileDescriptorSet
    #[arg(short, long)]
    schema: PathBuf,

    /// Fully-qualified message type name (e.g. my.pkg.Event)
    #[arg(short = 't', long = "type")]
    type_name: String,

    /// Path to the binary message payload
    input: PathBuf,

    /// Restrict decoding to these top-level field tags (repeatable)
    #[arg(long = "allow", value_name = "TAG")]
    allowed_tags: Vec<u32>,

    /// Print flat keys (no repeated-field indices) instead of full keys
    #[arg(long)]
    flat: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let schema_bytes = fs::read(&cli.schema)
        .with_context(|| format!("reading descriptor set {}", cli.schema.display()))?;
    let pool = DescriptorPool::from_descriptor_set_bytes(&schema_bytes)?;
    let payload = fs::read(&cli.input)
        .with_context(|| format!("reading payload {}", cli.input.display()))?;

    let allowed: Option<HashSet<u32>> = if cli.allowed_tags.is_empty() {
        None
    } else {
        Some(cli.allowed_tags.iter().copied().collect())
    };

    let mut parser = ArgsParser::new(&pool);
    let mut collector = ArgCollector::new();
    parser.parse_message(&payload, &cli.type_name, allowed.as_ref(), &mut collector)?;

    let mut text = String::new();
    for ArgRecord { key, value } in collector.records() {
        let path = if cli.flat { &key.flat_key } else { &key.key };
        writeln!(text, "{path} = {value}")?;
    }

    match cli.output {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}
