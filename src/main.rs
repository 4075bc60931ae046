mod cli;

use std::process::ExitCode;

use anyhow::{bail, Context as _};
use clap::Parser;
use dd_binder::{Context, Diagnostic};
use dd_descriptors::Descriptor;
use encoding_rs::UTF_8;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

/// Fetches the input from a URL or the file system and decodes it.
///
/// A byte order mark selects the encoding; everything else is read as UTF-8.
fn load(input: &str) -> anyhow::Result<String> {
    let bytes = if input.starts_with("http://") || input.starts_with("https://") {
        debug!(url = input, "fetching descriptor");
        reqwest::blocking::get(input)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .with_context(|| format!("failed to fetch {input}"))?
            .to_vec()
    } else {
        std::fs::read(input).with_context(|| format!("failed to read {input}"))?
    };
    let (decoded, encoding, had_errors) = UTF_8.decode(&bytes);
    if had_errors {
        warn!(encoding = encoding.name(), "input contains malformed characters");
    }
    Ok(decoded.into_owned())
}

fn report(input: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.position {
            Some(_) => eprintln!("{input}:{diagnostic}"),
            None => eprintln!("{input}: {diagnostic}"),
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<usize> {
    let xml = load(&cli.input)?;
    let read_options = cli.read_options();
    let write_options = cli.write_options();
    let mut context = Context::new();

    let descriptor = match cli.kind.descriptor_kind() {
        Some(kind) => Descriptor::parse_as(kind, &xml, &read_options, &mut context),
        None => Descriptor::parse(&xml, &read_options, &mut context),
    }
    .with_context(|| format!("failed to read {}", cli.input))?;
    for public_id in context.public_ids() {
        debug!(public_id = public_id.as_str(), "document type declaration");
    }
    let diagnostics = context.take_diagnostics();
    report(&cli.input, &diagnostics);
    let mut count = diagnostics.len();

    let Some(descriptor) = descriptor else {
        bail!("{} has no descriptor content", cli.input);
    };
    debug!(kind = descriptor.kind().element(), "read descriptor");

    match cli.command {
        Command::Check => {}
        Command::Print => {
            let xml = descriptor.write(&write_options, &mut context)?;
            print!("{xml}");
        }
        Command::Roundtrip => {
            let written = descriptor.write(&write_options, &mut context)?;
            let again =
                Descriptor::parse_as(descriptor.kind(), &written, &read_options, &mut context)
                    .context("the written descriptor could not be read again")?;
            if again.as_ref() != Some(&descriptor) {
                bail!("{} changed after being written and read again", cli.input);
            }
        }
    }
    let diagnostics = context.take_diagnostics();
    report(&cli.input, &diagnostics);
    count += diagnostics.len();
    Ok(count)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(count) if count > 0 && cli.strict => {
            eprintln!("{count} diagnostic(s) recorded");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
