use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use odb_store::{
    ErrorPolicy, Inventory, InventorySummary, ObjectContent, ScanOptions, StoredObject, TypePolicy,
};
use odb_types::ObjectType;
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        format,
        pretty,
        ..
    } = cli;
    match command {
        Command::Scan(args) => cmd_scan(args, &format, pretty),
        Command::Show(args) => cmd_show(args, &format, pretty),
    }
}

fn type_policy(strict: bool) -> TypePolicy {
    if strict {
        TypePolicy::Strict
    } else {
        TypePolicy::Permissive
    }
}

fn cmd_scan(args: ScanArgs, format: &OutputFormat, pretty: bool) -> anyhow::Result<()> {
    let options = ScanOptions {
        errors: if args.keep_going {
            ErrorPolicy::Collect
        } else {
            ErrorPolicy::FailFast
        },
        types: type_policy(args.strict_types),
    };
    info!(repo = %args.repo.display(), ?options, "scanning repository");
    let inventory = odb_store::inventory(&args.repo, &options)
        .with_context(|| format!("failed to inventory {}", args.repo.display()))?;

    let filter = args.kind.as_deref().map(ObjectType::parse);
    report_scan(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &inventory,
        filter.as_ref(),
        format,
        pretty,
    )
}

/// Write the decoded objects to `out` and any skipped failures to `errors`.
fn report_scan(
    out: &mut impl Write,
    errors: &mut impl Write,
    inventory: &Inventory,
    kind: Option<&ObjectType>,
    format: &OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    for failure in &inventory.failures {
        writeln!(errors, "{} {}", "skipped:".red().bold(), failure.error)?;
    }

    let selected = select(inventory, kind);
    match format {
        OutputFormat::Json => write_json(out, &selected, pretty)?,
        OutputFormat::Text => {
            write_text(out, &selected)?;
            write_summary(out, &inventory.summary())?;
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: &OutputFormat, pretty: bool) -> anyhow::Result<()> {
    let compressed = std::fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let object = StoredObject::from_compressed(&compressed, type_policy(args.strict_types))
        .with_context(|| format!("failed to decode {}", args.path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &object, pretty)?,
        OutputFormat::Text => {
            write_text(&mut out, &[&object])?;
            if let Some(text) = object.content.as_text() {
                writeln!(out)?;
                write!(out, "{text}")?;
            }
        }
    }
    Ok(())
}

/// Objects of the inventory, optionally restricted to one type.
fn select<'a>(inventory: &'a Inventory, kind: Option<&ObjectType>) -> Vec<&'a StoredObject> {
    inventory
        .objects
        .iter()
        .filter(|obj| kind.map_or(true, |k| obj.kind == *k))
        .collect()
}

fn write_json<T: serde::Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// One line per object; tree entries indented beneath their tree, labelled
/// with the type their mode points at (`?` for a non-standard mode).
fn write_text(out: &mut impl Write, objects: &[&StoredObject]) -> io::Result<()> {
    for obj in objects {
        writeln!(
            out,
            "{} {:<6} {}",
            obj.digest.to_hex().yellow(),
            obj.kind.as_str().cyan(),
            obj.size
        )?;
        if let ObjectContent::Directory(dir) = &obj.content {
            for entry in &dir.files {
                let target = entry.entry_mode().map(|mode| mode.target_kind());
                let name = match target {
                    Some(ObjectType::Tree) => entry.name.blue().bold(),
                    _ => entry.name.normal(),
                };
                writeln!(
                    out,
                    "    {:>6} {:<6} {} {}",
                    entry.mode,
                    target.as_ref().map_or("?", ObjectType::as_str),
                    entry.hash.to_hex().dimmed(),
                    name
                )?;
            }
        }
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &InventorySummary) -> io::Result<()> {
    let mut line = format!(
        "{} objects: {} blobs, {} trees, {} commits, {} tags",
        summary.total(),
        summary.blobs,
        summary.trees,
        summary.commits,
        summary.tags
    );
    if summary.unknown > 0 {
        line.push_str(&format!(", {} unknown", summary.unknown));
    }
    if summary.failures > 0 {
        line.push_str(&format!(", {} failed", summary.failures));
    }
    writeln!(out, "{}", line.bold())
}
