//! unquote - edit JSON embedded in JSON strings
//!
//! CLI entry point that drives the extract/edit/write-back round trip
//! against files on disk.

mod cli;

use std::fs;
use std::process::{Command, ExitCode};

use anyhow::{bail, Context};
use clap::Parser;
use unquote_core::{
    extract, parse_position, parse_range, Cursor, DirScratch, EditError, Editor, FileBuffer,
    Notifier, SaveOutcome, StderrNotifier,
};

use cli::Args;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Turn --select / --position into a cursor, selection taking precedence.
fn cursor_from_args(args: &Args) -> anyhow::Result<Cursor> {
    if let Some(select) = &args.select {
        let range = parse_range(select)
            .with_context(|| format!("invalid selection {select} (expected line:col-line:col)"))?;
        return Ok(Cursor::Selection(range));
    }
    if let Some(position) = &args.position {
        let pos = parse_position(position)
            .with_context(|| format!("invalid position {position} (expected line:col)"))?;
        return Ok(Cursor::Caret(pos));
    }
    bail!("either --position or --select is required");
}

/// Resolve the editor command: --editor, then $EDITOR, then vi.
fn editor_command(arg: Option<&str>) -> (String, Vec<String>) {
    let raw = arg
        .map(str::to_string)
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());

    let mut parts = raw.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| "vi".to_string());
    (program, parts.collect())
}

fn run(args: Args) -> anyhow::Result<()> {
    let cursor = cursor_from_args(&args)?;
    let mut buffer = FileBuffer::open(&args.file);

    // read-only modes: no session, no scratch copy
    if args.locate || args.print {
        let (target, editable) = extract(&buffer, cursor)?;
        if args.locate {
            let located = serde_json::json!({
                "file": args.file,
                "body": target.body,
                "range": target.range,
            });
            println!("{}", serde_json::to_string_pretty(&located)?);
        } else {
            println!("{editable}");
        }
        return Ok(());
    }

    let scratch = DirScratch::temp().context("failed to create scratch directory")?;
    let mut editor = Editor::new(scratch, StderrNotifier);

    // non-interactive write-back from a pre-edited file
    if let Some(edited_path) = &args.apply {
        let edited = fs::read_to_string(edited_path)
            .with_context(|| format!("failed to read {edited_path}"))?;
        let copy_id = editor.open(&buffer, cursor)?;
        fs::write(&copy_id, &edited).context("failed to stage edited content")?;

        let outcome = editor.save(&copy_id, &mut buffer)?;
        editor.shutdown();
        if outcome == SaveOutcome::NotRegistered {
            return Err(EditError::UnknownCopy(copy_id).into());
        }
        if args.verbose {
            eprintln!("updated {}", args.file);
        }
        return Ok(());
    }

    // interactive round trip through $EDITOR
    let copy_id = editor.open(&buffer, cursor)?;
    if args.verbose {
        eprintln!("editing {} via {copy_id}", args.file);
    }
    let before = fs::read_to_string(&copy_id).context("failed to read scratch copy")?;

    let (program, extra_args) = editor_command(args.editor.as_deref());
    let status = Command::new(&program)
        .args(&extra_args)
        .arg(&copy_id)
        .status()
        .with_context(|| format!("failed to launch editor {program}"))?;
    if !status.success() {
        editor.close(&copy_id);
        bail!("editor exited with {status}; original left untouched");
    }

    // an untouched scratch copy means the edit was abandoned
    let after = fs::read_to_string(&copy_id).context("failed to read scratch copy")?;
    if after == before {
        editor.close(&copy_id);
        StderrNotifier.info(&format!("no changes; {} left untouched", args.file));
    } else {
        match editor.save(&copy_id, &mut buffer)? {
            SaveOutcome::Written => StderrNotifier.info(&format!("updated {}", args.file)),
            // the editor already warned about non-JSON content
            SaveOutcome::WrittenRaw | SaveOutcome::NotRegistered => {}
        }
    }
    editor.shutdown();

    Ok(())
}
