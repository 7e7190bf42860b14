//! Command implementations for sspc.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the setup shared by every command.

mod batch;
mod compile;
mod inspect;

use crate::cli::{Command, OutputArgs};
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::translate::{Emitter, Skeleton, Translation};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Compile(args) => compile::cmd_compile(args),
        Command::Batch(args) => batch::cmd_batch(args),
        Command::Inspect(args) => inspect::cmd_inspect(args),
    }
}

/// Build the emitter: `--skeleton` beats the configured skeleton, which beats
/// the built-in one.
pub(crate) fn build_emitter(config: &Config, skeleton_override: Option<&Path>) -> Result<Emitter> {
    let skeleton = match skeleton_override
        .map(Path::to_path_buf)
        .or_else(|| config.skeleton_path())
    {
        Some(path) => Skeleton::load(path)?,
        None => Skeleton::default(),
    };
    Ok(Emitter::new(skeleton, config.accumulator.clone()))
}

/// `--event-log` beats the configured build log.
pub(crate) fn event_log_path(config: &Config, output: &OutputArgs) -> Option<PathBuf> {
    output.event_log.clone().or_else(|| config.event_log_path())
}

/// Append the outcome of one translation to the build log, if there is one.
///
/// A build log failure is reported as a warning; it never fails the build.
pub(crate) fn record_outcome(
    log: Option<&Path>,
    ctx: &BuildContext,
    outcome: &Result<Translation>,
) {
    let Some(log) = log else {
        return;
    };

    let event = match outcome {
        Ok(translation) => Event::new(EventAction::Compile, &ctx.product).with_details(json!({
            "source": ctx.source_path.display().to_string(),
            "destination": ctx.dest_path.display().to_string(),
            "segments": translation.segments.len(),
            "code_segments": translation.code_segment_count(),
            "import_bytes": translation.imports.len(),
            "declaration_bytes": translation.declarations.len(),
        })),
        Err(err) => Event::new(EventAction::CompileFailed, &ctx.product).with_details(json!({
            "source": ctx.source_path.display().to_string(),
            "error": err.to_string(),
            "exit_code": err.exit_code(),
        })),
    };

    if let Err(e) = append_event(log, &event) {
        eprintln!("Warning: failed to write build log event: {}", e);
    }
}
