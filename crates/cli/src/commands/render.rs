//! `render` command implementation.

use anyhow::{Context, Result};
use contracts::EventMessageMeta;
use msgconv::MsgConvContext;
use serde::Deserialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::cli::RenderArgs;

/// Events file content: one batch or a list of batches
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsInput {
    Batches(Vec<Vec<EventMessageMeta>>),
    Batch(Vec<EventMessageMeta>),
}

impl EventsInput {
    fn into_batches(self) -> Vec<Vec<EventMessageMeta>> {
        match self {
            Self::Batches(batches) => batches,
            Self::Batch(batch) => vec![batch],
        }
    }
}

/// Execute the `render` command
pub fn run_render(args: &RenderArgs) -> Result<()> {
    let batches = read_batches(&args.events)?;

    let ctx = MsgConvContext::create(args.config.as_deref(), args.schema.into())
        .context("Failed to create conversion context")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = render_batches(&ctx, &batches, &mut out)?;
    out.flush().context("Failed to flush stdout")?;

    let snapshot = ctx.metrics().snapshot();
    info!(
        batches = batches.len(),
        payloads = written,
        skipped = snapshot.skipped_count,
        bytes = snapshot.bytes_total,
        "Render finished"
    );
    ctx.destroy();
    Ok(())
}

fn read_batches(path: &Path) -> Result<Vec<Vec<EventMessageMeta>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    let input: EventsInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events file {}", path.display()))?;
    Ok(input.into_batches())
}

/// Write one line per generated payload, returning the number written
fn render_batches<W: Write>(
    ctx: &MsgConvContext,
    batches: &[Vec<EventMessageMeta>],
    out: &mut W,
) -> Result<usize> {
    let mut written = 0;
    for (idx, batch) in batches.iter().enumerate() {
        let payloads = ctx.generate_multiple(batch);
        debug!(batch = idx, payloads = payloads.len(), "Batch rendered");

        for payload in payloads {
            let bytes = payload.as_bytes();
            // Terminal output drops the custom placeholder's NUL
            let bytes = bytes.strip_suffix(b"\0").unwrap_or(bytes);
            out.write_all(bytes)?;
            out.write_all(b"\n")?;
            written += 1;
            ctx.release(payload);
        }
    }
    Ok(written)
}
