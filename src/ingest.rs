//! Host ingestion loop: reads decoded events as JSON lines and feeds them
//! through [`handle_batch`] in fixed-size batches.
//!
//! Delivery order is the caller's responsibility. Out-of-order events are
//! logged and still indexed, since record ids do not depend on order.
//!
//! A replayed stream resumes per kind from the highest block already stored:
//! events below it are skipped, events at that block are upserted again.

use std::collections::HashMap;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::records::{DecodedEvent, EventKind};
use crate::store::{RecordStore, StoreError};
use crate::transformations::{handle_batch, IndexError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to index batch ending at line {line}: {source}")]
    Index {
        line: usize,
        #[source]
        source: IndexError,
    },

    #[error("Failed to read resume point for {kind}: {source}")]
    Resume {
        kind: EventKind,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub events: usize,
    pub batches: usize,
    pub out_of_order: usize,
    /// Events below the stored block of their kind.
    pub skipped: usize,
}

/// Highest stored block per kind, read once per kind before the stream
/// writes anything of that kind.
#[derive(Debug, Default)]
struct ResumePoints {
    latest: HashMap<EventKind, Option<u64>>,
}

impl ResumePoints {
    async fn covers<S>(&mut self, store: &S, event: &DecodedEvent) -> Result<bool, IngestError>
    where
        S: RecordStore + ?Sized,
    {
        let latest = match self.latest.get(&event.kind) {
            Some(latest) => *latest,
            None => {
                let latest = store
                    .latest_block(event.kind)
                    .await
                    .map_err(|source| IngestError::Resume {
                        kind: event.kind,
                        source,
                    })?;
                if let Some(block) = latest {
                    tracing::info!(kind = %event.kind, block, "Resuming from stored block");
                }
                self.latest.insert(event.kind, latest);
                latest
            }
        };
        Ok(latest.is_some_and(|block| event.block_number < block))
    }
}

/// Tracks the last (block, log index) seen on one stream.
#[derive(Debug, Default)]
struct OrderingCursor {
    last: Option<(u64, u64)>,
}

impl OrderingCursor {
    /// Record `event` and report whether it arrived in order.
    fn advance(&mut self, event: &DecodedEvent) -> bool {
        let position = event.position();
        let in_order = self.last.map_or(true, |last| position >= last);
        if in_order {
            self.last = Some(position);
        }
        in_order
    }
}

/// Index every event in `reader`. Blank lines are skipped.
pub async fn ingest_lines<R, S>(
    reader: R,
    store: &S,
    batch_size: usize,
) -> Result<IngestStats, IngestError>
where
    R: AsyncBufRead + Unpin,
    S: RecordStore + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut lines = reader.lines();
    let mut cursor = OrderingCursor::default();
    let mut resume = ResumePoints::default();
    let mut stats = IngestStats::default();
    let mut batch = Vec::with_capacity(batch_size);
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let event: DecodedEvent = serde_json::from_str(&line).map_err(|source| {
            IngestError::Parse {
                line: line_no,
                source,
            }
        })?;

        if !cursor.advance(&event) {
            stats.out_of_order += 1;
            tracing::warn!(
                line = line_no,
                block = event.block_number,
                log_index = event.log_index,
                "Event delivered out of order"
            );
        }

        if resume.covers(store, &event).await? {
            stats.skipped += 1;
            continue;
        }

        batch.push(event);
        if batch.len() >= batch_size {
            flush(store, &mut batch, &mut stats, line_no).await?;
        }
    }

    flush(store, &mut batch, &mut stats, line_no).await?;
    Ok(stats)
}

async fn flush<S: RecordStore + ?Sized>(
    store: &S,
    batch: &mut Vec<DecodedEvent>,
    stats: &mut IngestStats,
    line: usize,
) -> Result<(), IngestError> {
    if batch.is_empty() {
        return Ok(());
    }

    let stored = handle_batch(store, batch.as_slice())
        .await
        .map_err(|source| IngestError::Index { line, source })?;

    stats.events += stored;
    stats.batches += 1;
    batch.clear();
    Ok(())
}
