//! Catalog ingestion
//!
//! Pulls the first N entries out of the remote catalog and loads them
//! into the local store. Fetches run concurrently; the load itself is a
//! single transaction that drops and rebuilds the tables, so readers
//! either see the previous catalog or the new one, never a partial mix.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::pokeapi::{EntryRef, PokeApiClient};
use crate::pokemon::Pokemon;
use crate::storage::PokedexStore;
use crate::ui;
use crate::Result;

/// Concurrent detail fetches kept in flight
pub const DEFAULT_CONCURRENCY: usize = 8;

/// One ingestion run against a client and a store
pub struct IngestJob<'a> {
    client: &'a PokeApiClient,
    concurrency: usize,
}

/// Counters from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub requested: usize,
    pub fetched: usize,
    pub failed: usize,
    pub stored: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl<'a> IngestJob<'a> {
    pub fn new(client: &'a PokeApiClient) -> Self {
        Self {
            client,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run a full ingestion: list the index, fetch every referenced
    /// entry, then replace the store's contents with what arrived.
    ///
    /// A failed index call aborts the run. A failed detail fetch only
    /// loses that entry; the rest still load.
    pub async fn run(&self, store: &mut PokedexStore, limit: u32) -> Result<IngestReport> {
        let started = Instant::now();

        let refs = self.client.list(limit).await?;
        let requested = refs.len();

        let entries = self.fetch_all(refs).await;
        let fetched = entries.len();
        let failed = requested - fetched;

        store.begin_transaction()?;
        let (stored, skipped) = match apply(store, &entries) {
            Ok(counts) => {
                store.commit()?;
                counts
            }
            Err(err) => {
                store.rollback()?;
                return Err(err);
            }
        };

        Ok(IngestReport {
            requested,
            fetched,
            failed,
            stored,
            skipped,
            elapsed: started.elapsed(),
        })
    }

    /// Fetch every referenced entry with bounded concurrency.
    /// Results come back in completion order and are re-sorted by id.
    async fn fetch_all(&self, refs: Vec<EntryRef>) -> Vec<Pokemon> {
        let client = self.client;
        let bar = ui::progress::fetch_bar(refs.len() as u64);

        let fetches = refs.into_iter().map(|entry| {
            let bar = bar.clone();
            async move {
                let outcome = client.fetch(&entry.url).await;
                bar.inc(1);
                (entry, outcome)
            }
        });
        let outcomes: Vec<(EntryRef, Result<Pokemon>)> = stream::iter(fetches)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        bar.finish_and_clear();

        let mut entries = Vec::with_capacity(outcomes.len());
        for (entry, outcome) in outcomes {
            match outcome {
                Ok(pokemon) => entries.push(pokemon),
                Err(err) => warn!("Failed to fetch {}: {}", entry.name, err),
            }
        }
        entries.sort_by_key(|pokemon| pokemon.id);
        entries
    }
}

/// Replace the store's contents with `entries`. Runs inside the
/// caller's transaction; a malformed entry is skipped, not fatal.
fn apply(store: &mut PokedexStore, entries: &[Pokemon]) -> Result<(usize, usize)> {
    store.reset_tables()?;

    let mut stored = 0;
    let mut skipped = 0;
    for entry in entries {
        match store.upsert_entry(entry) {
            Ok(()) => stored += 1,
            Err(err) => {
                warn!("Skipping {} (id {}): {}", entry.name, entry.id, err);
                skipped += 1;
            }
        }
    }
    Ok((stored, skipped))
}

impl std::fmt::Display for IngestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fetched {}/{} entries ({} failed), stored {} ({} skipped) in {:.1}s",
            self.fetched,
            self.requested,
            self.failed,
            self.stored,
            self.skipped,
            self.elapsed.as_secs_f64()
        )
    }
}
