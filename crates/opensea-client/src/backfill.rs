// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Cursor-driven event backfill
//!
//! [`EventBackfill`] walks the events endpoint page by page across a time
//! window. Backward runs (`start` later than `until`) anchor every request at
//! `occurred_before = start` and follow the `next` cursor until a page reaches
//! back to `until`. Forward runs (`start` earlier than `until`) let the server
//! bound the window with `occurred_after`/`occurred_before` and follow the
//! cursor until it runs out.
//!
//! Network hiccups are common over long runs, so transient failures are
//! retried on a fixed interval without advancing the cursor. Anything else
//! ends the run.
//!
//! ```no_run
//! # async fn run() -> Result<(), opensea_client::OpenseaError> {
//! use opensea_client::{EventsQuery, OpenseaClient, OpenseaConfig, time::datetime_utc};
//!
//! let client = OpenseaClient::new(OpenseaConfig::default().api_key("key")?)?;
//! let mut backfill = client.events_backfill(
//!     datetime_utc(2021, 10, 2, 0, 0)?,
//!     datetime_utc(2021, 10, 1, 0, 0)?,
//!     EventsQuery::default().with_collection_slug("cryptopunks"),
//! )?;
//!
//! while let Some(page) = backfill.next_page().await? {
//!     println!("{} events", page.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tokio_retry::{RetryIf, strategy::FixedInterval};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    client::OpenseaClient,
    config::BackfillOptions,
    error::{OpenseaError, OpenseaResult},
    query::{EventsQuery, ListQuery},
    types::EventsPage,
};

/// Direction a backfill walks through time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillDirection {
    /// From a recent point back toward an older one
    Backward,
    /// Across a window from its older edge toward its newer edge
    Forward,
}

impl fmt::Display for BackfillDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backward => write!(f, "backward"),
            Self::Forward => write!(f, "forward"),
        }
    }
}

/// Stateful pager over the events endpoint
#[derive(Debug)]
pub struct EventBackfill<'a> {
    client: &'a OpenseaClient,
    filter: EventsQuery,
    start: DateTime<Utc>,
    until: DateTime<Utc>,
    direction: BackfillDirection,
    options: BackfillOptions,
    cursor: Option<String>,
    pages_fetched: u64,
    events_fetched: u64,
    finished: bool,
    run_id: Uuid,
}

impl<'a> EventBackfill<'a> {
    pub(crate) fn new(
        client: &'a OpenseaClient,
        start: DateTime<Utc>,
        until: DateTime<Utc>,
        filter: EventsQuery,
        options: BackfillOptions,
    ) -> OpenseaResult<Self> {
        if start == until {
            return Err(OpenseaError::invalid_parameter(
                "until",
                "must differ from start",
            ));
        }
        if filter.occurred_before.is_some() || filter.occurred_after.is_some() {
            return Err(OpenseaError::invalid_parameter(
                "occurred_before",
                "the backfill window is set by start and until",
            ));
        }
        if filter.cursor.is_some() {
            return Err(OpenseaError::invalid_parameter(
                "cursor",
                "the backfill manages its own cursor",
            ));
        }
        filter.validate()?;

        let direction = if start > until {
            BackfillDirection::Backward
        } else {
            BackfillDirection::Forward
        };

        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            %direction,
            %start,
            %until,
            "starting events backfill"
        );

        Ok(Self {
            client,
            filter,
            start,
            until,
            direction,
            options,
            cursor: None,
            pages_fetched: 0,
            events_fetched: 0,
            finished: false,
            run_id,
        })
    }

    /// Direction of this run
    pub fn direction(&self) -> BackfillDirection {
        self.direction
    }

    /// Whether the run has ended (exhausted, boundary reached, or failed)
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cursor the next request will send
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Pages returned so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Events returned so far
    pub fn events_fetched(&self) -> u64 {
        self.events_fetched
    }

    /// Correlation id attached to this run's log records
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fetch the next page
    ///
    /// Returns `Ok(None)` once the run is finished. After an error the run is
    /// finished as well.
    ///
    /// # Errors
    ///
    /// Returns the last error if a transient failure outlasts the retry
    /// budget, or the first non-transient error
    pub async fn next_page(&mut self) -> OpenseaResult<Option<EventsPage>> {
        if self.finished {
            return Ok(None);
        }

        if self.pages_fetched > 0 {
            let pause = self.options.page_interval();
            if !pause.is_zero() {
                sleep(pause).await;
            }
        }

        let query = self.page_query();
        let span = info_span!(
            "events_backfill",
            run_id = %self.run_id,
            page = self.pages_fetched + 1
        );

        let page = match self.fetch_with_retry(&query).instrument(span).await {
            Ok(page) => page,
            Err(err) => {
                self.finished = true;
                error!(run_id = %self.run_id, error = %err, "events backfill aborted");
                return Err(err);
            }
        };

        self.pages_fetched += 1;
        self.events_fetched += page.len() as u64;
        self.advance(&page);

        info!(
            run_id = %self.run_id,
            page = self.pages_fetched,
            events = page.len(),
            oldest = ?page.oldest_event_time(),
            finished = self.finished,
            "fetched events page"
        );

        Ok(Some(page))
    }

    /// Drain the run into a list of pages
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run; pages fetched before it are dropped
    pub async fn collect_all(mut self) -> OpenseaResult<Vec<EventsPage>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }

    fn page_query(&self) -> EventsQuery {
        let mut query = self.filter.clone();
        match self.direction {
            BackfillDirection::Backward => {
                query.occurred_before = Some(self.start);
            }
            BackfillDirection::Forward => {
                query.occurred_after = Some(self.start);
                query.occurred_before = Some(self.until);
            }
        }
        query.cursor.clone_from(&self.cursor);
        query
    }

    async fn fetch_with_retry(&self, query: &EventsQuery) -> OpenseaResult<EventsPage> {
        let retries = usize::try_from(self.options.max_retries).unwrap_or(usize::MAX);
        let strategy = FixedInterval::new(self.options.retry_interval()).take(retries);
        let client = self.client;

        RetryIf::spawn(
            strategy,
            || client.events_page(query),
            |err: &OpenseaError| {
                let transient = err.is_transient();
                if transient {
                    warn!(error = %err, "transient failure while backfilling events, retrying");
                }
                transient
            },
        )
        .await
    }

    fn advance(&mut self, page: &EventsPage) {
        let boundary_reached = match self.direction {
            BackfillDirection::Backward => page
                .oldest_event_time()
                .is_some_and(|oldest| oldest <= self.until),
            BackfillDirection::Forward => false,
        };

        let next = match &page.next {
            Some(next) if self.cursor.as_ref() == Some(next) => {
                warn!(cursor = %next, "events cursor did not advance, stopping backfill");
                None
            }
            next => next.clone(),
        };

        match next {
            Some(next) if !page.is_empty() && !boundary_reached => {
                debug!(cursor = %next, "advancing events cursor");
                self.cursor = Some(next);
            }
            _ => {
                self.finished = true;
                self.cursor = None;
            }
        }
    }
}
