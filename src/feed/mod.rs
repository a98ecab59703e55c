//! Paginated ledger feed reader
//!
//! Walks an account's transaction history page by page, newest first,
//! handing each page's cursor to the next request until the ledger
//! reports no more history. Strictly sequential: a request is only issued
//! once the previous page (and its cursor) has arrived.
//!
//! A failed page aborts the whole scan. A partial history would understate
//! every total derived from it, so there is no retry and no partial result.

pub mod rpc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::FeedError;
use crate::types::{Cursor, FeedPage, LedgerTransaction};

pub use rpc::RpcLedgerClient;

/// Source of transaction pages (allows mocking in tests)
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    /// Fetch one page of history for `account`, resuming after `cursor` when given
    async fn fetch_page(
        &self,
        account: &str,
        limit: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FeedPage, FeedError>;
}

pub struct PaginatedFeedReader<'a, F: TransactionFeed + ?Sized> {
    feed: &'a F,
    page_size: u32,
}

impl<'a, F: TransactionFeed + ?Sized> PaginatedFeedReader<'a, F> {
    pub fn new(feed: &'a F, page_size: u32) -> Self {
        Self {
            feed,
            page_size: page_size.max(1),
        }
    }

    /// Read the feed to exhaustion and return every transaction in page order.
    ///
    /// Stops when the ledger returns no entries at all, or on a page without a
    /// continuation cursor (that page's transactions are still included). A
    /// page whose entries were all unusable still follows its cursor.
    pub async fn scan_all(&self, account: &str) -> Result<Vec<LedgerTransaction>, FeedError> {
        info!("📜 Scanning transaction history for {}", account);

        let mut all = Vec::new();
        let mut cursor: Option<Cursor> = None;
        let mut pages = 0u32;

        loop {
            let page = self
                .feed
                .fetch_page(account, self.page_size, cursor.as_ref())
                .await?;
            pages += 1;

            if page.received == 0 {
                debug!("Page {} empty, history exhausted", pages);
                break;
            }

            debug!(
                "Page {}: {} of {} entries usable (running total {})",
                pages,
                page.transactions.len(),
                page.received,
                all.len() + page.transactions.len()
            );
            all.extend(page.transactions);

            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!("✅ Scan complete: {} transactions over {} pages", all.len(), pages);
        Ok(all)
    }
}
