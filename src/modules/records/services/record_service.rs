use std::sync::Arc;

use tracing::debug;

use crate::core::{AppError, ListFilter, ListQuery, Listing, PaginationRequest, Result};
use crate::modules::records::models::LedgerRecord;
use crate::modules::records::repositories::RecordRepository;

/// Listing and scoped lookup for one record kind
pub struct RecordService<R: LedgerRecord> {
    repo: Arc<dyn RecordRepository<R>>,
    max_page_size: i64,
}

impl<R: LedgerRecord> RecordService<R> {
    pub fn new(repo: Arc<dyn RecordRepository<R>>, max_page_size: i64) -> Self {
        Self {
            repo,
            max_page_size,
        }
    }

    /// Resolve the request shape from raw query parameters and list
    pub async fn list(&self, business_id: i64, query: &ListQuery) -> Result<Listing<R>> {
        let filter = query.filter()?;
        let request = query.into_request(self.max_page_size)?;
        self.list_with(business_id, filter, request).await
    }

    /// List with an already resolved strategy
    pub async fn list_with(
        &self,
        business_id: i64,
        filter: ListFilter,
        request: PaginationRequest,
    ) -> Result<Listing<R>> {
        let listing = match request {
            PaginationRequest::Keyset { limit, after } => {
                let rows = self
                    .repo
                    .fetch_after(business_id, filter, after, limit)
                    .await?;
                Listing::page(rows, limit)
            }
            PaginationRequest::Offset { limit, offset } => {
                // count and window are independent reads
                let (total, rows) = tokio::try_join!(
                    self.repo.count(business_id, filter),
                    self.repo.fetch_window(business_id, filter, limit, offset),
                )?;
                Listing::Counted { rows, total }
            }
            PaginationRequest::Unbounded => {
                Listing::All(self.repo.fetch_all(business_id, filter).await?)
            }
        };

        debug!(
            kind = %R::KIND,
            business_id,
            mode = request.mode(),
            rows = listing.rows().len(),
            "Listed records"
        );

        Ok(listing)
    }

    /// Fetch one record owned by `business_id`
    pub async fn get(&self, business_id: i64, id: i64) -> Result<R> {
        self.repo
            .find_by_id(business_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} record {}", R::KIND, id)))
    }

    /// Delete one record owned by `business_id`
    pub async fn delete(&self, business_id: i64, id: i64) -> Result<()> {
        if self.repo.delete(business_id, id).await? {
            debug!(kind = %R::KIND, business_id, id, "Deleted record");
            Ok(())
        } else {
            Err(AppError::not_found(format!("{} record {}", R::KIND, id)))
        }
    }
}

// Listing behavior over a store is covered in tests/integration/keyset_pagination_test.rs
