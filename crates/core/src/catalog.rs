//! Report catalog listings
//!
//! Walks `hasMore` pagination to collect full listings. Used by the listing
//! commands; the sync pipeline never pages.

use reportsync_domain::{Category, Page, PageRequest, Report, Result};
use tracing::debug;

use crate::ports::ReportingClient;

/// Page size used when walking listings.
pub const LISTING_PAGE_SIZE: u32 = 200;

/// Fetch every report category.
pub async fn all_categories(client: &dyn ReportingClient) -> Result<Vec<Category>> {
    collect_pages(|page| client.list_categories(page)).await
}

/// Fetch every report in a category.
pub async fn all_reports(client: &dyn ReportingClient, category_id: &str) -> Result<Vec<Report>> {
    collect_pages(|page| client.list_reports(category_id, page)).await
}

async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: std::future::Future<Output = Result<Page<T>>>,
{
    let mut request = PageRequest::new(1, LISTING_PAGE_SIZE);
    let mut items = Vec::new();

    loop {
        let page = fetch(request).await?;
        debug!(page = request.page, count = page.items.len(), has_more = page.has_more, "Fetched listing page");
        items.extend(page.items);

        if !page.has_more {
            return Ok(items);
        }
        request = request.next();
    }
}
