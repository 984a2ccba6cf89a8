//! The page loop

use super::types::{NextPage, PaginationState, Paginator};
use crate::error::Result;
use crate::http::{ApiCall, Gateway};
use crate::record::RecordCollection;
use tracing::debug;

/// Fetch every page of a list call and concatenate the records
///
/// Records keep page-arrival order. Each request after the first carries
/// the token returned by the previous page; every other parameter of
/// `first` is sent unchanged. Errors from any page are returned as-is and
/// nothing collected before them escapes.
pub async fn collect_pages<G, P>(
    gateway: &G,
    first: ApiCall,
    paginator: &P,
) -> Result<RecordCollection>
where
    G: Gateway + ?Sized,
    P: Paginator + ?Sized,
{
    let mut state = PaginationState::new();
    let mut call = first;
    let mut records = Vec::new();

    loop {
        paginator.prepare(&mut call, &state);

        let body = gateway.execute(&call).await?;
        let outcome = paginator.process_response(body, &mut state)?;

        debug!(
            "Page {} of {}: {} records",
            state.pages,
            call.path(),
            outcome.records.len()
        );

        records.extend(outcome.records);

        if let NextPage::Done = outcome.next {
            break;
        }
    }

    debug!(
        "Fetched {} records in {} pages from {}",
        state.total_fetched,
        state.pages,
        call.path()
    );

    Ok(RecordCollection::from(records))
}
