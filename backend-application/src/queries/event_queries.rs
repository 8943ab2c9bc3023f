use tracing::debug;

use crate::access::actor_role;
use crate::dtos::{EventDetail, EventListing, EventScope, ListEventsRequest};
use crate::{AppError, AppState};
use backend_domain::{EventId, PageRequest, UserId};

pub async fn get_event(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
) -> Result<EventDetail, AppError> {
    let bundle = state
        .events
        .load_bundle(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
    let mut agenda = bundle.agenda;
    agenda.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.ends_at.cmp(&b.ends_at)));
    let total_registered = state.ledger.count_participants(event_id).await?;
    let role = actor_role(state, event_id, actor).await?;
    Ok(EventDetail {
        event: bundle.event,
        agenda,
        total_registered,
        role,
    })
}

pub async fn list_events(
    state: &AppState,
    actor: UserId,
    request: ListEventsRequest,
) -> Result<EventListing, AppError> {
    let search = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());
    debug!(actor = %actor, scope = ?request.scope, "listing events");

    match request.scope {
        EventScope::Managed => {
            let items = state.events.list_managed_events(actor, search).await?;
            Ok(EventListing {
                items,
                pagination: None,
            })
        }
        EventScope::Attended => {
            let page = page_request(request.page, request.page_size)?;
            let result = state
                .events
                .list_attended_events(actor, search, page)
                .await?;
            Ok(EventListing::paged(result, page.page, page.page_size))
        }
        EventScope::Discovery => {
            let page = page_request(request.page, request.page_size)?;
            let result = state
                .events
                .list_discovery_events(actor, search, page)
                .await?;
            Ok(EventListing::paged(result, page.page, page.page_size))
        }
    }
}

fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, AppError> {
    let page_size = page_size.unwrap_or(PageRequest::DEFAULT_PAGE_SIZE);
    if page_size == 0 || page_size > PageRequest::MAX_PAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "page_size must be between 1 and {}",
            PageRequest::MAX_PAGE_SIZE
        )));
    }
    Ok(PageRequest {
        page: page.unwrap_or(0),
        page_size,
    })
}
