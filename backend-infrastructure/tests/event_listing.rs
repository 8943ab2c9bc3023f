mod common;

use serde_json::json;

use backend_application::commands::{create_event, resolve_checkin};
use backend_application::dtos::{EventScope, ListEventsRequest, ResolveCheckinRequest};
use backend_application::queries::list_events;
use backend_application::AppError;
use backend_domain::{EventId, StaffRole};
use common::{harness, payload, seed_user, Harness};

fn request(scope: EventScope, search: Option<&str>, page: u32, page_size: u32) -> ListEventsRequest {
    ListEventsRequest {
        scope,
        search: search.map(str::to_string),
        page: Some(page),
        page_size: Some(page_size),
    }
}

async fn seed_events(h: &Harness, owner: backend_domain::UserId, names: &[&str]) -> Vec<EventId> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let mut input = payload("all", json!([]));
        input.name = name.to_string();
        ids.push(create_event(&h.state, owner, input).await.expect("create").event_id);
    }
    ids
}

async fn check_in(h: &Harness, owner: backend_domain::UserId, event_id: EventId, ref_id: u64) {
    resolve_checkin(
        &h.state,
        owner,
        event_id,
        ResolveCheckinRequest {
            attendee_ref_id: ref_id,
            org_code: 21,
            latitude: 13.7,
            longitude: 100.5,
        },
    )
    .await
    .expect("resolve");
}

#[tokio::test]
async fn attended_events_are_paged() {
    let h = harness();
    let owner = seed_user(&h.state, 1).await.id;
    let visitor = seed_user(&h.state, 2).await.id;
    let ids = seed_events(&h, owner, &["A", "B", "C", "D"]).await;
    for id in &ids[..3] {
        check_in(&h, owner, *id, 2).await;
    }

    let first = list_events(&h.state, visitor, request(EventScope::Attended, None, 0, 2))
        .await
        .expect("first page");
    assert_eq!(first.items.len(), 2);
    let pagination = first.pagination.expect("paged");
    assert_eq!(pagination.total, 3);
    assert!(pagination.has_next);

    let second = list_events(&h.state, visitor, request(EventScope::Attended, None, 1, 2))
        .await
        .expect("second page");
    assert_eq!(second.items.len(), 1);
    assert!(!second.pagination.expect("paged").has_next);
    assert!(second.items.iter().all(|item| item.id != ids[3]));
}

#[tokio::test]
async fn discovery_hides_staffed_and_attended_events() {
    let h = harness();
    let owner = seed_user(&h.state, 1).await.id;
    let visitor = seed_user(&h.state, 2).await.id;
    let ids = seed_events(&h, owner, &["Orientation", "Career Fair", "Hackathon"]).await;
    check_in(&h, owner, ids[0], 2).await;

    let listing = list_events(&h.state, visitor, request(EventScope::Discovery, None, 0, 10))
        .await
        .expect("discovery");
    let mut found: Vec<EventId> = listing.items.iter().map(|item| item.id).collect();
    found.sort();
    let mut expected = vec![ids[1], ids[2]];
    expected.sort();
    assert_eq!(found, expected);

    let searched = list_events(
        &h.state,
        visitor,
        request(EventScope::Discovery, Some("career"), 0, 10),
    )
    .await
    .expect("search");
    assert_eq!(searched.items.len(), 1);
    assert_eq!(searched.items[0].id, ids[1]);

    let owner_view = list_events(&h.state, owner, request(EventScope::Discovery, None, 0, 10))
        .await
        .expect("owner discovery");
    assert!(owner_view.items.is_empty());
}

#[tokio::test]
async fn managed_events_carry_the_role() {
    let h = harness();
    let owner = seed_user(&h.state, 1).await.id;
    let visitor = seed_user(&h.state, 2).await.id;
    seed_events(&h, owner, &["Orientation", "Career Fair"]).await;

    let listing = list_events(&h.state, owner, request(EventScope::Managed, Some("fair"), 0, 1))
        .await
        .expect("managed");
    assert!(listing.pagination.is_none());
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].role, Some(StaffRole::Owner));

    let by_role = list_events(&h.state, owner, request(EventScope::Managed, Some("owner"), 0, 1))
        .await
        .expect("managed by role");
    assert_eq!(by_role.items.len(), 2);

    let none = list_events(&h.state, visitor, request(EventScope::Managed, None, 0, 1))
        .await
        .expect("visitor managed");
    assert!(none.items.is_empty());
}

#[tokio::test]
async fn page_size_is_bounded() {
    let h = harness();
    let visitor = seed_user(&h.state, 2).await.id;
    let zero = list_events(&h.state, visitor, request(EventScope::Attended, None, 0, 0)).await;
    assert!(matches!(zero, Err(AppError::BadRequest(_))));
    let huge = list_events(&h.state, visitor, request(EventScope::Discovery, None, 0, 500)).await;
    assert!(matches!(huge, Err(AppError::BadRequest(_))));
}
