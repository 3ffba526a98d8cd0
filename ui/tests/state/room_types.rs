use payloads::{
    ClientError, PropertyId, RoomTypeId, StatusCode,
    requests::{RoomTypeFilters, RoomTypeQuery},
};
use test_helpers::{Call, Endpoint, MockApi, room_type, room_type_page};
use ui::{
    contexts::toast::{ToastHandle, Variant},
    error::messages,
    state::{Pagination, RoomTypesState},
};

fn room_types()
-> (MockApi, ToastHandle, RoomTypesState<MockApi, ToastHandle>) {
    test_helpers::init_test_logging();
    let api = MockApi::new();
    let toasts = ToastHandle::new();
    let state = RoomTypesState::new(api.clone(), toasts.clone(), 10);
    (api, toasts, state)
}

fn last_query(api: &MockApi) -> RoomTypeQuery {
    match api.calls_to(Endpoint::RoomTypes).pop() {
        Some(Call::GetRoomTypes(query)) => query,
        other => panic!("expected a room type listing call, got {other:?}"),
    }
}

fn bookable_only() -> RoomTypeFilters {
    RoomTypeFilters {
        is_bookable: Some(true),
        ..RoomTypeFilters::default()
    }
}

#[tokio::test]
async fn load_holds_the_page_with_pagination_and_stats() {
    let (api, _, state) = room_types();
    api.reply_room_types(Ok(room_type_page(
        vec![
            room_type(1, 2, true),
            room_type(2, 4, false),
            room_type(3, 3, true),
        ],
        13,
        1,
        10,
    )));

    state.load().await;

    let snapshot = state.snapshot();
    assert_eq!(snapshot.room_types.len(), 3);
    assert_eq!(
        snapshot.pagination,
        Some(Pagination {
            total: 13,
            page: 1,
            pages: 2,
            per_page: 10,
        })
    );
    let stats = snapshot.stats.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.bookable, 2);
    assert_eq!(stats.average_capacity, 3.0);
    assert!(!snapshot.is_loading);
    assert_eq!(last_query(&api), RoomTypeQuery::new(1, 10, &RoomTypeFilters::default()));
}

#[tokio::test]
async fn changing_filters_goes_back_to_the_first_page() {
    let (api, _, state) = room_types();
    state.set_page(3);
    state.load().await;
    assert_eq!(last_query(&api).page, 3);

    state.set_filters(bookable_only());
    assert!(state.reload_if_changed().await);

    let query = last_query(&api);
    assert_eq!(query.page, 1);
    assert_eq!(query.per_page, 10);
    assert_eq!(query.is_bookable, Some(true));
}

#[tokio::test]
async fn changing_page_keeps_size_and_filters() {
    let (api, _, state) = room_types();
    state.set_filters(bookable_only());
    state.set_per_page(25);

    state.set_page(2);
    state.reload_if_changed().await;

    assert_eq!(last_query(&api), RoomTypeQuery::new(2, 25, &bookable_only()));
    let snapshot = state.snapshot();
    assert_eq!(snapshot.filters, bookable_only());
    assert_eq!(snapshot.per_page, 25);
}

#[tokio::test]
async fn changing_page_size_goes_back_to_the_first_page() {
    let (api, _, state) = room_types();
    state.set_page(4);

    state.set_per_page(50);
    state.reload_if_changed().await;

    let query = last_query(&api);
    assert_eq!(query.page, 1);
    assert_eq!(query.per_page, 50);
}

#[tokio::test]
async fn unchanged_listing_is_not_reloaded() {
    let (api, _, state) = room_types();
    assert!(state.reload_if_changed().await);
    assert!(!state.reload_if_changed().await);

    // same filters set again still go back to page one, which is unchanged
    state.set_filters(RoomTypeFilters::default());
    assert!(!state.reload_if_changed().await);
    assert_eq!(api.count(Endpoint::RoomTypes), 1);

    state.set_page(2);
    assert!(state.reload_if_changed().await);
    assert_eq!(api.count(Endpoint::RoomTypes), 2);
}

#[tokio::test]
async fn blank_search_is_not_sent() {
    let (api, _, state) = room_types();
    state.set_filters(RoomTypeFilters {
        search: Some("   ".into()),
        property_id: Some(PropertyId(2)),
        ..RoomTypeFilters::default()
    });

    state.load().await;

    let query = last_query(&api);
    assert_eq!(query.search, None);
    assert_eq!(query.property_id, Some(PropertyId(2)));
}

#[tokio::test]
async fn failed_load_clears_the_listing() {
    let (api, _, state) = room_types();
    api.reply_room_types(Ok(room_type_page(vec![room_type(1, 2, true)], 1, 1, 10)));
    state.load().await;
    assert!(state.snapshot().pagination.is_some());

    api.reply_room_types(Err(ClientError::api(
        StatusCode::NOT_FOUND,
        Some("Not found"),
    )));
    state.set_page(2);
    state.load().await;

    let snapshot = state.snapshot();
    assert!(snapshot.room_types.is_empty());
    assert_eq!(snapshot.pagination, None);
    assert_eq!(snapshot.stats, None);
    assert_eq!(snapshot.error.as_deref(), Some("Not found"));
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn failed_load_without_detail_uses_the_fallback() {
    let (api, _, state) = room_types();
    api.reply_room_types(Err(ClientError::api(StatusCode::BAD_GATEWAY, None)));

    state.load().await;

    assert_eq!(
        state.snapshot().error.as_deref(),
        Some(messages::ROOM_TYPES_LOAD)
    );
}

#[tokio::test]
async fn stale_page_is_discarded() {
    let (api, _, state) = room_types();
    api.reply_room_types(Ok(room_type_page(vec![room_type(1, 2, true)], 11, 1, 10)));
    api.reply_room_types(Ok(room_type_page(vec![room_type(11, 2, true)], 11, 2, 10)));
    let gate = api.hold_next(Endpoint::RoomTypes);

    tokio::join!(state.load(), async {
        state.set_page(2);
        state.load().await;
        gate.send(()).unwrap();
    });

    let snapshot = state.snapshot();
    assert_eq!(snapshot.room_types, vec![room_type(11, 2, true)]);
    assert_eq!(snapshot.pagination.unwrap().page, 2);
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn toggle_notifies_and_reloads() -> anyhow::Result<()> {
    let (api, toasts, state) = room_types();
    api.reply_toggle_bookable(Ok(room_type(4, 3, false)));

    let room_type = state.toggle_bookable(RoomTypeId(4)).await?;

    assert!(!room_type.is_bookable);
    assert_eq!(
        api.calls(),
        vec![
            Call::ToggleRoomTypeBookable(RoomTypeId(4)),
            Call::GetRoomTypes(RoomTypeQuery::new(
                1,
                10,
                &RoomTypeFilters::default()
            )),
        ]
    );
    let notifications = toasts.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].variant, Variant::Success);
    assert_eq!(
        notifications[0].description,
        "Tipo 4 não está mais disponível para reserva"
    );
    Ok(())
}

#[tokio::test]
async fn failed_toggle_does_not_reload() {
    let (api, toasts, state) = room_types();
    api.reply_toggle_bookable(Err(ClientError::api(
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )));

    let err = state.toggle_bookable(RoomTypeId(4)).await.unwrap_err();

    assert_eq!(err.to_string(), messages::TOGGLE_BOOKABLE);
    assert_eq!(api.count(Endpoint::RoomTypes), 0);
    assert_eq!(toasts.notifications()[0].variant, Variant::Destructive);
}

#[tokio::test]
async fn delete_notifies_and_reloads_the_same_page() -> anyhow::Result<()> {
    let (api, toasts, state) = room_types();
    state.set_filters(bookable_only());
    state.set_page(2);

    state.delete(RoomTypeId(9)).await?;

    assert_eq!(
        api.calls_to(Endpoint::DeleteRoomType),
        vec![Call::DeleteRoomType(RoomTypeId(9))]
    );
    assert_eq!(last_query(&api), RoomTypeQuery::new(2, 10, &bookable_only()));
    assert_eq!(
        toasts.notifications()[0].description,
        "Tipo de quarto excluído com sucesso"
    );
    Ok(())
}

#[tokio::test]
async fn failed_delete_surfaces_the_detail() {
    let (api, toasts, state) = room_types();
    api.reply_delete_room_type(Err(ClientError::api(
        StatusCode::CONFLICT,
        Some("Tipo de quarto possui quartos vinculados"),
    )));

    let err = state.delete(RoomTypeId(9)).await.unwrap_err();

    assert_eq!(err.to_string(), "Tipo de quarto possui quartos vinculados");
    assert_eq!(api.count(Endpoint::RoomTypes), 0);
    let notifications = toasts.notifications();
    assert_eq!(notifications[0].variant, Variant::Destructive);
    assert_eq!(
        notifications[0].description,
        "Tipo de quarto possui quartos vinculados"
    );
}
