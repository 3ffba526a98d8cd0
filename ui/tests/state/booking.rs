use payloads::{
    ClientError, StatusCode,
    requests::{BookingDraft, SearchCriteria},
};
use test_helpers::{
    Call, Endpoint, MockApi, PROPERTY_SLUG, available_room_a,
    available_room_b,
};
use ui::{
    error::messages,
    state::{BookingState, SearchOutcome},
};

fn booking_state() -> (MockApi, BookingState<MockApi>) {
    test_helpers::init_test_logging();
    let api = MockApi::new();
    let state = BookingState::new(api.clone(), PROPERTY_SLUG);
    (api, state)
}

#[tokio::test]
async fn search_without_dates_never_reaches_the_api() {
    let (api, state) = booking_state();
    let criteria = SearchCriteria {
        check_in: None,
        check_out: Some(jiff::civil::date(2024, 6, 1)),
        ..SearchCriteria::default()
    };

    let err = state.search(criteria).await.unwrap_err();

    assert!(err.is_validation());
    assert!(api.calls().is_empty());
    assert_eq!(
        state.snapshot().error.as_deref(),
        Some("Por favor, selecione as datas de check-in e check-out")
    );
}

#[tokio::test]
async fn search_with_inverted_dates_is_rejected_locally() {
    let (api, state) = booking_state();
    let criteria = SearchCriteria::new(
        jiff::civil::date(2025, 1, 11),
        jiff::civil::date(2025, 1, 8),
    );

    assert!(state.search(criteria).await.is_err());
    assert_eq!(api.count(Endpoint::SearchAvailability), 0);
    assert!(state.snapshot().error.is_some());
}

#[tokio::test]
async fn successful_search_holds_exactly_the_returned_rooms() -> anyhow::Result<()>
{
    let (api, state) = booking_state();
    let rooms = vec![available_room_a(), available_room_b()];
    api.reply_search(Ok(test_helpers::availability(rooms.clone())));
    let criteria = test_helpers::search_criteria();

    let outcome = state.search(criteria.clone()).await?;

    assert_eq!(outcome, SearchOutcome::Applied);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.available_rooms, rooms);
    assert_eq!(snapshot.criteria, criteria);
    assert!(snapshot.has_searched);
    assert!(!snapshot.is_searching);
    assert_eq!(snapshot.error, None);

    let calls = api.calls_to(Endpoint::SearchAvailability);
    assert_eq!(
        calls,
        vec![Call::SearchAvailability {
            slug: PROPERTY_SLUG.into(),
            query: criteria.to_query().unwrap(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn previous_results_are_cleared_while_searching() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    state.search(test_helpers::search_criteria()).await?;
    state.select_room(Some(available_room_a()));

    api.reply_search(Ok(test_helpers::availability(vec![available_room_b()])));
    let gate = api.hold_next(Endpoint::SearchAvailability);
    let (result, ()) = tokio::join!(
        state.search(test_helpers::search_criteria()),
        async {
            let during = state.snapshot();
            assert!(during.available_rooms.is_empty());
            assert!(during.selected_room.is_none());
            assert!(during.is_searching);
            gate.send(()).unwrap();
        }
    );
    result?;

    assert_eq!(state.snapshot().available_rooms, vec![available_room_b()]);
    Ok(())
}

#[tokio::test]
async fn late_response_of_a_superseded_search_is_discarded() -> anyhow::Result<()>
{
    let (api, state) = booking_state();
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    api.reply_search(Ok(test_helpers::availability(vec![available_room_b()])));
    let gate = api.hold_next(Endpoint::SearchAvailability);

    let mut newer = test_helpers::search_criteria();
    newer.adults = 3;
    let (older, newer_result) = tokio::join!(
        state.search(test_helpers::search_criteria()),
        async {
            let result = state.search(newer.clone()).await;
            // the first search only answers after the second has finished
            gate.send(()).unwrap();
            result
        }
    );
    assert_eq!(older?, SearchOutcome::Superseded);
    assert_eq!(newer_result?, SearchOutcome::Applied);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.available_rooms, vec![available_room_b()]);
    assert_eq!(snapshot.criteria, newer);
    assert!(!snapshot.is_searching);
    assert_eq!(api.count(Endpoint::SearchAvailability), 2);
    Ok(())
}

#[tokio::test]
async fn failed_search_records_and_returns_the_error() {
    let (api, state) = booking_state();
    api.reply_search(Err(ClientError::api(
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("Propriedade sem quartos cadastrados"),
    )));

    let err = state.search(test_helpers::search_criteria()).await.unwrap_err();

    assert_eq!(err.to_string(), "Propriedade sem quartos cadastrados");
    let snapshot = state.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("Propriedade sem quartos cadastrados"));
    assert!(snapshot.available_rooms.is_empty());
    assert!(!snapshot.is_searching);
    assert!(!snapshot.has_searched);
}

#[tokio::test]
async fn property_is_loaded_and_failures_propagate() -> anyhow::Result<()> {
    let (api, state) = booking_state();

    let property = state.load_property(PROPERTY_SLUG).await?;
    assert_eq!(property, test_helpers::property_info());
    assert_eq!(state.snapshot().property, Some(property));
    assert!(!state.snapshot().is_loading_property);

    api.reply_property_info(Err(ClientError::api(StatusCode::NOT_FOUND, None)));
    let err = state.load_property("fechada").await.unwrap_err();
    assert_eq!(err.to_string(), messages::PROPERTY_LOAD);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.slug, "fechada");
    assert_eq!(snapshot.error.as_deref(), Some(messages::PROPERTY_LOAD));
    assert!(!snapshot.is_loading_property);
    assert_eq!(
        api.calls_to(Endpoint::PropertyInfo),
        vec![
            Call::GetPropertyInfo(PROPERTY_SLUG.into()),
            Call::GetPropertyInfo("fechada".into()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn searches_go_to_the_loaded_property() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    state.load_property("hotel-central").await?;

    state.search(test_helpers::search_criteria()).await?;

    match &api.calls_to(Endpoint::SearchAvailability)[..] {
        [Call::SearchAvailability { slug, .. }] => {
            assert_eq!(slug, "hotel-central")
        }
        calls => panic!("unexpected calls: {calls:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn submitted_booking_is_held() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    let criteria = test_helpers::search_criteria();
    state.search(criteria.clone()).await?;
    state.select_room(Some(available_room_a()));

    let draft = BookingDraft::for_room(
        PROPERTY_SLUG,
        &available_room_a(),
        &criteria.to_query().unwrap(),
        test_helpers::guest(),
    );
    api.reply_create_booking(Ok(test_helpers::booking_record(42)));

    let record = state.submit_booking(draft.clone()).await?;

    assert_eq!(record.reservation_number, "RES-00042");
    let snapshot = state.snapshot();
    assert!(snapshot.is_confirmed());
    assert!(!snapshot.is_submitting);
    assert_eq!(api.calls_to(Endpoint::CreateBooking), vec![Call::CreateBooking(draft)]);
    Ok(())
}

#[tokio::test]
async fn failed_booking_falls_back_to_generic_message() {
    let (api, state) = booking_state();
    api.reply_create_booking(Err(ClientError::api(
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )));
    let draft = BookingDraft::for_room(
        PROPERTY_SLUG,
        &available_room_a(),
        &test_helpers::search_criteria().to_query().unwrap(),
        test_helpers::guest(),
    );

    let err = state.submit_booking(draft).await.unwrap_err();

    assert_eq!(err.to_string(), messages::BOOKING);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some(messages::BOOKING));
    assert!(snapshot.booking.is_none());
    assert!(!snapshot.is_submitting);
}

#[tokio::test]
async fn reset_all_restores_the_defaults() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    let mut criteria = test_helpers::search_criteria();
    criteria.children = 2;
    state.search(criteria).await?;
    state.select_room(Some(available_room_a()));
    state
        .submit_booking(BookingDraft::for_room(
            PROPERTY_SLUG,
            &available_room_a(),
            &test_helpers::search_criteria().to_query().unwrap(),
            test_helpers::guest(),
        ))
        .await?;

    state.reset_search();
    let snapshot = state.snapshot();
    assert!(snapshot.available_rooms.is_empty());
    assert!(snapshot.selected_room.is_none());
    assert!(!snapshot.has_searched);
    assert!(snapshot.booking.is_some());
    assert_eq!(snapshot.criteria.children, 2);

    state.reset_all();
    let snapshot = state.snapshot();
    assert!(snapshot.booking.is_none());
    assert_eq!(snapshot.criteria, SearchCriteria::default());
    assert_eq!(snapshot.criteria.adults, 2);
    assert_eq!(snapshot.criteria.rooms, 1);
    assert_eq!(snapshot.slug, PROPERTY_SLUG);
    Ok(())
}

#[tokio::test]
async fn reset_abandons_a_search_in_flight() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    let gate = api.hold_next(Endpoint::SearchAvailability);

    let (result, ()) = tokio::join!(
        state.search(test_helpers::search_criteria()),
        async {
            state.reset_search();
            gate.send(()).unwrap();
        }
    );
    assert_eq!(result?, SearchOutcome::Superseded);

    let snapshot = state.snapshot();
    assert!(snapshot.available_rooms.is_empty());
    assert!(!snapshot.is_searching);
    assert!(!snapshot.has_searched);
    Ok(())
}

#[tokio::test]
async fn superseded_search_hides_its_own_failure() -> anyhow::Result<()> {
    let (api, state) = booking_state();
    api.reply_search(Err(ClientError::api(StatusCode::BAD_GATEWAY, None)));
    api.reply_search(Ok(test_helpers::availability(vec![available_room_a()])));
    let gate = api.hold_next(Endpoint::SearchAvailability);

    let (older, newer) = tokio::join!(
        state.search(test_helpers::search_criteria()),
        async {
            let result = state.search(test_helpers::search_criteria()).await;
            gate.send(()).unwrap();
            result
        }
    );

    assert_eq!(older?, SearchOutcome::Superseded);
    assert_eq!(newer?, SearchOutcome::Applied);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.available_rooms, vec![available_room_a()]);
    Ok(())
}
