//! Ticket confirmation built from a workflow that ran to completion.

use chrono::{TimeZone, Utc};
use common::{Principal, ReservationId};
use domain::{SeatMap, Showtime, WorkflowState};
use ticket::{
    PseudoQrRenderer, TicketConfirmation, TicketError, TicketPayload, TicketRenderer,
    generate_reservation_id, is_reservation_id_format,
};

fn completed_state(id: ReservationId) -> WorkflowState {
    let mut map = SeatMap::generate("IMAX", &[]);
    map.toggle("A1".parse().unwrap());
    map.toggle("A2".parse().unwrap());

    let mut state = WorkflowState::new();
    state
        .set_showtime(Showtime::new("Inception", "2025-01-10", "18:00", "IMAX"))
        .unwrap();
    state
        .set_selection(map.checkout_selection().unwrap())
        .unwrap();
    state
        .complete_reservation(
            id,
            Principal::from("a@b.com"),
            Utc.with_ymd_and_hms(2025, 1, 9, 10, 30, 0).unwrap(),
        )
        .unwrap();
    state
}

#[test]
fn confirmation_for_completed_booking() {
    let state = completed_state(ReservationId::new("SC-ABC123-XYZ0").unwrap());
    let renderer = PseudoQrRenderer::default();

    let ticket = TicketConfirmation::build(state.snapshot(), &renderer).unwrap();

    assert_eq!(
        ticket.payload,
        "STREAMLINE-CINEMA|SC-ABC123-XYZ0|Inception|2025-01-10|18:00|A1,A2"
    );
    assert_eq!(ticket.artifact, renderer.render(&ticket.payload));
    assert_eq!(
        ticket.formatted_date.as_deref(),
        Some("Friday, January 10, 2025")
    );
    assert_eq!(
        ticket.share_text,
        "I just booked tickets for Inception! 🎬\nDate: 2025-01-10\nTime: 18:00\nSeats: A1, A2"
    );
    assert_eq!(ticket.export.total_price, 7200);
    assert_eq!(ticket.export.user_email, "a@b.com");
    assert_eq!(ticket.export.seats, vec!["A1", "A2"]);
}

#[test]
fn payload_round_trips_through_verifier() {
    let id = generate_reservation_id().unwrap();
    assert!(is_reservation_id_format(id.as_str()));

    let state = completed_state(id.clone());
    let payload = TicketPayload::from_snapshot(state.snapshot()).unwrap();

    let verified = TicketPayload::parse(&payload.encode()).unwrap();
    assert_eq!(verified.reservation_id, id);
    assert_eq!(verified, payload);
}

#[test]
fn unconfirmed_snapshot_has_no_ticket() {
    let mut state = WorkflowState::new();
    state
        .set_showtime(Showtime::new("Inception", "2025-01-10", "18:00", "IMAX"))
        .unwrap();

    let result = TicketConfirmation::build(state.snapshot(), &PseudoQrRenderer::default());
    let err = result.unwrap_err();
    assert!(matches!(err, TicketError::NoBooking));
    assert_eq!(err.to_string(), "No booking found");
}
