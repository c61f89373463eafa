use domain::{Confirmation, ReservationSnapshot};
use store::SnapshotRecord;

/// Builds the stored record for `snapshot` confirmed by `confirmation`.
///
/// Seats are reduced to their labels.
pub fn snapshot_record(
    snapshot: &ReservationSnapshot,
    confirmation: &Confirmation,
) -> SnapshotRecord {
    SnapshotRecord {
        movie: snapshot.movie().to_string(),
        date: snapshot.date().to_string(),
        time: snapshot.time().to_string(),
        experience: snapshot.experience().to_string(),
        seats: snapshot.seat_ids().iter().map(ToString::to_string).collect(),
        total_price: snapshot.total_price().rupees(),
        reservation_id: confirmation.reservation_id.clone(),
        user_principal: confirmation.user_principal.email().to_string(),
        timestamp: confirmation.timestamp,
    }
}
