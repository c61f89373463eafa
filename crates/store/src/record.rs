use chrono::{DateTime, Utc};
use common::ReservationId;
use serde::{Deserialize, Serialize};

/// Collection that confirmed bookings are written to.
pub const RESERVATIONS_COLLECTION: &str = "reservations";

/// Stored form of a confirmed booking.
///
/// Keyed by its reservation id in [`RESERVATIONS_COLLECTION`]. Seats are kept
/// as their labels (`"A1"`) and the total in whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub movie: String,
    pub date: String,
    pub time: String,
    pub experience: String,
    pub seats: Vec<String>,
    pub total_price: u64,
    pub reservation_id: ReservationId,
    pub user_principal: String,
    pub timestamp: DateTime<Utc>,
}

impl SnapshotRecord {
    /// Returns the document key.
    pub fn key(&self) -> &str {
        self.reservation_id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = SnapshotRecord {
            movie: "Inception".to_string(),
            date: "2025-01-10".to_string(),
            time: "18:00".to_string(),
            experience: "IMAX".to_string(),
            seats: vec!["A1".to_string()],
            total_price: 3600,
            reservation_id: ReservationId::new("SC-ABC123-XYZ0").unwrap(),
            user_principal: "a@b.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 9, 10, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["totalPrice"], 3600);
        assert_eq!(json["reservationId"], "SC-ABC123-XYZ0");
        assert_eq!(json["userPrincipal"], "a@b.com");
        assert_eq!(json["seats"][0], "A1");
        assert_eq!(record.key(), "SC-ABC123-XYZ0");
    }
}
