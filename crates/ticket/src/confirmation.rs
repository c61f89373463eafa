//! Confirmation view of a completed booking.

use domain::ReservationSnapshot;
use serde::Serialize;

use crate::export::{TicketExport, long_date, share_text};
use crate::payload::TicketPayload;
use crate::render::TicketRenderer;
use crate::{Result, TicketError};

/// Everything the confirmation view shows for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketConfirmation {
    pub reservation_id: String,
    /// Canonical payload encoded into the artifact.
    pub payload: String,
    /// Data URI of the rendered artifact.
    pub artifact: String,
    /// Long-form screening date, when the date parses.
    pub formatted_date: Option<String>,
    pub share_text: String,
    pub export: TicketExport,
}

impl TicketConfirmation {
    /// Builds the confirmation for a completed snapshot.
    ///
    /// Fails with [`TicketError::NoBooking`] until the snapshot carries a
    /// reservation id.
    #[tracing::instrument(skip_all)]
    pub fn build(
        snapshot: &ReservationSnapshot,
        renderer: &dyn TicketRenderer,
    ) -> Result<Self> {
        if !snapshot.is_confirmed() {
            tracing::warn!("ticket requested without a confirmed booking");
            return Err(TicketError::NoBooking);
        }

        let payload = TicketPayload::from_snapshot(snapshot)?.encode();
        let artifact = renderer.render(&payload);
        metrics::counter!("ticket_artifacts_rendered_total").increment(1);

        let export = TicketExport::from_snapshot(snapshot)?;
        tracing::info!(reservation_id = %export.reservation_id, "ticket rendered");

        Ok(Self {
            reservation_id: export.reservation_id.clone(),
            payload,
            artifact,
            formatted_date: long_date(snapshot.date()),
            share_text: share_text(snapshot),
            export,
        })
    }
}
