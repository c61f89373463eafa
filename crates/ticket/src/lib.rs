//! Ticket artifacts for confirmed bookings.
//!
//! This crate covers everything derived from a confirmed snapshot:
//! - [`generate_reservation_id`] for short, time-sortable booking ids
//! - [`TicketPayload`], the canonical pipe-delimited ticket string and its parser
//! - [`ModuleMatrix`] and [`PseudoQrRenderer`], which project a payload onto a
//!   25x25 QR-like grid and serialize it as an SVG data URI
//! - [`TicketConfirmation`] and [`TicketExport`] for the confirmation view
//!
//! The rendered artifact is not a standard QR code. Standard decoders will
//! not read it; verifiers parse the payload string instead.

pub mod confirmation;
pub mod error;
pub mod export;
pub mod id;
pub mod matrix;
pub mod payload;
pub mod render;

pub use confirmation::TicketConfirmation;
pub use error::{Result, TicketError};
pub use export::{SHARE_TITLE, TicketExport, long_date, share_text};
pub use id::{
    RESERVATION_ID_PREFIX, generate_reservation_id, generate_reservation_id_with,
    is_reservation_id_format, to_base36,
};
pub use matrix::{FINDER_SIZE, MODULES, ModuleMatrix};
pub use payload::{TicketPayload, VENUE_TAG};
pub use render::{DEFAULT_SIZE, LOGO_HREF, PseudoQrRenderer, TicketRenderer};
