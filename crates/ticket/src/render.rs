//! Ticket artifact rendering.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::matrix::{MODULES, ModuleMatrix};

/// Default edge length of the rendered artifact.
pub const DEFAULT_SIZE: u32 = 200;

/// Logo overlaid on the centre of the artifact.
pub const LOGO_HREF: &str = "https://i.ibb.co/DfSWFbSF/favicon-96x96.png";

const LOGO_RATIO: f64 = 0.2;
const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Turns a ticket payload into a displayable artifact.
///
/// Implementations must be pure: the same payload always renders to the
/// same bytes.
pub trait TicketRenderer: Send + Sync {
    /// Renders `payload` as a data URI.
    fn render(&self, payload: &str) -> String;
}

/// Renders the pseudo-QR matrix as a base64 SVG data URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoQrRenderer {
    size: u32,
}

impl Default for PseudoQrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl PseudoQrRenderer {
    /// Creates a renderer producing `size` x `size` images.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Returns the edge length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Renders the SVG document for `payload`.
    pub fn render_svg(&self, payload: &str) -> String {
        let matrix = ModuleMatrix::from_payload(payload);
        let size = f64::from(self.size);
        let module = size / MODULES as f64;

        let mut svg = format!(
            r#"<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg"><rect width="{size}" height="{size}" fill="white"/>"#
        );

        for (row, column) in matrix.dark_modules() {
            let x = column as f64 * module;
            let y = row as f64 * module;
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{module}" height="{module}" fill="black"/>"#
            );
        }

        let logo = size * LOGO_RATIO;
        let offset = (size - logo) / 2.0;
        let _ = write!(
            svg,
            r#"<rect x="{offset}" y="{offset}" width="{logo}" height="{logo}" fill="white" stroke="black" stroke-width="2"/>"#
        );
        let _ = write!(
            svg,
            r#"<image href="{LOGO_HREF}" x="{offset}" y="{offset}" width="{logo}" height="{logo}"/>"#
        );
        svg.push_str("</svg>");
        svg
    }
}

impl TicketRenderer for PseudoQrRenderer {
    fn render(&self, payload: &str) -> String {
        let svg = self.render_svg(payload);
        format!("{DATA_URI_PREFIX}{}", STANDARD.encode(svg))
    }
}
