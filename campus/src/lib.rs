//! Static portal content
//!
//! Everything the portal pages show that is not derived from a request: feature cards, dashboard
//! figures, campus map embeds. Records are plain literals without identity or lifecycle, the
//! pages render them as given.

pub mod dashboard;
pub mod home;
pub mod map;

/// Name the portal presents itself with
pub const PORTAL_NAME: &str = "SVIT Portal";

/// Subtitle shown next to the portal name
pub const PORTAL_TAGLINE: &str = "Student Dashboard";
