//! GPS coordinates from photo metadata.
//!
//! ## Modules
//!
//! - [`coordinate`] – degrees/minutes/seconds rationals to signed decimal degrees
//! - [`extractor`] – reads GPS tags from an image file via kamadak-exif
//! - [`error`] – GpsError

mod coordinate;
mod error;
mod extractor;

pub use coordinate::{to_decimal_degrees, Coordinates, Hemisphere, Rational};
pub use error::GpsError;
pub use extractor::{extract_gps, extract_gps_from_reader};
