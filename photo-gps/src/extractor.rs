//! Reads GPS latitude/longitude from image metadata.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use exif::{In, Tag, Value};
use tracing::{debug, warn};

use crate::coordinate::{to_decimal_degrees, Coordinates, Hemisphere, Rational};
use crate::error::GpsError;

/// Opens `path` and returns its embedded GPS position.
///
/// `Ok(None)` means the image carries no usable GPS data, including images without any EXIF
/// block and files kamadak-exif cannot parse. Only I/O failures are errors.
pub fn extract_gps(path: &Path) -> Result<Option<Coordinates>, GpsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let coordinates = extract_gps_from_reader(&mut reader)?;
    debug!(path = %path.display(), found = coordinates.is_some(), "GPS extraction finished");
    Ok(coordinates)
}

/// Same as [`extract_gps`] for an already opened container (JPEG, TIFF, PNG, HEIF, WebP).
pub fn extract_gps_from_reader<R: BufRead + Seek>(
    reader: &mut R,
) -> Result<Option<Coordinates>, GpsError> {
    let exif = match exif::Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        Err(exif::Error::Io(e)) => return Err(GpsError::Io(e)),
        Err(e) => {
            debug!(error = %e, "No readable EXIF data");
            return Ok(None);
        }
    };

    let latitude = read_coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
    let longitude = read_coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);

    match (latitude, longitude) {
        (Ok(Some(latitude)), Ok(Some(longitude))) => Ok(Some(Coordinates {
            latitude,
            longitude,
        })),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Ignoring malformed GPS tags");
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Decodes one coordinate tag and its reference tag; `Ok(None)` when either is absent.
fn read_coordinate(exif: &exif::Exif, value_tag: Tag, ref_tag: Tag) -> Result<Option<f64>, GpsError> {
    let Some(ref_field) = exif.get_field(ref_tag, In::PRIMARY) else {
        return Ok(None);
    };
    let Some(value_field) = exif.get_field(value_tag, In::PRIMARY) else {
        return Ok(None);
    };

    let hemisphere: Hemisphere = match &ref_field.value {
        Value::Ascii(parts) => {
            let letter = parts
                .first()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default();
            letter.parse()?
        }
        _ => ref_field.display_value().to_string().parse()?,
    };

    let dms: Vec<Rational> = match &value_field.value {
        Value::Rational(values) => values.iter().map(Rational::from).collect(),
        Value::SRational(values) => values.iter().map(Rational::from).collect(),
        _ => return Ok(None),
    };

    to_decimal_degrees(&dms, hemisphere).map(Some)
}
