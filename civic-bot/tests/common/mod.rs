//! Shared helpers for civic-bot integration tests.

#![allow(dead_code)]

pub mod mock_bot;

use std::io::Cursor;

use chrono::Utc;
use civic_core::{Chat, Message, MessageContent, User};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};

pub use mock_bot::{MockBot, SentRecord};

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: Some(username.to_string()),
        first_name: Some(username.to_string()),
        last_name: None,
    }
}

pub fn message(user: &User, content: MessageContent) -> Message {
    Message {
        id: format!("{}-{}", user.id, Utc::now().timestamp_nanos_opt().unwrap_or_default()),
        user: user.clone(),
        chat: Chat {
            id: user.id,
            chat_type: "private".to_string(),
        },
        content,
        created_at: Utc::now(),
    }
}

pub fn text(user: &User, text: &str) -> Message {
    message(user, MessageContent::Text(text.to_string()))
}

pub fn photo(user: &User, file_id: &str) -> Message {
    message(
        user,
        MessageContent::Photo {
            file_id: file_id.to_string(),
        },
    )
}

pub fn location(user: &User, latitude: f64, longitude: f64) -> Message {
    message(
        user,
        MessageContent::Location {
            latitude,
            longitude,
        },
    )
}

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn dms(d: u32, m: u32, s_hundredths: u32) -> Value {
    Value::Rational(vec![
        exif::Rational { num: d, denom: 1 },
        exif::Rational { num: m, denom: 1 },
        exif::Rational {
            num: s_hundredths,
            denom: 100,
        },
    ])
}

fn tiff(fields: &[Field]) -> Vec<u8> {
    let description = field(Tag::ImageDescription, ascii("civic test photo"));
    let mut writer = Writer::new();
    writer.push_field(&description);
    for f in fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write TIFF fixture");
    buf.into_inner()
}

/// Photo bytes tagged at 12.9716 N, 77.5946 E.
pub fn photo_with_gps() -> Vec<u8> {
    tiff(&[
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, dms(12, 58, 1776)),
        field(Tag::GPSLongitudeRef, ascii("E")),
        field(Tag::GPSLongitude, dms(77, 35, 4056)),
    ])
}

/// Photo bytes with metadata but no GPS tags.
pub fn photo_without_gps() -> Vec<u8> {
    tiff(&[])
}
