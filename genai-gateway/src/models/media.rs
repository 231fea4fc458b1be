//! Media kinds accepted by the upload routes and their MIME allow-lists.

use std::fmt;

const IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp", "image/gif"];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "text/markdown",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const AUDIO_TYPES: &[&str] = &[
    "audio/webm",
    "audio/wav",
    "audio/mpeg",
    "audio/mp4",
    "audio/ogg",
    "audio/opus",
];

/// Kind of file an upload route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Document,
    Audio,
}

impl MediaKind {
    /// Multipart field that carries the file.
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Document => "document",
            MediaKind::Audio => "audio",
        }
    }

    /// Route name used in logs and metrics.
    pub fn route_name(self) -> &'static str {
        match self {
            MediaKind::Image => "generate-image",
            MediaKind::Document => "generate-from-document",
            MediaKind::Audio => "generate-from-audio",
        }
    }

    pub fn allowed_mime_types(self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => IMAGE_TYPES,
            MediaKind::Document => DOCUMENT_TYPES,
            MediaKind::Audio => AUDIO_TYPES,
        }
    }

    /// `mime_type` must already be in essence form (see [`mime_essence`]).
    pub fn allows(self, mime_type: &str) -> bool {
        self.allowed_mime_types().contains(&mime_type)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Image => "Image",
            MediaKind::Document => "Document",
            MediaKind::Audio => "Audio",
        };
        f.write_str(label)
    }
}

/// `type/subtype` without parameters, lowercased: `Audio/WebM; codecs=opus`
/// becomes `audio/webm`.
pub fn mime_essence(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
