//! Classification of stored photo references.
//!
//! Several historical storage conventions coexist in old rows:
//!
//! - canonical `<category-subdir>/<filename>` paths (the only form new
//!   code writes)
//! - bare filenames from the flat photo directory era
//! - relative paths from the upload-folder era (with or without a leading
//!   slash)
//! - comma-joined path lists from the single-column multi-photo era
//!
//! Raw binary image columns are a fifth convention, but those are a
//! separate nullable column rather than a string encoding and are handled
//! directly by the normalizer. Everything here is pure string inspection;
//! one classification feeds one canonicalization path in the normalizer,
//! so no other code ever sniffs formats ad hoc.

use serde::Serialize;

use crate::category::PhotoCategory;

/// A stored photo-reference string, tagged by storage convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PhotoRef {
    /// `<category-subdir>/<filename>`, relative to the asset root.
    Canonical(String),
    /// A filename with no directory component (legacy flat directory).
    BareFilename(String),
    /// Any other relative or slash-prefixed path (legacy upload folders).
    RelativePath(String),
    /// Comma-joined list of paths (legacy multi-photo column).
    PathList(Vec<String>),
}

/// Check whether `reference` is already in canonical form.
pub fn is_canonical(reference: &str) -> bool {
    PhotoCategory::SUBDIRS.iter().any(|subdir| {
        reference
            .strip_prefix(subdir)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|name| !name.is_empty())
    })
}

/// Build a canonical reference from a category and a file name.
pub fn canonical(category: PhotoCategory, filename: &str) -> String {
    format!("{}/{filename}", category.subdir())
}

/// Final path segment of a reference (the file name itself).
pub fn file_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Classify a raw stored reference into its storage convention.
pub fn classify(raw: &str) -> PhotoRef {
    if raw.contains(',') {
        let parts: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        return PhotoRef::PathList(parts);
    }
    if is_canonical(raw) {
        PhotoRef::Canonical(raw.to_string())
    } else if !raw.contains('/') {
        PhotoRef::BareFilename(raw.to_string())
    } else {
        PhotoRef::RelativePath(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_prefixes_recognised() {
        assert!(is_canonical("plants/abc123.jpg"));
        assert!(is_canonical("locations/abc123.png"));
        assert!(is_canonical("events/abc123.webp"));
        assert!(is_canonical("general/abc123.gif"));
    }

    #[test]
    fn non_canonical_shapes_rejected() {
        assert!(!is_canonical("abc123.jpg"));
        assert!(!is_canonical("photos/plants/abc123.jpg"));
        assert!(!is_canonical("/static/uploads/abc123.jpg"));
        assert!(!is_canonical("plants/"));
        assert!(!is_canonical("plantsabc.jpg"));
    }

    #[test]
    fn classify_canonical() {
        assert_eq!(
            classify("events/a.jpg"),
            PhotoRef::Canonical("events/a.jpg".to_string())
        );
    }

    #[test]
    fn classify_bare_filename() {
        assert_eq!(
            classify("a1b2c3.jpg"),
            PhotoRef::BareFilename("a1b2c3.jpg".to_string())
        );
    }

    #[test]
    fn classify_relative_path() {
        assert_eq!(
            classify("/static/uploads/rose_20240101.jpg"),
            PhotoRef::RelativePath("/static/uploads/rose_20240101.jpg".to_string())
        );
        assert_eq!(
            classify("photos/plants/rose.jpg"),
            PhotoRef::RelativePath("photos/plants/rose.jpg".to_string())
        );
    }

    #[test]
    fn classify_comma_joined_list() {
        assert_eq!(
            classify("a.jpg, photos/events/b.jpg,events/c.jpg"),
            PhotoRef::PathList(vec![
                "a.jpg".to_string(),
                "photos/events/b.jpg".to_string(),
                "events/c.jpg".to_string(),
            ])
        );
    }

    #[test]
    fn classify_list_drops_empty_segments() {
        assert_eq!(
            classify("a.jpg,,b.jpg,"),
            PhotoRef::PathList(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
    }

    #[test]
    fn canonical_builder_round_trips() {
        let reference = canonical(PhotoCategory::Plant, "abc.jpg");
        assert_eq!(reference, "plants/abc.jpg");
        assert!(is_canonical(&reference));
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("plants/abc.jpg"), "abc.jpg");
        assert_eq!(file_name("/static/uploads/x.png"), "x.png");
        assert_eq!(file_name("bare.gif"), "bare.gif");
    }
}
