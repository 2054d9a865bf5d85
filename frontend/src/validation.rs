//! Client-side file checks run before any upload.
//!
//! Only the file name and byte size are inspected; the archive itself is
//! never opened in the browser.

use crate::config::ALLOWED_EXTENSIONS;
use crate::types::{WidgetError, WidgetResult};

/// Validate a candidate upload.
///
/// The size limit is checked first, so an oversized file is reported as
/// too large whatever its name.
pub fn validate_file(name: &str, size: u64, max_size: u64) -> WidgetResult<()> {
    if size > max_size {
        return Err(WidgetError::FileTooLarge { size, limit: max_size });
    }
    if !has_allowed_extension(name) {
        return Err(WidgetError::UnsupportedFormat);
    }
    Ok(())
}

/// Whether the last extension, or the last two dot-separated segments,
/// appear in [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    let segments: Vec<&str> = lower.split('.').collect();
    if segments.len() < 2 {
        return false;
    }

    let single = segments[segments.len() - 1];
    let double = segments[segments.len() - 2..].join(".");

    ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| *allowed == single || *allowed == double)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FILE_SIZE;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_archives() {
        for name in ["a.zip", "b.TAR", "c.tar.gz", "d.Tar.Bz2", "e.rar", "f.7z", "g.gz"] {
            assert!(validate_file(name, 10, MAX_FILE_SIZE).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_other_formats() {
        assert_eq!(validate_file("notes.txt", 10, MAX_FILE_SIZE), Err(WidgetError::UnsupportedFormat));
        assert_eq!(validate_file("zip", 10, MAX_FILE_SIZE), Err(WidgetError::UnsupportedFormat));
        assert_eq!(validate_file("archive.zip.txt", 10, MAX_FILE_SIZE), Err(WidgetError::UnsupportedFormat));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_file("data.zip", MAX_FILE_SIZE, MAX_FILE_SIZE).is_ok());
        assert_eq!(
            validate_file("data.zip", MAX_FILE_SIZE + 1, MAX_FILE_SIZE),
            Err(WidgetError::FileTooLarge {
                size: MAX_FILE_SIZE + 1,
                limit: MAX_FILE_SIZE
            })
        );
    }

    #[test]
    fn test_two_gigabyte_zip_is_too_large() {
        let size = 2 * 1024 * 1024 * 1024;
        assert!(matches!(
            validate_file("data.zip", size, MAX_FILE_SIZE),
            Err(WidgetError::FileTooLarge { .. })
        ));
    }

    fn allowed_extension() -> impl Strategy<Value = String> {
        prop::sample::select(ALLOWED_EXTENSIONS.to_vec()).prop_map(str::to_string)
    }

    fn random_case(s: &str, mask: &[bool]) -> String {
        s.chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_allowed_extension_passes(
            stem in "[a-zA-Z0-9_ -]{1,20}",
            ext in allowed_extension(),
            mask in prop::collection::vec(any::<bool>(), 1..8),
            size in 0..=MAX_FILE_SIZE,
        ) {
            let name = format!("{}.{}", stem, random_case(&ext, &mask));
            prop_assert!(validate_file(&name, size, MAX_FILE_SIZE).is_ok());
        }

        #[test]
        fn prop_unknown_extension_fails(
            stem in "[a-z0-9_]{1,20}",
            ext in "[a-z]{1,5}",
            size in 0..=MAX_FILE_SIZE,
        ) {
            prop_assume!(!ALLOWED_EXTENSIONS.contains(&ext.as_str()));
            let name = format!("{}.{}", stem, ext);
            prop_assert_eq!(validate_file(&name, size, MAX_FILE_SIZE), Err(WidgetError::UnsupportedFormat));
        }

        #[test]
        fn prop_oversized_fails_regardless_of_name(
            name in ".{0,30}",
            excess in 1u64..=u32::MAX as u64,
        ) {
            let size = MAX_FILE_SIZE + excess;
            prop_assert_eq!(validate_file(&name, size, MAX_FILE_SIZE), Err(WidgetError::FileTooLarge { size, limit: MAX_FILE_SIZE }));
        }
    }
}
