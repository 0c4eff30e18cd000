//! Decide what to do with each manifest entry.

use crate::error::{Error, Result};

/// Second-to-last dot segment marking a template.
pub const TEMPLATE_MARKER: &str = "tpl";

/// Suffix cut from template names to derive the output name.
pub const TEMPLATE_SUFFIX: &str = ".tpl.ipynb";

/// Paths containing this are left out of Daytum output.
pub const DATASETS_MARKER: &str = "datasets";

/// What happens to a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Run through the exporter and write a finished notebook.
    Template,
    /// Copy verbatim.
    Copy,
    /// Ignore.
    Skip,
}

/// Classify `path`.
///
/// Fails if the path has fewer than two dot-delimited segments.
pub fn classify(path: &str, daytum: bool) -> Result<FileKind> {
    let mut segments = path.rsplit('.');
    let _last = segments.next();
    let Some(second_last) = segments.next() else {
        return Err(Error::Unclassifiable(path.to_string()));
    };

    if second_last == TEMPLATE_MARKER {
        Ok(FileKind::Template)
    } else if daytum && path.contains(DATASETS_MARKER) {
        Ok(FileKind::Skip)
    } else {
        Ok(FileKind::Copy)
    }
}

/// Output name for a template: everything before the first `.tpl.ipynb`,
/// plus `.ipynb`. Directory components are kept.
///
/// # Examples
///
/// ```
/// use rise_convert::classify::output_name;
///
/// assert_eq!(output_name("slide.tpl.ipynb"), "slide.ipynb");
/// assert_eq!(output_name("lectures/intro.tpl.ipynb"), "lectures/intro.ipynb");
/// ```
pub fn output_name(template: &str) -> String {
    format!("{}.ipynb", output_stem(template))
}

/// Everything before the first `.tpl.ipynb`, or the whole path if absent.
pub fn output_stem(template: &str) -> &str {
    match template.find(TEMPLATE_SUFFIX) {
        Some(idx) => &template[..idx],
        None => template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_template() {
        assert_eq!(classify("slide.tpl.ipynb", false).unwrap(), FileKind::Template);
        assert_eq!(classify("slide.tpl.ipynb", true).unwrap(), FileKind::Template);
    }

    #[test]
    fn test_template_marker_only_checks_second_last_segment() {
        assert_eq!(classify("notes.tpl.md", false).unwrap(), FileKind::Template);
        assert_eq!(classify("tpl.ipynb", false).unwrap(), FileKind::Template);
        assert_eq!(classify("slide.ipynb", false).unwrap(), FileKind::Copy);
    }

    #[test]
    fn test_datasets_skipped_only_in_daytum_mode() {
        assert_eq!(classify("data/datasets/foo.csv", true).unwrap(), FileKind::Skip);
        assert_eq!(classify("data/datasets/foo.csv", false).unwrap(), FileKind::Copy);
        assert_eq!(classify("my_datasets_list.txt", true).unwrap(), FileKind::Skip);
    }

    #[test]
    fn test_template_wins_over_datasets() {
        assert_eq!(
            classify("datasets/slide.tpl.ipynb", true).unwrap(),
            FileKind::Template
        );
    }

    #[test]
    fn test_no_extension_is_an_error() {
        assert!(matches!(classify("Makefile", false), Err(Error::Unclassifiable(_))));
        assert!(matches!(classify("", false), Err(Error::Unclassifiable(_))));
        // Checked before the datasets rule.
        assert!(matches!(classify("datasets", true), Err(Error::Unclassifiable(_))));
    }

    #[test]
    fn test_output_name_cuts_at_first_marker() {
        assert_eq!(output_name("a.tpl.ipynb.tpl.ipynb"), "a.ipynb");
        assert_eq!(output_name("notes.tpl.md"), "notes.tpl.md.ipynb");
        assert_eq!(output_stem("deck/intro.tpl.ipynb"), "deck/intro");
    }

    proptest! {
        #[test]
        fn prop_template_output_name(stem in "[a-z0-9_/]{1,20}") {
            let path = format!("{stem}.tpl.ipynb");
            prop_assert_eq!(classify(&path, false).unwrap(), FileKind::Template);
            prop_assert_eq!(output_name(&path), format!("{stem}.ipynb"));
        }

        #[test]
        fn prop_plain_files_copied_outside_daytum(
            stem in "[a-z0-9_/]{1,20}",
            ext in "(txt|csv|png|py|ipynb)",
        ) {
            prop_assume!(stem != TEMPLATE_MARKER);
            let path = format!("{stem}.{ext}");
            prop_assert_eq!(classify(&path, false).unwrap(), FileKind::Copy);
        }
    }
}
