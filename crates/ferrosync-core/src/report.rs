//! Human readable comparison report

use crate::result::ComparisonResult;
use ferrosync_types::Result;
use std::fmt;
use std::path::PathBuf;

const DELIMITER_LEN: usize = 15;
const SECTION_END: char = '-';

/// Text rendering of a [`ComparisonResult`].
///
/// Three sections are printed, each opened by a line of its own delimiter
/// character and closed by dashes. Entries are listed relative to their root.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    result: &'a ComparisonResult,
}

struct Section {
    delimiter: char,
    title: &'static str,
    paths: Vec<PathBuf>,
}

impl<'a> Report<'a> {
    /// Prepare a report over `result`
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self { result }
    }

    /// Render to a string, failing if an entry does not sit below its root
    pub fn render(&self) -> Result<String> {
        let sections = [
            Section {
                delimiter: 'x',
                title: "Hashes different",
                paths: self.result.paired_relative()?,
            },
            Section {
                delimiter: '[',
                title: "Extra in left",
                paths: self.result.left_only_relative()?,
            },
            Section {
                delimiter: ']',
                title: "Extra in right",
                paths: self.result.right_only_relative()?,
            },
        ];

        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, &sections);
        Ok(out)
    }

    fn write_to(&self, out: &mut impl fmt::Write, sections: &[Section]) -> fmt::Result {
        writeln!(out, "Left directory: \"{}\"", self.result.left().root().display())?;
        writeln!(out, "Right directory: \"{}\"", self.result.right().root().display())?;
        writeln!(out)?;
        writeln!(out, "Comparison report:")?;
        writeln!(out)?;

        for section in sections {
            writeln!(out, "{}", repeat(section.delimiter))?;
            writeln!(out, "{}: ({})", section.title, section.paths.len())?;
            for path in &section.paths {
                writeln!(out, "- {}", path.display())?;
            }
            writeln!(out, "{}", repeat(SECTION_END))?;
            writeln!(out)?;
        }
        Ok(())
    }
}

fn repeat(c: char) -> String {
    std::iter::repeat(c).take(DELIMITER_LEN).collect()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::result::PairedDifference;
    use ferrosync_types::{EntryKind, Side};

    #[test]
    fn test_empty_report() {
        let result = ComparisonResult::new("/l".into(), "/r".into());
        let expected = "Left directory: \"/l\"\n\
                        Right directory: \"/r\"\n\
                        \n\
                        Comparison report:\n\
                        \n\
                        xxxxxxxxxxxxxxx\n\
                        Hashes different: (0)\n\
                        ---------------\n\
                        \n\
                        [[[[[[[[[[[[[[[\n\
                        Extra in left: (0)\n\
                        ---------------\n\
                        \n\
                        ]]]]]]]]]]]]]]]\n\
                        Extra in right: (0)\n\
                        ---------------\n\
                        \n";
        assert_eq!(Report::new(&result).render().unwrap(), expected);
    }

    #[test]
    fn test_report_lists_relative_paths() {
        let mut result = ComparisonResult::new("/l".into(), "/r".into());
        result.push_paired(PairedDifference::new(
            Entry::new("/l/b.txt", EntryKind::File),
            Entry::new("/r/b.txt", EntryKind::File),
        ));
        result.push_only(Side::Left, Entry::new("/l/a.txt", EntryKind::File));
        result.push_only(Side::Left, Entry::new("/l/sub/z", EntryKind::Directory));
        result.push_only(Side::Right, Entry::new("/r/c.txt", EntryKind::File));

        let text = Report::new(&result).to_string();
        assert!(text.contains("Hashes different: (1)\n- b.txt\n---------------\n"));
        assert!(text.contains("Extra in left: (2)\n- a.txt\n- sub/z\n---------------\n"));
        assert!(text.contains("Extra in right: (1)\n- c.txt\n---------------\n"));
    }

    #[test]
    fn test_entry_outside_root_fails() {
        let mut result = ComparisonResult::new("/l".into(), "/r".into());
        result.push_only(Side::Left, Entry::new("/elsewhere/a", EntryKind::File));
        assert!(Report::new(&result).render().is_err());
    }
}
