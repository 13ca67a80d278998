//! The three-level patch rewriter: document → hunks → change-blocks.
//!
//! All levels share one scan-and-flush routine ([`transform_segments`]):
//! lines accumulate into the current segment, each segment is flushed
//! through a transform when the next marker (or the end of input) is
//! reached, and anything seen before the first marker passes through
//! untouched. The document level keys on `diff --git` and terminates at
//! the mail-signature footer; the hunk level keys on `@@ `.

use std::fmt;

mod block;
mod hunk;

/// Opens a hunk: one per changed file.
const FILE_HEADER_MARKER: &str = "diff --git";
/// Closes all hunks: the signature separator `git format-patch` appends.
/// Everything from this line on passes through unchanged.
const FOOTER_MARKER: &str = "-- ";
/// Opens a change-block within a hunk.
const BLOCK_HEADER_MARKER: &str = "@@ ";

/// Result of scrubbing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubOutcome {
    /// The rewritten document.
    pub text: String,
    /// Change-blocks whose header did not parse; each was passed through
    /// unmodified.
    pub malformed: Vec<MalformedBlock>,
}

/// A change-block whose `@@` header failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedBlock {
    /// The block's lines, header first, exactly as found.
    pub lines: Vec<String>,
}

impl fmt::Display for MalformedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unparseable change-block header, block left unmodified: {:?}",
            self.lines
        )
    }
}

/// Rewrite a unified diff, dropping paired additions and removals of
/// self-closing markup elements and keeping block counters consistent.
///
/// Pure text to text: no I/O, no failure. Blocks whose header cannot be
/// parsed pass through unmodified and are reported in
/// [`ScrubOutcome::malformed`]. Line endings are normalized to `\n`.
#[must_use]
pub fn scrub_patch(input: &str) -> ScrubOutcome {
    let lines = split_lines(input);
    let mut malformed = Vec::new();

    let output = transform_segments(
        &lines,
        |line| line.starts_with(FILE_HEADER_MARKER),
        |line| line.starts_with(FOOTER_MARKER),
        |segment| hunk::rewrite_hunk(segment, &mut malformed),
    );

    ScrubOutcome {
        text: output.join("\n"),
        malformed,
    }
}

/// Scan `lines`, accumulating segments and flushing each through
/// `transform`.
///
/// A line matching `opens` flushes the current segment and starts a new
/// one seeded with that line. A line matching `closes` flushes the
/// current segment and then passes through itself, leaving no segment
/// open. Any other line passes through while no segment is open and
/// accumulates otherwise. The final segment is flushed at end of input.
fn transform_segments(
    lines: &[&str],
    opens: impl Fn(&str) -> bool,
    closes: impl Fn(&str) -> bool,
    mut transform: impl FnMut(&[&str]) -> Vec<String>,
) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut segment: Vec<&str> = Vec::new();

    for &line in lines {
        if opens(line) {
            output.extend(transform(&segment));
            segment.clear();
            segment.push(line);
        } else if closes(line) {
            output.extend(transform(&segment));
            segment.clear();
            output.push(line.to_string());
        } else if segment.is_empty() {
            output.push(line.to_string());
        } else {
            segment.push(line);
        }
    }

    output.extend(transform(&segment));
    output
}

/// Split into lines on `\n`, `\r\n`, or a lone `\r`, keeping a final
/// empty segment so a trailing terminator survives the `join("\n")`.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn split_keeps_trailing_terminator() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn split_without_trailing_terminator() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn split_handles_mixed_endings() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_empty_input() {
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn passes_through_document_without_markers() {
        let input = "hello\nworld\n";
        let outcome = scrub_patch(input);
        assert_eq!(outcome.text, input);
        assert!(outcome.malformed.is_empty());
    }

    #[test]
    fn normalizes_line_endings() {
        let outcome = scrub_patch("alpha\r\nbeta\rgamma\n");
        assert_eq!(outcome.text, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn drops_noise_only_block() {
        let input = concat!(
            "diff --git a/scene.xml b/scene.xml\n",
            "index 1111111..2222222 100644\n",
            "--- a/scene.xml\n",
            "+++ b/scene.xml\n",
            "@@ -10,5 +10,5 @@\n",
            " <group>\n",
            "-  <alpha/>\n",
            "+  <alpha/>\n",
            " </group>",
        );
        let outcome = scrub_patch(input);
        assert_eq!(
            outcome.text,
            concat!(
                "diff --git a/scene.xml b/scene.xml\n",
                "index 1111111..2222222 100644\n",
                "--- a/scene.xml\n",
                "+++ b/scene.xml",
            )
        );
        assert!(outcome.malformed.is_empty());
    }

    #[test]
    fn preserves_preamble_and_footer() {
        let input = concat!(
            "From: somebody\n",
            "Subject: reorder cleanup\n",
            "\n",
            "diff --git a/scene.xml b/scene.xml\n",
            "--- a/scene.xml\n",
            "+++ b/scene.xml\n",
            "@@ -1,2 +1,3 @@\n",
            " <root>\n",
            "+  <child attr=\"1\">\n",
            "-- \n",
            "2.43.0\n",
        );
        let outcome = scrub_patch(input);
        assert_eq!(outcome.text, input);
        assert!(outcome.malformed.is_empty());
    }

    #[test]
    fn records_malformed_block_and_passes_it_through() {
        let input = concat!(
            "diff --git a/scene.xml b/scene.xml\n",
            "--- a/scene.xml\n",
            "+++ b/scene.xml\n",
            "@@ bogus @@\n",
            "-  <alpha/>\n",
            "+  <alpha/>",
        );
        let outcome = scrub_patch(input);
        assert_eq!(outcome.text, input);
        assert_eq!(outcome.malformed.len(), 1);
        assert_eq!(
            outcome.malformed[0].lines,
            vec!["@@ bogus @@", "-  <alpha/>", "+  <alpha/>"]
        );
    }

    #[test]
    fn malformed_block_display_lists_lines() {
        let block = MalformedBlock {
            lines: vec!["@@ bogus @@".to_string(), "-x".to_string()],
        };
        let message = block.to_string();
        assert!(message.contains("unparseable change-block header"));
        assert!(message.contains("@@ bogus @@"));
    }

    #[test]
    fn rewrites_blocks_across_multiple_hunks() {
        let input = concat!(
            "diff --git a/a.xml b/a.xml\n",
            "--- a/a.xml\n",
            "+++ b/a.xml\n",
            "@@ -1,3 +1,3 @@\n",
            " keep\n",
            "-  <n/>\n",
            "+  <n/>\n",
            "diff --git a/b.xml b/b.xml\n",
            "--- a/b.xml\n",
            "+++ b/b.xml\n",
            "@@ -4,2 +4,3 @@\n",
            " tail\n",
            "+added\n",
        );
        let outcome = scrub_patch(input);
        assert_eq!(
            outcome.text,
            concat!(
                "diff --git a/a.xml b/a.xml\n",
                "--- a/a.xml\n",
                "+++ b/a.xml\n",
                "diff --git a/b.xml b/b.xml\n",
                "--- a/b.xml\n",
                "+++ b/b.xml\n",
                "@@ -4,2 +4,3 @@\n",
                " tail\n",
                "+added\n",
            )
        );
    }

    #[test]
    fn scrub_example_document() {
        let input = concat!(
            "diff --git a/scene.xml b/scene.xml\n",
            "index 1111111..2222222 100644\n",
            "--- a/scene.xml\n",
            "+++ b/scene.xml\n",
            "@@ -10,5 +10,5 @@\n",
            " <group>\n",
            "-  <alpha/>\n",
            "+  <alpha/>\n",
            " </group>\n",
            "@@ -20,4 +20,5 @@\n",
            " <group>\n",
            "-  <beta/>\n",
            "+  <gamma/>\n",
            "+  <beta/>\n",
            " </group>\n",
        );
        let outcome = scrub_patch(input);
        insta::assert_snapshot!(outcome.text, @r"
        diff --git a/scene.xml b/scene.xml
        index 1111111..2222222 100644
        --- a/scene.xml
        +++ b/scene.xml
        @@ -20,4 +20,5 @@
         <group>
        +  <gamma/>
         </group>
        ");
    }
}
