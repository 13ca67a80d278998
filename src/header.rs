//! Parsing and rendering of change-block headers.
//!
//! A change-block inside a hunk opens with a header line carrying four
//! counters describing the old-side and new-side line ranges:
//!
//! ```text
//! @@ -<old_start>,<old_count> +<new_start>,<new_count> @@ optional section text
//! ```
//!
//! Both signs and both commas are required; git's short forms such as
//! `@@ -15 +14,0 @@` do not parse here, which routes the block into the
//! fail-open path. Text after the closing `@@` is ignored by the parser.
//!
//! # Examples
//!
//! ```
//! use patch_scrub::header::BlockHeader;
//!
//! let header = BlockHeader::parse("@@ -10,5 +10,6 @@ fn main()").unwrap();
//! assert_eq!(header.old_start, 10);
//! assert_eq!(header.old_count, 5);
//! assert_eq!(header.new_start, 10);
//! assert_eq!(header.new_count, 6);
//! assert_eq!(header.to_string(), "@@ -10,5 +10,6 @@");
//!
//! assert!(BlockHeader::parse("@@ bogus @@").is_none());
//! ```

use nom::IResult;
use nom::Parser;
use nom::bytes::complete::tag;
use nom::character::complete::{space1, u32 as number};
use std::fmt;

/// The four counters from a `@@ -a,b +c,d @@` block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// First line of the old-side range
    pub old_start: u32,
    /// Number of old-side lines the block covers
    pub old_count: u32,
    /// First line of the new-side range
    pub new_start: u32,
    /// Number of new-side lines the block covers
    pub new_count: u32,
}

impl BlockHeader {
    /// Parse a block-header line.
    ///
    /// Returns `None` on any deviation from the four-field pattern:
    /// missing sign, missing comma, non-numeric field, extra fields.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match block_header(line) {
            Ok((_, header)) => Some(header),
            Err(_) => None,
        }
    }

    /// Copy of this header with a different new-side count.
    #[must_use]
    pub fn with_new_count(self, new_count: u32) -> Self {
        Self { new_count, ..self }
    }
}

fn block_header(input: &str) -> IResult<&str, BlockHeader> {
    let (input, _) = tag("@@").parse(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-").parse(input)?;
    let (input, old_start) = number(input)?;
    let (input, _) = tag(",").parse(input)?;
    let (input, old_count) = number(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("+").parse(input)?;
    let (input, new_start) = number(input)?;
    let (input, _) = tag(",").parse(input)?;
    let (input, new_count) = number(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("@@").parse(input)?;

    Ok((
        input,
        BlockHeader {
            old_start,
            old_count,
            new_start,
            new_count,
        },
    ))
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}
