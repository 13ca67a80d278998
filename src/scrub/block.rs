use crate::header::BlockHeader;
use crate::markup::is_self_closing_tag;

use super::MalformedBlock;

/// Rewrite one change-block: the `@@` header line plus its body.
///
/// Returns the empty vector when the block carries no change beyond
/// markup-tag reordering; such a block is omitted entirely, header
/// included. An unparseable header records a [`MalformedBlock`] and the
/// block passes through unmodified.
pub(crate) fn rewrite_block(lines: &[&str], malformed: &mut Vec<MalformedBlock>) -> Vec<String> {
    let Some((&header_line, body)) = lines.split_first() else {
        return Vec::new();
    };

    let Some(header) = BlockHeader::parse(header_line) else {
        malformed.push(MalformedBlock {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        });
        return lines.iter().map(|line| line.to_string()).collect();
    };

    let mut kept = Vec::with_capacity(body.len());
    let mut dropped_removals = 0u32;
    let mut dropped_additions = 0u32;
    let mut has_real_change = false;

    for &line in body {
        if let Some(content) = line.strip_prefix('-') {
            if is_self_closing_tag(content.trim_start()) {
                dropped_removals += 1;
            } else {
                kept.push(line.to_string());
                has_real_change = true;
            }
        } else if let Some(content) = line.strip_prefix('+') {
            if is_self_closing_tag(content.trim_start()) {
                dropped_additions += 1;
            } else {
                kept.push(line.to_string());
                has_real_change = true;
            }
        } else {
            kept.push(line.to_string());
        }
    }

    if !has_real_change {
        return Vec::new();
    }

    // A dropped removal still occupies its position on the new side; a
    // dropped addition no longer does. The old-side fields never move.
    // Saturate so a header lying about its own counts cannot wrap.
    let new_count = header
        .new_count
        .saturating_add(dropped_removals)
        .saturating_sub(dropped_additions);

    let rebuilt_header = if new_count == header.new_count {
        // Counters unchanged: keep the original line, trailing section
        // text included.
        header_line.to_string()
    } else {
        header.with_new_count(new_count).to_string()
    };

    let mut output = Vec::with_capacity(kept.len() + 1);
    output.push(rebuilt_header);
    output.extend(kept);
    output
}
