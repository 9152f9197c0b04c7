//! Subcommand implementations

pub mod config;
pub mod push;
pub mod reports;
pub mod version;

/// Render rows as a plain-text table with a header rule.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let longest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(longest);
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);

    for row in rows {
        // Multi-line cells spill onto extra lines within the same row
        let height = row.iter().map(|cell| cell.lines().count().max(1)).max().unwrap_or(1);
        for line in 0..height {
            push_line(&mut out, row.iter().map(|cell| cell.lines().nth(line).unwrap_or("")), &widths);
        }
    }

    out
}

fn push_line<I, S>(out: &mut String, cells: I, widths: &[usize])
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
