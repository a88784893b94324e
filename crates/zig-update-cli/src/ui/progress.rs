//! Download progress formatting.

/// Format bytes for human-readable display
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else if kb >= 1024.0 {
        format!("{mb:.1} MB")
    } else if kb >= 1.0 {
        format!("{kb:.1} KB")
    } else {
        format!("{bytes} B")
    }
}

/// Whole percent of `total` received so far, if the total is known.
pub fn percent(current: u64, total: Option<u64>) -> Option<u64> {
    let total = total.filter(|&t| t > 0)?;
    Some((current.min(total) * 100) / total)
}

/// One-line progress status, e.g. `45%  18.0 MB / 40.0 MB`.
///
/// Without a known total only the received size is shown.
pub fn format_progress(current: u64, total: Option<u64>) -> String {
    match (percent(current, total), total) {
        (Some(pct), Some(total)) => format!(
            "{pct:>3}%  {} / {}",
            format_size(current),
            format_size(total)
        ),
        _ => format_size(current),
    }
}
