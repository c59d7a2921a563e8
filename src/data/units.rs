//! Number formatting for table cells.

/// Suffixes for memory sizes, one per power of 1024.
pub const MEMORY_UNITS: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Suffixes for per-interval traffic, one per power of 1024.
pub const TRAFFIC_UNITS: [&str; 9] = ["B/s", "K/s", "M/s", "G/s", "T/s", "P/s", "E/s", "Z/s", "Y/s"];

/// Scale `size` down by 1024 until it drops below 1024 or the last unit is
/// reached, then format it with two decimals and the matching suffix.
pub fn human_readable(size: f64, units: &[&str]) -> String {
    let mut size = size;
    let mut i = 0;
    let last = units.len().saturating_sub(1);
    while size >= 1024.0 && i < last {
        size /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", size, units.get(i).copied().unwrap_or_default())
}

/// Format a byte count, e.g. `4096.0` → `"4.00K"`.
pub fn format_memory(size: f64) -> String {
    human_readable(size, &MEMORY_UNITS)
}

/// Format a byte-per-interval rate, e.g. `4096.0` → `"4.00K/s"`.
pub fn format_traffic(size: f64) -> String {
    human_readable(size, &TRAFFIC_UNITS)
}

/// Format with exactly two decimals and no suffix (load average, CPU %).
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}
