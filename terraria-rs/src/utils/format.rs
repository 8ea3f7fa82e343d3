//! Formatting utilities

use chrono::DateTime;
use humansize::{DECIMAL, format_size};

/// .NET ticks per second.
const TICKS_PER_SECOND: i64 = 10_000_000;
/// .NET ticks at 1970-01-01.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;
/// The top two bits of a serialized .NET date hold its kind.
const TICKS_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a world creation time, stored as a serialized .NET date
pub fn format_creation_time(binary: u64) -> String {
    if binary == 0 {
        return "N/A".to_string();
    }

    let ticks = (binary & TICKS_MASK) as i64;
    let seconds = (ticks - UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_SECOND);
    match DateTime::from_timestamp(seconds, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "Invalid timestamp".to_string(),
    }
}

/// Format a count with its share of a total
pub fn format_share(count: usize, total: usize) -> String {
    if total == 0 {
        return count.to_string();
    }
    format!("{count} ({:.1}%)", count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_creation_time() {
        let ticks = 635_713_056_000_000_000_u64;
        assert_eq!(format_creation_time(ticks), "2015-07-01 00:00:00");
        // Same instant tagged as local time
        assert_eq!(
            format_creation_time(ticks | 0x8000_0000_0000_0000),
            "2015-07-01 00:00:00"
        );
        assert_eq!(format_creation_time(0), "N/A");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1, 4), "1 (25.0%)");
        assert_eq!(format_share(3, 0), "3");
    }
}
