//! Host table rendering.

use std::io::{self, Write};

use chrono::{DateTime, TimeZone};

use crate::data::units::{format_fixed, format_memory, format_traffic};
use crate::data::Host;

/// strftime pattern of the timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `now` as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

fn header(interface: &str) -> String {
    format!(
        "Host        LoadAvg %CPU(user) %CPU(sys) %CPU(idle) Mem(total) Mem(used) Mem(buffers) Mem(cached) Mem(free) {0}(rxBytes) {0}(txBytes)",
        interface
    )
}

fn row(host: &Host) -> String {
    format!(
        "{} {}     {}      {}      {}     {}      {}     {}      {}      {}    {}  {}",
        host.id,
        format_fixed(host.load.avg5),
        format_fixed(host.cpu.user),
        format_fixed(host.cpu.system),
        format_fixed(host.cpu.idle),
        format_memory(host.memory.total),
        format_memory(host.memory.used),
        format_memory(host.memory.buffers),
        format_memory(host.memory.cached),
        format_memory(host.memory.free),
        format_traffic(host.interface.rx_bytes),
        format_traffic(host.interface.tx_bytes),
    )
}

/// Write the timestamped table for `hosts`, one row per host in order.
///
/// `interface` only labels the traffic columns.
pub fn render_table<W, Tz>(
    out: &mut W,
    hosts: &[Host],
    now: &DateTime<Tz>,
    interface: &str,
) -> io::Result<()>
where
    W: Write + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    writeln!(out, "# {}", format_timestamp(now))?;
    writeln!(out, "{}", header(interface))?;
    for host in hosts {
        writeln!(out, "{}", row(host))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};
    use regex::Regex;

    fn sample_host() -> Host {
        let mut host = Host::new("2eQGEaLxibb", "web1");
        host.load.avg5 = 0.5;
        host.cpu.user = 10.0;
        host.cpu.system = 2.5;
        host.cpu.idle = 87.5;
        host.memory.total = 4.0 * 1024.0 * 1024.0 * 1024.0;
        host.memory.used = 1536.0 * 1024.0 * 1024.0;
        host.memory.buffers = 512.0 * 1024.0;
        host.memory.cached = 2048.0;
        host.memory.free = 100.0;
        host.interface.rx_bytes = 3.0 * 1024.0;
        host.interface.tx_bytes = 512.0;
        host
    }

    fn render_to_string(hosts: &[Host], interface: &str) -> String {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 42, 7).unwrap();
        let mut out = Vec::new();
        render_table(&mut out, hosts, &now, interface).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_timestamp_shape() {
        let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}$").unwrap();
        assert!(pattern.is_match(&format_timestamp(&Local::now())));

        let fixed = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&fixed), "2026-01-02 03:04:05");
    }

    #[test]
    fn test_render_layout() {
        let output = render_to_string(&[sample_host()], "eth0");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# 2026-10-18 09:42:07");
        assert!(lines[1].starts_with("Host        LoadAvg %CPU(user)"));
        assert!(lines[1].ends_with("eth0(rxBytes) eth0(txBytes)"));
        assert_eq!(
            lines[2],
            "2eQGEaLxibb 0.50     10.00      2.50      87.50     4.00G      1.50G     512.00K      2.00K      100.00B    3.00K/s  512.00B/s"
        );
    }

    #[test]
    fn test_rows_follow_input_order() {
        let hosts = vec![Host::new("b", "web2"), Host::new("a", "web1")];
        let output = render_to_string(&hosts, "eth0");
        let rows: Vec<&str> = output.lines().skip(2).collect();
        assert!(rows[0].starts_with("b 0.00"));
        assert!(rows[1].starts_with("a 0.00"));
    }

    #[test]
    fn test_header_uses_interface_name() {
        let output = render_to_string(&[], "bond0");
        assert!(output.contains("bond0(rxBytes) bond0(txBytes)"));
        assert_eq!(output.lines().count(), 2);
    }
}
