// dhcpcd-prefs - Network Utilities
// SPDX-License-Identifier: MIT

//! Live network interface detection.
//!
//! This module feeds the editor its live-state snapshot using the Linux
//! sysfs interface, plus `nmcli` for wireless scan data. It runs outside
//! any edit transaction; the engine treats whatever it produced as an
//! immutable snapshot.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::models::{LiveInterface, LiveStateIndex};

/// IFF_POINTOPOINT from the interface flags word.
const IFF_POINTOPOINT: u32 = 0x10;

/// Take a snapshot of all network interfaces on the system.
///
/// Reads from /sys/class/net to find the interfaces and determine their
/// link type; the loopback device is skipped.
pub fn snapshot() -> LiveStateIndex {
    let mut interfaces = Vec::new();
    let net_path = Path::new("/sys/class/net");

    if let Ok(entries) = fs::read_dir(net_path) {
        for entry in entries.flatten() {
            let ifname = entry.file_name().to_string_lossy().to_string();
            if ifname == "lo" {
                continue;
            }

            let path = entry.path();
            let is_wireless = is_wireless(&path);
            let is_point_to_point = read_flags(&path) & IFF_POINTOPOINT != 0;
            let (current_ssid, scanned_ssids) = if is_wireless {
                (current_ssid(&ifname), scan_results(&ifname))
            } else {
                (None, Vec::new())
            };

            interfaces.push(LiveInterface {
                ifname,
                is_point_to_point,
                is_wireless,
                current_ssid,
                scanned_ssids,
            });
        }
    }

    // Sort by name for consistent ordering
    interfaces.sort_by(|a, b| natural_sort_key(&a.ifname).cmp(&natural_sort_key(&b.ifname)));

    debug!("live snapshot holds {} interfaces", interfaces.len());
    LiveStateIndex::new(interfaces)
}

/// Check whether an interface is wireless.
fn is_wireless(path: &Path) -> bool {
    if path.join("wireless").exists() {
        return true;
    }
    if let Ok(uevent) = fs::read_to_string(path.join("uevent")) {
        if uevent.contains("DEVTYPE=wlan") {
            return true;
        }
    }
    false
}

/// Read the interface flags word from sysfs (hex-formatted).
fn read_flags(path: &Path) -> u32 {
    fs::read_to_string(path.join("flags"))
        .ok()
        .and_then(|s| u32::from_str_radix(s.trim().trim_start_matches("0x"), 16).ok())
        .unwrap_or(0)
}

/// SSID the interface is currently associated with.
///
/// Uses nmcli; absence of the tool yields no association, never an error.
fn current_ssid(ifname: &str) -> Option<String> {
    let output = Command::new("nmcli")
        .args(["-t", "-f", "ACTIVE,SSID", "device", "wifi", "list", "ifname", ifname])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.lines().find_map(|line| {
        let (active, ssid) = line.split_once(':')?;
        let ssid = unescape_terse(ssid);
        if active == "yes" && !ssid.is_empty() {
            Some(ssid)
        } else {
            None
        }
    })
}

/// Distinct SSIDs seen by the interface's latest scan, first-seen order.
fn scan_results(ifname: &str) -> Vec<String> {
    let output = Command::new("nmcli")
        .args(["-t", "-f", "SSID", "device", "wifi", "list", "ifname", ifname])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let mut seen = std::collections::HashSet::new();
            stdout
                .lines()
                .filter(|line| !line.is_empty())
                .map(unescape_terse)
                .filter(|ssid| seen.insert(ssid.clone()))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Undo nmcli's terse-mode escaping: `\:` and `\\` stand for the
/// literal characters inside a field value.
fn unescape_terse(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Generate a sort key that sorts numbers naturally.
fn natural_sort_key(s: &str) -> (String, u32) {
    let mut prefix = String::new();
    let mut num_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            num_str.push(c);
        } else if num_str.is_empty() {
            prefix.push(c);
        }
    }

    let num: u32 = num_str.parse().unwrap_or(0);
    (prefix, num)
}
