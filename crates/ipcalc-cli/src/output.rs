//! Rendering of calculation results
//!
//! Three shapes are produced:
//! - the tab-separated info block for people
//! - `KEY=VALUE` lines for `eval` in shell scripts
//! - JSON

use anyhow::Result;
use ipcalc_core::NetworkInfo;
use serde::Serialize;
use std::fmt::Write;
use std::net::IpAddr;

/// Which `KEY=VALUE` lines to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub netmask: bool,
    pub prefix: bool,
    pub broadcast: bool,
    pub network: bool,
    pub minaddr: bool,
    pub maxaddr: bool,
    pub addrspace: bool,
    pub hostname: bool,
}

impl Selection {
    /// Nothing selected; the info block is printed instead
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A finished calculation plus what the front-end added to it
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(flatten)]
    pub info: &'a NetworkInfo,
    /// Netmask to print for `NETMASK=`; differs from `info.netmask` only
    /// when a classful default was substituted
    #[serde(skip)]
    pub display_netmask: IpAddr,
    pub hostname: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(info: &'a NetworkInfo) -> Self {
        Self {
            info,
            display_netmask: info.netmask,
            hostname: None,
        }
    }
}

/// Tab-separated description of the network
pub fn render_info(report: &Report<'_>) -> String {
    let info = report.info;
    let mut out = String::with_capacity(256);

    if let Some(ref expanded) = info.expanded_address {
        line(&mut out, "Full Address", expanded);
    }
    line(&mut out, "Address", info.address);

    if info.is_single_host() {
        line(&mut out, "Address space", info.address_space);
    } else {
        line(&mut out, "Netmask", format_args!("{} = {}", info.netmask, info.prefix));
        if let Some(ref expanded) = info.expanded_network {
            line(&mut out, "Full Network", expanded);
        }
        line(&mut out, "Network", format_args!("{}/{}", info.network, info.prefix));
        line(&mut out, "Address space", info.address_space);
        if let Some(broadcast) = info.broadcast {
            line(&mut out, "Broadcast", broadcast);
        }
        out.push('\n');
        line(&mut out, "HostMin", info.host_min);
        line(&mut out, "HostMax", info.host_max);
        line(&mut out, "Hosts/Net", info.hosts);
    }

    if let Some(ref hostname) = report.hostname {
        line(&mut out, "Hostname", hostname);
    }

    out
}

/// Shell variable assignments for the selected fields
pub fn render_vars(report: &Report<'_>, selection: &Selection) -> String {
    let info = report.info;
    let mut out = String::new();

    if selection.netmask {
        var(&mut out, "NETMASK", report.display_netmask);
    }
    if selection.prefix {
        var(&mut out, "PREFIX", info.prefix);
    }
    if selection.broadcast {
        if let Some(broadcast) = info.broadcast {
            var(&mut out, "BROADCAST", broadcast);
        }
    }
    if selection.network {
        var(&mut out, "NETWORK", info.network);
    }
    if selection.minaddr {
        var(&mut out, "MINADDR", info.host_min);
    }
    if selection.maxaddr {
        var(&mut out, "MAXADDR", info.host_max);
    }
    if selection.addrspace {
        var(&mut out, "ADDRSPACE", format_args!("\"{}\"", info.address_space));
    }
    if selection.hostname {
        var(&mut out, "HOSTNAME", report.hostname.as_deref().unwrap_or(""));
    }

    out
}

/// Pretty-printed JSON of the whole report
pub fn render_json(report: &Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// Writing into a String cannot fail.
fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{}:\t{}", label, value);
}

fn var(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{}={}", key, value);
}
