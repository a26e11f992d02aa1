//! Host identity resolution for audit attribution.
//!
//! Audit entries record which host performed an administrative action.
//! Resolution degrades to `"unknown"` instead of failing: an unresolvable
//! hostname must never block an audit write, let alone the action itself.

use serde::{Deserialize, Serialize};
use std::net::UdpSocket;

/// Placeholder used when a host attribute cannot be resolved.
pub const UNKNOWN_HOST: &str = "unknown";

/// The acting host's identity, as recorded on audit entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIdentity {
    /// Local interface IP address.
    pub ip: String,
    /// Hostname.
    pub name: String,
}

impl HostIdentity {
    /// Creates a host identity from known values.
    #[must_use]
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
        }
    }

    /// Resolves the current host's identity.
    ///
    /// The IP is the local address of the interface that would route
    /// outbound traffic (no packets are sent). Either attribute falls
    /// back to [`UNKNOWN_HOST`] on failure.
    #[must_use]
    pub fn detect() -> Self {
        let name = whoami::fallible::hostname().unwrap_or_else(|_| UNKNOWN_HOST.to_string());
        let ip = local_interface_ip().unwrap_or_else(|| UNKNOWN_HOST.to_string());
        Self { ip, name }
    }
}

impl Default for HostIdentity {
    fn default() -> Self {
        Self::detect()
    }
}

/// Returns the local IP the OS would use for outbound traffic.
///
/// Connecting a UDP socket selects a route without sending anything.
fn local_interface_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("203.0.113.1:9").ok()?;
    Some(socket.local_addr().ok()?.ip().to_string())
}
