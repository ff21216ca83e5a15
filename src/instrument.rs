//! A single instrument hosted by the container.
//!
//! An `Instrument` is either created with [`Instrument::new`] or deserialized
//! from one record of a payload source. The persisted record carries `ID`,
//! `Name`, `Address` and `WU_allowed`; the operating [`State`] is never part of
//! the source and always starts out as [`State::Undefined`].
//!
//! The address has the form `host:port` with an IPv4 host. It can be turned into
//! the fixed 6-byte wire form expected by the UDP transport with
//! [`Instrument::address_bytes`], or resolved to a socket address with
//! [`Instrument::resolve_udp_addr`].

use crate::error::{PayloadError, PayloadResult};
use crate::state::State;
use serde::Deserialize;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

/// ID given to a record that was never configured. Such records are skipped on load.
pub const UNSET_ID: i64 = 0;
/// Reserved ID of the container's master controller.
pub const MASTER_ID: i64 = 1;
/// Reserved ID of the cRIO controller board.
pub const CRIO_ID: i64 = 2;

/// Placeholder used for names and addresses that were never set.
const UNKNOWN: &str = "unknown";

/// Length of the wire-encoded address: 4 IPv4 octets and a 2-byte port.
pub const ADDRESS_BYTES_LEN: usize = 6;

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// One physical or logical device in the container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instrument {
    /// Identifier, unique within a payload. Absent in a record means [`UNSET_ID`].
    #[serde(rename = "ID", default)]
    pub id: i64,
    /// Display label.
    #[serde(rename = "Name", default = "unknown")]
    pub name: String,
    /// Network address as `host:port`.
    #[serde(rename = "Address", default = "unknown")]
    pub address: String,
    /// Whether the instrument may be commanded into warm-up.
    #[serde(rename = "WU_allowed", default)]
    pub wu_allowed: bool,
    /// Current operating state. Never read from a source.
    #[serde(skip)]
    pub state: State,
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new()
    }
}

impl Instrument {
    /// Create an instrument that stands for "no real device".
    ///
    /// The ID is `-1`, which is distinct from [`UNSET_ID`] used for skipped records.
    pub fn new() -> Self {
        Self {
            id: -1,
            name: unknown(),
            address: unknown(),
            wu_allowed: false,
            state: State::Undefined,
        }
    }

    /// Encode the address as 4 IPv4 octets followed by the port in big-endian order.
    ///
    /// Returns `None` if the address does not split into host and port at its
    /// last `:`, if the port is not a 16-bit integer, or if the host is not an
    /// IPv4 address.
    ///
    /// # Example
    ///
    /// ```
    /// use container_payload::Instrument;
    ///
    /// let mut inst = Instrument::new();
    /// inst.address = "127.0.0.1:8080".to_string();
    /// assert_eq!(inst.address_bytes(), Some([127, 0, 0, 1, 0x1F, 0x90]));
    /// ```
    pub fn address_bytes(&self) -> Option<[u8; ADDRESS_BYTES_LEN]> {
        let (host, port) = self.address.rsplit_once(':')?;
        let port: u16 = port.parse().ok()?;
        let ip: Ipv4Addr = host.parse().ok()?;

        let mut bytes = [0u8; ADDRESS_BYTES_LEN];
        bytes[..4].copy_from_slice(&ip.octets());
        bytes[4..].copy_from_slice(&port.to_be_bytes());
        Some(bytes)
    }

    /// Resolve the address as a UDP endpoint.
    ///
    /// Host names are looked up with the system resolver. An IPv4 result is
    /// preferred; otherwise the first result wins.
    pub fn resolve_udp_addr(&self) -> PayloadResult<SocketAddr> {
        let resolution_error = |source| PayloadError::Resolution {
            address: self.address.clone(),
            source,
        };

        let addrs: Vec<SocketAddr> = self
            .address
            .to_socket_addrs()
            .map_err(resolution_error)?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                resolution_error(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no addresses found",
                ))
            })
    }

    /// Multi-line description with one labelled field per line.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID:\t\t{}", self.id)?;
        writeln!(f, "Name:\t\t{}", self.name)?;
        writeln!(f, "Address:\t{}", self.address)?;
        writeln!(f, "WarmUp allowed:\t{}", self.wu_allowed)?;
        writeln!(f, "State:\t\t{}", self.state.name())
    }
}
