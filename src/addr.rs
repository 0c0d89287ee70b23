//! Network address matching.
//!
//! IP based policy rules express the networks they apply to in CIDR
//! notation, i.e., an address followed by a slash and a prefix length.
//! This module provides [`Subnet`], the parsed form of such a network
//! specification, and [`is_in_range`], the containment test used by the
//! validator pipeline.

use std::{error, fmt};
use std::net::{AddrParseError, IpAddr};
use std::num::ParseIntError;
use std::str::FromStr;


//------------ Functions -----------------------------------------------------

/// Returns whether `addr` lies within the network given in CIDR notation.
///
/// Policy documents are only partially trusted, so a malformed
/// specification never raises an error here: it simply does not match.
/// A misconfigured network rule thus fails closed rather than halting
/// evaluation of the request.
///
/// A prefix length of zero matches any address, regardless of address
/// family. For all other lengths, the address families of `addr` and
/// `subnet` have to agree.
pub fn is_in_range(addr: IpAddr, subnet: &str) -> bool {
    Subnet::from_str(subnet).map(|subnet| {
        subnet.contains(addr)
    }).unwrap_or(false)
}


//------------ Subnet --------------------------------------------------------

/// An IP network: a base address and a prefix length.
///
/// The prefix length is the number of leading bits of the base address
/// that are significant when deciding whether another address falls
/// inside the network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Subnet {
    /// The base address of the network.
    addr: IpAddr,

    /// The number of significant leading bits.
    len: u8,
}

impl Subnet {
    /// Creates a new subnet from an address and a prefix length.
    ///
    /// The function returns an error if `len` is too large for the address
    /// family of `addr`, i.e., greater than 32 for IPv4 or greater than
    /// 128 for IPv6.
    pub fn new(addr: IpAddr, len: u8) -> Result<Self, ParseSubnetError> {
        let width = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if len > width {
            return Err(ParseSubnetError::LenOverflow)
        }
        Ok(Subnet { addr, len })
    }

    /// Returns the base address of the subnet.
    pub fn addr(self) -> IpAddr {
        self.addr
    }

    /// Returns the prefix length of the subnet.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> u8 {
        self.len
    }

    /// Returns whether `addr` falls inside the subnet.
    ///
    /// A prefix length of zero matches any address, even one of the other
    /// address family. Otherwise the families have to be equal; there is
    /// no normalization of IPv4-mapped IPv6 addresses.
    pub fn contains(self, addr: IpAddr) -> bool {
        if self.len == 0 {
            return true
        }
        match (self.addr, addr) {
            (IpAddr::V4(base), IpAddr::V4(addr)) => {
                let mask = u32::MAX << (32 - u32::from(self.len));
                u32::from(addr) & mask == u32::from(base) & mask
            }
            (IpAddr::V6(base), IpAddr::V6(addr)) => {
                contains_v6(base.octets(), addr.octets(), self.len)
            }
            _ => false
        }
    }
}

/// Compares the first `len` bits of two IPv6 addresses.
///
/// Whole bytes are compared directly. If `len` is not a multiple of
/// eight, the byte after the last whole byte is compared under a mask
/// keeping its top `len % 8` bits.
fn contains_v6(base: [u8; 16], addr: [u8; 16], len: u8) -> bool {
    let whole = usize::from(len / 8);
    if base[..whole] != addr[..whole] {
        return false
    }
    let rem = len % 8;
    if rem == 0 {
        return true
    }
    let mask = 0xFFu8 << (8 - rem);
    base[whole] & mask == addr[whole] & mask
}


//--- FromStr and Display

impl FromStr for Subnet {
    type Err = ParseSubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseSubnetError::Empty)
        }
        let slash = s.find('/').ok_or(ParseSubnetError::MissingLen)?;
        let addr = IpAddr::from_str(&s[..slash]).map_err(
            ParseSubnetError::InvalidAddr
        )?;
        let len = u8::from_str(&s[slash + 1..]).map_err(
            ParseSubnetError::InvalidLen
        )?;
        Subnet::new(addr, len)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}


//============ Errors ========================================================

//------------ ParseSubnetError ----------------------------------------------

/// Creating a subnet from a string has failed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseSubnetError {
    /// The value parsed was empty.
    Empty,

    /// The length portion after a slash was missing.
    MissingLen,

    /// The address portion is invalid.
    InvalidAddr(AddrParseError),

    /// The length portion is invalid.
    InvalidLen(ParseIntError),

    /// The prefix length is longer than allowed for the address family.
    LenOverflow,
}

impl fmt::Display for ParseSubnetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseSubnetError::Empty => f.write_str("empty string"),
            ParseSubnetError::MissingLen => {
                f.write_str("missing length portion")
            }
            ParseSubnetError::InvalidAddr(err) => {
                write!(f, "invalid address: {}", err)
            }
            ParseSubnetError::InvalidLen(err) => {
                write!(f, "invalid length: {}", err)
            }
            ParseSubnetError::LenOverflow => {
                f.write_str("prefix length too large")
            }
        }
    }
}

impl error::Error for ParseSubnetError { }


//============ Tests =========================================================
