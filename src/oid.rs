//! The object identifiers used in this crate.
//!
//! This module collects all the object identifiers used at various places
//! in this crate in one central place. They are public so you can refer to
//! them should that ever become necessary.

use bcder::{ConstOid, Oid};

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-cRLDistributionPoints`
///
/// Identifies the CRL Distribution Points certificate extension.
pub const CE_CRL_DISTRIBUTION_POINTS: ConstOid = Oid(&[85, 29, 31]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-pe-authorityInfoAccess`
///
/// Identifies the Authority Information Access certificate extension.
pub const PE_AUTHORITY_INFO_ACCESS: ConstOid
    = Oid(&[43, 6, 1, 5, 5, 7, 1, 1]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ad-caIssuers`
///
/// The access method for locating the certificate of the issuing CA.
pub const AD_CA_ISSUERS: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 48, 2]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ad-ocsp`
///
/// The access method for the OCSP responder of the issuing CA.
pub const AD_OCSP: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 48, 1]);
