//! Encoding of the revocation and issuer information extensions.
//!
//! The static content validator attaches two extensions to certificates:
//! CRL Distribution Points and Authority Information Access. This module
//! provides the DER encoders for their values. The returned bytes are the
//! extension value, i.e., the content that goes into the `extnValue` octet
//! string of the extension; wrapping it into the outer extension structure
//! is left to the CA host.

use bcder::{Mode, OctetString, Tag};
use bcder::encode::{self, PrimitiveContent, Values};
use bytes::Bytes;
use crate::oid;


//------------ Functions -----------------------------------------------------

/// Encodes the value of a CRL Distribution Points extension.
///
/// ```text
/// CRLDistributionPoints ::= SEQUENCE SIZE (1..MAX) OF DistributionPoint
///
/// DistributionPoint ::= SEQUENCE {
///    distributionPoint       [0]     DistributionPointName OPTIONAL, ... }
///
/// DistributionPointName ::= CHOICE {
///    fullName                [0]     GeneralNames, ... }
/// ```
///
/// Each URI becomes its own distribution point with a single
/// uniformResourceIdentifier general name, in the order given.
pub fn encode_crl_distribution_points(uris: &[String]) -> Bytes {
    encode::sequence(
        encode::iter(uris.iter().map(|uri| {
            encode::sequence(
                encode::sequence_as(Tag::CTX_0, // distributionPoint
                    encode::sequence_as(Tag::CTX_0, // fullName
                        encode_uri_general_name(uri)
                    )
                )
            )
        }))
    ).to_captured(Mode::Der).into_bytes()
}

/// Encodes the value of an Authority Information Access extension.
///
/// ```text
/// AuthorityInfoAccessSyntax  ::=
///         SEQUENCE SIZE (1..MAX) OF AccessDescription
///
/// AccessDescription  ::=  SEQUENCE {
///         accessMethod          OBJECT IDENTIFIER,
///         accessLocation        GeneralName  }
/// ```
///
/// The CA issuer URIs come first with the id-ad-caIssuers access method,
/// followed by the OCSP URIs with the id-ad-ocsp access method. Order is
/// preserved within each group.
pub fn encode_authority_info_access(
    ca_issuer_uris: &[String],
    ocsp_uris: &[String],
) -> Bytes {
    encode::sequence((
        encode::iter(ca_issuer_uris.iter().map(|uri| {
            encode::sequence((
                oid::AD_CA_ISSUERS.encode(),
                encode_uri_general_name(uri)
            ))
        })),
        encode::iter(ocsp_uris.iter().map(|uri| {
            encode::sequence((
                oid::AD_OCSP.encode(),
                encode_uri_general_name(uri)
            ))
        })),
    )).to_captured(Mode::Der).into_bytes()
}

/// Returns an encoder for a uniformResourceIdentifier general name.
///
/// ```text
/// GeneralName ::= CHOICE {
///    ...
///    uniformResourceIdentifier       [6]     IA5String,
///    ... }
/// ```
fn encode_uri_general_name(uri: &str) -> impl Values {
    OctetString::new(
        Bytes::copy_from_slice(uri.as_bytes())
    ).encode_as(Tag::CTX_6)
}


//============ Tests =========================================================
