//! The result of validating a certificate request.
//!
//! The hosting CA creates one [`ValidationResult`] per incoming request
//! and threads it through the ordered chain of validators. Each validator
//! mutates only its own concern and honors an already set denial flag by
//! returning without touching anything. When the chain has finished, the
//! host reads the result back: either the request is denied and carries a
//! failure status and message, or the accumulated properties and
//! extensions get materialized onto the certificate before signing.

use std::fmt;
use bcder::ConstOid;
use bytes::Bytes;
use crate::name::SanField;


//------------ ValidationResult ----------------------------------------------

/// The accumulated outcome of a request evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    /// Whether the request must not be issued.
    ///
    /// Sticky: once set it is never cleared by a validator.
    denied: bool,

    /// The status code of the most recent failure.
    failure_status: Option<FailureStatus>,

    /// The message of the most recent failure.
    ///
    /// Later failures overwrite earlier ones, so the message surfaced to
    /// the requester names the last rule that failed.
    failure_message: Option<String>,

    /// The certificate properties to set on the issued certificate.
    properties: Vec<CertificateProperty>,

    /// The Subject Alternative Name extension being built.
    subject_alternative_names: SanExtension,

    /// Additional extensions to attach, unique per OID.
    extensions: Vec<Extension>,
}

/// # Denial and Failure Status
///
impl ValidationResult {
    /// Creates a new result for an incoming request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the request has been denied.
    pub fn is_denied(&self) -> bool {
        self.denied
    }

    /// Denies the request with a status and message.
    ///
    /// Any earlier failure status and message are overwritten; the denial
    /// flag itself is sticky.
    pub fn set_failure(
        &mut self, status: FailureStatus, message: impl Into<String>
    ) {
        self.denied = true;
        self.failure_status = Some(status);
        self.failure_message = Some(message.into());
    }

    /// Returns the failure status if the request has been denied.
    pub fn failure_status(&self) -> Option<FailureStatus> {
        self.failure_status
    }

    /// Returns the failure message if the request has been denied.
    pub fn failure_message(&self) -> Option<&str> {
        self.failure_message.as_deref()
    }
}

/// # Certificate Properties
///
impl ValidationResult {
    /// Appends a certificate property assignment.
    ///
    /// Duplicate names are acceptable here. De-duplication happens through
    /// the override semantics of the rules that add properties, not
    /// through this accumulator.
    pub fn add_property(
        &mut self, name: impl Into<String>, value: impl Into<String>
    ) {
        self.properties.push(CertificateProperty {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Returns whether a property of the given name has been added.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|prop| prop.name == name)
    }

    /// Returns the property assignments in the order they were added.
    pub fn properties(&self) -> &[CertificateProperty] {
        &self.properties
    }
}

/// # Subject Alternative Names
///
impl ValidationResult {
    /// Returns the Subject Alternative Name extension being built.
    pub fn subject_alternative_names(&self) -> &SanExtension {
        &self.subject_alternative_names
    }

    /// Appends an entry to the Subject Alternative Name extension.
    pub fn add_subject_alternative_name(
        &mut self, field: SanField, value: impl Into<String>
    ) {
        self.subject_alternative_names.names.push((field, value.into()));
    }
}

/// # Extra Extensions
///
impl ValidationResult {
    /// Sets the value of an extra extension.
    ///
    /// If an extension with the same OID is already present, its value is
    /// replaced, keeping OIDs unique. Otherwise the extension is appended.
    pub fn set_extension(&mut self, oid: ConstOid, value: Bytes) {
        match self.extensions.iter_mut().find(|ext| ext.oid == oid) {
            Some(ext) => ext.value = value,
            None => self.extensions.push(Extension { oid, value }),
        }
    }

    /// Returns the value of the extra extension with the given OID.
    pub fn extension(&self, oid: &ConstOid) -> Option<&Bytes> {
        self.extensions.iter().find(|ext| {
            ext.oid == *oid
        }).map(|ext| &ext.value)
    }

    /// Returns all extra extensions in the order they were added.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }
}


//------------ CertificateProperty -------------------------------------------

/// A single property assignment for the certificate to be issued.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateProperty {
    /// The name of the property.
    name: String,

    /// The value to assign.
    value: String,
}

impl CertificateProperty {
    /// Returns the name of the property.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value to assign.
    pub fn value(&self) -> &str {
        &self.value
    }
}


//------------ SanExtension --------------------------------------------------

/// The Subject Alternative Name extension under construction.
///
/// Entries are kept in the order they were added. The same field kind may
/// appear more than once; whether a second entry of a kind is permitted is
/// decided by the rules that add entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SanExtension {
    names: Vec<(SanField, String)>,
}

impl SanExtension {
    /// Returns the entries in the order they were added.
    pub fn names(&self) -> &[(SanField, String)] {
        &self.names
    }

    /// Returns whether the extension has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns whether an entry of the given field kind is present.
    pub fn contains_field(&self, field: SanField) -> bool {
        self.names.iter().any(|(present, _)| *present == field)
    }
}


//------------ Extension -----------------------------------------------------

/// An extra extension to attach to the certificate.
///
/// The value holds the DER encoded extension value, i.e., the content that
/// goes into the `extnValue` octet string. Wrapping it into the outer
/// extension structure is left to the CA host.
#[derive(Clone, Debug, PartialEq)]
pub struct Extension {
    /// The object identifier of the extension.
    oid: ConstOid,

    /// The DER encoded extension value.
    value: Bytes,
}

impl Extension {
    /// Returns the object identifier of the extension.
    pub fn oid(&self) -> &ConstOid {
        &self.oid
    }

    /// Returns the DER encoded extension value.
    pub fn value(&self) -> &Bytes {
        &self.value
    }
}


//------------ FailureStatus -------------------------------------------------

/// The status code attached to a denied request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum FailureStatus {
    /// The request violates the issuance policy of its template.
    ///
    /// This is the status for all configuration driven rejections of the
    /// policy engine.
    TemplateDenied,
}

impl FailureStatus {
    /// Returns the numeric status code reported to the CA host.
    pub fn code(self) -> u32 {
        match self {
            FailureStatus::TemplateDenied => 0x8009_4012,
        }
    }

    /// Returns a static description of the status.
    pub fn static_description(self) -> &'static str {
        match self {
            FailureStatus::TemplateDenied => "template denied",
        }
    }
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.static_description())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::oid;

    #[test]
    fn denial_is_sticky_and_message_overwrites() {
        let mut res = ValidationResult::new();
        assert!(!res.is_denied());
        assert_eq!(res.failure_status(), None);

        res.set_failure(FailureStatus::TemplateDenied, "first");
        assert!(res.is_denied());
        assert_eq!(res.failure_message(), Some("first"));

        res.set_failure(FailureStatus::TemplateDenied, "second");
        assert!(res.is_denied());
        assert_eq!(
            res.failure_status(), Some(FailureStatus::TemplateDenied)
        );
        assert_eq!(res.failure_message(), Some("second"));
    }

    #[test]
    fn properties_keep_order_and_duplicates() {
        let mut res = ValidationResult::new();
        res.add_property("Subject.Organization", "ACME");
        res.add_property("Subject.Organization", "ACME Again");
        res.add_property("Subject.Country", "DE");

        assert!(res.has_property("Subject.Organization"));
        assert!(!res.has_property("Subject.CommonName"));
        assert_eq!(
            res.properties().iter().map(|prop| {
                (prop.name(), prop.value())
            }).collect::<Vec<_>>(),
            vec![
                ("Subject.Organization", "ACME"),
                ("Subject.Organization", "ACME Again"),
                ("Subject.Country", "DE"),
            ]
        );
    }

    #[test]
    fn extensions_unique_per_oid() {
        let mut res = ValidationResult::new();
        res.set_extension(
            oid::CE_CRL_DISTRIBUTION_POINTS, Bytes::from_static(b"one")
        );
        res.set_extension(
            oid::PE_AUTHORITY_INFO_ACCESS, Bytes::from_static(b"two")
        );
        res.set_extension(
            oid::CE_CRL_DISTRIBUTION_POINTS, Bytes::from_static(b"three")
        );

        assert_eq!(res.extensions().len(), 2);
        assert_eq!(
            res.extension(&oid::CE_CRL_DISTRIBUTION_POINTS),
            Some(&Bytes::from_static(b"three"))
        );
        assert_eq!(
            res.extension(&oid::PE_AUTHORITY_INFO_ACCESS),
            Some(&Bytes::from_static(b"two"))
        );
    }

    #[test]
    fn san_entries() {
        let mut res = ValidationResult::new();
        assert!(res.subject_alternative_names().is_empty());

        res.add_subject_alternative_name(
            SanField::DnsName, "host.example.org"
        );
        res.add_subject_alternative_name(SanField::IpAddress, "192.0.2.1");

        let san = res.subject_alternative_names();
        assert!(san.contains_field(SanField::DnsName));
        assert!(!san.contains_field(SanField::UserPrincipalName));
        assert_eq!(san.names().len(), 2);
    }
}
