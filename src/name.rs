//! The name component rule tables.
//!
//! Static content rules in a policy document refer to the components of a
//! certificate name by their textual field names. This module holds the
//! closed sets of field kinds the engine knows about: [`RdnField`] for the
//! relative distinguished names of the Subject and [`SanField`] for the
//! entries of the Subject Alternative Name extension.
//!
//! Both types parse from the field spellings used in policy documents.
//! Each `RdnField` additionally knows the certificate property its value is
//! stored under and the maximum length the certification authority accepts
//! for it.

use std::fmt;
use std::str::FromStr;


//------------ RdnField ------------------------------------------------------

/// A relative distinguished name component of a certificate Subject.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum RdnField {
    EmailAddress,
    CommonName,
    OrganizationName,
    OrganizationalUnitName,
    LocalityName,
    StateOrProvinceName,
    CountryName,
    Title,
    GivenName,
    Initials,
    Surname,
    StreetAddress,
    UnstructuredName,
    UnstructuredAddress,
    SerialNumber,
    DomainComponent,
}

impl RdnField {
    /// All known RDN fields.
    pub const ALL: &'static [RdnField] = &[
        RdnField::EmailAddress,
        RdnField::CommonName,
        RdnField::OrganizationName,
        RdnField::OrganizationalUnitName,
        RdnField::LocalityName,
        RdnField::StateOrProvinceName,
        RdnField::CountryName,
        RdnField::Title,
        RdnField::GivenName,
        RdnField::Initials,
        RdnField::Surname,
        RdnField::StreetAddress,
        RdnField::UnstructuredName,
        RdnField::UnstructuredAddress,
        RdnField::SerialNumber,
        RdnField::DomainComponent,
    ];

    /// Returns the field name used in policy documents.
    pub fn policy_name(self) -> &'static str {
        match self {
            RdnField::EmailAddress => "emailAddress",
            RdnField::CommonName => "commonName",
            RdnField::OrganizationName => "organizationName",
            RdnField::OrganizationalUnitName => "organizationalUnitName",
            RdnField::LocalityName => "localityName",
            RdnField::StateOrProvinceName => "stateOrProvinceName",
            RdnField::CountryName => "countryName",
            RdnField::Title => "title",
            RdnField::GivenName => "givenName",
            RdnField::Initials => "initials",
            RdnField::Surname => "surname",
            RdnField::StreetAddress => "streetAddress",
            RdnField::UnstructuredName => "unstructuredName",
            RdnField::UnstructuredAddress => "unstructuredAddress",
            RdnField::SerialNumber => "serialNumber",
            RdnField::DomainComponent => "domainComponent",
        }
    }

    /// Returns the certificate property the field value is stored under.
    pub fn property_name(self) -> &'static str {
        match self {
            RdnField::EmailAddress => "Subject.Email",
            RdnField::CommonName => "Subject.CommonName",
            RdnField::OrganizationName => "Subject.Organization",
            RdnField::OrganizationalUnitName => "Subject.OrgUnit",
            RdnField::LocalityName => "Subject.Locality",
            RdnField::StateOrProvinceName => "Subject.State",
            RdnField::CountryName => "Subject.Country",
            RdnField::Title => "Subject.Title",
            RdnField::GivenName => "Subject.GivenName",
            RdnField::Initials => "Subject.Initials",
            RdnField::Surname => "Subject.SurName",
            RdnField::StreetAddress => "Subject.StreetAddress",
            RdnField::UnstructuredName => "Subject.UnstructuredName",
            RdnField::UnstructuredAddress => "Subject.UnstructuredAddress",
            RdnField::SerialNumber => "Subject.DeviceSerialNumber",
            RdnField::DomainComponent => "Subject.DomainComponent",
        }
    }

    /// Returns the maximum value length in characters the CA accepts.
    pub fn max_length(self) -> usize {
        match self {
            RdnField::EmailAddress => 128,
            RdnField::CommonName => 64,
            RdnField::OrganizationName => 64,
            RdnField::OrganizationalUnitName => 64,
            RdnField::LocalityName => 128,
            RdnField::StateOrProvinceName => 128,
            RdnField::CountryName => 2,
            RdnField::Title => 64,
            RdnField::GivenName => 16,
            RdnField::Initials => 5,
            RdnField::Surname => 40,
            RdnField::StreetAddress => 30,
            RdnField::UnstructuredName => 1024,
            RdnField::UnstructuredAddress => 1024,
            RdnField::SerialNumber => 1024,
            RdnField::DomainComponent => 128,
        }
    }

    /// Returns whether the field may appear in a static subject rule.
    ///
    /// The domain component field is populated by a different part of the
    /// pipeline and therefore cannot be set through static rules.
    pub fn allows_static_value(self) -> bool {
        !matches!(self, RdnField::DomainComponent)
    }
}


//--- FromStr and Display

impl FromStr for RdnField {
    type Err = UnknownFieldError;

    /// Parses the field from its policy document spelling.
    ///
    /// Matching ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|field| {
            field.policy_name().eq_ignore_ascii_case(s)
        }).ok_or(UnknownFieldError)
    }
}

impl fmt::Display for RdnField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.policy_name())
    }
}


//------------ SanField ------------------------------------------------------

/// The kind of an entry of the Subject Alternative Name extension.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SanField {
    DnsName,
    Rfc822Name,
    IpAddress,
    UniformResourceIdentifier,
    UserPrincipalName,
}

impl SanField {
    /// All known SAN fields.
    pub const ALL: &'static [SanField] = &[
        SanField::DnsName,
        SanField::Rfc822Name,
        SanField::IpAddress,
        SanField::UniformResourceIdentifier,
        SanField::UserPrincipalName,
    ];

    /// Returns the field name used in policy documents.
    pub fn policy_name(self) -> &'static str {
        match self {
            SanField::DnsName => "dNSName",
            SanField::Rfc822Name => "rfc822Name",
            SanField::IpAddress => "iPAddress",
            SanField::UniformResourceIdentifier => {
                "uniformResourceIdentifier"
            }
            SanField::UserPrincipalName => "userPrincipalName",
        }
    }
}


//--- FromStr and Display

impl FromStr for SanField {
    type Err = UnknownFieldError;

    /// Parses the field from its policy document spelling.
    ///
    /// Matching ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|field| {
            field.policy_name().eq_ignore_ascii_case(s)
        }).ok_or(UnknownFieldError)
    }
}

impl fmt::Display for SanField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.policy_name())
    }
}


//============ Errors ========================================================

//------------ UnknownFieldError ---------------------------------------------

/// A field name did not refer to a known name component.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownFieldError;

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown name field")
    }
}

impl std::error::Error for UnknownFieldError { }


//============ Tests =========================================================
