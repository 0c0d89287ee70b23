//! The certificate request policy document.
//!
//! A [`CertificateRequestPolicy`] is authored by the administrator of a
//! certification authority and describes what the engine is allowed to do
//! with incoming requests: which revocation and issuer information to
//! attach and which Subject and Subject Alternative Name content to merge
//! in. The policy is loaded once and then shared read-only across all
//! request evaluations.
//!
//! The module also defines [`CertificateDatabaseRow`], the read-only view
//! of the name attributes an earlier enrollment step has already recorded
//! for the pending request.

use std::collections::HashMap;
use crate::name::RdnField;


//------------ CertificateRequestPolicy --------------------------------------

/// The issuance policy for one certificate template.
///
/// All URI entries are templates: they may contain placeholder tokens that
/// get replaced with CA specific values through
/// [`CaConfig::replace_token_values`][crate::config::CaConfig] before the
/// respective extension is built.
///
/// The policy is immutable for the duration of a request evaluation and
/// safe to share between concurrently evaluated requests.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CertificateRequestPolicy {
    /// URI templates for the CRL Distribution Points extension.
    pub crl_distribution_points: Vec<String>,

    /// URI templates for the CA issuer entries of the AIA extension.
    pub authority_information_access: Vec<String>,

    /// URI templates for the OCSP entries of the AIA extension.
    pub online_certificate_status_protocol: Vec<String>,

    /// Static content rules for the Subject.
    pub static_subject: Vec<StaticRule>,

    /// Static content rules for the Subject Alternative Name extension.
    pub static_subject_alternative_name: Vec<StaticRule>,
}

impl CertificateRequestPolicy {
    /// Creates a new, empty policy.
    ///
    /// An empty policy permits every request and adds nothing to it.
    pub fn new() -> Self {
        Self::default()
    }
}


//------------ StaticRule ----------------------------------------------------

/// A single static content rule.
///
/// The field is kept as the string from the policy document. Whether it
/// refers to a known name component is a property of the request
/// evaluation, not of loading the document: a rule with an unknown field
/// must surface as a denial, not as a load failure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct StaticRule {
    /// The name of the field the rule assigns a value to.
    pub field: String,

    /// The value to assign.
    pub value: String,

    /// Whether the value overrides one already present on the request.
    ///
    /// Without the force flag an existing value wins and the rule is
    /// silently skipped.
    pub force: bool,
}

impl StaticRule {
    /// Creates a new rule without the force flag.
    pub fn new(field: &str, value: &str) -> Self {
        StaticRule {
            field: field.into(),
            value: value.into(),
            force: false,
        }
    }

    /// Creates a new rule with the force flag set.
    pub fn forced(field: &str, value: &str) -> Self {
        StaticRule { force: true, ..Self::new(field, value) }
    }
}


//------------ CertificateDatabaseRow ----------------------------------------

/// The attributes already present on a pending request.
///
/// This is a read-only snapshot taken from the certificate database when
/// evaluation starts. The engine only ever asks it whether a Subject field
/// already carries a value; it never writes back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CertificateDatabaseRow {
    /// The Subject RDN values recorded for the request.
    subject_rdns: HashMap<RdnField, String>,
}

impl CertificateDatabaseRow {
    /// Creates a new row without any attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a Subject RDN value for the request.
    ///
    /// A value recorded earlier for the same field is replaced.
    pub fn insert_subject_rdn(
        &mut self, field: RdnField, value: impl Into<String>
    ) {
        self.subject_rdns.insert(field, value.into());
    }

    /// Returns the recorded value for a Subject RDN field, if any.
    pub fn subject_rdn(&self, field: RdnField) -> Option<&str> {
        self.subject_rdns.get(&field).map(String::as_str)
    }

    /// Returns whether a Subject RDN field already carries a value.
    pub fn has_subject_rdn(&self, field: RdnField) -> bool {
        self.subject_rdns.contains_key(&field)
    }
}

impl FromIterator<(RdnField, String)> for CertificateDatabaseRow {
    fn from_iter<T: IntoIterator<Item = (RdnField, String)>>(
        iter: T
    ) -> Self {
        CertificateDatabaseRow {
            subject_rdns: iter.into_iter().collect()
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn database_row() {
        let mut row = CertificateDatabaseRow::new();
        assert!(!row.has_subject_rdn(RdnField::CommonName));

        row.insert_subject_rdn(RdnField::CommonName, "My Server");
        assert!(row.has_subject_rdn(RdnField::CommonName));
        assert_eq!(
            row.subject_rdn(RdnField::CommonName),
            Some("My Server")
        );
        assert!(!row.has_subject_rdn(RdnField::CountryName));

        row.insert_subject_rdn(RdnField::CommonName, "Other");
        assert_eq!(row.subject_rdn(RdnField::CommonName), Some("Other"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_policy() {
        let policy: CertificateRequestPolicy = serde_json::from_str(
            r#"{
                "crlDistributionPoints": [
                    "http://crl.{CaName}.example/{CrlSuffix}.crl"
                ],
                "staticSubject": [
                    { "field": "organizationName", "value": "ACME" },
                    {
                        "field": "countryName",
                        "value": "DE",
                        "force": true
                    }
                ]
            }"#
        ).unwrap();
        assert_eq!(policy.crl_distribution_points.len(), 1);
        assert!(policy.authority_information_access.is_empty());
        assert_eq!(
            policy.static_subject,
            vec![
                StaticRule::new("organizationName", "ACME"),
                StaticRule::forced("countryName", "DE"),
            ]
        );
    }
}
