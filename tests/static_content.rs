//! End-to-end checks of the static content stage.

use ca_policy::config::TokenValues;
use ca_policy::name::{RdnField, SanField};
use ca_policy::oid;
use ca_policy::policy::{
    CertificateDatabaseRow, CertificateRequestPolicy, StaticRule
};
use ca_policy::result::{FailureStatus, ValidationResult};
use ca_policy::validate::{
    RequestContext, StaticContentValidator, run_validators
};

fn ca_config() -> TokenValues {
    [
        ("{CaName}".to_string(), "Intermediate CA 1".to_string()),
        ("{ServerDnsName}".to_string(), "pki.example.org".to_string()),
    ].into_iter().collect()
}

#[test]
fn full_policy_applied_to_fresh_request() {
    let mut policy = CertificateRequestPolicy::new();
    policy.crl_distribution_points.push(
        "http://{ServerDnsName}/crl/{CaName}.crl".into()
    );
    policy.authority_information_access.push(
        "http://{ServerDnsName}/aia/{CaName}.crt".into()
    );
    policy.online_certificate_status_protocol.push(
        "http://{ServerDnsName}/ocsp".into()
    );
    policy.static_subject.push(
        StaticRule::new("organizationName", "ACME Corporation")
    );
    policy.static_subject.push(StaticRule::forced("countryName", "DE"));
    policy.static_subject_alternative_name.push(
        StaticRule::new("dNSName", "host.example.org")
    );

    let db_row = CertificateDatabaseRow::new();
    let ca_config = ca_config();
    let ctx = RequestContext::new(&policy, &db_row, &ca_config);
    let mut result = ValidationResult::new();
    run_validators(&[&StaticContentValidator], &ctx, &mut result);

    assert!(!result.is_denied());
    assert_eq!(result.failure_status(), None);
    assert_eq!(result.failure_message(), None);

    assert_eq!(result.extensions().len(), 2);
    assert!(result.extension(&oid::CE_CRL_DISTRIBUTION_POINTS).is_some());
    assert!(result.extension(&oid::PE_AUTHORITY_INFO_ACCESS).is_some());

    assert_eq!(
        result.properties().iter().map(|prop| {
            (prop.name(), prop.value())
        }).collect::<Vec<_>>(),
        vec![
            ("Subject.Organization", "ACME Corporation"),
            ("Subject.Country", "DE"),
        ]
    );
    assert_eq!(
        result.subject_alternative_names().names(),
        &[(SanField::DnsName, "host.example.org".to_string())]
    );
}

#[test]
fn empty_policy_changes_nothing() {
    let policy = CertificateRequestPolicy::new();
    let db_row = CertificateDatabaseRow::new();
    let ca_config = ca_config();
    let ctx = RequestContext::new(&policy, &db_row, &ca_config);
    let mut result = ValidationResult::new();
    run_validators(&[&StaticContentValidator], &ctx, &mut result);

    assert_eq!(result, ValidationResult::new());
}

#[test]
fn denied_request_passes_through_unchanged() {
    let mut policy = CertificateRequestPolicy::new();
    policy.crl_distribution_points.push(
        "http://{ServerDnsName}/crl/{CaName}.crl".into()
    );
    policy.static_subject.push(
        StaticRule::new("commonName", "Static Name")
    );

    let mut result = ValidationResult::new();
    result.set_failure(
        FailureStatus::TemplateDenied, "rejected by an earlier stage"
    );
    let before = result.clone();

    let db_row = CertificateDatabaseRow::new();
    let ca_config = ca_config();
    let ctx = RequestContext::new(&policy, &db_row, &ca_config);
    run_validators(&[&StaticContentValidator], &ctx, &mut result);

    assert_eq!(result, before);
}

#[test]
fn request_content_wins_without_force() {
    let mut policy = CertificateRequestPolicy::new();
    policy.static_subject.push(
        StaticRule::new("commonName", "Static Name")
    );
    policy.static_subject.push(
        StaticRule::forced("organizationName", "ACME")
    );

    let db_row: CertificateDatabaseRow = [
        (RdnField::CommonName, "Requested Name".to_string()),
        (RdnField::OrganizationName, "Requested Org".to_string()),
    ].into_iter().collect();

    let ca_config = ca_config();
    let ctx = RequestContext::new(&policy, &db_row, &ca_config);
    let mut result = ValidationResult::new();
    run_validators(&[&StaticContentValidator], &ctx, &mut result);

    assert!(!result.is_denied());
    assert_eq!(
        result.properties().iter().map(|prop| {
            (prop.name(), prop.value())
        }).collect::<Vec<_>>(),
        vec![("Subject.Organization", "ACME")]
    );
}

#[test]
fn denial_reports_template_denied_code() {
    let mut policy = CertificateRequestPolicy::new();
    policy.static_subject.push(
        StaticRule::new("domainComponent", "example")
    );

    let db_row = CertificateDatabaseRow::new();
    let ca_config = ca_config();
    let ctx = RequestContext::new(&policy, &db_row, &ca_config);
    let mut result = ValidationResult::new();
    run_validators(&[&StaticContentValidator], &ctx, &mut result);

    assert!(result.is_denied());
    let status = result.failure_status().unwrap();
    assert_eq!(status, FailureStatus::TemplateDenied);
    assert_eq!(status.code(), 0x8009_4012);
}
