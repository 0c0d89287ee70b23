//! Validation of certificate requests against the issuance policy.
//!
//! The engine is a chain of validators that the hosting CA runs in a fixed
//! order over every incoming request. All validators share one signature,
//! the [`Validator`] trait, and communicate exclusively through the
//! [`ValidationResult`] they are handed: a validator that finds the
//! request already denied returns without touching anything, so the
//! message of the first validator that rejected the request survives the
//! rest of the chain.
//!
//! This module provides the [`StaticContentValidator`], the stage that
//! merges policy declared content into the certificate being built. It
//! attaches the CRL Distribution Points and Authority Information Access
//! extensions and applies the static Subject and Subject Alternative Name
//! rules of the policy.
//!
//! No failure inside a validator is an error in the Rust sense. A rule
//! that cannot be applied denies the request on the result and evaluation
//! moves on to the next rule, so a single bad policy rule can never abort
//! evaluation of an otherwise valid request. Within one validator, the
//! message of the last failing rule is the one that ends up on the result.

use log::{debug, warn};
use crate::ext;
use crate::config::CaConfig;
use crate::name::{RdnField, SanField};
use crate::oid;
use crate::policy::{CertificateDatabaseRow, CertificateRequestPolicy};
use crate::result::{FailureStatus, ValidationResult};


//------------ RequestContext ------------------------------------------------

/// The read-only inputs shared by all validators of one evaluation.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    /// The issuance policy for the request's template.
    pub policy: &'a CertificateRequestPolicy,

    /// The attributes already recorded for the request.
    pub db_row: &'a CertificateDatabaseRow,

    /// The configuration of the hosting CA.
    pub ca_config: &'a dyn CaConfig,
}

impl<'a> RequestContext<'a> {
    /// Creates a new context from its parts.
    pub fn new(
        policy: &'a CertificateRequestPolicy,
        db_row: &'a CertificateDatabaseRow,
        ca_config: &'a dyn CaConfig,
    ) -> Self {
        RequestContext { policy, db_row, ca_config }
    }
}


//------------ Validator -----------------------------------------------------

/// A single stage of the validator chain.
///
/// Implementations must be stateless and reentrant: the context is read
/// only and the result is exclusive to the request being evaluated, so a
/// validator may be shared across threads without synchronization.
pub trait Validator {
    /// Evaluates the request, recording the outcome on `result`.
    ///
    /// An implementation must return without mutating anything if the
    /// result is already marked as denied.
    fn verify_request(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    );
}

/// Runs a chain of validators over one request in order.
pub fn run_validators(
    validators: &[&dyn Validator],
    ctx: &RequestContext,
    result: &mut ValidationResult,
) {
    for validator in validators {
        validator.verify_request(ctx, result)
    }
}


//------------ StaticContentValidator ----------------------------------------

/// The validator merging policy declared static content into the request.
pub struct StaticContentValidator;

impl Validator for StaticContentValidator {
    fn verify_request(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    ) {
        if result.is_denied() {
            return
        }
        self.insert_crl_distribution_points(ctx, result);
        self.insert_authority_info_access(ctx, result);
        self.apply_subject_rules(ctx, result);
        self.apply_san_rules(ctx, result);
    }
}

impl StaticContentValidator {
    /// Attaches the CRL Distribution Points extension.
    ///
    /// Nothing is attached, not even an empty extension, if the policy
    /// declares no distribution points.
    fn insert_crl_distribution_points(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    ) {
        if ctx.policy.crl_distribution_points.is_empty() {
            return
        }
        let uris: Vec<String> = ctx.policy.crl_distribution_points.iter(
        ).map(|template| {
            ctx.ca_config.replace_token_values(template)
        }).collect();
        result.set_extension(
            oid::CE_CRL_DISTRIBUTION_POINTS,
            ext::encode_crl_distribution_points(&uris),
        );
    }

    /// Attaches the Authority Information Access extension.
    ///
    /// The extension carries the CA issuer entries first and the OCSP
    /// entries after them. It is skipped if the policy declares neither.
    fn insert_authority_info_access(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    ) {
        if ctx.policy.authority_information_access.is_empty()
            && ctx.policy.online_certificate_status_protocol.is_empty()
        {
            return
        }
        let ca_issuers: Vec<String>
            = ctx.policy.authority_information_access.iter().map(
                |template| ctx.ca_config.replace_token_values(template)
            ).collect();
        let ocsp: Vec<String>
            = ctx.policy.online_certificate_status_protocol.iter().map(
                |template| ctx.ca_config.replace_token_values(template)
            ).collect();
        result.set_extension(
            oid::PE_AUTHORITY_INFO_ACCESS,
            ext::encode_authority_info_access(&ca_issuers, &ocsp),
        );
    }

    /// Applies the static Subject rules in policy order.
    ///
    /// Each rule is evaluated independently: a failing rule denies the
    /// request but evaluation of the remaining rules continues, so the
    /// message on the result names the last rule that failed.
    fn apply_subject_rules(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    ) {
        for rule in &ctx.policy.static_subject {
            let field = match rule.field.parse::<RdnField>() {
                Ok(field) if field.allows_static_value() => field,
                _ => {
                    warn!(
                        "static subject rule uses invalid field {:?}",
                        rule.field
                    );
                    result.set_failure(
                        FailureStatus::TemplateDenied,
                        format!(
                            "invalid field {} in static subject rules",
                            rule.field
                        ),
                    );
                    continue
                }
            };

            let length = rule.value.chars().count();
            if length > field.max_length() {
                warn!(
                    "static subject value for {} exceeds {} characters",
                    field, field.max_length()
                );
                result.set_failure(
                    FailureStatus::TemplateDenied,
                    format!(
                        "value {} for field {} exceeds the maximum \
                         length of {} characters (actual length {})",
                        rule.value, field, field.max_length(), length
                    ),
                );
                continue
            }

            // Without the force flag, an existing value wins. It may come
            // from the database row or from an earlier rule in this pass.
            if !rule.force
                && (ctx.db_row.has_subject_rdn(field)
                    || result.has_property(field.property_name()))
            {
                debug!(
                    "static subject rule for {} skipped, value present",
                    field
                );
                continue
            }

            result.add_property(field.property_name(), rule.value.clone());
        }
    }

    /// Applies the static Subject Alternative Name rules in policy order.
    ///
    /// SAN values receive no length validation here. The certification
    /// authority imposes no per-entry limit on them, unlike on Subject
    /// RDN values.
    fn apply_san_rules(
        &self, ctx: &RequestContext, result: &mut ValidationResult
    ) {
        for rule in &ctx.policy.static_subject_alternative_name {
            let field = match rule.field.parse::<SanField>() {
                Ok(field) => field,
                Err(_) => {
                    warn!(
                        "static SAN rule uses invalid field {:?}",
                        rule.field
                    );
                    result.set_failure(
                        FailureStatus::TemplateDenied,
                        format!(
                            "invalid field {} in static subject \
                             alternative name rules",
                            rule.field
                        ),
                    );
                    continue
                }
            };

            if !rule.force
                && result.subject_alternative_names().contains_field(field)
            {
                debug!(
                    "static SAN rule for {} skipped, entry present", field
                );
                continue
            }

            result.add_subject_alternative_name(field, rule.value.clone());
        }
    }
}


//============ Tests =========================================================
