//! Admission control for a certification authority.
//!
//! This crate implements the policy engine a certification authority runs
//! over incoming certificate requests before signing them. An
//! administrator authors a [`CertificateRequestPolicy`] per certificate
//! template; for each request the host assembles a
//! [`RequestContext`] and threads a [`ValidationResult`] through the
//! chain of [`Validator`]s. When the chain has finished, the result
//! either denies the request with a status code and message or carries
//! the Subject properties, Subject Alternative Name entries, and
//! certificate extensions to merge into the certificate.
//!
//! The crate provides the [`StaticContentValidator`], the stage that
//! merges policy declared static content, plus the supporting pieces:
//! the name component tables in [`name`], DER encoding of the attached
//! extensions in [`ext`], and IP subnet matching in [`addr`].
//!
//! [`CertificateRequestPolicy`]: policy::CertificateRequestPolicy
//! [`RequestContext`]: validate::RequestContext
//! [`ValidationResult`]: result::ValidationResult
//! [`Validator`]: validate::Validator
//! [`StaticContentValidator`]: validate::StaticContentValidator

pub mod addr;
pub mod config;
pub mod ext;
pub mod name;
pub mod oid;
pub mod policy;
pub mod result;
pub mod validate;
