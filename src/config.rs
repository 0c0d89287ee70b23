//! Access to the configuration of the certification authority.
//!
//! URI entries in a policy document are templates. They may contain
//! placeholder tokens for values only the hosting CA knows, such as its
//! own name or the DNS name of the server it runs on. The [`CaConfig`]
//! trait is the seam through which the engine asks the host to substitute
//! these tokens; [`TokenValues`] is a plain map-backed implementation for
//! hosts that have their values at hand.

use std::collections::HashMap;


//------------ CaConfig ------------------------------------------------------

/// The CA specific configuration values the engine depends on.
pub trait CaConfig {
    /// Replaces all placeholder tokens in a URI template.
    ///
    /// The substitution is total: any input string maps to an output
    /// string. Tokens without a configured value are left in place.
    fn replace_token_values(&self, template: &str) -> String;
}


//------------ TokenValues ---------------------------------------------------

/// A token substitution map.
///
/// Each entry maps a literal token, e.g. `"{CaName}"`, to its replacement
/// text. Substitution replaces every occurrence of every token.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenValues {
    tokens: HashMap<String, String>,
}

impl TokenValues {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token and its replacement.
    pub fn insert(
        &mut self, token: impl Into<String>, value: impl Into<String>
    ) {
        self.tokens.insert(token.into(), value.into());
    }
}

impl CaConfig for TokenValues {
    fn replace_token_values(&self, template: &str) -> String {
        let mut res = template.to_string();
        for (token, value) in &self.tokens {
            res = res.replace(token, value);
        }
        res
    }
}

impl FromIterator<(String, String)> for TokenValues {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(
        iter: T
    ) -> Self {
        TokenValues { tokens: iter.into_iter().collect() }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replace_tokens() {
        let mut tokens = TokenValues::new();
        tokens.insert("{CaName}", "Example CA");
        tokens.insert("{ServerDnsName}", "ca.example.org");

        assert_eq!(
            tokens.replace_token_values(
                "http://{ServerDnsName}/crl/{CaName}.crl"
            ),
            "http://ca.example.org/crl/Example CA.crl"
        );

        // Unknown tokens stay, substitution never fails.
        assert_eq!(
            tokens.replace_token_values("ldap://{Unset}/cdp"),
            "ldap://{Unset}/cdp"
        );
        assert_eq!(tokens.replace_token_values(""), "");
    }
}
