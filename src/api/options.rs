//! Optional features of managing secrets, applied to the outgoing
//! parameter set before submission.

use std::time::Duration;

/// The flat key→value parameter collection sent with a request.
///
/// Keys are unique: setting a key that is already present replaces its
/// value, so the last write per key wins. Insertion order is preserved
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `key` to `value`, replacing any existing value for `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.0.push((key.to_string(), value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Optional modifier for a secret being created or generated.
///
/// Each variant sets exactly one key in the outgoing [`Params`]; applying
/// the same variant twice keeps the last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretOption {
    /// Make the secret expire after this duration. Sent to the service
    /// as whole seconds; fractional seconds are truncated.
    Ttl(Duration),

    /// Require this passphrase to retrieve the secret's value.
    Passphrase(String),

    /// Email a link to the secret (never the secret itself) to this
    /// address. The client must be authenticated for this to take effect.
    Recipient(String),
}

impl SecretOption {
    /// Write this option's key into the parameter set.
    pub fn apply(&self, params: &mut Params) {
        match self {
            SecretOption::Ttl(d) => params.set("ttl", d.as_secs().to_string()),
            SecretOption::Passphrase(phrase) => params.set("passphrase", phrase.clone()),
            SecretOption::Recipient(email) => params.set("recipient", email.clone()),
        }
    }
}

/// Apply a sequence of options in order.
pub(crate) fn apply_all(params: &mut Params, opts: &[SecretOption]) {
    for opt in opts {
        opt.apply(params);
    }
}
