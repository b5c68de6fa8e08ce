//! Resolution strategy selector.
//!
//! The strategy is fixed per deployment. There is no runtime negotiation and
//! no fallback from one strategy to another.

use std::fmt;
use std::str::FromStr;

/// Which directory lookup the engine performs for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Cloud directory lookup of `onPremisesUserPrincipalName` by object id.
    #[default]
    CloudByObjectId,
    /// On-prem LDAP lookup by `sAMAccountName`.
    OnPremBySam,
    /// On-prem LDAP lookup by `mail`.
    OnPremByMail,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [
        Strategy::CloudByObjectId,
        Strategy::OnPremBySam,
        Strategy::OnPremByMail,
    ];

    /// Returns the configuration/label spelling of this strategy.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::CloudByObjectId => "cloud-object-id",
            Strategy::OnPremBySam => "onprem-sam",
            Strategy::OnPremByMail => "onprem-mail",
        }
    }

    /// True for the strategies that talk to the on-prem LDAP directory.
    pub const fn is_on_prem(&self) -> bool {
        matches!(self, Strategy::OnPremBySam | Strategy::OnPremByMail)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected one of: cloud-object-id, onprem-sam, onprem-mail)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| UnknownStrategy(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_strategies() {
        assert_eq!(
            "cloud-object-id".parse::<Strategy>().unwrap(),
            Strategy::CloudByObjectId
        );
        assert_eq!("onprem-sam".parse::<Strategy>().unwrap(), Strategy::OnPremBySam);
        assert_eq!(
            " ONPREM-MAIL ".parse::<Strategy>().unwrap(),
            Strategy::OnPremByMail
        );
    }

    #[test]
    fn test_parse_unknown_strategy() {
        let err = "ldap".parse::<Strategy>().unwrap_err();
        assert_eq!(err, UnknownStrategy("ldap".to_string()));
        assert!(err.to_string().contains("onprem-sam"));
    }

    #[test]
    fn test_display_matches_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_is_on_prem() {
        assert!(!Strategy::CloudByObjectId.is_on_prem());
        assert!(Strategy::OnPremBySam.is_on_prem());
        assert!(Strategy::OnPremByMail.is_on_prem());
    }
}
