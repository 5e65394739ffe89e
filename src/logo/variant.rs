//! Service variant classification and endpoint resolution.

use std::fmt;

/// Which logo website hosts a style template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceVariant {
    /// textpro.me, used when no other token matches.
    Textpro,
    /// ephoto360.com.
    Ephoto,
    /// photooxy.com.
    Photooxy,
    /// en.ephoto360.com.
    EnEphoto,
}

impl ServiceVariant {
    /// Classifies a free-form service token.
    ///
    /// Matching is case-insensitive and substring based, checked in order:
    /// ephoto360, photooxy, English ephoto360, then textpro as the default.
    #[must_use]
    pub fn classify(token: &str) -> Self {
        let token = token.to_lowercase();
        let contains_any = |needles: &[&str]| needles.iter().any(|n| token.contains(n));

        if contains_any(&["1", "ephoto", "ephoto360"]) {
            Self::Ephoto
        } else if contains_any(&["2", "potoxy", "photooxy"]) {
            Self::Photooxy
        } else if contains_any(&["3", "enphoto", "en360"]) {
            Self::EnEphoto
        } else {
            Self::Textpro
        }
    }

    /// Returns the base URL templates are attached to.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Textpro => "https://textpro.me/",
            Self::Ephoto => "https://ephoto360.com/",
            Self::Photooxy => "https://photooxy.com/",
            Self::EnEphoto => "https://en.ephoto360.com/",
        }
    }

    /// Returns a short lowercase name for logs and menus.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Textpro => "textpro",
            Self::Ephoto => "ephoto",
            Self::Photooxy => "photooxy",
            Self::EnEphoto => "en_ephoto",
        }
    }
}

impl fmt::Display for ServiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved template page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint(String);

impl ServiceEndpoint {
    /// Attaches a template id to the variant's base URL.
    #[must_use]
    pub fn resolve(variant: ServiceVariant, template: &str) -> Self {
        Self(format!("{}{template}.html", variant.base_url()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ephoto_tokens() {
        for token in ["1", "ephoto", "EPHOTO", "Ephoto360", "ephoto360"] {
            assert_eq!(ServiceVariant::classify(token), ServiceVariant::Ephoto, "{token}");
        }
    }

    #[test]
    fn test_classify_photooxy_tokens() {
        for token in ["2", "potoxy", "PhotoOxy"] {
            assert_eq!(ServiceVariant::classify(token), ServiceVariant::Photooxy, "{token}");
        }
    }

    #[test]
    fn test_classify_english_tokens() {
        for token in ["3", "enphoto", "EN360"] {
            assert_eq!(ServiceVariant::classify(token), ServiceVariant::EnEphoto, "{token}");
        }
    }

    #[test]
    fn test_classify_default() {
        for token in ["", "textpro", "anything"] {
            assert_eq!(ServiceVariant::classify(token), ServiceVariant::Textpro, "{token}");
        }
    }

    #[test]
    fn test_classify_is_substring_based() {
        // Earlier rules win when a token matches several.
        assert_eq!(ServiceVariant::classify("12"), ServiceVariant::Ephoto);
        assert_eq!(ServiceVariant::classify("my-ephoto-mirror"), ServiceVariant::Ephoto);
        assert_eq!(ServiceVariant::classify("v2"), ServiceVariant::Photooxy);
    }

    #[test]
    fn test_same_base_for_equivalent_tokens() {
        let bases: Vec<_> = ["1", "EPHOTO", "Ephoto360"]
            .iter()
            .map(|t| ServiceVariant::classify(t).base_url())
            .collect();
        assert!(bases.iter().all(|b| *b == "https://ephoto360.com/"));
    }

    #[test]
    fn test_resolve_endpoint() {
        let endpoint = ServiceEndpoint::resolve(ServiceVariant::classify("1"), "demo-1");
        assert_eq!(endpoint.as_str(), "https://ephoto360.com/demo-1.html");

        let endpoint = ServiceEndpoint::resolve(ServiceVariant::EnEphoto, "a/b-2");
        assert_eq!(endpoint.to_string(), "https://en.ephoto360.com/a/b-2.html");
    }
}
