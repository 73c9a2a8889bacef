//! Link types - anchors from a scanned page and the legal links found among them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An anchor as reported by the page scanner.
///
/// Either field may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Visible link text
    pub text: String,

    /// Link target, resolved the way a browser resolves `a.href`
    pub href: String,
}

impl Anchor {
    /// Create a new anchor.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Kind of legal document a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    PrivacyPolicy,
    TermsOfService,
    CookiePolicy,
    LicenseAgreement,
    LegalDocument,
}

impl DocumentType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => "Privacy Policy",
            Self::TermsOfService => "Terms of Service",
            Self::CookiePolicy => "Cookie Policy",
            Self::LicenseAgreement => "License Agreement",
            Self::LegalDocument => "Legal Document",
        }
    }

    /// How prominently a link of this type is shown.
    pub fn priority(&self) -> Priority {
        match self {
            Self::PrivacyPolicy | Self::TermsOfService => Priority::High,
            Self::CookiePolicy => Priority::Medium,
            Self::LicenseAgreement | Self::LegalDocument => Priority::Low,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display priority of a document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A link judged to reference a legal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLink {
    /// Document URL (the anchor's href, unchanged)
    pub url: String,

    /// Trimmed anchor text
    pub display_text: String,

    /// Classified document type
    pub document_type: DocumentType,
}
