//! Link classification.
//!
//! Picks legal-document links out of a page's anchors and tags each with a
//! [`DocumentType`]. Pure: no I/O, never fails.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::types::link::{Anchor, CandidateLink, DocumentType};

/// A link qualifies when any of these appear in its text or href.
pub const LEGAL_KEYWORDS: &[&str] = &[
    "terms",
    "conditions",
    "privacy",
    "policy",
    "agreement",
    "license",
    "legal",
    "disclaimer",
    "cookies",
];

/// Select and classify legal links.
///
/// Output is deduplicated by exact href (first occurrence wins) and keeps
/// input order.
pub fn classify_links<'a, I>(anchors: I) -> Vec<CandidateLink>
where
    I: IntoIterator<Item = &'a Anchor>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors {
        let Some(document_type) = classify_anchor(&anchor.text, &anchor.href) else {
            continue;
        };
        if !seen.insert(anchor.href.as_str()) {
            continue;
        }
        links.push(CandidateLink {
            url: anchor.href.clone(),
            display_text: anchor.text.trim().to_string(),
            document_type,
        });
    }

    tracing::debug!(candidates = links.len(), "Classified legal links");
    links
}

/// Classify one anchor, or `None` when it is not a legal link.
pub fn classify_anchor(text: &str, href: &str) -> Option<DocumentType> {
    let text = text.trim().to_lowercase();
    let href = href.to_lowercase();

    let is_legal = LEGAL_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword) || href.contains(keyword));

    is_legal.then(|| document_type(&text, &href))
}

/// Fixed priority: privacy, terms, cookie, license, generic.
fn document_type(text: &str, href: &str) -> DocumentType {
    let either = |needle: &str| text.contains(needle) || href.contains(needle);

    if either("privacy") {
        DocumentType::PrivacyPolicy
    } else if either("terms") {
        DocumentType::TermsOfService
    } else if either("cookie") {
        DocumentType::CookiePolicy
    } else if text.contains("eula") || href.contains("license") {
        DocumentType::LicenseAgreement
    } else {
        DocumentType::LegalDocument
    }
}

/// Collect every `a[href]` from page markup.
///
/// Hrefs are resolved against `page_url` the way a browser resolves
/// `a.href`; hrefs that do not resolve are kept verbatim.
pub fn anchors_from_markup(markup: &str, page_url: &Url) -> Vec<Anchor> {
    let document = Html::parse_document(markup);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let resolved = page_url
                .join(href.trim())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string());
            Some(Anchor::new(el.text().collect::<String>(), resolved))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(pairs: &[(&str, &str)]) -> Vec<CandidateLink> {
        let anchors: Vec<Anchor> = pairs.iter().map(|(t, h)| Anchor::new(*t, *h)).collect();
        classify_links(&anchors)
    }

    #[test]
    fn test_privacy_link_is_privacy_policy() {
        let links = classify(&[("Privacy Policy", "https://x.com/privacy")]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].document_type, DocumentType::PrivacyPolicy);
        assert_eq!(links[0].display_text, "Privacy Policy");
        assert_eq!(links[0].url, "https://x.com/privacy");
    }

    #[test]
    fn test_non_legal_link_is_excluded() {
        assert!(classify(&[("Read more", "https://x.com/about")]).is_empty());
    }

    #[test]
    fn test_privacy_beats_terms() {
        let links = classify(&[("Terms and Privacy", "https://x.com/legal")]);
        assert_eq!(links[0].document_type, DocumentType::PrivacyPolicy);
    }

    #[test]
    fn test_keyword_in_href_only() {
        let links = classify(&[("Read this", "https://x.com/TERMS-of-use")]);
        assert_eq!(links[0].document_type, DocumentType::TermsOfService);
    }

    #[test]
    fn test_cookie_and_license_types() {
        let links = classify(&[
            ("Cookies", "https://x.com/c"),
            ("EULA agreement", "https://x.com/e"),
            ("Software", "https://x.com/license"),
            ("Disclaimer", "https://x.com/d"),
        ]);
        let types: Vec<_> = links.iter().map(|l| l.document_type).collect();
        assert_eq!(
            types,
            vec![
                DocumentType::CookiePolicy,
                DocumentType::LicenseAgreement,
                DocumentType::LicenseAgreement,
                DocumentType::LegalDocument,
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let links = classify(&[
            ("Terms", "https://x.com/terms"),
            ("Privacy", "https://x.com/privacy"),
            ("Terms of Use (footer)", "https://x.com/terms"),
        ]);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].display_text, "Terms");
        assert_eq!(links[1].url, "https://x.com/privacy");
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let links = classify(&[
            ("Terms", "https://x.com/terms"),
            ("Terms", "https://x.com/Terms"),
        ]);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_empty_fields_do_not_panic() {
        assert!(classify(&[("", ""), ("   ", "")]).is_empty());
        assert_eq!(classify(&[("", "/legal")]).len(), 1);
    }

    #[test]
    fn test_anchors_from_markup_resolves_relative_hrefs() {
        let page = Url::parse("https://x.com/shop/item").unwrap();
        let html = r#"
            <a href="/privacy"> Privacy <b>Policy</b> </a>
            <a href="terms.html">Terms</a>
            <a>No href</a>
        "#;

        let anchors = anchors_from_markup(html, &page);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href, "https://x.com/privacy");
        assert_eq!(anchors[0].text.trim(), "Privacy Policy");
        assert_eq!(anchors[1].href, "https://x.com/shop/terms.html");
    }

    proptest! {
        #[test]
        fn prop_no_duplicate_hrefs(pairs in proptest::collection::vec(
            ("[a-zA-Z ]{0,12}", prop_oneof![
                Just("https://x.com/terms".to_string()),
                Just("https://x.com/privacy".to_string()),
                Just("https://x.com/legal".to_string()),
                "[a-z/]{0,10}",
            ]),
            0..20,
        )) {
            let anchors: Vec<Anchor> = pairs.iter().map(|(t, h)| Anchor::new(t.clone(), h.clone())).collect();
            let links = classify_links(&anchors);
            let unique: HashSet<&str> = links.iter().map(|l| l.url.as_str()).collect();
            prop_assert_eq!(unique.len(), links.len());
        }

        #[test]
        fn prop_privacy_and_terms_is_privacy(prefix in "[a-z ]{0,8}") {
            let text = format!("{prefix} terms privacy");
            prop_assert_eq!(classify_anchor(&text, ""), Some(DocumentType::PrivacyPolicy));
        }
    }
}
