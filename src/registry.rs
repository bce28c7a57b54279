// ABOUTME: Static registry of mini apps served by the portal.
// ABOUTME: Adding an app means adding an entry here plus a form/renderer module.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// Workflow name sent to the automation engine for this app.
    pub workflow: &'static str,
}

pub const ALL_APPS: &[AppInfo] = &[
    AppInfo {
        slug: "asin-keywords",
        title: "ASIN Keyword Analysis",
        category: "Amazon Tools",
        description: "Enter an ASIN to get a keyword analysis report",
        workflow: "asin-keywords",
    },
    AppInfo {
        slug: "asin-copywriter",
        title: "ASIN Listing Audit & Copy Pack",
        category: "Amazon Tools",
        description: "One-click listing rewrite pack for US-market ASINs: titles, bullets, description, A+ outline, image scripts, FAQ",
        workflow: "asin-copywriter",
    },
    AppInfo {
        slug: "brand-models",
        title: "Brand Host Model Lookup",
        category: "Product Research",
        description: "Look up air purifier filters by brand and their compatible host models",
        workflow: "brand-models-lookup",
    },
];

pub fn get_by_slug(slug: &str) -> Option<&'static AppInfo> {
    ALL_APPS.iter().find(|app| app.slug == slug)
}

/// Group apps by category, preserving registration order of both
/// categories and the apps within them.
pub fn by_category() -> Vec<(&'static str, Vec<&'static AppInfo>)> {
    let mut groups: Vec<(&'static str, Vec<&'static AppInfo>)> = Vec::new();
    for app in ALL_APPS {
        match groups.iter_mut().find(|(category, _)| *category == app.category) {
            Some((_, apps)) => apps.push(app),
            None => groups.push((app.category, vec![app])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_slug() {
        let app = get_by_slug("asin-copywriter").unwrap();
        assert_eq!(app.title, "ASIN Listing Audit & Copy Pack");
        assert_eq!(app.workflow, "asin-copywriter");

        assert!(get_by_slug("no-such-app").is_none());
    }

    #[test]
    fn test_by_category_preserves_order() {
        let groups = by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Amazon Tools");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[0].slug, "asin-keywords");
        assert_eq!(groups[1].0, "Product Research");
        assert_eq!(groups[1].1[0].slug, "brand-models");
    }

    #[test]
    fn test_slugs_are_unique() {
        for (i, a) in ALL_APPS.iter().enumerate() {
            for b in &ALL_APPS[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
