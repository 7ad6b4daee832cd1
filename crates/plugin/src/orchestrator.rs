//! Injection of the policy meta tag into a page's head.

use crate::config::{BuildEnv, PluginOptions};
use crate::hooks::RenderHooks;
use common::CspResult;
use csp_policy::{collect_elements, get_hashes, DirectiveMap, SCRIPT_SRC, STYLE_SRC};
use dom::{Component, Element};
use tracing::debug;

/// Header name of an enforcing policy.
pub const CSP_HEADER: &str = "Content-Security-Policy";
/// Header name of a policy that only reports violations.
pub const CSP_REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";

/// What a call to [`on_pre_render_html`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InjectOutcome {
    /// Development build with `disable_on_dev`; the head was left alone.
    Skipped,
    /// A meta tag was prepended to the head.
    Injected { header: &'static str, policy: String },
}

impl InjectOutcome {
    pub fn policy(&self) -> Option<&str> {
        match self {
            InjectOutcome::Skipped => None,
            InjectOutcome::Injected { policy, .. } => Some(policy),
        }
    }
}

/// Header name for the configured mode.
pub fn header_name(options: &PluginOptions) -> &'static str {
    if options.report_only {
        CSP_REPORT_ONLY_HEADER
    } else {
        CSP_HEADER
    }
}

/// Build the final directive set for a page's components.
pub fn build_directives(
    head: &[Component],
    post_body: &[Component],
    pre_body: &[Component],
    options: &PluginOptions,
) -> DirectiveMap {
    let components = collect_elements(head, post_body, pre_body);

    let mut directives =
        DirectiveMap::merge(options.merge_default_directives, options.directives.as_ref());

    let script_hashes = if options.merge_script_hashes {
        get_hashes(components.iter().copied(), "script")
    } else {
        String::new()
    };
    directives.augment_with_hashes(SCRIPT_SRC, options.merge_script_hashes, &script_hashes);

    let style_hashes = if options.merge_style_hashes {
        get_hashes(components.iter().copied(), "style")
    } else {
        String::new()
    };
    directives.augment_with_hashes(STYLE_SRC, options.merge_style_hashes, &style_hashes);

    directives
}

/// Prepend a policy meta tag to the page head.
///
/// Runs once per page just before HTML is written. In a development build
/// with `disable_on_dev` set, nothing happens. Otherwise the head is
/// replaced by `[meta, ...original head]`, original nesting preserved.
pub fn on_pre_render_html<H>(
    hooks: &mut H,
    options: &PluginOptions,
    env: BuildEnv,
) -> CspResult<InjectOutcome>
where
    H: RenderHooks + ?Sized,
{
    if env.is_development() && options.disable_on_dev {
        debug!("CSP injection disabled in development");
        return Ok(InjectOutcome::Skipped);
    }

    let directives = build_directives(
        hooks.head_components(),
        hooks.post_body_components(),
        hooks.pre_body_components(),
        options,
    );
    let policy = directives.to_policy_string();
    let header = header_name(options);

    debug!("Injecting {} with {} directives: {}", header, directives.len(), policy);

    let meta = Component::Element(Element::meta_csp(header, &policy));
    let mut head = Vec::with_capacity(hooks.head_components().len() + 1);
    head.push(meta);
    head.extend(hooks.head_components().iter().cloned());

    hooks.replace_head_components(head);

    Ok(InjectOutcome::Injected { header, policy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::PageComponents;

    const SCRIPT_HASH: &str = "'sha256-k/DQXB/erwBhWpQiHNhJ6pPOWl0Z4TCTH8V2ZjeiG7M='";
    const STYLE_HASH: &str = "'sha256-IAdwN3biDCQ3brrgp1m8kBEsPQYyqfREKOEfeoREopc='";

    /// Hooks that count head replacements.
    #[derive(Default)]
    struct CountingHooks {
        page: PageComponents,
        replacements: usize,
    }

    impl RenderHooks for CountingHooks {
        fn head_components(&self) -> &[Component] {
            &self.page.head
        }
        fn pre_body_components(&self) -> &[Component] {
            &self.page.pre_body
        }
        fn post_body_components(&self) -> &[Component] {
            &self.page.post_body
        }
        fn replace_head_components(&mut self, components: Vec<Component>) {
            self.replacements += 1;
            self.page.head = components;
        }
    }

    fn sample_page() -> PageComponents {
        PageComponents {
            head: vec![
                Element::tag("title").with_inner_html("Home").into(),
                Component::List(vec![Element::inline_style("body{margin:0}").into()]),
            ],
            pre_body: vec![],
            post_body: vec![
                Element::inline_script("console.log('x')").into(),
                Element::external_script("/app.js").into(),
            ],
        }
    }

    fn meta_of(page: &PageComponents) -> &Element {
        page.head[0].as_element().expect("meta element first")
    }

    #[test]
    fn test_injects_meta_first() {
        let mut page = sample_page();
        let original_head = page.head.clone();

        let outcome =
            on_pre_render_html(&mut page, &PluginOptions::default(), BuildEnv::Production).unwrap();

        assert_eq!(page.head.len(), original_head.len() + 1);
        assert_eq!(&page.head[1..], &original_head[..]);

        let meta = meta_of(&page);
        assert_eq!(meta.tag, "meta");
        assert_eq!(meta.get_attribute("http-equiv"), Some(CSP_HEADER));
        assert_eq!(meta.get_attribute("content"), outcome.policy());
    }

    #[test]
    fn test_policy_contains_hashes() {
        let mut page = sample_page();
        let outcome =
            on_pre_render_html(&mut page, &PluginOptions::default(), BuildEnv::Production).unwrap();

        let expected = format!(
            "base-uri 'self'; default-src 'self'; script-src 'self' {}; style-src 'self' {}; \
             object-src 'none'; form-action 'self'; font-src 'self' data:; connect-src 'self'; \
             img-src 'self' data:;",
            SCRIPT_HASH, STYLE_HASH
        );
        assert_eq!(outcome.policy(), Some(expected.as_str()));
    }

    #[test]
    fn test_skipped_in_development() {
        let mut hooks = CountingHooks {
            page: sample_page(),
            replacements: 0,
        };
        let original = hooks.page.clone();

        let outcome =
            on_pre_render_html(&mut hooks, &PluginOptions::default(), BuildEnv::Development)
                .unwrap();

        assert_eq!(outcome, InjectOutcome::Skipped);
        assert_eq!(hooks.replacements, 0);
        assert_eq!(hooks.page, original);
    }

    #[test]
    fn test_runs_in_development_when_enabled() {
        let mut hooks = CountingHooks::default();
        let options = PluginOptions::default().with_disable_on_dev(false);

        let outcome = on_pre_render_html(&mut hooks, &options, BuildEnv::Development).unwrap();

        assert!(matches!(outcome, InjectOutcome::Injected { .. }));
        assert_eq!(hooks.replacements, 1);
        assert_eq!(hooks.page.head.len(), 1);
    }

    #[test]
    fn test_report_only_header() {
        let mut page = sample_page();
        let options = PluginOptions::default().with_report_only(true);

        on_pre_render_html(&mut page, &options, BuildEnv::Production).unwrap();

        assert_eq!(
            meta_of(&page).get_attribute("http-equiv"),
            Some(CSP_REPORT_ONLY_HEADER)
        );
    }

    #[test]
    fn test_hash_merging_disabled() {
        let page = sample_page();
        let options = PluginOptions::default()
            .with_script_hashes(false)
            .with_style_hashes(false);

        let directives = build_directives(&page.head, &page.post_body, &page.pre_body, &options);
        assert_eq!(directives, DirectiveMap::defaults());
    }

    #[test]
    fn test_hash_flags_apply_per_directive() {
        let page = sample_page();
        let options = PluginOptions::default().with_script_hashes(false);

        let directives = build_directives(&page.head, &page.post_body, &page.pre_body, &options);
        assert_eq!(directives.get("script-src"), Some("'self'"));
        assert_eq!(
            directives.get("style-src"),
            Some(format!("'self' {}", STYLE_HASH).as_str())
        );
    }

    #[test]
    fn test_user_directives_replace_before_hashing() {
        let page = sample_page();
        let user: DirectiveMap = [("script-src", "https://cdn.example.com")].into_iter().collect();
        let options = PluginOptions::default()
            .with_directives(user)
            .with_style_hashes(false);

        let directives = build_directives(&page.head, &page.post_body, &page.pre_body, &options);
        assert_eq!(
            directives.get("script-src"),
            Some(format!("https://cdn.example.com {}", SCRIPT_HASH).as_str())
        );
        assert_eq!(directives.get("style-src"), Some("'self'"));
    }

    #[test]
    fn test_without_defaults_only_hashed_directives() {
        let options = PluginOptions::default().with_default_directives(false);
        let head: Vec<Component> = vec![Element::inline_script("console.log('x')").into()];

        let directives = build_directives(&head, &[], &[], &options);
        assert_eq!(
            directives.to_policy_string(),
            format!("script-src  {}; style-src  ;", SCRIPT_HASH)
        );
    }

    #[test]
    fn test_empty_directive_omitted() {
        let mut page = PageComponents::new();
        let user: DirectiveMap = [("object-src", "")].into_iter().collect();
        let options = PluginOptions::default().with_directives(user);

        let outcome = on_pre_render_html(&mut page, &options, BuildEnv::Production).unwrap();
        assert!(!outcome.policy().unwrap().contains("object-src"));
    }
}
