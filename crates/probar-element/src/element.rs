//! Locator-addressed document nodes.
//!
//! An [`Element`] never holds a live node handle. It keeps a [`Locator`] and
//! the collaborators needed to evaluate it, and every call re-resolves the
//! locator through the driver. Searches compose the element's locator with
//! the translated relative selector (see [`crate::locator::compose`]) and
//! mint new elements through the factory.

use crate::config::ElementConfig;
use crate::driver::Driver;
use crate::event::{Key, KeyModifier};
use crate::factory::ElementFactory;
use crate::locator::Locator;
use crate::result::{DriverResult, ProbarError, ProbarResult};
use crate::select::OptionResolver;
use crate::selector::{NamedTarget, SelectorArgs, SelectorKind, SelectorTranslator};
use crate::wait::{WaitOutcome, WaitResult, Waiter};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// One addressed node
#[derive(Clone)]
pub struct Element {
    locator: Locator,
    driver: Rc<dyn Driver>,
    selectors: Rc<dyn SelectorTranslator>,
    factory: Rc<dyn ElementFactory>,
    config: ElementConfig,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("locator", &self.locator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WaitOutcome for Element {
    fn is_satisfied(&self) -> bool {
        true
    }
}

impl Element {
    /// Create an element with default configuration
    #[must_use]
    pub fn new(
        locator: impl Into<Locator>,
        driver: Rc<dyn Driver>,
        selectors: Rc<dyn SelectorTranslator>,
        factory: Rc<dyn ElementFactory>,
    ) -> Self {
        Self {
            locator: locator.into(),
            driver,
            selectors,
            factory,
            config: ElementConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ElementConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &ElementConfig {
        &self.config
    }

    /// Get the locator addressing this element
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Get the driver
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Translate a selector into a raw locator
    pub fn resolve_selector(
        &self,
        kind: SelectorKind,
        args: impl Into<SelectorArgs>,
    ) -> ProbarResult<Locator> {
        self.selectors.selector_to_locator(kind, &args.into())
    }

    /// Check that the locator matches exactly one node
    pub fn is_valid(&self) -> DriverResult<bool> {
        Ok(self.driver.find(&self.locator)?.len() == 1)
    }

    /// Find the first descendant matching a selector
    pub fn find(
        &self,
        kind: SelectorKind,
        args: impl Into<SelectorArgs>,
    ) -> ProbarResult<Option<Element>> {
        let scoped = self.scoped(kind, args.into())?;
        let first = self.driver.find(&scoped)?.into_iter().next();
        tracing::debug!(
            target: "probar::element",
            locator = %scoped,
            found = first.is_some(),
            "find"
        );
        Ok(first.map(|node| self.mint(node)))
    }

    /// Find every descendant matching a selector, in driver order
    pub fn find_all(
        &self,
        kind: SelectorKind,
        args: impl Into<SelectorArgs>,
    ) -> ProbarResult<Vec<Element>> {
        let scoped = self.scoped(kind, args.into())?;
        let nodes = self.driver.find(&scoped)?;
        tracing::debug!(
            target: "probar::element",
            locator = %scoped,
            count = nodes.len(),
            "find_all"
        );
        Ok(nodes.into_iter().map(|node| self.mint(node)).collect())
    }

    /// Check if a descendant matches a selector
    pub fn has(&self, kind: SelectorKind, args: impl Into<SelectorArgs>) -> ProbarResult<bool> {
        Ok(self.find(kind, args)?.is_some())
    }

    /// Get the parent element
    pub fn parent(&self) -> ProbarResult<Option<Element>> {
        self.find(SelectorKind::XPath, "..")
    }

    /// Find a descendant by id
    pub fn find_by_id(&self, id: &str) -> ProbarResult<Option<Element>> {
        self.find(
            SelectorKind::NamedExact,
            SelectorArgs::named(NamedTarget::Id, id),
        )
    }

    /// Find a named descendant, trying an exact match before a partial one
    pub fn find_named(&self, target: NamedTarget, text: &str) -> ProbarResult<Option<Element>> {
        for kind in [SelectorKind::NamedExact, SelectorKind::NamedPartial] {
            if let Some(found) = self.find(kind, SelectorArgs::named(target, text))? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Find a link by id, text or title
    pub fn find_link(&self, locator: &str) -> ProbarResult<Option<Element>> {
        self.find_named(NamedTarget::Link, locator)
    }

    /// Find a button by id, value, text or title
    pub fn find_button(&self, locator: &str) -> ProbarResult<Option<Element>> {
        self.find_named(NamedTarget::Button, locator)
    }

    /// Find a form field by id, name, placeholder or label
    pub fn find_field(&self, locator: &str) -> ProbarResult<Option<Element>> {
        self.find_named(NamedTarget::Field, locator)
    }

    /// Check if a link exists
    pub fn has_link(&self, locator: &str) -> ProbarResult<bool> {
        Ok(self.find_link(locator)?.is_some())
    }

    /// Check if a button exists
    pub fn has_button(&self, locator: &str) -> ProbarResult<bool> {
        Ok(self.find_button(locator)?.is_some())
    }

    /// Check if a form field exists
    pub fn has_field(&self, locator: &str) -> ProbarResult<bool> {
        Ok(self.find_field(locator)?.is_some())
    }

    /// Click a link
    pub fn click_link(&self, locator: &str) -> ProbarResult<()> {
        self.require(NamedTarget::Link, locator)?.click()?;
        Ok(())
    }

    /// Press a button
    pub fn press_button(&self, locator: &str) -> ProbarResult<()> {
        self.require(NamedTarget::Button, locator)?.press()?;
        Ok(())
    }

    /// Set the value of a form field
    pub fn fill_field(&self, locator: &str, value: &str) -> ProbarResult<()> {
        self.require(NamedTarget::Field, locator)?.set_value(value)?;
        Ok(())
    }

    /// Check a checkbox field
    pub fn check_field(&self, locator: &str) -> ProbarResult<()> {
        self.require(NamedTarget::Field, locator)?.check()?;
        Ok(())
    }

    /// Uncheck a checkbox field
    pub fn uncheck_field(&self, locator: &str) -> ProbarResult<()> {
        self.require(NamedTarget::Field, locator)?.uncheck()?;
        Ok(())
    }

    /// Select an option of a select field
    pub fn select_field_option(
        &self,
        locator: &str,
        option: &str,
        multiple: bool,
    ) -> ProbarResult<()> {
        self.require(NamedTarget::Field, locator)?
            .select_option(option, multiple)
    }

    /// Attach a file to a file field
    pub fn attach_file_to_field(&self, locator: &str, path: &Path) -> ProbarResult<()> {
        self.require(NamedTarget::Field, locator)?.attach_file(path)?;
        Ok(())
    }

    fn require(&self, target: NamedTarget, text: &str) -> ProbarResult<Element> {
        self.find_named(target, text)?
            .ok_or_else(|| ProbarError::not_found(target.description(), text))
    }

    fn scoped(&self, kind: SelectorKind, args: SelectorArgs) -> ProbarResult<Locator> {
        let relative = self.selectors.selector_to_locator(kind, &args)?;
        Ok(self.locator.join(&relative))
    }

    fn mint(&self, node: Locator) -> Element {
        Rc::clone(&self.factory).create_element(
            node,
            Rc::clone(&self.driver),
            Rc::clone(&self.selectors),
        )
    }

    // =========================================================================
    // Waiting and selection
    // =========================================================================

    /// Poll `predicate` against this element until it returns a satisfied
    /// value or `timeout_ms` elapses, and return its last value.
    ///
    /// Timing out is not an error; inspect the returned value. The poll
    /// interval comes from the element's [`ElementConfig`].
    ///
    /// The predicate must be callable, which the compiler enforces:
    ///
    /// ```compile_fail
    /// # use probar_element::Element;
    /// # fn demo(element: &Element) {
    /// let _ = element.wait_for(5000, "not a callable");
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`ProbarError::ContractViolation`] when the configured poll interval
    /// is zero, before the predicate runs.
    pub fn wait_for<T, F>(&self, timeout_ms: u64, mut predicate: F) -> ProbarResult<T>
    where
        T: WaitOutcome,
        F: FnMut(&Element) -> T,
    {
        let options = self.config.wait.with_timeout(timeout_ms);
        Waiter::with_options(options)
            .poll(|| predicate(self))
            .map(WaitResult::into_value)
    }

    /// Select an option of this control by value or text
    pub fn select_option(&self, text: &str, multiple: bool) -> ProbarResult<()> {
        OptionResolver::new(self).select(text, multiple)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Visible text
    pub fn text(&self) -> DriverResult<String> {
        self.driver.text(&self.locator)
    }

    /// Inner HTML
    pub fn html(&self) -> DriverResult<String> {
        self.driver.html(&self.locator)
    }

    /// Outer HTML
    pub fn outer_html(&self) -> DriverResult<String> {
        self.driver.outer_html(&self.locator)
    }

    /// Attribute value, `None` when absent
    pub fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        self.driver.attribute(&self.locator, name)
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, name: &str) -> DriverResult<bool> {
        Ok(self.attribute(name)?.is_some())
    }

    /// Check if the `class` attribute lists `class`
    pub fn has_class(&self, class: &str) -> DriverResult<bool> {
        Ok(self
            .attribute("class")?
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)))
    }

    /// Form value
    pub fn value(&self) -> DriverResult<Option<String>> {
        self.driver.value(&self.locator)
    }

    /// Tag name
    pub fn tag_name(&self) -> DriverResult<String> {
        self.driver.tag_name(&self.locator)
    }

    /// Check visibility
    pub fn is_visible(&self) -> DriverResult<bool> {
        self.driver.is_visible(&self.locator)
    }

    /// Check if checked
    pub fn is_checked(&self) -> DriverResult<bool> {
        self.driver.is_checked(&self.locator)
    }

    /// Check if selected
    pub fn is_selected(&self) -> DriverResult<bool> {
        self.driver.is_selected(&self.locator)
    }

    // =========================================================================
    // Mutations and interactions
    // =========================================================================

    /// Set the form value
    pub fn set_value(&self, value: &str) -> DriverResult<()> {
        self.driver.set_value(&self.locator, value)
    }

    /// Click
    pub fn click(&self) -> DriverResult<()> {
        self.driver.click(&self.locator)
    }

    /// Press a button (a click)
    pub fn press(&self) -> DriverResult<()> {
        self.click()
    }

    /// Right click
    pub fn right_click(&self) -> DriverResult<()> {
        self.driver.right_click(&self.locator)
    }

    /// Double click
    pub fn double_click(&self) -> DriverResult<()> {
        self.driver.double_click(&self.locator)
    }

    /// Check a checkbox or radio
    pub fn check(&self) -> DriverResult<()> {
        self.driver.check(&self.locator)
    }

    /// Uncheck a checkbox
    pub fn uncheck(&self) -> DriverResult<()> {
        self.driver.uncheck(&self.locator)
    }

    /// Attach a file
    pub fn attach_file(&self, path: &Path) -> DriverResult<()> {
        self.driver.attach_file(&self.locator, path)
    }

    /// Focus
    pub fn focus(&self) -> DriverResult<()> {
        self.driver.focus(&self.locator)
    }

    /// Blur
    pub fn blur(&self) -> DriverResult<()> {
        self.driver.blur(&self.locator)
    }

    /// Hover
    pub fn mouse_over(&self) -> DriverResult<()> {
        self.driver.mouse_over(&self.locator)
    }

    /// Drag this element onto `target`
    pub fn drag_to(&self, target: &Element) -> DriverResult<()> {
        self.driver.drag_to(&self.locator, target.locator())
    }

    /// Key press
    pub fn key_press(&self, key: impl Into<Key>, modifier: Option<KeyModifier>) -> DriverResult<()> {
        self.driver.key_press(&self.locator, key.into(), modifier)
    }

    /// Key down
    pub fn key_down(&self, key: impl Into<Key>, modifier: Option<KeyModifier>) -> DriverResult<()> {
        self.driver.key_down(&self.locator, key.into(), modifier)
    }

    /// Key up
    pub fn key_up(&self, key: impl Into<Key>, modifier: Option<KeyModifier>) -> DriverResult<()> {
        self.driver.key_up(&self.locator, key.into(), modifier)
    }

    /// Submit the enclosing form
    pub fn submit(&self) -> DriverResult<()> {
        self.driver.submit_form(&self.locator)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::factory::DefaultElementFactory;
    use crate::result::DriverError;
    use crate::selector::SelectorsHandler;
    use std::cell::{Cell, RefCell};
    use std::time::{Duration, Instant};

    /// Translator that echoes expressions and records every request
    #[derive(Default)]
    struct EchoSelectors {
        requests: RefCell<Vec<(SelectorKind, SelectorArgs)>>,
        named: Option<String>,
    }

    impl EchoSelectors {
        fn named_as(expr: &str) -> Self {
            Self {
                named: Some(expr.to_string()),
                ..Self::default()
            }
        }
    }

    impl SelectorTranslator for EchoSelectors {
        fn selector_to_locator(
            &self,
            kind: SelectorKind,
            args: &SelectorArgs,
        ) -> ProbarResult<Locator> {
            self.requests.borrow_mut().push((kind, args.clone()));
            match args {
                SelectorArgs::Expression(expr) => Ok(Locator::new(expr.clone())),
                SelectorArgs::Named { target, .. } => Ok(Locator::new(
                    self.named
                        .clone()
                        .unwrap_or_else(|| target.as_str().to_string()),
                )),
            }
        }
    }

    /// Factory that counts what it mints
    #[derive(Default)]
    struct CountingFactory {
        minted: Cell<usize>,
    }

    impl ElementFactory for CountingFactory {
        fn create_element(
            self: Rc<Self>,
            node: Locator,
            driver: Rc<dyn Driver>,
            selectors: Rc<dyn SelectorTranslator>,
        ) -> Element {
            self.minted.set(self.minted.get() + 1);
            Element::new(node, driver, selectors, self)
        }
    }

    struct Fixture {
        driver: Rc<MockDriver>,
        selectors: Rc<EchoSelectors>,
        factory: Rc<CountingFactory>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_selectors(EchoSelectors::default())
        }

        fn with_selectors(selectors: EchoSelectors) -> Self {
            Self {
                driver: Rc::new(MockDriver::new()),
                selectors: Rc::new(selectors),
                factory: Rc::new(CountingFactory::default()),
            }
        }

        fn element(&self, locator: &str) -> Element {
            Element::new(
                locator,
                self.driver.clone(),
                self.selectors.clone(),
                self.factory.clone(),
            )
        }
    }

    mod identity_tests {
        use super::*;

        #[test]
        fn test_locator_is_stored_unchanged() {
            let fx = Fixture::new();
            let node = fx.element("some custom xpath");
            assert_eq!(node.locator(), "some custom xpath");
            assert_ne!(node.locator(), "not some custom xpath");
        }

        #[test]
        fn test_is_valid_with_one_match() {
            let fx = Fixture::new();
            fx.driver.on_find("some xpath", ["some xpath"]);
            assert!(fx.element("some xpath").is_valid().unwrap());
            assert_eq!(fx.driver.history(), vec!["find:some xpath"]);
        }

        #[test]
        fn test_is_invalid_with_zero_or_many_matches() {
            let fx = Fixture::new();
            fx.driver.on_find("some xpath", Vec::<&str>::new());
            fx.driver.on_find("some xpath", ["xpath1", "xpath2"]);
            let node = fx.element("some xpath");
            assert!(!node.is_valid().unwrap(), "no elements found is invalid");
            assert!(!node.is_valid().unwrap(), "more than one element is invalid");
            assert_eq!(fx.driver.calls_to("find"), 2);
        }

        #[test]
        fn test_debug_shows_locator() {
            let fx = Fixture::new();
            assert!(format!("{:?}", fx.element("//h1")).contains("//h1"));
        }
    }

    mod traversal_tests {
        use super::*;

        #[test]
        fn test_parent_composes_parent_axis() {
            let fx = Fixture::new();
            fx.driver.on_find("elem/..", ["parent xpath"]);
            let parent = fx.element("elem").parent().unwrap().expect("parent");
            assert_eq!(parent.locator(), "parent xpath");
            assert_eq!(
                fx.selectors.requests.borrow().as_slice(),
                &[(SelectorKind::XPath, SelectorArgs::expr(".."))]
            );
            assert_eq!(fx.factory.minted.get(), 1);
        }

        #[test]
        fn test_find_returns_none_without_minting() {
            let fx = Fixture::new();
            assert!(fx.element("elem").find(SelectorKind::XPath, "a").unwrap().is_none());
            assert_eq!(fx.factory.minted.get(), 0);
        }

        #[test]
        fn test_find_mints_first_match_only() {
            let fx = Fixture::new();
            fx.driver.on_find("ul/li", ["(ul/li)[1]", "(ul/li)[2]"]);
            let first = fx.element("ul").find(SelectorKind::XPath, "li").unwrap().unwrap();
            assert_eq!(first.locator(), "(ul/li)[1]");
            assert_eq!(fx.factory.minted.get(), 1);
        }

        #[test]
        fn test_find_all_union_relative() {
            let fx = Fixture::new();
            let xpath = "some_tag1 | some_tag2[@foo =\n 'bar|']\n | some_tag3[foo | bar]";
            let expected =
                "some_xpath/some_tag1 | some_xpath/some_tag2[@foo =\n 'bar|'] | some_xpath/some_tag3[foo | bar]";
            fx.driver.on_find(expected, ["node1", "node2", "node3"]);

            let found = fx.element("some_xpath").find_all(SelectorKind::XPath, xpath).unwrap();
            let locators: Vec<_> = found.iter().map(|e| e.locator().as_str()).collect();
            assert_eq!(locators, vec!["node1", "node2", "node3"]);
            assert_eq!(fx.factory.minted.get(), 3);
        }

        #[test]
        fn test_find_all_union_base() {
            let fx = Fixture::new();
            let expected = "(some_xpath | another_xpath)/some_tag1 | (some_xpath | another_xpath)/some_tag2";
            fx.driver.on_find(expected, ["node1", "node2", "node3"]);

            let found = fx
                .element("some_xpath | another_xpath")
                .find_all(SelectorKind::XPath, "some_tag1 | some_tag2")
                .unwrap();
            assert_eq!(found.len(), 3);
            assert_eq!(fx.driver.history(), vec![format!("find:{expected}")]);
        }

        #[test]
        fn test_derived_elements_share_collaborators() {
            let fx = Fixture::new();
            fx.driver.on_find("form/input", ["(form/input)[1]"]);
            let input = fx.element("form").find(SelectorKind::XPath, "input").unwrap().unwrap();
            input.click().unwrap();
            assert!(fx.driver.history().contains(&"click:(form/input)[1]".to_string()));
        }

        #[test]
        fn test_translator_errors_propagate() {
            let fx = Fixture::new();
            let node = Element::new(
                "elem",
                fx.driver.clone(),
                Rc::new(SelectorsHandler::empty()),
                fx.factory.clone(),
            );
            let err = node.find(SelectorKind::Css, "a").unwrap_err();
            assert!(matches!(err, ProbarError::UnknownSelector { .. }));
            assert!(!fx.driver.was_called("find"));
        }

        #[test]
        fn test_driver_errors_propagate_from_find() {
            let fx = Fixture::new();
            fx.driver.fail_on("find", DriverError::SessionClosed);
            let err = fx.element("elem").find_all(SelectorKind::XPath, "a").unwrap_err();
            assert_eq!(err.as_driver_error(), Some(&DriverError::SessionClosed));
        }
    }

    mod named_tests {
        use super::*;

        #[test]
        fn test_find_named_falls_back_to_partial() {
            let fx = Fixture::with_selectors(EchoSelectors::named_as("a"));
            fx.driver.on_find("nav/a", Vec::<&str>::new());
            fx.driver.on_find("nav/a", ["(nav/a)[1]"]);
            let link = fx.element("nav").find_link("Home").unwrap().unwrap();
            assert_eq!(link.locator(), "(nav/a)[1]");
            let kinds: Vec<_> = fx.selectors.requests.borrow().iter().map(|(k, _)| *k).collect();
            assert_eq!(kinds, vec![SelectorKind::NamedExact, SelectorKind::NamedPartial]);
        }

        #[test]
        fn test_click_link_not_found() {
            let fx = Fixture::new();
            let err = fx.element("nav").click_link("Nowhere").unwrap_err();
            assert!(matches!(
                err,
                ProbarError::ElementNotFound { ref kind, ref locator }
                    if kind == "link" && locator == "Nowhere"
            ));
        }

        #[test]
        fn test_fill_field_sets_value() {
            let fx = Fixture::with_selectors(EchoSelectors::named_as("input"));
            fx.driver.on_find("form/input", ["(form/input)[1]"]);
            fx.element("form").fill_field("Email", "a@b.c").unwrap();
            assert_eq!(
                fx.driver.history().last().unwrap(),
                "set_value:(form/input)[1]:a@b.c"
            );
        }

        #[test]
        fn test_press_button_clicks() {
            let fx = Fixture::with_selectors(EchoSelectors::named_as("button"));
            fx.driver.on_find("form/button", ["(form/button)[1]"]);
            fx.element("form").press_button("Save").unwrap();
            assert_eq!(fx.driver.history().last().unwrap(), "click:(form/button)[1]");
        }

        #[test]
        fn test_has_field() {
            let fx = Fixture::with_selectors(EchoSelectors::named_as("input"));
            fx.driver.on_find("form/input", ["(form/input)[1]"]);
            assert!(fx.element("form").has_field("Email").unwrap());
            assert!(!fx.element("div").has_field("Email").unwrap());
        }

        #[test]
        fn test_find_by_id_uses_exact_only() {
            let fx = Fixture::with_selectors(EchoSelectors::named_as("*"));
            assert!(fx.element("body").find_by_id("main").unwrap().is_none());
            assert_eq!(fx.selectors.requests.borrow().len(), 1);
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_text() {
            let fx = Fixture::new();
            fx.driver.on_text("text_tag", "val1");
            assert_eq!(fx.element("text_tag").text().unwrap(), "val1");
        }

        #[test]
        fn test_html_and_outer_html() {
            let fx = Fixture::new();
            fx.driver.on_html("div", "<b>x</b>");
            fx.driver.on_outer_html("div", "<div><b>x</b></div>");
            let node = fx.element("div");
            assert_eq!(node.html().unwrap(), "<b>x</b>");
            assert_eq!(node.outer_html().unwrap(), "<div><b>x</b></div>");
        }

        #[test]
        fn test_has_attribute() {
            let fx = Fixture::new();
            fx.driver.on_attribute("input_tag", "href", None);
            fx.driver.on_attribute("input_tag", "href", Some("http://..."));
            let node = fx.element("input_tag");
            assert!(!node.has_attribute("href").unwrap());
            assert!(node.has_attribute("href").unwrap());
        }

        #[test]
        fn test_get_attribute() {
            let fx = Fixture::new();
            fx.driver.on_attribute("input_tag", "href", Some("http://..."));
            assert_eq!(
                fx.element("input_tag").attribute("href").unwrap().as_deref(),
                Some("http://...")
            );
        }

        #[test]
        fn test_has_class() {
            let fx = Fixture::new();
            fx.driver.on_attribute("input_tag", "class", Some("class1 class2"));
            let node = fx.element("input_tag");
            assert!(node.has_class("class1").unwrap());
            assert!(node.has_class("class2").unwrap());
            assert!(!node.has_class("class3").unwrap());
            assert_eq!(fx.driver.calls_to("attribute"), 3);
        }

        #[test]
        fn test_has_class_without_attribute() {
            let fx = Fixture::new();
            fx.driver.on_attribute("input_tag", "class", None);
            assert!(!fx.element("input_tag").has_class("class3").unwrap());
        }

        #[test]
        fn test_has_class_is_not_substring_match() {
            let fx = Fixture::new();
            fx.driver.on_attribute("a", "class", Some("  btn-primary\tactive "));
            let node = fx.element("a");
            assert!(!node.has_class("btn").unwrap());
            assert!(node.has_class("active").unwrap());
        }

        #[test]
        fn test_value_and_tag_name() {
            let fx = Fixture::new();
            fx.driver.on_value("input_tag", Some("val1"));
            fx.driver.on_tag_name("html//h3", "h3");
            assert_eq!(fx.element("input_tag").value().unwrap().as_deref(), Some("val1"));
            assert_eq!(fx.element("html//h3").tag_name().unwrap(), "h3");
        }

        #[test]
        fn test_state_flags_requery_every_call() {
            let fx = Fixture::new();
            fx.driver.on_visible("some_xpath", true);
            fx.driver.on_visible("some_xpath", false);
            fx.driver.on_checked("some_xpath", true);
            fx.driver.on_checked("some_xpath", false);
            fx.driver.on_selected("some_xpath", true);
            fx.driver.on_selected("some_xpath", false);
            let node = fx.element("some_xpath");
            assert!(node.is_visible().unwrap());
            assert!(!node.is_visible().unwrap());
            assert!(node.is_checked().unwrap());
            assert!(!node.is_checked().unwrap());
            assert!(node.is_selected().unwrap());
            assert!(!node.is_selected().unwrap());
        }
    }

    mod interaction_tests {
        use super::*;

        #[test]
        fn test_single_call_delegations() {
            let fx = Fixture::new();
            let node = fx.element("elem");
            node.set_value("new_val").unwrap();
            node.click().unwrap();
            node.press().unwrap();
            node.right_click().unwrap();
            node.double_click().unwrap();
            node.check().unwrap();
            node.uncheck().unwrap();
            node.focus().unwrap();
            node.blur().unwrap();
            node.mouse_over().unwrap();
            node.attach_file(Path::new("path")).unwrap();
            node.submit().unwrap();
            assert_eq!(
                fx.driver.history(),
                vec![
                    "set_value:elem:new_val",
                    "click:elem",
                    "click:elem",
                    "right_click:elem",
                    "double_click:elem",
                    "check:elem",
                    "uncheck:elem",
                    "focus:elem",
                    "blur:elem",
                    "mouse_over:elem",
                    "attach_file:elem:path",
                    "submit_form:elem",
                ]
            );
        }

        #[test]
        fn test_key_events() {
            let fx = Fixture::new();
            let node = fx.element("elem");
            node.key_press('k', None).unwrap();
            node.key_down('k', Some(KeyModifier::Shift)).unwrap();
            node.key_up(13_u32, None).unwrap();
            assert_eq!(
                fx.driver.history(),
                vec!["key_press:elem:k", "key_down:elem:k:shift", "key_up:elem:#13"]
            );
        }

        #[test]
        fn test_drag_to_uses_both_locators() {
            let fx = Fixture::new();
            fx.element("some_tag1").drag_to(&fx.element("some_tag2")).unwrap();
            assert_eq!(fx.driver.history(), vec!["drag_to:some_tag1:some_tag2"]);
        }

        #[test]
        fn test_driver_failure_is_unchanged_and_not_retried() {
            let fx = Fixture::new();
            let failure = DriverError::failure("element detached");
            fx.driver.fail_on("click", failure.clone());
            assert_eq!(fx.element("btn").click().unwrap_err(), failure);
            assert_eq!(fx.driver.calls_to("click"), 1);
        }
    }

    mod wait_tests {
        use super::*;

        /// Predicate results with loose truthiness
        #[derive(Debug)]
        enum Probe {
            Null,
            False,
            Empty(Vec<Element>),
            Found(Element),
        }

        impl WaitOutcome for Probe {
            fn is_satisfied(&self) -> bool {
                match self {
                    Self::Null | Self::False => false,
                    Self::Empty(items) => items.is_satisfied(),
                    Self::Found(element) => element.is_satisfied(),
                }
            }
        }

        #[test]
        fn test_wait_for_success_after_four_calls() {
            let fx = Fixture::new();
            let node = fx.element("some xpath");
            let mut calls = 0;

            let result = node
                .wait_for(5000, |given| {
                    calls += 1;
                    match calls {
                        1 => Probe::Null,
                        2 => Probe::False,
                        3 => Probe::Empty(Vec::new()),
                        _ => Probe::Found(given.clone()),
                    }
                })
                .unwrap();

            assert_eq!(calls, 4);
            match result {
                Probe::Found(found) => assert_eq!(found.locator(), node.locator()),
                other => panic!("unexpected result {other:?}"),
            }
        }

        #[test]
        fn test_wait_for_timeout_returns_last_value() {
            let fx = Fixture::new();
            let node = fx
                .element("some xpath")
                .with_config(ElementConfig::new().with_poll_interval(10));
            let start = Instant::now();
            let result = node.wait_for(200, |_| None::<Element>).unwrap();
            let elapsed = start.elapsed();
            assert!(result.is_none());
            assert!(elapsed >= Duration::from_millis(200));
            assert!(elapsed < Duration::from_millis(200 + 10 + 100));
        }

        #[test]
        fn test_wait_for_polls_driver() {
            let fx = Fixture::new();
            fx.driver.on_visible("spinner", true);
            fx.driver.on_visible("spinner", true);
            fx.driver.on_visible("spinner", false);
            let node = fx
                .element("spinner")
                .with_config(ElementConfig::new().with_poll_interval(1));
            let hidden = node
                .wait_for(1000, |el| el.is_visible().map(|visible| !visible))
                .unwrap();
            assert_eq!(hidden, Ok(true));
            assert_eq!(fx.driver.calls_to("is_visible"), 3);
        }

        #[test]
        fn test_wait_for_zero_interval_is_contract_violation() {
            let fx = Fixture::new();
            let node = fx
                .element("x")
                .with_config(ElementConfig::new().with_poll_interval(0));
            let mut calls = 0;
            let err = node
                .wait_for(100, |_| {
                    calls += 1;
                    true
                })
                .unwrap_err();
            assert!(matches!(err, ProbarError::ContractViolation { .. }));
            assert_eq!(calls, 0);
        }
    }

    mod factory_tests {
        use super::*;

        #[test]
        fn test_default_factory_propagates_config_to_children() {
            let driver = Rc::new(MockDriver::new());
            driver.on_find("root/child", ["(root/child)[1]"]);
            let config = ElementConfig::new().with_poll_interval(7);
            let factory = Rc::new(DefaultElementFactory::with_config(config.clone()));
            let root = factory.create_element(
                Locator::new("root"),
                driver,
                Rc::new(SelectorsHandler::new()),
            );
            let child = root.find(SelectorKind::XPath, "child").unwrap().unwrap();
            assert_eq!(child.config(), &config);
        }
    }
}
