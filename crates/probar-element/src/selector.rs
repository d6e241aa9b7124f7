//! Selector translation: named and raw selectors to [`Locator`] expressions.
//!
//! Selector kinds form a closed enum. Each kind is served by a
//! [`SelectorEngine`] registered in a [`SelectorsHandler`]; the handler is
//! what elements consult through the [`SelectorTranslator`] trait.
//!
//! Built-in engines:
//!
//! | Kind            | Engine                      | Arguments            |
//! |-----------------|-----------------------------|----------------------|
//! | `xpath`         | [`XPathSelector`]           | raw expression       |
//! | `named_exact`   | [`NamedSelector::exact`]    | `(target, text)`     |
//! | `named_partial` | [`NamedSelector::partial`]  | `(target, text)`     |
//!
//! `css` has no built-in engine; a backend that understands CSS registers one.

use crate::locator::Locator;
use crate::result::{ProbarError, ProbarResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Selector vocabulary understood by the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SelectorKind {
    /// Raw XPath expression
    #[serde(rename = "xpath")]
    XPath,
    /// CSS selector
    #[serde(rename = "css")]
    Css,
    /// Named selector, text must equal the candidate's label
    #[serde(rename = "named_exact")]
    NamedExact,
    /// Named selector, text must be contained in the candidate's label
    #[serde(rename = "named_partial")]
    NamedPartial,
}

impl SelectorKind {
    /// Get the registered name of this kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::XPath => "xpath",
            Self::Css => "css",
            Self::NamedExact => "named_exact",
            Self::NamedPartial => "named_partial",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a named selector looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedTarget {
    /// Any element by id
    Id,
    /// Anchor with an href, by id, text or title
    Link,
    /// Submit/reset/button inputs and `<button>`, by id, value, text or title
    Button,
    /// Form field, by id, name, placeholder or label
    Field,
    /// `<option>`, by value or text
    Option,
    /// Any element by text content
    Content,
}

impl NamedTarget {
    /// Get the selector name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Link => "link",
            Self::Button => "button",
            Self::Field => "field",
            Self::Option => "option",
            Self::Content => "content",
        }
    }

    /// Human description used in not-found errors
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Id => "element with id",
            Self::Link => "link",
            Self::Button => "button",
            Self::Field => "form field",
            Self::Option => "select option",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for NamedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments accompanying a selector kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorArgs {
    /// A single expression (xpath, css)
    Expression(String),
    /// A named-selector pair
    Named {
        /// What to look for
        target: NamedTarget,
        /// Text to match against
        text: String,
    },
}

impl SelectorArgs {
    /// Create expression arguments
    #[must_use]
    pub fn expr(expression: impl Into<String>) -> Self {
        Self::Expression(expression.into())
    }

    /// Create named-selector arguments
    #[must_use]
    pub fn named(target: NamedTarget, text: impl Into<String>) -> Self {
        Self::Named {
            target,
            text: text.into(),
        }
    }
}

impl From<&str> for SelectorArgs {
    fn from(expression: &str) -> Self {
        Self::expr(expression)
    }
}

impl From<String> for SelectorArgs {
    fn from(expression: String) -> Self {
        Self::Expression(expression)
    }
}

impl From<(NamedTarget, &str)> for SelectorArgs {
    fn from((target, text): (NamedTarget, &str)) -> Self {
        Self::named(target, text)
    }
}

impl fmt::Display for SelectorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expression) => f.write_str(expression),
            Self::Named { target, text } => write!(f, "{target}({text:?})"),
        }
    }
}

/// Converts selectors into raw locator expressions
pub trait SelectorTranslator {
    /// Translate `args` of the given kind into a locator
    fn selector_to_locator(&self, kind: SelectorKind, args: &SelectorArgs)
        -> ProbarResult<Locator>;
}

/// One entry in the selector registration table
pub trait SelectorEngine {
    /// Translate `args`; `kind` is the kind the engine was registered under
    fn translate(&self, kind: SelectorKind, args: &SelectorArgs) -> ProbarResult<Locator>;
}

/// Pass-through engine for raw XPath
#[derive(Debug, Clone, Copy, Default)]
pub struct XPathSelector;

impl SelectorEngine for XPathSelector {
    fn translate(&self, kind: SelectorKind, args: &SelectorArgs) -> ProbarResult<Locator> {
        match args {
            SelectorArgs::Expression(expression) => Ok(Locator::new(expression.clone())),
            SelectorArgs::Named { .. } => Err(ProbarError::InvalidSelector {
                kind,
                message: "expected a raw expression".to_string(),
            }),
        }
    }
}

/// How named selectors compare text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Text must equal the label
    Exact,
    /// Text must be contained in the label
    Partial,
}

impl MatchMode {
    fn predicate(self, expr: &str, literal: &str) -> String {
        match self {
            Self::Exact => format!("{expr} = {literal}"),
            Self::Partial => format!("contains({expr}, {literal})"),
        }
    }
}

/// Template engine for named selectors
#[derive(Debug, Clone, Copy)]
pub struct NamedSelector {
    mode: MatchMode,
}

impl NamedSelector {
    /// Engine requiring exact text
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            mode: MatchMode::Exact,
        }
    }

    /// Engine accepting partial text
    #[must_use]
    pub const fn partial() -> Self {
        Self {
            mode: MatchMode::Partial,
        }
    }

    /// Get the match mode
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Render the XPath for `target` matching `text`
    #[must_use]
    pub fn render(&self, target: NamedTarget, text: &str) -> String {
        let lit = xpath_literal(text);
        let m = |expr: &str| self.mode.predicate(expr, &lit);
        let label = "normalize-space(string(.))";

        match target {
            NamedTarget::Id => format!(".//*[@id = {lit}]"),
            NamedTarget::Link => format!(
                ".//a[@href][@id = {lit} or {} or {}]",
                m(label),
                m("@title")
            ),
            NamedTarget::Button => format!(
                ".//input[@type = 'submit' or @type = 'reset' or @type = 'button' or @type = 'image']\
                 [@id = {lit} or {} or {}] | .//button[@id = {lit} or {} or {} or {}]",
                m("@value"),
                m("@title"),
                m("@value"),
                m(label),
                m("@title")
            ),
            NamedTarget::Field => format!(
                ".//*[self::input[not(@type = 'submit' or @type = 'reset' or @type = 'button' \
                 or @type = 'image' or @type = 'hidden')] or self::textarea or self::select]\
                 [@id = {lit} or @name = {lit} or {} or @id = //label[{}]/@for]",
                m("@placeholder"),
                m(label)
            ),
            NamedTarget::Option => format!(".//option[@value = {lit} or {}]", m(label)),
            NamedTarget::Content => format!("./descendant-or-self::*[{}]", m(label)),
        }
    }
}

impl SelectorEngine for NamedSelector {
    fn translate(&self, kind: SelectorKind, args: &SelectorArgs) -> ProbarResult<Locator> {
        match args {
            SelectorArgs::Named { target, text } => Ok(Locator::new(self.render(*target, text))),
            SelectorArgs::Expression(_) => Err(ProbarError::InvalidSelector {
                kind,
                message: "expected a (target, text) pair".to_string(),
            }),
        }
    }
}

/// Quote `text` as an XPath string literal.
///
/// Text holding both quote kinds is assembled with `concat()`.
#[must_use]
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }

    let parts = text
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect::<Vec<_>>()
        .join(", \"'\", ");
    format!("concat({parts})")
}

/// Registration table mapping selector kinds to engines
pub struct SelectorsHandler {
    engines: HashMap<SelectorKind, Box<dyn SelectorEngine>>,
}

impl fmt::Debug for SelectorsHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.engines.keys().collect();
        kinds.sort();
        f.debug_struct("SelectorsHandler")
            .field("kinds", &kinds)
            .finish()
    }
}

impl Default for SelectorsHandler {
    fn default() -> Self {
        Self::empty()
            .with_engine(SelectorKind::XPath, XPathSelector)
            .with_engine(SelectorKind::NamedExact, NamedSelector::exact())
            .with_engine(SelectorKind::NamedPartial, NamedSelector::partial())
    }
}

impl SelectorsHandler {
    /// Create a handler with the built-in engines
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler with no engines
    #[must_use]
    pub fn empty() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    /// Register an engine, returning the one it replaces
    pub fn register(
        &mut self,
        kind: SelectorKind,
        engine: impl SelectorEngine + 'static,
    ) -> Option<Box<dyn SelectorEngine>> {
        self.engines.insert(kind, Box::new(engine))
    }

    /// Register an engine (builder form)
    #[must_use]
    pub fn with_engine(mut self, kind: SelectorKind, engine: impl SelectorEngine + 'static) -> Self {
        self.register(kind, engine);
        self
    }

    /// Check if a kind has an engine
    #[must_use]
    pub fn is_registered(&self, kind: SelectorKind) -> bool {
        self.engines.contains_key(&kind)
    }
}

impl SelectorTranslator for SelectorsHandler {
    fn selector_to_locator(
        &self,
        kind: SelectorKind,
        args: &SelectorArgs,
    ) -> ProbarResult<Locator> {
        let engine = self
            .engines
            .get(&kind)
            .ok_or(ProbarError::UnknownSelector { kind })?;
        let locator = engine.translate(kind, args)?;
        tracing::trace!(target: "probar::selector", %kind, %args, %locator, "translated selector");
        Ok(locator)
    }
}
