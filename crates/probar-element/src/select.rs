//! Option resolution for selection controls.
//!
//! Native `select` controls are matched against their `option` children,
//! first by exact text or value, then by partial text. Any other tag is a
//! select-like widget and the raw text goes straight to the driver.

use crate::element::Element;
use crate::result::{ProbarError, ProbarResult};
use crate::selector::{NamedTarget, SelectorArgs, SelectorKind};
use std::fmt;

/// How an option value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionMatch {
    /// Control is not a native select; text passed through
    PassThrough,
    /// First option matched by the exact strategy
    Exact,
    /// First option matched by the partial strategy
    Partial,
}

impl fmt::Display for OptionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass-through"),
            Self::Exact => write!(f, "exact"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// Value to hand to the driver's selection primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    /// Option value (or raw text for pass-through)
    pub value: String,
    /// Strategy that produced the value
    pub matched: OptionMatch,
}

/// Resolves option text against one control
#[derive(Debug, Clone, Copy)]
pub struct OptionResolver<'a> {
    control: &'a Element,
}

impl<'a> OptionResolver<'a> {
    /// Create a resolver for `control`
    #[must_use]
    pub const fn new(control: &'a Element) -> Self {
        Self { control }
    }

    /// Resolve `text` to the value the driver should select.
    ///
    /// Options without a `value` fall back to their text. When several
    /// options match, the first in driver order wins.
    ///
    /// # Errors
    ///
    /// [`ProbarError::ElementNotFound`] when neither strategy matches an
    /// option; driver and translator errors as they occur.
    pub fn resolve(&self, text: &str) -> ProbarResult<ResolvedOption> {
        let tag = self.control.tag_name()?;
        if !tag.eq_ignore_ascii_case(&self.control.config().select_tag) {
            return Ok(ResolvedOption {
                value: text.to_string(),
                matched: OptionMatch::PassThrough,
            });
        }

        for (kind, matched) in [
            (SelectorKind::NamedExact, OptionMatch::Exact),
            (SelectorKind::NamedPartial, OptionMatch::Partial),
        ] {
            let Some(option) = self
                .control
                .find(kind, SelectorArgs::named(NamedTarget::Option, text))?
            else {
                continue;
            };
            let value = match option.value()? {
                Some(value) => value,
                None => option.text()?,
            };
            tracing::debug!(
                target: "probar::element",
                control = %self.control.locator(),
                text,
                %matched,
                value = %value,
                "resolved option"
            );
            return Ok(ResolvedOption { value, matched });
        }

        Err(ProbarError::not_found(NamedTarget::Option.description(), text))
    }

    /// Resolve `text` and select it on the control
    pub fn select(&self, text: &str, multiple: bool) -> ProbarResult<()> {
        let resolved = self.resolve(text)?;
        self.control
            .driver()
            .select_option(self.control.locator(), &resolved.value, multiple)?;
        Ok(())
    }
}
