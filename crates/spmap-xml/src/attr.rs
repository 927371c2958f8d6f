//! Typed attribute extraction.
//!
//! All element readers go through these accessors: lookup prefers the
//! format-namespace spelling of an attribute over the unprefixed one,
//! integers tolerate grouping separators, and booleans accept only the
//! literal tokens `true`/`false` (case-insensitive). Malformed text is
//! always a hard error; only *unknown* attributes degrade to warnings.

use std::str::FromStr;

use spmap_model::Number;

use crate::stream::{Attribute, Element};
use crate::{Error, ParseContext, Result, Warner, Warning};

impl Element {
    fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.prefixed && a.name == name)
            .or_else(|| self.attributes.iter().find(|a| !a.prefixed && a.name == name))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn missing(&self, attribute: &'static str) -> Error {
        Error::MissingProperty {
            tag: self.tag().to_owned(),
            attribute,
            line: self.line,
        }
    }

    fn malformed(&self, attribute: &'static str, value: &str, detail: impl ToString) -> Error {
        Error::MalformedValue {
            tag: self.tag().to_owned(),
            attribute,
            value: value.to_owned(),
            detail: detail.to_string(),
            line: self.line,
        }
    }

    pub fn require_str(&self, name: &'static str) -> Result<&str> {
        self.find(name)
            .map(|a| a.value.as_str())
            .ok_or_else(|| self.missing(name))
    }

    pub fn optional_str(&self, name: &str) -> Option<&str> {
        self.find(name).map(|a| a.value.as_str())
    }

    pub fn optional_str_or(&self, name: &str, default: &str) -> String {
        self.optional_str(name).unwrap_or(default).to_owned()
    }

    pub fn require_int(&self, name: &'static str) -> Result<i32> {
        let text = self.require_str(name)?;
        self.parse_int(name, text)
    }

    pub fn optional_int(&self, name: &'static str, default: i32) -> Result<i32> {
        match self.optional_str(name) {
            Some(text) => {
                let text = text.to_owned();
                self.parse_int(name, &text)
            }
            None => Ok(default),
        }
    }

    fn parse_int(&self, name: &'static str, text: &str) -> Result<i32> {
        // Grouping separators show up in hand-edited files.
        let cleaned: String = text.chars().filter(|&c| c != ',').collect();
        cleaned
            .parse::<i32>()
            .map_err(|e| self.malformed(name, text, e))
    }

    pub fn require_bool(&self, name: &'static str) -> Result<bool> {
        let text = self.require_str(name)?;
        self.parse_bool(name, text)
    }

    pub fn optional_bool(&self, name: &'static str, default: bool) -> Result<bool> {
        match self.optional_str(name) {
            Some(text) => {
                let text = text.to_owned();
                self.parse_bool(name, &text)
            }
            None => Ok(default),
        }
    }

    fn parse_bool(&self, name: &'static str, text: &str) -> Result<bool> {
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.malformed(name, text, "expected \"true\" or \"false\""))
        }
    }

    pub fn require_number(&self, name: &'static str) -> Result<Number> {
        let text = self.require_str(name)?.to_owned();
        Number::from_str(&text).map_err(|e| self.malformed(name, &text, e))
    }

    pub fn optional_number(&self, name: &'static str, default: Number) -> Result<Number> {
        match self.optional_str(name) {
            Some(text) => {
                let text = text.to_owned();
                Number::from_str(&text).map_err(|e| self.malformed(name, &text, e))
            }
            None => Ok(default),
        }
    }

    /// Parses an attribute into any `FromStr` model enum.
    pub fn require_enum<T>(&self, name: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: ToString,
    {
        let text = self.require_str(name)?.to_owned();
        text.parse::<T>().map_err(|e| self.malformed(name, &text, e))
    }

    /// Reads `preferred`, falling back to the `legacy` spelling with a
    /// deprecation warning. Fails if neither is present.
    pub fn with_deprecated_alias(
        &self,
        preferred: &'static str,
        legacy: &'static str,
        warner: &mut Warner,
    ) -> Result<String> {
        if let Some(value) = self.optional_str(preferred) {
            return Ok(value.to_owned());
        }
        if let Some(value) = self.optional_str(legacy) {
            let value = value.to_owned();
            warner.handle(Warning::DeprecatedProperty {
                tag: self.tag().to_owned(),
                deprecated: legacy,
                preferred,
                line: self.line,
            })?;
            return Ok(value);
        }
        Err(self.missing(preferred))
    }

    /// Warns about every present attribute (in a recognized namespace)
    /// that is not in `allowed`. Unknown attributes never fail the parse.
    pub fn expect_attributes(&self, warner: &mut Warner, allowed: &[&str]) -> Result<()> {
        for attribute in &self.attributes {
            if !allowed.contains(&attribute.name.as_str()) {
                warner.handle(Warning::UnsupportedProperty {
                    tag: self.tag().to_owned(),
                    attribute: attribute.name.clone(),
                    line: self.line,
                })?;
            }
        }
        Ok(())
    }

    /// The fixture's `id`: registered when explicit, generated with a
    /// warning when absent.
    pub fn object_id(&self, ctx: &mut ParseContext) -> Result<i32> {
        match self.optional_str("id") {
            Some(_) => {
                let requested = self.require_int("id")?;
                ctx.ids.register(requested, &mut ctx.warner)
            }
            None => {
                let generated = ctx.ids.create();
                ctx.warner.handle(Warning::MissingId {
                    tag: self.tag().to_owned(),
                    generated,
                    line: self.line,
                })?;
                Ok(generated)
            }
        }
    }

    /// The optional `image` icon override.
    pub fn image(&self) -> Option<String> {
        self.optional_str("image").map(str::to_owned)
    }

    /// The optional `portrait` override.
    pub fn portrait(&self) -> Option<String> {
        self.optional_str("portrait").map(str::to_owned)
    }
}
