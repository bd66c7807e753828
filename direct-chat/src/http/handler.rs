use std::collections::HashMap;
use std::ops::Deref;

use regex::Regex;

use super::Error;
use crate::controller::Controller;

/// Path parameters extracted from the request path, e.g. `chat_id`.
pub type Params = HashMap<String, String>;

/// Route handler: a path pattern and the controller serving it.
///
/// Patterns are literal segments and `:name` parameters, e.g. `/dashboard/chat/:chat_id`.
/// A parameter matches exactly one non-empty path segment.
pub struct Handler {
    path: String,
    regex: Regex,
    controller: Box<dyn Controller>,
}

impl Handler {
    pub fn route(path: &str, controller: impl Controller + 'static) -> Result<Self, Error> {
        Ok(Self {
            path: path.to_string(),
            regex: Self::compile(path)?,
            controller: Box::new(controller),
        })
    }

    fn compile(path: &str) -> Result<Regex, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidRoute(path.to_string()));
        }

        let mut pattern = String::from("^");

        for segment in path.split('/').skip(1) {
            pattern.push('/');

            match segment.strip_prefix(':') {
                Some(name) => {
                    let valid = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if !valid {
                        return Err(Error::InvalidRoute(path.to_string()));
                    }
                    pattern.push_str(&format!("(?P<{}>[^/]+)", name));
                }
                None => pattern.push_str(&regex::escape(segment)),
            }
        }

        pattern.push('$');

        Ok(Regex::new(&pattern)?)
    }

    /// The route pattern, as written.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of path segments that aren't parameters.
    pub fn literal_segments(&self) -> usize {
        self.path
            .split('/')
            .filter(|s| !s.is_empty() && !s.starts_with(':'))
            .count()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Extract parameters from a path matching this route.
    pub fn params(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;

        Some(
            self.regex
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.to_string(), value.as_str().to_string()))
                })
                .collect(),
        )
    }

    pub fn controller_name(&self) -> &'static str {
        self.controller.controller_name()
    }
}

impl Deref for Handler {
    type Target = Box<dyn Controller>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}
