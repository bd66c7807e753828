//! Colored log output, only when stderr is a terminal.
use crate::config::get_config;
use colored::{ColoredString, Colorize};

pub trait MaybeColorize {
    fn green(&self) -> String;
    fn red(&self) -> String;
    fn purple(&self) -> String;
    fn yellow(&self) -> String;
}

fn paint(s: &str, color: fn(&str) -> ColoredString) -> String {
    if get_config().general.tty {
        color(s).to_string()
    } else {
        s.to_string()
    }
}

impl MaybeColorize for &str {
    fn green(&self) -> String {
        paint(self, |s| Colorize::green(s))
    }

    fn red(&self) -> String {
        paint(self, |s| Colorize::red(s))
    }

    fn purple(&self) -> String {
        paint(self, |s| Colorize::purple(s))
    }

    fn yellow(&self) -> String {
        paint(self, |s| Colorize::yellow(s))
    }
}

impl MaybeColorize for String {
    fn green(&self) -> String {
        MaybeColorize::green(&self.as_str())
    }

    fn red(&self) -> String {
        MaybeColorize::red(&self.as_str())
    }

    fn purple(&self) -> String {
        MaybeColorize::purple(&self.as_str())
    }

    fn yellow(&self) -> String {
        MaybeColorize::yellow(&self.as_str())
    }
}
