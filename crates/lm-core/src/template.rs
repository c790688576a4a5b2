//! Message templates with named placeholders.
//!
//! `{name}` is replaced by the value of the entry called `name` (matched
//! case-sensitively). `{{` and `}}` produce literal braces. Anything after a
//! `,` or `:` inside a placeholder (alignment / format suffix) is ignored for
//! lookup. Placeholders with no matching entry are written back verbatim.

use std::fmt;

use crate::holder::LogState;
use crate::value::Value;

/// A borrowed message template. Parsing is lazy and allocation-free; only
/// [`Template::render`] allocates its output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'t> {
    source: &'t str,
}

/// One lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Literal(&'t str),
    Placeholder { name: &'t str, raw: &'t str },
}

impl<'t> Template<'t> {
    pub const fn new(source: &'t str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'t str {
        self.source
    }

    pub fn segments(&self) -> Segments<'t> {
        Segments { rest: self.source }
    }

    /// Placeholder names in textual order, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &'t str> + use<'t> {
        self.segments().filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute `state`'s entries into the template, writing into `out`.
    pub fn render_into<W: fmt::Write>(&self, state: &dyn LogState, out: &mut W) -> fmt::Result {
        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Placeholder { name, raw } => match lookup(state, name) {
                    Some(value) => write!(out, "{value}")?,
                    None => out.write_str(raw)?,
                },
            }
        }
        Ok(())
    }

    pub fn render(&self, state: &dyn LogState) -> String {
        let mut out = String::with_capacity(self.source.len());
        // fmt::Write for String is infallible
        let _ = self.render_into(state, &mut out);
        out
    }
}

impl fmt::Display for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source)
    }
}

fn lookup<'a>(state: &'a dyn LogState, name: &str) -> Option<Value<'a>> {
    state
        .entries()
        .find(|entry| entry.name() == name)
        .map(|entry| entry.value())
}

/// Iterator over the [`Segment`]s of a template.
#[derive(Debug, Clone)]
pub struct Segments<'t> {
    rest: &'t str,
}

impl<'t> Segments<'t> {
    fn advance(&mut self, len: usize) -> &'t str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }
}

impl<'t> Iterator for Segments<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        if self.rest.is_empty() {
            return None;
        }
        if self.rest.starts_with("{{") {
            self.advance(2);
            return Some(Segment::Literal("{"));
        }
        if self.rest.starts_with("}}") {
            self.advance(2);
            return Some(Segment::Literal("}"));
        }
        if self.rest.starts_with('{') {
            return Some(match self.rest.find('}') {
                Some(end) => {
                    let raw = self.advance(end + 1);
                    let inner = &raw[1..raw.len() - 1];
                    let name = inner.split([',', ':']).next().unwrap_or(inner).trim();
                    Segment::Placeholder { name, raw }
                }
                // unterminated: the rest is plain text
                None => Segment::Literal(self.advance(self.rest.len())),
            });
        }
        let end = match self.rest.find(['{', '}']) {
            Some(0) => 1, // stray '}'
            Some(end) => end,
            None => self.rest.len(),
        };
        Some(Segment::Literal(self.advance(end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holder::{StateHolder0, StateHolder1, StateHolder2};

    fn blank<S>(_: &S, _: Option<&crate::ErrorRef>) -> String {
        String::new()
    }

    #[test]
    fn substitutes_named_placeholder() {
        let state = StateHolder1::new(blank, None, ["hostName"], "microsoft.com");
        let tpl = Template::new("Could not open socket to `{hostName}`");
        assert_eq!(tpl.render(&state), "Could not open socket to `microsoft.com`");
    }

    #[test]
    fn repeated_placeholder_renders_identically() {
        let state = StateHolder2::new(blank, None, ["a", "b"], 1, "two");
        let tpl = Template::new("{a}-{b}-{a}");
        assert_eq!(tpl.render(&state), "1-two-1");
        assert_eq!(tpl.placeholders().collect::<Vec<_>>(), ["a", "b", "a"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let state = StateHolder1::new(blank, None, ["name"], "x");
        assert_eq!(Template::new("{Name}/{name}").render(&state), "{Name}/x");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let state = StateHolder1::new(blank, None, ["n"], 3);
        assert_eq!(Template::new("{{n}} = {n}").render(&state), "{n} = 3");
    }

    #[test]
    fn format_suffix_is_ignored_for_lookup() {
        let state = StateHolder1::new(blank, None, ["count"], 12);
        assert_eq!(Template::new("{count:N2} items, {count,5}").render(&state), "12 items, 12");
    }

    #[test]
    fn unterminated_and_stray_braces_are_text() {
        let state = StateHolder0::new(None);
        assert_eq!(Template::new("a } b { c").render(&state), "a } b { c");
        let segments: Vec<_> = Template::new("x}y").segments().collect();
        assert_eq!(
            segments,
            [Segment::Literal("x"), Segment::Literal("}"), Segment::Literal("y")]
        );
    }

    #[test]
    fn render_into_appends_to_writer() {
        let state = StateHolder1::new(blank, None, ["v"], true);
        let mut out = String::from(">> ");
        Template::new("flag={v}").render_into(&state, &mut out).unwrap();
        assert_eq!(out, ">> flag=true");
    }
}
