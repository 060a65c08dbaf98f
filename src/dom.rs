//! A minimal in-memory element tree that calendars render into
use std::fmt::{self, Write};

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Element {
    tag_name: String,
    class_name: String,
    inner_html: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag_name: &str) -> Element {
        Element {
            tag_name: tag_name.to_owned(),
            ..Element::default()
        }
    }

    pub fn with_class(mut self, class_name: &str) -> Element {
        self.set_class_name(class_name);
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The element's space-separated class list
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_class_name(&mut self, class_name: &str) {
        class_name.clone_into(&mut self.class_name);
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> + '_ {
        self.class_name.split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Append `class` to the class list.  No check is made for whether the
    /// class is already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.class_name.is_empty() {
            self.class_name.push(' ');
        }
        self.class_name.push_str(class);
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Replace the element's markup content.  `html` is emitted verbatim by
    /// [`Element::to_html()`].
    pub fn set_inner_html(&mut self, html: &str) {
        html.clone_into(&mut self.inner_html);
    }

    /// Replace the element's content with `text`, escaped for HTML
    pub fn set_text_content(&mut self, text: &str) {
        self.inner_html = escape(text);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Discard all existing content (markup and children) and replace it with
    /// `children`
    pub fn replace_children<I>(&mut self, children: I)
    where
        I: IntoIterator<Item = Element>,
    {
        self.inner_html.clear();
        self.children.clear();
        self.children.extend(children);
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        if !self.class_name.is_empty() {
            write!(f, " class=\"{}\"", escape(&self.class_name))?;
        }
        f.write_char('>')?;
        f.write_str(&self.inner_html)?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag_name)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list() {
        let mut el = Element::new("td").with_class("day");
        assert!(el.has_class("day"));
        assert!(!el.has_class("da"));
        el.add_class("next");
        el.add_class("active");
        assert_eq!(el.class_name(), "day next active");
        assert_eq!(el.class_list().collect::<Vec<_>>(), ["day", "next", "active"]);
    }

    #[test]
    fn test_add_class_to_empty() {
        let mut el = Element::new("td");
        el.add_class("today");
        assert_eq!(el.class_name(), "today");
    }

    #[test]
    fn test_to_html() {
        let mut row = Element::new("tr").with_class("week");
        let mut cell = Element::new("td").with_class("day prev");
        cell.set_inner_html("31");
        row.append_child(cell);
        row.append_child(Element::new("td"));
        assert_eq!(
            row.to_html(),
            r#"<tr class="week"><td class="day prev">31</td><td></td></tr>"#
        );
    }

    #[test]
    fn test_text_content_is_escaped() {
        let mut el = Element::new("span");
        el.set_text_content("<b>\"Tom\" & Jerry</b>");
        assert_eq!(
            el.to_html(),
            "<span>&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;/b&gt;</span>"
        );
    }

    #[test]
    fn test_replace_children_clears_markup() {
        let mut el = Element::new("div");
        el.set_inner_html("loading&hellip;");
        el.append_child(Element::new("p"));
        el.replace_children([Element::new("table"), Element::new("hr")]);
        assert_eq!(el.inner_html(), "");
        assert_eq!(el.to_html(), "<div><table></table><hr></hr></div>");
    }
}
