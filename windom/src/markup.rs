//! Markup rendering, mostly for logging and test failure output.

use std::fmt::{self, Display, Write};

use crate::document::Document;
use crate::element::{Content, Element};

fn escape(text: &str, out: &mut impl Write) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

fn write_attr(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(f, " {name}=\"")?;
    escape(value, f)?;
    f.write_char('"')
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write_attr(f, name, value)?;
        }
        if !self.classes.is_empty() {
            write_attr(f, "class", &self.classes.join(" "))?;
        }
        if !self.style.is_empty() {
            write_attr(f, "style", &self.style_text())?;
        }
        f.write_char('>')?;

        match &self.content {
            Content::None => {}
            Content::Text(text) => escape(text, f)?,
            Content::Children(children) => {
                for child in children {
                    write!(f, "{child}")?;
                }
            }
        }

        write!(f, "</{}>", self.tag)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_attributes_classes_and_style() {
        let el = Element::div()
            .id("a")
            .class("x")
            .style_property("display", "none")
            .child(Element::span().text("1 < 2"));
        assert_eq!(
            el.to_string(),
            "<div id=\"a\" class=\"x\" style=\"display: none;\"><span>1 &lt; 2</span></div>"
        );
    }
}
