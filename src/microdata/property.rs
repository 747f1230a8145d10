//! Reading the name(s) and value of a single `itemprop` element

use crate::document::Node;

/// Element kinds whose value comes from a dedicated attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Embedded media, valued by `src`
    Media,
    /// Hyperlinks, valued by `href`
    Link,
    /// Everything else: `content` attribute, falling back to text
    Generic,
}

impl ElementKind {
    pub fn of(tag: &str) -> Self {
        match tag {
            "img" | "audio" | "video" | "source" | "track" | "embed" | "iframe" => {
                ElementKind::Media
            }
            "a" | "area" | "link" => ElementKind::Link,
            _ => ElementKind::Generic,
        }
    }

    /// Attribute that must be present for the element to carry a value
    fn value_attr(self) -> Option<&'static str> {
        match self {
            ElementKind::Media => Some("src"),
            ElementKind::Link => Some("href"),
            ElementKind::Generic => None,
        }
    }
}

/// Value of a property before it is placed in the item graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// The property element opens a scope of its own with this type
    Scope(String),
}

/// A property element read into names plus value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty<'a> {
    pub names: Vec<&'a str>,
    pub value: RawValue,
}

/// Read the property declared by `node`.
///
/// Returns `None` when the element cannot contribute a value: no usable
/// names in `itemprop`, or a media/link element missing its attribute.
pub fn read_property<'a>(node: &Node<'a>) -> Option<RawProperty<'a>> {
    let names: Vec<&str> = node.attr("itemprop")?.split_ascii_whitespace().collect();
    if names.is_empty() {
        return None;
    }

    if node.has_attr("itemscope") {
        let item_type = node.attr("itemtype").unwrap_or_default();
        return Some(RawProperty {
            names,
            value: RawValue::Scope(item_type.to_string()),
        });
    }

    let text = match ElementKind::of(node.name()).value_attr() {
        Some(attr) => node.attr(attr)?.to_string(),
        None => match node.attr("content") {
            Some(content) => content.to_string(),
            None => node.content().trim().to_string(),
        },
    };

    Some(RawProperty {
        names,
        value: RawValue::Text(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    struct Read {
        names: Vec<String>,
        value: RawValue,
    }

    fn read(html: &str) -> Option<Read> {
        let doc = Document::parse_str(html);
        let node = doc.select("[itemprop]").unwrap()[0];
        read_property(&node).map(|prop| Read {
            names: prop.names.iter().map(|n| n.to_string()).collect(),
            value: prop.value,
        })
    }

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    #[test]
    fn test_element_kinds() {
        assert_eq!(ElementKind::of("img"), ElementKind::Media);
        assert_eq!(ElementKind::of("video"), ElementKind::Media);
        assert_eq!(ElementKind::of("a"), ElementKind::Link);
        assert_eq!(ElementKind::of("link"), ElementKind::Link);
        assert_eq!(ElementKind::of("meta"), ElementKind::Generic);
        assert_eq!(ElementKind::of("span"), ElementKind::Generic);
    }

    #[test]
    fn test_scalar_values() {
        let prop = read(r#"<img itemprop="photo" src="p.jpg">"#).unwrap();
        assert_eq!(prop.names, vec!["photo"]);
        assert_eq!(prop.value, text("p.jpg"));

        let prop = read(r#"<a itemprop="link" href="/x">go</a>"#).unwrap();
        assert_eq!(prop.value, text("/x"));

        let prop = read(r#"<span itemprop="name"> Ada </span>"#).unwrap();
        assert_eq!(prop.value, text("Ada"));

        let prop = read(r#"<meta itemprop="age" content="30">"#).unwrap();
        assert_eq!(prop.value, text("30"));

        let prop = read(r#"<span itemprop="age" content="30">thirty</span>"#).unwrap();
        assert_eq!(prop.value, text("30"));
    }

    #[test]
    fn test_media_and_link_elements() {
        let prop = read(r#"<audio itemprop="clip" src="/a.ogg"></audio>"#).unwrap();
        assert_eq!(prop.value, text("/a.ogg"));

        let prop = read(r#"<iframe itemprop="embedUrl" src="/player"></iframe>"#).unwrap();
        assert_eq!(prop.value, text("/player"));

        let prop = read(r#"<map name="m"><area itemprop="region" href="/north"></map>"#).unwrap();
        assert_eq!(prop.value, text("/north"));

        assert!(read(r#"<audio itemprop="clip">fallback</audio>"#).is_none());
        assert!(read(r#"<map name="m"><area itemprop="region"></map>"#).is_none());
    }

    #[test]
    fn test_empty_text_is_a_value() {
        let prop = read(r#"<span itemprop="note"></span>"#).unwrap();
        assert_eq!(prop.value, text(""));
    }

    #[test]
    fn test_missing_value_attr_fails() {
        assert!(read(r#"<img itemprop="photo">"#).is_none());
        assert!(read(r#"<a itemprop="link">text</a>"#).is_none());
    }

    #[test]
    fn test_multiple_names() {
        let prop = read(r#"<span itemprop="a  b" content="v"></span>"#).unwrap();
        assert_eq!(prop.names, vec!["a", "b"]);
        assert_eq!(prop.value, text("v"));

        assert!(read(r#"<span itemprop=" ">x</span>"#).is_none());
    }

    #[test]
    fn test_scope_value() {
        let prop = read(r#"<div itemprop="worksFor" itemscope itemtype="Org"></div>"#).unwrap();
        assert_eq!(prop.value, RawValue::Scope("Org".to_string()));

        // scope wins over src
        let prop = read(r#"<img itemprop="logo" itemscope src="l.png">"#).unwrap();
        assert_eq!(prop.value, RawValue::Scope(String::new()));
    }
}
