/// Declarative description of an element subtree.
///
/// Nothing is allocated in a document until the builder is passed to
/// [`Document::append`](crate::Document::append).
///
/// ```ignore
/// let spoiler = el("div")
///     .id("faq-1")
///     .class("js-spoiler")
///     .child(el("button").class("js-spoiler__head").text("Question"))
///     .child(el("div").class("js-spoiler__body").text("Answer"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<ElementBuilder>,
}

/// Start building an element with the given tag name.
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        tag: tag.into(),
        ..Default::default()
    }
}

impl ElementBuilder {
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add one or more classes. Whitespace separates class names.
    pub fn class(mut self, classes: &str) -> Self {
        for name in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a valueless attribute, e.g. `data-spoiler-group-exclusive`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}
