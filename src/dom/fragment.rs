// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Flattened view of a parsed fragment

/// A parsed markup fragment, flattened to its elements in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub(crate) elements: Vec<FragmentElement>,
}

/// A single element of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentElement {
    /// Local tag name (lowercase)
    pub tag: String,
    /// Attributes in source order. Duplicates are already dropped by the parser.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text of the element's direct text children
    pub text: String,
}

impl FragmentElement {
    /// Create an element with no attributes or text
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if the attribute is present, whatever its value
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Attribute value, only if present and not blank
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.trim().is_empty())
    }
}

impl Fragment {
    /// Build a fragment from elements already in document order
    pub fn from_elements(elements: Vec<FragmentElement>) -> Self {
        Self { elements }
    }

    /// Elements with the given tag name, in document order
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a FragmentElement> + 'a {
        self.elements.iter().filter(move |e| e.tag == tag)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the fragment has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
