// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fragment parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::debug;

use super::fragment::{Fragment, FragmentElement};
use crate::error::{Error, Result};

/// Parse a raw HTML fragment into a flat, document-ordered element list.
///
/// The fragment is parsed as a whole document, so head-ish tags that appear
/// first land in the implied `<head>` and the rest in `<body>`. Both are
/// walked in tree order, which matches source order for a snippet.
pub fn parse_fragment(html: &str) -> Result<Fragment> {
    if html.is_empty() {
        return Ok(Fragment::default());
    }

    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    if !dom.errors.is_empty() {
        debug!(count = dom.errors.len(), "Recovered from markup errors");
    }

    Ok(Fragment::from_elements(flatten(&dom.document)))
}

/// Walk the tree in document order. Iterative so deeply nested input
/// cannot exhaust the stack.
fn flatten(root: &Handle) -> Vec<FragmentElement> {
    let mut out = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(handle) = stack.pop() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = handle.data
        {
            let mut element = FragmentElement::new(name.local.to_string());
            for attr in attrs.borrow().iter() {
                element
                    .attributes
                    .push((attr.name.local.to_string(), attr.value.to_string()));
            }
            element.text = direct_text(&handle);
            out.push(element);
        }

        for child in handle.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }

    out
}

fn direct_text(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}
