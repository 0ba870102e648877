// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Markup parsing for custom code fragments
//!
//! Parses raw head/body snippets with html5ever and flattens the tree into
//! a document-ordered element list the auditor can query.

mod fragment;
mod parser;

pub use fragment::{Fragment, FragmentElement};
pub use parser::parse_fragment;
