//! Block tree processing.
//!
//! Blocks mirror the shape produced by the WordPress block parser
//! (`blockName`, `attrs`, `innerBlocks`, `innerHTML`, `innerContent`).
//! Parsing and serializing block markup is left to the caller; every
//! operation here takes a tree and returns a new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::engine::{Chooser, Engine, pick_replacements};
use crate::types::{Replacements, VariableSets};

/// One block and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub block_name: Option<String>,
    /// Arbitrary JSON attributes; string leaves are text-bearing.
    #[serde(default)]
    pub attrs: Value,
    #[serde(default)]
    pub inner_blocks: Vec<Block>,
    #[serde(default, rename = "innerHTML")]
    pub inner_html: String,
    /// Markup fragments between children; `None` marks a child position.
    #[serde(default)]
    pub inner_content: Vec<Option<String>>,
}

impl Block {
    /// A `core/paragraph` block.
    pub fn paragraph(content: &str) -> Block {
        let html = format!("<p>{content}</p>");
        Block::leaf(
            "core/paragraph",
            Value::Object(Map::new()),
            format!("<!-- wp:paragraph -->\n{html}\n<!-- /wp:paragraph -->"),
            html,
        )
    }

    /// A `core/heading` block at `level` (`h1` to `h6`).
    pub fn heading(content: &str, level: u8) -> Block {
        let html = format!("<h{level}>{content}</h{level}>");
        Block::leaf(
            "core/heading",
            json!({ "level": level }),
            format!("<!-- wp:heading {{\"level\":{level}}} -->\n{html}\n<!-- /wp:heading -->"),
            html,
        )
    }

    /// A `core/list` block with one `<li>` per item.
    pub fn list<S: AsRef<str>>(items: &[S]) -> Block {
        let mut html = String::from("<ul>\n");
        for item in items {
            html.push_str("<li>");
            html.push_str(item.as_ref());
            html.push_str("</li>\n");
        }
        html.push_str("</ul>");
        Block::leaf(
            "core/list",
            Value::Object(Map::new()),
            format!("<!-- wp:list -->\n{html}\n<!-- /wp:list -->"),
            html,
        )
    }

    /// A `core/button` block linking to `url`.
    pub fn button(content: &str, url: &str) -> Block {
        let link = format!("<a class=\"wp-block-button__link\" href=\"{url}\">{content}</a>");
        let html = format!("<div class=\"wp-block-button\">{link}</div>");
        Block::leaf(
            "core/button",
            json!({ "url": url }),
            format!("<!-- wp:button -->\n{html}\n<!-- /wp:button -->"),
            html,
        )
    }

    fn leaf(name: &str, attrs: Value, inner_html: String, content: String) -> Block {
        Block {
            block_name: Some(name.to_string()),
            attrs,
            inner_blocks: Vec::new(),
            inner_html,
            inner_content: vec![Some(content)],
        }
    }
}

/// A set of blocks generated from one replacement map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockVariation {
    pub blocks: Vec<Block>,
    pub replacements: Replacements,
}

/// Block counts for a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    pub total_blocks: usize,
    /// Block name to number of blocks with that name. Unnamed blocks are
    /// counted in `total_blocks` only.
    pub block_types: BTreeMap<String, usize>,
}

impl Engine {
    /// Run the pipeline on every text-bearing field of every block.
    ///
    /// Fields are processed in document order: attributes, `innerHTML`,
    /// `innerContent`, then children.
    pub fn process_blocks(
        &self,
        blocks: &[Block],
        replacements: &Replacements,
        chooser: &mut dyn Chooser,
    ) -> Vec<Block> {
        blocks
            .iter()
            .map(|block| self.process_block(block, replacements, chooser))
            .collect()
    }

    fn process_block(
        &self,
        block: &Block,
        replacements: &Replacements,
        chooser: &mut dyn Chooser,
    ) -> Block {
        let attrs = self.process_value(&block.attrs, replacements, chooser);
        let inner_html = self.process(&block.inner_html, replacements, chooser);
        let inner_content = block
            .inner_content
            .iter()
            .map(|fragment| {
                fragment
                    .as_deref()
                    .map(|text| self.process(text, replacements, chooser))
            })
            .collect();
        let inner_blocks = self.process_blocks(&block.inner_blocks, replacements, chooser);
        Block {
            block_name: block.block_name.clone(),
            attrs,
            inner_blocks,
            inner_html,
            inner_content,
        }
    }

    fn process_value(
        &self,
        value: &Value,
        replacements: &Replacements,
        chooser: &mut dyn Chooser,
    ) -> Value {
        match value {
            Value::String(text) => Value::String(self.process(text, replacements, chooser)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.process_value(item, replacements, chooser))
                    .collect(),
            ),
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, item)| {
                        (key.clone(), self.process_value(item, replacements, chooser))
                    })
                    .collect::<Map<String, Value>>(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }

    /// Produce `count` processed copies of `blocks`, each with its own
    /// replacement map drawn from `variable_sets`.
    pub fn duplicate_blocks(
        &self,
        blocks: &[Block],
        count: usize,
        variable_sets: &VariableSets,
        chooser: &mut dyn Chooser,
    ) -> Vec<BlockVariation> {
        (0..count)
            .map(|_| {
                let replacements = pick_replacements(variable_sets, chooser);
                BlockVariation {
                    blocks: self.process_blocks(blocks, &replacements, chooser),
                    replacements,
                }
            })
            .collect()
    }
}

/// Literal find-and-replace in blocks whose name is in `block_types`.
///
/// Matching blocks have `innerHTML`, string `innerContent` fragments and
/// string attributes rewritten. Children are visited whether or not their
/// parent matched.
pub fn find_replace_in_blocks(
    blocks: &[Block],
    block_types: &[&str],
    find: &str,
    replace: &str,
) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| {
            let matches = block
                .block_name
                .as_deref()
                .is_some_and(|name| block_types.contains(&name));
            let mut updated = block.clone();
            if matches {
                updated.inner_html = block.inner_html.replace(find, replace);
                updated.inner_content = block
                    .inner_content
                    .iter()
                    .map(|fragment| fragment.as_ref().map(|text| text.replace(find, replace)))
                    .collect();
                updated.attrs = replace_in_value(&block.attrs, find, replace);
            }
            updated.inner_blocks =
                find_replace_in_blocks(&block.inner_blocks, block_types, find, replace);
            updated
        })
        .collect()
}

fn replace_in_value(value: &Value, find: &str, replace: &str) -> Value {
    match value {
        Value::String(text) => Value::String(text.replace(find, replace)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_in_value(item, find, replace))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, item)| (key.clone(), replace_in_value(item, find, replace)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

/// Tag-stripped `innerHTML` of every block, one line per block, depth
/// first.
pub fn extract_text(blocks: &[Block]) -> String {
    let mut text = String::new();
    for block in blocks {
        text.push_str(&strip_tags(&block.inner_html));
        text.push('\n');
        text.push_str(&extract_text(&block.inner_blocks));
    }
    text
}

/// Count blocks in a tree, by name.
pub fn block_stats(blocks: &[Block]) -> BlockStats {
    let mut stats = BlockStats::default();
    collect_stats(blocks, &mut stats);
    stats
}

fn collect_stats(blocks: &[Block], stats: &mut BlockStats) {
    for block in blocks {
        stats.total_blocks += 1;
        if let Some(name) = block.block_name.as_deref().filter(|name| !name.is_empty()) {
            *stats.block_types.entry(name.to_string()).or_default() += 1;
        }
        collect_stats(&block.inner_blocks, stats);
    }
}

/// Remove `<...>` tags and `<!-- ... -->` comments from markup.
fn strip_tags(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = if tail.starts_with("<!--") {
            tail.find("-->").map(|pos| pos + 3)
        } else {
            tail.find('>').map(|pos| pos + 1)
        };
        rest = end.map_or("", |end| &tail[end..]);
    }
    output.push_str(rest);
    output
}
