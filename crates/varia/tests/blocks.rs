//! Tests for block tree processing.

use serde_json::json;
use varia::blocks::{block_stats, extract_text, find_replace_in_blocks};
use varia::{Block, Engine, ScriptedChooser, replacements, variable_sets};

fn paragraph(html: &str) -> Block {
    Block {
        block_name: Some("core/paragraph".into()),
        inner_html: html.into(),
        inner_content: vec![Some(html.into())],
        ..Block::default()
    }
}

fn sample_tree() -> Vec<Block> {
    vec![Block {
        block_name: Some("core/group".into()),
        attrs: json!({ "title": "{service} hub", "level": 2, "tags": ["{location}", 5] }),
        inner_blocks: vec![
            paragraph("<p>{service|capitalize} in {location}</p>"),
            Block {
                block_name: Some("core/heading".into()),
                inner_html: "<h2>{location}</h2>".into(),
                inner_content: vec![Some("<h2>{location}</h2>".into())],
                ..Block::default()
            },
        ],
        inner_html: "<div></div>".into(),
        inner_content: vec![Some("<div>".into()), None, None, Some("</div>".into())],
    }]
}

#[test]
fn test_process_blocks_fills_every_text_field() {
    let engine = Engine::new();
    let values = replacements! { "service" => "painting", "location" => "Perth" };
    let processed = engine.process_blocks(&sample_tree(), &values, &mut ScriptedChooser::default());

    let group = &processed[0];
    assert_eq!(group.attrs, json!({ "title": "painting hub", "level": 2, "tags": ["Perth", 5] }));
    assert_eq!(group.inner_content[1], None);
    assert_eq!(group.inner_blocks[0].inner_html, "<p>Painting in Perth</p>");
    assert_eq!(
        group.inner_blocks[0].inner_content,
        vec![Some("<p>Painting in Perth</p>".to_string())]
    );
    assert_eq!(group.inner_blocks[1].inner_html, "<h2>Perth</h2>");
}

#[test]
fn test_process_blocks_leaves_input_untouched() {
    let tree = sample_tree();
    let engine = Engine::new();
    let _ = engine.process_blocks(
        &tree,
        &replacements! { "service" => "x" },
        &mut ScriptedChooser::default(),
    );
    assert_eq!(tree, sample_tree());
}

#[test]
fn test_duplicate_blocks() {
    let engine = Engine::new();
    let sets = variable_sets! { "location" => ["Perth", "Darwin"], "service" => "roofing" };
    let mut chooser = ScriptedChooser::new([1, 0]);
    let copies = engine.duplicate_blocks(&[paragraph("{location}")], 2, &sets, &mut chooser);
    assert_eq!(copies.len(), 2);
    assert_eq!(copies[0].blocks[0].inner_html, "Darwin");
    assert_eq!(copies[1].blocks[0].inner_html, "Perth");
    assert_eq!(copies[1].replacements["service"], "roofing");
}

#[test]
fn test_find_replace_only_in_listed_types() {
    let tree = vec![Block {
        block_name: Some("core/group".into()),
        attrs: json!({ "note": "old" }),
        inner_html: "old".into(),
        inner_blocks: vec![paragraph("old text")],
        ..Block::default()
    }];
    let updated = find_replace_in_blocks(&tree, &["core/paragraph"], "old", "new");
    assert_eq!(updated[0].inner_html, "old");
    assert_eq!(updated[0].attrs, json!({ "note": "old" }));
    assert_eq!(updated[0].inner_blocks[0].inner_html, "new text");
    assert_eq!(
        updated[0].inner_blocks[0].inner_content,
        vec![Some("new text".to_string())]
    );
}

#[test]
fn test_extract_text() {
    let tree = vec![Block {
        inner_html: "<div>Top</div>".into(),
        inner_blocks: vec![paragraph("<p>Child <em>one</em></p>")],
        ..Block::default()
    }];
    assert_eq!(extract_text(&tree), "Top\nChild one\n");
}

#[test]
fn test_block_stats() {
    let stats = block_stats(&sample_tree());
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.block_types["core/group"], 1);
    assert_eq!(stats.block_types["core/paragraph"], 1);
    assert_eq!(stats.block_types["core/heading"], 1);
}

#[test]
fn test_block_deserializes_parser_output() {
    let block: Block = serde_json::from_value(json!({
        "blockName": "core/paragraph",
        "attrs": {},
        "innerBlocks": [],
        "innerHTML": "<p>{x}</p>",
        "innerContent": ["<p>{x}</p>"]
    }))
    .unwrap();
    assert_eq!(block.block_name.as_deref(), Some("core/paragraph"));
    assert_eq!(block.inner_html, "<p>{x}</p>");

    let freeform: Block =
        serde_json::from_value(json!({ "blockName": null, "innerHTML": "\n" })).unwrap();
    assert_eq!(freeform.block_name, None);
    assert!(freeform.inner_blocks.is_empty());
}

// =============================================================================
// Block templates
// =============================================================================

#[test]
fn test_paragraph_template() {
    let block = Block::paragraph("{service} in {location}");
    assert_eq!(block.block_name.as_deref(), Some("core/paragraph"));
    assert_eq!(block.attrs, json!({}));
    assert_eq!(
        block.inner_html,
        "<!-- wp:paragraph -->\n<p>{service} in {location}</p>\n<!-- /wp:paragraph -->"
    );
    assert_eq!(
        block.inner_content,
        vec![Some("<p>{service} in {location}</p>".to_string())]
    );
}

#[test]
fn test_heading_template() {
    let block = Block::heading("About {brand}", 3);
    assert_eq!(block.block_name.as_deref(), Some("core/heading"));
    assert_eq!(block.attrs, json!({ "level": 3 }));
    assert_eq!(
        block.inner_html,
        "<!-- wp:heading {\"level\":3} -->\n<h3>About {brand}</h3>\n<!-- /wp:heading -->"
    );
}

#[test]
fn test_list_template() {
    let block = Block::list(&["Fast", "Local"]);
    assert_eq!(block.block_name.as_deref(), Some("core/list"));
    assert_eq!(
        block.inner_content,
        vec![Some("<ul>\n<li>Fast</li>\n<li>Local</li>\n</ul>".to_string())]
    );
    assert!(block.inner_html.starts_with("<!-- wp:list -->\n<ul>"));

    let empty = Block::list::<&str>(&[]);
    assert_eq!(empty.inner_content, vec![Some("<ul>\n</ul>".to_string())]);
}

#[test]
fn test_button_template() {
    let block = Block::button("Call {brand}", "/contact");
    assert_eq!(block.attrs, json!({ "url": "/contact" }));
    assert_eq!(
        block.inner_content,
        vec![Some(
            "<div class=\"wp-block-button\"><a class=\"wp-block-button__link\" \
             href=\"/contact\">Call {brand}</a></div>"
                .to_string()
        )]
    );
}

#[test]
fn test_block_templates_feed_processing() {
    let engine = Engine::new();
    let blocks = vec![
        Block::heading("{Welcome|Hello} to {brand}", 2),
        Block::button("Call", "/"),
    ];
    let out = engine.process_blocks(
        &blocks,
        &replacements! { "brand" => "Acme" },
        &mut ScriptedChooser::default(),
    );
    assert_eq!(out[0].inner_content, vec![Some("<h2>Welcome to Acme</h2>".to_string())]);
    assert_eq!(out[1].attrs, json!({ "url": "/" }));
}
