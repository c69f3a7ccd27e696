//! Basic usage of the textanchor facade

use textanchor_api::{Config, LocateQuery, Node, SpanRangeDTO, TextAnchor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = "The committee reviewed the annual budget. Revenue grew in every \
                    region except the north. The board approved a modest dividend.";

    // Place an extracted chunk
    println!("=== Locate a chunk ===");
    let anchor = TextAnchor::new()?;
    let found = anchor.locate_chunk("Revenue grew in every region", document, 1, 3)?;
    println!(
        "{} at {}..{} (confidence {:.2})",
        found.method, found.start_offset, found.end_offset, found.confidence
    );

    // Recover an annotation whose text drifted after re-extraction
    println!("\n=== Recover an annotation ===");
    let found = anchor.recover_annotation(
        "the bord approved a modest dividend",
        document,
        Some("except the north."),
        None,
    )?;
    println!("{}", serde_json::to_string_pretty(&found)?);

    // Same request as a serializable query with a custom configuration
    println!("\n=== Custom configuration ===");
    let config = Config::builder()
        .trigram_threshold(0.6)
        .separator("\n\n")
        .build()?;
    let anchor = TextAnchor::with_config(config)?;
    let query = LocateQuery::new("annual budget", document).with_position(0, 3);
    println!("{:?}", anchor.locate(&query)?);

    // Stitch overlapping windows
    println!("\n=== Stitch segments ===");
    let stitched = anchor.stitch_all(&[
        "Part one covers the budget review and the revenue summary for the year",
        "the revenue summary for the year and then the dividend decision",
    ]);
    println!("{}", stitched.text);

    // Highlight inside a markup block
    println!("\n=== Highlight ===");
    let block = Node::element("p", vec![Node::text(document)]);
    let output = anchor.highlight(
        &block,
        &[SpanRangeDTO {
            id: "n-1".to_string(),
            start_offset: 0,
            end_offset: 0,
            category: "note".to_string(),
            literal_text: Some("modest dividend".to_string()),
        }],
    )?;
    println!("{}", output.root.to_html());

    Ok(())
}
