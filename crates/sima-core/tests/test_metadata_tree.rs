use sima_core::error::SimaError;
use sima_core::metadata::tree::MetadataTree;
use sima_core::metadata::xml::parse_xml;

const NESTED: &str = r#"<Root>
    <Outer>
        <Inner><Color>#00ff00</Color></Inner>
    </Outer>
    <Color>GFP</Color>
</Root>"#;

#[test]
fn test_find_is_pre_order_and_deterministic() {
    let tree = parse_xml(NESTED).unwrap();
    // The nested Color is visited before the shallower sibling that follows.
    for _ in 0..10 {
        assert_eq!(tree.find_text("Color"), Some("#00ff00"));
    }
}

#[test]
fn test_find_prefers_key_before_descending() {
    let tree = parse_xml("<R><Color><Color>inner</Color></Color></R>").unwrap();
    let found = tree.find("Color").unwrap();
    assert!(matches!(found, MetadataTree::Mapping(_)));
}

#[test]
fn test_find_absent_key_returns_none() {
    let tree = parse_xml(NESTED).unwrap();
    assert!(tree.find("Missing").is_none());
    assert!(MetadataTree::Null.find("Color").is_none());
    assert!(MetadataTree::Scalar("x".into()).find("Color").is_none());
}

#[test]
fn test_find_walks_sequences_left_to_right() {
    let tree = parse_xml(
        "<R><Channel><Name>first</Name></Channel><Channel><Name>second</Name></Channel></R>",
    )
    .unwrap();
    assert!(matches!(
        tree.find("Channel"),
        Some(MetadataTree::Sequence(items)) if items.len() == 2
    ));
    assert_eq!(tree.find_text("Name"), Some("first"));
}

#[test]
fn test_empty_element_is_skipped() {
    let tree = parse_xml("<R><A><Well/></A><Well>C4</Well></R>").unwrap();
    assert_eq!(tree.find_text("Well"), Some("C4"));
}

#[test]
fn test_strip_attribute_markers() {
    let tree = parse_xml(r#"<Pixels SizeX="512" SizeY="256"><Tag Name="x">text</Tag></Pixels>"#)
        .unwrap();
    assert!(tree.find("SizeX").is_none());
    assert_eq!(tree.find_text("@SizeX"), Some("512"));

    let cleaned = tree.strip_attribute_markers();
    assert_eq!(cleaned.find_text("SizeX"), Some("512"));
    assert_eq!(cleaned.find_text("SizeY"), Some("256"));
    assert_eq!(cleaned.find_text("Name"), Some("x"));
    assert_eq!(cleaned.find_text("Tag"), Some("text"));
}

#[test]
fn test_unescapes_entities() {
    let tree = parse_xml("<R><Plate>A &amp; B</Plate></R>").unwrap();
    assert_eq!(tree.find_text("Plate"), Some("A & B"));
}

#[test]
fn test_malformed_documents_rejected() {
    for bad in ["", "plain text", "<A><B></A>", "<A/><B/>", "<A>"] {
        assert!(parse_xml(bad).is_err(), "{bad:?} should not parse");
    }
    assert!(matches!(
        parse_xml("ImageJ=1.54f\nimages=6"),
        Err(SimaError::MalformedXml(_))
    ));
}
