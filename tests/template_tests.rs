/// Template data integration tests.

use community_content::builtin_templates;
use community_content::core::template::{HighlightStyle, Placeholder, TemplateSet};
use community_content::schema::template_kind::TemplateKind;

#[test]
fn austin_metro_file_matches_embedded_copy() {
    let path = std::path::Path::new("template_data/austin_metro/templates.ron");
    let from_disk = TemplateSet::load_from_ron(path).unwrap();
    let embedded = builtin_templates::austin_metro().unwrap();
    assert_eq!(from_disk.definitions.len(), embedded.definitions.len());
}

#[test]
fn every_paragraph_has_alternatives() {
    let set = builtin_templates::austin_metro().unwrap();
    for definition in set.definitions.values() {
        assert!(
            definition.paragraphs.len() >= 2,
            "{} should have an opening and at least one more paragraph",
            definition.id()
        );
        for paragraph in &definition.paragraphs {
            assert!(!paragraph.alternatives.is_empty());
        }
    }
}

#[test]
fn builtin_templates_avoid_optional_fields() {
    // Direction is optional in the source table; only the anchored template
    // may rely on the anchor.
    let set = builtin_templates::austin_metro().unwrap();
    for (kind, definition) in &set.definitions {
        let placeholders = definition.placeholders();
        assert!(
            !placeholders.contains(&Placeholder::Direction),
            "{} references {{direction}}",
            definition.id()
        );
        if *kind != TemplateKind::LandmarkAnchored {
            assert!(!placeholders.contains(&Placeholder::Anchor), "{}", definition.id());
        }
    }
}

#[test]
fn suburb_claims_mention_schools_second() {
    let set = builtin_templates::austin_metro().unwrap();
    let suburb = set.get(TemplateKind::EstablishedSuburb).unwrap();
    match &suburb.highlights {
        HighlightStyle::Claims(claims) => {
            assert!(claims[1].placeholders().any(|p| p == Placeholder::Schools));
        }
        HighlightStyle::ConvenienceAccess { .. } => panic!("expected claims"),
    }
}

#[test]
fn fixture_template_file_loads() {
    let path = std::path::Path::new("tests/fixtures/test_templates.ron");
    let set = TemplateSet::load_from_ron(path).unwrap();
    assert!(set.missing_kinds().is_empty());
}
