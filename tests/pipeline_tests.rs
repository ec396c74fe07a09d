/// Pipeline integration tests: end-to-end table-to-records generation.

use community_content::core::assemble::DuplicatePolicy;
use community_content::core::dataset::{
    load_inputs, parse_inputs_json, parse_inputs_ron, render_typescript,
};
use community_content::core::error::GenerationError;
use community_content::core::pipeline::{ContentGenerator, PipelineError};
use community_content::schema::neighborhood::NeighborhoodInput;
use std::path::Path;

fn fixture_inputs() -> Vec<NeighborhoodInput> {
    load_inputs(Path::new("tests/fixtures/neighborhoods.ron")).unwrap()
}

#[test]
fn fixture_table_generates_cleanly() {
    let generator = ContentGenerator::builder().seed(7).build().unwrap();
    let inputs = fixture_inputs();
    let report = generator.generate(&inputs).unwrap();

    assert!(report.is_clean(), "unexpected failures: {:?}", report.failures);
    assert_eq!(report.records.len(), inputs.len());

    for record in &report.records {
        assert_eq!(record.highlights.len(), 5, "{}", record.slug);
        assert_eq!(record.nearby_landmarks.len(), 5, "{}", record.slug);
        assert!(
            (3..=4).contains(&record.best_for.len()),
            "{} has {} bestFor entries",
            record.slug,
            record.best_for.len()
        );
        assert!(!record.description.contains('{'), "{}", record.slug);
    }
}

#[test]
fn output_order_matches_input_order() {
    let generator = ContentGenerator::builder().build().unwrap();
    let inputs = fixture_inputs();
    let report = generator.generate(&inputs).unwrap();

    let input_slugs: Vec<&str> = inputs.iter().map(|i| i.slug.as_str()).collect();
    let output_slugs: Vec<&str> = report.records.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(input_slugs, output_slugs);
}

#[test]
fn acre_tract_matches_published_copy() {
    let generator = ContentGenerator::builder().build().unwrap();
    let report = generator.generate(&fixture_inputs()).unwrap();
    let acre = report
        .records
        .iter()
        .find(|r| r.slug == "acre-tract")
        .unwrap();

    assert!(acre.description.contains("about 8 miles from downtown Austin"));
    assert!(acre.highlights[1].contains("Austin ISD or Del Valle ISD"));
    assert_eq!(acre.best_for, vec!["Families", "Professionals", "First-time buyers"]);
}

#[test]
fn lakefront_record_uses_landmark_highlights() {
    let generator = ContentGenerator::builder().build().unwrap();
    let report = generator.generate(&fixture_inputs()).unwrap();
    let lakeway = report.records.iter().find(|r| r.slug == "lakeway").unwrap();

    let expected: Vec<String> = lakeway
        .nearby_landmarks
        .iter()
        .map(|l| format!("Convenient access to {l}"))
        .collect();
    assert_eq!(lakeway.highlights, expected);
    assert!(lakeway.description.contains("lakefront"));
}

#[test]
fn record_without_persona_tags_gets_template_defaults() {
    let generator = ContentGenerator::builder().build().unwrap();
    let report = generator.generate(&fixture_inputs()).unwrap();
    let driftwood = report.records.iter().find(|r| r.slug == "driftwood").unwrap();
    assert_eq!(driftwood.best_for, vec!["Families", "Retirees", "Remote workers"]);
    assert!(driftwood
        .highlights
        .iter()
        .any(|h| h.contains("Dripping Springs ISD, Hays CISD or Wimberley ISD")));
}

#[test]
fn one_bad_record_does_not_stop_the_run() {
    let generator = ContentGenerator::builder().build().unwrap();
    let mut inputs = fixture_inputs();
    let valid = inputs.len();
    let mut bad = inputs[0].clone();
    bad.slug = "nowhere".to_string();
    bad.county = "Harris".to_string();
    inputs.insert(2, bad);

    let report = generator.generate(&inputs).unwrap();
    assert_eq!(report.records.len(), valid);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 2);
    assert!(matches!(
        &report.failures[0].error,
        GenerationError::UnknownCounty { county, .. } if county == "Harris"
    ));
}

#[test]
fn row_missing_name_fails_alone() {
    let inputs = parse_inputs_json(
        r#"[
            {
                "name": "Acre Tract",
                "slug": "acre-tract",
                "county": "Travis",
                "distance_miles": 8.0,
                "school_districts": ["Manor ISD"],
                "highways": ["US-290", "SH-130"],
                "landmarks": ["Lake Walter E. Long", "Austin Bergstrom", "Tesla Giga Texas", "Samsung Austin Semiconductor", "Downtown Austin"],
                "persona_tags": ["Families", "Professionals", "Commuters"]
            },
            {
                "slug": "unnamed-tract",
                "county": "Travis",
                "distance_miles": 9.0,
                "school_districts": ["Manor ISD"],
                "highways": ["US-290"],
                "landmarks": ["A", "B", "C", "D", "E"]
            }
        ]"#,
    )
    .unwrap();
    assert_eq!(inputs.len(), 2);

    let report = ContentGenerator::builder().build().unwrap().generate(&inputs).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].slug, "acre-tract");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(
        report.failures[0].error,
        GenerationError::MissingField {
            slug: "unnamed-tract".to_string(),
            field: "name".to_string(),
        }
    );
}

#[test]
fn rows_missing_slug_or_distance_fail_alone() {
    let mut inputs = fixture_inputs();
    let valid = inputs.len();
    let absent = parse_inputs_ron(
        r#"[
            (name: "No Slug", county: "Travis", distance_miles: 4.0),
            (name: "Also No Slug", county: "Travis", distance_miles: 5.0),
            (name: "Far Away", slug: "far-away", county: "Hays"),
            (name: "Hyde Park", slug: "Hyde Park", county: "Travis", distance_miles: 3.0),
        ]"#,
    )
    .unwrap();
    inputs.extend(absent);

    let report = ContentGenerator::builder().build().unwrap().generate(&inputs).unwrap();
    assert_eq!(report.records.len(), valid);
    let fields: Vec<String> = report
        .failures
        .iter()
        .map(|f| match &f.error {
            GenerationError::MissingField { field, .. } => field.clone(),
            GenerationError::InvalidSlug { .. } => "invalid slug".to_string(),
            other => panic!("unexpected failure: {other}"),
        })
        .collect();
    // Two blank slugs are both missing, not duplicates of each other
    assert_eq!(fields, vec!["slug", "slug", "distance_miles", "invalid slug"]);
}

#[test]
fn duplicate_slug_policies() {
    let mut inputs = fixture_inputs();
    let mut dup = inputs[1].clone();
    dup.name = "Hyde Park North".to_string();
    inputs.push(dup);
    let last = inputs.len() - 1;

    let skip = ContentGenerator::builder().build().unwrap();
    let report = skip.generate(&inputs).unwrap();
    assert_eq!(report.records.len(), inputs.len() - 1);
    assert_eq!(
        report.failures[0].error,
        GenerationError::DuplicateSlug {
            slug: "hyde-park".to_string(),
            first_index: 1,
            second_index: last,
        }
    );
    let hyde = report.records.iter().find(|r| r.slug == "hyde-park").unwrap();
    assert!(!hyde.description.contains("Hyde Park North"));

    let abort = ContentGenerator::builder()
        .duplicate_policy(DuplicatePolicy::AbortRun)
        .build()
        .unwrap();
    assert!(matches!(
        abort.generate(&inputs),
        Err(PipelineError::Aborted(GenerationError::DuplicateSlug { .. }))
    ));
}

#[test]
fn custom_templates_override_builtin() {
    let generator = ContentGenerator::builder()
        .templates_path("tests/fixtures/test_templates.ron")
        .build()
        .unwrap();
    let report = generator.generate(&fixture_inputs()).unwrap();
    assert!(report.is_clean(), "unexpected failures: {:?}", report.failures);

    let lakeway = report.records.iter().find(|r| r.slug == "lakeway").unwrap();
    assert_eq!(lakeway.highlights[0], "Steps from Lake Travis");
    let brushy = report.records.iter().find(|r| r.slug == "brushy-creek").unwrap();
    assert_eq!(brushy.description, "Brushy Creek heads north, 20 miles out.");
}

#[test]
fn config_file_drives_generator() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("generator.ron");
    std::fs::write(
        &config_path,
        r#"(city: "Round Rock", seed: 3, buckets: (in_town_max: 10.0))"#,
    )
    .unwrap();

    let generator = ContentGenerator::builder()
        .config_path(&config_path)
        .build()
        .unwrap();
    assert_eq!(generator.seed(), 3);

    let acre = generator.generate_one(&fixture_inputs()[0]).unwrap();
    // 8 miles now falls in the widened in-town bucket
    assert!(acre.description.contains("downtown Round Rock"));
    assert!(acre.highlights[0].starts_with("Walkable streets"));
}

#[test]
fn typescript_output_contains_every_slug() {
    let generator = ContentGenerator::builder().build().unwrap();
    let inputs = fixture_inputs();
    let report = generator.generate(&inputs).unwrap();
    let ts = render_typescript(&report.records).unwrap();
    for input in &inputs {
        assert!(ts.contains(&format!("\"slug\": \"{}\"", input.slug)));
    }
}
