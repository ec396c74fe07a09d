use community_content::core::pipeline::ContentGenerator;
use community_content::core::render::{join_list, Conjunction};
use community_content::schema::neighborhood::{Anchor, County, NeighborhoodInput};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,8})?"
}

fn anchor() -> impl Strategy<Value = Option<Anchor>> {
    prop_oneof![
        4 => Just(None),
        1 => Just(Some(Anchor::Lakefront)),
        1 => Just(Some(Anchor::HistoricDistrict)),
    ]
}

fn neighborhood() -> impl Strategy<Value = NeighborhoodInput> {
    (
        word(),
        0usize..County::ALL.len(),
        0.0f64..60.0,
        prop::collection::vec(word(), 1..=3),
        prop::collection::vec(word(), 1..=3),
        prop::collection::vec(word(), 5),
        prop::collection::vec(word(), 0..=4),
        anchor(),
    )
        .prop_map(
            |(name, county, distance_miles, schools, highways, landmarks, personas, anchor)| {
                NeighborhoodInput {
                    slug: name.to_lowercase().replace(' ', "-"),
                    name,
                    county: County::ALL[county].name().to_string(),
                    direction: "north".to_string(),
                    distance_miles,
                    school_districts: schools.into_iter().map(|s| format!("{s} ISD")).collect(),
                    highways,
                    landmarks,
                    // Either defaults (none) or a valid 3-4 tag list
                    persona_tags: if personas.len() >= 3 { personas } else { Vec::new() },
                    anchor,
                }
            },
        )
}

fn table() -> impl Strategy<Value = Vec<NeighborhoodInput>> {
    prop::collection::vec(neighborhood(), 1..12).prop_map(|mut inputs| {
        for (i, input) in inputs.iter_mut().enumerate() {
            input.slug = format!("{}-{i}", input.slug);
        }
        inputs
    })
}

proptest! {
    #[test]
    fn rendering_is_deterministic(input in neighborhood(), seed in any::<u64>()) {
        let generator = ContentGenerator::builder().seed(seed).build().unwrap();
        let a = generator.generate_one(&input).unwrap();
        let b = generator.generate_one(&input).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn field_lengths_hold(input in neighborhood()) {
        let generator = ContentGenerator::builder().build().unwrap();
        let content = generator.generate_one(&input).unwrap();
        prop_assert_eq!(content.highlights.len(), 5);
        prop_assert_eq!(content.nearby_landmarks.len(), 5);
        prop_assert!((3..=4).contains(&content.best_for.len()));
    }

    #[test]
    fn school_districts_appear_verbatim(input in neighborhood()) {
        let generator = ContentGenerator::builder().build().unwrap();
        let content = generator.generate_one(&input).unwrap();
        let haystack = format!("{}\n{}", content.description, content.highlights.join("\n"));
        for district in &input.school_districts {
            prop_assert!(haystack.contains(district.as_str()), "missing {}", district);
        }
    }

    #[test]
    fn highways_appear_joined(input in neighborhood()) {
        let generator = ContentGenerator::builder().build().unwrap();
        let content = generator.generate_one(&input).unwrap();
        let joined = join_list(&input.highways, Conjunction::And);
        let haystack = format!("{}\n{}", content.description, content.highlights.join("\n"));
        prop_assert!(haystack.contains(joined.as_str()), "missing {}", joined);
    }

    #[test]
    fn order_and_uniqueness_preserved(inputs in table()) {
        let generator = ContentGenerator::builder().build().unwrap();
        let report = generator.generate(&inputs).unwrap();
        prop_assert!(report.failures.is_empty());

        let expected: Vec<&str> = inputs.iter().map(|i| i.slug.as_str()).collect();
        let actual: Vec<&str> = report.records.iter().map(|r| r.slug.as_str()).collect();
        prop_assert_eq!(expected, actual.clone());

        let mut unique = actual.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), actual.len());
    }

    #[test]
    fn one_invalid_record_is_isolated(inputs in table(), at in any::<prop::sample::Index>()) {
        let generator = ContentGenerator::builder().build().unwrap();
        let mut inputs = inputs;
        let valid = inputs.len();
        let position = at.index(valid + 1);
        let mut broken = inputs[0].clone();
        broken.slug = "broken-record".to_string();
        broken.school_districts.clear();
        inputs.insert(position, broken);

        let report = generator.generate(&inputs).unwrap();
        prop_assert_eq!(report.records.len(), valid);
        prop_assert_eq!(report.failures.len(), 1);
        prop_assert_eq!(report.failures[0].index, position);
    }
}
