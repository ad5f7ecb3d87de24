use fidelity::{
    ComparisonPair, ContentSet, DocumentContent, EngineId, FidelityConfig, FontDescriptor,
    ImageDescriptor, Metric, MetricValue, PairwiseReportBuilder, TextDiffConfig,
};

fn engine(id: &str) -> EngineId {
    EngineId::new(id).unwrap()
}

fn pair(key: &str) -> ComparisonPair {
    key.parse().unwrap()
}

fn two_engines(xe: DocumentContent, pdf: DocumentContent) -> ContentSet {
    ContentSet::new()
        .with(engine("xe"), xe)
        .unwrap()
        .with(engine("pdf"), pdf)
        .unwrap()
}

fn xe_pdf_config() -> FidelityConfig {
    FidelityConfig::default()
        .with_engines([engine("xe"), engine("pdf")])
        .with_pairs([pair("xe-pdf")])
}

fn value(set: &ContentSet, metric: Metric) -> Option<MetricValue> {
    let builder = PairwiseReportBuilder::new(xe_pdf_config()).unwrap();
    builder.build(set).unwrap().report.get(metric, &pair("xe-pdf"))
}

#[test]
fn extra_space_is_whitespace_only() {
    let set = two_engines(
        DocumentContent::with_text("Hello World"),
        DocumentContent::with_text("Hello  World"),
    );
    assert_eq!(value(&set, Metric::RawDistance), Some(MetricValue::Int(1)));
    assert_eq!(
        value(&set, Metric::CleanedDistance),
        Some(MetricValue::Int(0))
    );
    assert_eq!(value(&set, Metric::OpWhitespace), Some(MetricValue::Int(1)));
    assert_eq!(
        value(&set, Metric::CleanedAdjustedScore),
        Some(MetricValue::Float(1.0))
    );
    assert_eq!(
        value(&set, Metric::InsertMinusDelete),
        Some(MetricValue::Int(1))
    );
    assert_eq!(
        value(&set, Metric::CharsDiffDistinct),
        Some(MetricValue::Int(0))
    );
}

#[test]
fn swapped_words_are_movements() {
    let set = two_engines(
        DocumentContent::with_text("cat dog"),
        DocumentContent::with_text("dog cat"),
    );
    let movements = value(&set, Metric::OpMovement).and_then(MetricValue::as_i64);
    assert!(movements.unwrap() > 0);
    assert_eq!(
        value(&set, Metric::CleanedDistance),
        Some(MetricValue::Int(0))
    );
    assert_eq!(value(&set, Metric::CharsDiffNet), Some(MetricValue::Int(0)));
}

#[test]
fn case_flips_are_counted_by_direction() {
    let set = two_engines(
        DocumentContent::with_text("Hello"),
        DocumentContent::with_text("hELLO"),
    );
    assert_eq!(
        value(&set, Metric::OpCaseUpperToLower),
        Some(MetricValue::Int(1))
    );
    // `l→L` occurs twice but is one entry.
    assert_eq!(
        value(&set, Metric::OpCaseLowerToUpper),
        Some(MetricValue::Int(3))
    );
    assert_eq!(
        value(&set, Metric::CleanedDistance),
        Some(MetricValue::Int(0))
    );
}

#[test]
fn glyph_substitution_shows_in_char_nets() {
    let set = two_engines(
        DocumentContent::with_text("a-b-c"),
        DocumentContent::with_text("a\u{2013}b\u{2013}c"),
    );
    assert_eq!(
        value(&set, Metric::CleanedDistance),
        Some(MetricValue::Int(2))
    );
    assert_eq!(
        value(&set, Metric::CharsDiffDistinct),
        Some(MetricValue::Int(2))
    );
    assert_eq!(value(&set, Metric::CharsDiffNet), Some(MetricValue::Int(0)));
    assert_eq!(
        value(&set, Metric::InsertMinusDelete),
        Some(MetricValue::Int(0))
    );
}

#[test]
fn truncation_is_negative_growth() {
    let set = two_engines(
        DocumentContent::with_text("abcdef"),
        DocumentContent::with_text("abc"),
    );
    assert_eq!(
        value(&set, Metric::InsertMinusDelete),
        Some(MetricValue::Int(-3))
    );
    assert_eq!(
        value(&set, Metric::NormalizedDistance),
        Some(MetricValue::Float(0.5))
    );
}

#[test]
fn identical_content_scores_perfectly() {
    let doc = DocumentContent {
        text: "Same text".into(),
        images: vec![
            ImageDescriptor::new("d1", 10.0, 10.0),
            ImageDescriptor::new("d2", 20.0, 20.0),
        ],
        fonts: [FontDescriptor::new("F1", 0, 0, 10.0).unwrap()].into(),
        page_count: 1,
    };
    let set = two_engines(doc.clone(), doc);
    let builder = PairwiseReportBuilder::new(xe_pdf_config()).unwrap();
    let column = builder.build(&set).unwrap().report.column(&pair("xe-pdf"));

    assert_eq!(column[&Metric::RawDistance], MetricValue::Int(0));
    assert_eq!(column[&Metric::NormalizedDistance], MetricValue::Float(1.0));
    assert_eq!(column[&Metric::Ratio], MetricValue::Float(1.0));
    assert_eq!(column[&Metric::HammingDistance], MetricValue::Int(0));
    assert_eq!(column[&Metric::ImgCorrectOrder], MetricValue::Bool(true));
    assert_eq!(column[&Metric::ImgNumMissing], MetricValue::Int(0));
    assert_eq!(column[&Metric::ImgNumSizeMismatch], MetricValue::Int(0));
    assert_eq!(column[&Metric::FontsIdentityDrift], MetricValue::Int(0));
    assert_eq!(column[&Metric::NumPagesDiff], MetricValue::Int(0));
}

#[test]
fn empty_texts_are_a_perfect_match() {
    let set = two_engines(DocumentContent::default(), DocumentContent::default());
    assert_eq!(
        value(&set, Metric::NormalizedDistance),
        Some(MetricValue::Float(1.0))
    );
    assert_eq!(
        value(&set, Metric::CleanedAdjustedScore),
        Some(MetricValue::Float(1.0))
    );
    assert_eq!(
        value(&set, Metric::ImgCorrectOrder),
        Some(MetricValue::Bool(true))
    );
}

#[test]
fn hamming_is_absent_for_unequal_lengths() {
    let set = two_engines(
        DocumentContent::with_text("abc"),
        DocumentContent::with_text("abcd"),
    );
    assert_eq!(value(&set, Metric::HammingDistance), None);
    assert_eq!(value(&set, Metric::HammingNormalized), None);
    assert!(value(&set, Metric::RawDistance).is_some());

    let set = two_engines(
        DocumentContent::with_text("abc"),
        DocumentContent::with_text("abd"),
    );
    assert_eq!(
        value(&set, Metric::HammingDistance),
        Some(MetricValue::Int(1))
    );
}

#[test]
fn reordered_and_resized_images() {
    let set = two_engines(
        DocumentContent {
            images: vec![
                ImageDescriptor::new("d1", 100.0, 100.0),
                ImageDescriptor::new("d2", 50.0, 50.0),
            ],
            ..Default::default()
        },
        DocumentContent {
            images: vec![
                ImageDescriptor::new("d2", 50.0, 50.0),
                ImageDescriptor::new("d1", 100.0, 300.0),
            ],
            ..Default::default()
        },
    );
    assert_eq!(
        value(&set, Metric::ImgCorrectOrder),
        Some(MetricValue::Bool(false))
    );
    assert_eq!(
        value(&set, Metric::ImgNumMissing),
        Some(MetricValue::Int(0))
    );
    assert_eq!(
        value(&set, Metric::ImgNumSizeMismatch),
        Some(MetricValue::Int(1))
    );
}

#[test]
fn zero_sized_image_becoming_visible_is_a_mismatch() {
    let set = two_engines(
        DocumentContent {
            images: vec![ImageDescriptor::new("d1", 0.0, 10.0)],
            ..Default::default()
        },
        DocumentContent {
            images: vec![ImageDescriptor::new("d1", 5.0, 10.0)],
            ..Default::default()
        },
    );
    assert_eq!(
        value(&set, Metric::ImgNumSizeMismatch),
        Some(MetricValue::Int(1))
    );
}

#[test]
fn font_drift() {
    let font = |family: &str| FontDescriptor::new(family, 0, 0, 10.0).unwrap();
    let set = two_engines(
        DocumentContent {
            fonts: [font("F1"), font("F2")].into(),
            page_count: 5,
            ..Default::default()
        },
        DocumentContent {
            fonts: [font("F2"), font("F3"), font("F4")].into(),
            page_count: 3,
            ..Default::default()
        },
    );
    assert_eq!(
        value(&set, Metric::FontsCountDrift),
        Some(MetricValue::Int(1))
    );
    assert_eq!(
        value(&set, Metric::FontsIdentityDrift),
        Some(MetricValue::Int(3))
    );
    assert_eq!(value(&set, Metric::NumPagesDiff), Some(MetricValue::Int(2)));
}

#[test]
fn missing_content_leaves_pair_out_of_every_metric() {
    let set = two_engines(
        DocumentContent::with_text("Hello"),
        DocumentContent::with_text("Hello"),
    );
    let builder = PairwiseReportBuilder::new(FidelityConfig::default()).unwrap();
    let report = builder.build(&set).unwrap().report;

    for metric in Metric::ALL {
        assert!(!report.has_value(metric, &pair("xe-lua")), "{metric}");
    }
    assert!(report.has_value(Metric::RawDistance, &pair("xe-pdf")));
    assert_eq!(report.pairs(), &[pair("xe-pdf")]);
    assert_eq!(report.skipped()[0].missing, vec![engine("lua")]);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let raw = json["metrics"]["raw_distance"].as_object().unwrap();
    assert!(raw.contains_key("xe-pdf"));
    assert!(!raw.contains_key("xe-lua"));
}

#[test]
fn missing_baseline_is_also_skipped() {
    let set = ContentSet::new()
        .with(engine("pdf"), DocumentContent::with_text("x"))
        .unwrap()
        .with(engine("lua"), DocumentContent::with_text("x"))
        .unwrap();
    let builder = PairwiseReportBuilder::new(FidelityConfig::default()).unwrap();
    let report = builder.build(&set).unwrap().report;

    assert!(report.pairs().is_empty());
    assert_eq!(report.skipped().len(), 2);
    assert!(report.skipped().iter().all(|s| s.missing == vec![engine("xe")]));
}

#[test]
fn reversed_pair_flips_signed_metrics() {
    let cfg = FidelityConfig::default()
        .with_engines([engine("xe"), engine("pdf")])
        .with_pairs([pair("xe-pdf"), pair("pdf-xe")]);
    let set = two_engines(
        DocumentContent {
            text: "abcd".into(),
            page_count: 4,
            ..Default::default()
        },
        DocumentContent {
            text: "ab".into(),
            page_count: 2,
            ..Default::default()
        },
    );
    let report = PairwiseReportBuilder::new(cfg).unwrap().build(&set).unwrap().report;

    assert_eq!(
        report.get(Metric::InsertMinusDelete, &pair("xe-pdf")),
        Some(MetricValue::Int(-2))
    );
    assert_eq!(
        report.get(Metric::InsertMinusDelete, &pair("pdf-xe")),
        Some(MetricValue::Int(2))
    );
    assert_eq!(
        report.get(Metric::NumPagesDiff, &pair("xe-pdf")),
        Some(MetricValue::Int(2))
    );
    assert_eq!(
        report.get(Metric::NumPagesDiff, &pair("pdf-xe")),
        Some(MetricValue::Int(-2))
    );
}

#[test]
fn disabled_distance_functions_have_no_cells() {
    let text = TextDiffConfig::default()
        .with_distance_functions([fidelity::DistanceFunction::Levenshtein]);
    let cfg = xe_pdf_config().with_text(text);
    let set = two_engines(
        DocumentContent::with_text("abc"),
        DocumentContent::with_text("abd"),
    );
    let report = PairwiseReportBuilder::new(cfg).unwrap().build(&set).unwrap().report;

    assert!(report.has_value(Metric::RawDistance, &pair("xe-pdf")));
    assert!(!report.has_value(Metric::Ratio, &pair("xe-pdf")));
    assert!(!report.has_value(Metric::HammingDistance, &pair("xe-pdf")));
    assert!(report.has_value(Metric::CleanedDistance, &pair("xe-pdf")));
}

#[test]
fn clusters_are_kept_in_details_when_enabled() {
    let cfg = xe_pdf_config().with_text(TextDiffConfig::default().with_clusters(true));
    let set = two_engines(
        DocumentContent::with_text("the cat sat"),
        DocumentContent::with_text("the bat sat!"),
    );
    let run = PairwiseReportBuilder::new(cfg).unwrap().build(&set).unwrap();
    let clusters = run.details[0].text.clusters.as_ref().unwrap();
    assert!(!clusters.source.is_empty() || !clusters.dest.is_empty());
}

#[test]
fn bundled_sample_compares_all_pairs() {
    let contents: ContentSet =
        serde_json::from_str(include_str!("../src/sample_contents.json")).unwrap();
    let builder = PairwiseReportBuilder::new(FidelityConfig::default()).unwrap();
    let run = builder.build(&contents).unwrap();

    assert_eq!(run.report.pairs(), &[pair("xe-pdf"), pair("xe-lua")]);
    assert_eq!(
        run.report.get(Metric::RawDistance, &pair("xe-lua")),
        Some(MetricValue::Int(0))
    );
    assert_eq!(
        run.report.get(Metric::ImgNumMissing, &pair("xe-lua")),
        Some(MetricValue::Int(1))
    );
    assert_eq!(
        run.report.get(Metric::NumPagesDiff, &pair("xe-lua")),
        Some(MetricValue::Int(-1))
    );
    assert_eq!(
        run.report.get(Metric::FontsIdentityDrift, &pair("xe-pdf")),
        Some(MetricValue::Int(4))
    );
    assert_eq!(
        run.report.get(Metric::ImgNumSizeMismatch, &pair("xe-pdf")),
        Some(MetricValue::Int(1))
    );
}
