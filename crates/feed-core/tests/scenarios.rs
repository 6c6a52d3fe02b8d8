//! End-to-end compile scenarios.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use feed_core::{
    FeedCompiler, FeedSnapshot, RefreshOutcome, Refresher, build_document, variant_offer_id,
};
use feed_ingest::{RowSource, SourceError, SourceRows, StaticRowSource};
use feed_model::{FeedError, FeedOptions, GroupFailure, OfferKind, RawRow};
use feed_report::read_feed;

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells.iter().copied().collect()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn catalog() -> SourceRows {
    let primary = vec![
        row(&[
            ("Product Code", "KPB-101"),
            ("Name", "Комплект Сатин"),
            ("Description", "Мягкий сатин"),
            ("Price", "1250.0"),
            ("Country of manufacture", "Украина"),
            ("Producer", "Ego"),
            ("Fabric type", "Сатин"),
            ("Density", "135 г/м2"),
            ("Subcategory", "Евро"),
            ("Main photo 1", "https://img/101-1.jpg"),
            ("Main photo 3", "https://img/101-3.jpg"),
        ]),
        row(&[("Product Code", "ABC"), ("Name", "Плед"), ("Price", "300")]),
        row(&[
            ("Product Code", "KPB-101"),
            ("Subcategory", "Семейный"),
            ("Price", "1500.0"),
            ("Main photo 1", "https://img/101-fam.jpg"),
        ]),
        row(&[("Product Code", "KPB-101"), ("Subcategory", "Евро")]),
        row(&[("Product Code", "XYZ"), ("Name", "Подушка"), ("Price", "200")]),
    ];
    let secondary = vec![
        row(&[
            ("Product Code", "KPB-101"),
            ("Name", "Комплект Сатин UA"),
            ("Description", "М'який сатин"),
        ]),
        row(&[("Product Code", "KPB-101"), ("Name", "duplicate")]),
    ];
    SourceRows::new(primary, secondary)
}

#[test]
fn scenario_a_single_main_offer() {
    let rows = SourceRows::new(
        vec![row(&[
            ("Product Code", "A1"),
            ("Name", "Set"),
            ("Price", "100.0"),
            ("Subcategory", ""),
        ])],
        Vec::new(),
    );
    let (document, report) = build_document(&rows, &FeedOptions::default(), at(9, 0));

    assert_eq!(report.offers, 1);
    assert!(report.skipped.is_empty());
    let offer = &document.offers[0];
    assert_eq!(offer.id, "A1_main");
    assert_eq!(offer.group_id.get(), 1);
    assert_eq!(offer.price, "100");
    assert_eq!(offer.param("Тип комплекта"), Some("Основной комплект"));
}

#[test]
fn scenario_b_variant_falls_back_and_inherits_price() {
    let rows = SourceRows::new(
        vec![
            row(&[
                ("Product Code", "X"),
                ("Name", "N"),
                ("Price", "50"),
                ("Subcategory", "S"),
            ]),
            row(&[
                ("Product Code", "X"),
                ("Name", "N"),
                ("Price", ""),
                ("Subcategory", "S"),
            ]),
        ],
        Vec::new(),
    );
    let (document, _) = build_document(&rows, &FeedOptions::default(), at(9, 0));

    assert_eq!(document.offers.len(), 2);
    let (main, variant) = (&document.offers[0], &document.offers[1]);
    assert_eq!(main.param("Тип комплекта"), Some("S"));
    assert_eq!(variant.param("Тип комплекта"), Some("Вариант 1"));
    assert_eq!(variant.price, "50");
    assert_eq!(variant.name, "N Вариант 1");
    assert_eq!(variant.id, variant_offer_id("X", "Вариант 1"));
    assert_eq!(variant.group_id, main.group_id);
}

#[test]
fn scenario_c_invalid_groups_are_dropped() {
    let rows = SourceRows::new(
        vec![
            row(&[("Name", "no code"), ("Price", "10")]),
            row(&[("Product Code", "B2"), ("Name", ""), ("Price", "10")]),
            row(&[("Product Code", "C3"), ("Name", "ok"), ("Price", "10")]),
            row(&[
                ("Product Code", "D4"),
                ("Name", "bad\u{0}byte"),
                ("Price", "10"),
            ]),
        ],
        Vec::new(),
    );
    let (document, report) = build_document(&rows, &FeedOptions::default(), at(9, 0));

    let ids: Vec<&str> = document.offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["C3_main"]);
    assert_eq!(report.groups, 4);
    assert_eq!(report.emitted_groups(), 1);
    let skipped: Vec<&str> = report.skipped.iter().map(GroupFailure::product_code).collect();
    assert_eq!(skipped, vec!["", "B2", "D4"]);
    assert!(matches!(report.skipped[2], GroupFailure::Build { .. }));
}

#[test]
fn offer_ids_are_unique_when_variant_labels_repeat() {
    let rows = SourceRows::new(
        vec![
            row(&[
                ("Product Code", "X1"),
                ("Name", "N"),
                ("Price", "10"),
                ("Subcategory", "S"),
            ]),
            row(&[("Product Code", "X1"), ("Subcategory", "Euro")]),
            row(&[("Product Code", "X1"), ("Subcategory", "Euro")]),
        ],
        Vec::new(),
    );
    let (document, _) = build_document(&rows, &FeedOptions::default(), at(9, 0));

    let ids: Vec<&str> = document.offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    let distinct: std::collections::HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 3);
    assert_eq!(ids[1], variant_offer_id("X1", "Euro"));
    assert_eq!(ids[2], variant_offer_id("X1", "Вариант 2"));
}

struct FlakySource {
    healthy: StaticRowSource,
    fail: std::sync::atomic::AtomicBool,
}

impl RowSource for FlakySource {
    fn fetch(&self) -> Result<SourceRows, SourceError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            Err(SourceError::Unavailable("auth expired".to_string()))
        } else {
            self.healthy.fetch()
        }
    }
}

#[test]
fn scenario_d_source_failure_keeps_previous_snapshot() {
    let source = Arc::new(FlakySource {
        healthy: StaticRowSource::new(catalog()),
        fail: std::sync::atomic::AtomicBool::new(false),
    });
    let snapshot = Arc::new(FeedSnapshot::new());
    let refresher = Refresher::new(
        FeedCompiler::default(),
        Arc::clone(&source) as Arc<dyn RowSource>,
        Arc::clone(&snapshot),
    );

    assert!(matches!(refresher.refresh_once(), RefreshOutcome::Published(_)));
    let before = snapshot.current().expect("published feed");

    source.fail.store(true, std::sync::atomic::Ordering::SeqCst);
    assert!(matches!(
        refresher.refresh_once(),
        RefreshOutcome::Failed(FeedError::SourceUnavailable { .. })
    ));
    let after = snapshot.current().expect("previous feed still served");
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn groups_follow_first_seen_order_with_variants_after_main() {
    let (document, report) = build_document(&catalog(), &FeedOptions::default(), at(9, 0));

    let ids: Vec<String> = document.offers.iter().map(|o| o.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            "KPB-101_main".to_string(),
            variant_offer_id("KPB-101", "Семейный"),
            variant_offer_id("KPB-101", "Вариант 2"),
            "ABC_main".to_string(),
            "XYZ_main".to_string(),
        ]
    );
    assert_eq!(report.offers, 5);

    let groups: Vec<u32> = document.offers.iter().map(|o| o.group_id.get()).collect();
    assert_eq!(groups, vec![101, 101, 101, 1, 2]);

    let OfferKind::Main { name_secondary, .. } = &document.offers[0].kind else {
        panic!("expected main offer first");
    };
    assert_eq!(name_secondary, "Комплект Сатин UA");
    assert_eq!(
        document.offers[0].pictures,
        vec!["https://img/101-1.jpg", "https://img/101-3.jpg"]
    );
    assert_eq!(document.offers[1].pictures, vec!["https://img/101-fam.jpg"]);
    assert_eq!(document.offers[2].price, "1250");
}

#[test]
fn compiling_twice_differs_only_in_timestamp() {
    let compiler = FeedCompiler::default();
    let source = StaticRowSource::new(catalog());
    let first = compiler.compile_at(&source, at(8, 0)).unwrap();
    let second = compiler.compile_at(&source, at(12, 0)).unwrap();

    assert_ne!(first.xml, second.xml);
    let strip = |xml: &str| xml.replace("2024-06-01 08:00", "").replace("2024-06-01 12:00", "");
    assert_eq!(strip(&first.xml), strip(&second.xml));
}

#[test]
fn compiled_feed_round_trips() {
    let compiled = FeedCompiler::default()
        .compile_at(&StaticRowSource::new(catalog()), at(10, 15))
        .unwrap();
    assert_eq!(compiled.content_type(), "application/xml");
    assert_eq!(compiled.encoding(), "UTF-8");

    let feed = read_feed(&compiled.xml).unwrap();
    assert_eq!(feed.date, "2024-06-01 10:15");
    assert_eq!(feed.offers.len(), compiled.report.offers);

    let main = &feed.offers[0];
    assert_eq!(main.id, "KPB-101_main");
    assert_eq!(main.group_id, 101);
    assert_eq!(
        main.field("description"),
        Some("<h2>Описание комплекта</h2><p>Мягкий сатин</p>")
    );
    assert_eq!(
        main.field("description_ua"),
        Some("<h2>Опис комплекту</h2><p>М'який сатин</p>")
    );
    assert_eq!(main.field("price"), Some("1250"));
    assert_eq!(main.param("Тип тканини"), Some("Сатин"));
    assert_eq!(main.param("Плотність(г/м2)"), Some("135"));
    assert_eq!(main.param("Тип комплекта"), Some("Евро"));

    let variant = &feed.offers[1];
    assert_eq!(variant.field("name"), Some("Комплект Сатин Семейный"));
    assert_eq!(variant.field("price"), Some("1500"));
    assert_eq!(variant.param("Тип комплекта"), Some("Семейный"));
}

#[test]
fn report_summary_snapshot() {
    let (document, report) = build_document(&catalog(), &FeedOptions::default(), at(9, 0));
    let lines: Vec<String> = document
        .offers
        .iter()
        .map(|o| {
            let kind = if o.is_main() { "main" } else { "variant" };
            format!("{kind} {} group={} price={} name={}", o.id, o.group_id, o.price, o.name)
        })
        .collect();
    let summary = format!(
        "rows={}/{} groups={} offers={}\n{}",
        report.primary_rows,
        report.secondary_rows,
        report.groups,
        report.offers,
        lines.join("\n")
    );
    insta::assert_snapshot!(summary, @r"
    rows=5/2 groups=3 offers=5
    main KPB-101_main group=101 price=1250 name=Комплект Сатин
    variant KPB-101_0e82e319 group=101 price=1500 name=Комплект Сатин Семейный
    variant KPB-101_d9076ffa group=101 price=1250 name=Комплект Сатин Вариант 2
    main ABC_main group=1 price=300 name=Плед
    main XYZ_main group=2 price=200 name=Подушка
    ");
}
