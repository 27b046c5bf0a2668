use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use kudos_core::db::open_db_in_memory;
use kudos_core::{
    build_slides, Accomplishment, AccomplishmentColor, AccomplishmentService, Slide,
    SqliteAccomplishmentRepository, ThemedGradient,
};
use uuid::Uuid;

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn text_item(text: &str, color: AccomplishmentColor, date: DateTime<Utc>) -> Accomplishment {
    let mut item = Accomplishment::from_text(text, Some(color)).unwrap();
    item.set_date(date);
    item
}

#[test]
fn empty_year_yields_intro_and_outro_only() {
    let reference = at(2026, 6, 15, 12);
    assert_eq!(
        build_slides(&[], &reference),
        vec![
            Slide::Intro {
                year: 2026,
                count: 0
            },
            Slide::Outro
        ]
    );

    let last_year = vec![text_item("old", AccomplishmentColor::Blue, at(2025, 12, 31, 10))];
    assert_eq!(build_slides(&last_year, &reference).len(), 2);
}

#[test]
fn current_year_entries_are_sorted_and_projected() {
    let reference = at(2026, 10, 19, 9);
    let mut photo = Accomplishment::from_photo(vec![7, 7, 7], None).unwrap();
    photo.set_date(at(2026, 3, 1, 8));
    let mut captioned = Accomplishment::from_photo(vec![8], Some("cima")).unwrap();
    captioned.set_date(at(2026, 7, 4, 8));

    let entities = vec![
        text_item("september", AccomplishmentColor::Green, at(2026, 9, 1, 8)),
        photo,
        text_item("next year", AccomplishmentColor::Pink, at(2027, 1, 2, 8)),
        text_item("january", AccomplishmentColor::Orange, at(2026, 1, 5, 8)),
        captioned,
    ];

    let slides = build_slides(&entities, &reference);
    assert_eq!(
        slides,
        vec![
            Slide::Intro {
                year: 2026,
                count: 4
            },
            Slide::Text {
                text: "january".to_string(),
                gradient_key: "orange".to_string()
            },
            Slide::Photo {
                image: vec![7, 7, 7],
                caption: None
            },
            Slide::Photo {
                image: vec![8],
                caption: Some("cima".to_string())
            },
            Slide::Text {
                text: "september".to_string(),
                gradient_key: "green".to_string()
            },
            Slide::Outro,
        ]
    );
}

#[test]
fn unknown_color_still_renders_with_fallback_gradient() {
    let reference = at(2026, 5, 1, 0);
    let legacy = Accomplishment::restore(
        Uuid::new_v4(),
        "legacy".to_string(),
        None,
        "unknownColor".to_string(),
        at(2026, 2, 2, 2),
    )
    .unwrap();

    let slides = build_slides(&[legacy], &reference);
    match &slides[1] {
        Slide::Text { gradient_key, .. } => {
            assert_eq!(gradient_key, "unknownColor");
            assert_eq!(ThemedGradient::for_key(gradient_key), ThemedGradient::FALLBACK);
        }
        other => panic!("unexpected slide: {other:?}"),
    }
}

#[test]
fn year_is_evaluated_in_reference_time_zone() {
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let reference = new_york.with_ymd_and_hms(2025, 12, 31, 22, 0, 0).unwrap();
    // 2026-01-01T02:00Z is still 2025-12-31 in UTC-5.
    let entity = text_item("late", AccomplishmentColor::Blue, at(2026, 1, 1, 2));

    let slides = build_slides(&[entity], &reference);
    assert_eq!(
        slides[0],
        Slide::Intro {
            year: 2025,
            count: 1
        }
    );
}

#[test]
fn projection_is_repeatable_and_leaves_input_untouched() {
    let reference = at(2026, 8, 8, 8);
    let entities = vec![
        text_item("b", AccomplishmentColor::Blue, at(2026, 2, 1, 0)),
        text_item("a", AccomplishmentColor::Yellow, at(2026, 1, 1, 0)),
    ];
    let before = entities.clone();

    let first = build_slides(&entities, &reference);
    let second = build_slides(&entities, &reference);
    assert_eq!(first, second);
    assert_eq!(entities, before);
}

#[test]
fn service_builds_slides_from_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = AccomplishmentService::new(SqliteAccomplishmentRepository::new(&conn));
    service.record_text("primero", None).unwrap();
    service.record_photo(vec![1], None).unwrap();

    let slides = service.wrapped(&Utc::now()).unwrap();
    assert_eq!(slides.len(), 4);
    assert!(matches!(slides[0], Slide::Intro { count: 2, .. }));
    assert_eq!(slides[3], Slide::Outro);
}
