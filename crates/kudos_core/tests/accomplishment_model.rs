use kudos_core::{
    resolve_color, validate_text, Accomplishment, AccomplishmentColor, ValidationError,
    FALLBACK_GRAY, MAX_CHARACTERS,
};

#[test]
fn validation_properties_hold_across_lengths() {
    for len in 1..=MAX_CHARACTERS {
        let raw = format!("  {}\n", "x".repeat(len));
        let validated = validate_text(&raw).unwrap();
        assert_eq!(validated.chars().count(), len);
        assert_eq!(validate_text(&validated).unwrap(), validated);
    }
    for len in [MAX_CHARACTERS + 1, MAX_CHARACTERS * 2] {
        assert_eq!(
            validate_text(&"y".repeat(len)),
            Err(ValidationError::TextTooLong {
                max_length: MAX_CHARACTERS
            })
        );
    }
}

#[test]
fn palette_resolution_and_fallback() {
    for name in AccomplishmentColor::available_names() {
        assert_ne!(resolve_color(name), FALLBACK_GRAY);
    }
    assert_eq!(resolve_color("nonexistent"), FALLBACK_GRAY);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let item =
        Accomplishment::from_text("Mi primer logro", Some(AccomplishmentColor::Blue)).unwrap();

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], item.id().to_string());
    assert_eq!(json["text"], "Mi primer logro");
    assert_eq!(json["color"], "blue");
    assert!(json["photo_data"].is_null());
    assert!(json["date"].is_string());

    let decoded: Accomplishment = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_rejects_record_without_content() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "   ",
        "photo_data": null,
        "color": "blue",
        "date": "2026-02-13T10:00:00Z"
    });

    let err = serde_json::from_value::<Accomplishment>(value).unwrap_err();
    assert!(
        err.to_string().contains("text must not be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_accepts_captionless_photo() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "",
        "photo_data": [1, 2, 3],
        "color": "pink",
        "date": "2026-02-13T10:00:00Z"
    });

    let item = serde_json::from_value::<Accomplishment>(value).unwrap();
    assert!(item.has_photo());
    assert!(!item.has_text());
}
