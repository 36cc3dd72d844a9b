use integration_tests::{memory_portal, png_upload, submission};
use lf_core::models::{ItemKind, RawSubmission, RequiredField};
use lf_core::{AppError, ItemQuery};

fn ids(items: &[lf_core::Item]) -> Vec<String> {
    items.iter().map(|it| it.id.clone()).collect()
}

#[tokio::test]
async fn submit_filter_resolve_delete() {
    let (_, portal) = memory_portal();

    let a = portal
        .on_submit(submission("lost", "Headphones", "Electronics"), None)
        .await
        .unwrap();
    let b = portal
        .on_submit(submission("found", "Novel", "Books"), None)
        .await
        .unwrap();

    let lost = portal.on_filter_change(&ItemQuery::from_raw("", "", "lost", ""));
    assert_eq!(ids(&lost), vec![a.id.clone()]);

    assert!(portal.on_resolve(&a.id).unwrap());
    let all = portal.on_filter_change(&ItemQuery::default());
    let a_now = all.iter().find(|it| it.id == a.id).unwrap();
    let b_now = all.iter().find(|it| it.id == b.id).unwrap();
    assert!(a_now.resolved);
    assert_eq!(a_now.name, a.name);
    assert_eq!(a_now.created_at, a.created_at);
    assert_eq!(b_now, &b);

    assert!(portal.on_delete(&b.id).unwrap());
    let remaining = portal.on_filter_change(&ItemQuery::default());
    assert_eq!(ids(&remaining), vec![a.id.clone()]);
    assert!(remaining[0].resolved);
}

#[tokio::test]
async fn valid_submissions_are_complete_and_unresolved() {
    let (_, portal) = memory_portal();
    let item = portal
        .on_submit(submission("found", "  Bike lock ", "Accessories"), None)
        .await
        .unwrap();

    assert_eq!(item.kind, ItemKind::Found);
    assert_eq!(item.name, "Bike lock");
    for value in [&item.name, &item.category, &item.location, &item.date, &item.contact] {
        assert!(!value.trim().is_empty());
    }
    assert!(!item.resolved);
}

#[tokio::test]
async fn each_blank_required_field_is_reported_and_nothing_is_stored() {
    let (store, portal) = memory_portal();
    portal
        .on_submit(submission("lost", "Watch", "Accessories"), None)
        .await
        .unwrap();
    let before = store.raw();

    let blanks: [(RequiredField, RawSubmission); 5] = [
        (RequiredField::Name, RawSubmission { name: Some(" ".into()), ..submission("lost", "x", "y") }),
        (RequiredField::Category, RawSubmission { category: Some("".into()), ..submission("lost", "x", "y") }),
        (RequiredField::Location, RawSubmission { location: None, ..submission("lost", "x", "y") }),
        (RequiredField::Date, RawSubmission { date: None, ..submission("lost", "x", "y") }),
        (RequiredField::Contact, RawSubmission { contact: Some("  ".into()), ..submission("lost", "x", "y") }),
    ];

    for (field, raw) in blanks {
        let err = portal.on_submit(raw, Some(png_upload())).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(f) if f == field));
        assert_eq!(store.raw(), before);
    }
}

#[tokio::test]
async fn image_is_inlined_as_data_url() {
    let (_, portal) = memory_portal();
    let item = portal
        .on_submit(submission("found", "Glasses", "Accessories"), Some(png_upload()))
        .await
        .unwrap();
    assert_eq!(
        item.image.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );
}

#[tokio::test]
async fn unknown_ids_are_noops() {
    let (store, portal) = memory_portal();
    portal
        .on_submit(submission("lost", "Keys", "Keys"), None)
        .await
        .unwrap();
    let before = store.raw();

    assert!(!portal.on_resolve("nope").unwrap());
    assert!(!portal.on_delete("nope").unwrap());
    assert_eq!(store.raw(), before);
}
