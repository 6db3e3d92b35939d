//! Process-wide options live in their own test binary, and in a single test,
//! so nothing else observes them.

use beancopy::{Bean, CopyOptions, Value, ValueMap};
use beancopy_testhelpers::test;
use chrono::NaiveDate;

#[derive(Bean, Debug, Default)]
struct Shipment {
    id: String,
    shipped: Option<NaiveDate>,
    weight: String,
    notes: Option<String>,
}

#[test]
fn configured_options_apply_under_per_call_ones() {
    let mut source = ValueMap::new();
    source.insert("id", Value::from("S-1"));
    source.insert("shipped", Value::from("01/02/2024"));
    source.insert("weight", Value::from(1234.5));
    source.insert("notes", Value::Null);

    beancopy::configure(
        CopyOptions::builder()
            .date_pattern("%d/%m/%Y")
            .number_pattern("#,##0.0")
            .excludes(&["id"])
            .excludes_null()
            .build(),
    );

    let mut shipment = Shipment {
        notes: Some("fragile".into()),
        ..Shipment::default()
    };
    beancopy::copy(&source, &mut shipment)?;
    assert_eq!(shipment.id, "");
    assert_eq!(shipment.shipped, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(shipment.weight, "1,234.5");
    assert_eq!(shipment.notes.as_deref(), Some("fragile"));

    // per-call selections replace the configured ones
    let shipment: Shipment = beancopy::create_and_copy_includes(&source, &["id"])?;
    assert_eq!(shipment.id, "S-1");
    assert_eq!(shipment.shipped, None);

    // per-call patterns come first
    let options = CopyOptions::builder().date_pattern("%m/%d/%Y").build();
    let shipment: Shipment = beancopy::create_and_copy_with(&source, options)?;
    assert_eq!(shipment.shipped, NaiveDate::from_ymd_opt(2024, 1, 2));

    // a configured include-list does not bring back per-call excludes
    beancopy::configure(CopyOptions::builder().includes(&["id", "weight"]).build());
    let mut shipment = Shipment::default();
    beancopy::copy_excludes(&source, &mut shipment, &["weight", "shipped"])?;
    assert_eq!(shipment.id, "S-1");
    assert_eq!(shipment.weight, "");

    beancopy::reset_configuration();

    source.insert("shipped", Value::from("2024-02-01"));
    let shipment: Shipment = beancopy::create_and_copy(&source)?;
    assert_eq!(shipment.id, "S-1");
    assert_eq!(shipment.weight, "1234.5");
    assert_eq!(shipment.shipped, NaiveDate::from_ymd_opt(2024, 2, 1));
}
