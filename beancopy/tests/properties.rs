use beancopy::{Bean, CopyError, Value, ValueMap};
use beancopy_testhelpers::test;

#[derive(Bean, Debug, Default, Clone, PartialEq)]
struct Geo {
    lat: f64,
    lon: f64,
}

#[derive(Bean, Debug, Default, Clone, PartialEq)]
struct Site {
    name: String,
    geo: Geo,
    backup: Option<Geo>,
    tags: Vec<String>,
    #[bean(read_only)]
    created: u32,
}

fn oslo() -> Site {
    Site {
        name: "Oslo".into(),
        geo: Geo {
            lat: 59.91,
            lon: 10.75,
        },
        backup: None,
        tags: vec!["north".into()],
        created: 7,
    }
}

#[test]
fn get_property_walks_paths() {
    let site = oslo();
    assert_eq!(beancopy::get_property(&site, "name")?, Value::from("Oslo"));
    assert_eq!(beancopy::get_property(&site, "geo.lat")?, Value::from(59.91));
    assert_eq!(beancopy::get_property(&site, "tags[0]")?, Value::from("north"));
    // null on the way reads as null
    assert_eq!(beancopy::get_property(&site, "backup.lat")?, Value::Null);

    assert!(matches!(
        beancopy::get_property(&site, "tags[3]"),
        Err(CopyError::NoSuchProperty { .. })
    ));
    assert!(matches!(
        beancopy::get_property(&site, "nope"),
        Err(CopyError::NoSuchProperty { .. })
    ));
    assert!(matches!(
        beancopy::get_property(&site, "geo..lat"),
        Err(CopyError::InvalidExpression { .. })
    ));
}

#[test]
fn set_property_converts_and_nests() {
    let mut site = oslo();
    beancopy::set_property(&mut site, "geo.lon", "11.0")?;
    assert_eq!(site.geo.lon, 11.0);
    assert_eq!(site.geo.lat, 59.91);

    beancopy::set_property(&mut site, "backup.lat", 60)?;
    assert_eq!(
        site.backup,
        Some(Geo {
            lat: 60.0,
            lon: 0.0
        })
    );

    beancopy::set_property(&mut site, "tags[1]", "fjord")?;
    beancopy::set_property(&mut site, "tags[0]", "nord")?;
    assert_eq!(site.tags, ["nord", "fjord"]);

    assert!(matches!(
        beancopy::set_property(&mut site, "tags[5]", "x"),
        Err(CopyError::InvalidExpression { .. })
    ));
    assert!(matches!(
        beancopy::set_property(&mut site, "created", 1),
        Err(CopyError::NotWritable { .. })
    ));
    assert!(matches!(
        beancopy::set_property(&mut site, "height", 1),
        Err(CopyError::NoSuchProperty { .. })
    ));
    assert!(matches!(
        beancopy::set_property(&mut site, "geo.lat", "far north"),
        Err(CopyError::ConversionFailed { .. })
    ));
}

#[test]
fn set_property_on_maps_adds_entries() {
    let mut map = ValueMap::new();
    beancopy::set_property(&mut map, "a", 1)?;
    beancopy::set_property(&mut map, "b.c", true)?;
    beancopy::set_property(&mut map, "d[0]", "x")?;
    assert_eq!(
        Value::Map(map),
        Value::map([
            ("a", Value::from(1)),
            ("b", Value::map([("c", true)])),
            ("d", Value::list(["x"])),
        ])
    );
}

#[test]
fn flat_maps_spell_out_nested_structs() {
    let site = oslo();
    let flat = beancopy::create_flat_map_and_copy(&site)?;
    assert_eq!(
        flat.keys().collect::<Vec<_>>(),
        ["name", "geo.lat", "geo.lon", "backup", "tags", "created"]
    );
    assert_eq!(flat.get("geo.lon"), Some(&Value::from(10.75)));
    assert_eq!(flat.get("tags"), Some(&Value::list(["north"])));

    // and dotted keys find their way back in
    let mut again = Site::default();
    beancopy::copy(&flat, &mut again)?;
    assert_eq!(again.geo, site.geo);
    assert_eq!(again.tags, site.tags);
    assert_eq!(again.created, 0);
}

#[test]
fn dotted_keys_with_indices() {
    let mut source = ValueMap::new();
    source.insert("name", Value::from("Bergen"));
    source.insert("tags[1]", Value::from("rain"));
    source.insert("tags[0]", Value::from("west"));
    source.insert("backup.lon", Value::from("5.32"));

    let site: Site = beancopy::create_and_copy(&source)?;
    assert_eq!(site.name, "Bergen");
    assert_eq!(site.tags, ["west", "rain"]);
    assert_eq!(
        site.backup,
        Some(Geo {
            lat: 0.0,
            lon: 5.32
        })
    );
}

#[test]
fn map_snapshot() {
    let map = beancopy::create_map_and_copy(&oslo())?;
    insta::assert_snapshot!(Value::Map(map).to_string(), @r#"{"name": "Oslo", "geo": {"lat": 59.91, "lon": 10.75}, "backup": null, "tags": ["north"], "created": 7}"#);
}

#[test]
fn indexed_keys_cannot_run_away() {
    for key in ["tags[18446744073709551615]", "tags[100000000000]"] {
        let mut source = ValueMap::new();
        source.insert("name", Value::from("Tromsø"));
        source.insert(key, Value::from("x"));
        let err = beancopy::create_and_copy::<Site>(&source).unwrap_err();
        assert!(
            matches!(err, CopyError::InvalidExpression { ref expression, .. } if expression == key),
            "{key}: {err:?}"
        );
    }

    // a little padding is still fine
    let mut source = ValueMap::new();
    source.insert("tags[2]", Value::from("midnight sun"));
    source.insert("name", Value::from("Tromsø"));
    let mut target = ValueMap::new();
    beancopy::copy(&source, &mut target)?;
    assert_eq!(
        target.get("tags"),
        Some(&Value::list([Value::Null, Value::Null, Value::from("midnight sun")]))
    );
}

#[test]
fn get_property_as_converts() {
    let site = oslo();
    let lat: String = beancopy::get_property_as(&site, "geo.lat")?;
    assert_eq!(lat, "59.91");
    let created: i64 = beancopy::get_property_as(&site, "created")?;
    assert_eq!(created, 7);
    let tags: std::collections::BTreeSet<String> = beancopy::get_property_as(&site, "tags")?;
    assert_eq!(tags.into_iter().collect::<Vec<_>>(), ["north"]);
    let backup: Option<Geo> = beancopy::get_property_as(&site, "backup")?;
    assert_eq!(backup, None);

    let err = beancopy::get_property_as::<u8>(&site, "name").unwrap_err();
    assert!(matches!(err, CopyError::ConversionFailed { .. }));
    assert_eq!(err.property(), Some("name"));
}
