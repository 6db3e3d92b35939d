use beancopy::{Bean, CopyError, CopyOptions, Value, ValueMap};
use beancopy_testhelpers::test;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

#[derive(Bean, Debug, Default, Clone, PartialEq)]
struct Address {
    street: String,
    city: String,
    zip: Option<String>,
}

#[derive(Bean, Debug, Default, Clone, PartialEq)]
struct Person {
    id: i64,
    name: String,
    age: Option<u8>,
    emails: Vec<String>,
    address: Address,
}

#[derive(Bean, Debug, Default, PartialEq)]
struct PersonForm {
    id: String,
    name: String,
    age: String,
    emails: BTreeSet<String>,
    address: BTreeMap<String, Value>,
}

fn ada() -> Person {
    Person {
        id: 1815,
        name: "Ada".into(),
        age: Some(36),
        emails: vec!["ada@example.com".into(), "countess@example.com".into()],
        address: Address {
            street: "St James's Square".into(),
            city: "London".into(),
            zip: None,
        },
    }
}

#[test]
fn struct_to_map_and_back() {
    let person = ada();
    let map = beancopy::create_map_and_copy(&person)?;
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        ["id", "name", "age", "emails", "address"]
    );
    assert_eq!(map.get("id"), Some(&Value::from(1815)));

    let back: Person = beancopy::create_and_copy(&map)?;
    assert_eq!(back, person);
}

#[test]
fn map_to_struct_and_back() {
    #[derive(Bean, Debug, Default)]
    struct Tagged {
        id: u32,
        tags: Vec<String>,
        uniq: HashSet<i64>,
        ranks: BTreeSet<u8>,
    }

    let map: ValueMap = [
        ("id", Value::from(7)),
        ("tags", Value::list(["a", "b"])),
        ("uniq", Value::set([2, 1])),
        ("ranks", Value::sorted_set([3, 1])),
    ]
    .into_iter()
    .collect();

    let tagged: Tagged = beancopy::create_and_copy(&map)?;
    assert_eq!(tagged.id, 7);
    assert_eq!(tagged.tags, ["a", "b"]);

    let back = beancopy::create_map_and_copy(&tagged)?;
    assert_eq!(back, map);
}

#[test]
fn struct_to_struct_converts_on_the_way() {
    let form = PersonForm {
        id: "7".into(),
        name: "Grace".into(),
        age: "85".into(),
        emails: ["b@x.org", "a@x.org"].into_iter().map(String::from).collect(),
        address: [("city".to_string(), Value::from("Arlington"))]
            .into_iter()
            .collect(),
    };

    let person: Person = beancopy::create_and_copy(&form)?;
    assert_eq!(person.id, 7);
    assert_eq!(person.age, Some(85));
    assert_eq!(person.emails, ["a@x.org", "b@x.org"]);
    assert_eq!(person.address.city, "Arlington");
    assert_eq!(person.address.street, "");
}

#[test]
fn nested_structs_are_merged_not_replaced() {
    let mut person = ada();
    let mut edits = ValueMap::new();
    edits.insert("address", Value::map([("zip", "SW1Y")]));
    beancopy::copy(&edits, &mut person)?;

    assert_eq!(person.address.zip.as_deref(), Some("SW1Y"));
    assert_eq!(person.address.city, "London");
    assert_eq!(person.name, "Ada");
}

#[test]
fn includes_and_excludes() {
    let source = ada();

    let only_name: Person = beancopy::create_and_copy_includes(&source, &["name", "nope"])?;
    assert_eq!(only_name.name, "Ada");
    assert_eq!(only_name.id, 0);
    assert!(only_name.emails.is_empty());

    let mut target = Person::default();
    beancopy::copy_excludes(&source, &mut target, &["emails", "address"])?;
    assert_eq!(target.id, 1815);
    assert!(target.emails.is_empty());
    assert_eq!(target.address, Address::default());

    // an include-list makes the exclude-list moot
    let options = CopyOptions::builder()
        .includes(&["id"])
        .excludes(&["id"])
        .build();
    let both: Person = beancopy::create_and_copy_with(&source, options)?;
    assert_eq!(both.id, 1815);
    assert_eq!(both.name, "");
}

#[test]
fn nulls_overwrite_unless_excluded() {
    let mut source = ValueMap::new();
    source.insert("age", Value::Null);
    source.insert("name", Value::Null);
    source.insert("id", Value::from(2));
    source.insert("emails", Value::Null);

    let mut target = ada();
    beancopy::copy(&source, &mut target)?;
    assert_eq!(target.age, None);
    // a null cannot go into a String or a Vec, so they stay
    assert_eq!(target.name, "Ada");
    assert_eq!(target.emails.len(), 2);
    assert_eq!(target.id, 2);

    let mut target = ada();
    beancopy::copy_excludes_null(&source, &mut target)?;
    assert_eq!(target.age, Some(36));
    assert_eq!(target.id, 2);
}

#[test]
fn maps_to_maps_keep_every_entry() {
    let mut source: HashMap<String, Value> = HashMap::new();
    source.insert("a".into(), Value::from(1));
    source.insert("b".into(), Value::Null);

    let mut target: BTreeMap<String, Value> = BTreeMap::new();
    beancopy::copy(&source, &mut target)?;
    assert_eq!(target.len(), 2);
    assert_eq!(target.get("b"), Some(&Value::Null));

    let mut target: BTreeMap<String, Value> = BTreeMap::new();
    beancopy::copy_excludes_null(&source, &mut target)?;
    assert_eq!(target.keys().collect::<Vec<_>>(), ["a"]);
}

#[test]
fn collections_change_shape() {
    #[derive(Bean, Default)]
    struct Lists {
        tags: Vec<i64>,
        unique: Vec<i64>,
        fixed: [u16; 3],
        boxed: Box<[String]>,
    }

    #[derive(Bean, Default)]
    struct Sets {
        tags: HashSet<i64>,
        unique: BTreeSet<i64>,
        fixed: Vec<String>,
        boxed: Vec<i32>,
    }

    let mut source = ValueMap::new();
    source.insert("tags", Value::list([1, 10, 100, 10]));
    source.insert("fixed", Value::list(["1", "2", "3"]));
    source.insert("boxed", Value::sorted_set([3, 1, 2]));
    source.insert("unique", Value::array([5, 5, 4]));

    let sets: Sets = beancopy::create_and_copy(&source)?;
    assert_eq!(sets.tags.len(), 3);
    assert!(sets.tags.contains(&100));
    assert_eq!(sets.unique.iter().copied().collect::<Vec<_>>(), [4, 5]);
    assert_eq!(sets.fixed, ["1", "2", "3"]);
    assert_eq!(sets.boxed, [1, 2, 3]);

    let lists: Lists = beancopy::create_and_copy(&source)?;
    assert_eq!(lists.tags, [1, 10, 100, 10]);
    assert_eq!(lists.unique, [5, 5, 4]);
    assert_eq!(lists.fixed, [1, 2, 3]);
    assert_eq!(&*lists.boxed, ["1", "2", "3"]);
}

#[test]
fn fixed_arrays_need_the_right_length() {
    #[derive(Bean, Default, Debug)]
    struct Rgb {
        channels: [u8; 3],
    }

    let mut source = ValueMap::new();
    source.insert("channels", Value::list([255, 0]));
    let err = beancopy::create_and_copy::<Rgb>(&source).unwrap_err();
    assert!(matches!(err, CopyError::CoercionFailed { .. }));
    assert_eq!(err.property(), Some("channels"));
}

#[test]
fn arrays_of_structs_through_lists() {
    #[derive(Bean, Default, Debug, Clone, PartialEq)]
    struct Line {
        sku: String,
        quantity: u32,
    }

    #[derive(Bean, Default, Debug)]
    struct Order {
        lines: [Line; 2],
    }

    #[derive(Bean, Default, Debug)]
    struct Draft {
        lines: Vec<Line>,
    }

    let order = Order {
        lines: [
            Line {
                sku: "A-1".into(),
                quantity: 2,
            },
            Line {
                sku: "B-7".into(),
                quantity: 1,
            },
        ],
    };

    let draft: Draft = beancopy::create_and_copy(&order)?;
    assert_eq!(draft.lines, order.lines);

    let again: Order = beancopy::create_and_copy(&draft)?;
    assert_eq!(again.lines, order.lines);
}

#[test]
fn shape_mismatches_are_reported_with_their_path() {
    let mut source = ValueMap::new();
    source.insert("address", Value::list(["London"]));
    let err = beancopy::create_and_copy::<Person>(&source).unwrap_err();
    assert!(matches!(
        err,
        CopyError::CoercionFailed { from: "list", .. }
    ));
    assert_eq!(err.property(), Some("address"));

    let mut source = ValueMap::new();
    source.insert("emails", Value::list([Value::map([("x", 1)])]));
    let err = beancopy::create_and_copy::<Person>(&source).unwrap_err();
    assert_eq!(err.property(), Some("emails[0]"));
}

#[test]
fn read_only_properties() {
    #[derive(Bean, Default, Debug)]
    struct Account {
        #[bean(read_only)]
        id: u32,
        owner: String,
    }

    let mut source = ValueMap::new();
    source.insert("id", Value::from(9));
    source.insert("owner", Value::from("Lin"));

    // skipped quietly when not asked for by name
    let account: Account = beancopy::create_and_copy(&source)?;
    assert_eq!(account.id, 0);
    assert_eq!(account.owner, "Lin");

    let err = beancopy::create_and_copy_includes::<Account>(&source, &["id"]).unwrap_err();
    assert!(matches!(err, CopyError::NotWritable { .. }));

    // still readable
    let account = Account {
        id: 3,
        owner: "Lin".into(),
    };
    let map = beancopy::create_map_and_copy(&account)?;
    assert_eq!(map.get("id"), Some(&Value::from(3u32)));
}

#[test]
fn write_only_properties_are_never_read() {
    #[derive(Bean, Default, Debug)]
    struct Login {
        user: String,
        #[bean(write_only)]
        password: String,
    }

    let login = Login {
        user: "root".into(),
        password: "hunter2".into(),
    };
    let map = beancopy::create_map_and_copy(&login)?;
    assert_eq!(map.keys().collect::<Vec<_>>(), ["user"]);

    let mut source = ValueMap::new();
    source.insert("password", Value::from("swordfish"));
    let login: Login = beancopy::create_and_copy(&source)?;
    assert_eq!(login.password, "swordfish");
}

#[test]
fn deep_graphs_hit_the_depth_limit() {
    let mut source = ValueMap::new();
    source.insert(
        "tree",
        Value::list([Value::list([Value::list([Value::list([1])])])]),
    );

    #[derive(Bean, Default, Debug)]
    struct Deep {
        tree: Vec<Vec<Vec<Vec<i32>>>>,
    }

    let options = CopyOptions::builder().max_depth(3).build();
    let err = beancopy::create_and_copy_with::<Deep>(&source, options).unwrap_err();
    assert!(matches!(err, CopyError::DepthLimitExceeded { limit: 3, .. }));
    assert_eq!(err.property(), Some("tree[0][0][0]"));

    let deep: Deep = beancopy::create_and_copy(&source)?;
    assert_eq!(deep.tree, [[[[1]]]]);
}

#[test]
fn renamed_properties_copy_by_their_new_name() {
    #[derive(Bean, Default, Debug)]
    #[bean(rename_all = "camelCase")]
    struct Camel {
        first_name: String,
        #[bean(rename = "surname")]
        last_name: String,
    }

    let mut source = ValueMap::new();
    source.insert("firstName", Value::from("Alan"));
    source.insert("surname", Value::from("Turing"));
    source.insert("last_name", Value::from("ignored"));

    let camel: Camel = beancopy::create_and_copy(&source)?;
    assert_eq!(camel.first_name, "Alan");
    assert_eq!(camel.last_name, "Turing");
}
