use simplelog::{LevelFilter, TestLogger};
use tabula::{
    Column, ColumnWidth, Filter, FilterQuery, Record, RowRef, SelectionMode, SortDirection, Table,
    TableConfig, TableError, TableEvent, TableRow, Value, VisibleRange,
};

#[derive(Debug)]
struct Person {
    id: i64,
    name: String,
}

impl TableRow for Person {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            _ => None,
        }
    }
}

fn person(id: i64, name: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
    }
}

fn people_table(config: TableConfig, people: Vec<Person>) -> Table<Person> {
    Table::builder()
        .columns([Column::new("id"), Column::new("name")])
        .config(config)
        .rows(people)
        .build()
        .unwrap()
}

fn ids(rows: &[RowRef<Person>]) -> Vec<i64> {
    rows.iter().map(|row| row.id).collect()
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_by_name_ascending() {
    let _ = TestLogger::init(LevelFilter::Trace, simplelog::Config::default());

    let table = people_table(TableConfig::default(), vec![person(1, "b"), person(2, "a")]);
    assert_eq!(ids(&table.derive()), vec![1, 2]);

    let sort = table.set_sort("name");
    assert_eq!(sort, Some(("name".to_string(), SortDirection::Asc)));
    assert_eq!(ids(&table.derive()), vec![2, 1]);
}

#[test]
fn test_set_sort_twice_toggles_second_time() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "a"), person(2, "c"), person(3, "b")],
    );

    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![1, 3, 2]);
    assert_eq!(table.sort_state().direction(), SortDirection::Asc);

    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![2, 3, 1]);
    assert_eq!(table.sort_state().direction(), SortDirection::Desc);
}

#[test]
fn test_default_sort_applies_and_first_click_flips() {
    let config = TableConfig::default().with_default_sort("name", SortDirection::Asc);
    let table = people_table(config, vec![person(1, "b"), person(2, "a")]);

    // Default sort applies before any click
    assert_eq!(ids(&table.derive()), vec![2, 1]);
    assert!(table.sort_state().active().is_none());

    // Clicking the default column shows the opposite order
    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![1, 2]);
    assert_eq!(table.sort_state().direction(), SortDirection::Desc);
}

#[test]
fn test_other_field_adopts_default_direction() {
    let config = TableConfig::default().with_default_sort("name", SortDirection::Desc);
    let table = people_table(config, vec![person(1, "b"), person(2, "a"), person(3, "c")]);

    let sort = table.set_sort("id");
    assert_eq!(sort, Some(("id".to_string(), SortDirection::Desc)));
    assert_eq!(ids(&table.derive()), vec![3, 2, 1]);
}

#[test]
fn test_unsortable_column_is_ignored() {
    let table = Table::builder()
        .columns([Column::new("id"), Column::new("name").unsortable()])
        .rows(vec![person(1, "b"), person(2, "a")])
        .build()
        .unwrap();

    assert_eq!(table.set_sort("name"), None);
    assert!(table.sort_state().active().is_none());
    assert_eq!(ids(&table.derive()), vec![1, 2]);
}

#[test]
fn test_reset_sort_restores_default() {
    let config = TableConfig::default().with_default_sort("id", SortDirection::Asc);
    let table = people_table(config, vec![person(2, "a"), person(1, "b")]);
    assert_eq!(ids(&table.derive()), vec![1, 2]);

    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![2, 1]);

    table.reset_sort();
    assert_eq!(ids(&table.derive()), vec![1, 2]);
}

#[test]
fn test_sort_indicator() {
    let table = people_table(TableConfig::default(), vec![]);
    assert_eq!(table.sort_indicator("name"), None);

    table.set_sort("name");
    assert_eq!(table.sort_indicator("name"), Some(SortDirection::Asc));
    assert_eq!(table.sort_indicator("id"), None);
}

#[test]
fn test_missing_fields_sort_last_in_both_directions() {
    let table = Table::builder()
        .column(Column::new("age"))
        .rows(vec![
            Record::new().set("name", "none"),
            Record::new().set("name", "old").set("age", 70),
            Record::new().set("name", "null").set("age", Value::Null),
            Record::new().set("name", "young").set("age", 20),
        ])
        .build()
        .unwrap();

    let names = |table: &Table<Record>| -> Vec<String> {
        table
            .derive()
            .iter()
            .map(|r| r.get_string("name").unwrap().unwrap_or_default().to_string())
            .collect()
    };

    table.set_sort("age");
    assert_eq!(names(&table), vec!["young", "old", "none", "null"]);

    table.set_sort("age");
    assert_eq!(names(&table), vec!["old", "young", "none", "null"]);
}

#[test]
fn test_equal_keys_keep_collection_order() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "x"), person(2, "a"), person(3, "x"), person(4, "x")],
    );

    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![2, 1, 3, 4]);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_query_filter_is_case_insensitive() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "alice"), person(2, "Bob"), person(3, "CARL")],
    );

    table.set_filter(Filter::query("A", ["name"]));
    assert_eq!(ids(&table.derive()), vec![1, 3]);
    assert!(table.is_filtered());
}

#[test]
fn test_query_matches_any_listed_field() {
    let table = people_table(
        TableConfig::default(),
        vec![person(12, "alice"), person(3, "bob")],
    );

    table.set_filter(Filter::query("2", ["name", "id", "missing"]));
    assert_eq!(ids(&table.derive()), vec![12]);
}

#[test]
fn test_empty_query_or_fields_shows_everything() {
    let table = people_table(TableConfig::default(), vec![person(1, "a"), person(2, "b")]);

    table.set_filter(Filter::query("", ["name"]));
    assert_eq!(table.len(), 2);

    table.set_filter(Filter::query("zzz", Vec::<String>::new()));
    assert_eq!(table.len(), 2);
    assert!(!table.is_filtered());
}

#[test]
fn test_predicate_wins_over_query() {
    let table = people_table(TableConfig::default(), vec![person(1, "a"), person(2, "b")]);

    table.set_filter(Filter::query("nothing matches", ["name"]));
    assert!(table.is_empty());

    table.set_filter(Filter::predicate(|p: &Person| p.id == 2));
    assert_eq!(ids(&table.derive()), vec![2]);
}

#[test]
fn test_clear_predicate_lets_query_take_over() {
    let table = people_table(TableConfig::default(), vec![person(1, "ada"), person(2, "bob")]);

    table.set_filter(Filter::predicate(|_: &Person| true));
    table.set_filter(Filter::query("ada", ["name"]));
    assert_eq!(table.derive().len(), 2);
    assert_eq!(table.filter_query(), Some(FilterQuery::new("ada", ["name"])));

    table.clear_predicate();
    assert_eq!(ids(&table.derive()), vec![1]);
    assert!(table.is_filtered());
}

#[test]
fn test_clear_query_keeps_predicate() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "ada"), person(2, "bob"), person(3, "cy")],
    );

    table.set_filter(Filter::query("ada", ["name"]));
    table.set_filter(Filter::predicate(|p: &Person| p.id >= 2));
    table.clear_query();
    assert_eq!(table.filter_query(), None);
    assert_eq!(ids(&table.derive()), vec![2, 3]);

    table.clear_predicate();
    assert!(!table.is_filtered());
    assert_eq!(ids(&table.derive()), vec![1, 2, 3]);
}

#[test]
fn test_predicate_reading_another_table() {
    let allowed = people_table(TableConfig::default(), vec![person(2, "b"), person(3, "c")]);
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "a"), person(2, "b"), person(3, "c")],
    );

    let lookup = allowed.clone();
    table.set_filter(Filter::predicate(move |p: &Person| {
        lookup.rows().iter().any(|row| row.id == p.id)
    }));
    assert_eq!(ids(&table.derive()), vec![2, 3]);

    allowed.set_items(vec![person(1, "a")]);
    table.set_filter(Filter::predicate({
        let lookup = allowed.clone();
        move |p: &Person| lookup.rows().iter().any(|row| row.id == p.id)
    }));
    assert_eq!(ids(&table.derive()), vec![1]);
}

#[test]
fn test_filter_then_sort() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "c"), person(2, "a"), person(3, "b"), person(4, "d")],
    );

    table.set_filter(Filter::predicate(|p: &Person| p.id != 3));
    table.set_sort("name");
    assert_eq!(ids(&table.derive()), vec![2, 1, 4]);

    table.clear_filter();
    assert_eq!(ids(&table.derive()), vec![2, 3, 1, 4]);
}

// ============================================================================
// Sizing and visible window
// ============================================================================

#[test]
fn test_height_follows_derived_rows() {
    let table = people_table(TableConfig::default(), vec![person(1, "a"), person(2, "b")]);
    assert_eq!(table.height(), 2.0 * 23.0 + 25.0);
    assert_eq!(table.auto_height(), None);

    table.set_filter(Filter::predicate(|p: &Person| p.id == 1));
    assert_eq!(table.height(), 48.0);
}

#[test]
fn test_auto_height_when_enabled() {
    let config = TableConfig::default()
        .with_auto_height(true)
        .with_item_height(30.0)
        .with_header_allowance(0.0);
    let table = people_table(config, vec![person(1, "a"), person(2, "b"), person(3, "c")]);
    assert_eq!(table.auto_height(), Some(90.0));
}

#[test]
fn test_visible_rows_are_clamped() {
    let table = people_table(
        TableConfig::default(),
        vec![person(1, "a"), person(2, "b"), person(3, "c")],
    );

    table.on_visible_range_changed(VisibleRange::new(1, 10));
    assert_eq!(table.visible_range(), VisibleRange::new(1, 10));
    assert_eq!(ids(&table.visible_rows()), vec![2, 3]);

    table.on_visible_range_changed(VisibleRange::new(5, 10));
    assert!(table.visible_rows().is_empty());
}

// ============================================================================
// Events and dirty tracking
// ============================================================================

#[test]
fn test_every_derivation_emits_full_sequence() {
    let table = people_table(TableConfig::default(), vec![person(1, "b"), person(2, "a")]);

    let events = table.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], TableEvent::SortedChanged(rows) if rows.len() == 2));

    table.set_sort("name");
    table.set_filter(Filter::predicate(|p: &Person| p.id == 1));

    let events = table.drain_events();
    let kinds: Vec<_> = events.iter().map(TableEvent::kind).collect();
    assert_eq!(kinds, vec!["sorted_changed", "sorted_changed"]);
    match &events[0] {
        TableEvent::SortedChanged(rows) => assert_eq!(ids(rows), vec![2, 1]),
        other => panic!("unexpected event {other:?}"),
    }
    match &events[1] {
        TableEvent::SortedChanged(rows) => assert_eq!(ids(rows), vec![1]),
        other => panic!("unexpected event {other:?}"),
    }

    assert!(table.drain_events().is_empty());
}

#[test]
fn test_dirty_flag() {
    let table = people_table(TableConfig::default(), vec![person(1, "a")]);
    assert!(table.is_dirty());

    table.clear_dirty();
    assert!(!table.is_dirty());

    table.set_sort("name");
    assert!(table.is_dirty());
}

#[test]
fn test_clones_share_state() {
    let table = people_table(TableConfig::default(), vec![person(1, "b"), person(2, "a")]);
    let handle = table.clone();

    handle.set_sort("name");
    assert_eq!(table.id(), handle.id());
    assert_eq!(ids(&table.derive()), vec![2, 1]);
}

#[test]
fn test_set_items_replaces_collection() {
    let table = people_table(TableConfig::default(), vec![person(1, "a")]);
    table.set_sort("id");

    table.set_items(vec![person(5, "e"), person(4, "d")]);
    assert_eq!(ids(&table.derive()), vec![4, 5]);
    assert_eq!(ids(&table.rows()), vec![5, 4]);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_duplicate_column_rejected() {
    let result = Table::<Person>::builder()
        .columns([Column::new("id"), Column::new("name"), Column::new("id")])
        .build();

    assert_eq!(
        result.err(),
        Some(TableError::DuplicateColumn {
            name: "id".to_string()
        })
    );
}

#[test]
fn test_invalid_width_rejected() {
    let result = Table::<Person>::builder()
        .column(Column::new("id").width(-5.0))
        .build();

    let err = result.err().unwrap();
    assert_eq!(err, TableError::invalid_width("id", "-5px"));
    assert_eq!(err.to_string(), "Column 'id' has invalid width '-5px'");
}

#[test]
fn test_set_column_width() {
    let table = people_table(TableConfig::default(), vec![]);

    assert!(table.set_column_width("name", ColumnWidth::Percent(50.0)));
    assert_eq!(table.column("name").unwrap().css_width(), "50%");

    assert!(!table.set_column_width("name", f64::NAN));
    assert!(!table.set_column_width("missing", 10u32));
}

#[test]
fn test_config_serde_roundtrip() {
    let config = TableConfig::default()
        .with_default_sort("name", SortDirection::Desc)
        .with_selection_mode(SelectionMode::Multiple);

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"selection_mode\":\"multiple\""));
    assert!(json.contains("\"default_sort_direction\":\"desc\""));

    let parsed: TableConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_missing_keys_use_defaults() {
    let parsed: TableConfig = serde_json::from_str(r#"{"item_height": 30.0}"#).unwrap();
    assert_eq!(parsed.item_height, 30.0);
    assert_eq!(parsed.header_allowance, 25.0);
    assert!(parsed.show_header);
    assert_eq!(parsed.selection_mode, SelectionMode::None);
}
