use proto2args::KeyPathBuilder;

#[test]
fn first_segment_has_no_separator() {
    let mut builder = KeyPathBuilder::new();
    builder.push_segments("events", "events[0]");
    assert_eq!(builder.flat_key(), "events");
    assert_eq!(builder.key(), "events[0]");
}

#[test]
fn nested_segments_are_dot_separated() {
    let mut builder = KeyPathBuilder::new();
    builder.push_segments("events", "events[2]");
    builder.push_segments("name", "name");
    assert_eq!(builder.flat_key(), "events.name");
    assert_eq!(builder.key(), "events[2].name");
}

#[test]
fn truncate_restores_previous_state() {
    let mut builder = KeyPathBuilder::new();
    let outer = builder.push_segments("a", "a");
    let inner = builder.push_segments("b", "b[1]");
    assert_eq!(builder.key(), "a.b[1]");

    builder.truncate_to(inner);
    assert_eq!(builder.flat_key(), "a");
    assert_eq!(builder.key(), "a");

    builder.truncate_to(outer);
    assert_eq!(builder.flat_key(), "");
    assert_eq!(builder.key(), "");
}

#[test]
fn snapshot_is_detached_from_later_mutation() {
    let mut builder = KeyPathBuilder::new();
    builder.push_segments("a", "a");
    let snapshot = builder.snapshot();
    builder.push_segments("b", "b");

    assert_eq!(snapshot.flat_key, "a");
    assert_eq!(snapshot.key, "a");
    assert_eq!(builder.flat_key(), "a.b");
}
