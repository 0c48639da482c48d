//! Integration tests for the MapBuilder API
//!
//! These tests verify that the public API works end to end, from a schema
//! model to the rendered outputs.

use indexmap::IndexMap;

use protomap::{
    GraphModel, MapBuilder, ProtomapError,
    config::{AppConfig, DoxygenConfig, FilterConfig, StyleConfig},
    diagnostic::ErrorCode,
    hook::{EdgeListHook, PostProcess},
    layout::AnchorSide,
    schema::{EnumValue, Field, Multiplicity, RecordType, ScalarKind, Schema},
};

fn person_schema() -> Schema {
    Schema::new("person.proto")
        .with_record(RecordType::new("Address").with_field(Field::scalar(
            "city",
            1,
            Multiplicity::Optional,
            ScalarKind::String,
        )))
        .with_record(
            RecordType::new("Person")
                .with_field(Field::scalar("id", 1, Multiplicity::Required, ScalarKind::Int32))
                .with_field(Field::message("home", 2, Multiplicity::Optional, "Address"))
                .with_field(Field::scalar(
                    "nickname",
                    3,
                    Multiplicity::Repeated,
                    ScalarKind::String,
                )),
        )
}

fn config_with_excludes(patterns: &[&str]) -> AppConfig {
    AppConfig::new(
        FilterConfig::new(patterns.iter().map(|p| p.to_string()).collect()),
        StyleConfig::default(),
        DoxygenConfig::default(),
    )
}

#[test]
fn test_builder_api_exists() {
    let _builder = MapBuilder::default();
}

#[test]
fn test_person_address_example() {
    let builder = MapBuilder::default();
    let graph = builder.build(&person_schema());

    let ids: Vec<_> = graph.nodes().map(|node| node.label()).collect();
    assert_eq!(ids, ["Address", "Person"]);

    assert_eq!(graph.edges().len(), 1);
    let edge = &graph.edges()[0];
    assert_eq!(edge.source(), "Person");
    assert_eq!(edge.field(), "home");
    assert_eq!(edge.target(), "Address");

    let person = graph.node("Person").unwrap();
    let markers: Vec<_> = person
        .rows()
        .iter()
        .map(|row| row.field().multiplicity().marker())
        .collect();
    assert_eq!(markers, ["[1..1]", "[0..1]", "[0..n]"]);
    assert!(graph.diagnostics().is_empty());

    let dot = builder.render_dot(&graph);
    assert!(dot.starts_with("digraph protobuf {\n"));
    assert!(dot.contains("\t\tPerson:l_home -> Address\n"));
    assert!(dot.contains("<TD TITLE=\"repeated\">[0..n]</TD>"));
}

#[test]
fn test_unresolved_reference_example() {
    let schema = person_schema().with_record(
        RecordType::new("Owner")
            .with_field(Field::message("pet", 1, Multiplicity::Optional, "Animal"))
            .with_field(Field::message("home", 2, Multiplicity::Optional, "Address")),
    );

    let graph = MapBuilder::default().build(&schema);

    assert_eq!(graph.diagnostics().len(), 1);
    let diagnostic = &graph.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
    assert!(diagnostic.severity().is_warning());

    assert!(graph.edges().iter().all(|edge| edge.field() != "pet"));
    assert_eq!(graph.edges().len(), 2);
    assert_eq!(graph.nodes().count(), 3);
    assert_eq!(graph.node("Owner").unwrap().rows().len(), 2);
}

#[test]
fn test_nested_type_shadows_top_level_namesake() {
    let schema = Schema::new("scope.proto")
        .with_record(RecordType::new("Inner"))
        .with_record(
            RecordType::new("Outer")
                .with_field(Field::message("inner", 1, Multiplicity::Optional, "Inner"))
                .with_nested(RecordType::new("Inner")),
        );

    let builder = MapBuilder::default();
    let graph = builder.build(&schema);

    assert_eq!(graph.edges()[0].target(), "Outer.Inner");
    assert!(
        builder
            .render_dot(&graph)
            .contains("\t\tOuter:l_inner -> \"Outer.Inner\"\n")
    );
}

#[test]
fn test_exclusion_removes_types_rows_and_edges() {
    let schema = person_schema().with_record(
        RecordType::new("Secret")
            .with_nested(RecordType::new("Key"))
            .with_field(Field::message("owner", 1, Multiplicity::Optional, "Person")),
    );
    let schema = schema.with_record(
        RecordType::new("Vault")
            .with_field(Field::message("secret", 1, Multiplicity::Optional, "Secret"))
            .with_field(Field::message("key", 2, Multiplicity::Optional, "Key"))
            .with_field(Field::scalar("label", 3, Multiplicity::Optional, ScalarKind::String)),
    );
    let builder = MapBuilder::new(config_with_excludes(&["secret"])).unwrap();

    let graph = builder.build(&schema);

    let ids: Vec<_> = graph.nodes().map(|node| node.label()).collect();
    assert_eq!(ids, ["Address", "Person", "Vault"]);
    let vault: Vec<_> = graph
        .node("Vault")
        .unwrap()
        .rows()
        .iter()
        .map(|row| row.field().name())
        .collect();
    assert_eq!(vault, ["label"]);
    assert_eq!(graph.edges().len(), 1);
    assert!(graph.diagnostics().is_empty());

    let dot = builder.render_dot(&graph);
    assert!(!dot.to_lowercase().contains("secret"));
    assert!(!dot.contains("Key"));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let result = MapBuilder::new(config_with_excludes(&["ok", "(unclosed"]));

    match result {
        Err(ProtomapError::Pattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("pattern should not compile"),
    }
}

#[test]
fn test_numbered_fields_share_anchor_side() {
    let schema = Schema::new("choice.proto").with_record(
        RecordType::new("Choice")
            .with_field(Field::scalar("choice_a1", 1, Multiplicity::Optional, ScalarKind::Bool))
            .with_field(Field::scalar("choice_a2", 2, Multiplicity::Optional, ScalarKind::Bool))
            .with_field(Field::scalar("other", 3, Multiplicity::Optional, ScalarKind::Bool)),
    );

    let graph = MapBuilder::default().build(&schema);

    let sides: Vec<_> = graph
        .node("Choice")
        .unwrap()
        .rows()
        .iter()
        .map(|row| row.anchor())
        .collect();
    assert_eq!(sides, [AnchorSide::Left, AnchorSide::Left, AnchorSide::Right]);
}

#[test]
fn test_enum_field_renders_values() {
    let schema = Schema::new("phone.proto").with_record(RecordType::new("Phone").with_field(
        Field::enumeration(
            "kind",
            1,
            Multiplicity::Optional,
            vec![EnumValue::new(0, "MOBILE"), EnumValue::new(1, "HOME")],
        ),
    ));
    let builder = MapBuilder::default();

    let dot = builder.render_dot(&builder.build(&schema));

    assert!(dot.contains("&lt;enum&gt;"));
    assert!(dot.contains("[0]"));
    assert!(dot.contains("MOBILE"));
    assert!(dot.find("MOBILE").unwrap() < dot.find("HOME").unwrap());
}

#[test]
fn test_render_doxygen_uses_title() {
    let builder = MapBuilder::default();
    let graph = builder.build(&person_schema());

    let page = builder.render_doxygen(&graph, "People");

    assert!(page.starts_with("/**\n\\page People\n\nPeople\n"));
    assert!(page.contains(&builder.render_dot(&graph)));
}

#[test]
fn test_render_outputs_with_doxygen_and_hooks() {
    let mut config = AppConfig::default();
    config.doxygen_mut().set_enabled(true);
    config.doxygen_mut().set_title("Map");
    let builder = MapBuilder::new(config).unwrap().with_hook(EdgeListHook);
    let graph = builder.build(&person_schema());

    let outputs = builder.render_outputs(&graph).unwrap();

    let suffixes: Vec<_> = outputs.files().map(|(suffix, _)| suffix).collect();
    assert_eq!(suffixes, [".dot", ".dox", ".edges.tsv"]);
    assert_eq!(outputs.dot(), builder.render_dot(&graph));
    assert!(outputs.doxygen().unwrap().contains("\\page Map"));
    assert_eq!(outputs.get(".edges.tsv"), Some("Person\thome\tAddress\n"));
}

struct Clobber;

impl PostProcess for Clobber {
    fn outputs(&self, _graph: &GraphModel) -> Result<IndexMap<String, String>, ProtomapError> {
        Ok(IndexMap::from([(".dot".to_string(), String::new())]))
    }
}

struct Failing;

impl PostProcess for Failing {
    fn outputs(&self, _graph: &GraphModel) -> Result<IndexMap<String, String>, ProtomapError> {
        Err(ProtomapError::Render("hook failed".to_string()))
    }
}

#[test]
fn test_hook_cannot_replace_dot_output() {
    let builder = MapBuilder::default().with_hook(Clobber);
    let graph = builder.build(&person_schema());

    let result = builder.render_outputs(&graph);

    assert!(matches!(result, Err(ProtomapError::Render(_))));
}

#[test]
fn test_hook_error_is_propagated() {
    let builder = MapBuilder::default().with_hook(Failing);
    let graph = builder.build(&person_schema());

    let err = builder.render_outputs(&graph).unwrap_err();

    assert_eq!(err.to_string(), "Render error: hook failed");
}

mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    struct Shape {
        prefix: &'static str,
        fields: Vec<(&'static str, Option<&'static str>)>,
        nested: Vec<Shape>,
    }

    // ===================
    // Strategies
    // ===================

    fn field_strategy() -> impl Strategy<Value = (&'static str, Option<&'static str>)> {
        (
            prop::sample::select(vec!["x", "f", "g"]),
            prop::option::of(prop::sample::select(vec!["A0", "B0", "X0", "A1", "X1", "B2"])),
        )
    }

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        let prefix = || prop::sample::select(vec!["A", "B", "X"]);
        let leaf = (prefix(), prop::collection::vec(field_strategy(), 0..4)).prop_map(
            |(prefix, fields)| Shape {
                prefix,
                fields,
                nested: Vec::new(),
            },
        );
        leaf.prop_recursive(3, 24, 3, move |inner| {
            (
                prefix(),
                prop::collection::vec(field_strategy(), 0..4),
                prop::collection::vec(inner, 0..3),
            )
                .prop_map(|(prefix, fields, nested)| Shape {
                    prefix,
                    fields,
                    nested,
                })
        })
    }

    fn record(shape: &Shape, index: usize) -> RecordType {
        let mut record = RecordType::new(format!("{}{index}", shape.prefix));
        for (i, (prefix, target)) in shape.fields.iter().enumerate() {
            let name = format!("{prefix}_{i}");
            let number = i as i32 + 1;
            let field = match target {
                Some(target) => Field::message(name, number, Multiplicity::Optional, *target),
                None => Field::scalar(name, number, Multiplicity::Optional, ScalarKind::Int32),
            };
            record.push_field(field);
        }
        for (i, nested) in shape.nested.iter().enumerate() {
            record.push_nested(self::record(nested, i));
        }
        record
    }

    fn schema_strategy() -> impl Strategy<Value = Schema> {
        prop::collection::vec(shape_strategy(), 0..4).prop_map(|shapes| {
            let mut schema = Schema::new("generated.proto");
            for (i, shape) in shapes.iter().enumerate() {
                schema.push_record(record(shape, i));
            }
            schema
        })
    }

    fn walk<'a>(records: &'a [RecordType], path: &str, out: &mut Vec<(String, &'a RecordType)>) {
        for record in records {
            let id = if path.is_empty() {
                record.name().to_string()
            } else {
                format!("{path}.{}", record.name())
            };
            out.push((id.clone(), record));
            walk(record.nested(), &id, out);
        }
    }

    fn starts_with_x(name: &str) -> bool {
        name.starts_with('x') || name.starts_with('X')
    }

    // ===================
    // Property Test Functions
    // ===================

    /// No two nodes share a qualified id.
    fn check_qualified_ids_unique(schema: Schema) -> Result<(), TestCaseError> {
        let graph = MapBuilder::default().build(&schema);
        let ids: HashSet<_> = graph.nodes().map(|node| node.label()).collect();
        prop_assert_eq!(ids.len(), graph.nodes().count());
        Ok(())
    }

    /// Every node shows its record type's fields in declaration order.
    fn check_field_order_preserved(schema: Schema) -> Result<(), TestCaseError> {
        let graph = MapBuilder::default().build(&schema);
        let mut records = Vec::new();
        walk(schema.records(), "", &mut records);

        prop_assert_eq!(graph.nodes().count(), records.len());
        for (id, record) in records {
            let node = graph.node(&id);
            prop_assert!(node.is_some(), "missing node {}", id);
            let rows: Vec<_> = node
                .map(|node| node.rows().iter().map(|row| row.field().name()).collect())
                .unwrap_or_default();
            let fields: Vec<_> = record.fields().iter().map(Field::name).collect();
            prop_assert_eq!(rows, fields);
        }
        Ok(())
    }

    /// Nothing matching the exclusion pattern survives anywhere in the graph.
    fn check_exclusion_complete(schema: Schema) -> Result<(), TestCaseError> {
        let builder = MapBuilder::new(config_with_excludes(&["^x"]))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let graph = builder.build(&schema);

        for node in graph.nodes() {
            prop_assert!(!node.id().segments().any(starts_with_x), "node {}", node.label());
            for row in node.rows() {
                prop_assert!(!starts_with_x(row.field().name()));
                if let Some(target) = row.field().referenced_type() {
                    prop_assert!(!starts_with_x(target));
                }
            }
        }
        for edge in graph.edges() {
            prop_assert!(!starts_with_x(edge.target().local_name()));
            prop_assert!(graph.node(edge.source().as_str()).is_some());
            prop_assert!(graph.node(edge.target().as_str()).is_some());
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn qualified_ids_unique(schema in schema_strategy()) {
            check_qualified_ids_unique(schema)?;
        }

        #[test]
        fn field_order_preserved(schema in schema_strategy()) {
            check_field_order_preserved(schema)?;
        }

        #[test]
        fn exclusion_complete(schema in schema_strategy()) {
            check_exclusion_complete(schema)?;
        }
    }
}
