use ontorepo_core::datatypes::{UnsupportedValue, Value};
use ontorepo_core::logging::{BufferedLogger, Logger};
use ontorepo_core::model::{BlankId, Literal, Node, Statement};
use ontorepo_core::vocabulary::*;
use ontorepo_loader::{
    Axiom, Capabilities, Class, Individual, OwlLoader, OwlLoaderResult, OwlSerializer, RdfLoader, RdfLoaderResult,
    ResourceAccess, ResourceBundle, ResourceMapper, RuleDefinition, Syntax,
};
use ontorepo_repository::{
    PropertyValue, QueryEngine, QueryResult, Repository, RepositoryConfig, RepositoryError,
};
use ontorepo_store::{NodeId, QuadPattern, Store};
use proptest::prelude::*;
use std::collections::HashSet;
use std::io::{self, Read, Write};

const EX: &str = "http://ex.org/people";

fn ex(name: &str) -> String {
    format!("{}#{}", EX, name)
}

/// Line format: `import <iri>`, `rule <iri>` or `<s> <p> <o>`, where an
/// object in double quotes is a string literal and `_:bN` a blank node
struct TermLoader;

fn term(token: &str) -> Node {
    match token.strip_prefix("_:b").and_then(|label| label.parse().ok()) {
        Some(label) => Node::Blank(BlankId(label)),
        None => Node::iri(token),
    }
}

impl RdfLoader for TermLoader {
    fn load_rdf(&self, logger: &dyn Logger, reader: &mut dyn Read, _base_iri: &str) -> Option<RdfLoaderResult> {
        let mut text = String::new();
        if let Err(e) = reader.read_to_string(&mut text) {
            logger.error(&e.to_string());
            return None;
        }
        let mut result = RdfLoaderResult::default();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["import", iri] => result.imports.push(iri.to_string()),
                ["rule", iri] => result.rules.push(RuleDefinition {
                    iri: iri.to_string(),
                    antecedents: Vec::new(),
                    consequents: Vec::new(),
                }),
                [s, p, o] => {
                    let object = match o.strip_prefix('"').and_then(|o| o.strip_suffix('"')) {
                        Some(text) => Node::Literal(Literal::string(text)),
                        None => term(o),
                    };
                    result.quads.push(Statement::new(term(s), Node::iri(*p), object));
                }
                _ => return None,
            }
        }
        Some(result)
    }
}

/// Line format: `<class> <individual>`
struct AssertionLoader;

impl OwlLoader for AssertionLoader {
    fn load_owl(&self, _logger: &dyn Logger, reader: &mut dyn Read, _base_iri: &str) -> Option<OwlLoaderResult> {
        let mut text = String::new();
        reader.read_to_string(&mut text).ok()?;
        let axioms = text
            .lines()
            .filter_map(|line| match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                [class, individual] => Some(Axiom::ClassAssertion(
                    Class::Named(class.to_string()),
                    Individual::Named(individual.to_string()),
                )),
                _ => None,
            })
            .collect();
        Some(OwlLoaderResult {
            iri: None,
            axioms,
            imports: Vec::new(),
        })
    }
}

struct AxiomLister;

impl OwlSerializer for AxiomLister {
    fn serialize(&self, _logger: &dyn Logger, axioms: &[Axiom], writer: &mut dyn Write) -> io::Result<()> {
        for axiom in axioms {
            writeln!(writer, "{:?}", axiom)?;
        }
        Ok(())
    }
}

/// Answers every query with the number of stored quads
struct CountingEngine;

impl QueryEngine for CountingEngine {
    fn execute(&self, store: &Store, query: &str) -> Result<QueryResult, RepositoryError> {
        if query.is_empty() {
            return Err(RepositoryError::Query("empty query".to_string()));
        }
        Ok(QueryResult::Boolean(store.len() > 1))
    }
}

fn capabilities() -> Capabilities {
    Capabilities::new()
        .with_rdf_loader(Syntax::NTriples, TermLoader)
        .with_owl_loader(Syntax::FunctionalOwl, AssertionLoader)
        .with_owl_serializer(Syntax::FunctionalOwl, AxiomLister)
}

fn repository(documents: &[(&str, &str)]) -> Repository {
    let mut bundle = ResourceBundle::new();
    for (name, content) in documents {
        bundle.insert(format!("docs/{}", name), content.as_bytes());
    }
    let mut mapper = ResourceMapper::new();
    mapper.add_prefix_map("http://ex.org/docs/", "resource:///docs/").unwrap();
    Repository::with_mapper(mapper, capabilities()).with_access(ResourceAccess::new(bundle))
}

fn declare_functional(repository: &mut Repository, property: &str) {
    let property = repository.resolve_proxy_iri(property);
    let functional = repository.resolve_proxy_iri(OWL_FUNCTIONAL_PROPERTY);
    repository.proxy(&property).unwrap().set_value(RDF_TYPE, functional).unwrap();
}

#[test]
fn test_proxy_identity_and_delete() {
    let mut repository = repository(&[]);
    let ontology = repository.resolve_ontology(EX);
    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let again = repository.resolve_proxy(&ontology, alice.node()).unwrap();
    assert!(alice.same_instance(&again));
    assert!(alice.ontology().same_instance(&ontology));

    let bob = repository.resolve_proxy_iri(&ex("bob"));
    repository.proxy(&alice).unwrap().set_value(&ex("name"), "Alice").unwrap();
    repository.proxy(&bob).unwrap().set_value(&ex("knows"), alice.clone()).unwrap();
    assert_eq!(repository.store().len(), 2);

    repository.proxy(&alice).unwrap().delete().unwrap();
    assert!(!alice.is_alive());
    assert!(!again.is_alive());
    assert!(repository.store().is_empty());
    assert!(matches!(repository.proxy(&alice), Err(RepositoryError::Deleted(_))));

    let fresh = repository.resolve_proxy(&ontology, alice.node()).unwrap();
    assert!(!fresh.same_instance(&alice));
    assert_eq!(fresh, alice);
    assert!(fresh.is_alive());
}

#[test]
fn test_functional_property_keeps_one_value() {
    let mut repository = repository(&[]);
    declare_functional(&mut repository, &ex("name"));
    let alice = repository.resolve_proxy_iri(&ex("alice"));

    let mut proxy = repository.proxy(&alice).unwrap();
    proxy.set_value(&ex("name"), "Alice").unwrap();
    proxy.set_value(&ex("name"), "Alicia").unwrap();
    assert_eq!(proxy.get_data_values(&ex("name")), vec![Value::String("Alicia".to_string())]);
}

#[test]
fn test_legacy_threshold_needs_two_declarations() {
    let config = RepositoryConfig::from_json_str(r#"{"functional_threshold": "more_than_one"}"#).unwrap();
    let mut repository = Repository::from_config(&config, capabilities()).unwrap();
    declare_functional(&mut repository, &ex("name"));
    let alice = repository.resolve_proxy_iri(&ex("alice"));

    let mut proxy = repository.proxy(&alice).unwrap();
    proxy.set_value(&ex("name"), "Alice").unwrap();
    proxy.set_value(&ex("name"), "Alicia").unwrap();
    assert_eq!(proxy.get_data_values(&ex("name")).len(), 2);
}

#[test]
fn test_non_functional_property_accumulates() {
    let mut repository = repository(&[]);
    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let mut proxy = repository.proxy(&alice).unwrap();
    proxy.set_value(&ex("nick"), "Al").unwrap();
    proxy.set_value(&ex("nick"), "Ali").unwrap();
    proxy.set_value(&ex("nick"), "Al").unwrap();
    assert_eq!(proxy.get_data_values(&ex("nick")).len(), 2);

    proxy.unset_value(&ex("nick"), "Al").unwrap();
    assert_eq!(proxy.get_data_value(&ex("nick")), Some(Value::String("Ali".to_string())));
    proxy.unset(&ex("nick")).unwrap();
    assert!(proxy.get_data_values(&ex("nick")).is_empty());
}

#[test]
fn test_data_values_follow_the_range() {
    let mut repository = repository(&[]);
    let age = repository.resolve_proxy_iri(&ex("age"));
    let integer = repository.resolve_proxy_iri(XSD_INTEGER);
    repository.proxy(&age).unwrap().set_value(RDFS_RANGE, integer).unwrap();

    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let mut proxy = repository.proxy(&alice).unwrap();
    proxy.set_value(&ex("age"), 42).unwrap();
    proxy.set_value(&ex("label"), true).unwrap();
    proxy
        .set_value(
            &ex("color"),
            Value::Unsupported(UnsupportedValue {
                datatype: XSD_HEX_BINARY.to_string(),
                lexical: "0FB7".to_string(),
            }),
        )
        .unwrap();
    assert_eq!(proxy.get_data_value(&ex("age")), Some(Value::Integer(42)));
    // no range: stored as a string
    assert_eq!(proxy.get_data_value(&ex("label")), Some(Value::String("true".to_string())));
    assert!(matches!(
        proxy.get_data_value(&ex("color")),
        Some(Value::Unsupported(UnsupportedValue { ref lexical, .. })) if lexical == "0FB7"
    ));

    let literal = repository
        .store()
        .nodes()
        .lookup(&Node::literal("42", XSD_INTEGER));
    assert!(literal.is_some());
}

#[test]
fn test_object_values_in_both_directions() {
    let mut repository = repository(&[]);
    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let bob = repository.resolve_proxy_iri(&ex("bob"));
    let person = repository.resolve_proxy_iri(&ex("Person"));

    {
        let mut proxy = repository.proxy(&alice).unwrap();
        proxy.set_value(&ex("knows"), bob.clone()).unwrap();
        proxy.set_value(RDF_TYPE, person.clone()).unwrap();
        proxy.set_value(&ex("name"), "Alice").unwrap();
        assert_eq!(proxy.iri(), Some(ex("alice").as_str()));
        assert_eq!(proxy.get_object_value(&ex("knows")), Some(bob.clone()));
        assert!(proxy.get_object_values(&ex("name")).is_empty());
        assert_eq!(proxy.classifiers(), vec![person.clone()]);

        let values = proxy.values();
        assert_eq!(values.len(), 3);
        assert_eq!(values[&ex("name")], vec![PropertyValue::from("Alice")]);
        assert_eq!(proxy.all_object_values().len(), 2);
        assert_eq!(proxy.all_data_values().len(), 1);
    }

    let mut proxy = repository.proxy(&bob).unwrap();
    let known_by = proxy.get_objects_from(&ex("knows"));
    assert_eq!(known_by.len(), 1);
    assert!(known_by[0].same_instance(&alice));
    assert!(proxy.get_object_from(&ex("unknown")).is_none());
}

#[test]
fn test_get_proxy_does_not_create_nodes() {
    let mut repository = repository(&[]);
    assert!(repository.get_proxy(&ex("ghost")).is_none());
    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let found = repository.get_proxy(&ex("alice")).unwrap();
    assert!(found.same_instance(&alice));
}

#[test]
fn test_new_objects_are_distinct() {
    let mut repository = repository(&[]);
    let ontology = repository.resolve_ontology(EX);
    let first = repository.new_object(&ontology);
    let second = repository.new_object(&ontology);
    assert_ne!(first, second);

    let proxy = repository.proxy(&first).unwrap();
    let iri = proxy.iri().unwrap();
    assert!(iri.starts_with(&format!("{}#", EX)));
}

#[test]
fn test_load_fills_the_ontology_graph() {
    let mut repository = repository(&[
        (
            "a.nt",
            "import http://ex.org/docs/b.nt\n\
             rule http://ex.org/docs/a.nt#r1\n\
             http://ex.org/a http://ex.org/p http://ex.org/b\n\
             http://ex.org/a http://ex.org/name \"a\"\n\
             http://ex.org/b http://ex.org/p http://ex.org/a",
        ),
        ("b.nt", "http://ex.org/c http://ex.org/p http://ex.org/a"),
    ]);
    let logger = BufferedLogger::new();
    let ontology = repository.load(&logger, "http://ex.org/docs/a.nt").unwrap();
    assert!(!logger.has_errors());
    assert_eq!(repository.store().len(), 4);
    assert_eq!(repository.ontologies().count(), 2);
    assert_eq!(repository.rule_engine().rule_count(), 1);
    repository.flush_rules();

    let graph = repository.get_graph(&ontology);
    assert_eq!(repository.store().count(&QuadPattern::any().graph(graph)), 3);

    let blank = repository.store_mut().nodes_mut().new_blank();
    let p = repository.store_mut().nodes_mut().iri("http://ex.org/p");
    let quad = ontorepo_store::Quad::new(graph, blank, p, blank);
    repository.store_mut().add(quad).unwrap();

    let proxies: Vec<_> = repository.proxies_in(&ontology).collect();
    let mut names: Vec<String> = proxies
        .iter()
        .filter_map(|object| repository.store().nodes().iri_of(object.node()).map(str::to_string))
        .collect();
    names.sort();
    assert_eq!(names, vec!["http://ex.org/a".to_string(), "http://ex.org/b".to_string()]);
    assert_eq!(proxies.len(), 2);
}

#[test]
fn test_blank_labels_are_local_to_their_document() {
    let config = RepositoryConfig::from_json_str(r#"{"entailment": "rdf"}"#).unwrap();
    let mut repository = Repository::from_config(&config, capabilities())
        .unwrap()
        .with_access(ResourceAccess::new({
            let mut bundle = ResourceBundle::new();
            bundle.insert("docs/a.nt", "_:b0 http://ex.org/name \"first\"\n_:b0 http://ex.org/knows _:b1".as_bytes());
            bundle.insert("docs/b.nt", "_:b0 http://ex.org/name \"second\"".as_bytes());
            bundle
        }));
    repository
        .loader_mut()
        .mapper_mut()
        .add_prefix_map("http://ex.org/docs/", "resource:///docs/")
        .unwrap();
    let logger = BufferedLogger::new();
    repository.load(&logger, "http://ex.org/docs/a.nt").unwrap();
    repository.load(&logger, "http://ex.org/docs/b.nt").unwrap();
    assert!(!logger.has_errors());

    let nodes = repository.store().nodes();
    let name = nodes.lookup_iri("http://ex.org/name").unwrap();
    let knows = nodes.lookup_iri("http://ex.org/knows").unwrap();
    let named: HashSet<NodeId> = repository
        .store()
        .matching(&QuadPattern::any().property(name))
        .iter()
        .map(|quad| quad.subject)
        .collect();
    assert_eq!(named.len(), 2);

    // the same label within one document is one node
    let knowing = repository.store().matching(&QuadPattern::any().property(knows));
    assert_eq!(knowing.len(), 1);
    assert!(named.contains(&knowing[0].subject));
    assert_ne!(knowing[0].subject, knowing[0].object);

    // loaded blanks never pick up the typing of literal surrogates
    let rdf_type = nodes.lookup_iri(RDF_TYPE).unwrap();
    for subject in &named {
        assert_eq!(repository.store().count(&QuadPattern::any().subject(*subject).property(rdf_type)), 0);
    }
}

#[test]
fn test_owl_documents_are_translated() {
    let mut repository = repository(&[("people.ofn", "http://ex.org/Person http://ex.org/alice")]);
    let logger = BufferedLogger::new();
    let ontology = repository.load(&logger, "http://ex.org/docs/people.ofn").unwrap();

    let alice = repository.get_proxy("http://ex.org/alice").unwrap();
    let classes = repository.proxy(&alice).unwrap().classifiers();
    assert_eq!(classes.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.ofn");
    let mut mapper = ResourceMapper::new();
    mapper
        .add_simple_map("http://ex.org/out", &format!("file://{}", path.display()))
        .unwrap();
    *repository.loader_mut().mapper_mut() = mapper;
    assert!(repository.export(&logger, &ontology, "http://ex.org/out"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.starts_with("ClassAssertion"));
}

#[test]
fn test_rdf_entailment_from_configuration() {
    let config = RepositoryConfig::from_json_str(r#"{"entailment": "rdf"}"#).unwrap();
    let mut repository = Repository::from_config(&config, capabilities()).unwrap();
    let alice = repository.resolve_proxy_iri(&ex("alice"));
    let bob = repository.resolve_proxy_iri(&ex("bob"));
    repository.proxy(&alice).unwrap().set_value(&ex("knows"), bob.clone()).unwrap();
    repository.proxy(&bob).unwrap().set_value(&ex("knows"), alice.clone()).unwrap();

    let nodes = repository.store().nodes();
    let pattern = QuadPattern::any()
        .subject(nodes.lookup_iri(&ex("knows")).unwrap())
        .property(nodes.lookup_iri(RDF_TYPE).unwrap())
        .object(nodes.lookup_iri(RDF_PROPERTY).unwrap());
    assert_eq!(repository.store().count(&pattern), 1);
}

#[test]
fn test_queries_go_through_the_engine() {
    let mut repository = repository(&[]);
    assert!(matches!(repository.execute("ASK {}"), Err(RepositoryError::NoQueryEngine)));

    repository.set_query_engine(Box::new(CountingEngine));
    assert_eq!(repository.execute("ASK {}").unwrap(), QueryResult::Boolean(false));
    assert!(matches!(repository.execute(""), Err(RepositoryError::Query(_))));
}

proptest! {
    #[test]
    fn prop_functional_property_keeps_the_last_value(names in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let mut repository = repository(&[]);
        declare_functional(&mut repository, &ex("name"));
        let alice = repository.resolve_proxy_iri(&ex("alice"));
        let mut proxy = repository.proxy(&alice).unwrap();
        for name in &names {
            proxy.set_value(&ex("name"), name.as_str()).unwrap();
        }
        let last = names.last().cloned().unwrap();
        prop_assert_eq!(proxy.get_data_values(&ex("name")), vec![Value::String(last)]);
    }
}
