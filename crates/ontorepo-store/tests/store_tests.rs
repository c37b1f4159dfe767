use ontorepo_core::model::{Literal, Node, Statement};
use ontorepo_core::vocabulary::{RDF_TYPE, XSD_INTEGER};
use ontorepo_store::{ChangeListener, Changeset, NodeTable, Quad, QuadIndex, QuadPattern, Store};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

fn create_test_store() -> (Store, Quad) {
    let mut store = Store::new();
    let graph = store.nodes_mut().iri("http://example.org/graph");
    let statement = Statement::new(
        Node::iri("http://example.org/subject"),
        Node::iri("http://example.org/predicate"),
        Node::Literal(Literal::new("42", XSD_INTEGER)),
    );
    let quad = store.quad_of(graph, &statement);
    store.add(quad).unwrap();
    (store, quad)
}

/// Records every changeset it sees
struct Recorder(Arc<Mutex<Vec<Changeset>>>);

impl ChangeListener for Recorder {
    fn on_change(&mut self, changes: &Changeset, _nodes: &mut NodeTable, _quads: &QuadIndex) -> Changeset {
        self.0.lock().unwrap().push(changes.clone());
        Changeset::new()
    }
}

/// Types every subject it sees as `ex:Thing`
struct Typer;

impl ChangeListener for Typer {
    fn on_change(&mut self, changes: &Changeset, nodes: &mut NodeTable, _quads: &QuadIndex) -> Changeset {
        let rdf_type = nodes.iri(RDF_TYPE);
        let thing = nodes.iri("http://example.org/Thing");
        let mut follow_up = Changeset::new();
        for quad in &changes.added {
            follow_up.add(Quad::new(quad.graph, quad.subject, rdf_type, thing));
        }
        follow_up
    }
}

#[test]
fn test_store_round_trip_statement() {
    let (store, quad) = create_test_store();
    let statement = store.statement_of(&quad).unwrap();
    assert_eq!(statement.subject, Node::iri("http://example.org/subject"));
    assert_eq!(statement.graph, Some(Node::iri("http://example.org/graph")));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_duplicate_insert_is_not_effective() {
    let (mut store, quad) = create_test_store();
    assert!(!store.add(quad).unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_pattern_queries() {
    let (store, quad) = create_test_store();
    let subject = store.nodes().lookup_iri("http://example.org/subject").unwrap();
    let predicate = store.nodes().lookup_iri("http://example.org/predicate").unwrap();

    assert_eq!(store.matching(&QuadPattern::any().subject(subject)), vec![quad]);
    assert_eq!(store.count(&QuadPattern::any().property(predicate)), 1);
    assert_eq!(store.count(&QuadPattern::any().object(subject)), 0);
}

#[test]
fn test_listener_sees_effective_changes_only() {
    let (mut store, quad) = create_test_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    store.subscribe(Box::new(Recorder(Arc::clone(&seen))));

    store.add(quad).unwrap();
    assert!(seen.lock().unwrap().is_empty());

    store.remove(quad).unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].removed, vec![quad]);
}

#[test]
fn test_listener_follow_ups_are_applied_and_broadcast() {
    let mut store = Store::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    store.subscribe(Box::new(Typer));
    store.subscribe(Box::new(Recorder(Arc::clone(&seen))));

    let graph = store.nodes_mut().iri("http://example.org/graph");
    let quad = store.quad_of(
        graph,
        &Statement::new(
            Node::iri("http://example.org/a"),
            Node::iri("http://example.org/p"),
            Node::iri("http://example.org/b"),
        ),
    );
    let effective = store.apply(Changeset::adding(vec![quad])).unwrap();
    assert_eq!(effective.added, vec![quad]);

    let rdf_type = store.nodes().lookup_iri(RDF_TYPE).unwrap();
    assert_eq!(store.count(&QuadPattern::any().property(rdf_type)), 1);
    assert_eq!(store.len(), 2);
    // initial change, then the typing follow-up
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_clear_graph() {
    let (mut store, quad) = create_test_store();
    let removed = store.clear_graph(quad.graph).unwrap();
    assert_eq!(removed.removed, vec![quad]);
    assert!(store.is_empty());
    assert!(store.quads().graphs().is_empty());
}

proptest! {
    #[test]
    fn prop_store_matches_a_set_model(ops in prop::collection::vec((0usize..3, 0usize..3, 0usize..3, any::<bool>()), 1..60)) {
        let mut store = Store::new();
        let graph = store.nodes_mut().iri("http://example.org/graph");
        let mut model = BTreeSet::new();
        for (s, p, o, insert) in ops {
            let statement = Statement::new(
                Node::iri(format!("http://example.org/s{}", s)),
                Node::iri(format!("http://example.org/p{}", p)),
                Node::Literal(Literal::string(format!("o{}", o))),
            );
            let quad = store.quad_of(graph, &statement);
            if insert {
                prop_assert_eq!(store.add(quad).unwrap(), model.insert(quad));
            } else {
                prop_assert_eq!(store.remove(quad).unwrap(), model.remove(&quad));
            }
        }
        prop_assert_eq!(store.len(), model.len());
        let subject = store.nodes().lookup_iri("http://example.org/s0");
        if let Some(subject) = subject {
            let expected = model.iter().filter(|quad| quad.subject == subject).count();
            prop_assert_eq!(store.count(&QuadPattern::any().subject(subject)), expected);
        }
    }
}
