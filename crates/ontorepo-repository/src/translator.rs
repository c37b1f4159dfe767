//! Translation between OWL axioms and RDF statements
//!
//! Covers declarations, class and property hierarchies, domains and
//! ranges, property characteristics and individual assertions. Class
//! expressions other than named classes have no statement form here.

use itertools::Itertools;
use ontorepo_core::model::{Node, Statement};
use ontorepo_core::vocabulary::*;
use ontorepo_loader::{Axiom, Class, Entity, Individual, Property};
use std::collections::HashMap;

fn class_node(class: &Class) -> Node {
    match class {
        Class::Named(iri) => Node::iri(iri.as_str()),
        Class::Thing => Node::iri(OWL_THING),
        Class::Nothing => Node::iri(OWL_NOTHING),
    }
}

fn individual_node(individual: &Individual) -> Node {
    match individual {
        Individual::Named(iri) => Node::iri(iri.as_str()),
        Individual::Anonymous(id) => Node::Anonymous(id.clone()),
    }
}

fn property_node(property: &Property) -> Node {
    Node::iri(property.iri())
}

fn typed(subject: Node, class: &str) -> Statement {
    Statement::new(subject, Node::iri(RDF_TYPE), Node::iri(class))
}

fn link(subject: Node, property: &str, object: Node) -> Statement {
    Statement::new(subject, Node::iri(property), object)
}

/// Statements expressing `axioms`
pub fn axioms_to_statements(axioms: &[Axiom]) -> Vec<Statement> {
    let mut statements = Vec::with_capacity(axioms.len());
    for axiom in axioms {
        match axiom {
            Axiom::Declaration(entity) => {
                let class = match entity {
                    Entity::Class(_) => OWL_CLASS,
                    Entity::Datatype(_) => RDFS_DATATYPE,
                    Entity::ObjectProperty(_) => OWL_OBJECT_PROPERTY,
                    Entity::DataProperty(_) => OWL_DATATYPE_PROPERTY,
                    Entity::AnnotationProperty(_) => OWL_ANNOTATION_PROPERTY,
                    Entity::NamedIndividual(_) => OWL_NAMED_INDIVIDUAL,
                };
                statements.push(typed(Node::iri(entity.iri()), class));
            }
            Axiom::SubClassOf(sub, sup) => {
                statements.push(link(class_node(sub), RDFS_SUBCLASS_OF, class_node(sup)));
            }
            Axiom::EquivalentClasses(classes) => {
                statements.extend(
                    classes
                        .iter()
                        .tuple_windows()
                        .map(|(a, b)| link(class_node(a), OWL_EQUIVALENT_CLASS, class_node(b))),
                );
            }
            Axiom::DisjointClasses(classes) => {
                statements.extend(
                    classes
                        .iter()
                        .tuple_combinations()
                        .map(|(a, b)| link(class_node(a), OWL_DISJOINT_WITH, class_node(b))),
                );
            }
            Axiom::SubPropertyOf(sub, sup) => {
                statements.push(link(property_node(sub), RDFS_SUBPROPERTY_OF, property_node(sup)));
            }
            Axiom::EquivalentProperties(properties) => {
                statements.extend(
                    properties
                        .iter()
                        .tuple_windows()
                        .map(|(a, b)| link(property_node(a), OWL_EQUIVALENT_PROPERTY, property_node(b))),
                );
            }
            Axiom::InverseProperties(a, b) => {
                statements.push(link(property_node(a), OWL_INVERSE_OF, property_node(b)));
            }
            Axiom::PropertyDomain(property, class) => {
                statements.push(link(property_node(property), RDFS_DOMAIN, class_node(class)));
            }
            Axiom::PropertyRange(property, range) => {
                statements.push(link(property_node(property), RDFS_RANGE, Node::iri(range.as_str())));
            }
            Axiom::FunctionalProperty(property) => {
                statements.push(typed(property_node(property), OWL_FUNCTIONAL_PROPERTY));
            }
            Axiom::InverseFunctionalProperty(property) => {
                statements.push(typed(property_node(property), OWL_INVERSE_FUNCTIONAL_PROPERTY));
            }
            Axiom::TransitiveProperty(property) => {
                statements.push(typed(property_node(property), OWL_TRANSITIVE_PROPERTY));
            }
            Axiom::SymmetricProperty(property) => {
                statements.push(typed(property_node(property), OWL_SYMMETRIC_PROPERTY));
            }
            Axiom::SameIndividual(individuals) => {
                statements.extend(
                    individuals
                        .iter()
                        .tuple_windows()
                        .map(|(a, b)| link(individual_node(a), OWL_SAME_AS, individual_node(b))),
                );
            }
            Axiom::DifferentIndividuals(individuals) => {
                statements.extend(
                    individuals
                        .iter()
                        .tuple_combinations()
                        .map(|(a, b)| link(individual_node(a), OWL_DIFFERENT_FROM, individual_node(b))),
                );
            }
            Axiom::ClassAssertion(class, individual) => {
                statements.push(Statement::new(individual_node(individual), Node::iri(RDF_TYPE), class_node(class)));
            }
            Axiom::ObjectPropertyAssertion(property, subject, object) => {
                statements.push(Statement::new(
                    individual_node(subject),
                    property_node(property),
                    individual_node(object),
                ));
            }
            Axiom::DataPropertyAssertion(property, subject, value) => {
                statements.push(Statement::new(
                    individual_node(subject),
                    property_node(property),
                    Node::Literal(value.clone()),
                ));
            }
        }
    }
    statements
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyKind {
    Object,
    Data,
    Annotation,
}

fn as_class(node: &Node) -> Option<Class> {
    match node.as_iri()? {
        OWL_THING => Some(Class::Thing),
        OWL_NOTHING => Some(Class::Nothing),
        iri => Some(Class::Named(iri.to_string())),
    }
}

fn as_individual(node: &Node) -> Option<Individual> {
    match node {
        Node::Iri(iri) => Some(Individual::Named(iri.clone())),
        Node::Anonymous(id) => Some(Individual::Anonymous(id.clone())),
        Node::Blank(id) => Some(Individual::Anonymous(format!("n{}", id.0))),
        _ => None,
    }
}

fn is_vocabulary(iri: &str) -> bool {
    [RDF, RDFS, OWL, XSD].iter().any(|namespace| iri.starts_with(namespace))
}

/// Axioms recognised in `statements`; other statements are skipped
pub fn statements_to_axioms(statements: &[Statement]) -> Vec<Axiom> {
    // property kinds come from declarations anywhere in the input
    let mut kinds: HashMap<&str, PropertyKind> = HashMap::new();
    for statement in statements {
        if statement.property.as_iri() != Some(RDF_TYPE) {
            continue;
        }
        let kind = match statement.object.as_iri() {
            Some(OWL_OBJECT_PROPERTY) => PropertyKind::Object,
            Some(OWL_DATATYPE_PROPERTY) => PropertyKind::Data,
            Some(OWL_ANNOTATION_PROPERTY) => PropertyKind::Annotation,
            _ => continue,
        };
        if let Some(iri) = statement.subject.as_iri() {
            kinds.insert(iri, kind);
        }
    }
    let property = |iri: &str, default: PropertyKind| match kinds.get(iri).copied().unwrap_or(default) {
        PropertyKind::Object => Property::Object(iri.to_string()),
        PropertyKind::Data => Property::Data(iri.to_string()),
        PropertyKind::Annotation => Property::Annotation(iri.to_string()),
    };

    let mut axioms = Vec::new();
    for statement in statements {
        let Some(predicate) = statement.property.as_iri() else {
            continue;
        };
        let subject = &statement.subject;
        let object = &statement.object;
        let axiom = match predicate {
            RDF_TYPE => {
                let (Some(iri), Some(class)) = (subject.as_iri(), object.as_iri()) else {
                    if let (Some(individual), Some(class)) = (as_individual(subject), as_class(object)) {
                        axioms.push(Axiom::ClassAssertion(class, individual));
                    }
                    continue;
                };
                match class {
                    OWL_CLASS => Some(Axiom::Declaration(Entity::Class(iri.to_string()))),
                    RDFS_DATATYPE => Some(Axiom::Declaration(Entity::Datatype(iri.to_string()))),
                    OWL_OBJECT_PROPERTY => Some(Axiom::Declaration(Entity::ObjectProperty(iri.to_string()))),
                    OWL_DATATYPE_PROPERTY => Some(Axiom::Declaration(Entity::DataProperty(iri.to_string()))),
                    OWL_ANNOTATION_PROPERTY => Some(Axiom::Declaration(Entity::AnnotationProperty(iri.to_string()))),
                    OWL_NAMED_INDIVIDUAL => Some(Axiom::Declaration(Entity::NamedIndividual(iri.to_string()))),
                    OWL_FUNCTIONAL_PROPERTY => Some(Axiom::FunctionalProperty(property(iri, PropertyKind::Object))),
                    OWL_INVERSE_FUNCTIONAL_PROPERTY => {
                        Some(Axiom::InverseFunctionalProperty(property(iri, PropertyKind::Object)))
                    }
                    OWL_TRANSITIVE_PROPERTY => Some(Axiom::TransitiveProperty(property(iri, PropertyKind::Object))),
                    OWL_SYMMETRIC_PROPERTY => Some(Axiom::SymmetricProperty(property(iri, PropertyKind::Object))),
                    other if is_vocabulary(other) => None,
                    other => Some(Axiom::ClassAssertion(
                        Class::Named(other.to_string()),
                        Individual::Named(iri.to_string()),
                    )),
                }
            }
            RDFS_SUBCLASS_OF => as_class(subject)
                .zip(as_class(object))
                .map(|(sub, sup)| Axiom::SubClassOf(sub, sup)),
            OWL_EQUIVALENT_CLASS => as_class(subject)
                .zip(as_class(object))
                .map(|(a, b)| Axiom::EquivalentClasses(vec![a, b])),
            OWL_DISJOINT_WITH => as_class(subject)
                .zip(as_class(object))
                .map(|(a, b)| Axiom::DisjointClasses(vec![a, b])),
            RDFS_SUBPROPERTY_OF => subject.as_iri().zip(object.as_iri()).map(|(sub, sup)| {
                Axiom::SubPropertyOf(property(sub, PropertyKind::Object), property(sup, PropertyKind::Object))
            }),
            OWL_EQUIVALENT_PROPERTY => subject.as_iri().zip(object.as_iri()).map(|(a, b)| {
                Axiom::EquivalentProperties(vec![property(a, PropertyKind::Object), property(b, PropertyKind::Object)])
            }),
            OWL_INVERSE_OF => subject.as_iri().zip(object.as_iri()).map(|(a, b)| {
                Axiom::InverseProperties(Property::Object(a.to_string()), Property::Object(b.to_string()))
            }),
            RDFS_DOMAIN => subject
                .as_iri()
                .zip(as_class(object))
                .map(|(p, class)| Axiom::PropertyDomain(property(p, PropertyKind::Object), class)),
            RDFS_RANGE => subject.as_iri().zip(object.as_iri()).map(|(p, range)| {
                let default = if range.starts_with(XSD) { PropertyKind::Data } else { PropertyKind::Object };
                Axiom::PropertyRange(property(p, default), range.to_string())
            }),
            OWL_SAME_AS => as_individual(subject)
                .zip(as_individual(object))
                .map(|(a, b)| Axiom::SameIndividual(vec![a, b])),
            OWL_DIFFERENT_FROM => as_individual(subject)
                .zip(as_individual(object))
                .map(|(a, b)| Axiom::DifferentIndividuals(vec![a, b])),
            other if is_vocabulary(other) => None,
            other => match (as_individual(subject), object) {
                (Some(individual), Node::Literal(literal)) => Some(Axiom::DataPropertyAssertion(
                    property(other, PropertyKind::Data),
                    individual,
                    literal.clone(),
                )),
                (Some(individual), object) => as_individual(object).map(|target| {
                    Axiom::ObjectPropertyAssertion(property(other, PropertyKind::Object), individual, target)
                }),
                (None, _) => None,
            },
        };
        match axiom {
            Some(axiom) => axioms.push(axiom),
            None => tracing::trace!("No axiom for {}", statement),
        }
    }
    axioms
}
