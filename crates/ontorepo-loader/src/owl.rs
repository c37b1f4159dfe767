//! OWL axiom model produced by OWL-family loaders

use ontorepo_core::model::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OWL class expression (named classes only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Class {
    /// Named class
    Named(String),
    /// owl:Thing
    Thing,
    /// owl:Nothing
    Nothing,
}

/// OWL property
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    Object(String),
    Data(String),
    Annotation(String),
}

impl Property {
    pub fn iri(&self) -> &str {
        match self {
            Property::Object(iri) | Property::Data(iri) | Property::Annotation(iri) => iri,
        }
    }
}

/// OWL individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Individual {
    Named(String),
    /// Anonymous individual, by node identifier
    Anonymous(String),
}

/// Entity introduced by a declaration axiom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Class(String),
    Datatype(String),
    ObjectProperty(String),
    DataProperty(String),
    AnnotationProperty(String),
    NamedIndividual(String),
}

impl Entity {
    pub fn iri(&self) -> &str {
        match self {
            Entity::Class(iri)
            | Entity::Datatype(iri)
            | Entity::ObjectProperty(iri)
            | Entity::DataProperty(iri)
            | Entity::AnnotationProperty(iri)
            | Entity::NamedIndividual(iri) => iri,
        }
    }
}

/// OWL axiom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// Declaration(E)
    Declaration(Entity),

    /// SubClassOf(C1 C2)
    SubClassOf(Class, Class),

    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<Class>),

    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<Class>),

    /// SubPropertyOf(P1 P2)
    SubPropertyOf(Property, Property),

    /// EquivalentProperties(P1 ... Pn)
    EquivalentProperties(Vec<Property>),

    /// InverseObjectProperties(P1 P2)
    InverseProperties(Property, Property),

    /// PropertyDomain(P C)
    PropertyDomain(Property, Class),

    /// PropertyRange(P R), R being a class or a datatype IRI
    PropertyRange(Property, String),

    FunctionalProperty(Property),
    InverseFunctionalProperty(Property),
    TransitiveProperty(Property),
    SymmetricProperty(Property),

    /// SameIndividual(i1 ... in)
    SameIndividual(Vec<Individual>),

    /// DifferentIndividuals(i1 ... in)
    DifferentIndividuals(Vec<Individual>),

    /// ClassAssertion(C i)
    ClassAssertion(Class, Individual),

    /// ObjectPropertyAssertion(P i1 i2)
    ObjectPropertyAssertion(Property, Individual, Individual),

    /// DataPropertyAssertion(P i v)
    DataPropertyAssertion(Property, Individual, Literal),
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Named(iri) => write!(f, "<{}>", iri),
            Class::Thing => f.write_str("owl:Thing"),
            Class::Nothing => f.write_str("owl:Nothing"),
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Individual::Named(iri) => write!(f, "<{}>", iri),
            Individual::Anonymous(id) => write!(f, "_:{}", id),
        }
    }
}
