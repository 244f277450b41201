//! RDF literal datatypes
//!
//! Datatypes are always explicit - there is no "untyped" literal. Plain
//! strings default to `xsd:string`, language-tagged strings use
//! `rdf:langString`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Datatype and predicate IRIs used by the pipeline
pub mod iri {
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const RDF_LANG_STRING: &str =
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// An RDF literal datatype, stored as an expanded IRI
///
/// Use the named constructors (`Datatype::xsd_string()`, ...) for the
/// datatypes the pipeline produces itself; `from_iri` accepts anything.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Self::from_iri(iri::XSD_BOOLEAN)
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Self::from_iri(iri::XSD_INTEGER)
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Self::from_iri(iri::XSD_DOUBLE)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    /// Get the IRI of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is xsd:string
    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == iri::XSD_STRING
    }

    /// Check if this is rdf:langString
    pub fn is_lang_string(&self) -> bool {
        self.as_iri() == iri::RDF_LANG_STRING
    }
}
