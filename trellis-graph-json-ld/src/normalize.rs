//! Document-to-triple normalization
//!
//! Walks a subject-implicit JSON document (predicate IRI -> value) and emits
//! one triple per predicate into a [`Graph`]. Values may be:
//!
//! - JSON scalars (string, number, boolean) -> typed literals
//! - `{"@id": "<iri>"}` -> IRI (or `_:label` blank node) reference
//! - `{"@value": ..., "@language": ...}` -> explicit literal
//!
//! `@type` keys map to `rdf:type` triples. Anything else - arrays, null,
//! objects without `@id`/`@value` - fails the whole document; no triples are
//! produced on error.

use crate::error::{NormalizeError, Result};
use serde_json::Value as JsonValue;
use trellis_graph_ir::{datatype::iri, Graph, Term, Triple};
use tracing::debug;

/// Strip `_:` prefix from a blank node label if present
///
/// `BlankId` expects labels WITHOUT the `_:` prefix.
fn strip_blank_prefix(id: &str) -> &str {
    id.strip_prefix("_:").unwrap_or(id)
}

/// Options for normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Subject for the document's triples.
    ///
    /// Resolution order: this option, then a top-level `@id` key, then a
    /// freshly generated blank node.
    pub subject: Option<Term>,
}

impl NormalizeOptions {
    /// Options with an explicit subject term
    pub fn with_subject(subject: Term) -> Self {
        Self {
            subject: Some(subject),
        }
    }
}

/// Normalize a document into a graph of triples
///
/// Produces one triple per predicate key, all sharing a single subject.
/// Re-normalizing the same document yields an equal graph (generated blank
/// node labels restart per call).
///
/// # Errors
///
/// Fails with [`NormalizeError::MalformedDocument`] when the document is not
/// a JSON object or a value is neither a literal nor a valid reference
/// object. The failure is atomic: no triples are returned.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use trellis_graph_json_ld::{normalize, NormalizeOptions};
///
/// let doc = json!({
///     "http://schema.org/name": "Manu Sporny",
///     "http://schema.org/url": {"@id": "http://manu.sporny.org/"}
/// });
/// let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();
/// assert_eq!(graph.len(), 2);
/// ```
pub fn normalize(doc: &JsonValue, opts: &NormalizeOptions) -> Result<Graph> {
    let obj = doc.as_object().ok_or_else(|| {
        NormalizeError::malformed(format!(
            "expected a JSON object, got {}",
            json_type_name(doc)
        ))
    })?;

    let subject = resolve_subject(obj, opts)?;

    let mut graph = Graph::new();
    for (key, value) in obj {
        // Skip JSON-LD keywords except @type; @id was consumed as the subject
        if key.starts_with('@') && key != "@type" {
            continue;
        }

        if key == "@type" {
            emit_types(&subject, value, &mut graph)?;
            continue;
        }

        if key.is_empty() {
            return Err(NormalizeError::malformed("empty predicate IRI"));
        }

        let object = resolve_value(key, value)?;
        graph.add_triple(subject.clone(), Term::iri(key), object);
    }

    debug!(triples = graph.len(), subject = %subject, "document normalized");
    Ok(graph)
}

/// Determine the subject term: caller option, `@id` key, or fresh blank node
fn resolve_subject(
    obj: &serde_json::Map<String, JsonValue>,
    opts: &NormalizeOptions,
) -> Result<Term> {
    if let Some(term) = &opts.subject {
        if term.is_literal() {
            return Err(NormalizeError::InvalidSubject {
                term: term.to_string(),
            });
        }
        if term.as_iri().is_some_and(str::is_empty) {
            return Err(NormalizeError::InvalidSubject {
                term: term.to_string(),
            });
        }
        return Ok(term.clone());
    }

    if let Some(id_val) = obj.get("@id") {
        let id_str = id_val
            .as_str()
            .ok_or_else(|| NormalizeError::malformed("@id must be a string"))?;
        if id_str.is_empty() {
            return Err(NormalizeError::malformed("@id must not be empty"));
        }
        return Ok(if id_str.starts_with("_:") {
            Term::blank(strip_blank_prefix(id_str))
        } else {
            Term::iri(id_str)
        });
    }

    Ok(Term::blank("b1"))
}

/// Emit `rdf:type` triples for an `@type` value (string or array of strings)
fn emit_types(subject: &Term, value: &JsonValue, graph: &mut Graph) -> Result<()> {
    let types = match value {
        JsonValue::Array(arr) => arr.iter().collect::<Vec<_>>(),
        _ => vec![value],
    };

    for type_val in types {
        let type_iri = type_val
            .as_str()
            .ok_or_else(|| NormalizeError::malformed("@type must be an IRI string"))?;
        graph.add(Triple::new(
            subject.clone(),
            Term::iri(iri::RDF_TYPE),
            Term::iri(type_iri),
        ));
    }
    Ok(())
}

/// Resolve a document value into an object term
fn resolve_value(predicate: &str, value: &JsonValue) -> Result<Term> {
    match value {
        JsonValue::String(s) => Ok(Term::string(s)),
        JsonValue::Bool(b) => Ok(Term::boolean(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Term::integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Term::double(f))
            } else {
                // u64 beyond i64 range
                Err(NormalizeError::malformed(format!(
                    "number out of range for predicate <{predicate}>"
                )))
            }
        }
        JsonValue::Object(obj) => {
            if let Some(id_val) = obj.get("@id") {
                let id_str = id_val
                    .as_str()
                    .ok_or_else(|| NormalizeError::malformed("@id must be a string"))?;
                if id_str.is_empty() {
                    return Err(NormalizeError::malformed("@id must not be empty"));
                }
                return Ok(if id_str.starts_with("_:") {
                    Term::blank(strip_blank_prefix(id_str))
                } else {
                    Term::iri(id_str)
                });
            }

            if let Some(val) = obj.get("@value") {
                let term = match val {
                    JsonValue::String(s) => match obj.get("@language").and_then(|l| l.as_str()) {
                        Some(lang) => Term::lang_string(s, lang),
                        None => Term::string(s),
                    },
                    JsonValue::Bool(b) => Term::boolean(*b),
                    JsonValue::Number(n) => {
                        if let Some(i) = n.as_i64() {
                            Term::integer(i)
                        } else {
                            Term::double(n.as_f64().unwrap_or(f64::NAN))
                        }
                    }
                    _ => {
                        return Err(NormalizeError::malformed(format!(
                            "@value must be a scalar for predicate <{predicate}>"
                        )))
                    }
                };
                return Ok(term);
            }

            Err(NormalizeError::malformed(format!(
                "object value for predicate <{predicate}> has neither @id nor @value"
            )))
        }
        JsonValue::Array(_) => Err(NormalizeError::malformed(format!(
            "array value for predicate <{predicate}> is not supported"
        ))),
        JsonValue::Null => Err(NormalizeError::malformed(format!(
            "null value for predicate <{predicate}>"
        ))),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_triple_per_key_same_subject() {
        let doc = json!({
            "http://schema.org/name": "Manu Sporny",
            "http://schema.org/url": {"@id": "http://manu.sporny.org/"},
            "http://schema.org/image": {"@id": "http://manu.sporny.org/images/manu.png"}
        });

        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert_eq!(graph.len(), 3);

        let subjects: Vec<_> = graph.iter().map(|t| &t.s).collect();
        assert!(subjects.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_literal_object_is_literal_not_iri() {
        let doc = json!({"http://schema.org/name": "Manu Sporny"});
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let triple = graph.iter().next().unwrap();
        assert!(triple.o.is_literal());
        let (value, dt, _) = triple.o.as_literal().unwrap();
        assert_eq!(value.as_str(), Some("Manu Sporny"));
        assert!(dt.is_xsd_string());
    }

    #[test]
    fn test_reference_object_is_iri() {
        let doc = json!({"http://schema.org/url": {"@id": "http://manu.sporny.org/"}});
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.o.as_iri(), Some("http://manu.sporny.org/"));
    }

    #[test]
    fn test_caller_supplied_subject() {
        let doc = json!({"http://schema.org/name": "Alice"});
        let opts = NormalizeOptions::with_subject(Term::iri("http://example.org/alice"));
        let graph = normalize(&doc, &opts).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
    }

    #[test]
    fn test_subject_from_id_key() {
        let doc = json!({
            "@id": "http://example.org/alice",
            "http://schema.org/name": "Alice"
        });
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
    }

    #[test]
    fn test_generated_blank_subject_is_deterministic() {
        let doc = json!({"http://schema.org/name": "Alice"});
        let a = normalize(&doc, &NormalizeOptions::default()).unwrap();
        let b = normalize(&doc, &NormalizeOptions::default()).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().next().unwrap().s.is_blank());
    }

    #[test]
    fn test_number_literal_accepted() {
        let doc = json!({"http://example.org/p": 42});
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let triple = graph.iter().next().unwrap();
        let (value, dt, _) = triple.o.as_literal().unwrap();
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(dt, &trellis_graph_ir::Datatype::xsd_integer());
    }

    #[test]
    fn test_array_value_is_malformed() {
        let doc = json!({"http://example.org/p": [1, 2]});
        let err = normalize(&doc, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDocument { .. }));
    }

    #[test]
    fn test_null_value_is_malformed() {
        let doc = json!({"http://example.org/p": null});
        let err = normalize(&doc, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDocument { .. }));
    }

    #[test]
    fn test_non_object_document_is_malformed() {
        let err = normalize(&json!([1, 2, 3]), &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDocument { .. }));
    }

    #[test]
    fn test_reference_without_id_is_malformed() {
        let doc = json!({"http://example.org/p": {"name": "not a reference"}});
        let err = normalize(&doc, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDocument { .. }));
    }

    #[test]
    fn test_empty_reference_id_is_malformed() {
        let doc = json!({"http://example.org/p": {"@id": ""}});
        let err = normalize(&doc, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDocument { .. }));
    }

    #[test]
    fn test_literal_subject_rejected() {
        let doc = json!({"http://example.org/p": "v"});
        let opts = NormalizeOptions::with_subject(Term::string("not a subject"));
        let err = normalize(&doc, &opts).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidSubject { .. }));
    }

    #[test]
    fn test_type_key_maps_to_rdf_type() {
        let doc = json!({
            "@type": "http://schema.org/Person",
            "http://schema.org/name": "Alice"
        });
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let type_triple = graph
            .iter()
            .find(|t| t.p.as_iri() == Some(iri::RDF_TYPE))
            .unwrap();
        assert_eq!(type_triple.o.as_iri(), Some("http://schema.org/Person"));
    }

    #[test]
    fn test_language_tagged_value() {
        let doc = json!({
            "http://schema.org/name": {"@value": "Manu", "@language": "fr"}
        });
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let (_, dt, lang) = graph.iter().next().unwrap().o.as_literal().unwrap();
        assert!(dt.is_lang_string());
        assert_eq!(lang, Some("fr"));
    }

    #[test]
    fn test_blank_node_reference() {
        let doc = json!({"http://example.org/knows": {"@id": "_:bob"}});
        let graph = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.o.as_blank().map(|b| b.as_str()), Some("bob"));
    }
}
