//! Closed-set variant registry
//!
//! A [`ClosedType`] holds the authoritative, insertion-ordered list of
//! variants for one logical type. The set is fixed at definition time:
//! nothing can be added or removed afterwards, and every [`Value`] is
//! constructed against that set, so an untagged or foreign-tagged value
//! cannot exist.

use serde::{Deserialize, Serialize};

use crate::error::{DefineError, Result, ValueError};

/// Type of a single payload field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadType {
    I64,
    F64,
    Bool,
    Str,
    /// A user-defined type, identified by name only.
    Named(String),
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadType::I64 => write!(f, "i64"),
            PayloadType::F64 => write!(f, "f64"),
            PayloadType::Bool => write!(f, "bool"),
            PayloadType::Str => write!(f, "str"),
            PayloadType::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One named alternative within a closed type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    name: String,
    payload: Vec<PayloadType>,
}

impl Variant {
    /// A variant with no payload, the common case for enumeration-like types.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: vec![],
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Vec<PayloadType>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &[PayloadType] {
        &self.payload
    }

    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// A type whose complete set of variants is fixed at definition time
///
/// Identity is the declared name plus the variant sequence, which is what
/// the derived `PartialEq` compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedType {
    name: String,
    variants: Vec<Variant>,
}

impl ClosedType {
    /// Construct a closed type from an ordered list of variants.
    ///
    /// Rejects an empty list (`EmptyType`) and repeated variant names
    /// (`DuplicateVariant`). Construction aborts on the first defect, so a
    /// returned `ClosedType` always satisfies both invariants.
    pub fn define(name: impl Into<String>, variants: Vec<Variant>) -> Result<Self> {
        let name = name.into();

        if variants.is_empty() {
            return Err(DefineError::empty_type(name));
        }

        for (i, variant) in variants.iter().enumerate() {
            if variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(DefineError::duplicate_variant(name, &variant.name));
            }
        }

        Ok(Self { name, variants })
    }

    /// Convenience for the all-unit-variants case, e.g. the compass points
    /// or planets of an enumeration declared in one line.
    pub fn define_units<I, S>(name: impl Into<String>, variant_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variant_names.into_iter().map(Variant::unit).collect();
        Self::define(name, variants)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All variants, in declaration order. The order is stable and drives
    /// the ordering of checker diagnostics.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false: `define` rejects empty variant lists.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variant_named(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Construct a value tagged with `variant`, carrying `payload`.
    ///
    /// Validates tag membership, payload arity, and payload field types
    /// against the variant's schema.
    pub fn value(&self, variant: &str, payload: Vec<PayloadValue>) -> Result<Value<'_>, ValueError> {
        let tag = self.index_of(variant).ok_or_else(|| ValueError::UnknownVariant {
            type_name: self.name.clone(),
            variant: variant.to_string(),
        })?;

        let schema = &self.variants[tag].payload;
        if payload.len() != schema.len() {
            return Err(ValueError::PayloadArity {
                variant: variant.to_string(),
                expected: schema.len(),
                got: payload.len(),
            });
        }

        for (index, (field, expected)) in payload.iter().zip(schema.iter()).enumerate() {
            if !field.matches(expected) {
                return Err(ValueError::PayloadType {
                    variant: variant.to_string(),
                    index,
                    expected: expected.to_string(),
                    got: field.type_name(),
                });
            }
        }

        Ok(Value {
            ty: self,
            tag,
            payload,
        })
    }

    /// Construct a value of a payload-free variant.
    pub fn unit_value(&self, variant: &str) -> Result<Value<'_>, ValueError> {
        self.value(variant, vec![])
    }
}

/// A payload field carried by a [`Value`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PayloadValue {
    I64(i64),
    F64(f64),
    Bool(bool),
    Str(String),
    /// Opaque instance of a named type; the registry checks only the type
    /// name, never the inner representation.
    Named { ty: String, repr: String },
}

impl PayloadValue {
    fn matches(&self, expected: &PayloadType) -> bool {
        match (self, expected) {
            (PayloadValue::I64(_), PayloadType::I64) => true,
            (PayloadValue::F64(_), PayloadType::F64) => true,
            (PayloadValue::Bool(_), PayloadType::Bool) => true,
            (PayloadValue::Str(_), PayloadType::Str) => true,
            (PayloadValue::Named { ty, .. }, PayloadType::Named(name)) => ty == name,
            _ => false,
        }
    }

    fn type_name(&self) -> String {
        match self {
            PayloadValue::I64(_) => "i64".to_string(),
            PayloadValue::F64(_) => "f64".to_string(),
            PayloadValue::Bool(_) => "bool".to_string(),
            PayloadValue::Str(_) => "str".to_string(),
            PayloadValue::Named { ty, .. } => ty.clone(),
        }
    }
}

impl std::fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadValue::I64(n) => write!(f, "{n}"),
            PayloadValue::F64(x) => write!(f, "{x}"),
            PayloadValue::Bool(b) => write!(f, "{b}"),
            PayloadValue::Str(s) => write!(f, "{s:?}"),
            PayloadValue::Named { repr, .. } => write!(f, "{repr}"),
        }
    }
}

/// An instance tagged with exactly one variant of its closed type
///
/// Only constructible through [`ClosedType::value`] and
/// [`ClosedType::unit_value`], so the tag index is always in range and the
/// payload always matches the variant's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<'ty> {
    ty: &'ty ClosedType,
    tag: usize,
    payload: Vec<PayloadValue>,
}

impl<'ty> Value<'ty> {
    /// The tag of this value. Total: the construction invariant guarantees
    /// the index is valid.
    pub fn variant(&self) -> &'ty Variant {
        &self.ty.variants[self.tag]
    }

    pub fn closed_type(&self) -> &'ty ClosedType {
        self.ty
    }

    pub fn payload(&self) -> &[PayloadValue] {
        &self.payload
    }

    /// Re-tag this value to another payload-free variant of the same type,
    /// the moral equivalent of reassigning an enumeration variable.
    ///
    /// Fails with `UnknownVariant` for names outside the set and with
    /// `PayloadArity` when the target variant requires payload data.
    pub fn retag(&mut self, variant: &str) -> Result<(), ValueError> {
        let tag = self.ty.index_of(variant).ok_or_else(|| ValueError::UnknownVariant {
            type_name: self.ty.name.clone(),
            variant: variant.to_string(),
        })?;

        let schema = &self.ty.variants[tag].payload;
        if !schema.is_empty() {
            return Err(ValueError::PayloadArity {
                variant: variant.to_string(),
                expected: schema.len(),
                got: 0,
            });
        }

        self.tag = tag;
        self.payload.clear();
        Ok(())
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.ty.name, self.variant().name)?;
        if !self.payload.is_empty() {
            write!(f, "(")?;
            for (i, field) in self.payload.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{field}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compass() -> ClosedType {
        ClosedType::define_units("CompassPoint", ["north", "south", "east", "west"]).unwrap()
    }

    #[test]
    fn test_define_preserves_declaration_order() {
        let ty = compass();
        let names: Vec<&str> = ty.variants().iter().map(|v| v.name()).collect();
        assert_eq!(names, ["north", "south", "east", "west"]);
        assert_eq!(ty.len(), 4);
    }

    #[test]
    fn test_define_rejects_empty() {
        let err = ClosedType::define("Never", vec![]).unwrap_err();
        assert_eq!(err, DefineError::empty_type("Never"));
    }

    #[test]
    fn test_define_rejects_duplicate() {
        let err = ClosedType::define_units("T", ["north", "north"]).unwrap_err();
        assert_eq!(err, DefineError::duplicate_variant("T", "north"));
    }

    #[test]
    fn test_identity_is_name_plus_variants() {
        let a = compass();
        let b = compass();
        assert_eq!(a, b);

        let c = ClosedType::define_units("CompassPoint", ["north", "south"]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_lookup_accessors() {
        let ty = compass();
        assert_eq!(ty.index_of("east"), Some(2));
        assert_eq!(ty.index_of("zenith"), None);
        assert!(!ty.is_empty());

        let east = ty.variant_named("east").unwrap();
        assert_eq!(east.name(), "east");
        assert!(!east.has_payload());
        assert!(ty.variant_named("zenith").is_none());
    }

    #[test]
    fn test_unit_value_and_variant_of() {
        let ty = compass();
        let value = ty.unit_value("west").unwrap();
        assert_eq!(value.variant().name(), "west");
        assert_eq!(value.to_string(), "CompassPoint::west");
    }

    #[test]
    fn test_foreign_tag_rejected() {
        let ty = compass();
        let err = ty.unit_value("up").unwrap_err();
        assert!(matches!(err, ValueError::UnknownVariant { .. }));
    }

    #[test]
    fn test_retag_within_type() {
        let ty = compass();
        let mut direction = ty.unit_value("west").unwrap();
        direction.retag("east").unwrap();
        assert_eq!(direction.variant().name(), "east");

        let err = direction.retag("zenith").unwrap_err();
        assert!(matches!(err, ValueError::UnknownVariant { .. }));
    }

    #[test]
    fn test_payload_schema_enforced() {
        let ty = ClosedType::define(
            "Barcode",
            vec![
                Variant::with_payload("upc", vec![PayloadType::I64, PayloadType::I64]),
                Variant::with_payload("qr", vec![PayloadType::Str]),
            ],
        )
        .unwrap();

        let qr = ty
            .value("qr", vec![PayloadValue::Str("ABCDEF".to_string())])
            .unwrap();
        assert_eq!(qr.to_string(), "Barcode::qr(\"ABCDEF\")");

        let arity = ty.value("upc", vec![PayloadValue::I64(8)]).unwrap_err();
        assert_eq!(
            arity,
            ValueError::PayloadArity {
                variant: "upc".to_string(),
                expected: 2,
                got: 1,
            }
        );

        let wrong = ty.value("qr", vec![PayloadValue::Bool(true)]).unwrap_err();
        assert!(matches!(wrong, ValueError::PayloadType { index: 0, .. }));
    }

    #[test]
    fn test_retag_requires_unit_target() {
        let ty = ClosedType::define(
            "Shape",
            vec![
                Variant::unit("point"),
                Variant::with_payload("circle", vec![PayloadType::F64]),
            ],
        )
        .unwrap();

        let mut v = ty.unit_value("point").unwrap();
        let err = v.retag("circle").unwrap_err();
        assert!(matches!(err, ValueError::PayloadArity { expected: 1, got: 0, .. }));
    }
}
