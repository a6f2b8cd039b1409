//! Structural shape descriptors for records and tagged unions.
//!
//! A [`Shape`] is the only structural information the synthesizers ever see.
//! Records expose an ordered list of [`FieldShape`]s, unions an ordered list of
//! [`VariantShape`]s. Both carry type-erased accessors built from plain `fn`
//! pointers, so a shape is cheap to copy around and holds no state.
//!
//! Shapes are produced by the [`Shaped`] trait, either through
//! `#[derive(Shaped)]` (feature `derive`) or by hand.
//!
//! # Examples
//!
//! ```
//! use shapelift::shape::{Shape, Shaped};
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let Shape::Record(record) = User::shape() else { unreachable!() };
//! let names: Vec<_> = record.fields().iter().map(|field| field.name()).collect();
//! assert_eq!(names, vec!["name", "age"]);
//! ```
//!
//! Declaration order is preserved and is the tie-break order used during
//! synthesis.

mod opaque;
mod type_key;

use std::any::Any;
use std::fmt;

pub use type_key::TypeKey;

#[cfg(feature = "derive")]
pub use shapelift_derive::Shaped;

/// Reads a field out of an erased record value.
pub type FieldGetter = fn(&dyn Any) -> Option<&dyn Any>;

/// Borrows a field mutably out of an erased record value.
pub type FieldGetterMut = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Borrows a variant payload out of an erased union value, if the tag matches.
pub type VariantPreview = fn(&dyn Any) -> Option<&dyn Any>;

/// Moves a variant payload out of an erased union value.
///
/// Returns the untouched union value in `Err` when the tag does not match.
pub type VariantExtract = fn(Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>>;

/// Wraps an erased payload into the variant, producing the erased union value.
pub type VariantBuild = fn(Box<dyn Any>) -> Box<dyn Any>;

/// A type that can describe its own structure.
///
/// Every type reachable from a described record or union must itself be
/// `Shaped`; leaf types answer [`Shape::Opaque`]. Implementations for the
/// standard scalar and collection types are provided.
///
/// # Contract
///
/// The type keys recorded in a shape must match the types the accessors
/// actually return. Synthesized optics rely on it and panic when a
/// descriptor contradicts itself.
pub trait Shaped: Any + Clone + Send + Sync {
    /// Describes the structure of `Self`.
    fn shape() -> Shape;
}

/// The structural view of a type.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A product of named fields.
    Record(RecordShape),
    /// A tagged union of variants.
    Union(UnionShape),
    /// A leaf with no structure the synthesizers can see through.
    Opaque,
}

impl Shape {
    /// Returns the shape of `T`.
    #[must_use]
    pub fn of<T: Shaped>() -> Self {
        T::shape()
    }

    /// Returns which kind of shape this is.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Record(_) => ShapeKind::Record,
            Self::Union(_) => ShapeKind::Union,
            Self::Opaque => ShapeKind::Opaque,
        }
    }

    /// Returns the record description, if this is a record.
    #[must_use]
    pub fn into_record(self) -> Option<RecordShape> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the union description, if this is a union.
    #[must_use]
    pub fn into_union(self) -> Option<UnionShape> {
        match self {
            Self::Union(union) => Some(union),
            _ => None,
        }
    }
}

/// Discriminant of [`Shape`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// See [`Shape::Record`].
    Record,
    /// See [`Shape::Union`].
    Union,
    /// See [`Shape::Opaque`].
    Opaque,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Record => "record",
            Self::Union => "union",
            Self::Opaque => "opaque",
        };
        formatter.write_str(name)
    }
}

/// An ordered list of fields belonging to one record type.
#[derive(Clone, Debug)]
pub struct RecordShape {
    type_key: TypeKey,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Creates the description of record type `R`.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name.
    #[must_use]
    pub fn new<R: Shaped>(fields: Vec<FieldShape>) -> Self {
        for (index, field) in fields.iter().enumerate() {
            assert!(
                fields[..index].iter().all(|earlier| earlier.name != field.name),
                "record {} declares field `{}` twice",
                TypeKey::of::<R>(),
                field.name
            );
        }
        Self {
            type_key: TypeKey::of::<R>(),
            fields,
        }
    }

    /// Returns the record description of `R`, or `None` if `R` is not a record.
    #[must_use]
    pub fn of<R: Shaped>() -> Option<Self> {
        R::shape().into_record()
    }

    /// The record's own type.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One field of a record: its name, its type and erased accessors.
#[derive(Clone, Copy)]
pub struct FieldShape {
    name: &'static str,
    type_key: TypeKey,
    shape: fn() -> Shape,
    get: FieldGetter,
    get_mut: FieldGetterMut,
}

impl FieldShape {
    /// Describes a field of type `T`.
    ///
    /// `get` and `get_mut` receive the enclosing record as `&dyn Any` and
    /// must return the field as `&dyn Any` holding a `T`.
    #[must_use]
    pub fn new<T: Shaped>(name: &'static str, get: FieldGetter, get_mut: FieldGetterMut) -> Self {
        Self {
            name,
            type_key: TypeKey::of::<T>(),
            shape: T::shape,
            get,
            get_mut,
        }
    }

    /// The field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The field's declared type.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// The shape of the field's type.
    #[must_use]
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Borrows this field out of an erased record.
    #[must_use]
    pub fn get<'a>(&self, record: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(record)
    }

    /// Mutably borrows this field out of an erased record.
    #[must_use]
    pub fn get_mut<'a>(&self, record: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(record)
    }
}

impl fmt::Debug for FieldShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldShape")
            .field("name", &self.name)
            .field("type_key", &self.type_key)
            .finish_non_exhaustive()
    }
}

/// An ordered list of variants belonging to one union type.
#[derive(Clone, Debug)]
pub struct UnionShape {
    type_key: TypeKey,
    variants: Vec<VariantShape>,
}

impl UnionShape {
    /// Creates the description of union type `U`.
    #[must_use]
    pub fn new<U: Shaped>(variants: Vec<VariantShape>) -> Self {
        Self {
            type_key: TypeKey::of::<U>(),
            variants,
        }
    }

    /// Returns the union description of `U`, or `None` if `U` is not a union.
    #[must_use]
    pub fn of<U: Shaped>() -> Option<Self> {
        U::shape().into_union()
    }

    /// The union's own type.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Variants in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[VariantShape] {
        &self.variants
    }

    /// Looks a variant up by name.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&VariantShape> {
        self.variants.iter().find(|variant| variant.name == name)
    }
}

/// One variant of a union: its tag name, payload type and erased matcher and
/// constructor.
#[derive(Clone, Copy)]
pub struct VariantShape {
    name: &'static str,
    type_key: TypeKey,
    shape: fn() -> Shape,
    preview: VariantPreview,
    extract: VariantExtract,
    build: VariantBuild,
}

impl VariantShape {
    /// Describes a variant carrying a payload of type `T`.
    #[must_use]
    pub fn new<T: Shaped>(
        name: &'static str,
        preview: VariantPreview,
        extract: VariantExtract,
        build: VariantBuild,
    ) -> Self {
        Self {
            name,
            type_key: TypeKey::of::<T>(),
            shape: T::shape,
            preview,
            extract,
            build,
        }
    }

    /// The variant tag name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The payload type.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// The shape of the payload type.
    #[must_use]
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Borrows the payload if `union` holds this variant.
    #[must_use]
    pub fn preview<'a>(&self, union: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.preview)(union)
    }

    /// Moves the payload out, or hands `union` back untouched.
    ///
    /// # Errors
    ///
    /// Returns the original value when it holds a different variant.
    pub fn extract(&self, union: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
        (self.extract)(union)
    }

    /// Builds the union value holding `payload` under this variant.
    #[must_use]
    pub fn build(&self, payload: Box<dyn Any>) -> Box<dyn Any> {
        (self.build)(payload)
    }
}

impl fmt::Debug for VariantShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("VariantShape")
            .field("name", &self.name)
            .field("type_key", &self.type_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Shaped for Point {
        fn shape() -> Shape {
            Shape::Record(RecordShape::new::<Self>(vec![
                FieldShape::new::<i32>(
                    "x",
                    |source| source.downcast_ref::<Self>().map(|point| &point.x as &dyn Any),
                    |source| {
                        source
                            .downcast_mut::<Self>()
                            .map(|point| &mut point.x as &mut dyn Any)
                    },
                ),
                FieldShape::new::<i32>(
                    "y",
                    |source| source.downcast_ref::<Self>().map(|point| &point.y as &dyn Any),
                    |source| {
                        source
                            .downcast_mut::<Self>()
                            .map(|point| &mut point.y as &mut dyn Any)
                    },
                ),
            ]))
        }
    }

    #[test]
    fn test_record_shape_keeps_declaration_order() {
        let record = RecordShape::of::<Point>().unwrap();
        let names: Vec<_> = record.fields().iter().map(FieldShape::name).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(record.type_key(), TypeKey::of::<Point>());
    }

    #[test]
    fn test_field_accessors_read_and_write() {
        let record = RecordShape::of::<Point>().unwrap();
        let y = record.field("y").unwrap();
        let mut point = Point { x: 1, y: 2 };

        let read = y.get(&point).and_then(|value| value.downcast_ref::<i32>());
        assert_eq!(read, Some(&2));

        if let Some(slot) = y.get_mut(&mut point).and_then(|value| value.downcast_mut::<i32>()) {
            *slot = 20;
        }
        assert_eq!(point, Point { x: 1, y: 20 });
    }

    #[test]
    fn test_field_accessor_rejects_foreign_value() {
        let record = RecordShape::of::<Point>().unwrap();
        let x = record.field("x").unwrap();
        assert!(x.get(&"not a point").is_none());
    }

    #[test]
    fn test_opaque_types_have_no_structure() {
        assert_eq!(Shape::of::<String>().kind(), ShapeKind::Opaque);
        assert_eq!(Shape::of::<Vec<u8>>().kind(), ShapeKind::Opaque);
        assert!(RecordShape::of::<i64>().is_none());
    }

    #[test]
    fn test_box_is_transparent_record() {
        let record = RecordShape::of::<Box<Point>>().unwrap();
        assert_eq!(record.fields().len(), 1);
        assert_eq!(record.fields()[0].type_key(), TypeKey::of::<Point>());
    }

    #[test]
    #[should_panic(expected = "declares field `x` twice")]
    fn test_duplicate_field_names_are_rejected() {
        let field = RecordShape::of::<Point>().unwrap().fields()[0];
        let _ = RecordShape::new::<Point>(vec![field, field]);
    }

    #[test]
    fn test_shape_kind_display() {
        assert_eq!(ShapeKind::Record.to_string(), "record");
        assert_eq!(ShapeKind::Union.to_string(), "union");
        assert_eq!(ShapeKind::Opaque.to_string(), "opaque");
    }
}
