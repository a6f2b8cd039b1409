//! `Shaped` implementations for standard library types.
//!
//! Scalars, strings and collections are leaves. `Box<T>` is a transparent
//! single-field record so a record can refer to itself through a box.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::sync::Arc;

use super::{FieldShape, RecordShape, Shape, Shaped};

macro_rules! opaque_shape {
    ($($leaf:ty),* $(,)?) => {
        $(
            impl Shaped for $leaf {
                fn shape() -> Shape {
                    Shape::Opaque
                }
            }
        )*
    };
}

opaque_shape!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    std::time::Duration,
);

impl<T: Clone + Send + Sync + 'static> Shaped for Vec<T> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Clone + Send + Sync + 'static> Shaped for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Clone + Send + Sync + 'static> Shaped for Option<T> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Send + Sync + 'static> Shaped for Arc<T> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<K, V, S> Shaped for HashMap<K, V, S>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T, S> Shaped for HashSet<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<K, V> Shaped for BTreeMap<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Clone + Send + Sync + 'static> Shaped for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Shaped> Shaped for Box<T> {
    fn shape() -> Shape {
        Shape::Record(RecordShape::new::<Self>(vec![FieldShape::new::<T>(
            "*",
            |source| {
                source
                    .downcast_ref::<Self>()
                    .map(|boxed| &**boxed as &dyn Any)
            },
            |source| {
                source
                    .downcast_mut::<Self>()
                    .map(|boxed| &mut **boxed as &mut dyn Any)
            },
        )]))
    }
}
