//! Derive macro for shapelift shape descriptors.
//!
//! `#[derive(Shaped)]` implements `shapelift::shape::Shaped` for a struct or
//! an enum:
//!
//! - structs become record shapes, one field per struct field, in
//!   declaration order (tuple fields are named `0`, `1`, ...)
//! - enums become union shapes, one variant per single-field variant;
//!   unit and multi-field variants are alternatives without a payload type
//!
//! Every generic type parameter gets a `Shaped` bound.
//!
//! # Example
//!
//! ```rust,ignore
//! use shapelift::shape::Shaped;
//!
//! #[derive(Clone, Shaped)]
//! struct Headers {
//!     host: String,
//! }
//!
//! #[derive(Clone, Shaped)]
//! enum Event {
//!     Received(Headers),
//!     Closed,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod record;
mod union;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{Data, DeriveInput, Generics, parse_macro_input, parse_quote};

/// Derive macro implementing `shapelift::shape::Shaped`.
///
/// # Requirements
///
/// - The type must be a struct or an enum
/// - The type must implement `Clone` and be `Send + Sync + 'static`
/// - Every field or variant payload type must implement `Shaped`
///
/// # Generated Code
///
/// For a struct, `shape()` returns `Shape::Record` with one `FieldShape` per
/// field. For an enum, `shape()` returns `Shape::Union` with one
/// `VariantShape` per single-field variant. Accessors are non-capturing
/// closures coerced to `fn` pointers.
#[proc_macro_derive(Shaped)]
pub fn derive_shaped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand(&input))
}

fn expand(input: &DeriveInput) -> TokenStream2 {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return syn::Error::new_spanned(
            lifetime,
            "Shaped cannot be derived for types with lifetime parameters",
        )
        .to_compile_error();
    }

    let name = &input.ident;
    let generics = bounded(&input.generics);

    match &input.data {
        Data::Struct(data_struct) => record::generate(name, &generics, &data_struct.fields),
        Data::Enum(data_enum) => union::generate(name, &generics, &data_enum.variants),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Shaped cannot be derived for unions.")
                .to_compile_error()
        }
    }
}

/// Adds a `Shaped` bound to every type parameter.
fn bounded(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let parameters: Vec<_> = generics
        .type_params()
        .map(|parameter| parameter.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for parameter in parameters {
        where_clause
            .predicates
            .push(parse_quote!(#parameter: ::shapelift::shape::Shaped));
    }
    generics
}
