//! Union shapes for enums.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Fields, Generics, Ident, Variant};

/// Generates the `Shaped` impl for an enum.
///
/// Only variants with exactly one field carry a payload type; the others are
/// left out of the union shape.
pub fn generate(
    name: &Ident,
    generics: &Generics,
    variants: &Punctuated<Variant, Comma>,
) -> TokenStream2 {
    let variant_shapes: Vec<TokenStream2> = variants.iter().filter_map(variant_shape).collect();

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::shapelift::shape::Shaped for #name #type_generics #where_clause {
            fn shape() -> ::shapelift::shape::Shape {
                ::shapelift::shape::Shape::Union(
                    ::shapelift::shape::UnionShape::new::<Self>(::std::vec![
                        #(#variant_shapes),*
                    ])
                )
            }
        }
    }
}

fn variant_shape(variant: &Variant) -> Option<TokenStream2> {
    let tag = &variant.ident;
    let label = tag.to_string();

    let (payload_type, pattern, construct) = match &variant.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let field = fields.unnamed.first()?;
            (
                &field.ty,
                quote!(Self::#tag(payload)),
                quote!(Self::#tag(*payload)),
            )
        }
        Fields::Named(fields) if fields.named.len() == 1 => {
            let field = fields.named.first()?;
            let member = field.ident.as_ref()?;
            (
                &field.ty,
                quote!(Self::#tag { #member: payload }),
                quote!(Self::#tag { #member: *payload }),
            )
        }
        _ => return None,
    };

    Some(quote! {
        ::shapelift::shape::VariantShape::new::<#payload_type>(
            #label,
            |source| match source.downcast_ref::<Self>() {
                Some(#pattern) => Some(payload as &dyn ::core::any::Any),
                #[allow(unreachable_patterns)]
                _ => None,
            },
            |source| match source.downcast::<Self>() {
                Ok(union) => match *union {
                    #pattern => Ok(::std::boxed::Box::new(payload)
                        as ::std::boxed::Box<dyn ::core::any::Any>),
                    #[allow(unreachable_patterns)]
                    other => Err(::std::boxed::Box::new(other)
                        as ::std::boxed::Box<dyn ::core::any::Any>),
                },
                Err(source) => Err(source),
            },
            |payload| match payload.downcast::<#payload_type>() {
                Ok(payload) => ::std::boxed::Box::new(#construct)
                    as ::std::boxed::Box<dyn ::core::any::Any>,
                Err(payload) => payload,
            },
        )
    })
}
