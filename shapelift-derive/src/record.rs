//! Record shapes for structs.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Fields, Generics, Ident, Index, Member};

/// Generates the `Shaped` impl for a struct.
pub fn generate(name: &Ident, generics: &Generics, fields: &Fields) -> TokenStream2 {
    let field_shapes: Vec<TokenStream2> = fields
        .iter()
        .enumerate()
        .map(|(position, field)| {
            let member = field.ident.clone().map_or_else(
                || Member::Unnamed(Index::from(position)),
                Member::Named,
            );
            let label = field
                .ident
                .as_ref()
                .map_or_else(|| position.to_string(), ToString::to_string);
            let field_type = &field.ty;

            quote! {
                ::shapelift::shape::FieldShape::new::<#field_type>(
                    #label,
                    |source| {
                        source
                            .downcast_ref::<Self>()
                            .map(|record| &record.#member as &dyn ::core::any::Any)
                    },
                    |source| {
                        source
                            .downcast_mut::<Self>()
                            .map(|record| &mut record.#member as &mut dyn ::core::any::Any)
                    },
                )
            }
        })
        .collect();

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::shapelift::shape::Shaped for #name #type_generics #where_clause {
            fn shape() -> ::shapelift::shape::Shape {
                ::shapelift::shape::Shape::Record(
                    ::shapelift::shape::RecordShape::new::<Self>(::std::vec![
                        #(#field_shapes),*
                    ])
                )
            }
        }
    }
}
