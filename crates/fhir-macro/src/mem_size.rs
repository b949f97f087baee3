//! `#[derive(MemSize)]`: structural size as the sum of the fields' sizes.

use crate::model::{Body, Container};
use proc_macro2::TokenStream;
use quote::quote;

pub fn expand(container: &Container) -> TokenStream {
    let ident = &container.ident;
    let body = match &container.body {
        Body::Struct(fields) => {
            let members = fields.iter().map(|field| &field.member);
            quote! {
                0usize #(+ ::plait_fhir::MemSize::mem_size(&self.#members))*
            }
        }
        Body::Choice(variants) => {
            let idents = variants.iter().map(|variant| &variant.ident);
            quote! {
                match self {
                    #(#ident::#idents(__value) => ::plait_fhir::MemSize::mem_size(__value),)*
                }
            }
        }
    };

    quote! {
        impl ::plait_fhir::MemSize for #ident {
            fn mem_size(&self) -> usize {
                #body
            }
        }
    }
}
