//! `#[derive(FhirPath)]`: child enumeration and evaluation-result snapshots.

use crate::model::{Body, Cardinality, Container, Field, Variant};
use proc_macro2::TokenStream;
use quote::quote;

pub fn expand(container: &Container) -> TokenStream {
    match &container.body {
        Body::Struct(fields) => expand_struct(container, fields),
        Body::Choice(variants) => expand_choice(container, variants),
    }
}

fn expand_struct(container: &Container, fields: &[Field]) -> TokenStream {
    let ident = &container.ident;
    let type_name = &container.type_name;

    let push_children = fields.iter().map(|field| {
        let member = &field.member;
        let name = &field.wire_name;
        let child = if field.boxed {
            quote! { &**__child }
        } else {
            quote! { __child }
        };
        match field.cardinality {
            Cardinality::Required => quote! {
                let __child = &self.#member;
                __children.push((#name, #child as &dyn __path::FhirPathElement));
            },
            Cardinality::Optional => quote! {
                if let ::core::option::Option::Some(__child) = &self.#member {
                    __children.push((#name, #child as &dyn __path::FhirPathElement));
                }
            },
            Cardinality::List => quote! {
                for __child in &self.#member {
                    __children.push((#name, #child as &dyn __path::FhirPathElement));
                }
            },
        }
    });

    let resource_type_entry = container.resource_type.as_ref().map(|resource_type| {
        quote! {
            __map.insert(
                ::std::string::String::from("resourceType"),
                __path::EvaluationResult::string(#resource_type),
            );
        }
    });
    let insert_values = fields.iter().map(|field| {
        let member = &field.member;
        let name = &field.wire_name;
        quote! {
            let __value = __path::IntoEvaluationResult::to_evaluation_result(&self.#member);
            if !__value.is_empty() {
                __map.insert(::std::string::String::from(#name), __value);
            }
        }
    });

    quote! {
        const _: () = {
            use ::plait_fhirpath_support as __path;

            impl __path::FhirPathElement for #ident {
                fn type_name(&self) -> &'static str {
                    #type_name
                }

                fn named_children(&self) -> ::std::vec::Vec<(&'static str, &dyn __path::FhirPathElement)> {
                    let mut __children: ::std::vec::Vec<(&'static str, &dyn __path::FhirPathElement)> =
                        ::std::vec::Vec::new();
                    #(#push_children)*
                    __children
                }
            }

            impl __path::IntoEvaluationResult for #ident {
                fn to_evaluation_result(&self) -> __path::EvaluationResult {
                    let mut __map = ::std::collections::HashMap::new();
                    #resource_type_entry
                    #(#insert_values)*
                    __path::EvaluationResult::Object {
                        map: __map,
                        type_info: ::core::option::Option::Some(__path::TypeInfoResult::fhir(#type_name)),
                    }
                }
            }
        };
    }
}

/// A choice element is transparent: it behaves exactly like the value it holds.
fn expand_choice(container: &Container, variants: &[Variant]) -> TokenStream {
    let ident = &container.ident;
    let idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();

    let delegate = |method: TokenStream, ret: TokenStream| {
        quote! {
            fn #method(&self) -> #ret {
                match self {
                    #(#ident::#idents(__value) => __path::FhirPathElement::#method(__value),)*
                }
            }
        }
    };
    let methods = [
        delegate(quote!(type_name), quote!(&'static str)),
        delegate(quote!(to_boolean), quote!(__path::ConversionResult<bool>)),
        delegate(
            quote!(to_string_value),
            quote!(__path::ConversionResult<::std::string::String>),
        ),
        delegate(quote!(to_integer), quote!(__path::ConversionResult<i64>)),
        delegate(
            quote!(to_decimal),
            quote!(__path::ConversionResult<__path::Decimal>),
        ),
        delegate(
            quote!(to_date),
            quote!(__path::ConversionResult<::std::string::String>),
        ),
        delegate(
            quote!(to_time),
            quote!(__path::ConversionResult<::std::string::String>),
        ),
        delegate(
            quote!(to_date_time),
            quote!(__path::ConversionResult<::std::string::String>),
        ),
        delegate(
            quote!(to_quantity),
            quote!(__path::ConversionResult<__path::Quantity>),
        ),
    ];

    quote! {
        const _: () = {
            use ::plait_fhirpath_support as __path;

            impl __path::FhirPathElement for #ident {
                #(#methods)*

                fn named_children(&self) -> ::std::vec::Vec<(&'static str, &dyn __path::FhirPathElement)> {
                    match self {
                        #(#ident::#idents(__value) => __path::FhirPathElement::named_children(__value),)*
                    }
                }
            }

            impl __path::IntoEvaluationResult for #ident {
                fn to_evaluation_result(&self) -> __path::EvaluationResult {
                    match self {
                        #(#ident::#idents(__value) => __path::IntoEvaluationResult::to_evaluation_result(__value),)*
                    }
                }
            }
        };
    }
}
