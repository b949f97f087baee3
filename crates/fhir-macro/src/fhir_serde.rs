//! `#[derive(FhirSerde)]`
//!
//! Structs get `Serialize`/`Deserialize` impls that delegate every field to
//! its `FhirCodec` and a `FhirCodec` impl of their own, so they can in turn be
//! used as fields. Choice enums get only a `FhirCodec` impl: a choice has no
//! standalone JSON form, it is always spread over its parent's keys.

use crate::model::{Body, Cardinality, Container, Field, Variant};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

pub fn expand(container: &Container) -> TokenStream {
    match &container.body {
        Body::Struct(fields) => expand_struct(container, fields),
        Body::Choice(variants) => expand_choice(container, variants),
    }
}

fn expand_struct(container: &Container, fields: &[Field]) -> TokenStream {
    let ident = &container.ident;
    let expecting = format!("a FHIR {} object", container.type_name);
    let unexpected = format!("unexpected field `{{}}` in {}", container.type_name);

    let write_resource_type = container.resource_type.as_ref().map(|resource_type| {
        quote! { __map.serialize_entry("resourceType", #resource_type)?; }
    });
    let read_resource_type = container.resource_type.as_ref().map(|resource_type| {
        let mismatch = format!("expected resourceType `{resource_type}`, found `{{}}`");
        quote! {
            if __key == "resourceType" {
                let __found: ::std::string::String = __map.next_value()?;
                if __found != #resource_type {
                    return ::core::result::Result::Err(__serde::de::Error::custom(
                        ::core::format_args!(#mismatch, __found),
                    ));
                }
                continue;
            }
        }
    });

    let encode_fields = fields.iter().map(|field| {
        let member = &field.member;
        let ty = &field.ty;
        let name = &field.wire_name;
        match field.cardinality {
            Cardinality::Required => quote! {
                <#ty as __codec::FhirCodec>::encode(&self.#member, #name, &mut __map)?;
            },
            Cardinality::Optional => quote! {
                if let ::core::option::Option::Some(__value) = &self.#member {
                    <#ty as __codec::FhirCodec>::encode(__value, #name, &mut __map)?;
                }
            },
            Cardinality::List => quote! {
                <#ty as __codec::FhirCodec>::encode_list(&self.#member, #name, &mut __map)?;
            },
        }
    });

    let slots: Vec<_> = (0..fields.len()).map(|i| format_ident!("__slot_{}", i)).collect();

    let declare_slots = fields.iter().zip(&slots).map(|(field, slot)| {
        let ty = &field.ty;
        match field.cardinality {
            Cardinality::List => quote! {
                let mut #slot: <#ty as __codec::FhirCodec>::ListSlot = ::core::default::Default::default();
            },
            _ => quote! {
                let mut #slot: <#ty as __codec::FhirCodec>::Slot = ::core::default::Default::default();
            },
        }
    });

    let dispatch = fields.iter().zip(&slots).map(|(field, slot)| {
        let ty = &field.ty;
        let name = &field.wire_name;
        let decode = match field.cardinality {
            Cardinality::List => quote! {
                <#ty as __codec::FhirCodec>::decode_list_entry(&mut #slot, &__key, __hit, &mut __map)?;
            },
            _ => quote! {
                <#ty as __codec::FhirCodec>::decode_entry(&mut #slot, &__key, __hit, &mut __map)?;
            },
        };
        quote! {
            if let ::core::option::Option::Some(__hit) = <#ty as __codec::FhirCodec>::match_key(#name, &__key) {
                #decode
                continue;
            }
        }
    });

    let assemble = fields.iter().zip(&slots).map(|(field, slot)| {
        let member = &field.member;
        let ty = &field.ty;
        let name = &field.wire_name;
        match field.cardinality {
            Cardinality::Required => quote! {
                #member: <#ty as __codec::FhirCodec>::finish::<__A::Error>(#slot, #name)?
                    .ok_or_else(|| <__A::Error as __serde::de::Error>::missing_field(#name))?
            },
            Cardinality::Optional => quote! {
                #member: <#ty as __codec::FhirCodec>::finish::<__A::Error>(#slot, #name)?
            },
            Cardinality::List => quote! {
                #member: <#ty as __codec::FhirCodec>::finish_list::<__A::Error>(#slot, #name)?
            },
        }
    });

    let resource_type_option = match &container.resource_type {
        Some(resource_type) => quote! { ::core::option::Option::Some(#resource_type) },
        None => quote! { ::core::option::Option::None },
    };
    let descriptors = fields.iter().map(|field| {
        let ty = &field.ty;
        let name = &field.wire_name;
        let repeats = matches!(field.cardinality, Cardinality::List);
        quote! {
            __codec::FieldDescriptor {
                name: #name,
                repeats: #repeats,
                shape: <#ty as __codec::FhirCodec>::shape,
            }
        }
    });
    let shape = quote! {
        const FIELDS: &[__codec::FieldDescriptor] = &[#(#descriptors),*];
        __codec::Shape::Complex {
            resource_type: #resource_type_option,
            fields: FIELDS,
        }
    };

    quote! {
        const _: () = {
            use ::plait_serde_support as __codec;
            use ::plait_serde_support::__private::serde as __serde;
            use __serde::ser::SerializeMap as _;

            impl __serde::Serialize for #ident {
                fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
                where
                    __S: __serde::Serializer,
                {
                    let mut __map = __serializer.serialize_map(::core::option::Option::None)?;
                    #write_resource_type
                    #(#encode_fields)*
                    __map.end()
                }
            }

            impl<'de> __serde::Deserialize<'de> for #ident {
                fn deserialize<__D>(__deserializer: __D) -> ::core::result::Result<Self, __D::Error>
                where
                    __D: __serde::Deserializer<'de>,
                {
                    struct __Visitor;

                    impl<'de> __serde::de::Visitor<'de> for __Visitor {
                        type Value = #ident;

                        fn expecting(&self, __f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                            __f.write_str(#expecting)
                        }

                        fn visit_map<__A>(self, mut __map: __A) -> ::core::result::Result<#ident, __A::Error>
                        where
                            __A: __serde::de::MapAccess<'de>,
                        {
                            #(#declare_slots)*
                            while let ::core::option::Option::Some(__key) =
                                __map.next_key::<::std::string::String>()?
                            {
                                #read_resource_type
                                #(#dispatch)*
                                return ::core::result::Result::Err(__serde::de::Error::custom(
                                    ::core::format_args!(#unexpected, __key),
                                ));
                            }
                            ::core::result::Result::Ok(#ident {
                                #(#assemble),*
                            })
                        }
                    }

                    __deserializer.deserialize_map(__Visitor)
                }
            }

            __codec::impl_whole_codec!(#ident, { #shape });
        };
    }
}

fn expand_choice(container: &Container, variants: &[Variant]) -> TokenStream {
    let ident = &container.ident;
    let slot_ident = format_ident!("__{}Slot", ident);
    let slot_fields: Vec<_> = (0..variants.len()).map(|i| format_ident!("s{}", i)).collect();
    let tys: Vec<_> = variants.iter().map(|variant| &variant.ty).collect();
    let idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();
    let suffixes: Vec<_> = variants.iter().map(|variant| variant.suffix.as_str()).collect();
    let indices: Vec<_> = (0..variants.len()).collect();
    let cannot_repeat = format!("choice element `{{}}[x]` ({}) cannot repeat", container.type_name);

    quote! {
        #[doc(hidden)]
        pub struct #slot_ident {
            active: ::core::option::Option<usize>,
            #(#slot_fields: <#tys as ::plait_serde_support::FhirCodec>::Slot,)*
        }

        impl ::core::default::Default for #slot_ident {
            fn default() -> Self {
                Self {
                    active: ::core::option::Option::None,
                    #(#slot_fields: ::core::default::Default::default(),)*
                }
            }
        }

        const _: () = {
            use ::plait_serde_support as __codec;
            use ::plait_serde_support::__private::serde as __serde;

            const SUFFIXES: &[&str] = &[#(#suffixes),*];

            impl __codec::FhirCodec for #ident {
                type Slot = #slot_ident;
                type ListSlot = ();

                fn shape() -> __codec::Shape {
                    const VARIANTS: &[__codec::VariantDescriptor] = &[
                        #(__codec::VariantDescriptor {
                            suffix: #suffixes,
                            shape: <#tys as __codec::FhirCodec>::shape,
                        }),*
                    ];
                    __codec::Shape::Choice(VARIANTS)
                }

                fn match_key(name: &str, key: &str) -> ::core::option::Option<__codec::KeyMatch> {
                    let (metadata, rest) = match key.strip_prefix('_') {
                        ::core::option::Option::Some(rest) => (true, rest),
                        ::core::option::Option::None => (false, key),
                    };
                    let suffix = rest.strip_prefix(name)?;
                    match suffix {
                        #(#suffixes => (!metadata || <#tys as __codec::FhirCodec>::shape().is_primitive())
                            .then_some(__codec::KeyMatch { variant: #indices, metadata }),)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn decode_entry<'de, __A>(
                    slot: &mut Self::Slot,
                    key: &str,
                    hit: __codec::KeyMatch,
                    map: &mut __A,
                ) -> ::core::result::Result<(), __A::Error>
                where
                    __A: __serde::de::MapAccess<'de>,
                {
                    if let ::core::option::Option::Some(active) = slot.active {
                        if active != hit.variant {
                            let base = key
                                .trim_start_matches('_')
                                .strip_suffix(SUFFIXES[hit.variant])
                                .unwrap_or(key);
                            return ::core::result::Result::Err(__serde::de::Error::custom(
                                ::core::format_args!(
                                    "choice element `{}[x]` already holds a value; unexpected second key `{}`",
                                    base, key
                                ),
                            ));
                        }
                    }
                    slot.active = ::core::option::Option::Some(hit.variant);
                    match hit.variant {
                        #(#indices => <#tys as __codec::FhirCodec>::decode_entry(&mut slot.#slot_fields, key, hit, map),)*
                        _ => ::core::result::Result::Err(__serde::de::Error::custom(
                            ::core::format_args!("no choice variant for key `{}`", key),
                        )),
                    }
                }

                fn finish<__E: __serde::de::Error>(
                    slot: Self::Slot,
                    name: &str,
                ) -> ::core::result::Result<::core::option::Option<Self>, __E> {
                    match slot.active {
                        #(::core::option::Option::Some(#indices) => ::core::result::Result::Ok(
                            <#tys as __codec::FhirCodec>::finish::<__E>(slot.#slot_fields, name)?.map(#ident::#idents),
                        ),)*
                        _ => ::core::result::Result::Ok(::core::option::Option::None),
                    }
                }

                fn decode_list_entry<'de, __A>(
                    _slot: &mut Self::ListSlot,
                    key: &str,
                    _hit: __codec::KeyMatch,
                    _map: &mut __A,
                ) -> ::core::result::Result<(), __A::Error>
                where
                    __A: __serde::de::MapAccess<'de>,
                {
                    ::core::result::Result::Err(__serde::de::Error::custom(
                        ::core::format_args!(#cannot_repeat, key),
                    ))
                }

                fn finish_list<__E: __serde::de::Error>(
                    _slot: Self::ListSlot,
                    _name: &str,
                ) -> ::core::result::Result<::std::vec::Vec<Self>, __E> {
                    ::core::result::Result::Ok(::std::vec::Vec::new())
                }

                fn encode<__M: __serde::ser::SerializeMap>(
                    &self,
                    name: &str,
                    map: &mut __M,
                ) -> ::core::result::Result<(), __M::Error> {
                    match self {
                        #(#ident::#idents(__value) => <#tys as __codec::FhirCodec>::encode(
                            __value,
                            &::std::format!("{}{}", name, #suffixes),
                            map,
                        ),)*
                    }
                }

                fn encode_list<__M: __serde::ser::SerializeMap>(
                    items: &[Self],
                    name: &str,
                    _map: &mut __M,
                ) -> ::core::result::Result<(), __M::Error> {
                    if items.is_empty() {
                        return ::core::result::Result::Ok(());
                    }
                    ::core::result::Result::Err(__serde::ser::Error::custom(
                        ::core::format_args!(#cannot_repeat, name),
                    ))
                }
            }
        };
    }
}
