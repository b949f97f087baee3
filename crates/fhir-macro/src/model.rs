//! Parsed form of a derive input, shared by all three derives.

use heck::ToLowerCamelCase;
use syn::{
    Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, PathArguments, Type,
    spanned::Spanned,
};

pub enum Cardinality {
    /// `T`: the field must be present on the wire.
    Required,
    /// `Option<T>`
    Optional,
    /// `Vec<T>`; an empty list is the same as an absent field.
    List,
}

pub struct Field {
    pub member: Ident,
    pub wire_name: String,
    pub cardinality: Cardinality,
    /// The element type with `Option`/`Vec` peeled off.
    pub ty: Type,
    /// Whether `ty` is a `Box<_>`.
    pub boxed: bool,
}

pub struct Variant {
    pub ident: Ident,
    pub suffix: String,
    pub ty: Type,
}

pub enum Body {
    Struct(Vec<Field>),
    Choice(Vec<Variant>),
}

pub struct Container {
    pub ident: Ident,
    /// Set for resources: `resourceType` is written first and checked on read.
    pub resource_type: Option<String>,
    /// FHIR type name reported to FHIRPath.
    pub type_name: String,
    pub body: Body,
}

#[derive(Default)]
struct Attrs {
    rename: Option<String>,
    resource_type: Option<String>,
    type_name: Option<String>,
}

fn parse_attrs(attrs: &[syn::Attribute]) -> syn::Result<Attrs> {
    let mut out = Attrs::default();
    for attr in attrs {
        if !attr.path().is_ident("fhir_serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let value = || -> syn::Result<String> { Ok(meta.value()?.parse::<LitStr>()?.value()) };
            if meta.path.is_ident("rename") {
                out.rename = Some(value()?);
            } else if meta.path.is_ident("resource_type") {
                out.resource_type = Some(value()?);
            } else if meta.path.is_ident("type_name") {
                out.type_name = Some(value()?);
            } else {
                return Err(meta.error("unsupported fhir_serde attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Returns `T` if `ty` is `wrapper<T>`.
fn unwrap_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn wire_name(ident: &Ident) -> String {
    let raw = ident.to_string();
    raw.strip_prefix("r#").unwrap_or(&raw).to_lower_camel_case()
}

impl Container {
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "FHIR derives do not support generic types",
            ));
        }

        let attrs = parse_attrs(&input.attrs)?;
        let ident = input.ident.clone();
        let type_name = attrs
            .type_name
            .or_else(|| attrs.resource_type.clone())
            .unwrap_or_else(|| ident.to_string());

        let body = match &input.data {
            Data::Struct(data) => {
                let Fields::Named(named) = &data.fields else {
                    return Err(syn::Error::new(
                        data.fields.span(),
                        "FHIR structs must have named fields",
                    ));
                };
                let mut fields = Vec::with_capacity(named.named.len());
                for field in &named.named {
                    let member = field.ident.clone().ok_or_else(|| {
                        syn::Error::new(field.span(), "FHIR structs must have named fields")
                    })?;
                    let field_attrs = parse_attrs(&field.attrs)?;
                    let (cardinality, ty) = if let Some(inner) = unwrap_generic(&field.ty, "Option") {
                        (Cardinality::Optional, inner.clone())
                    } else if let Some(inner) = unwrap_generic(&field.ty, "Vec") {
                        (Cardinality::List, inner.clone())
                    } else {
                        (Cardinality::Required, field.ty.clone())
                    };
                    fields.push(Field {
                        wire_name: field_attrs.rename.unwrap_or_else(|| wire_name(&member)),
                        boxed: unwrap_generic(&ty, "Box").is_some(),
                        member,
                        cardinality,
                        ty,
                    });
                }
                Body::Struct(fields)
            }
            Data::Enum(data) => {
                if attrs.resource_type.is_some() {
                    return Err(syn::Error::new(
                        ident.span(),
                        "resource_type applies to structs only",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    let Fields::Unnamed(unnamed) = &variant.fields else {
                        return Err(syn::Error::new(
                            variant.span(),
                            "choice variants must wrap exactly one type",
                        ));
                    };
                    let Some(field) = unnamed.unnamed.first().filter(|_| unnamed.unnamed.len() == 1)
                    else {
                        return Err(syn::Error::new(
                            variant.span(),
                            "choice variants must wrap exactly one type",
                        ));
                    };
                    let variant_attrs = parse_attrs(&variant.attrs)?;
                    variants.push(Variant {
                        suffix: variant_attrs
                            .rename
                            .unwrap_or_else(|| variant.ident.to_string()),
                        ident: variant.ident.clone(),
                        ty: field.ty.clone(),
                    });
                }
                if variants.is_empty() {
                    return Err(syn::Error::new(
                        ident.span(),
                        "a choice element needs at least one variant",
                    ));
                }
                Body::Choice(variants)
            }
            Data::Union(_) => {
                return Err(syn::Error::new(ident.span(), "unions are not supported"));
            }
        };

        Ok(Container {
            ident,
            resource_type: attrs.resource_type,
            type_name,
            body,
        })
    }
}
