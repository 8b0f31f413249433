//! Procedural macro deriving `exlibris_record::Record`.
//!
//! The derive replaces runtime field introspection with a descriptor table
//! generated at compile time. Only fields of kind `String` (a `String`) or
//! `Integer` (any primitive integer type) are described, optionally wrapped in
//! `Option`. Fields of any other type are left out of the table without an
//! error, but still receive `Default::default()` when the record is
//! instantiated.

use std::collections::HashSet;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, PathArguments,
    PathSegment, Type, parse_macro_input,
};

/// Derives `exlibris_record::Record` for a struct with named fields.
///
/// ```ignore
/// use exlibris_record::Record;
///
/// #[derive(Default, Record)]
/// #[record(rename_all = "camelCase")]
/// struct Book {
///     title: Option<String>,
///     author: Option<String>,
///     publish_year: i32,
///     #[record(skip)]
///     shelf: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Clone, Copy)]
enum Kind {
    String,
    Integer,
}

struct DescribedField<'a> {
    ident: &'a Ident,
    name: String,
    kind: Kind,
    nullable: bool,
}

#[derive(Default)]
struct ContainerAttrs {
    rename: Option<String>,
    rename_all: Option<RenameRule>,
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unknown rename_all rule `{other}`"),
            )),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Kebab => name.to_kebab_case(),
        }
    }
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let container = parse_container_attrs(&input.attrs)?;
    let type_name = container
        .rename
        .clone()
        .unwrap_or_else(|| name.unraw().to_string());

    let mut described = Vec::new();
    let mut seen = HashSet::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some((kind, nullable)) = classify(&field.ty) else {
            continue;
        };

        let field_name = match (attrs.rename, container.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
            (None, None) => ident.unraw().to_string(),
        };
        if !seen.insert(field_name.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate record field name `{field_name}`"),
            ));
        }

        described.push(DescribedField {
            ident,
            name: field_name,
            kind,
            nullable,
        });
    }

    let descriptors = described.iter().map(|field| {
        let field_name = &field.name;
        let kind = kind_tokens(field.kind);
        if field.nullable {
            quote! { ::exlibris_record::FieldDescriptor::nullable(#field_name, #kind) }
        } else {
            quote! { ::exlibris_record::FieldDescriptor::new(#field_name, #kind) }
        }
    });

    let value_arms = described.iter().map(|field| {
        let ident = field.ident;
        let field_name = &field.name;
        let value = match (field.kind, field.nullable) {
            (Kind::String, false) => quote! {
                ::core::result::Result::Ok(::core::option::Option::Some(
                    ::exlibris_record::FieldValue::String(::core::clone::Clone::clone(&self.#ident)),
                ))
            },
            (Kind::String, true) => quote! {
                ::core::result::Result::Ok(
                    self.#ident
                        .as_ref()
                        .map(|value| ::exlibris_record::FieldValue::String(::core::clone::Clone::clone(value))),
                )
            },
            (Kind::Integer, false) => quote! {
                ::exlibris_record::__private::integer_value(#field_name, self.#ident)
                    .map(::core::option::Option::Some)
            },
            (Kind::Integer, true) => quote! {
                self.#ident
                    .map(|value| ::exlibris_record::__private::integer_value(#field_name, value))
                    .transpose()
            },
        };
        quote! { #field_name => #value, }
    });

    let assign_arms = described.iter().map(|field| {
        let ident = field.ident;
        let field_name = &field.name;
        let converted = match field.kind {
            Kind::String => quote! {
                ::exlibris_record::__private::into_string(#field_name, value)?
            },
            Kind::Integer => quote! {
                ::exlibris_record::__private::into_integer(#field_name, value)?
            },
        };
        let stored = if field.nullable {
            quote! { ::core::option::Option::Some(#converted) }
        } else {
            converted
        };
        quote! {
            #field_name => {
                self.#ident = #stored;
                ::core::result::Result::Ok(())
            }
        }
    });

    let all_idents = fields.iter().filter_map(|field| field.ident.as_ref());

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::exlibris_record::Record for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            fn fields() -> &'static [::exlibris_record::FieldDescriptor] {
                const FIELDS: &[::exlibris_record::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn value_of(&self, field: &str) -> ::core::option::Option<::exlibris_record::FieldValue> {
                ::exlibris_record::Record::try_value_of(self, field).ok().flatten()
            }

            #[allow(unused_variables)]
            fn try_value_of(
                &self,
                field: &str,
            ) -> ::core::result::Result<
                ::core::option::Option<::exlibris_record::FieldValue>,
                ::exlibris_record::CoercionError,
            > {
                match field {
                    #(#value_arms)*
                    _ => ::core::result::Result::Ok(::core::option::Option::None),
                }
            }

            fn instantiate() -> ::core::result::Result<Self, ::exlibris_record::InstantiationError> {
                ::core::result::Result::Ok(Self {
                    #(#all_idents: ::core::default::Default::default(),)*
                })
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &str,
                value: ::exlibris_record::FieldValue,
            ) -> ::core::result::Result<(), ::exlibris_record::CoercionError> {
                match field {
                    #(#assign_arms)*
                    _ => ::core::result::Result::Err(::exlibris_record::__private::unknown_field(field)),
                }
            }
        }
    })
}

fn kind_tokens(kind: Kind) -> proc_macro2::TokenStream {
    match kind {
        Kind::String => quote! { ::exlibris_record::FieldKind::String },
        Kind::Integer => quote! { ::exlibris_record::FieldKind::Integer },
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename_all = Some(RenameRule::parse(&lit)?);
                Ok(())
            } else {
                Err(meta.error("expected `rename` or `rename_all`"))
            }
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename` or `skip`"))
            }
        })?;
    }
    Ok(parsed)
}

/// Returns the field's kind and whether it is wrapped in `Option`, or `None`
/// for unsupported types.
fn classify(ty: &Type) -> Option<(Kind, bool)> {
    let segment = last_segment(ty)?;
    if segment.ident == "Option" {
        let PathArguments::AngleBracketed(args) = &segment.arguments else {
            return None;
        };
        let Some(GenericArgument::Type(inner)) = args.args.first() else {
            return None;
        };
        return primitive_kind(inner).map(|kind| (kind, true));
    }
    primitive_kind(ty).map(|kind| (kind, false))
}

fn primitive_kind(ty: &Type) -> Option<Kind> {
    let segment = last_segment(ty)?;
    if !segment.arguments.is_empty() {
        return None;
    }
    match segment.ident.to_string().as_str() {
        "String" => Some(Kind::String),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            Some(Kind::Integer)
        }
        _ => None,
    }
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}
