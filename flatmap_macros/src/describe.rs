//! Describe derive macro implementation

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericParam, Generics, LitStr, parse_macro_input,
    parse_quote,
};

/// Case conversion applied to every field name without an explicit rename
#[derive(Clone, Copy)]
enum RenameRule {
    SnakeCase,
    PascalCase,
    CamelCase,
    ScreamingSnakeCase,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "snake_case" => Ok(Self::SnakeCase),
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnakeCase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename_all rule `{other}`; expected snake_case, PascalCase, camelCase or SCREAMING_SNAKE_CASE"
                ),
            )),
        }
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::SnakeCase => field.to_snake_case(),
            Self::PascalCase => field.to_upper_camel_case(),
            Self::CamelCase => field.to_lower_camel_case(),
            Self::ScreamingSnakeCase => field.to_shouty_snake_case(),
        }
    }
}

#[derive(Default)]
struct ContainerAttrs {
    rename_all: Option<RenameRule>,
    name:       Option<LitStr>,
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<LitStr>,
    skip:   bool,
}

/// Implementation of the Describe derive macro
pub fn derive_describe_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Describe cannot be derived for types with lifetime parameters",
        ));
    }

    let container = parse_container_attrs(&input.attrs)?;

    let shape = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let mut members = Vec::with_capacity(fields.named.len());
                for field in &fields.named {
                    let attrs = parse_field_attrs(&field.attrs)?;
                    if attrs.skip {
                        continue;
                    }
                    let Some(ident) = &field.ident else {
                        continue;
                    };
                    let name = match (&attrs.rename, container.rename_all) {
                        (Some(rename), _) => rename.value(),
                        (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
                        (None, None) => ident.unraw().to_string(),
                    };
                    let ty = &field.ty;
                    members.push(quote! {
                        ::flatmap::MemberDef::new(#name, ::flatmap::TypeRef::of::<#ty>())
                    });
                }
                quote! { ::flatmap::Shape::Complex(::std::vec![#(#members),*]) }
            }
            Fields::Unnamed(_) | Fields::Unit => quote! { ::flatmap::Shape::Opaque },
        },
        Data::Enum(_) => quote! { ::flatmap::Shape::Opaque },
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Describe cannot be derived for unions",
            ));
        }
    };

    let type_name = container.name.map(|name| {
        quote! {
            fn type_name() -> &'static str {
                #name
            }
        }
    });

    let ident = &input.ident;
    let generics = add_describe_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::flatmap::Describe for #ident #ty_generics #where_clause {
            fn shape() -> ::flatmap::Shape {
                #shape
            }

            #type_name
        }
    })
}

fn add_describe_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::flatmap::Describe));
        }
    }
    generics
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("describe")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename_all = Some(RenameRule::parse(&lit)?);
                Ok(())
            } else if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported describe attribute; expected rename_all or name"))
            }
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("describe")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                parsed.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported describe field attribute; expected rename or skip"))
            }
        })?;
    }
    Ok(parsed)
}
