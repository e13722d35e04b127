//! Implementation of `#[derive(Builder)]`

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, GenericArgument, Ident, LitStr, Path,
    PathArguments, Result, Token, Type, ext::IdentExt,
};

/// Options from `#[builder(...)]` on the struct
#[derive(Default)]
struct ContainerOptions {
    name: Option<Ident>,
    prefix: Option<String>,
    optimize_copy: Option<Path>,
    /// Traits forwarded to `#[derive(...)]` on the builder struct
    derives: Vec<Path>,
}

impl ContainerOptions {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut options = ContainerOptions::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("builder")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    options.name = Some(name.parse()?);
                    Ok(())
                } else if meta.path.is_ident("prefix") {
                    let prefix: LitStr = meta.value()?.parse()?;
                    let prefix = prefix.value();
                    options.prefix = (!prefix.is_empty()).then_some(prefix);
                    Ok(())
                } else if meta.path.is_ident("optimize_copy") {
                    options.optimize_copy = Some(meta.path.clone());
                    Ok(())
                } else if meta.path.is_ident("derive") {
                    meta.parse_nested_meta(|nested| {
                        options.derives.push(nested.path);
                        Ok(())
                    })
                } else {
                    Err(meta.error(
                        "unknown builder option, expected one of: name, prefix, optimize_copy, derive",
                    ))
                }
            })?;
        }

        Ok(options)
    }
}

/// How an unset field is filled in
enum FieldDefault {
    /// `#[builder(default)]`
    Trait,
    /// `#[builder(default = expr)]`
    Expr(Expr),
}

/// A named field together with its `#[builder(...)]` options
struct FieldSpec<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    default: Option<(FieldDefault, &'a Attribute)>,
    validate: Option<Path>,
}

impl<'a> FieldSpec<'a> {
    fn from_field(field: &'a Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

        let mut parsed = FieldSpec {
            ident,
            ty: &field.ty,
            default: None,
            validate: None,
        };

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("builder")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    let default = if meta.input.peek(Token![=]) {
                        FieldDefault::Expr(meta.value()?.parse()?)
                    } else {
                        FieldDefault::Trait
                    };
                    parsed.default = Some((default, attr));
                    Ok(())
                } else if meta.path.is_ident("validate") {
                    parsed.validate = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown field option, expected `default` or `validate`"))
                }
            })?;
        }

        Ok(parsed)
    }

    /// Name of the field without any `r#` prefix
    fn label(&self) -> String {
        self.ident.unraw().to_string()
    }

    fn local(&self) -> Ident {
        format_ident!("__field_{}", self.ident.unraw())
    }

    fn setter(&self, prefix: Option<&str>) -> Ident {
        match prefix {
            Some(prefix) => format_ident!("{}_{}", prefix, self.ident.unraw()),
            None => self.ident.clone(),
        }
    }
}

/// `Option<_>` fields are nullable: unset means `None`
fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    if type_path.qself.is_some() {
        return false;
    }
    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option"
            && matches!(
                &segment.arguments,
                PathArguments::AngleBracketed(args)
                    if args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
            )
    })
}

pub fn derive_builder(input: &DeriveInput) -> Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Builder can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Builder can only be derived for structs with named fields",
            ));
        }
    };

    let options = ContainerOptions::from_attrs(&input.attrs)?;
    let fields = fields
        .iter()
        .map(FieldSpec::from_field)
        .collect::<Result<Vec<_>>>()?;

    if let Some(optimize_copy) = &options.optimize_copy {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                optimize_copy,
                "optimize_copy cannot be used on generic structs",
            ));
        }
        if let Some((_, attr)) = fields.iter().find_map(|field| field.default.as_ref()) {
            return Err(syn::Error::new_spanned(
                attr,
                "field defaults cannot be combined with optimize_copy, defaults come from `Default::default()`",
            ));
        }
    }

    if options.prefix.is_none()
        && let Some(field) = fields
            .iter()
            .find(|field| matches!(field.label().as_str(), "build" | "new"))
    {
        return Err(syn::Error::new_spanned(
            field.ident,
            format!(
                "field `{}` clashes with a builder method, set a setter prefix with #[builder(prefix = \"...\")]",
                field.label()
            ),
        ));
    }

    let vis = &input.vis;
    let struct_name = &input.ident;
    let builder_name = options
        .name
        .clone()
        .unwrap_or_else(|| format_ident!("{}Builder", struct_name));
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let slot_decls = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        quote! { #ident: ::core::option::Option<#ty> }
    });

    let slot_inits = fields.iter().map(|field| {
        let ident = field.ident;
        quote! { #ident: ::core::option::Option::None }
    });

    let setters = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let setter = field.setter(options.prefix.as_deref());
        let doc = format!("Sets `{}`. A later call replaces the earlier value.", field.label());
        quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #setter(mut self, value: #ty) -> Self {
                self.#ident = ::core::option::Option::Some(value);
                self
            }
        }
    });

    let defaults = options.optimize_copy.as_ref().map(|_| {
        quote! {
            let __defaults: &#struct_name = {
                static DEFAULTS: ::std::sync::OnceLock<#struct_name> = ::std::sync::OnceLock::new();
                DEFAULTS.get_or_init(<#struct_name as ::core::default::Default>::default)
            };
        }
    });

    let resolved = fields.iter().map(|field| {
        let ident = field.ident;
        let local = field.local();
        let label = field.label();

        let value = if options.optimize_copy.is_some() {
            quote! {
                self.#ident.unwrap_or_else(|| ::core::clone::Clone::clone(&__defaults.#ident))
            }
        } else {
            match &field.default {
                Some((FieldDefault::Expr(expr), _)) => {
                    quote! { self.#ident.unwrap_or_else(|| #expr) }
                }
                Some((FieldDefault::Trait, _)) => {
                    quote! { self.#ident.unwrap_or_default() }
                }
                None if is_option(field.ty) => quote! { self.#ident.flatten() },
                None => quote! {
                    self.#ident
                        .ok_or_else(|| ::quickbuild::BuildError::missing(#label))?
                },
            }
        };

        let check = field.validate.as_ref().map(|validator| {
            quote! {
                ::quickbuild::builder::check_field(#label, &#local, #validator)?;
            }
        });

        quote! {
            let #local = #value;
            #check
        }
    });

    let assignments = fields.iter().map(|field| {
        let ident = field.ident;
        let local = field.local();
        quote! { #ident: #local }
    });

    let derives = &options.derives;
    let derive_attr = (!derives.is_empty()).then(|| quote! { #[derive(#(#derives),*)] });

    let builder_doc = format!("Builder for [`{struct_name}`].");
    let build_doc = format!(
        "Builds the [`{struct_name}`], failing with [`quickbuild::BuildError`] when a required field is unset or a value is rejected."
    );

    Ok(quote! {
        #[doc = #builder_doc]
        #derive_attr
        #vis struct #builder_name #generics #where_clause {
            #(#slot_decls,)*
        }

        impl #impl_generics ::core::default::Default for #builder_name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#slot_inits,)*
                }
            }
        }

        impl #impl_generics #builder_name #ty_generics #where_clause {
            /// Creates an empty builder.
            pub fn new() -> Self {
                ::core::default::Default::default()
            }

            #(#setters)*

            #[doc = #build_doc]
            pub fn build(self) -> ::core::result::Result<#struct_name #ty_generics, ::quickbuild::BuildError> {
                #defaults
                #(#resolved)*
                ::core::result::Result::Ok(#struct_name {
                    #(#assignments,)*
                })
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Starts an empty builder.
            pub fn builder() -> #builder_name #ty_generics {
                #builder_name::new()
            }
        }

        impl #impl_generics ::quickbuild::Buildable for #struct_name #ty_generics #where_clause {
            type Builder = #builder_name #ty_generics;
        }
    })
}
