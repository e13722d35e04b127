//! Implementation of the `#[property]` attribute macro

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Expr, ExprLit, FnArg, Ident, ItemFn, Lit, Meta, MetaNameValue, Pat, PatType, Result, Token,
    Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

/// Tuples of arguments are generated up to this arity
const MAX_PARAMETERS: usize = 4;

/// Overrides from `#[property(...)]`
#[derive(Default)]
pub(crate) struct PropertyConfig {
    iterations: Option<usize>,
    seed: Option<u64>,
    max_shrink_iterations: Option<usize>,
    shrink_timeout_ms: Option<u64>,
    max_size: Option<usize>,
    time_budget_ms: Option<u64>,
}

fn int_literal<N>(value: &Expr) -> Result<N>
where
    N: std::str::FromStr,
    N::Err: std::fmt::Display,
{
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit_int),
            ..
        }) => lit_int.base10_parse(),
        _ => Err(syn::Error::new_spanned(value, "Expected integer literal")),
    }
}

impl Parse for PropertyConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut config = PropertyConfig::default();

        if input.is_empty() {
            return Ok(config);
        }

        let punctuated: Punctuated<Meta, Token![,]> =
            input.parse_terminated(Meta::parse, Token![,])?;

        for meta in punctuated {
            let (path, value) = match meta {
                Meta::NameValue(MetaNameValue { path, value, .. }) => (path, value),
                _ => {
                    return Err(syn::Error::new_spanned(
                        meta,
                        "Expected name-value pairs like 'iterations = 100'",
                    ));
                }
            };
            let name = path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&path, "Expected simple identifier"))?;

            match name.to_string().as_str() {
                "iterations" => config.iterations = Some(int_literal(&value)?),
                "seed" => config.seed = Some(int_literal(&value)?),
                "max_shrink_iterations" => config.max_shrink_iterations = Some(int_literal(&value)?),
                "shrink_timeout_ms" => config.shrink_timeout_ms = Some(int_literal(&value)?),
                "max_size" => config.max_size = Some(int_literal(&value)?),
                "time_budget_ms" => config.time_budget_ms = Some(int_literal(&value)?),
                _ => {
                    return Err(syn::Error::new_spanned(
                        name,
                        "Unknown configuration option. Supported: iterations, seed, max_shrink_iterations, shrink_timeout_ms, max_size, time_budget_ms",
                    ));
                }
            }
        }

        Ok(config)
    }
}

impl PropertyConfig {
    /// Struct-update expression layering the overrides over the environment
    fn config_expr(&self) -> TokenStream2 {
        let mut overrides = Vec::new();

        if let Some(iterations) = self.iterations {
            overrides.push(quote! { iterations: #iterations });
        }
        if let Some(seed) = self.seed {
            overrides.push(quote! { seed: ::core::option::Option::Some(#seed) });
        }
        if let Some(max_shrink) = self.max_shrink_iterations {
            overrides.push(quote! { max_shrink_iterations: #max_shrink });
        }
        if let Some(timeout_ms) = self.shrink_timeout_ms {
            overrides.push(quote! {
                shrink_timeout: ::std::time::Duration::from_millis(#timeout_ms)
            });
        }
        if let Some(max_size) = self.max_size {
            overrides.push(quote! { max_size: #max_size });
        }
        if let Some(budget_ms) = self.time_budget_ms {
            overrides.push(quote! {
                time_budget: ::core::option::Option::Some(::std::time::Duration::from_millis(#budget_ms))
            });
        }

        let base = quote! {
            match ::quickbuild::TestConfig::from_env() {
                ::core::result::Result::Ok(config) => config,
                ::core::result::Result::Err(error) => panic!("invalid quickbuild environment: {}", error),
            }
        };

        if overrides.is_empty() {
            base
        } else {
            quote! {
                ::quickbuild::TestConfig {
                    #(#overrides,)*
                    ..#base
                }
            }
        }
    }
}

/// A property parameter: a plain binding and its type
struct Parameter {
    name: Ident,
    ty: Type,
}

impl Parameter {
    fn from_fn_arg(arg: &FnArg) -> Result<Self> {
        match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => {
                if let Pat::Ident(pat_ident) = pat.as_ref() {
                    Ok(Parameter {
                        name: pat_ident.ident.clone(),
                        ty: (**ty).clone(),
                    })
                } else {
                    Err(syn::Error::new_spanned(
                        pat,
                        "Property functions must have simple parameter names",
                    ))
                }
            }
            FnArg::Receiver(_) => Err(syn::Error::new_spanned(
                arg,
                "Property functions cannot have self parameters",
            )),
        }
    }
}

/// Attributes that belong on the generated `#[test]` rather than the body
fn is_test_attribute(attr: &syn::Attribute) -> bool {
    let path = attr.path();
    path.is_ident("test") || path.is_ident("ignore") || path.is_ident("should_panic")
}

pub(crate) fn property_impl(config: PropertyConfig, item_fn: ItemFn) -> Result<TokenStream2> {
    if let Some(asyncness) = &item_fn.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "Property functions cannot be async",
        ));
    }
    if !item_fn.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_fn.sig.generics,
            "Property functions cannot have generic parameters",
        ));
    }

    let params = item_fn
        .sig
        .inputs
        .iter()
        .map(Parameter::from_fn_arg)
        .collect::<Result<Vec<_>>>()?;

    if params.len() > MAX_PARAMETERS {
        return Err(syn::Error::new_spanned(
            &item_fn.sig.inputs,
            format!("Property functions take at most {MAX_PARAMETERS} parameters"),
        ));
    }

    let property_name = &item_fn.sig.ident;
    let body_name = format_ident!("__{}_property", property_name);
    let test_config = config.config_expr();

    let mut body_fn = item_fn.clone();
    body_fn.sig.ident = body_name.clone();
    body_fn.attrs.retain(|attr| !is_test_attribute(attr));
    let test_attrs = item_fn
        .attrs
        .iter()
        .filter(|attr| is_test_attribute(attr) && !attr.path().is_ident("test"));

    let names: Vec<_> = params.iter().map(|p| &p.name).collect();
    let types: Vec<_> = params.iter().map(|p| &p.ty).collect();

    Ok(quote! {
        #[allow(dead_code)]
        #body_fn

        #[test]
        #(#test_attrs)*
        fn #property_name() {
            let config = #test_config;
            let result = ::quickbuild::for_all::<(#(#types,)*), _>(
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#property_name)),
                config,
                |(#(#names,)*): (#(#types,)*)| #body_name(#(#names),*),
            );
            if let ::core::result::Result::Err(failure) = result {
                panic!("{}", failure.report());
            }
        }
    })
}

pub(crate) fn parse_config(args: TokenStream2) -> Result<PropertyConfig> {
    syn::parse2(args)
}
