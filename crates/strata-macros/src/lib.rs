// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for Strata.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, LitStr};

/// A derive macro that implements the `strata_data::ecs::Component` trait.
///
/// The component's type tag is the struct name, so `#[derive(Component)]` on
/// `MeshComponent` registers it as `@MeshComponent` in scene documents.
#[proc_macro_derive(Component)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics crate::ecs::Component for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
        }
    };

    TokenStream::from(expanded)
}

/// A derive macro that implements `strata_core::reflect::Reflect` for a struct
/// with named fields.
///
/// Supported field attributes, all inside `#[reflect(...)]`:
/// - `rename = "name"`: the reflected name (defaults to the field identifier).
/// - `hidden`: serialized, but not shown in editors.
/// - `skip`: not reflected at all (derived or runtime-only state).
/// - `range(min = <expr>, max = <expr>)`: editing range for numeric fields.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_reflect(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct ReflectedField {
    ident: syn::Ident,
    name: String,
    hidden: bool,
    range: Option<(Expr, Expr)>,
}

fn expand_reflect(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::strata_core::reflect::Reflect for #name #ty_generics #where_clause {
                        fn visit_fields<V: ::strata_core::reflect::FieldVisitor>(&self, _visitor: &mut V) {}
                        fn visit_fields_mut<V: ::strata_core::reflect::FieldVisitorMut>(&mut self, _visitor: &mut V) {}
                    }
                })
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Reflect can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Reflect can only be derived for structs",
            ))
        }
    };

    let mut reflected = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let mut entry = ReflectedField {
            name: ident.to_string(),
            ident,
            hidden: false,
            range: None,
        };
        let mut skip = false;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    entry.name = lit.value();
                    Ok(())
                } else if meta.path.is_ident("hidden") {
                    entry.hidden = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("range") {
                    let mut min = None;
                    let mut max = None;
                    meta.parse_nested_meta(|bound| {
                        if bound.path.is_ident("min") {
                            min = Some(bound.value()?.parse::<Expr>()?);
                            Ok(())
                        } else if bound.path.is_ident("max") {
                            max = Some(bound.value()?.parse::<Expr>()?);
                            Ok(())
                        } else {
                            Err(bound.error("expected `min` or `max`"))
                        }
                    })?;
                    match (min, max) {
                        (Some(min), Some(max)) => {
                            entry.range = Some((min, max));
                            Ok(())
                        }
                        _ => Err(meta.error("range requires both `min` and `max`")),
                    }
                } else {
                    Err(meta.error("unsupported reflect attribute"))
                }
            })?;
        }

        if !skip {
            reflected.push(entry);
        }
    }

    let metas: Vec<TokenStream2> = reflected
        .iter()
        .map(|f| {
            let hidden = f.hidden;
            let range = match &f.range {
                Some((min, max)) => quote! {
                    ::core::option::Option::Some(::strata_core::reflect::FieldRange {
                        min: (#min) as f32,
                        max: (#max) as f32,
                    })
                },
                None => quote! { ::core::option::Option::None },
            };
            quote! {
                ::strata_core::reflect::FieldMeta { hidden: #hidden, range: #range }
            }
        })
        .collect();
    let idents: Vec<_> = reflected.iter().map(|f| &f.ident).collect();
    let names: Vec<_> = reflected.iter().map(|f| &f.name).collect();

    Ok(quote! {
        impl #impl_generics ::strata_core::reflect::Reflect for #name #ty_generics #where_clause {
            fn visit_fields<V: ::strata_core::reflect::FieldVisitor>(&self, visitor: &mut V) {
                #( visitor.visit_field(#names, &self.#idents, &#metas); )*
            }

            fn visit_fields_mut<V: ::strata_core::reflect::FieldVisitorMut>(&mut self, visitor: &mut V) {
                #( visitor.visit_field(#names, &mut self.#idents, &#metas); )*
            }
        }
    })
}
