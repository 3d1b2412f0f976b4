// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;

/// A variant of the error enum whose single field is marked with one of the
/// helper attributes.
struct MarkedVariant {
    variant: syn::Ident,
    ty: syn::TypePath,
}

fn marked_variants(enum_data: &syn::DataEnum, marker: &str) -> syn::Result<Vec<MarkedVariant>> {
    let mut ret = vec![];
    for variant in &enum_data.variants {
        for field in &variant.fields {
            let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident(marker)) else {
                continue;
            };
            if variant.fields.len() != 1 {
                return Err(syn::Error::new(
                    attr.span(),
                    format!("`#[{marker}]` requires a variant with exactly one field"),
                ));
            }
            let syn::Type::Path(ty) = &field.ty else {
                return Err(syn::Error::new(
                    field.ty.span(),
                    format!("`#[{marker}]` works only with named types"),
                ));
            };
            ret.push(MarkedVariant {
                variant: variant.ident.clone(),
                ty: ty.clone(),
            });
        }
    }
    Ok(ret)
}

fn enum_data(input: &syn::DeriveInput) -> syn::Result<&syn::DataEnum> {
    match &input.data {
        syn::Data::Enum(en) => Ok(en),
        _ => Err(syn::Error::new(
            input.span(),
            "Works only with enum error types",
        )),
    }
}

/// `some::path::FooError` => `some::path::LocatedFooError`
fn located_path(ty: &syn::TypePath) -> syn::Result<syn::Path> {
    let mut path = ty.path.clone();
    let Some(last) = path.segments.last_mut() else {
        return Err(syn::Error::new(ty.span(), "Empty type path"));
    };
    last.ident = format_ident!("Located{}", last.ident);
    last.arguments = syn::PathArguments::None;
    Ok(path)
}

fn located_error(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let en = enum_data(input)?;
    let ident = &input.ident;
    let located = format_ident!("Located{}", ident);

    let from_nom = marked_variants(en, "from_nom")?;
    if from_nom.len() > 1 {
        return Err(syn::Error::new(
            input.span(),
            "At most one variant can be marked with `#[from_nom]`",
        ));
    }
    let from_external = marked_variants(en, "from_external")?;
    let from_located = marked_variants(en, "from_located")?;

    let mut output = quote! {
        #[derive(PartialEq, Eq, Clone, Debug)]
        #[automatically_derived]
        pub struct #located<'a> {
            span: diameter_parse_utils::Span<'a>,
            error: #ident,
        }

        #[automatically_derived]
        impl<'a> #located<'a> {
            pub const fn new(span: diameter_parse_utils::Span<'a>, error: #ident) -> Self {
                Self { span, error }
            }
        }

        #[automatically_derived]
        impl<'a> From<#located<'a>> for (diameter_parse_utils::Span<'a>, #ident) {
            fn from(input: #located<'a>) -> Self {
                (input.span, input.error)
            }
        }

        #[automatically_derived]
        impl<'a> diameter_parse_utils::LocatedParsingError for #located<'a> {
            type Span = diameter_parse_utils::Span<'a>;
            type Error = #ident;

            fn span(&self) -> &Self::Span {
                &self.span
            }

            fn error(&self) -> &Self::Error {
                &self.error
            }
        }

        #[automatically_derived]
        impl<'a> nom::error::FromExternalError<diameter_parse_utils::Span<'a>, #ident> for #located<'a> {
            fn from_external_error(
                input: diameter_parse_utils::Span<'a>,
                _kind: nom::error::ErrorKind,
                error: #ident,
            ) -> Self {
                #located::new(input, error)
            }
        }
    };

    for MarkedVariant { variant, .. } in &from_nom {
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> nom::error::ParseError<diameter_parse_utils::Span<'a>> for #located<'a> {
                fn from_error_kind(
                    input: diameter_parse_utils::Span<'a>,
                    kind: nom::error::ErrorKind,
                ) -> Self {
                    #located::new(input, #ident::#variant(kind))
                }

                fn append(
                    _input: diameter_parse_utils::Span<'a>,
                    _kind: nom::error::ErrorKind,
                    other: Self,
                ) -> Self {
                    other
                }
            }
        });
    }

    for MarkedVariant { variant, ty } in &from_external {
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> nom::error::FromExternalError<diameter_parse_utils::Span<'a>, #ty> for #located<'a> {
                fn from_external_error(
                    input: diameter_parse_utils::Span<'a>,
                    _kind: nom::error::ErrorKind,
                    error: #ty,
                ) -> Self {
                    #located::new(input, #ident::#variant(error))
                }
            }
        });
    }

    for MarkedVariant { variant, ty } in &from_located {
        let inner = located_path(ty)?;
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> From<#inner<'a>> for #located<'a> {
                fn from(input: #inner<'a>) -> Self {
                    let (span, error) = input.into();
                    #located::new(span, #ident::#variant(error))
                }
            }
        });
    }
    Ok(output)
}

/// For a given error enum {Name} generate a struct called Located{Name} that
/// carries the `Span` (the error location in the input stream) along the
/// error. Variants can be marked to generate conversions:
///
/// * `#[from_nom]`: the variant holding [`nom::error::ErrorKind`], used to
///   implement `nom::error::ParseError`.
/// * `#[from_external]`: implements `nom::error::FromExternalError` for the
///   field type, handy with `nom::combinator::map_res`.
/// * `#[from_located]`: implements [`From`] the located version of the field
///   type. The located type is resolved next to the field type, i.e. a field
///   of type `a::b::FooError` is converted from `a::b::LocatedFooError`.
///
/// Example:
/// ```no_compile
/// use diameter_serde_macros::LocatedError;
///
/// #[derive(LocatedError, PartialEq, Eq, Clone, Debug)]
/// pub enum AvpParsingError {
///     NomError(#[from_nom] nom::error::ErrorKind),
///     ValueError(#[from_located] AvpValueParsingError),
///     UndefinedAddressFamily(#[from_external] UndefinedAddressFamily),
/// }
/// ```
#[proc_macro_derive(LocatedError, attributes(from_nom, from_external, from_located))]
pub fn derive_located_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);
    located_error(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn writing_error(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let en = enum_data(input)?;
    let ident = &input.ident;
    let mut output = TokenStream::new();

    for MarkedVariant { variant, .. } in marked_variants(en, "from_std_io_error")? {
        output.extend(quote! {
            #[automatically_derived]
            impl From<std::io::Error> for #ident {
                fn from(err: std::io::Error) -> Self {
                    #ident::#variant(err.to_string())
                }
            }
        });
    }

    for MarkedVariant { variant, ty } in marked_variants(en, "from")? {
        output.extend(quote! {
            #[automatically_derived]
            impl From<#ty> for #ident {
                fn from(err: #ty) -> Self {
                    #ident::#variant(err)
                }
            }
        });
    }
    Ok(output)
}

/// Decorate an `enum` as an error for serializing binary protocol.
///
/// 1. `#[from_std_io_error]` generates [`From`] from [`std::io::Error`], the
///    variant keeps the error's string representation.
/// 2. `#[from]` generates [`From`] for the field type.
///
/// Example:
/// ```no_compile
/// use diameter_serde_macros::WritingError;
///
/// #[derive(WritingError, PartialEq, Eq, Clone, Debug)]
/// pub enum DiameterMessageWritingError {
///     StdIOError(#[from_std_io_error] String),
///     AvpError(#[from] AvpWritingError),
/// }
/// ```
#[proc_macro_derive(WritingError, attributes(from_std_io_error, from))]
pub fn derive_writing_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);
    writing_error(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
