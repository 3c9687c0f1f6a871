//! Набор derive-макросов для каталогов формы DCA.
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr};

/// Derive-макрос для закрытых каталогов (`enum` из unit-вариантов).
///
/// Для каждого варианта задаётся код (`#[code("...")]`, по умолчанию имя
/// варианта в нижнем регистре) и подпись для отображения (`#[label("...")]`,
/// по умолчанию совпадает с кодом).
///
/// Генерирует:
/// - [`std::fmt::Display`] — выводит код;
/// - [`std::str::FromStr`] — разбирает код без учёта регистра, ошибка
///   `FormError::ValueError` (тип `FormError` должен быть в области видимости);
/// - `serde::Serialize` — сериализует код строкой, только при атрибуте
///   `#[catalog(serialize)]` на самом `enum` (крейту нужен `serde`);
/// - константу `ALL` со всеми вариантами в порядке объявления, методы `code()`
///   и `label()`.
///
/// ## Пример
///
/// ```ignore
/// use macros::CatalogEnum;
///
/// #[derive(Debug, Clone, Copy, CatalogEnum)]
/// #[catalog(serialize)]
/// enum Exchange {
///     #[label("빗썸")]
///     Bithumb,
///     #[label("업비트")]
///     Upbit,
/// }
///
/// assert_eq!(Exchange::Upbit.to_string(), "upbit");
/// assert_eq!(Exchange::ALL[0].label(), "빗썸");
/// ```
#[proc_macro_derive(CatalogEnum, attributes(code, label, catalog))]
pub fn derive_catalog_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let mut serialize = false;
    for attr in &input.attrs {
        if attr.path().is_ident("catalog") {
            let opt: Ident = attr.parse_args().expect("catalog(serialize)");
            match opt.to_string().as_str() {
                "serialize" => serialize = true,
                other => panic!("неизвестная опция catalog: {}", other),
            }
        }
    }

    let variants = match input.data {
        Data::Enum(e) => e.variants,
        _ => panic!("CatalogEnum допустимо использовать только с enum"),
    };

    let mut idents = Vec::new();
    let mut code_arms = Vec::new();
    let mut label_arms = Vec::new();
    let mut from_arms = Vec::new();

    for v in variants {
        let ident = v.ident;
        if !matches!(v.fields, Fields::Unit) {
            panic!("Только unit-variants");
        }

        let mut code = ident.to_string().to_lowercase();
        let mut label: Option<String> = None;
        for attr in v.attrs {
            if attr.path().is_ident("code") {
                let s: LitStr = attr.parse_args().expect("code(\"...\")");
                code = s.value();
            } else if attr.path().is_ident("label") {
                let s: LitStr = attr.parse_args().expect("label(\"...\")");
                label = Some(s.value());
            }
        }
        let label = label.unwrap_or_else(|| code.clone());

        let code_lit = LitStr::new(&code, proc_macro2::Span::call_site());
        let label_lit = LitStr::new(&label, proc_macro2::Span::call_site());
        // Разбор без учёта регистра: сравниваем с кодом в нижнем регистре.
        let match_lit = LitStr::new(&code.to_lowercase(), proc_macro2::Span::call_site());

        code_arms.push(quote! { #name::#ident => #code_lit, });
        label_arms.push(quote! { #name::#ident => #label_lit, });
        from_arms.push(quote! { #match_lit => Ok(#name::#ident), });
        idents.push(ident);
    }

    let expanded = quote! {
        impl #name {
            /// Все значения каталога в порядке объявления.
            pub const ALL: &'static [#name] = &[#(#name::#idents),*];

            /// Код значения (используется в командах и при сериализации).
            pub fn code(&self) -> &'static str {
                match self { #(#code_arms)* }
            }

            /// Подпись значения для отображения пользователю.
            pub fn label(&self) -> &'static str {
                match self { #(#label_arms)* }
            }
        }

        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl std::str::FromStr for #name {
            type Err = FormError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    #(#from_arms)*
                    _ => Err(FormError::value_err(format!(
                        "некорректное значение {}: {}",
                        stringify!(#name), s
                    ))),
                }
            }
        }
    };

    let serialize_impl = match serialize {
        true => quote! {
            impl serde::Serialize for #name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.code())
                }
            }
        },
        false => quote! {},
    };

    let expanded = quote! {
        #expanded
        #serialize_impl
    };

    TokenStream::from(expanded)
}
