//! Procedural macros for flatmap

mod describe;

use proc_macro::TokenStream;

/// Derives `flatmap::Describe` so a struct can take part in mappings.
///
/// Named-field structs describe as complex types whose members are the fields in
/// declaration order. Enums, tuple structs and unit structs describe as opaque leaves.
///
/// # Example
///
/// ```ignore
/// #[derive(Describe, Serialize)]
/// #[describe(rename_all = "PascalCase")]
/// #[serde(rename_all = "PascalCase")]
/// pub struct Father {
///     pub my_string: Option<String>,
///     pub son: Option<Son>,
///     #[describe(rename = "Children")]
///     #[serde(rename = "Children")]
///     pub sons: Vec<Son>,
///     #[describe(skip)]
///     #[serde(skip)]
///     pub cache: Vec<u8>,
/// }
/// ```
///
/// Member names must equal the serialized field names, so keep `describe` renames in
/// step with `serde` renames.
///
/// Container attributes:
/// - `rename_all = "snake_case" | "PascalCase" | "camelCase" | "SCREAMING_SNAKE_CASE"`
/// - `name = "..."` replaces the diagnostic type name
///
/// Field attributes:
/// - `rename = "..."`
/// - `skip`
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe::derive_describe_impl(input)
}
