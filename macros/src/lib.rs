use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Marks a synchronous test and routes its `tracing` output to the test
/// writer.
///
/// The filter is read from `RUST_LOG`, so `RUST_LOG=rxlite=trace cargo test`
/// shows every delivery. Installing the subscriber is best effort: the first
/// test in the binary wins and the rest reuse it.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  let raw_args = proc_macro2::TokenStream::from(attr);
  if !raw_args.is_empty() {
    return TokenStream::from(
      syn::Error::new(raw_args.span(), "rxlite_macro::test does not take arguments")
        .to_compile_error(),
    );
  }

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxlite_macro::test only supports sync tests, delivery in rxlite never suspends",
      )
      .to_compile_error(),
    );
  }

  let ItemFn { attrs, vis, sig, block } = input;

  let expanded = quote! {
      #[test]
      #(#attrs)*
      #vis #sig {
        let _ = ::tracing_subscriber::fmt()
          .with_test_writer()
          .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
          .try_init();
        #block
      }
  };

  TokenStream::from(expanded)
}
