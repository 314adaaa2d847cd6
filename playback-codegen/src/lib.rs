use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use quote::quote_spanned;
use std::path::Path;

/// Turns a function into a test that runs against a playback server.
///
/// The first argument is the markdown file to replay, relative to the crate root. The second is
/// a function taking `&mut apod_playback::PlaybackConfiguration`. The test function may take
/// one `&str` parameter, which receives the server's base URL.
#[proc_macro_attribute]
pub fn playback_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let attributes = &input.attrs;
    let visibility = &input.vis;
    let name = &input.sig.ident;
    let inputs = &input.sig.inputs;
    let block = &input.block;

    if args.len() < 2 {
        return quote! {
            compile_error!("A markdown name and a configuration function should be passed to the macro");
        }
        .into();
    }

    let markdown_name = if let syn::NestedMeta::Lit(syn::Lit::Str(parsed_markdown_name)) = &args[0]
    {
        let markdown_name = parsed_markdown_name.value();
        if let Err(stream) = validate_markdown_path(&markdown_name, parsed_markdown_name.span()) {
            return stream.into();
        }
        markdown_name
    } else {
        return quote! {
            compile_error!("The first argument should be a string literal!");
        }
        .into();
    };

    let configuration_function =
        if let syn::NestedMeta::Meta(syn::Meta::Path(function_path)) = &args[1] {
            function_path
        } else {
            return quote! {
                compile_error!("The second argument should be a configuration function!");
            }
            .into();
        };

    if let syn::ReturnType::Type(_, return_type) = &input.sig.output {
        return quote_spanned! {syn::spanned::Spanned::span(return_type)=>
            compile_error!("A playback test shouldn't return a value");
        }
        .into();
    }

    let call = match inputs.len() {
        0 => quote! { __playback_body() },
        1 => quote! { __playback_body(__playback_server.base_url()) },
        _ => {
            return quote! {
                compile_error!("A playback test takes at most one parameter: the server base URL");
            }
            .into();
        }
    };

    let output = quote! {
        #(#attributes)*
        #[test]
        #visibility fn #name() {
            fn __playback_body(#inputs) #block

            let mut __playback_configuration =
                apod_playback::PlaybackConfiguration::new(#markdown_name);
            #configuration_function(&mut __playback_configuration);

            let __playback_server = apod_playback::PlaybackServer::start(__playback_configuration)
                .unwrap_or_else(|e| panic!("Playback error: {}", e));

            let __playback_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                #call
            }));
            let __playback_finished = __playback_server.finish();

            if let Err(e) = __playback_result {
                std::panic::resume_unwind(e);
            }
            if let Err(e) = __playback_finished {
                panic!("Playback error: {}", e);
            }
        }
    };

    TokenStream::from(output)
}

fn validate_markdown_path<P: AsRef<Path>>(
    path: P,
    span: Span,
) -> Result<(), proc_macro2::TokenStream> {
    if !path.as_ref().to_string_lossy().ends_with(".md") {
        return Err(quote_spanned! {span=>
            compile_error!("The path should point to a .md file!");
        });
    }

    Ok(())
}
