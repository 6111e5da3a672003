//! Procedural macros for the aoc-runner library

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro assembling a `PuzzleSolver` impl from `PartSolver` impls
///
/// Generates `solve_part` dispatching part numbers `1..=parts` onto the
/// corresponding `PartSolver<N>` impls, and sets `PARTS`. A missing
/// `PartSolver` impl is a compile-time error at the generated dispatch arm.
///
/// # Attributes
///
/// - `parts`: Optional. Number of parts (defaults to 2, the standard puzzle
///   shape; day 25 solvers usually want `parts = 1`).
///
/// # Example
///
/// ```ignore
/// use aoc_runner::{DaySolver, PartSolver, PuzzleParser};
///
/// #[derive(DaySolver)]
/// #[day_solver(parts = 2)]
/// struct Solver;
///
/// impl PuzzleParser for Solver { /* ... */ }
/// impl PartSolver<1> for Solver { /* ... */ }
/// impl PartSolver<2> for Solver { /* ... */ }
/// ```
#[proc_macro_derive(DaySolver, attributes(day_solver))]
pub fn derive_day_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let mut parts: u8 = 2;
    if let Some(attr) = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("day_solver"))
    {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("parts") {
                let value: Lit = meta.value()?.parse()?;
                if let Lit::Int(lit_int) = value {
                    parts = lit_int.base10_parse()?;
                }
            }
            Ok(())
        })
        .expect("Failed to parse #[day_solver(...)] attribute");
    }
    if parts == 0 {
        panic!("#[day_solver(parts = ...)] must be at least 1");
    }

    let arms = (1..=parts).map(|n| {
        let lit = proc_macro2::Literal::u8_unsuffixed(n);
        quote! {
            #lit => <Self as ::aoc_runner::PartSolver<#lit>>::solve(input),
        }
    });

    let expanded = quote! {
        impl ::aoc_runner::PuzzleSolver for #name {
            const PARTS: u8 = #parts;

            fn solve_part(
                input: &mut Self::Input<'_>,
                part: u8,
            ) -> ::std::result::Result<::std::string::String, ::aoc_runner::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::std::result::Result::Err(
                        ::aoc_runner::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// Generates the `inventory::submit!` that makes the solver discoverable by
/// `RegistryBuilder::register_all_plugins`.
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g. 2024)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g. ["grid", "slow"])
///
/// # Requirements
///
/// The type must implement the `PuzzleSolver` trait. If the trait is not
/// implemented, you will get a clear compile-time error:
///
/// ```text
/// error[E0277]: the trait bound `YourSolver: PuzzleSolver` is not satisfied
///   |
///   | struct YourSolver;
///   |        ^^^^^^^^^^ unsatisfied trait bound
///   |
/// help: the trait `PuzzleSolver` is not implemented for `YourSolver`
/// ```
///
/// # Example
///
/// ```ignore
/// use aoc_runner::{DaySolver, RegisterPuzzle};
///
/// #[derive(DaySolver, RegisterPuzzle)]
/// #[puzzle(year = 2024, day = 16, tags = ["grid", "dijkstra"])]
/// struct Solver;
/// ```
#[proc_macro_derive(RegisterPuzzle, attributes(puzzle))]
pub fn derive_register_puzzle(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let puzzle_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("puzzle"))
        .expect("RegisterPuzzle derive macro requires #[puzzle(...)] attribute");

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    puzzle_attr
        .parse_nested_meta(|meta| {
            if meta.path.is_ident("year") {
                let value: Lit = meta.value()?.parse()?;
                if let Lit::Int(lit_int) = value {
                    year = Some(lit_int.base10_parse()?);
                }
            } else if meta.path.is_ident("day") {
                let value: Lit = meta.value()?.parse()?;
                if let Lit::Int(lit_int) = value {
                    day = Some(lit_int.base10_parse()?);
                }
            } else if meta.path.is_ident("tags") {
                // Parse array of string literals: tags = ["a", "b"]
                let _ = meta.value()?; // Consume the '='
                let content;
                syn::bracketed!(content in meta.input);
                while !content.is_empty() {
                    let lit: Lit = content.parse()?;
                    if let Lit::Str(lit_str) = lit {
                        tags.push(lit_str.value());
                    }
                    // Skip comma if present
                    if content.peek(syn::Token![,]) {
                        let _: syn::Token![,] = content.parse()?;
                    }
                }
            }
            Ok(())
        })
        .expect("Failed to parse #[puzzle(...)] attribute");

    let year = year.expect("Missing required 'year' attribute");
    let day = day.expect("Missing required 'day' attribute");

    let tags_array = if tags.is_empty() {
        quote! { &[] }
    } else {
        let tag_strs = tags.iter().map(|s| s.as_str());
        quote! { &[#(#tag_strs),*] }
    };

    // Compile-time check that the type implements PuzzleSolver, for a
    // clearer error message than the inventory expansion would give
    let expanded = quote! {
        const _: () = {
            trait MustImplementPuzzleSolver: ::aoc_runner::PuzzleSolver {}
            impl MustImplementPuzzleSolver for #name {}
        };

        ::aoc_runner::inventory::submit! {
            ::aoc_runner::PuzzlePlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: #tags_array,
            }
        }
    };

    TokenStream::from(expanded)
}
