/*!
# Paisley

This crate provides a small, GNU-`getopt_long`-flavored option parsing engine
for CLI tools: declare your options up front — short and/or long names, an
argument arity, layered default values — then feed it an argument vector and
get back typed results plus the residual positional operands.

Three things set it apart from the usual suspects:

* **Tiered values.** Every option carries a stack of value levels — default,
  implicit, explicit, and free-form overrides — with the highest present
  level winning. An option that never appears on the command line still
  reports its compile-time default; one that appears without an argument
  falls back to its implicit value; `--key=val` tops them all. See
  [`TieredValue`].
* **Typed, text-backed storage.** Values are stored as canonical text and
  converted on demand through the [`Textual`] layer, which handles booleans,
  integers (with C-style `0x`/`0` prefixes), floats, strings, comma
  sequences, `key:value;` maps, and nested sequences. Raw command-line text
  is always inspectable even when it refuses to type.
* **In-place permutation.** Options and positionals may be freely mixed;
  the scanner reorders the vector as it goes — a triple-reversal rotation,
  no scratch buffer — so the residual positionals end up contiguous and in
  their original relative order. See [`Scanner`].

Parsing is uniformly permissive: unknown options and missing required
arguments are collected as diagnostics rather than aborting the parse, and
partial results always come back. Check [`Results::issues`] if you'd rather
fail hard.

## Example

```
use paisley::{Arity, OptionSet, TieredValue};

let mut opts = OptionSet::new();
opts.add("h,help", "Print help and exit.", TieredValue::new(), Arity::NoArg)
    .unwrap();
opts.add(
    "v,verbose",
    "Noise level.",
    TieredValue::new().with_implicit(&3_u32).unwrap(),
    Arity::Optional,
).unwrap();
opts.add(
    "input",
    "Input path.",
    TieredValue::new().with_default(&"/path".to_owned()).unwrap(),
    Arity::Required,
).unwrap();

// In real life you'd use opts.parse_env() instead.
let results = opts.parse(["file1", "-v", "--input=/tmp/x", "file2"].map(String::from));

assert_eq!(results.get::<u32, _>("verbose"), Ok(3));
assert_eq!(results.get::<String, _>("input"), Ok("/tmp/x".to_owned()));
assert_eq!(results.rest(), ["file1", "file2"]);
```

Registration errors (bad specs, duplicate names) surface at
[`OptionSet::add`]; conversion errors surface at the typed getters, never
mid-scan. The library itself writes nothing to any stream — scan internals
are traced through [`tracing`] at `TRACE` level for the curious.
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]



mod convert;
mod error;
mod option;
mod results;
mod scan;
mod value;

pub use convert::Textual;
pub use error::PaisleyError;
pub use option::{
	Arity,
	GroupAdder,
	Opt,
	OptionSet,
};
pub use results::{
	ResultKey,
	Results,
};
pub use scan::{
	Outcome,
	Scanner,
};
pub use value::TieredValue;
