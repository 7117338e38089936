/*!
# Paisley: Parse Results.

[`Results`] is what a parse session hands back: one cloned [`TieredValue`]
per option that was seen (or that carried a compile-time default), reachable
by id, short character, or long name; the residual positional arguments in
their original relative order; and whatever diagnostics the scan turned up
along the way.

The scan itself is uniformly permissive: unknown options and missing required
arguments are recorded in [`Results::issues`] — in encounter order — and the
parse always runs to completion with partial results. Callers wanting a hard
failure just check [`Results::is_clean`] first.
*/

use crate::{
	Arity,
	OptionSet,
	Outcome,
	PaisleyError,
	Scanner,
	Textual,
	TieredValue,
};
use std::collections::{
	BTreeMap,
	HashMap,
};
use std::ops::Index;



/// # Result Lookup Key.
///
/// [`Results`] can be queried three ways — numeric id, short character, or
/// long name — without separate method families for each. This is the glue.
pub trait ResultKey: Copy {
	/// # Resolve to an Option Id.
	fn resolve(self, results: &Results) -> Option<u32>;

	/// # Display Form.
	///
	/// Used for [`PaisleyError::NoSuchOption`] and panic messages.
	fn label(self) -> String;
}

impl ResultKey for u32 {
	#[inline]
	fn resolve(self, _results: &Results) -> Option<u32> { Some(self) }

	#[inline]
	fn label(self) -> String { format!("#{self}") }
}

impl ResultKey for char {
	#[inline]
	fn resolve(self, _results: &Results) -> Option<u32> { Some(u32::from(self)) }

	#[inline]
	fn label(self) -> String { format!("-{self}") }
}

impl ResultKey for &str {
	#[inline]
	fn resolve(self, results: &Results) -> Option<u32> {
		results.by_name.get(self).copied()
	}

	#[inline]
	fn label(self) -> String { format!("--{self}") }
}



#[derive(Debug, Clone, Default)]
/// # Parse Session Output.
///
/// Produced by [`OptionSet::parse`]; see the module docs for the general
/// shape. Every option present here already has its registration-time
/// default merged in, so an option that was never mentioned on the command
/// line still reports its default through the getters.
pub struct Results {
	/// # Values by Option Id.
	by_id: BTreeMap<u32, TieredValue>,

	/// # Long Name → Id Alias Index.
	by_name: HashMap<String, u32>,

	/// # Display Labels.
	///
	/// Only populated for options that ended up with a present value;
	/// drives [`Results::describe`].
	display: BTreeMap<u32, String>,

	/// # Residual Positional Arguments.
	rest: Vec<String>,

	/// # Consumed Token Count.
	consumed: usize,

	/// # Scan Diagnostics.
	issues: Vec<PaisleyError>,
}

/// ## Queries.
impl Results {
	#[must_use]
	/// # Is the Option Present?
	///
	/// `true` if the option was matched during the scan or back-filled from
	/// a default.
	pub fn has<K: ResultKey>(&self, key: K) -> bool {
		self.value(key).is_some()
	}

	#[must_use]
	/// # Tiered Value, If Any.
	pub fn value<K: ResultKey>(&self, key: K) -> Option<&TieredValue> {
		key.resolve(self).and_then(|id| self.by_id.get(&id))
	}

	/// # Typed Value.
	///
	/// Resolve the option and derive its winning level to `T`.
	///
	/// ## Errors
	///
	/// Returns [`PaisleyError::NoSuchOption`] if the option isn't here at
	/// all, and otherwise whatever [`TieredValue::get`] has to say.
	///
	/// ## Examples
	///
	/// ```
	/// use paisley::{Arity, OptionSet, TieredValue};
	///
	/// let mut opts = OptionSet::new();
	/// opts.add(
	///     "t,threads",
	///     "Worker count.",
	///     TieredValue::new().with_default(&4_u32).unwrap(),
	///     Arity::Required,
	/// ).unwrap();
	///
	/// let results = opts.parse(["-t", "8"].map(String::from));
	/// assert_eq!(results.get::<u32, _>("threads"), Ok(8));
	/// assert_eq!(results.get::<u32, _>('t'), Ok(8));
	/// ```
	pub fn get<T: Textual, K: ResultKey>(&self, key: K) -> Result<T, PaisleyError> {
		match self.value(key) {
			Some(value) => value.get(),
			None => Err(PaisleyError::NoSuchOption(key.label())),
		}
	}

	#[must_use]
	/// # Residual Positional Arguments.
	///
	/// Everything the scanner didn't consume, in its original relative
	/// order.
	pub fn rest(&self) -> &[String] { &self.rest }

	#[must_use]
	#[inline]
	/// # Residual Positional Arguments (Owned).
	pub fn into_rest(self) -> Vec<String> { self.rest }

	#[must_use]
	#[inline]
	/// # Consumed Token Count.
	///
	/// How many tokens the scan ate as options, arguments, or terminator.
	pub const fn consumed(&self) -> usize { self.consumed }

	#[must_use]
	#[inline]
	/// # Scan Diagnostics.
	///
	/// Unknown options and missing required arguments, in encounter order.
	pub fn issues(&self) -> &[PaisleyError] { &self.issues }

	#[must_use]
	#[inline]
	/// # Did the Scan Pass Without Complaint?
	pub fn is_clean(&self) -> bool { self.issues.is_empty() }
}

/// ## Reporting.
impl Results {
	#[must_use]
	/// # Describe Every Present Option.
	///
	/// One indented line per option with a present value:
	/// `-i, --input: "/tmp/x"[explicit], "/path"[default]`.
	pub fn describe(&self, indent: usize) -> String {
		let mut out = String::new();
		for (id, label) in &self.display {
			if let Some(value) = self.by_id.get(id) {
				for _ in 0..indent { out.push(' '); }
				out.push_str(label);
				out.push_str(": ");
				out.push_str(&value.describe());
				out.push('\n');
			}
		}
		out
	}
}

impl<K: ResultKey> Index<K> for Results {
	type Output = TieredValue;

	/// # Tiered Value.
	///
	/// ## Panics
	///
	/// Panics if the option isn't present; use [`Results::value`] for the
	/// non-panicking form.
	fn index(&self, key: K) -> &Self::Output {
		match self.value(key) {
			Some(value) => value,
			None => panic!("no such option: {}", key.label()),
		}
	}
}



/// ## Parsing.
impl OptionSet {
	#[must_use]
	/// # Parse an Argument Vector.
	///
	/// Drive a [`Scanner`] over `args` — the argument vector without the
	/// program name — to completion, aggregating matches, back-filling
	/// defaults, and collecting diagnostics. The set itself is never
	/// mutated; prototypes are cloned on first sighting, so one registry
	/// can back any number of sequential parses.
	///
	/// ## Examples
	///
	/// ```
	/// use paisley::{Arity, OptionSet, TieredValue};
	///
	/// let mut opts = OptionSet::new();
	/// opts.add("v,verbose", "Noise.", TieredValue::new(), Arity::NoArg).unwrap();
	///
	/// let results = opts.parse(["-v", "in.txt"].map(String::from));
	/// assert!(results.has("verbose"));
	/// assert_eq!(results.rest(), ["in.txt"]);
	/// ```
	pub fn parse<I>(&self, args: I) -> Results
	where I: IntoIterator, I::Item: Into<String> {
		let flat = self.flat();
		let mut scan = Scanner::new(&flat, args);

		let mut by_id: BTreeMap<u32, TieredValue> = BTreeMap::new();
		let mut by_name: HashMap<String, u32> = HashMap::new();
		let mut issues: Vec<PaisleyError> = Vec::new();

		loop {
			match scan.next_opt() {
				Outcome::Matched(opt, arg) => {
					// First sighting: clone the prototype in and alias the
					// long name.
					if ! by_id.contains_key(&opt.id()) {
						by_id.insert(opt.id(), opt.value().clone());
						if let Some(name) = opt.long() {
							by_name.insert(name.to_owned(), opt.id());
						}
					}

					// Raw argument text lands at the explicit level; typing
					// waits for the getters.
					if ! matches!(opt.arity(), Arity::NoArg) {
						if let Some(arg) = arg {
							if let Some(value) = by_id.get_mut(&opt.id()) {
								value.set_raw_explicit(&arg);
							}
						}
					}
				},
				Outcome::Unknown(token) =>
					issues.push(PaisleyError::UnknownOption(token)),
				Outcome::Missing(opt) =>
					issues.push(PaisleyError::MissingArgument(opt.label())),
				Outcome::End | Outcome::Terminator => break,
			}
		}

		// Back-fill compile-time defaults for options never seen, clearing
		// the implicit marker so reports don't show a stale layer.
		for opt in &flat {
			if opt.value().has_default() && ! by_id.contains_key(&opt.id()) {
				let mut value = opt.value().clone();
				value.clear_implicit();
				by_id.insert(opt.id(), value);
				if let Some(name) = opt.long() {
					by_name.insert(name.to_owned(), opt.id());
				}
			}
		}

		// Display labels for everything that wound up with a present value.
		let mut display: BTreeMap<u32, String> = BTreeMap::new();
		for (id, value) in &by_id {
			if value.has() {
				if let Some(opt) = flat.iter().find(|o| o.id() == *id) {
					display.insert(*id, opt.label());
				}
			}
		}

		let consumed = scan.consumed();
		Results {
			by_id,
			by_name,
			display,
			rest: scan.into_rest(),
			consumed,
			issues,
		}
	}

	#[must_use]
	/// # Parse the Process Environment.
	///
	/// Shorthand for parsing `std::env::args_os`, minus the program name.
	/// Arguments that aren't valid UTF-8 come through lossily rather than
	/// panicking.
	pub fn parse_env(&self) -> Results {
		self.parse(
			std::env::args_os()
				.skip(1)
				.map(|a| a.to_string_lossy().into_owned())
		)
	}
}
