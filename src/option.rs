/*!
# Paisley: Option Registry.

Options are declared up front with a tiny spec mini-language — `"x"`,
`"x,long-name"`, or `"long-name"` — along with an argument arity and a
prototype [`TieredValue`] carrying any compile-time defaults. The registry
stores them per display group, but the scanner only ever sees the flattened
union.
*/

use crate::{
	PaisleyError,
	TieredValue,
};
use std::collections::BTreeMap;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Argument Arity.
///
/// Whether an option stands alone, insists on an argument, or will take one
/// if it happens to be attached.
pub enum Arity {
	/// # No Argument.
	///
	/// The option is a bare switch; any `=value` attachment is ignored.
	NoArg,

	/// # Required Argument.
	///
	/// Attached (`--key=val`, `-kval`) or detached (`--key val`), something
	/// must follow.
	Required,

	/// # Optional Argument.
	///
	/// An attached value is taken if present; a detached one is never
	/// consumed.
	Optional,
}



/// # First Auto-Allocated Id.
///
/// Options registered without a short character get ids counted up from
/// here, safely above every printable ASCII code so they can never collide
/// with a real short id.
const AUTO_ID_BASE: u32 = 10_000;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # A Registered Option.
///
/// Identity and contract for one switch: an id (the short character's ASCII
/// code, or an auto-allocated number), an optional long name, an argument
/// arity, a line of help text, and the prototype value cloned fresh for each
/// parse.
///
/// Instances are created by [`OptionSet::add`] and immutable thereafter.
pub struct Opt {
	/// # Unique Id.
	id: u32,

	/// # Long Name, If Any.
	long: Option<String>,

	/// # Argument Arity.
	arity: Arity,

	/// # Help Text.
	brief: String,

	/// # Prototype Value.
	value: TieredValue,
}

impl Opt {
	#[must_use]
	#[inline]
	/// # Id.
	pub const fn id(&self) -> u32 { self.id }

	#[must_use]
	/// # Short Character, If Any.
	pub fn short(&self) -> Option<char> {
		char::from_u32(self.id).filter(char::is_ascii_alphanumeric)
	}

	#[must_use]
	#[inline]
	/// # Long Name, If Any.
	pub fn long(&self) -> Option<&str> { self.long.as_deref() }

	#[must_use]
	#[inline]
	/// # Argument Arity.
	pub const fn arity(&self) -> Arity { self.arity }

	#[must_use]
	#[inline]
	/// # Help Text.
	pub fn brief(&self) -> &str { &self.brief }

	#[must_use]
	#[inline]
	/// # Prototype Value.
	pub const fn value(&self) -> &TieredValue { &self.value }

	#[must_use]
	/// # Display Label.
	///
	/// The conventional dashed rendering — `-x, --long`, `-x`, or `--long` —
	/// used in diagnostics and reports.
	pub fn label(&self) -> String {
		match (self.short(), self.long()) {
			(Some(s), Some(l)) => format!("-{s}, --{l}"),
			(Some(s), None) => format!("-{s}"),
			(None, Some(l)) => format!("--{l}"),
			(None, None) => format!("#{}", self.id),
		}
	}
}



#[derive(Debug, Clone)]
/// # Option Registry.
///
/// Holds every registered [`Opt`], bucketed by display group. Groups are
/// pure metadata for downstream help rendering; parsing always runs over
/// [`OptionSet::flat`].
///
/// The registry is read-only during parsing — prototypes are cloned, never
/// mutated — so one set can safely back any number of sequential parses.
///
/// ## Examples
///
/// ```
/// use paisley::{Arity, OptionSet, TieredValue};
///
/// let mut opts = OptionSet::new();
/// opts.add("h,help", "Print help and exit.", TieredValue::new(), Arity::NoArg).unwrap();
/// opts.group("tuning")
///     .add(
///         "t,threads",
///         "Worker count.",
///         TieredValue::new().with_default(&4_u32).unwrap(),
///         Arity::Required,
///     ).unwrap()
///     .flag("q,quiet", "Print nothing.").unwrap();
///
/// assert_eq!(opts.flat().len(), 3);
/// ```
pub struct OptionSet {
	/// # Options by Display Group.
	groups: BTreeMap<String, Vec<Opt>>,

	/// # Next Auto-Allocated Id.
	next_auto: u32,
}

impl Default for OptionSet {
	#[inline]
	fn default() -> Self { Self::new() }
}

impl OptionSet {
	#[must_use]
	#[inline]
	/// # New (Empty) Instance.
	pub const fn new() -> Self {
		Self {
			groups: BTreeMap::new(),
			next_auto: AUTO_ID_BASE,
		}
	}

	/// # Add an Option (Anonymous Group).
	///
	/// `spec` follows the mini-language: a single alphanumeric character
	/// followed by `,` or end-of-spec becomes the short id; the remainder,
	/// if any, must be a long name matching `[A-Za-z0-9][A-Za-z0-9_-]*`.
	///
	/// ## Errors
	///
	/// Returns an error if the spec is malformed or collides with an
	/// existing id or long name. Registration problems surface here, at
	/// add-time, never during a parse.
	///
	/// ## Examples
	///
	/// ```
	/// use paisley::{Arity, OptionSet, TieredValue};
	///
	/// let mut opts = OptionSet::new();
	/// let id = opts.add("v,verbose", "Noise level.", TieredValue::new(), Arity::Optional)
	///     .unwrap()
	///     .id();
	/// assert_eq!(id, u32::from(b'v'));
	/// ```
	pub fn add(&mut self, spec: &str, brief: &str, value: TieredValue, arity: Arity)
	-> Result<&Opt, PaisleyError> {
		self.add_to("", spec, brief, value, arity)
	}

	#[must_use]
	/// # Group Adder.
	///
	/// Return a chainable adder that registers everything under the named
	/// display group.
	pub fn group(&mut self, name: &str) -> GroupAdder<'_> {
		GroupAdder {
			set: self,
			group: name.to_owned(),
		}
	}

	#[must_use]
	/// # Flattened Union.
	///
	/// Every registered option across every group, in group order. Built
	/// fresh for each parse; the scanner is blind to grouping.
	pub fn flat(&self) -> Vec<&Opt> {
		self.groups.values().flatten().collect()
	}

	#[must_use]
	/// # Is the Registry Empty?
	pub fn is_empty(&self) -> bool {
		self.groups.values().all(Vec::is_empty)
	}

	/// # Add an Option to a Group.
	fn add_to(&mut self, group: &str, spec: &str, brief: &str, value: TieredValue, arity: Arity)
	-> Result<&Opt, PaisleyError> {
		let (id, long) = self.parse_spec(spec)?;

		// Ids and long names must be unique across the whole registry.
		if self.groups.values().flatten().any(|o|
			o.id == id || (long.is_some() && o.long == long)
		) {
			return Err(PaisleyError::DuplicateOption(spec.to_owned()));
		}

		let opts = self.groups.entry(group.to_owned()).or_default();
		let idx = opts.len();
		opts.push(Opt {
			id,
			long,
			arity,
			brief: brief.to_owned(),
			value,
		});
		Ok(&opts[idx])
	}

	/// # Parse an Option Spec.
	///
	/// Tease the short id and/or long name out of the mini-language,
	/// allocating an auto id when no short character was given.
	fn parse_spec(&mut self, spec: &str) -> Result<(u32, Option<String>), PaisleyError> {
		let bytes = spec.as_bytes();
		let (short, rest) =
			if ! bytes.is_empty() && bytes[0].is_ascii_alphanumeric() &&
				(bytes.len() == 1 || bytes[1] == b',')
			{
				(
					Some(u32::from(bytes[0])),
					if bytes.len() == 1 { "" } else { &spec[2..] },
				)
			}
			else { (None, spec) };

		let rest = rest.trim_start_matches(' ');
		let long =
			if rest.is_empty() {
				// A spec has to name the option one way or the other.
				if short.is_none() {
					return Err(PaisleyError::InvalidSpec(spec.to_owned()));
				}
				None
			}
			else if valid_long_name(rest.as_bytes()) { Some(rest.to_owned()) }
			else {
				return Err(PaisleyError::InvalidSpec(spec.to_owned()));
			};

		let id = short.unwrap_or_else(|| {
			let id = self.next_auto;
			self.next_auto += 1;
			id
		});

		Ok((id, long))
	}
}



#[derive(Debug)]
/// # Chainable Group Registration.
///
/// Returned by [`OptionSet::group`]; each call re-yields the adder so
/// registrations can stack.
pub struct GroupAdder<'a> {
	/// # Parent Registry.
	set: &'a mut OptionSet,

	/// # Group Name.
	group: String,
}

impl GroupAdder<'_> {
	/// # Add an Option.
	///
	/// ## Errors
	///
	/// Returns an error if the spec is malformed or collides with an
	/// existing id or long name.
	pub fn add(self, spec: &str, brief: &str, value: TieredValue, arity: Arity)
	-> Result<Self, PaisleyError> {
		self.set.add_to(&self.group, spec, brief, value, arity)?;
		Ok(self)
	}

	/// # Add a Bare Flag.
	///
	/// Sugar for the common case: no argument, no prototype value.
	///
	/// ## Errors
	///
	/// Returns an error if the spec is malformed or collides with an
	/// existing id or long name.
	pub fn flag(self, spec: &str, brief: &str) -> Result<Self, PaisleyError> {
		self.add(spec, brief, TieredValue::new(), Arity::NoArg)
	}
}



/// # Valid Long Name?
///
/// The first character must be alphanumeric; the rest may be alphanumerics,
/// dashes, or underscores.
const fn valid_long_name(mut name: &[u8]) -> bool {
	let [b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9', rest @ ..] = name else { return false; };
	name = rest;

	while let [a, rest @ ..] = name {
		if ! matches!(*a, b'-' | b'_' | b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9') {
			return false;
		}
		name = rest;
	}

	true
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_spec() {
		let mut set = OptionSet::new();

		let opt = set.add("x", "", TieredValue::new(), Arity::NoArg)
			.expect("Short-only spec failed.");
		assert_eq!(opt.id(), u32::from(b'x'));
		assert_eq!(opt.short(), Some('x'));
		assert_eq!(opt.long(), None);

		let opt = set.add("v,verbose", "", TieredValue::new(), Arity::NoArg)
			.expect("Short/long spec failed.");
		assert_eq!(opt.id(), u32::from(b'v'));
		assert_eq!(opt.long(), Some("verbose"));
		assert_eq!(opt.label(), "-v, --verbose");

		// Spaces after the comma are forgiven.
		let opt = set.add("q, quiet", "", TieredValue::new(), Arity::NoArg)
			.expect("Spaced spec failed.");
		assert_eq!(opt.long(), Some("quiet"));

		// A dangling comma just means no long name.
		let opt = set.add("z,", "", TieredValue::new(), Arity::NoArg)
			.expect("Dangling-comma spec failed.");
		assert_eq!(opt.long(), None);
	}

	#[test]
	fn t_spec_bad() {
		let mut set = OptionSet::new();
		for spec in ["", ",long", "-bad", "x,bad name", "x,-lead", "x,björk"] {
			assert!(
				matches!(
					set.add(spec, "", TieredValue::new(), Arity::NoArg),
					Err(PaisleyError::InvalidSpec(_)),
				),
				"Spec {spec:?} should have been rejected.",
			);
		}
	}

	#[test]
	fn t_auto_ids() {
		let mut set = OptionSet::new();
		let first = set.add("alpha", "", TieredValue::new(), Arity::NoArg)
			.expect("Long-only spec failed.")
			.id();
		let second = set.add("beta", "", TieredValue::new(), Arity::NoArg)
			.expect("Long-only spec failed.")
			.id();

		assert_eq!(first, AUTO_ID_BASE);
		assert_eq!(second, AUTO_ID_BASE + 1);

		// No short characters to speak of.
		let flat = set.flat();
		assert!(flat.iter().all(|o| o.short().is_none()));
		assert_eq!(flat[0].label(), "--alpha");
	}

	#[test]
	fn t_duplicate() {
		let mut set = OptionSet::new();
		set.add("v,verbose", "", TieredValue::new(), Arity::NoArg)
			.expect("First registration failed.");

		// Same short, same long, either way: no.
		assert!(matches!(
			set.add("v", "", TieredValue::new(), Arity::NoArg),
			Err(PaisleyError::DuplicateOption(_)),
		));
		assert!(matches!(
			set.add("verbose", "", TieredValue::new(), Arity::NoArg),
			Err(PaisleyError::DuplicateOption(_)),
		));

		// Fresh names are still welcome.
		assert!(set.add("V,loud", "", TieredValue::new(), Arity::NoArg).is_ok());
	}

	#[test]
	fn t_groups_flatten() {
		let mut set = OptionSet::new();
		set.add("h,help", "", TieredValue::new(), Arity::NoArg)
			.expect("Registration failed.");
		set.group("network")
			.flag("4,ipv4", "").expect("Registration failed.")
			.flag("6,ipv6", "").expect("Registration failed.");

		assert!(! set.is_empty());
		let flat = set.flat();
		assert_eq!(flat.len(), 3);

		// Anonymous group first (BTreeMap order), then "network" in
		// registration order.
		assert_eq!(flat[0].short(), Some('h'));
		assert_eq!(flat[1].short(), Some('4'));
		assert_eq!(flat[2].short(), Some('6'));
	}

	#[test]
	fn t_valid_long_name() {
		for name in ["a0", "verbose", "dry-run", "log_level", "v2"] {
			assert!(valid_long_name(name.as_bytes()), "{name:?} should be valid.");
		}
		for name in ["", "-lead", "_lead", "has space", "björk", "semi;colon"] {
			assert!(! valid_long_name(name.as_bytes()), "{name:?} shouldn't be valid.");
		}
	}
}
