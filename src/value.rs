/*!
# Paisley: Tiered Values.

A [`TieredValue`] is the layered storage backing one option: a small stack of
slots — conventionally `default`, `implicit`, `explicit`, then free-form
overrides — where the highest *present* slot wins. Registration seeds the low
levels; the parser writes raw command-line text into the explicit level; the
typed getters run everything back through the [`Textual`] conversion layer on
the way out.
*/

use crate::{
	PaisleyError,
	Textual,
};



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # One Storage Slot.
struct Slot {
	/// # Present?
	present: bool,

	/// # Canonical Text.
	text: String,

	/// # Raw Command-Line Argument.
	///
	/// Only populated when the slot was fed directly from argv; derived
	/// values leave it empty.
	raw: Option<String>,
}



/// # Helper: Named-Level Conveniences.
///
/// The three conventional levels each get a full complement of accessors so
/// call sites can say what they mean (`set_raw_explicit(...)`) instead of
/// shuffling indices around.
macro_rules! level_fns {
	($level:expr, $tag:literal, $has:ident, $get:ident, $set:ident, $set_raw:ident, $raw:ident, $clear:ident) => (
		#[must_use]
		#[doc = concat!("# Present at the `", $tag, "` level?")]
		pub fn $has(&self) -> bool { self.has_at($level) }

		#[doc = concat!("# Typed value at the `", $tag, "` level.")]
		///
		/// ## Errors
		///
		/// Returns an error if the level is absent or the text won't convert.
		pub fn $get<T: Textual>(&self) -> Result<T, PaisleyError> { self.get_at($level) }

		#[doc = concat!("# Set the `", $tag, "` level.")]
		///
		/// ## Errors
		///
		/// Returns an error if the value cannot be rendered to text.
		pub fn $set<T: Textual>(&mut self, value: &T) -> Result<&mut Self, PaisleyError> {
			self.set_at(value, $level)
		}

		#[doc = concat!("# Store a raw argument at the `", $tag, "` level.")]
		pub fn $set_raw(&mut self, arg: &str) -> &mut Self { self.set_raw_at(arg, $level) }

		#[must_use]
		#[doc = concat!("# Raw argument at the `", $tag, "` level, if any.")]
		pub fn $raw(&self) -> Option<&str> { self.raw_at($level) }

		#[doc = concat!("# Clear the `", $tag, "` level.")]
		pub fn $clear(&mut self) -> &mut Self { self.clear_at($level) }
	);
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Multi-Tier Value Store.
///
/// Levels stack lowest-precedence first; [`TieredValue::last`] — the highest
/// index whose present flag is set — decides what the unqualified getters
/// resolve to. Clearing a level never truncates the stack, so a cleared
/// explicit value falls back to whatever sits beneath it.
///
/// ## Examples
///
/// ```
/// use paisley::TieredValue;
///
/// let mut value = TieredValue::new().with_default(&4_u32).unwrap();
/// value.set_explicit(&9_u32).unwrap();
/// assert_eq!(value.get::<u32>(), Ok(9));
///
/// value.clear_explicit();
/// assert_eq!(value.get::<u32>(), Ok(4));
/// ```
pub struct TieredValue {
	/// # Level Slots.
	slots: Vec<Slot>,
}

/// ## Construction.
impl TieredValue {
	/// # Conventional Level: Compile-Time Default.
	pub const DEFAULT: usize = 0;

	/// # Conventional Level: Implicit (Option Present, No Argument).
	pub const IMPLICIT: usize = 1;

	/// # Conventional Level: Explicit (Argument Given).
	pub const EXPLICIT: usize = 2;

	#[must_use]
	#[inline]
	/// # New (Empty) Instance.
	pub const fn new() -> Self { Self { slots: Vec::new() } }

	/// # With a Value at a Given Level.
	///
	/// Builder form of [`TieredValue::set_at`] for registration-time
	/// prototypes.
	///
	/// ## Errors
	///
	/// Returns an error if the value cannot be rendered to text.
	pub fn with_at<T: Textual>(mut self, value: &T, level: usize) -> Result<Self, PaisleyError> {
		self.set_at(value, level)?;
		Ok(self)
	}

	/// # With a Default-Level Value.
	///
	/// ## Errors
	///
	/// Returns an error if the value cannot be rendered to text.
	#[inline]
	pub fn with_default<T: Textual>(self, value: &T) -> Result<Self, PaisleyError> {
		self.with_at(value, Self::DEFAULT)
	}

	/// # With an Implicit-Level Value.
	///
	/// ## Errors
	///
	/// Returns an error if the value cannot be rendered to text.
	#[inline]
	pub fn with_implicit<T: Textual>(self, value: &T) -> Result<Self, PaisleyError> {
		self.with_at(value, Self::IMPLICIT)
	}
}

/// ## Queries.
impl TieredValue {
	#[must_use]
	/// # Highest Present Level.
	///
	/// Returns `None` when nothing is present at all.
	pub fn last(&self) -> Option<usize> {
		self.slots.iter().rposition(|s| s.present)
	}

	#[must_use]
	#[inline]
	/// # Any Level Present?
	pub fn has(&self) -> bool { self.last().is_some() }

	#[must_use]
	/// # Present at a Given Level?
	pub fn has_at(&self, level: usize) -> bool {
		self.slots.get(level).is_some_and(|s| s.present)
	}

	/// # Typed Value (Winning Level).
	///
	/// Resolve [`TieredValue::last`] and derive its text to `T`.
	///
	/// ## Errors
	///
	/// Returns [`PaisleyError::NoValue`] if nothing is present — never a
	/// default-constructed value — and [`PaisleyError::Conversion`] if the
	/// text won't derive. Callers wanting a fallback should reach for
	/// [`TieredValue::get_or`] instead.
	pub fn get<T: Textual>(&self) -> Result<T, PaisleyError> {
		self.last().ok_or(PaisleyError::NoValue).and_then(|level| self.get_at(level))
	}

	/// # Typed Value at a Given Level.
	///
	/// ## Errors
	///
	/// Returns an error if the level is absent or the text won't convert.
	pub fn get_at<T: Textual>(&self, level: usize) -> Result<T, PaisleyError> {
		self.slots.get(level)
			.filter(|s| s.present)
			.ok_or(PaisleyError::NoValue)
			.and_then(|s| T::from_text(&s.text))
	}

	#[must_use]
	/// # Typed Value or Fallback.
	///
	/// The forgiving sibling of [`TieredValue::get`]: absence and conversion
	/// failure alike collapse into the supplied fallback.
	pub fn get_or<T: Textual>(&self, fallback: T) -> T {
		self.get().unwrap_or(fallback)
	}

	#[must_use]
	/// # Raw Argument at a Given Level.
	///
	/// The token exactly as it appeared on the command line, if this level
	/// was fed from argv.
	pub fn raw_at(&self, level: usize) -> Option<&str> {
		self.slots.get(level)
			.filter(|s| s.present)
			.and_then(|s| s.raw.as_deref())
	}
}

/// ## Mutation.
impl TieredValue {
	/// # Set (Next Free Level).
	///
	/// Appends a new level above everything already allocated.
	///
	/// ## Errors
	///
	/// Returns an error if the value cannot be rendered to text.
	#[inline]
	pub fn set<T: Textual>(&mut self, value: &T) -> Result<&mut Self, PaisleyError> {
		self.set_at(value, self.slots.len())
	}

	/// # Set a Given Level.
	///
	/// Grows the slot stack if needed, derives the value to canonical text,
	/// and marks the level present. Any stale raw argument is dropped since
	/// the text no longer came from argv.
	///
	/// ## Errors
	///
	/// Returns an error if the value cannot be rendered to text.
	pub fn set_at<T: Textual>(&mut self, value: &T, level: usize) -> Result<&mut Self, PaisleyError> {
		let text = value.to_text()?;
		let slot = self.slot_mut(level);
		slot.present = true;
		slot.text = text;
		slot.raw = None;
		Ok(self)
	}

	/// # Store a Raw Argument at a Given Level.
	///
	/// The literal command-line token becomes both the raw argument and the
	/// canonical text, bypassing [`Textual::to_text`] entirely; typing is
	/// deferred until a getter asks for it.
	pub fn set_raw_at(&mut self, arg: &str, level: usize) -> &mut Self {
		let slot = self.slot_mut(level);
		slot.present = true;
		slot.text = arg.to_owned();
		slot.raw = Some(arg.to_owned());
		self
	}

	/// # Clear (Winning Level).
	pub fn clear(&mut self) -> &mut Self {
		if let Some(level) = self.last() { self.clear_at(level); }
		self
	}

	/// # Clear a Given Level.
	///
	/// Only the present flag is unset; the stack never shrinks.
	pub fn clear_at(&mut self, level: usize) -> &mut Self {
		if let Some(slot) = self.slots.get_mut(level) { slot.present = false; }
		self
	}

	/// # Clear Every Level.
	pub fn clear_all(&mut self) -> &mut Self {
		for slot in &mut self.slots { slot.present = false; }
		self
	}

	/// # Slot at Level, Growing as Needed.
	fn slot_mut(&mut self, level: usize) -> &mut Slot {
		if self.slots.len() <= level {
			self.slots.resize(level + 1, Slot::default());
		}
		&mut self.slots[level]
	}
}

/// ## Named-Level Conveniences.
impl TieredValue {
	level_fns!(
		Self::DEFAULT, "default",
		has_default, get_default, set_default, set_raw_default, raw_default, clear_default
	);
	level_fns!(
		Self::IMPLICIT, "implicit",
		has_implicit, get_implicit, set_implicit, set_raw_implicit, raw_implicit, clear_implicit
	);
	level_fns!(
		Self::EXPLICIT, "explicit",
		has_explicit, get_explicit, set_explicit, set_raw_explicit, raw_explicit, clear_explicit
	);
}

/// ## Reporting.
impl TieredValue {
	#[must_use]
	/// # Describe Every Present Level.
	///
	/// Most recent first, quoted, annotated with the level's conventional
	/// name — `[default]`, `[implicit]`, `[explicit]`, or `[N]` beyond those
	/// — and comma-joined.
	///
	/// ## Examples
	///
	/// ```
	/// use paisley::TieredValue;
	///
	/// let mut value = TieredValue::new().with_default(&1_u8).unwrap();
	/// value.set_explicit(&2_u8).unwrap();
	/// assert_eq!(value.describe(), "\"2\"[explicit], \"1\"[default]");
	/// ```
	pub fn describe(&self) -> String {
		let Some(top) = self.last() else { return "<no values>".to_owned(); };

		let mut parts = Vec::new();
		for level in (0..=top).rev() {
			if self.has_at(level) {
				let tag = match level {
					Self::DEFAULT => "[default]".to_owned(),
					Self::IMPLICIT => "[implicit]".to_owned(),
					Self::EXPLICIT => "[explicit]".to_owned(),
					n => format!("[{n}]"),
				};
				parts.push(format!("\"{}\"{tag}", self.slots[level].text));
			}
		}
		parts.join(", ")
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_precedence() {
		let mut value = TieredValue::new();
		value.set_default(&"x".to_owned()).expect("set_default failed.");
		value.set_explicit(&"y".to_owned()).expect("set_explicit failed.");

		assert_eq!(value.last(), Some(TieredValue::EXPLICIT));
		assert_eq!(value.get::<String>(), Ok("y".to_owned()));

		// Clearing the winner exposes the layer beneath.
		value.clear_explicit();
		assert_eq!(value.get::<String>(), Ok("x".to_owned()));

		// And clearing everything leaves nothing.
		value.clear_all();
		assert!(! value.has());
		assert_eq!(value.get::<String>(), Err(PaisleyError::NoValue));
	}

	#[test]
	fn t_absent() {
		let value = TieredValue::new();
		assert!(! value.has());
		assert_eq!(value.last(), None);
		assert_eq!(value.get::<u32>(), Err(PaisleyError::NoValue));
		assert_eq!(value.get_at::<u32>(5), Err(PaisleyError::NoValue));
		assert_eq!(value.get_or(7_u32), 7);
	}

	#[test]
	fn t_set_appends() {
		let mut value = TieredValue::new();
		value.set(&1_u8).expect("set failed.")
			.set(&2_u8).expect("set failed.");

		assert!(value.has_at(0));
		assert!(value.has_at(1));
		assert_eq!(value.get::<u8>(), Ok(2));

		// Clearing doesn't truncate, so the next free slot is still #2.
		value.clear();
		value.set(&3_u8).expect("set failed.");
		assert_eq!(value.last(), Some(2));
		assert_eq!(value.get::<u8>(), Ok(3));
	}

	#[test]
	fn t_raw() {
		let mut value = TieredValue::new();
		value.set_raw_explicit("0x20");

		assert_eq!(value.raw_explicit(), Some("0x20"));
		assert_eq!(value.get::<u32>(), Ok(32));
		assert_eq!(value.get::<String>(), Ok("0x20".to_owned()));

		// Typing is deferred; garbage only errors at get-time.
		value.set_raw_explicit("not-a-number");
		assert!(value.get::<u32>().is_err());
		assert_eq!(value.get::<String>(), Ok("not-a-number".to_owned()));

		// Derived values carry no raw argument.
		value.set_explicit(&64_u32).expect("set_explicit failed.");
		assert_eq!(value.raw_explicit(), None);
	}

	#[test]
	fn t_conversion_error_is_not_absence() {
		let mut value = TieredValue::new();
		value.set_raw_explicit("banana");
		assert!(matches!(value.get::<u32>(), Err(PaisleyError::Conversion(_))));
		assert_eq!(TieredValue::new().get::<u32>(), Err(PaisleyError::NoValue));
	}

	#[test]
	fn t_describe() {
		assert_eq!(TieredValue::new().describe(), "<no values>");

		let mut value = TieredValue::new()
			.with_default(&"/path".to_owned()).expect("with_default failed.");
		value.set_raw_explicit("/tmp/x");
		assert_eq!(value.describe(), "\"/tmp/x\"[explicit], \"/path\"[default]");

		// Free-form levels report their index.
		value.set_at(&1_u8, 4).expect("set_at failed.");
		assert_eq!(
			value.describe(),
			"\"1\"[4], \"/tmp/x\"[explicit], \"/path\"[default]",
		);
	}

	#[test]
	fn t_clone_independent() {
		let proto = TieredValue::new().with_default(&1_u8).expect("with_default failed.");
		let mut copy = proto.clone();
		copy.set_raw_explicit("2");

		assert_eq!(proto.get::<u8>(), Ok(1));
		assert_eq!(copy.get::<u8>(), Ok(2));
	}
}
