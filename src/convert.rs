/*!
# Paisley: Conversion.

Everything an option holds is stored as canonical text; this module is the
bidirectional bridge between that text and the typed values callers actually
want. The supported set is closed but covers the practical ground: booleans,
integers, floats, strings, sequences, string-keyed maps, and sequences of
sequences.

The composite grammars are deliberately forgiving: comma lists may be wrapped
in a single pair of `[...]` or `{...}`, map entries are `;`-separated
`key:value` pairs, and nested lists are split with a bracket-depth–aware scan
so inner commas stay put.
*/

use crate::PaisleyError;
use std::collections::HashMap;
use std::hash::Hash;



/// # Typed-Value ⇄ Text Transcoding.
///
/// Implementors can be derived from, and rendered to, a canonical textual
/// form. Both directions return a [`PaisleyError::Conversion`] on failure
/// rather than panicking or silently defaulting; callers decide what a
/// failure means.
///
/// ## Examples
///
/// ```
/// use paisley::Textual;
///
/// assert_eq!(u32::from_text("0x1f"), Ok(31));
/// assert_eq!(vec![1_u8, 2, 3].to_text(), Ok("[1, 2, 3]".to_owned()));
/// ```
pub trait Textual: Sized {
	/// # To Canonical Text.
	///
	/// ## Errors
	///
	/// Returns an error if the value (or any nested element) cannot be
	/// rendered.
	fn to_text(&self) -> Result<String, PaisleyError>;

	/// # From Text.
	///
	/// ## Errors
	///
	/// Returns an error if the text (or any nested element) cannot be
	/// derived to the target type.
	fn from_text(raw: &str) -> Result<Self, PaisleyError>;
}



impl Textual for bool {
	#[inline]
	fn to_text(&self) -> Result<String, PaisleyError> {
		Ok(String::from(if *self { "true" } else { "false" }))
	}

	/// # From Text.
	///
	/// Surrounding whitespace is trimmed first; `true`/`1` and `false`/`0`
	/// are accepted, case-insensitively.
	fn from_text(raw: &str) -> Result<Self, PaisleyError> {
		let trimmed = raw.trim();
		if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" { Ok(true) }
		else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" { Ok(false) }
		else { Err(PaisleyError::Conversion(trimmed.to_owned())) }
	}
}

impl Textual for String {
	#[inline]
	fn to_text(&self) -> Result<String, PaisleyError> { Ok(self.clone()) }

	/// # From Text.
	///
	/// Strings pass through untouched; no trimming happens inside the round
	/// trip itself.
	#[inline]
	fn from_text(raw: &str) -> Result<Self, PaisleyError> { Ok(raw.to_owned()) }
}

/// # Helper: Integer Conversions.
///
/// Integers parse with an optional leading `-` and C-style base
/// auto-detection: `0x`/`0X` for hexadecimal, a leading `0` for octal,
/// decimal otherwise. Malformed or out-of-range text is an error.
macro_rules! textual_int {
	($($ty:ty),+ $(,)?) => ($(
		impl Textual for $ty {
			#[inline]
			fn to_text(&self) -> Result<String, PaisleyError> { Ok(self.to_string()) }

			fn from_text(raw: &str) -> Result<Self, PaisleyError> {
				let trimmed = raw.trim();
				let (negative, digits) = match trimmed.strip_prefix('-') {
					Some(rest) => (true, rest),
					None => (false, trimmed),
				};
				let (base, digits) =
					if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
						(16, rest)
					}
					else if 1 < digits.len() && digits.as_bytes()[0] == b'0' {
						(8, &digits[1..])
					}
					else { (10, digits) };

				let parsed =
					if negative { <$ty>::from_str_radix(&format!("-{digits}"), base) }
					else { <$ty>::from_str_radix(digits, base) };
				parsed.map_err(|_| PaisleyError::Conversion(trimmed.to_owned()))
			}
		}
	)+);
}

textual_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// # Helper: Float Conversions.
///
/// Floats use the standard library's scanner, which already rejects empty
/// input and trailing garbage; only surrounding whitespace is forgiven.
macro_rules! textual_float {
	($($ty:ty),+ $(,)?) => ($(
		impl Textual for $ty {
			#[inline]
			fn to_text(&self) -> Result<String, PaisleyError> { Ok(self.to_string()) }

			fn from_text(raw: &str) -> Result<Self, PaisleyError> {
				let trimmed = raw.trim();
				trimmed.parse::<$ty>()
					.map_err(|_| PaisleyError::Conversion(trimmed.to_owned()))
			}
		}
	)+);
}

textual_float!(f32, f64);

impl<T: Textual> Textual for Vec<T> {
	/// # To Text.
	///
	/// Elements are rendered recursively and joined with `", "` inside a
	/// single pair of square brackets, no trailing separator.
	fn to_text(&self) -> Result<String, PaisleyError> {
		let mut parts = Vec::with_capacity(self.len());
		for item in self { parts.push(item.to_text()?); }
		Ok(format!("[{}]", parts.join(", ")))
	}

	/// # From Text.
	///
	/// Empty text is an empty sequence, not an error. At most one pair of
	/// `[...]`/`{...}` wrappers is shed, then the remainder splits at
	/// top-level commas; a failure on any element aborts the whole parse
	/// with that element's error.
	fn from_text(raw: &str) -> Result<Self, PaisleyError> {
		let mut trimmed = raw.trim();
		if trimmed.is_empty() { return Ok(Self::new()); }

		if matches!(trimmed.as_bytes().first(), Some(b'[' | b'{')) {
			trimmed = &trimmed[1..];
		}
		if matches!(trimmed.as_bytes().last(), Some(b']' | b'}')) {
			trimmed = &trimmed[..trimmed.len() - 1];
		}
		if trimmed.is_empty() { return Ok(Self::new()); }

		split_nested(trimmed, ',').into_iter().map(T::from_text).collect()
	}
}

impl<K, V> Textual for HashMap<K, V>
where K: Textual + Eq + Hash, V: Textual {
	/// # To Text.
	///
	/// Entries render as `key: value` joined with `"; "`. Iteration order —
	/// and therefore output order for multi-entry maps — is unspecified.
	fn to_text(&self) -> Result<String, PaisleyError> {
		let mut parts = Vec::with_capacity(self.len());
		for (k, v) in self {
			parts.push(format!("{}: {}", k.to_text()?, v.to_text()?));
		}
		Ok(parts.join("; "))
	}

	/// # From Text.
	///
	/// Empty text is an empty map. Entries split at `;`; each entry must
	/// contain exactly one top-level `:` separating key from value. Keys
	/// repeat at their own peril: the last writer wins.
	fn from_text(raw: &str) -> Result<Self, PaisleyError> {
		let trimmed = raw.trim();
		let mut out = Self::new();
		if trimmed.is_empty() { return Ok(out); }

		for block in split_nested(trimmed, ';') {
			let block = block.trim();
			let halves = split_nested(block, ':');
			let [key, value] = halves.as_slice() else {
				return Err(PaisleyError::Conversion(block.to_owned()));
			};
			out.insert(K::from_text(key)?, V::from_text(value)?);
		}

		Ok(out)
	}
}



/// # Split at Top-Level Separators.
///
/// Walk the string tracking `[`/`{` vs `]`/`}` nesting depth and split at
/// `sep` only where the depth is zero, so inner comma lists survive an outer
/// split intact. A naive split would shred nested sequences.
fn split_nested(raw: &str, sep: char) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0_usize;
	let mut start = 0;

	for (idx, ch) in raw.char_indices() {
		match ch {
			'[' | '{' => { depth += 1; },
			']' | '}' => { depth = depth.saturating_sub(1); },
			_ if ch == sep && depth == 0 => {
				parts.push(&raw[start..idx]);
				start = idx + sep.len_utf8();
			},
			_ => {},
		}
	}

	parts.push(&raw[start..]);
	parts
}
