/*!
# Paisley: Errors

This is the obligatory error enum. One type covers the whole crate, but the
variants fall into four distinct families — registration, scan, conversion,
and absent-value — so callers can match as coarsely or finely as they like.
*/

use thiserror::Error;



#[derive(Debug, Clone, Eq, PartialEq, Error)]
/// # Error Struct.
pub enum PaisleyError {
	/// # Malformed Option Spec.
	///
	/// The string handed to [`OptionSet::add`](crate::OptionSet::add) was not
	/// one of `"x"`, `"x,long-name"`, or `"long-name"`. Raised at
	/// registration, never during a parse.
	#[error("invalid option spec: {0:?}")]
	InvalidSpec(String),

	/// # Duplicate Option.
	///
	/// Another option in the set already claimed this id or long name.
	#[error("duplicate option: {0}")]
	DuplicateOption(String),

	/// # Unknown Option.
	///
	/// The scanner hit a dash-prefixed token (or clustered character) that no
	/// registered option matches. Reported, not fatal; the parse continues.
	#[error("unknown option: {0}")]
	UnknownOption(String),

	/// # Missing Required Argument.
	///
	/// An option with [`Arity::Required`](crate::Arity::Required) sat at the
	/// very end of the argument vector with nothing left to consume.
	#[error("missing required argument for {0}")]
	MissingArgument(String),

	/// # Conversion Failure.
	///
	/// Stored text could not be derived to (or from) the requested type. The
	/// offending text rides along for context.
	#[error("conversion failed: {0:?}")]
	Conversion(String),

	/// # Value Not Present.
	///
	/// A typed getter was called on a [`TieredValue`](crate::TieredValue)
	/// with no present level. Distinct from [`PaisleyError::Conversion`] so
	/// callers can tell "absent" from "unparseable".
	#[error("value not present")]
	NoValue,

	/// # No Such Option.
	///
	/// The parse results hold nothing under the requested id or name.
	#[error("no such option: {0}")]
	NoSuchOption(String),
}
