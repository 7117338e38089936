/*!
# Paisley: Argv Scanner.

The [`Scanner`] is the engine room: a resumable state machine that walks an
argument vector one matched option at a time, GNU-`getopt_long` style. Along
the way it reorders the vector *in place* — matched options (and their
consumed arguments) bubble toward the front, positional operands drift to the
back — so that when the scan ends, a single index divides consumed tokens
from residual positionals.

The reorder is the classic triple-reversal rotation: reverse the skipped
positional run, reverse the run plus the option span together, then reverse
the span back. No scratch buffer, no tokens duplicated or dropped, relative
order preserved within both parts.
*/

use crate::{
	Arity,
	Opt,
};
use tracing::trace;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Per-Call Scan Outcome.
///
/// Exactly one of these falls out of every [`Scanner::next_opt`] call. The
/// scanner itself never aborts; even [`Outcome::Unknown`] and
/// [`Outcome::Missing`] leave it ready to carry on, letting the caller pick
/// the policy.
pub enum Outcome<'a> {
	/// # Matched Option.
	///
	/// One registered option, plus the argument text that came with it (for
	/// arities that take one).
	Matched(&'a Opt, Option<String>),

	/// # End of Input.
	///
	/// The vector is exhausted; only positionals remain.
	End,

	/// # Explicit Terminator.
	///
	/// A literal `--` ended the scan; everything after it is positional,
	/// dashes and all.
	Terminator,

	/// # Unknown Option.
	///
	/// A dash-prefixed token (or clustered character) no registered option
	/// claims. Unknown *long* tokens stay behind as positionals; unknown
	/// short characters are consumed with their token.
	Unknown(String),

	/// # Missing Required Argument.
	///
	/// The matched option demanded an argument but the vector had nothing
	/// left to give.
	Missing(&'a Opt),
}



#[derive(Debug)]
/// # Permuting Argv Scanner.
///
/// One instance per parse session, fed the flattened option list and the
/// argument vector *minus* the program name. Drive it by calling
/// [`Scanner::next_opt`] until [`Outcome::End`] or [`Outcome::Terminator`],
/// then collect the residual positionals with [`Scanner::rest`] or
/// [`Scanner::into_rest`].
///
/// Most callers will never touch this directly —
/// [`OptionSet::parse`](crate::OptionSet::parse) drives it and aggregates
/// the results — but it is perfectly usable as a streaming loop of its own.
///
/// ## Examples
///
/// ```
/// use paisley::{Arity, Outcome, OptionSet, Scanner, TieredValue};
///
/// let mut opts = OptionSet::new();
/// opts.add("v,verbose", "", TieredValue::new(), Arity::NoArg).unwrap();
///
/// let flat = opts.flat();
/// let mut scan = Scanner::new(&flat, ["in.txt", "-v", "out.txt"].map(String::from));
///
/// let Outcome::Matched(opt, None) = scan.next_opt() else { panic!(); };
/// assert_eq!(opt.short(), Some('v'));
/// assert_eq!(scan.next_opt(), Outcome::End);
/// assert_eq!(scan.rest(), ["in.txt", "out.txt"]);
/// ```
pub struct Scanner<'a> {
	/// # Flattened Option List.
	opts: &'a [&'a Opt],

	/// # The Argument Vector.
	///
	/// Owned and reordered in place as the scan proceeds.
	argv: Vec<String>,

	/// # Cursor.
	///
	/// Index of the next token to examine; once the scan finishes, the
	/// boundary between consumed tokens and residual positionals.
	cursor: usize,

	/// # Sub-Cursor.
	///
	/// Byte offset of the next character within a clustered short token,
	/// or zero when not mid-cluster.
	sub: usize,

	/// # Positional Run Start.
	///
	/// The pending run of skipped positionals always sits immediately
	/// behind the cursor: `run_start + run_len == cursor` whenever the
	/// scanner is between tokens. Keeping it session state (rather than
	/// recomputing per call) means no token is ever examined twice and
	/// nothing gets orphaned around unknown-option reports.
	run_start: usize,

	/// # Positional Run Length.
	run_len: usize,

	/// # Scan Finished?
	finished: bool,
}

impl<'a> Scanner<'a> {
	#[must_use]
	/// # New Instance.
	///
	/// `args` is the argument vector without the leading program name;
	/// `std::env::args().skip(1)` is the usual source.
	pub fn new<I>(opts: &'a [&'a Opt], args: I) -> Self
	where I: IntoIterator, I::Item: Into<String> {
		Self {
			opts,
			argv: args.into_iter().map(Into::into).collect(),
			cursor: 0,
			sub: 0,
			run_start: 0,
			run_len: 0,
			finished: false,
		}
	}

	/// # Next Option.
	///
	/// Advance the scan by exactly one outcome. After [`Outcome::End`] or
	/// [`Outcome::Terminator`], further calls keep returning
	/// [`Outcome::End`]; it is always safe to stop early and keep whatever
	/// partially-permuted state remains.
	pub fn next_opt(&mut self) -> Outcome<'a> {
		if self.finished { return Outcome::End; }

		if self.sub == 0 {
			// Skip forward to the next option-looking token, growing the
			// pending positional run as we go.
			while self.cursor < self.argv.len() && ! is_option(&self.argv[self.cursor]) {
				trace!(token = %self.argv[self.cursor], "skipping non-option");
				self.cursor += 1;
				self.run_len += 1;
			}

			// Ran off the end; pull the cursor back so the run stays put as
			// the residual tail.
			if self.cursor == self.argv.len() {
				self.cursor = self.run_start;
				self.finished = true;
				return Outcome::End;
			}

			// A literal terminator settles ahead of the run and ends the
			// scan; the tokens beyond it are nobody's business.
			if self.argv[self.cursor] == "--" {
				trace!("explicit terminator");
				self.settle(1);
				self.cursor = self.run_start;
				self.finished = true;
				return Outcome::Terminator;
			}

			// Two dashes make a long option; otherwise start a cluster walk.
			if self.argv[self.cursor].as_bytes()[1] == b'-' {
				return self.next_long();
			}
			self.sub = 1;
		}

		self.next_short()
	}

	/// # Residual Arguments.
	///
	/// The tokens left over once the scan has finished: every positional
	/// operand, in its original relative order.
	#[must_use]
	pub fn rest(&self) -> &[String] { &self.argv[self.cursor..] }

	#[must_use]
	/// # Residual Arguments (Owned).
	///
	/// Consume the scanner, dropping everything the scan ate and returning
	/// just the positionals.
	pub fn into_rest(mut self) -> Vec<String> {
		self.argv.drain(..self.cursor);
		self.argv
	}

	#[must_use]
	#[inline]
	/// # Consumed Token Count.
	///
	/// How many tokens were eaten as options, arguments, or terminator —
	/// i.e. the original length minus [`Scanner::rest`].
	pub const fn consumed(&self) -> usize { self.cursor }

	#[must_use]
	#[inline]
	/// # Scan Finished?
	pub const fn finished(&self) -> bool { self.finished }
}

/// ## Internal Workings.
impl<'a> Scanner<'a> {
	/// # Handle a Long Option.
	///
	/// The candidate name is whatever sits between the leading `--` and the
	/// first `=` (or end of token). An exact name match wins outright; an
	/// unambiguous prefix match resolves; anything else is reported unknown
	/// and the token joins the positional run.
	fn next_long(&mut self) -> Outcome<'a> {
		let token = self.argv[self.cursor].clone();
		let (name, attached) = match token[2..].split_once('=') {
			Some((n, a)) => (n, Some(a)),
			None => (&token[2..], None),
		};

		let Some(opt) = self.find_long(name) else {
			trace!(%token, "unknown long option");
			self.cursor += 1;
			self.run_len += 1;
			return Outcome::Unknown(token);
		};
		trace!(id = opt.id(), %token, "matched long option");

		match opt.arity() {
			// Attachments on a bare switch are ignored.
			Arity::NoArg => {
				self.settle(1);
				Outcome::Matched(opt, None)
			},
			Arity::Optional => {
				let arg = attached.filter(|a| ! a.is_empty()).map(str::to_owned);
				self.settle(1);
				Outcome::Matched(opt, arg)
			},
			Arity::Required => match attached.filter(|a| ! a.is_empty()) {
				Some(arg) => {
					let arg = arg.to_owned();
					self.settle(1);
					Outcome::Matched(opt, Some(arg))
				},
				// An empty or absent attachment falls through to the next
				// token in the vector.
				None =>
					if self.cursor + 1 < self.argv.len() {
						let arg = self.argv[self.cursor + 1].clone();
						self.settle(2);
						Outcome::Matched(opt, Some(arg))
					}
					else {
						trace!(%token, "missing required argument");
						self.settle(1);
						Outcome::Missing(opt)
					},
			},
		}
	}

	/// # Handle a Short Option (Cluster Step).
	///
	/// Each call looks at one character; `NoArg` matches keep walking the
	/// same token (`-abc` ≡ `-a -b -c`) while argument-taking matches eat
	/// the remainder. The token only settles — and the cursor only moves —
	/// once it has been fully spent.
	fn next_short(&mut self) -> Outcome<'a> {
		let token_len = self.argv[self.cursor].len();
		let ch = self.argv[self.cursor].as_bytes()[self.sub];

		let Some(opt) = self.opts.iter().copied().find(|o| o.id() == u32::from(ch)) else {
			trace!(char = %char::from(ch), "unknown short option");
			self.sub += 1;
			if token_len <= self.sub {
				// Token spent; it still counts as consumed.
				self.sub = 0;
				self.settle(1);
			}
			return Outcome::Unknown(format!("-{}", char::from(ch)));
		};
		trace!(id = opt.id(), char = %char::from(ch), "matched short option");

		match opt.arity() {
			Arity::NoArg => {
				self.sub += 1;
				if token_len <= self.sub {
					self.sub = 0;
					self.settle(1);
				}
				Outcome::Matched(opt, None)
			},
			Arity::Optional => {
				let arg = self.attached();
				self.sub = 0;
				self.settle(1);
				Outcome::Matched(opt, arg)
			},
			Arity::Required => match self.attached() {
				Some(arg) => {
					self.sub = 0;
					self.settle(1);
					Outcome::Matched(opt, Some(arg))
				},
				None =>
					if self.cursor + 1 < self.argv.len() {
						let arg = self.argv[self.cursor + 1].clone();
						self.sub = 0;
						self.settle(2);
						Outcome::Matched(opt, Some(arg))
					}
					else {
						trace!(char = %char::from(ch), "missing required argument");
						self.sub = 0;
						self.settle(1);
						Outcome::Missing(opt)
					},
			},
		}
	}

	/// # Attached Short-Option Argument.
	///
	/// The remainder of the current token past the sub-cursor, with at most
	/// one leading `=` shed; `None` if nothing (non-empty) is left.
	fn attached(&self) -> Option<String> {
		let mut rest = &self.argv[self.cursor][self.sub + 1..];
		if let Some(stripped) = rest.strip_prefix('=') { rest = stripped; }
		if rest.is_empty() { None }
		else { Some(rest.to_owned()) }
	}

	/// # Find a Long Option by Candidate Name.
	///
	/// Exact matches short-circuit even when the candidate would also
	/// prefix-match something longer; failing that, a single prefix match
	/// resolves and several are ambiguous (no match).
	fn find_long(&self, name: &str) -> Option<&'a Opt> {
		if name.is_empty() { return None; }

		let mut prefixed: Option<&'a Opt> = None;
		let mut ambiguous = false;
		for opt in self.opts.iter().copied() {
			let Some(long) = opt.long() else { continue; };
			if long == name { return Some(opt); }
			if long.starts_with(name) {
				if prefixed.is_some() { ambiguous = true; }
				prefixed = Some(opt);
			}
		}

		if ambiguous { None }
		else { prefixed }
	}

	/// # Settle the Current Option Span.
	///
	/// Rotate the pending positional run behind the `gap` option tokens at
	/// the cursor using three in-place reversals: reverse the run, reverse
	/// run-plus-span together, reverse the span back. The rotation needs no
	/// scratch storage and leaves the relative order of both parts
	/// untouched; afterwards the run (shifted `gap` places right) still sits
	/// immediately behind the cursor.
	fn settle(&mut self, gap: usize) {
		if self.run_len != 0 {
			trace!(
				from = self.run_start,
				run = self.run_len,
				gap,
				"permuting positional run",
			);
			let seg = &mut self.argv[self.run_start..self.cursor + gap];
			let run = self.run_len;
			seg[..run].reverse();
			seg.reverse();
			seg[..gap].reverse();
		}
		self.run_start += gap;
		self.cursor += gap;
	}
}



/// # Option-Looking Token?
///
/// A dash followed by at least one more character. A bare `-` is a
/// conventional stdin marker and stays positional.
fn is_option(token: &str) -> bool {
	let bytes = token.as_bytes();
	1 < bytes.len() && bytes[0] == b'-'
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		OptionSet,
		PaisleyError,
		TieredValue,
	};

	/// # Standard Test Registry.
	///
	/// `-h/--help` (no-arg), `-v/--verbose` (optional), `-i/--input`
	/// (required), plus `-a`/`-b`/`-c` no-arg shorts for cluster games.
	fn registry() -> OptionSet {
		let mut set = OptionSet::new();
		set.group("")
			.flag("h,help", "Print help.").expect("Registration failed.")
			.add("v,verbose", "Noise.", TieredValue::new(), Arity::Optional)
				.expect("Registration failed.")
			.add("i,input", "Input path.", TieredValue::new(), Arity::Required)
				.expect("Registration failed.")
			.flag("a", "").expect("Registration failed.")
			.flag("b", "").expect("Registration failed.")
			.flag("c", "").expect("Registration failed.");
		set
	}

	/// # Run a Scan to Completion.
	///
	/// Collect `(short-or-long label, argument)` pairs for matches and
	/// stringify the rest, then hand back the residuals too.
	fn drain(set: &OptionSet, args: &[&str]) -> (Vec<String>, Vec<String>, usize) {
		let flat = set.flat();
		let mut scan = Scanner::new(&flat, args.iter().copied().map(String::from));
		let mut log = Vec::new();
		loop {
			match scan.next_opt() {
				Outcome::Matched(opt, arg) => log.push(match arg {
					Some(a) => format!("{}={a}", opt.label()),
					None => opt.label(),
				}),
				Outcome::Unknown(tok) => log.push(format!("?{tok}")),
				Outcome::Missing(opt) => log.push(format!("!{}", opt.label())),
				Outcome::End | Outcome::Terminator => break,
			}
		}
		let consumed = scan.consumed();
		(log, scan.into_rest(), consumed)
	}

	#[test]
	fn t_mixed_scenario() {
		let set = registry();
		let (log, rest, consumed) = drain(&set, &["file1", "-v", "--input=/tmp/x", "file2"]);

		assert_eq!(log, ["-v, --verbose", "-i, --input=/tmp/x"]);
		assert_eq!(rest, ["file1", "file2"]);
		assert_eq!(consumed, 2);
	}

	#[test]
	fn t_cluster() {
		let set = registry();

		// -abc ≡ -a -b -c.
		let (log, rest, consumed) = drain(&set, &["-abc"]);
		assert_eq!(log, ["-a", "-b", "-c"]);
		assert!(rest.is_empty());
		assert_eq!(consumed, 1);

		// Same again with positionals scattered around.
		let (log, rest, _) = drain(&set, &["one", "-ab", "two", "-c"]);
		assert_eq!(log, ["-a", "-b", "-c"]);
		assert_eq!(rest, ["one", "two"]);
	}

	#[test]
	fn t_cluster_attached() {
		let set = registry();

		// Trailing cluster characters feed an argument-taker.
		let (log, rest, _) = drain(&set, &["-i/tmp/x"]);
		assert_eq!(log, ["-i, --input=/tmp/x"]);
		assert!(rest.is_empty());

		let (log, _, _) = drain(&set, &["-ai=5"]);
		assert_eq!(log, ["-a", "-i, --input=5"]);

		let (log, _, _) = drain(&set, &["-v3"]);
		assert_eq!(log, ["-v, --verbose=3"]);
	}

	#[test]
	fn t_optional() {
		let set = registry();

		// Optional arguments are attached-or-nothing; detached tokens are
		// never consumed.
		let (log, rest, _) = drain(&set, &["-v", "3"]);
		assert_eq!(log, ["-v, --verbose"]);
		assert_eq!(rest, ["3"]);

		let (log, _, _) = drain(&set, &["--verbose=3"]);
		assert_eq!(log, ["-v, --verbose=3"]);

		// An empty attachment is no attachment.
		let (log, _, _) = drain(&set, &["--verbose="]);
		assert_eq!(log, ["-v, --verbose"]);
	}

	#[test]
	fn t_required() {
		let set = registry();

		// Detached arguments come from the next token, whatever it looks
		// like.
		let (log, rest, consumed) = drain(&set, &["--input", "/tmp/x", "pos"]);
		assert_eq!(log, ["-i, --input=/tmp/x"]);
		assert_eq!(rest, ["pos"]);
		assert_eq!(consumed, 2);

		let (log, _, _) = drain(&set, &["-i", "-v"]);
		assert_eq!(log, ["-i, --input=-v"]);

		// An empty attachment falls through to the next token.
		let (log, _, _) = drain(&set, &["--input=", "next"]);
		assert_eq!(log, ["-i, --input=next"]);
	}

	#[test]
	fn t_missing_required() {
		let set = registry();

		let (log, rest, consumed) = drain(&set, &["--input"]);
		assert_eq!(log, ["!-i, --input"]);
		assert!(rest.is_empty());
		assert_eq!(consumed, 1);

		// Positionals skipped beforehand still survive.
		let (log, rest, consumed) = drain(&set, &["pos", "-i"]);
		assert_eq!(log, ["!-i, --input"]);
		assert_eq!(rest, ["pos"]);
		assert_eq!(consumed, 1);
	}

	#[test]
	fn t_terminator() {
		let set = registry();

		let (log, rest, consumed) = drain(&set, &["one", "--", "-h", "two"]);
		assert!(log.is_empty());
		assert_eq!(rest, ["one", "-h", "two"]);
		assert_eq!(consumed, 1);

		// Options before the terminator still count.
		let (log, rest, _) = drain(&set, &["-h", "--", "-v"]);
		assert_eq!(log, ["-h, --help"]);
		assert_eq!(rest, ["-v"]);
	}

	#[test]
	fn t_unknown_long() {
		let set = registry();

		// Unknown long options are reported once, then left behind as
		// positionals.
		let (log, rest, consumed) = drain(&set, &["--bogus", "-h"]);
		assert_eq!(log, ["?--bogus", "-h, --help"]);
		assert_eq!(rest, ["--bogus"]);
		assert_eq!(consumed, 1);
	}

	#[test]
	fn t_unknown_short() {
		let set = registry();

		// Unknown short characters are reported and consumed with their
		// token.
		let (log, rest, consumed) = drain(&set, &["-z"]);
		assert_eq!(log, ["?-z"]);
		assert!(rest.is_empty());
		assert_eq!(consumed, 1);

		// Known neighbors in the same cluster still match.
		let (log, _, _) = drain(&set, &["-azb"]);
		assert_eq!(log, ["-a", "?-z", "-b"]);
	}

	#[test]
	fn t_prefix_match() {
		let mut set = OptionSet::new();
		set.add("help", "", TieredValue::new(), Arity::NoArg).expect("Registration failed.");
		set.add("helper", "", TieredValue::new(), Arity::NoArg).expect("Registration failed.");
		set.add("verbose", "", TieredValue::new(), Arity::NoArg).expect("Registration failed.");

		// Exact beats prefix.
		let (log, _, _) = drain(&set, &["--help"]);
		assert_eq!(log, ["--help"]);

		// Unambiguous prefixes resolve.
		let (log, _, _) = drain(&set, &["--verb"]);
		assert_eq!(log, ["--verbose"]);

		// Ambiguous ones don't.
		let (log, rest, _) = drain(&set, &["--hel"]);
		assert_eq!(log, ["?--hel"]);
		assert_eq!(rest, ["--hel"]);
	}

	#[test]
	fn t_permutation_invariants() {
		let set = registry();
		let argv = ["p1", "-a", "p2", "p3", "--input", "x", "p4", "-bc", "p5"];
		let (log, rest, consumed) = drain(&set, &argv);

		// (b) matched options keep their relative order;
		assert_eq!(log, ["-a", "-i, --input=x", "-b", "-c"]);
		// (a) positionals keep theirs; (c) nothing dropped or duplicated;
		assert_eq!(rest, ["p1", "p2", "p3", "p4", "p5"]);
		// (d) the counts add up.
		assert_eq!(consumed, argv.len() - rest.len());
		assert_eq!(consumed, 4);
	}

	#[test]
	fn t_oddball_tokens() {
		let set = registry();

		// Bare dashes and empty strings are positional.
		let (log, rest, _) = drain(&set, &["-", "", "-h"]);
		assert_eq!(log, ["-h, --help"]);
		assert_eq!(rest, ["-", ""]);

		// Attachments on a bare switch are ignored.
		let (log, _, _) = drain(&set, &["--help=nope"]);
		assert_eq!(log, ["-h, --help"]);
	}

	#[test]
	fn t_resumable() {
		let set = registry();
		let flat = set.flat();
		let mut scan = Scanner::new(&flat, ["pos", "-h"].map(String::from));

		// Stopping early is allowed; the state just sits there.
		let Outcome::Matched(opt, None) = scan.next_opt() else {
			panic!("Expected a match.");
		};
		assert_eq!(opt.short(), Some('h'));
		assert!(! scan.finished());

		assert_eq!(scan.next_opt(), Outcome::End);
		assert!(scan.finished());
		assert_eq!(scan.next_opt(), Outcome::End);
		assert_eq!(scan.rest(), ["pos"]);
	}

	#[test]
	fn t_error_conversion() {
		// The aggregation layer leans on these issue shapes; make sure the
		// labels render sanely.
		assert_eq!(
			PaisleyError::UnknownOption("--bogus".to_owned()).to_string(),
			"unknown option: --bogus",
		);
		assert_eq!(
			PaisleyError::MissingArgument("-i, --input".to_owned()).to_string(),
			"missing required argument for -i, --input",
		);
	}
}
