/*!
# Benchmark: `paisley::OptionSet::parse`

For best results, this should be called with a quiet machine; the argv being
parsed is fixed either way.
*/

use brunch::{
	Bench,
	benches,
};
use paisley::{
	Arity,
	Outcome,
	OptionSet,
	Scanner,
	TieredValue,
};

/// # A Representative Registry.
fn registry() -> OptionSet {
	let mut opts = OptionSet::new();
	opts.add("h,help", "Print help.", TieredValue::new(), Arity::NoArg)
		.expect("Registration failed.");
	opts.add("v,verbose", "Noise.", TieredValue::new(), Arity::Optional)
		.expect("Registration failed.");
	opts.add("i,input", "Input path.", TieredValue::new(), Arity::Required)
		.expect("Registration failed.");
	opts.add("q,quiet", "Shhh.", TieredValue::new(), Arity::NoArg)
		.expect("Registration failed.");
	opts
}

/// # A Representative Argv.
fn argv() -> Vec<String> {
	["/foo/bar", "-v", "--input=/bar/baz", "-q", "one", "two"]
		.map(String::from)
		.to_vec()
}

benches!(
	Bench::new("paisley::OptionSet::parse()")
		.run_seeded_with(registry, |o| o.parse(argv())),

	Bench::spacer(),

	Bench::new("paisley::Scanner::next_opt()")
		.run_seeded_with(registry, |o| {
			let flat = o.flat();
			let mut scan = Scanner::new(&flat, argv());
			let mut total = 0_usize;
			while ! matches!(scan.next_opt(), Outcome::End | Outcome::Terminator) {
				total += 1;
			}
			total
		}),
);
