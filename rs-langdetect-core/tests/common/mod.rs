#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_langdetect_core::LanguageProfile;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a named profile with the given counts.
pub fn profile(name: &str, grams: &[(&str, u64)]) -> LanguageProfile {
	let mut profile = LanguageProfile::new(name);
	for (gram, count) in grams {
		for _ in 0..*count {
			profile.observe(gram).unwrap();
		}
	}
	profile
}

/// Builds a pseudo-random profile trained on words drawn from `alphabet`.
pub fn synthetic_profile(name: &str, alphabet: &[char], seed: u64) -> LanguageProfile {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut profile = LanguageProfile::new(name);
	for _ in 0..200 {
		let length = rng.random_range(1..8);
		let word: String = (0..length).map(|_| alphabet[rng.random_range(0..alphabet.len())]).collect();
		profile.observe_text(&word).unwrap();
	}
	profile
}
