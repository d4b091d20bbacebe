mod common;

use std::sync::Arc;
use std::thread;

use common::{init_logger, profile, synthetic_profile};
use rs_langdetect_core::{FrequencyError, LanguageProfile, NgramFrequencyData};

#[test]
fn two_language_scenario() {
	init_logger();
	let en = profile("en", &[("th", 10), ("he", 5)]);
	let fr = profile("fr", &[("le", 8)]);
	assert_eq!(en.total_occurrences(2), 15);
	assert_eq!(fr.total_occurrences(2), 8);

	let data = NgramFrequencyData::create([&en, &fr], [2]).unwrap();
	assert_eq!(data.language_list(), ["en", "fr"]);
	assert_eq!(data.probabilities("th").unwrap().as_slice(), [10.0 / 15.0, 0.0]);
	assert_eq!(data.probabilities("he").unwrap().as_slice(), [5.0 / 15.0, 0.0]);
	assert_eq!(data.probabilities("le").unwrap().as_slice(), [0.0, 1.0]);
	assert!(data.probabilities("xy").is_none());
}

#[test]
fn untracked_length_fails_naming_the_language() {
	init_logger();
	let en = profile("en", &[("the", 1)]);
	let mut de = LanguageProfile::with_gram_lengths("de", [1, 2]).unwrap();
	de.observe("ei").unwrap();

	let error = NgramFrequencyData::create([&en, &de], [3]).unwrap_err();
	assert!(matches!(&error, FrequencyError::MissingGramLength { language, length: 3 } if language == "de"));
	assert!(error.to_string().contains("de"));
}

#[test]
fn build_is_deterministic() {
	init_logger();
	let profiles: Vec<LanguageProfile> = ["en", "fr", "nl"]
		.iter()
		.enumerate()
		.map(|(seed, name)| synthetic_profile(name, &['a', 'b', 'c', 'd', 'e'], seed as u64))
		.collect();

	let first = NgramFrequencyData::create(&profiles, [1, 2, 3]).unwrap();
	let second = NgramFrequencyData::create(&profiles, [1, 2, 3]).unwrap();
	assert_eq!(first, second);
	assert_eq!(first.language_list(), ["en", "fr", "nl"]);
	for (position, language) in first.language_list().iter().enumerate() {
		assert_eq!(first.language(position), Some(language.as_str()));
	}
}

#[test]
fn vectors_have_one_nonzero_slot_per_language() {
	init_logger();
	let profiles = [
		synthetic_profile("en", &['a', 'b', 'c'], 1),
		synthetic_profile("ru", &['а', 'б', 'в'], 2),
		synthetic_profile("el", &['α', 'β', 'c'], 3),
	];
	let data = NgramFrequencyData::create(&profiles, [1, 2, 3]).unwrap();

	for (gram, vector) in data.iter() {
		assert_eq!(vector.len(), data.language_count());
		assert!(vector.iter().all(|value| value >= 0.0), "{}", gram);
		assert!(vector.iter().any(|value| value > 0.0), "{}", gram);
	}
	// Cyrillic n-grams only exist in the Russian profile
	assert_eq!(data.probabilities("а").unwrap()[0], 0.0);
	assert!(data.probabilities("а").unwrap()[1] > 0.0);
}

#[test]
fn relative_frequencies_sum_to_one_per_length() {
	let en = synthetic_profile("en", &['a', 'b', 'c', 'd'], 7);
	let data = NgramFrequencyData::create([&en], [1, 2, 3]).unwrap();
	for length in 1..=3 {
		let sum: f64 = data
			.iter()
			.filter(|(gram, _)| gram.chars().count() == length)
			.map(|(_, vector)| vector[0])
			.sum();
		assert!((sum - 1.0).abs() < 1e-9, "length {}: {}", length, sum);
	}
}

#[test]
fn shared_table_is_readable_from_many_threads() {
	init_logger();
	let en = profile("en", &[("th", 10), ("he", 5)]);
	let fr = profile("fr", &[("le", 8)]);
	let data = Arc::new(NgramFrequencyData::create([&en, &fr], [2]).unwrap());

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let data = Arc::clone(&data);
			thread::spawn(move || {
				for _ in 0..1000 {
					assert_eq!(data.probabilities("le").unwrap().as_slice(), [0.0, 1.0]);
					assert!(data.probabilities("xy").is_none());
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}
}

#[test]
fn rebuilding_leaves_published_table_untouched() {
	let mut en = profile("en", &[("th", 10)]);
	let published = NgramFrequencyData::create([&en], [2]).unwrap();
	let before = published.clone();

	en.observe("he").unwrap();
	let fresh = NgramFrequencyData::create([&en], [2]).unwrap();

	assert_eq!(published, before);
	assert!(published.probabilities("he").is_none());
	assert!(fresh.probabilities("he").is_some());
}
