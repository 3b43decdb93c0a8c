use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_haiku_core::model::boundary::{is_good_ending, is_good_start};
use rs_haiku_core::model::corpus::Corpus;
use rs_haiku_core::model::generation_input::{FALLBACK_LINE, GenerationInput};
use rs_haiku_core::model::generator::Generator;
use rs_haiku_core::model::line::{Line, LineOrigin};
use rs_haiku_core::syllable::dictionary::SyllableDictionary;
use rs_haiku_core::syllable::oracle::SyllableOracle;
use rs_haiku_core::token::letters_only;

const VOCABULARY: &[&str] = &[
	"the", "of", "and", "but", "they", "calm", "law", "court", "quiet", "gavel",
	"river", "sealed", "testimony", "evidence", "silent", "moves", "slowly",
	"judge", "records", "drift", "away", "federal", "morning", "witness",
];

fn assert_valid(generator: &Generator, line: &Line, target: usize) {
	if line.origin == LineOrigin::Fallback {
		assert_eq!(line.text, FALLBACK_LINE);
		return;
	}
	assert_eq!(generator.oracle().count_phrase(&line.text), target, "line {:?}", line.text);
	assert_eq!(line.syllables, target);

	let first = line.words().next().expect("non-empty line");
	let last = line.words().last().expect("non-empty line");
	assert!(is_good_start(first), "weak start in {:?}", line.text);
	assert!(is_good_ending(last), "weak ending in {:?}", line.text);
}

#[test]
fn dictionary_pins_counts() {
	let dictionary: SyllableDictionary = vec![("subpoena".to_owned(), 3)].into_iter().collect();
	let oracle = SyllableOracle::with_dictionary(dictionary);
	assert_eq!(oracle.count("Subpoena!"), 3);

	// A value the heuristic would never produce
	let dictionary: SyllableDictionary = vec![("subpoena".to_owned(), 9)].into_iter().collect();
	let oracle = SyllableOracle::with_dictionary(dictionary);
	assert_eq!(oracle.count("SUBPOENA"), 9);
}

#[test]
fn sparse_word_corpus_meets_target_or_falls_back() {
	let generator = Generator::new(Corpus::new(Vec::<String>::new(), vec!["calm", "the", "law"]), SyllableOracle::new());
	for _ in 0..20 {
		let line = generator.build_line(5, &GenerationInput::default());
		assert!(line.text == FALLBACK_LINE || generator.oracle().count_phrase(&line.text) == 5);
		assert_valid(&generator, &line, 5);
	}
}

#[test]
fn phrase_subsequence_meets_target() {
	let generator = Generator::new(
		Corpus::new(vec!["the quiet court of law moves slowly"], Vec::<String>::new()),
		SyllableOracle::new(),
	);
	let line = generator.build_line(5, &GenerationInput::default());

	assert_eq!(generator.oracle().count_phrase(&line.text), 5);
	let last = line.words().last().unwrap();
	assert!(!["the", "of"].contains(&letters_only(last).as_str()));
}

#[test]
fn empty_corpora_return_fallback_literal() {
	let generator = Generator::default();
	for target in [5, 7] {
		assert_eq!(generator.build_line(target, &GenerationInput::default()).text, "silence falls here");
	}
	let haiku = generator.generate_haiku(&GenerationInput::default());
	assert!(haiku.is_degraded());
	assert!(haiku.lines.iter().all(|line| line.text == FALLBACK_LINE));
}

#[test]
fn strict_known_only_uses_dictionary_words() {
	let dictionary: SyllableDictionary = [("calm", 1), ("river", 2), ("court", 1), ("gavel", 2)]
		.into_iter()
		.map(|(w, s)| (w.to_owned(), s))
		.collect();
	let generator = Generator::new(
		Corpus::new(
			vec!["zorblax calm river court", "calm river gavel court"],
			vec!["zorblax", "calm", "river", "court", "gavel"],
		),
		SyllableOracle::with_dictionary(dictionary),
	);
	let mut input = GenerationInput::default();
	input.strict_known_only = true;
	let mut rng = StdRng::seed_from_u64(17);

	for _ in 0..20 {
		let line = generator.build_line_with_rng(5, &input, &mut rng);
		assert_valid(&generator, &line, 5);
		if !line.is_fallback() {
			assert!(line.words().all(|w| generator.oracle().is_known_word(w)), "{:?}", line.text);
		}
	}
}

#[test]
fn corpus_folder_feeds_the_generator() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("court.txt"), "the quiet court of law moves slowly\n").unwrap();
	std::fs::write(
		dir.path().join("river.json"),
		r#"{"phrases": ["sealed records drift slowly away"], "words": ["calm", "river"]}"#,
	)
	.unwrap();
	std::fs::create_dir(dir.path().join("dictionaries")).unwrap();

	let generator = Generator::from_folder(dir.path()).unwrap();
	assert_eq!(generator.corpus().names(), ["court", "river"]);
	assert_eq!(Generator::available_corpora(dir.path()).unwrap(), ["court", "river"]);

	let haiku = generator.generate_haiku_with_rng(&GenerationInput::default(), &mut StdRng::seed_from_u64(2));
	for (line, target) in haiku.lines.iter().zip([5, 7, 5]) {
		assert_valid(&generator, line, target);
	}
}

#[test]
fn unknown_corpus_name_keeps_current_corpus() {
	let dir = tempfile::tempdir().unwrap();
	let mut generator = Generator::new(Corpus::new(vec!["calm river"], vec!["calm"]), SyllableOracle::new());
	assert!(generator.load_corpora(dir.path(), &["missing"]).is_err());
	assert_eq!(generator.corpus().phrases(), ["calm river"]);
}

#[test]
fn not_a_folder_is_an_error() {
	assert!(Generator::from_folder("/definitely/not/here").is_err());
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(48))]

	#[test]
	fn generated_lines_hold_invariants(
		words in proptest::sample::subsequence(VOCABULARY.to_vec(), 0..VOCABULARY.len()),
		phrase_words in proptest::sample::subsequence(VOCABULARY.to_vec(), 0..12),
		target in prop_oneof![Just(5usize), Just(7usize)],
		seed in any::<u64>(),
	) {
		let phrases = if phrase_words.is_empty() { Vec::new() } else { vec![phrase_words.join(" ")] };
		let generator = Generator::new(Corpus::new(phrases, words), SyllableOracle::new());
		let mut rng = StdRng::seed_from_u64(seed);

		let line = generator.build_line_with_rng(target, &GenerationInput::default(), &mut rng);
		assert_valid(&generator, &line, target);
	}

	#[test]
	fn heuristic_never_returns_zero(word in "[a-z]{1,14}") {
		let oracle = SyllableOracle::new();
		prop_assert!(oracle.count(&word) >= 1);
	}

	#[test]
	fn non_alphabetic_tokens_count_zero(token in "[0-9 .,;!?-]{0,10}") {
		let oracle = SyllableOracle::new();
		prop_assert_eq!(oracle.count(&token), 0);
	}
}
