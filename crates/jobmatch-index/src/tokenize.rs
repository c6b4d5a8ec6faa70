//! Text analysis: lower-casing, word tokens, English stop words and n-grams.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// English stop words removed before n-grams are built.
pub const STOP_WORDS: &[&str] = &[
	"a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
	"alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amoungst",
	"amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
	"are", "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
	"been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
	"beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
	"could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due", "during",
	"each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
	"ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
	"fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found", "four",
	"from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt", "have", "he",
	"hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him",
	"himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
	"interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least",
	"less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
	"moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
	"neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
	"not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
	"or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
	"per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
	"seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
	"sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
	"still", "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
	"then", "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
	"they", "thick", "thin", "third", "this", "those", "though", "three", "through", "throughout",
	"thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two",
	"un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
	"whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
	"whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
	"whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
	"yours", "yourself", "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
	static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
	SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn token_pattern() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	// Runs of two or more word characters.
	RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern"))
}

pub fn is_stop_word(token: &str) -> bool {
	stop_words().contains(token)
}

/// Lower-cased word tokens of `text` with stop words removed.
pub fn tokens(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	token_pattern()
		.find_iter(&lowered)
		.map(|m| m.as_str())
		.filter(|t| !is_stop_word(t))
		.map(str::to_string)
		.collect()
}

/// Turns documents into the terms counted by the vectorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
	pub ngram_range: (usize, usize),
}

impl Analyzer {
	pub fn new(ngram_range: (usize, usize)) -> Self {
		Self { ngram_range }
	}

	/// All n-grams for `min_n..=max_n`, each joined with a single space.
	/// Unigrams come first, then longer grams in document order.
	pub fn analyze(&self, text: &str) -> Vec<String> {
		let words = tokens(text);
		let (min_n, max_n) = self.ngram_range;
		let mut terms = Vec::new();
		for n in min_n.max(1)..=max_n.min(words.len()) {
			if n == 1 {
				terms.extend(words.iter().cloned());
				continue;
			}
			terms.extend(words.windows(n).map(|w| w.join(" ")));
		}
		terms
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stop_word_list_is_complete() {
		assert_eq!(STOP_WORDS.len(), 318);
		assert!(is_stop_word("the"));
		assert!(is_stop_word("system"));
		assert!(!is_stop_word("python"));
	}

	#[test]
	fn tokens_are_lowercased_and_single_chars_dropped() {
		assert_eq!(tokens("Senior C Python-Engineer on AWS"), ["senior", "python", "engineer", "aws"]);
		assert!(tokens("").is_empty());
		assert!(tokens("a I the of").is_empty());
	}

	#[test]
	fn unicode_words_are_tokens() {
		assert_eq!(tokens("Développeur à München"), ["développeur", "münchen"]);
	}

	#[test]
	fn bigrams_skip_removed_stop_words() {
		let analyzer = Analyzer::new((1, 2));
		assert_eq!(
			analyzer.analyze("Data engineer for the cloud"),
			["data", "engineer", "cloud", "data engineer", "engineer cloud"]
		);
		assert_eq!(Analyzer::new((2, 2)).analyze("rust"), Vec::<String>::new());
	}
}
